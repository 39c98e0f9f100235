use crate::trial::Generation;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A scheduled cue reached its deadline
    CueFired(Generation),
}
