/// Side effects the event loop performs after a handler pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Bell,
}
