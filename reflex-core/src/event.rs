/// Keys the game distinguishes. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
    Other,
}

/// Discrete input reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPress(Key),
    PointerClick { x: f32, y: f32 },
    Quit,
}

/// An input event with the monotonic time (ns) at which it was received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedEvent {
    pub at_ns: u64,
    pub event: InputEvent,
}

impl StampedEvent {
    pub fn new(at_ns: u64, event: InputEvent) -> Self {
        Self { at_ns, event }
    }
}
