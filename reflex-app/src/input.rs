use reflex_core::{InputEvent, Key};
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Translate a pressed key. Escape quits; every other key is a press.
pub fn map_key(key: &WinitKey, text: Option<&str>) -> InputEvent {
    let key = match key {
        WinitKey::Named(NamedKey::Escape) => return InputEvent::Quit,
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Named(NamedKey::Space) => Key::Char(' '),
        WinitKey::Character(s) => text
            .or(Some(s.as_str()))
            .and_then(|t| t.chars().next())
            .map_or(Key::Other, Key::Char),
        _ => text
            .and_then(|t| t.chars().next())
            .filter(|c| !c.is_control())
            .map_or(Key::Other, Key::Char),
    };
    InputEvent::KeyPress(key)
}
