use reflex_core::{Key, is_name_char};

/// Name being typed on the welcome screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameInput {
    text: String,
    max_chars: usize,
}

impl NameInput {
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            max_chars,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Apply an editing key. Returns `true` if the text changed.
    pub fn edit(&mut self, key: Key) -> bool {
        match key {
            Key::Backspace => self.text.pop().is_some(),
            Key::Char(c) if is_name_char(c) && self.text.chars().count() < self.max_chars => {
                self.text.push(c);
                true
            }
            _ => false,
        }
    }

    /// The trimmed name, if there is anything to submit.
    pub fn submission(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut NameInput, s: &str) {
        for c in s.chars() {
            input.edit(Key::Char(c));
        }
    }

    #[test]
    fn filters_characters_and_caps_length() {
        let mut input = NameInput::new(20);
        type_str(&mut input, "Ana-María_1 !");
        assert_eq!(input.text(), "AnaMaría1 ");
        type_str(&mut input, "xxxxxxxxxxxxxxxxxxxx");
        assert_eq!(input.text().chars().count(), 20);
    }

    #[test]
    fn backspace_and_submission() {
        let mut input = NameInput::new(20);
        assert_eq!(input.submission(), None);
        type_str(&mut input, "   ");
        assert_eq!(input.submission(), None);
        type_str(&mut input, "Leo ");
        assert_eq!(input.submission(), Some("Leo"));
        assert!(input.edit(Key::Backspace));
        assert_eq!(input.text(), "   Leo");
        input.clear();
        assert!(!input.edit(Key::Backspace));
    }
}
