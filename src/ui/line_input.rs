use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
    /// Tab / BackTab: move to the next or previous field.
    FocusNext,
    FocusPrev,
}

const MASK: char = '•';

/// Single-line text field for the login and registration forms.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    masked: bool,
    max_chars: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            masked: false,
            max_chars: 64,
        }
    }

    /// A field whose contents are shown as bullets.
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::new("")
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) as displayed.
    /// When the cursor is at the end of the text, cursor_char is None.
    pub fn render_parts(&self) -> (String, Option<char>, String) {
        let shown: Vec<char> = if self.masked {
            self.text.chars().map(|_| MASK).collect()
        } else {
            self.text.chars().collect()
        };
        let before: String = shown[..self.cursor].iter().collect();
        let at = shown.get(self.cursor).copied();
        let after: String = shown.get(self.cursor + 1..).unwrap_or_default().iter().collect();
        (before, at, after)
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let len = self.text.chars().count();
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Tab | KeyCode::Down => return InputResult::FocusNext,
            KeyCode::BackTab | KeyCode::Up => return InputResult::FocusPrev,

            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.remove_char(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < len {
                    self.remove_char(self.cursor);
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = len;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if len < self.max_chars {
                    let byte_offset = self.char_to_byte(self.cursor);
                    self.text.insert(byte_offset, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn remove_char(&mut self, char_idx: usize) {
        let start = self.char_to_byte(char_idx);
        let end = self.char_to_byte(char_idx + 1);
        self.text.replace_range(start..end, "");
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut LineInput, text: &str) {
        for ch in text.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn insert_at_start_middle_end() {
        let mut input = LineInput::new("ac");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "abc");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Char('_')));
        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Char('!')));
        assert_eq!(input.value(), "_abc!");
    }

    #[test]
    fn multibyte_editing() {
        let mut input = LineInput::new("");
        type_str(&mut input, "ゆき");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "き");
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn ctrl_shortcuts() {
        let mut input = LineInput::new("hello");
        input.handle(ctrl('a'));
        input.handle(key(KeyCode::Char('>')));
        assert_eq!(input.value(), ">hello");
        input.handle(ctrl('e'));
        input.handle(key(KeyCode::Char('<')));
        assert_eq!(input.value(), ">hello<");
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn masked_field_hides_text() {
        let mut input = LineInput::masked();
        type_str(&mut input, "pw1");
        assert_eq!(input.value(), "pw1");
        input.handle(key(KeyCode::Left));
        let (before, at, after) = input.render_parts();
        assert_eq!(before, "••");
        assert_eq!(at, Some(MASK));
        assert_eq!(after, "");
    }

    #[test]
    fn render_parts_at_end() {
        let input = LineInput::new("abc");
        assert_eq!(input.render_parts(), ("abc".to_string(), None, String::new()));
    }

    #[test]
    fn navigation_and_form_keys() {
        let mut input = LineInput::new("x");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.handle(key(KeyCode::Tab)), InputResult::FocusNext);
        assert_eq!(input.handle(key(KeyCode::BackTab)), InputResult::FocusPrev);
    }

    #[test]
    fn length_is_capped() {
        let mut input = LineInput::new("");
        type_str(&mut input, &"a".repeat(100));
        assert_eq!(input.value().chars().count(), 64);
    }
}
