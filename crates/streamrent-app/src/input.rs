//! Command-line editing.

/// Platform-neutral key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Delete before the cursor.
    Backspace,
    /// Delete under the cursor.
    Delete,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Cursor to start of line.
    Home,
    /// Cursor to end of line.
    End,
    /// Submit the line.
    Enter,
    /// Leave the application.
    Esc,
    /// Ctrl-C.
    Interrupt,
}

/// Single-line input buffer with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte device names edit
/// correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Apply an editing key. Returns false for keys that do not edit
    /// (Enter, Esc, Ctrl-C).
    pub fn apply(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(ch) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, ch);
                self.cursor += 1;
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.len(),
            KeyInput::Enter | KeyInput::Esc | KeyInput::Interrupt => return false,
        }
        true
    }

    /// Take the line, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputState {
        let mut input = InputState::new();
        for ch in text.chars() {
            input.apply(KeyInput::Char(ch));
        }
        input
    }

    #[test]
    fn typing_appends() {
        let input = typed("/rent");
        assert_eq!(input.buffer(), "/rent");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = typed("/rnt");
        input.apply(KeyInput::Left);
        input.apply(KeyInput::Left);
        input.apply(KeyInput::Char('e'));
        assert_eq!(input.buffer(), "/rent");

        input.apply(KeyInput::Home);
        input.apply(KeyInput::Delete);
        assert_eq!(input.buffer(), "rent");

        input.apply(KeyInput::End);
        input.apply(KeyInput::Backspace);
        assert_eq!(input.buffer(), "ren");
    }

    #[test]
    fn multibyte_characters() {
        let mut input = typed("/name Fahrrad ü");
        input.apply(KeyInput::Backspace);
        assert_eq!(input.buffer(), "/name Fahrrad ");
        input.apply(KeyInput::Char('ß'));
        input.apply(KeyInput::Left);
        input.apply(KeyInput::Char('é'));
        assert_eq!(input.buffer(), "/name Fahrrad éß");
    }

    #[test]
    fn take_resets() {
        let mut input = typed("/quit");
        assert!(!input.apply(KeyInput::Enter));
        assert_eq!(input.take(), "/quit");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = typed("ab");
        input.apply(KeyInput::Right);
        assert_eq!(input.cursor(), 2);
        input.apply(KeyInput::Home);
        input.apply(KeyInput::Left);
        input.apply(KeyInput::Backspace);
        assert_eq!(input.cursor(), 0);
        assert_eq!(input.buffer(), "ab");
    }
}
