//! Single-line text input with a cursor.

/// A text input field. The cursor is a character index, not a byte index,
/// so multi-byte input edits cleanly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_index(self.cursor)]
    }

    /// Insert a character at the cursor.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor() {
        let mut f = InputField::with_value("helo");
        f.move_cursor_left();
        f.handle_char('l');
        assert_eq!(f.value, "hello");
        f.move_home();
        f.handle_delete();
        assert_eq!(f.value, "ello");
        f.move_end();
        f.handle_backspace();
        assert_eq!(f.value, "ell");
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut f = InputField::new();
        for c in "café".chars() {
            f.handle_char(c);
        }
        f.handle_backspace();
        f.handle_char('e');
        assert_eq!(f.value, "cafe");
        assert_eq!(f.cursor, 4);
    }

    #[test]
    fn before_cursor_slices_on_char_boundaries() {
        let mut f = InputField::with_value("日本語");
        f.move_cursor_left();
        assert_eq!(f.before_cursor(), "日本");
        f.move_home();
        assert_eq!(f.before_cursor(), "");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut f = InputField::with_value("abc");
        f.clear();
        assert_eq!(f, InputField::new());
        f.move_cursor_left();
        assert_eq!(f.cursor, 0);
    }
}
