//! Input field handling for the terminal user interface.

/// A single-line text input with a character cursor and a hard length cap.
///
/// The cursor counts characters, not bytes, so multi-byte text edits cleanly.
#[derive(Clone, Debug)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub max_chars: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new(max_chars: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            max_chars,
        }
    }

    /// Create an input field seeded with `value`, cursor at the end.
    ///
    /// The seed is kept whole even past the cap; the cap only blocks typing.
    pub fn with_value(value: &str, max_chars: usize) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            max_chars,
        }
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Text to the left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_index(self.cursor)]
    }

    /// Insert a character at the cursor. Ignored once the cap is reached.
    pub fn handle_char(&mut self, c: char) -> bool {
        if self.char_count() >= self.max_chars {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}
