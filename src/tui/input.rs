//! Topic input state for the TUI
//!
//! Plain single-line editor with a byte-indexed cursor kept on char
//! boundaries.

pub struct TopicInput {
    pub text: String,
    pub cursor: usize,
    pub focused: bool,
}

impl Default for TopicInput {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            focused: true,
        }
    }
}

impl TopicInput {
    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.next_boundary();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the whole text, cursor at the end. Used when a history entry
    /// is copied into the field.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_respect_multibyte_boundaries() {
        let mut input = TopicInput::default();
        for c in "héllo".chars() {
            input.insert(c);
        }
        assert_eq!(input.text, "héllo");

        input.move_home();
        input.move_right();
        input.move_right();
        input.delete();
        assert_eq!(input.text, "hélo");

        input.backspace();
        assert_eq!(input.text, "hlo");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn set_text_places_cursor_at_end() {
        let mut input = TopicInput::default();
        input.set_text("react");
        assert_eq!(input.cursor, 5);
        input.insert('!');
        assert_eq!(input.text, "react!");
    }
}
