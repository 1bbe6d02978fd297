/// Editable text with a character-indexed caret.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextBuffer {
    value: String,
    caret: usize,
}

impl TextBuffer {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = value.chars().count();
        Self { value, caret }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the content when it differs, keeping the caret in range.
    /// Returns whether anything changed.
    pub fn sync(&mut self, value: &str) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value.to_string();
        self.caret = self.caret.min(self.len());
        true
    }

    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let at = byte_index(&self.value, self.caret);
        self.value.insert_str(at, text);
        self.caret += text.chars().count();
        true
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.remove_char_at(self.caret - 1);
        self.caret -= 1;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.caret >= self.len() {
            return false;
        }
        self.remove_char_at(self.caret);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_to(self.caret.saturating_sub(1))
    }

    pub fn move_right(&mut self) -> bool {
        self.move_to(self.caret + 1)
    }

    pub fn move_home(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn move_end(&mut self) -> bool {
        self.move_to(self.len())
    }

    /// Lines to render, with a caret marker spliced in when focused.
    pub fn display_lines(&self, show_caret: bool) -> Vec<String> {
        let mut text = self.value.clone();
        if show_caret {
            text.insert(byte_index(&text, self.caret), '|');
        }
        text.split('\n').map(str::to_string).collect()
    }

    fn move_to(&mut self, caret: usize) -> bool {
        let caret = caret.min(self.len());
        let moved = caret != self.caret;
        self.caret = caret;
        moved
    }

    fn remove_char_at(&mut self, index: usize) {
        let start = byte_index(&self.value, index);
        let end = byte_index(&self.value, index + 1);
        self.value.replace_range(start..end, "");
    }
}

fn byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map_or(value.len(), |(index, _)| index)
}
