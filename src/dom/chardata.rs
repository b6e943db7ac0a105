//! Character-data buffer using the ropey crate.

use ropey::Rope;

/// Immutable, character-indexed buffer for text, comment, and processing
/// instruction nodes.
///
/// Positions address character boundaries, so all indexing here is in
/// characters rather than bytes.
#[derive(Clone, Debug, Default)]
pub struct CharData {
    rope: Rope,
}

impl CharData {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Get the character at a character index.
    #[must_use]
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        if char_idx < self.len_chars() {
            Some(self.rope.char(char_idx))
        } else {
            None
        }
    }

    /// Iterate over the characters starting at a character index.
    pub fn chars_at(&self, char_idx: usize) -> impl Iterator<Item = char> + '_ {
        self.rope.chars_at(char_idx.min(self.len_chars()))
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for CharData {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for CharData {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}
