use std::collections::HashMap;

use crate::error::BufferError;

/// Insertion-ordered set of strings, addressed by index.
///
/// Populated on first occurrence while encoding and loaded positionally
/// while decoding, so both sides assign identical indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<String>,
    index: HashMap<String, usize>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `s`, appending it if not yet present.
    pub fn intern(&mut self, s: &str) -> usize {
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(s.to_owned());
        self.index.insert(s.to_owned(), idx);
        idx
    }

    /// Append `s` at the next index even if it is already present.
    ///
    /// Used when hydrating a table from the wire: position is authoritative.
    pub fn push(&mut self, s: String) -> usize {
        let idx = self.entries.len();
        self.index.entry(s.clone()).or_insert(idx);
        self.entries.push(s);
        idx
    }

    pub fn get(&self, idx: usize) -> Result<&str, BufferError> {
        self.entries
            .get(idx)
            .map(String::as_str)
            .ok_or(BufferError::StringIndexOutOfRange {
                index: idx,
                len: self.entries.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
