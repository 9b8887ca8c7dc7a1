//! Category legend parsing and lookup.
//!
//! A dataset carries a textual `legend` attribute mapping integer
//! land-use codes to human-readable names, one `<code> => <name>` entry
//! per line. The legend is parsed once at dataset open time and is
//! immutable for the session.

use indexmap::IndexMap;

use crate::error::LegendError;

/// Mapping from integer category code to human-readable name.
///
/// Entries keep their order of appearance in the attribute text.
/// Duplicate codes keep the first position and take the last name,
/// matching the behavior of the original attribute format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Legend {
    entries: IndexMap<i32, String>,
}

impl Legend {
    /// Parse a multi-line `<code> => <name>` attribute block.
    ///
    /// Whitespace around codes and names is stripped. Lines without the
    /// `=>` separator or with a non-integer code are skipped rather than
    /// reported; a scratch line in the attribute must not take the whole
    /// dataset down.
    ///
    /// # Errors
    ///
    /// Returns [`LegendError::Empty`] when no line parses at all, since a
    /// dataset without a category vocabulary is unusable.
    pub fn parse(text: &str) -> Result<Self, LegendError> {
        let mut entries = IndexMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((code, name)) = line.split_once("=>") else {
                continue;
            };
            let Ok(code) = code.trim().parse::<i32>() else {
                continue;
            };
            entries.insert(code, name.trim().to_string());
        }
        if entries.is_empty() {
            return Err(LegendError::Empty);
        }
        Ok(Self { entries })
    }

    /// Whether `code` is a known category.
    pub fn contains(&self, code: i32) -> bool {
        self.entries.contains_key(&code)
    }

    /// The name for `code`, or `None` for an unknown category.
    pub fn name(&self, code: i32) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    /// All category codes, in order of appearance.
    pub fn codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().copied()
    }

    /// Iterate `(code, name)` pairs in order of appearance.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.entries.iter().map(|(&k, v)| (k, v.as_str()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the legend holds no categories.
    ///
    /// Cannot be observed on a parsed legend, which is non-empty by
    /// construction; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
