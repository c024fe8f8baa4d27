//! The ordered label set mapping classifier output indices to symbols.

use crate::core::errors::RecognitionResult;
use std::path::Path;
use tracing::warn;

/// The built-in fallback label set: the 62 EMNIST ByClass symbols in their
/// canonical order (digits, then uppercase, then lowercase). Used whenever no
/// label-set artifact is configured or the configured one cannot be read.
pub const DEFAULT_SYMBOLS: [&str; 62] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", //
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", //
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z",
];

/// An ordered, index-stable sequence of class symbols.
///
/// Index *i* corresponds to position *i* of the classifier's output vector.
/// The set is immutable after construction; consistency with the model's
/// output length is checked by the recognizer on every prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    symbols: Vec<String>,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LabelSet {
    /// Builds a label set from an ordered list of symbols.
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    /// Parses a JSON array of strings, e.g. `["0", "1", "A"]`.
    pub fn from_json_str(json: &str) -> RecognitionResult<Self> {
        let symbols: Vec<String> = serde_json::from_str(json)?;
        Ok(Self { symbols })
    }

    /// Reads and parses a label-set artifact from disk.
    pub fn from_file(path: &Path) -> RecognitionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Loads the label set for `path`, falling back to the built-in default.
    ///
    /// A missing or unparseable artifact is recovered locally: the failure is
    /// logged and the default set is returned. Model-load failures, by
    /// contrast, are fatal and handled by the recognizer.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            None => Self::default(),
            Some(p) => match Self::from_file(p) {
                Ok(set) if !set.is_empty() => set,
                Ok(_) => {
                    warn!(path = %p.display(), "label set artifact is empty, using built-in default");
                    Self::default()
                }
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "failed to load label set, using built-in default");
                    Self::default()
                }
            },
        }
    }

    /// Returns the symbol at `index`, if it is within bounds.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(|s| s.as_str())
    }

    /// Number of symbols in the set.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the set contains no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the symbols in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_62_classes_in_emnist_order() {
        let labels = LabelSet::default();
        assert_eq!(labels.len(), 62);
        assert_eq!(labels.get(0), Some("0"));
        assert_eq!(labels.get(9), Some("9"));
        assert_eq!(labels.get(10), Some("A"));
        assert_eq!(labels.get(35), Some("Z"));
        assert_eq!(labels.get(36), Some("a"));
        assert_eq!(labels.get(61), Some("z"));
        assert_eq!(labels.get(62), None);
    }

    #[test]
    fn parses_json_array() {
        let labels = LabelSet::from_json_str(r#"["0", "1", "A", "a"]"#).unwrap();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels.get(2), Some("A"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(LabelSet::from_json_str("not json").is_err());
        assert!(LabelSet::from_json_str(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let labels = LabelSet::load_or_default(Some(Path::new("/nonexistent/labels.json")));
        assert_eq!(labels, LabelSet::default());
    }

    #[test]
    fn no_path_uses_default() {
        assert_eq!(LabelSet::load_or_default(None), LabelSet::default());
    }
}
