//! Domain types: the label set, classifier predictions, and match verdicts.

pub mod labels;
pub mod prediction;
pub mod verdict;

pub use labels::{LabelSet, DEFAULT_SYMBOLS};
pub use prediction::Prediction;
pub use verdict::{CaseMode, Feedback, MatchMode, MatchVerdict};
