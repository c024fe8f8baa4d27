//! Decision policies: confidence thresholds, the confusion table, and the
//! match evaluator.

pub mod confidence;
pub mod confusion;
pub mod evaluator;

pub use confidence::{ConfidencePolicy, DEFAULT_THRESHOLD, LOW_THRESHOLD};
pub use confusion::{accepts_substitution, confusion_entry, ConfusionEntry};
pub use evaluator::evaluate;
