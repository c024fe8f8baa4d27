//! # inkcheck
//!
//! Handwriting recognition and match evaluation for character tracing
//! practice. A learner draws a symbol on a raster surface; this crate turns
//! the ink trace into the canonical tensor a pretrained ONNX classifier
//! expects, runs inference, and decides through a layered policy whether the
//! drawing counts as correct, a wrong symbol, the right symbol in the wrong
//! case, or a visually acceptable substitute.
//!
//! ## Pipeline
//!
//! raw surface → [`CanvasNormalizer`](processors::CanvasNormalizer) → tensor
//! → classifier → [`Prediction`](domain::Prediction) →
//! [`ConfidencePolicy`](policy::ConfidencePolicy) gate →
//! [`evaluate`](policy::evaluate) → [`MatchVerdict`](domain::MatchVerdict)
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, and the ONNX Runtime wrapper
//! * [`processors`] - Canvas-to-tensor normalization
//! * [`domain`] - Label set, prediction, and verdict types
//! * [`policy`] - Confidence thresholds, confusion table, match evaluator
//! * [`recognizer`] - The caller-facing engine
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inkcheck::prelude::*;
//!
//! # fn main() -> Result<(), inkcheck::core::RecognitionError> {
//! let config = RecognizerConfig::new("models/emnist.onnx")
//!     .with_labels_path("models/labels.json");
//! let mut recognizer = Recognizer::new(config)?;
//! recognizer.load_model()?;
//!
//! let surface = image::RgbImage::new(300, 300); // the learner's drawing
//! let prediction = recognizer.recognize(&surface)?;
//! let verdict = recognizer.evaluate(&prediction, "a", MatchMode::Strict(CaseMode::Small));
//! if verdict.allow_advance {
//!     // move to the next prompt
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod policy;
pub mod processors;
pub mod recognizer;

/// Commonly used types, re-exported for callers.
pub mod prelude {
    pub use crate::core::{RecognitionError, RecognitionResult, RecognizerConfig};
    pub use crate::domain::{CaseMode, Feedback, LabelSet, MatchMode, MatchVerdict, Prediction};
    pub use crate::policy::{evaluate, ConfidencePolicy};
    pub use crate::processors::CanvasNormalizer;
    pub use crate::recognizer::{ClassifierProvider, Recognizer};
}
