//! Core building blocks: error taxonomy, configuration, tensor aliases, and
//! the ONNX Runtime classifier wrapper.

pub mod config;
pub mod errors;
pub mod inference;

/// Single-precision NCHW tensor, the classifier's input format.
pub type Tensor4D = ndarray::Array4<f32>;

pub use config::{OrtGraphOptimizationLevel, OrtSessionConfig, RecognizerConfig};
pub use errors::{RecognitionError, RecognitionResult};
pub use inference::{Classifier, OrtClassifier};
