//! Error types for the recognition pipeline.
//!
//! A single [`RecognitionError`] enum covers every failure mode of the crate.
//! The taxonomy matters to callers: a fatal model-load failure, a `predict`
//! call on an engine that was never loaded, and a label-set/output mismatch
//! are all distinct conditions that drive different UI behavior, and none of
//! them may be folded into a generic "low confidence" result.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type RecognitionResult<T> = Result<T, RecognitionError>;

/// Errors that can occur while loading artifacts or running recognition.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The model artifact could not be loaded. Fatal: the engine stays in the
    /// not-loaded state and `recognize` refuses to run until a later load
    /// succeeds.
    #[error("model load failed for '{model_path}': {reason}")]
    ModelLoad {
        /// Path to the artifact that failed to load.
        model_path: String,
        /// Short reason string.
        reason: String,
        /// Underlying source error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `recognize` was called before a successful `load_model`, or after
    /// `dispose`. A programming error on the caller's side; never treated as
    /// a low-confidence prediction.
    #[error("recognizer is not loaded; call load_model() before recognize()")]
    NotLoaded,

    /// Inference itself failed inside the ONNX session.
    #[error("inference failed in model '{model_name}': {context}")]
    Inference {
        /// The name of the model where inference failed.
        model_name: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The classifier output does not line up with the loaded label set,
    /// either in length or because the arg-max index falls outside it.
    /// A fatal configuration mismatch, distinct from "the model is unsure".
    #[error(
        "label set mismatch: model produced {output_len} classes, label set has {label_count}"
    )]
    LabelMismatch {
        /// Length of the model's output vector (or argmax index + 1).
        output_len: usize,
        /// Number of symbols in the loaded label set.
        label_count: usize,
    },

    /// The label-set artifact could not be parsed as a JSON string array.
    /// Recovered by the loader (fallback to the built-in set); surfaced only
    /// when parsing is invoked directly.
    #[error("label set parse")]
    LabelParse(#[from] serde_json::Error),

    /// Error indicating invalid input to a pipeline stage.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor shape operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl RecognitionError {
    /// Creates a model-load error with a reason and an underlying source.
    pub fn model_load(
        model_path: impl Into<String>,
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ModelLoad {
            model_path: model_path.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a model-load error without an underlying source.
    pub fn model_load_plain(model_path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            model_path: model_path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Wraps an error that occurred during a forward pass.
    pub fn inference(
        model_name: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.into(),
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a configuration error with context and details.
    pub fn config(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Config {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }

    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mismatch_is_distinct_from_other_variants() {
        let err = RecognitionError::LabelMismatch {
            output_len: 62,
            label_count: 47,
        };
        assert!(matches!(err, RecognitionError::LabelMismatch { .. }));
        assert!(err.to_string().contains("62"));
        assert!(err.to_string().contains("47"));
    }

    #[test]
    fn config_error_includes_context_and_details() {
        let err = RecognitionError::config("normalizer", "padding ratio must be non-negative");
        assert!(err.to_string().contains("normalizer"));
        assert!(err.to_string().contains("padding ratio"));
    }
}
