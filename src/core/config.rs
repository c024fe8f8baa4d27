//! Configuration types for the recognizer and its ONNX Runtime session.

use crate::core::errors::{RecognitionError, RecognitionResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Graph optimization levels for ONNX Runtime session creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub enum OrtGraphOptimizationLevel {
    /// Disable all optimizations.
    DisableAll,
    /// Enable basic optimizations.
    #[default]
    Level1,
    /// Enable extended optimizations.
    Level2,
    /// Enable all optimizations.
    Level3,
}

/// Configuration for the ONNX Runtime session backing the classifier.
///
/// Every field is optional; `None` leaves the runtime default untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrtSessionConfig {
    /// Number of threads used to parallelize execution within nodes.
    pub intra_threads: Option<usize>,
    /// Number of threads used to parallelize execution across nodes.
    pub inter_threads: Option<usize>,
    /// Enable parallel execution mode.
    pub parallel_execution: Option<bool>,
    /// Graph optimization level.
    pub optimization_level: Option<OrtGraphOptimizationLevel>,
}

impl OrtSessionConfig {
    /// Creates a new OrtSessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of intra-op threads.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    /// Sets the number of inter-op threads.
    pub fn with_inter_threads(mut self, threads: usize) -> Self {
        self.inter_threads = Some(threads);
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel_execution(mut self, parallel: bool) -> Self {
        self.parallel_execution = Some(parallel);
        self
    }

    /// Sets the graph optimization level.
    pub fn with_optimization_level(mut self, level: OrtGraphOptimizationLevel) -> Self {
        self.optimization_level = Some(level);
        self
    }
}

/// Configuration for a [`Recognizer`](crate::recognizer::Recognizer).
///
/// The model path is the only required field. The label-set path is optional:
/// when it is absent or the file cannot be read, the built-in default label
/// set is used instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Path to the ONNX classifier artifact.
    pub model_path: PathBuf,
    /// Optional path to a JSON array of class symbols.
    pub labels_path: Option<PathBuf>,
    /// Edge length of the square tensor the classifier expects (default: 28).
    pub canonical_size: u32,
    /// Red-channel value above which a surface pixel counts as ink
    /// (default: 128, i.e. >50% of max).
    pub ink_threshold: u8,
    /// Fraction of the bounding square added as padding on each side
    /// (default: 0.2).
    pub padding_ratio: f32,
    /// Optional ONNX Runtime session tuning.
    #[serde(default)]
    pub ort_session: Option<OrtSessionConfig>,
}

impl RecognizerConfig {
    /// Creates a configuration for the given model path with default
    /// normalization settings.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            labels_path: None,
            canonical_size: 28,
            ink_threshold: 128,
            padding_ratio: 0.2,
            ort_session: None,
        }
    }

    /// Sets the label-set artifact path.
    pub fn with_labels_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.labels_path = Some(path.into());
        self
    }

    /// Sets the canonical tensor edge length.
    pub fn with_canonical_size(mut self, size: u32) -> Self {
        self.canonical_size = size;
        self
    }

    /// Sets the ink detection threshold.
    pub fn with_ink_threshold(mut self, threshold: u8) -> Self {
        self.ink_threshold = threshold;
        self
    }

    /// Sets the bounding-square padding ratio.
    pub fn with_padding_ratio(mut self, ratio: f32) -> Self {
        self.padding_ratio = ratio;
        self
    }

    /// Sets the ONNX session configuration.
    pub fn with_ort_session(mut self, session: OrtSessionConfig) -> Self {
        self.ort_session = Some(session);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RecognitionResult<()> {
        if self.canonical_size == 0 {
            return Err(RecognitionError::config(
                "recognizer config",
                "canonical_size must be at least 1",
            ));
        }
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(RecognitionError::config(
                "recognizer config",
                format!(
                    "padding_ratio must be a non-negative finite number, got {}",
                    self.padding_ratio
                ),
            ));
        }
        Ok(())
    }
}
