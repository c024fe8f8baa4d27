//! ONNX Runtime integration for the character classifier.
//!
//! [`OrtClassifier`] wraps a single `ort` session and exposes the one
//! operation this crate needs: a forward pass over a `(1, 1, S, S)` float
//! tensor yielding the raw class-score row. The [`Classifier`] trait is the
//! seam that lets tests substitute a stub for the real session.

use crate::core::config::{OrtGraphOptimizationLevel, OrtSessionConfig};
use crate::core::errors::{RecognitionError, RecognitionResult};
use crate::core::Tensor4D;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::{Session, SessionInputs};
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// A classifier that maps a normalized drawing tensor to class scores.
///
/// The returned vector is one score per class, aligned to the label set.
/// Scores may be raw logits; the caller is responsible for turning them into
/// probabilities.
pub trait Classifier: Send {
    /// Human-readable model name, used in error context.
    fn model_name(&self) -> &str;

    /// Runs a forward pass for a single normalized drawing.
    fn run(&self, input: &Tensor4D) -> RecognitionResult<Vec<f32>>;
}

/// ONNX Runtime implementation of [`Classifier`].
#[derive(Debug)]
pub struct OrtClassifier {
    session: Mutex<Session>,
    model_name: String,
    model_path: PathBuf,
    input_name: String,
    output_name: String,
}

impl OrtClassifier {
    /// Loads the model artifact at `path` into a new session.
    ///
    /// Input and output tensor names are discovered from the session metadata
    /// rather than hard-coded, so artifacts exported from different training
    /// setups work without configuration.
    pub fn load(path: &Path, config: Option<&OrtSessionConfig>) -> RecognitionResult<Self> {
        let builder = Session::builder().map_err(|e| {
            RecognitionError::model_load(path.display().to_string(), "session builder", e)
        })?;
        let mut builder = match config {
            Some(cfg) => Self::apply_session_config(builder, cfg).map_err(|e| {
                RecognitionError::model_load(path.display().to_string(), "session config", e)
            })?,
            None => builder,
        };
        let session = builder.commit_from_file(path).map_err(|e| {
            RecognitionError::model_load(path.display().to_string(), "commit from file", e)
        })?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| {
                RecognitionError::model_load_plain(
                    path.display().to_string(),
                    "model declares no inputs",
                )
            })?;
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| {
                RecognitionError::model_load_plain(
                    path.display().to_string(),
                    "model declares no outputs",
                )
            })?;

        let model_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "classifier".to_string());

        info!(
            model = %model_name,
            input = %input_name,
            output = %output_name,
            "loaded classifier session"
        );

        Ok(Self {
            session: Mutex::new(session),
            model_name,
            model_path: path.to_path_buf(),
            input_name,
            output_name,
        })
    }

    /// Returns the model path associated with this classifier.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn apply_session_config(
        mut builder: SessionBuilder,
        cfg: &OrtSessionConfig,
    ) -> Result<SessionBuilder, ort::Error> {
        if let Some(intra) = cfg.intra_threads {
            builder = builder.with_intra_threads(intra)?;
        }
        if let Some(inter) = cfg.inter_threads {
            builder = builder.with_inter_threads(inter)?;
        }
        if let Some(par) = cfg.parallel_execution {
            builder = builder.with_parallel_execution(par)?;
        }
        if let Some(level) = cfg.optimization_level {
            let mapped = match level {
                OrtGraphOptimizationLevel::DisableAll => GraphOptimizationLevel::Disable,
                OrtGraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
                OrtGraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
                OrtGraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
            };
            builder = builder.with_optimization_level(mapped)?;
        }
        Ok(builder)
    }
}

impl Classifier for OrtClassifier {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn run(&self, input: &Tensor4D) -> RecognitionResult<Vec<f32>> {
        let input_shape = input.shape().to_vec();
        let input_dims: Vec<i64> = input_shape.iter().map(|&d| d as i64).collect();
        let input_data = input.as_slice().ok_or_else(|| {
            RecognitionError::invalid_input("input tensor is not contiguous in memory")
        })?;

        let input_tensor =
            TensorRef::from_array_view((input_dims, input_data)).map_err(|e| {
                RecognitionError::inference(
                    &self.model_name,
                    format!("failed to convert input tensor with shape {input_shape:?}"),
                    e,
                )
            })?;

        let mut session = self.session.lock().map_err(|_| {
            RecognitionError::invalid_input(format!(
                "model '{}': failed to acquire session lock",
                self.model_name
            ))
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];
        let outputs = session
            .run(SessionInputs::<0>::ValueMap(inputs))
            .map_err(|e| {
                RecognitionError::inference(
                    &self.model_name,
                    format!("forward pass failed for input shape {input_shape:?}"),
                    e,
                )
            })?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                RecognitionError::inference(
                    &self.model_name,
                    format!("failed to extract output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;

        // Expect [batch, classes]; a flat [classes] output is tolerated since
        // some exports squeeze the unit batch dimension.
        let row = match output_shape.len() {
            2 if output_shape[0] == 1 => output_data.to_vec(),
            1 => output_data.to_vec(),
            _ => {
                return Err(RecognitionError::invalid_input(format!(
                    "model '{}': expected [1, classes] output, got shape {:?}",
                    self.model_name, output_shape
                )));
            }
        };

        debug!(
            model = %self.model_name,
            classes = row.len(),
            "forward pass complete"
        );

        Ok(row)
    }
}
