//! The recognition engine: owns the model lifecycle and runs the
//! normalize-infer pipeline.
//!
//! The loaded model and label set live in an explicit [`Recognizer`] value
//! with a `NotLoaded`/`Ready` state, passed by reference to callers. Calling
//! `recognize` before `load_model` (or after `dispose`) is a loud, typed
//! error, never a silent low-confidence result.

use crate::core::config::RecognizerConfig;
use crate::core::errors::{RecognitionError, RecognitionResult};
use crate::core::inference::{Classifier, OrtClassifier};
use crate::domain::{LabelSet, MatchMode, MatchVerdict, Prediction};
use crate::policy::confidence::ConfidencePolicy;
use crate::policy::evaluator;
use crate::processors::canvas::CanvasNormalizer;
use image::RgbImage;
use tracing::{debug, info};

/// Builds the classifier during `load_model`.
///
/// The seam exists so tests can substitute a stub and observe load counts;
/// production code uses [`OrtClassifierProvider`].
pub trait ClassifierProvider: Send {
    /// Loads a classifier for the given configuration.
    fn provide(&self, config: &RecognizerConfig) -> RecognitionResult<Box<dyn Classifier>>;
}

/// Default provider backed by ONNX Runtime.
#[derive(Debug, Default)]
pub struct OrtClassifierProvider;

impl ClassifierProvider for OrtClassifierProvider {
    fn provide(&self, config: &RecognizerConfig) -> RecognitionResult<Box<dyn Classifier>> {
        let classifier = OrtClassifier::load(&config.model_path, config.ort_session.as_ref())?;
        Ok(Box::new(classifier))
    }
}

enum EngineState {
    NotLoaded,
    Ready {
        classifier: Box<dyn Classifier>,
        labels: LabelSet,
    },
}

/// The recognition and match-evaluation engine.
///
/// Lifecycle: construct with a [`RecognizerConfig`], call [`load_model`]
/// (idempotent), then any number of [`recognize`]/[`evaluate`] calls, and
/// [`dispose`] on teardown. Safe to reuse across sequential calls without
/// reloading.
///
/// [`load_model`]: Recognizer::load_model
/// [`recognize`]: Recognizer::recognize
/// [`evaluate`]: Recognizer::evaluate
/// [`dispose`]: Recognizer::dispose
pub struct Recognizer {
    config: RecognizerConfig,
    normalizer: CanvasNormalizer,
    policy: ConfidencePolicy,
    provider: Box<dyn ClassifierProvider>,
    state: EngineState,
}

impl Recognizer {
    /// Creates a recognizer using the ONNX Runtime provider.
    pub fn new(config: RecognizerConfig) -> RecognitionResult<Self> {
        Self::with_provider(config, Box::new(OrtClassifierProvider))
    }

    /// Creates a recognizer with a custom classifier provider.
    pub fn with_provider(
        config: RecognizerConfig,
        provider: Box<dyn ClassifierProvider>,
    ) -> RecognitionResult<Self> {
        config.validate()?;
        let normalizer = CanvasNormalizer::from_config(&config);
        Ok(Self {
            config,
            normalizer,
            policy: ConfidencePolicy::new(),
            provider,
            state: EngineState::NotLoaded,
        })
    }

    /// Whether a model is currently loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, EngineState::Ready { .. })
    }

    /// The loaded label set, once `load_model` has succeeded.
    pub fn labels(&self) -> Option<&LabelSet> {
        match &self.state {
            EngineState::Ready { labels, .. } => Some(labels),
            EngineState::NotLoaded => None,
        }
    }

    /// Loads the label set and model artifact.
    ///
    /// Idempotent: a call while already loaded is a no-op. A label-set
    /// failure falls back to the built-in default; a model failure leaves the
    /// engine not loaded and is returned to the caller.
    pub fn load_model(&mut self) -> RecognitionResult<()> {
        if self.is_loaded() {
            debug!("load_model called while already loaded; ignoring");
            return Ok(());
        }
        let labels = LabelSet::load_or_default(self.config.labels_path.as_deref());
        let classifier = self.provider.provide(&self.config)?;
        info!(
            model = classifier.model_name(),
            classes = labels.len(),
            "recognizer ready"
        );
        self.state = EngineState::Ready { classifier, labels };
        Ok(())
    }

    /// Runs the normalize-infer pipeline on a drawing surface.
    ///
    /// A blank surface (no ink pixels) yields [`Prediction::blank`] without
    /// touching the classifier; evaluation of such a prediction can never
    /// come out correct.
    pub fn recognize(&self, surface: &RgbImage) -> RecognitionResult<Prediction> {
        let EngineState::Ready { classifier, labels } = &self.state else {
            return Err(RecognitionError::NotLoaded);
        };

        if !self.normalizer.has_ink(surface) {
            debug!("blank surface, skipping inference");
            return Ok(Prediction::blank(labels.len()));
        }

        let tensor = self.normalizer.normalize(surface);
        let mut scores = classifier.run(&tensor)?;
        ensure_probabilities(&mut scores);

        if scores.len() != labels.len() {
            return Err(RecognitionError::LabelMismatch {
                output_len: scores.len(),
                label_count: labels.len(),
            });
        }
        let index = argmax(&scores).ok_or_else(|| {
            RecognitionError::invalid_input("classifier produced an empty output vector")
        })?;
        let symbol = labels.get(index).ok_or(RecognitionError::LabelMismatch {
            output_len: index + 1,
            label_count: labels.len(),
        })?;

        let confidence = scores[index];
        debug!(symbol, confidence, "recognized drawing");
        Ok(Prediction::new(symbol, confidence, scores))
    }

    /// Evaluates a prediction against the expected symbol under `mode`.
    ///
    /// Pure decision logic; see [`crate::policy::evaluator::evaluate`].
    pub fn evaluate(
        &self,
        prediction: &Prediction,
        expected: &str,
        mode: MatchMode,
    ) -> MatchVerdict {
        evaluator::evaluate(prediction, expected, mode, &self.policy)
    }

    /// Minimum acceptance confidence for `symbol`.
    pub fn confidence_threshold(&self, symbol: &str) -> f32 {
        self.policy.threshold(symbol)
    }

    /// Releases the model and returns to the not-loaded state.
    ///
    /// Safe to call in any state, including after a load that never
    /// completed; subsequent `recognize` calls fail with
    /// [`RecognitionError::NotLoaded`].
    pub fn dispose(&mut self) {
        if self.is_loaded() {
            info!("disposing recognizer model");
        }
        self.state = EngineState::NotLoaded;
    }
}

/// Index of the largest score, ties resolved to the first occurrence.
fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}

/// Converts raw scores to probabilities when the model emits logits.
///
/// A row already in `[0, 1]` summing to ~1 is left untouched; anything else
/// gets a numerically stable softmax (max subtraction before exponentiation).
fn ensure_probabilities(scores: &mut [f32]) {
    if scores.is_empty() {
        return;
    }
    let sum: f32 = scores.iter().sum();
    let in_range = scores.iter().all(|&v| (0.0..=1.0).contains(&v));
    if in_range && (sum - 1.0).abs() < 1e-3 {
        return;
    }
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut total = 0.0;
    for v in scores.iter_mut() {
        *v = (*v - max).exp();
        total += *v;
    }
    if total > 0.0 {
        for v in scores.iter_mut() {
            *v /= total;
        }
    }
}
