//! Classifier output for a single recognition attempt.

/// The result of one forward pass: the winning symbol, its probability mass,
/// and the full distribution aligned to the label set.
///
/// Read-only after creation; one is produced per recognition call and none is
/// retained by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The symbol at the distribution's arg-max index.
    pub symbol: String,
    /// Probability mass at the arg-max index, in `[0, 1]`.
    pub confidence: f32,
    /// Full probability vector, position *i* aligned to label-set index *i*.
    pub distribution: Vec<f32>,
}

impl Prediction {
    /// Creates a prediction from its parts.
    pub fn new(symbol: impl Into<String>, confidence: f32, distribution: Vec<f32>) -> Self {
        Self {
            symbol: symbol.into(),
            confidence,
            distribution,
        }
    }

    /// The zero-confidence prediction returned for a blank surface.
    ///
    /// Carries an empty symbol and an all-zero distribution of the label-set
    /// length, so downstream evaluation sees "nothing recognizable" rather
    /// than an error.
    pub fn blank(class_count: usize) -> Self {
        Self {
            symbol: String::new(),
            confidence: 0.0,
            distribution: vec![0.0; class_count],
        }
    }

    /// Whether this prediction came from a blank surface.
    pub fn is_blank(&self) -> bool {
        self.symbol.is_empty()
    }
}
