//! Per-symbol confidence acceptance thresholds.

/// Symbols that get a lowered acceptance threshold.
///
/// These are classes the classifier structurally confuses with a neighbor
/// (l/I/1, O/o/0, g/q/9), so even a modest winning probability is meaningful.
/// Empirically tuned; kept as data so the table can be audited independently
/// of control flow.
const LOW_THRESHOLD_SYMBOLS: &[&str] = &["l", "I", "i", "O", "o", "g", "q"];

/// Default minimum confidence for accepting a prediction.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Lowered minimum for the symbols in [`LOW_THRESHOLD_SYMBOLS`].
pub const LOW_THRESHOLD: f32 = 0.3;

/// Maps a predicted symbol to the minimum confidence required before callers
/// trust the prediction for scoring.
///
/// Orthogonal to the confusion-table floors, which apply only when a
/// *different* symbol is being considered as an acceptable substitute.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidencePolicy;

impl ConfidencePolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Minimum acceptance confidence for `symbol`.
    pub fn threshold(&self, symbol: &str) -> f32 {
        if LOW_THRESHOLD_SYMBOLS.contains(&symbol) {
            LOW_THRESHOLD
        } else {
            DEFAULT_THRESHOLD
        }
    }

    /// Whether `confidence` clears the bar for `symbol`.
    pub fn accepts(&self, symbol: &str, confidence: f32) -> bool {
        confidence >= self.threshold(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_half() {
        let policy = ConfidencePolicy::new();
        assert_eq!(policy.threshold("A"), 0.5);
        assert_eq!(policy.threshold("5"), 0.5);
    }

    #[test]
    fn ambiguous_symbols_get_the_lowered_bar() {
        let policy = ConfidencePolicy::new();
        for symbol in ["l", "I", "i", "O", "o", "g", "q"] {
            assert_eq!(policy.threshold(symbol), 0.3, "symbol {symbol}");
        }
    }

    #[test]
    fn accepts_compares_against_the_per_symbol_bar() {
        let policy = ConfidencePolicy::new();
        assert!(policy.accepts("A", 0.5));
        assert!(!policy.accepts("A", 0.49));
        assert!(policy.accepts("l", 0.3));
        assert!(!policy.accepts("l", 0.29));
    }
}
