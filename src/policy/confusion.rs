//! The letter-to-digit confusion table for numeric practice.
//!
//! Under the classifier's stroke geometry some letters routinely win over the
//! digit the learner actually drew: a handwritten 3 reads as "B", a 7 as "t"
//! or "T". Each entry names the digits a predicted symbol may stand in for
//! and the minimum confidence required for that specific substitution. The
//! floors are pedagogically tuned per mapping; where the visual similarity is
//! strong (A/4, t/4/7) even modest confidence counts, where it is weaker
//! (T/7) the bar is higher than the general acceptance threshold.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One confusion-table entry: which digits a predicted symbol may substitute
/// for, and the confidence floor for that substitution.
#[derive(Debug, Clone, Copy)]
pub struct ConfusionEntry {
    /// The digits this symbol is accepted in place of.
    pub digits: &'static [&'static str],
    /// Minimum confidence for the substitution to count as a match.
    pub min_confidence: f32,
}

static CONFUSION_TABLE: Lazy<HashMap<&'static str, ConfusionEntry>> = Lazy::new(|| {
    let entries: &[(&str, &[&str], f32)] = &[
        ("B", &["3", "8"], 0.5),
        ("A", &["4"], 0.3),
        ("t", &["4", "7"], 0.3),
        ("T", &["7"], 0.7),
        ("b", &["6"], 0.5),
        ("O", &["0"], 0.5),
        ("o", &["0"], 0.5),
        ("I", &["1"], 0.5),
        ("i", &["1"], 0.5),
        ("l", &["1"], 0.5),
        ("Z", &["2"], 0.5),
        ("z", &["2"], 0.5),
        ("S", &["5"], 0.5),
        ("s", &["5"], 0.5),
        ("G", &["6"], 0.5),
        ("g", &["6"], 0.5),
        ("q", &["9"], 0.5),
    ];
    entries
        .iter()
        .map(|&(symbol, digits, min_confidence)| {
            (
                symbol,
                ConfusionEntry {
                    digits,
                    min_confidence,
                },
            )
        })
        .collect()
});

/// Looks up the confusion entry for a predicted symbol, if one exists.
pub fn confusion_entry(symbol: &str) -> Option<&'static ConfusionEntry> {
    CONFUSION_TABLE.get(symbol)
}

/// Whether `predicted` is an acceptable substitute for `expected` at the
/// given confidence.
pub fn accepts_substitution(predicted: &str, expected: &str, confidence: f32) -> bool {
    confusion_entry(predicted)
        .map(|entry| entry.digits.contains(&expected) && confidence >= entry.min_confidence)
        .unwrap_or(false)
}
