//! The match evaluator: reconciles classifier output against the expected
//! symbol under a pedagogical mode.
//!
//! Pure functions of (prediction, expected, mode); no hidden state. Every
//! call site that used to hand-roll its own matching (numbers screen, capital
//! letters, small letters) goes through [`evaluate`] with the mode argument
//! carrying the per-screen difference.

use crate::domain::{CaseMode, MatchMode, MatchVerdict, Prediction};
use crate::policy::confidence::ConfidencePolicy;
use crate::policy::confusion;

/// Letters whose lowercase and uppercase glyphs are nearly indistinguishable
/// by stroke shape. In lowercase practice the classifier's case call for
/// these is noise, so either case is accepted when the letter itself matches.
/// Empirically tuned list; kept as data.
const CASE_AMBIGUOUS_LETTERS: &[&str] = &[
    "c", "f", "k", "m", "o", "p", "s", "u", "v", "w", "x", "y", "z",
];

/// Evaluates a prediction against the expected symbol under `mode`.
pub fn evaluate(
    prediction: &Prediction,
    expected: &str,
    mode: MatchMode,
    policy: &ConfidencePolicy,
) -> MatchVerdict {
    match mode {
        MatchMode::Loose => evaluate_loose(prediction, expected, policy),
        MatchMode::Numeric => evaluate_numeric(prediction, expected, policy),
        MatchMode::Strict(case) => evaluate_strict(prediction, expected, case, policy),
    }
}

/// Mode A: case-insensitive equality, gated on the general threshold.
fn evaluate_loose(
    prediction: &Prediction,
    expected: &str,
    policy: &ConfidencePolicy,
) -> MatchVerdict {
    if prediction.is_blank() || !policy.accepts(&prediction.symbol, prediction.confidence) {
        return MatchVerdict::unreadable();
    }
    if prediction.symbol == expected {
        return MatchVerdict::perfect();
    }
    if prediction.symbol.eq_ignore_ascii_case(expected) {
        // Correct under loose matching, but not an exact-case hit.
        return MatchVerdict {
            is_exact: false,
            ..MatchVerdict::perfect()
        };
    }
    MatchVerdict::wrong_symbol()
}

/// Mode B: digit practice with the letter-to-digit confusion table.
fn evaluate_numeric(
    prediction: &Prediction,
    expected: &str,
    policy: &ConfidencePolicy,
) -> MatchVerdict {
    let symbol = prediction.symbol.as_str();
    let confidence = prediction.confidence;

    if symbol == expected && policy.accepts(symbol, confidence) {
        return MatchVerdict::perfect();
    }
    // Substitution floors are per-mapping and may sit below the general
    // threshold, so this check comes before any generic confidence gate.
    if confusion::accepts_substitution(symbol, expected, confidence) {
        return MatchVerdict::substitute();
    }
    // A confidently recognized digit that is not the expected one is a
    // definite wrong digit, never a silent retry.
    if is_digit_symbol(symbol) && symbol != expected && policy.accepts(symbol, confidence) {
        return MatchVerdict::wrong_symbol();
    }
    MatchVerdict::unreadable()
}

/// Mode C: strict single-case matching with the visually-similar exception
/// list for lowercase practice.
fn evaluate_strict(
    prediction: &Prediction,
    expected: &str,
    case: CaseMode,
    policy: &ConfidencePolicy,
) -> MatchVerdict {
    if prediction.is_blank() || !policy.accepts(&prediction.symbol, prediction.confidence) {
        return MatchVerdict::unreadable();
    }
    let symbol = prediction.symbol.as_str();
    if !symbol.eq_ignore_ascii_case(expected) {
        return MatchVerdict::wrong_symbol();
    }
    if symbol == expected {
        return MatchVerdict::perfect();
    }
    // Right letter, wrong case from here on.
    if case == CaseMode::Small && CASE_AMBIGUOUS_LETTERS.contains(&expected.to_lowercase().as_str())
    {
        return MatchVerdict::substitute();
    }
    MatchVerdict::wrong_case(case)
}

fn is_digit_symbol(symbol: &str) -> bool {
    symbol.len() == 1 && symbol.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Feedback;

    fn prediction(symbol: &str, confidence: f32) -> Prediction {
        Prediction::new(symbol, confidence, vec![])
    }

    fn policy() -> ConfidencePolicy {
        ConfidencePolicy::new()
    }

    #[test]
    fn loose_mode_is_case_symmetric() {
        let a_upper = evaluate(&prediction("a", 0.9), "A", MatchMode::Loose, &policy());
        let a_lower = evaluate(&prediction("A", 0.9), "a", MatchMode::Loose, &policy());
        assert!(a_upper.is_correct);
        assert!(a_lower.is_correct);
        assert_eq!(a_upper.is_correct, a_lower.is_correct);
    }

    #[test]
    fn loose_mode_exact_hit() {
        let v = evaluate(&prediction("X", 0.92), "X", MatchMode::Loose, &policy());
        assert!(v.is_correct);
        assert!(v.is_exact);
        assert_eq!(v.feedback, Feedback::Perfect);
    }

    #[test]
    fn loose_mode_rejects_low_confidence() {
        let v = evaluate(&prediction("X", 0.2), "X", MatchMode::Loose, &policy());
        assert!(!v.is_correct);
        assert_eq!(v.feedback, Feedback::Unreadable);
    }

    #[test]
    fn numeric_exact_digit_needs_the_general_threshold() {
        let accepted = evaluate(&prediction("3", 0.5), "3", MatchMode::Numeric, &policy());
        assert!(accepted.is_correct);
        assert_eq!(accepted.feedback, Feedback::Perfect);

        let hesitant = evaluate(&prediction("3", 0.4), "3", MatchMode::Numeric, &policy());
        assert!(!hesitant.is_correct);
        assert_eq!(hesitant.feedback, Feedback::Unreadable);
    }

    #[test]
    fn numeric_substitution_enforces_the_per_mapping_floor() {
        let below = evaluate(&prediction("B", 0.4), "3", MatchMode::Numeric, &policy());
        assert!(!below.is_correct);

        let at_floor = evaluate(&prediction("B", 0.5), "3", MatchMode::Numeric, &policy());
        assert!(at_floor.is_correct);
        assert_eq!(at_floor.feedback, Feedback::SubstituteAccepted);
        assert!(!at_floor.is_exact);
    }

    #[test]
    fn numeric_t_for_seven_accepted_at_low_confidence() {
        // The t->7 floor (0.3) sits below the general threshold on purpose.
        let v = evaluate(&prediction("t", 0.35), "7", MatchMode::Numeric, &policy());
        assert!(v.is_correct);
        assert_eq!(v.feedback, Feedback::SubstituteAccepted);
    }

    #[test]
    fn numeric_wrong_digit_is_definite() {
        let v = evaluate(&prediction("8", 0.9), "3", MatchMode::Numeric, &policy());
        assert!(!v.is_correct);
        assert_eq!(v.feedback, Feedback::WrongSymbol);
    }

    #[test]
    fn numeric_blank_prediction_reads_as_unreadable_not_wrong_digit() {
        let v = evaluate(&Prediction::blank(62), "5", MatchMode::Numeric, &policy());
        assert!(!v.is_correct);
        assert_eq!(v.feedback, Feedback::Unreadable);
    }

    #[test]
    fn strict_small_accepts_ambiguous_case_for_o() {
        let v = evaluate(
            &prediction("O", 0.9),
            "o",
            MatchMode::Strict(CaseMode::Small),
            &policy(),
        );
        assert!(v.allow_advance);
        assert!(!v.is_exact);
        assert_eq!(v.feedback, Feedback::SubstituteAccepted);
    }

    #[test]
    fn strict_small_flags_wrong_case_for_non_exempt_letter() {
        let v = evaluate(
            &prediction("A", 0.9),
            "a",
            MatchMode::Strict(CaseMode::Small),
            &policy(),
        );
        assert!(v.is_wrong_case);
        assert!(!v.allow_advance);
        assert_eq!(
            v.feedback,
            Feedback::WrongCase {
                wanted: CaseMode::Small
            }
        );
    }

    #[test]
    fn strict_capital_never_uses_the_exception_list() {
        let v = evaluate(
            &prediction("o", 0.9),
            "O",
            MatchMode::Strict(CaseMode::Capital),
            &policy(),
        );
        assert!(v.is_wrong_case);
        assert!(!v.allow_advance);
    }

    #[test]
    fn strict_exact_case_match_advances() {
        let v = evaluate(
            &prediction("G", 0.8),
            "G",
            MatchMode::Strict(CaseMode::Capital),
            &policy(),
        );
        assert!(v.is_correct);
        assert!(v.is_exact);
        assert!(v.allow_advance);
    }

    #[test]
    fn strict_wrong_letter_is_a_symbol_mismatch_not_a_case_issue() {
        let v = evaluate(
            &prediction("Q", 0.9),
            "G",
            MatchMode::Strict(CaseMode::Capital),
            &policy(),
        );
        assert!(!v.is_wrong_case);
        assert_eq!(v.feedback, Feedback::WrongSymbol);
    }

    #[test]
    fn strict_low_confidence_with_correct_case_asks_for_clarity() {
        let v = evaluate(
            &prediction("G", 0.2),
            "G",
            MatchMode::Strict(CaseMode::Capital),
            &policy(),
        );
        assert!(!v.is_correct);
        assert_eq!(v.feedback, Feedback::Unreadable);
    }

    #[test]
    fn empty_prediction_is_never_correct_in_any_mode() {
        let blank = Prediction::blank(62);
        for mode in [
            MatchMode::Loose,
            MatchMode::Numeric,
            MatchMode::Strict(CaseMode::Capital),
            MatchMode::Strict(CaseMode::Small),
        ] {
            let v = evaluate(&blank, "A", mode, &policy());
            assert!(!v.is_correct, "mode {mode:?}");
        }
    }
}
