//! Verdict types produced by the match evaluator.
//!
//! Every rejection path carries a specific [`Feedback`] kind: downstream UI
//! branches on the distinction between a wrong symbol, a wrong case, and an
//! unreadable drawing, so a generic "incorrect" is not enough.

use serde::{Deserialize, Serialize};

/// Matching policy applied to a recognition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Case-insensitive symbol equality; used where case does not matter
    /// pedagogically.
    Loose,
    /// Digit practice: exact digits plus the letter-to-digit confusion table
    /// with per-mapping confidence floors.
    Numeric,
    /// Alphabet practice: exact case required, with a narrow exception list
    /// of letters whose two cases are nearly indistinguishable by stroke.
    Strict(CaseMode),
}

/// Sub-mode for [`MatchMode::Strict`]: which case the learner is practicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseMode {
    /// Uppercase writing practice.
    Capital,
    /// Lowercase writing practice.
    Small,
}

/// The specific feedback carried by a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// The drawing matched the expected symbol exactly.
    Perfect,
    /// A different symbol was accepted in place of the expected one, via the
    /// confusion table or the visually-similar-case exception.
    SubstituteAccepted,
    /// A recognizable but wrong symbol was drawn.
    WrongSymbol,
    /// The right letter in the wrong case; `wanted` is the case the learner
    /// should have written (tells them to write bigger or smaller).
    WrongCase {
        /// The case the current practice mode expects.
        wanted: CaseMode,
    },
    /// Nothing recognizable, or confidence below the acceptance bar; the
    /// learner should write more clearly.
    Unreadable,
}

/// Structured outcome of one recognition attempt.
///
/// Ephemeral: one per attempt, never stored by the engine. A retry is a new
/// attempt, not a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchVerdict {
    /// Whether the attempt counts as correct for scoring.
    pub is_correct: bool,
    /// Whether predicted and expected matched exactly (same symbol, same
    /// case). False for substitute acceptances.
    pub is_exact: bool,
    /// Whether the letter was right but the case wrong (strict mode only).
    pub is_wrong_case: bool,
    /// Whether the caller should advance to the next prompt.
    pub allow_advance: bool,
    /// The specific feedback kind for UI branching.
    pub feedback: Feedback,
}

impl MatchVerdict {
    /// Exact match: correct, advance.
    pub fn perfect() -> Self {
        Self {
            is_correct: true,
            is_exact: true,
            is_wrong_case: false,
            allow_advance: true,
            feedback: Feedback::Perfect,
        }
    }

    /// Accepted substitute: correct and advancing, but not an exact match.
    pub fn substitute() -> Self {
        Self {
            is_correct: true,
            is_exact: false,
            is_wrong_case: false,
            allow_advance: true,
            feedback: Feedback::SubstituteAccepted,
        }
    }

    /// Definite wrong symbol.
    pub fn wrong_symbol() -> Self {
        Self {
            is_correct: false,
            is_exact: false,
            is_wrong_case: false,
            allow_advance: false,
            feedback: Feedback::WrongSymbol,
        }
    }

    /// Right letter, wrong case, not on the exception list.
    pub fn wrong_case(wanted: CaseMode) -> Self {
        Self {
            is_correct: false,
            is_exact: false,
            is_wrong_case: true,
            allow_advance: false,
            feedback: Feedback::WrongCase { wanted },
        }
    }

    /// Low confidence or no recognizable input.
    pub fn unreadable() -> Self {
        Self {
            is_correct: false,
            is_exact: false,
            is_wrong_case: false,
            allow_advance: false,
            feedback: Feedback::Unreadable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_accepting_verdicts_advance() {
        assert!(MatchVerdict::perfect().allow_advance);
        assert!(MatchVerdict::substitute().allow_advance);
        assert!(!MatchVerdict::wrong_symbol().allow_advance);
        assert!(!MatchVerdict::wrong_case(CaseMode::Small).allow_advance);
        assert!(!MatchVerdict::unreadable().allow_advance);
    }

    #[test]
    fn substitute_is_correct_but_not_exact() {
        let v = MatchVerdict::substitute();
        assert!(v.is_correct);
        assert!(!v.is_exact);
    }

    #[test]
    fn wrong_case_carries_the_wanted_case() {
        let v = MatchVerdict::wrong_case(CaseMode::Capital);
        assert!(v.is_wrong_case);
        assert_eq!(
            v.feedback,
            Feedback::WrongCase {
                wanted: CaseMode::Capital
            }
        );
    }
}
