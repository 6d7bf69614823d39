//! Correctness and misconception detection for learner answers.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::task::answer::{
    self, canonical_text, multiset_equal, numeric_tokens, parse_number, MatchKind, Tolerances,
    EQUATION_TOLERANCE, NUMERIC_TOLERANCE,
};
use crate::task::TaskDefinition;

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_correct: bool,
    /// Confidence in the verdict, in `[0, 1]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_misconception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ValidationResult {
    fn correct(confidence: f64) -> Self {
        Self {
            is_correct: true,
            confidence,
            detected_misconception: None,
            feedback: None,
        }
    }

    fn incorrect(confidence: f64) -> Self {
        Self {
            is_correct: false,
            confidence,
            detected_misconception: None,
            feedback: None,
        }
    }
}

/// Tolerances and confidence levels used by [`AnswerValidator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Absolute tolerance for single numeric answers.
    pub numeric_tolerance: f64,
    /// Absolute tolerance for each member of a solution set.
    pub equation_tolerance: f64,
    /// Confidence for exact and numeric matches.
    pub exact_confidence: f64,
    /// Confidence for formula and unordered-set matches.
    pub formula_confidence: f64,
    /// Confidence when a wrong answer matches a known misconception.
    pub misconception_confidence: f64,
    /// Confidence for any other wrong answer.
    pub incorrect_confidence: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            numeric_tolerance: NUMERIC_TOLERANCE,
            equation_tolerance: EQUATION_TOLERANCE,
            exact_confidence: 0.95,
            formula_confidence: 0.9,
            misconception_confidence: 0.8,
            incorrect_confidence: 0.3,
        }
    }
}

impl ValidatorConfig {
    fn tolerances(&self) -> Tolerances {
        Tolerances {
            numeric: self.numeric_tolerance,
            set: self.equation_tolerance,
        }
    }
}

/// Checks learner answers against generated tasks.
///
/// All methods are total: input that does not parse as a number is
/// treated as text, never as an error.
#[derive(Debug, Clone, Default)]
pub struct AnswerValidator {
    config: ValidatorConfig,
}

impl AnswerValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates an answer against the task's canonical answer, then
    /// against its misconception map.
    ///
    /// Matching precedence is exact text, numeric value, whitespace-free
    /// formula and, for set-valued tasks, the multiset of numbers.
    pub fn validate_answer(&self, user_answer: &str, task: &TaskDefinition) -> ValidationResult {
        let tolerances = self.config.tolerances();

        if let Some(kind) = answer::match_expected(
            user_answer,
            &task.expected_answer,
            task.answer_kind,
            tolerances,
        ) {
            trace!(task_id = %task.id, match_kind = ?kind, "answer accepted");
            let confidence = match kind {
                MatchKind::Exact | MatchKind::Numeric => self.config.exact_confidence,
                MatchKind::Formula | MatchKind::UnorderedSet => self.config.formula_confidence,
            };
            return ValidationResult::correct(confidence);
        }

        for (wrong_answer, misconception) in &task.misconception_map {
            if answer::matches_candidate(user_answer, wrong_answer, task.answer_kind, tolerances) {
                trace!(
                    task_id = %task.id,
                    misconception = %misconception.kind,
                    "answer matches known misconception"
                );
                return ValidationResult {
                    is_correct: false,
                    confidence: self.config.misconception_confidence,
                    detected_misconception: Some(misconception.kind.clone()),
                    feedback: Some(misconception.feedback.clone()),
                };
            }
        }

        trace!(task_id = %task.id, "answer rejected");
        ValidationResult::incorrect(self.config.incorrect_confidence)
    }

    /// Compares a numeric answer against an expected value. Uses the
    /// configured numeric tolerance when `tolerance` is `None`.
    pub fn validate_numeric_answer(
        &self,
        user_answer: &str,
        expected: f64,
        tolerance: Option<f64>,
    ) -> bool {
        let tolerance = tolerance.unwrap_or(self.config.numeric_tolerance);
        match parse_number(user_answer) {
            Some(value) => (value - expected).abs() < tolerance,
            None => false,
        }
    }

    /// Compares two formulas ignoring whitespace and letter case.
    pub fn validate_formula_answer(&self, user_answer: &str, expected: &str) -> bool {
        canonical_text(user_answer) == canonical_text(expected)
    }

    /// Compares a list of solutions such as `"x1 = 2 lub x2 = -3"` with the
    /// expected values, ignoring order.
    ///
    /// Each expected entry must be a single number; an entry that does not
    /// parse makes the comparison fail.
    pub fn validate_equation_answer<S: AsRef<str>>(&self, user_answer: &str, expected: &[S]) -> bool {
        let user_values = numeric_tokens(user_answer);
        let Some(expected_values) = expected
            .iter()
            .map(|value| parse_number(value.as_ref()))
            .collect::<Option<Vec<f64>>>()
        else {
            trace!("expected solution list holds a non-numeric entry");
            return false;
        };
        trace!(
            user = ?user_values,
            expected = ?expected_values,
            "comparing solution sets"
        );
        multiset_equal(&user_values, &expected_values, self.config.equation_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{AnswerKind, Department, Misconception, MisconceptionMap};

    fn task(expected: &str, kind: AnswerKind, map: &[(&str, &str)]) -> TaskDefinition {
        let misconception_map: MisconceptionMap = map
            .iter()
            .map(|(answer, kind)| {
                (
                    answer.to_string(),
                    Misconception::new(*kind, format!("feedback for {}", kind)),
                )
            })
            .collect();
        TaskDefinition {
            id: "test".to_string(),
            department: Department::Algebra,
            skill_name: "Test".to_string(),
            micro_skill: "test".to_string(),
            difficulty: 3.0,
            latex: "$x$".to_string(),
            expected_answer: expected.to_string(),
            misconception_map,
            answer_kind: kind,
        }
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let validator = AnswerValidator::default();
        let t = task("log10(6)", AnswerKind::Symbolic, &[]);
        let result = validator.validate_answer("  LOG10(6) ", &t);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn test_numeric_equivalence() {
        let validator = AnswerValidator::default();
        let t = task("0.5", AnswerKind::Single, &[]);
        let result = validator.validate_answer("1/2", &t);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 0.95);

        let t = task("5/6", AnswerKind::Single, &[]);
        assert!(validator.validate_answer("10/12", &t).is_correct);
    }

    #[test]
    fn test_formula_equivalence() {
        let validator = AnswerValidator::default();
        let t = task("3(x+4)", AnswerKind::Symbolic, &[]);
        let result = validator.validate_answer("3 ( x + 4 )", &t);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_unordered_set_match() {
        let validator = AnswerValidator::default();
        let t = task("2, 3", AnswerKind::UnorderedSet, &[]);
        let result = validator.validate_answer("x1 = 3 lub x2 = 2", &t);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_ordered_tuple_is_not_reordered() {
        let validator = AnswerValidator::default();
        let t = task("2, 3", AnswerKind::OrderedTuple, &[("3, 2", "swapped_coordinates")]);
        let result = validator.validate_answer("3, 2", &t);
        assert!(!result.is_correct);
        assert_eq!(
            result.detected_misconception.as_deref(),
            Some("swapped_coordinates")
        );
    }

    #[test]
    fn test_misconception_detected_numerically() {
        let validator = AnswerValidator::default();
        let t = task(
            "10",
            AnswerKind::Single,
            &[("30", "forgot_to_divide_by_coefficient")],
        );
        let result = validator.validate_answer("30.0", &t);
        assert!(!result.is_correct);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(
            result.detected_misconception.as_deref(),
            Some("forgot_to_divide_by_coefficient")
        );
        assert_eq!(
            result.feedback.as_deref(),
            Some("feedback for forgot_to_divide_by_coefficient")
        );
    }

    #[test]
    fn test_unknown_wrong_answer() {
        let validator = AnswerValidator::default();
        let t = task("10", AnswerKind::Single, &[("30", "x")]);
        let result = validator.validate_answer("11", &t);
        assert!(!result.is_correct);
        assert_eq!(result.confidence, 0.3);
        assert!(result.detected_misconception.is_none());
        assert!(result.feedback.is_none());
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let validator = AnswerValidator::default();
        let t = task("1/2", AnswerKind::Single, &[]);
        for input in ["", "   ", "1/0", "abc", "--1", "1//2", "NaN", "inf", "ąę"] {
            let result = validator.validate_answer(input, &t);
            assert!(!result.is_correct, "input {:?}", input);
        }
    }

    #[test]
    fn test_numeric_tolerance_is_strict() {
        let validator = AnswerValidator::default();
        assert!(validator.validate_numeric_answer("1.0000000001", 1.0, None));
        assert!(!validator.validate_numeric_answer("1.01", 1.0, None));
        assert!(validator.validate_numeric_answer("1.01", 1.0, Some(0.1)));
        assert!(!validator.validate_numeric_answer("1.5", 1.0, Some(0.5)));
        assert!(!validator.validate_numeric_answer("jeden", 1.0, None));
    }

    #[test]
    fn test_numeric_tolerance_cases() {
        let validator = AnswerValidator::default();
        assert!(validator.validate_numeric_answer("3", 3.0, None));
        assert!(!validator.validate_numeric_answer("3.1", 3.0, Some(1e-9)));
        // 1e-10 and 1e-11 both fall inside the default 1e-9 window.
        assert!(validator.validate_numeric_answer("3.0000000001", 3.0, None));
        assert!(validator.validate_numeric_answer("3.00000000001", 3.0, None));
    }

    #[test]
    fn test_formula_answer() {
        let validator = AnswerValidator::default();
        assert!(validator.validate_formula_answer("X^2 + 2x", "x^2+2x"));
        assert!(!validator.validate_formula_answer("x^2+2x", "2x+x^2"));
    }

    #[test]
    fn test_equation_answer() {
        let validator = AnswerValidator::default();
        assert!(validator.validate_equation_answer("x = 2 or x = -3", &["-3", "2"]));
        assert!(validator.validate_equation_answer("x_1 = -3; x_2 = 2", &["2", "-3"]));
        assert!(validator.validate_equation_answer("1/2, 4", &["0.5", "4"]));
        assert!(!validator.validate_equation_answer("2", &["2", "-3"]));
        assert!(!validator.validate_equation_answer("2, -3, 5", &["2", "-3"]));
        assert!(!validator.validate_equation_answer("2, 3", &["2", "-3"]));
    }

    #[test]
    fn test_equation_answer_rejects_malformed_expected_entries() {
        let validator = AnswerValidator::default();
        assert!(!validator.validate_equation_answer("2", &["2", "abc"]));
        assert!(!validator.validate_equation_answer("1 2", &["1, 2"]));
        assert!(!validator.validate_equation_answer("0", &["1/0"]));
        assert!(validator.validate_equation_answer("1 2", &["1", "2"]));
    }

    #[test]
    fn test_custom_confidences() {
        let validator = AnswerValidator::new(ValidatorConfig {
            exact_confidence: 1.0,
            ..ValidatorConfig::default()
        });
        let t = task("7", AnswerKind::Single, &[]);
        assert_eq!(validator.validate_answer("7", &t).confidence, 1.0);
    }

    #[test]
    fn test_result_serialization_skips_empty_fields() {
        let json = serde_json::to_string(&ValidationResult::correct(0.95)).expect("serialize");
        assert_eq!(json, r#"{"isCorrect":true,"confidence":0.95}"#);
    }
}
