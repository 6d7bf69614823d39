//! Exercise data model.
//!
//! [`TaskDefinition`] is the immutable record produced by one generator call
//! and consumed by the validator. Its JSON form (camelCase fields) is the
//! boundary to persistence and UI layers.

pub mod answer;
mod department;

pub use department::Department;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named error pattern together with remediation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misconception {
    /// Machine name of the error pattern, e.g. `forgot_to_divide_by_coefficient`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Feedback shown to the learner (Polish).
    pub feedback: String,
}

impl Misconception {
    pub fn new(kind: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            feedback: feedback.into(),
        }
    }
}

/// Wrong answer → misconception it reveals.
pub type MisconceptionMap = BTreeMap<String, Misconception>;

/// Shape of the canonical answer, which decides how answers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// A single number, decimal or fraction.
    #[default]
    Single,
    /// A formula or symbolic expression compared as text.
    Symbolic,
    /// Several numbers whose order does not matter (roots of an equation).
    UnorderedSet,
    /// Several numbers whose order matters (`x, y` of a system).
    OrderedTuple,
}

/// One generated exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub id: String,
    pub department: Department,
    pub skill_name: String,
    pub micro_skill: String,
    pub difficulty: f64,
    pub latex: String,
    pub expected_answer: String,
    #[serde(default)]
    pub misconception_map: MisconceptionMap,
    #[serde(default)]
    pub answer_kind: AnswerKind,
}

impl TaskDefinition {
    /// Returns the misconception cataloged for an exact wrong-answer key.
    pub fn misconception_for(&self, answer: &str) -> Option<&Misconception> {
        self.misconception_map.get(answer)
    }

    /// Returns true if any cataloged wrong answer reveals the given misconception.
    pub fn covers_misconception(&self, kind: &str) -> bool {
        self.misconception_map.values().any(|m| m.kind == kind)
    }
}

/// Clamps a requested difficulty into `[1, 10]`. NaN maps to 1.
pub fn clamp_difficulty(difficulty: f64) -> f64 {
    if difficulty.is_nan() {
        return 1.0;
    }
    difficulty.clamp(1.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> TaskDefinition {
        let mut map = MisconceptionMap::new();
        map.insert(
            "30".to_string(),
            Misconception::new("forgot_to_divide_by_coefficient", "Podziel przez 3."),
        );
        TaskDefinition {
            id: "t-1".to_string(),
            department: Department::Algebra,
            skill_name: "Równania liniowe".to_string(),
            micro_skill: "linear_equations".to_string(),
            difficulty: 3.0,
            latex: "3x + 2 = 32".to_string(),
            expected_answer: "10".to_string(),
            misconception_map: map,
            answer_kind: AnswerKind::Single,
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample_task()).expect("serialize");
        assert_eq!(json["expectedAnswer"], "10");
        assert_eq!(json["microSkill"], "linear_equations");
        assert_eq!(json["department"], "algebra");
        assert_eq!(
            json["misconceptionMap"]["30"]["type"],
            "forgot_to_divide_by_coefficient"
        );
        assert_eq!(json["answerKind"], "single");
    }

    #[test]
    fn test_answer_kind_defaults_when_missing() {
        let json = r#"{
            "id": "x", "department": "geometry", "skillName": "Pole",
            "microSkill": "triangle_area", "difficulty": 4.0,
            "latex": "...", "expectedAnswer": "12"
        }"#;
        let task: TaskDefinition = serde_json::from_str(json).expect("deserialize");
        assert_eq!(task.answer_kind, AnswerKind::Single);
        assert!(task.misconception_map.is_empty());
    }

    #[test]
    fn test_covers_misconception() {
        let task = sample_task();
        assert!(task.covers_misconception("forgot_to_divide_by_coefficient"));
        assert!(!task.covers_misconception("sign_error"));
        assert!(task.misconception_for("30").is_some());
    }

    #[test]
    fn test_clamp_difficulty() {
        assert_eq!(clamp_difficulty(0.0), 1.0);
        assert_eq!(clamp_difficulty(12.5), 10.0);
        assert_eq!(clamp_difficulty(4.5), 4.5);
        assert_eq!(clamp_difficulty(f64::NAN), 1.0);
    }
}
