//! Answer validation for generated exercises.
//!
//! This module decides whether a learner's free-text answer matches a
//! task's canonical answer and, when it does not, which cataloged
//! misconception the answer reveals.

pub mod answer_validator;
pub mod normalize;

pub use answer_validator::{AnswerValidator, ValidationResult, ValidatorConfig};
pub use normalize::{are_answers_equivalent, normalize_answer, NormalizedAnswer};
