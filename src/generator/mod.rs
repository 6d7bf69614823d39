//! Procedural exercise generation.
//!
//! Each subject department has its own generator with a closed set of
//! micro-skills. A generation call goes through three stages:
//!
//! 1. **Skill selection** - the requested micro-skill, or one picked by the
//!    department's [`SelectionPolicy`]
//! 2. **Parameter sampling** - every value that affects the answer is drawn
//!    from the caller's [`RandomSource`]
//! 3. **Assembly** - the closed-form answer, the Polish statement and the
//!    misconception distractors are stamped into a [`TaskDefinition`]
//!
//! # Example
//!
//! ```ignore
//! use math_forge::generator::{AlgebraTaskGenerator, TaskGenerator};
//! use math_forge::random::SeededRandom;
//!
//! let generator = AlgebraTaskGenerator::new();
//! let mut rng = SeededRandom::new("seed1");
//! let task = generator.generate_task(3.0, Some("linear_equations"), &mut rng)?;
//! assert_eq!(task.expected_answer, "10");
//! ```

pub mod algebra;
pub mod calculus;
pub mod engine;
pub mod expressions;
pub mod functions;
pub mod generic;
pub mod geometry;
pub mod math;
pub mod real_numbers;
pub mod sequences;
pub mod statistics;
pub mod trigonometry;

pub use algebra::AlgebraTaskGenerator;
pub use calculus::CalculusTaskGenerator;
pub use engine::TaskEngine;
pub use expressions::ExpressionsTaskGenerator;
pub use functions::FunctionsTaskGenerator;
pub use generic::GenericTaskGenerator;
pub use geometry::GeometryTaskGenerator;
pub use real_numbers::RealNumbersTaskGenerator;
pub use sequences::SequencesTaskGenerator;
pub use statistics::StatisticsTaskGenerator;
pub use trigonometry::TrigonometryTaskGenerator;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{GeneratorError, SelectorKind};
use crate::random::{RandomSource, SeededRandom};
use crate::task::answer::{self, Tolerances};
use crate::task::{
    clamp_difficulty, AnswerKind, Department, Misconception, MisconceptionMap, TaskDefinition,
};

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Namespace for task ids (UUID v5).
const TASK_NAMESPACE: Uuid = Uuid::from_u128(0x8d3f_54a2_1c6e_4b7f_9a20_6e1d_c0b5_7f31);

/// A micro-skill of one department.
pub trait MicroSkill: Copy + Eq + std::fmt::Debug + 'static {
    /// Every micro-skill of the department. The first one is the base skill.
    fn all() -> &'static [Self];

    /// Machine tag, e.g. `linear_equations`.
    fn as_str(&self) -> &'static str;

    /// Polish label shown to learners.
    fn skill_name(&self) -> &'static str;

    /// Inclusive difficulty range the skill is meant for.
    fn difficulty_range(&self) -> (f64, f64) {
        (1.0, 10.0)
    }

    fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::all().iter().copied().find(|s| s.as_str() == tag)
    }
}

/// How a department picks a micro-skill when the caller names none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Uniformly among all micro-skills.
    Uniform,
    /// Uniformly among micro-skills whose range contains the difficulty.
    DifficultyRange,
}

/// What to do with a micro-skill or misconception name a department does
/// not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorPolicy {
    /// Return [`GeneratorError::UnsupportedSelector`].
    #[default]
    Strict,
    /// Log a warning and generate a default task instead.
    Fallback,
}

impl std::str::FromStr for SelectorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(SelectorPolicy::Strict),
            "fallback" => Ok(SelectorPolicy::Fallback),
            other => Err(format!("expected 'strict' or 'fallback', got '{}'", other)),
        }
    }
}

/// Parameters for [`TaskGenerator::generate_task_with_seed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub difficulty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micro_skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_misconception: Option<String>,
}

impl GenerationParams {
    pub fn new(difficulty: f64) -> Self {
        Self {
            difficulty,
            micro_skill: None,
            target_misconception: None,
        }
    }

    pub fn with_micro_skill(mut self, micro_skill: impl Into<String>) -> Self {
        self.micro_skill = Some(micro_skill.into());
        self
    }

    pub fn with_target_misconception(mut self, misconception: impl Into<String>) -> Self {
        self.target_misconception = Some(misconception.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Distractor {
    answer: String,
    kind: &'static str,
    feedback: String,
}

/// A solved exercise before it is stamped with identity and metadata.
#[derive(Debug, Clone)]
pub struct Exercise {
    latex: String,
    expected: String,
    kind: AnswerKind,
    distractors: Vec<Distractor>,
}

impl Exercise {
    pub fn new(latex: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            latex: latex.into(),
            expected: expected.into(),
            kind: AnswerKind::Single,
            distractors: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: AnswerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds a wrong answer produced by the named mistake.
    pub fn distractor(
        mut self,
        answer: impl Into<String>,
        kind: &'static str,
        feedback: impl Into<String>,
    ) -> Self {
        self.distractors.push(Distractor {
            answer: answer.into(),
            kind,
            feedback: feedback.into(),
        });
        self
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Builds the final task. Distractors the validator could not tell apart
    /// from the expected answer, or from an earlier distractor, are dropped.
    pub fn finish<S: MicroSkill>(
        self,
        department: Department,
        skill: S,
        difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> TaskDefinition {
        let tolerances = Tolerances::default();
        let mut misconception_map = MisconceptionMap::new();

        for distractor in self.distractors {
            let collides_with_expected =
                answer::match_expected(&distractor.answer, &self.expected, self.kind, tolerances)
                    .is_some();
            let collides_with_other = misconception_map.keys().any(|existing| {
                answer::matches_candidate(&distractor.answer, existing, self.kind, tolerances)
            });
            if collides_with_expected || collides_with_other {
                debug!(
                    micro_skill = skill.as_str(),
                    answer = %distractor.answer,
                    misconception = distractor.kind,
                    "dropping indistinguishable distractor"
                );
                continue;
            }
            misconception_map.insert(
                distractor.answer,
                Misconception::new(distractor.kind, distractor.feedback),
            );
        }

        let nonce = rng.next_int(0, i64::from(i32::MAX));
        let name = format!(
            "{}:{}:{}:{}:{}",
            department,
            skill.as_str(),
            self.latex,
            self.expected,
            nonce
        );
        let id = Uuid::new_v5(&TASK_NAMESPACE, name.as_bytes()).to_string();

        debug!(
            department = %department,
            micro_skill = skill.as_str(),
            difficulty,
            distractors = misconception_map.len(),
            "generated task"
        );

        TaskDefinition {
            id,
            department,
            skill_name: skill.skill_name().to_string(),
            micro_skill: skill.as_str().to_string(),
            difficulty,
            latex: self.latex,
            expected_answer: self.expected,
            misconception_map,
            answer_kind: self.kind,
        }
    }
}

/// A hand-authored exercise that reliably exhibits one misconception.
#[derive(Debug, Clone)]
pub struct Drill<S> {
    pub skill: S,
    pub difficulty: f64,
    pub exercise: Exercise,
}

/// Picks a micro-skill according to the department's policy.
pub fn select_skill<S: MicroSkill>(
    policy: SelectionPolicy,
    difficulty: f64,
    rng: &mut dyn RandomSource,
) -> S {
    let all = S::all();
    let candidates: Vec<S> = match policy {
        SelectionPolicy::Uniform => all.to_vec(),
        SelectionPolicy::DifficultyRange => {
            let level = clamp_difficulty(difficulty).min(9.0);
            let within = |slack: f64| -> Vec<S> {
                all.iter()
                    .copied()
                    .filter(|s| {
                        let (min, max) = s.difficulty_range();
                        min - slack <= level && level <= max + slack
                    })
                    .collect()
            };
            let exact = within(0.0);
            if !exact.is_empty() {
                exact
            } else {
                let widened = within(1.0);
                if widened.is_empty() {
                    all.to_vec()
                } else {
                    widened
                }
            }
        }
    };
    candidates[rng.next_index(candidates.len())]
}

/// Reduced fraction, or [`GeneratorError::InvalidParameter`] for a zero
/// denominator.
pub(crate) fn fraction(num: i64, den: i64) -> Result<math::Fraction> {
    math::Fraction::new(num, den).ok_or_else(|| {
        GeneratorError::InvalidParameter(format!("zero denominator in {}/{}", num, den))
    })
}

/// Draws a magnitude in `[1, max]` and then a sign.
pub(crate) fn nonzero(rng: &mut dyn RandomSource, max: i64) -> i64 {
    let magnitude = rng.next_int(1, max);
    if rng.next_int(0, 1) == 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Common contract of the department generators.
pub trait TaskGenerator {
    type Skill: MicroSkill;

    fn department(&self) -> Department;

    fn selection_policy(&self) -> SelectionPolicy;

    fn selector_policy(&self) -> SelectorPolicy;

    /// Samples parameters and solves one exercise of the given skill.
    fn build(
        &self,
        skill: Self::Skill,
        difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise>;

    /// Names of the misconceptions that have hand-authored drills.
    fn misconceptions(&self) -> &'static [&'static str];

    /// Returns the hand-authored drill for a misconception, if any.
    fn drill(&self, misconception: &str) -> Option<Drill<Self::Skill>>;

    fn micro_skills(&self) -> Vec<&'static str> {
        Self::Skill::all().iter().map(|s| s.as_str()).collect()
    }

    /// Generates one exercise. An unknown `micro_skill` is an
    /// [`GeneratorError::UnsupportedSelector`] under [`SelectorPolicy::Strict`].
    fn generate_task(
        &self,
        difficulty: f64,
        micro_skill: Option<&str>,
        rng: &mut dyn RandomSource,
    ) -> Result<TaskDefinition> {
        let difficulty = clamp_difficulty(difficulty);
        let skill: Self::Skill = match micro_skill {
            None => select_skill(self.selection_policy(), difficulty, rng),
            Some(tag) => match Self::Skill::parse(tag) {
                Some(skill) => skill,
                None if self.selector_policy() == SelectorPolicy::Fallback => {
                    warn!(
                        department = %self.department(),
                        micro_skill = tag,
                        "unknown micro-skill, selecting automatically"
                    );
                    select_skill(self.selection_policy(), difficulty, rng)
                }
                None => {
                    return Err(GeneratorError::unsupported(
                        self.department().as_str(),
                        SelectorKind::MicroSkill,
                        tag,
                    ))
                }
            },
        };

        let exercise = self.build(skill, difficulty, rng)?;
        Ok(exercise.finish(self.department(), skill, difficulty, rng))
    }

    /// Generates the hand-authored drill for a misconception.
    fn generate_misconception_task(
        &self,
        misconception: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<TaskDefinition> {
        if let Some(drill) = self.drill(misconception.trim()) {
            return Ok(drill
                .exercise
                .finish(self.department(), drill.skill, drill.difficulty, rng));
        }

        if self.selector_policy() == SelectorPolicy::Strict {
            return Err(GeneratorError::unsupported(
                self.department().as_str(),
                SelectorKind::Misconception,
                misconception,
            ));
        }

        let base = Self::Skill::all()[0];
        let difficulty = base.difficulty_range().0;
        warn!(
            department = %self.department(),
            misconception,
            fallback = base.as_str(),
            "unknown misconception, generating base skill task"
        );
        let exercise = self.build(base, difficulty, rng)?;
        Ok(exercise.finish(self.department(), base, difficulty, rng))
    }

    /// One level above `current_level`, capped at 10.
    fn generate_progressive_task(
        &self,
        current_level: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<TaskDefinition> {
        self.generate_task((current_level + 1.0).min(10.0), None, rng)
    }

    /// Reproducible generation from a string seed.
    fn generate_task_with_seed(
        &self,
        seed: &str,
        params: &GenerationParams,
    ) -> Result<TaskDefinition> {
        let mut rng = SeededRandom::new(seed);
        match params.target_misconception.as_deref() {
            Some(misconception) => self.generate_misconception_task(misconception, &mut rng),
            None => self.generate_task(params.difficulty, params.micro_skill.as_deref(), &mut rng),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Toy {
        Easy,
        Hard,
    }

    impl MicroSkill for Toy {
        fn all() -> &'static [Self] {
            &[Toy::Easy, Toy::Hard]
        }

        fn as_str(&self) -> &'static str {
            match self {
                Toy::Easy => "easy",
                Toy::Hard => "hard",
            }
        }

        fn skill_name(&self) -> &'static str {
            "Zabawka"
        }

        fn difficulty_range(&self) -> (f64, f64) {
            match self {
                Toy::Easy => (1.0, 3.0),
                Toy::Hard => (7.0, 8.0),
            }
        }
    }

    #[test]
    fn test_difficulty_range_selection() {
        let mut rng = SeededRandom::new("policy");
        for _ in 0..20 {
            let skill: Toy = select_skill(SelectionPolicy::DifficultyRange, 2.0, &mut rng);
            assert_eq!(skill, Toy::Easy);
            let skill: Toy = select_skill(SelectionPolicy::DifficultyRange, 10.0, &mut rng);
            assert_eq!(skill, Toy::Hard, "10 clamps to 9, widened to the 7-8 range");
        }
    }

    #[test]
    fn test_difficulty_range_falls_back_to_all() {
        let mut rng = SeededRandom::new("gap");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let skill: Toy = select_skill(SelectionPolicy::DifficultyRange, 5.0, &mut rng);
            seen.insert(skill.as_str());
        }
        assert_eq!(seen.len(), 2, "level 5 matches nothing, so both skills qualify");
    }

    #[test]
    fn test_parse_micro_skill() {
        assert_eq!(Toy::parse(" hard "), Some(Toy::Hard));
        assert_eq!(Toy::parse("medium"), None);
    }

    #[test]
    fn test_finish_drops_colliding_distractors() {
        let mut rng = SeededRandom::new("finish");
        let task = Exercise::new("2 + 2", "4")
            .distractor("4.0", "same_as_answer", "x")
            .distractor("22", "concatenated_digits", "x")
            .distractor("22.0", "duplicate", "x")
            .distractor("0", "subtracted", "x")
            .finish(Department::RealNumbers, Toy::Easy, 1.0, &mut rng);

        assert_eq!(task.misconception_map.len(), 2);
        assert!(task.covers_misconception("concatenated_digits"));
        assert!(task.covers_misconception("subtracted"));
        assert!(!task.covers_misconception("duplicate"));
    }

    #[test]
    fn test_finish_id_is_reproducible() {
        let build = || {
            let mut rng = SeededRandom::new("id");
            Exercise::new("1 + 1", "2").finish(Department::RealNumbers, Toy::Easy, 1.0, &mut rng)
        };
        assert_eq!(build().id, build().id);
    }

    #[test]
    fn test_selector_policy_from_str() {
        assert_eq!("Fallback".parse::<SelectorPolicy>(), Ok(SelectorPolicy::Fallback));
        assert!("lenient".parse::<SelectorPolicy>().is_err());
    }
}
