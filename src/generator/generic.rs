//! Basic arithmetic used when a requested department is not recognized.

use super::{Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator};
use crate::difficulty::DifficultyBand;
use crate::random::{pick, RandomSource};
use crate::task::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericSkill {
    BasicArithmetic,
}

impl MicroSkill for GenericSkill {
    fn all() -> &'static [Self] {
        &[GenericSkill::BasicArithmetic]
    }

    fn as_str(&self) -> &'static str {
        match self {
            GenericSkill::BasicArithmetic => "basic_arithmetic",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            GenericSkill::BasicArithmetic => "Działania arytmetyczne",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

const EASY_OPERATIONS: &[Operation] = &[Operation::Add, Operation::Subtract];
const MEDIUM_OPERATIONS: &[Operation] = &[Operation::Add, Operation::Subtract, Operation::Multiply];
const HARD_OPERATIONS: &[Operation] = &[
    Operation::Add,
    Operation::Subtract,
    Operation::Multiply,
    Operation::Divide,
];

/// Arithmetic exercises whose operand size and operators grow with the
/// difficulty band. Tasks are filed under [`Department::RealNumbers`].
#[derive(Debug, Clone, Default)]
pub struct GenericTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl GenericTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for GenericTaskGenerator {
    type Skill = GenericSkill;

    fn department(&self) -> Department {
        Department::RealNumbers
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::Uniform
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: GenericSkill,
        difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            GenericSkill::BasicArithmetic => Ok(basic_arithmetic(difficulty, rng)),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        &["added_instead_of_multiplied"]
    }

    fn drill(&self, misconception: &str) -> Option<Drill<GenericSkill>> {
        match misconception {
            "added_instead_of_multiplied" => Some(Drill {
                skill: GenericSkill::BasicArithmetic,
                difficulty: 4.0,
                exercise: Exercise::new("Oblicz: $6 \\cdot 7$", "42").distractor(
                    "13",
                    "added_instead_of_multiplied",
                    "Znak kropki oznacza mnożenie.",
                ),
            }),
            _ => None,
        }
    }
}

fn basic_arithmetic(difficulty: f64, rng: &mut dyn RandomSource) -> Exercise {
    let (operations, min, max) = match DifficultyBand::from_level(difficulty) {
        DifficultyBand::Easy => (EASY_OPERATIONS, 1, 20),
        DifficultyBand::Medium => (MEDIUM_OPERATIONS, 10, 100),
        DifficultyBand::Hard => (HARD_OPERATIONS, 20, 500),
    };
    let operation = pick(rng, operations).copied().unwrap_or(Operation::Add);

    match operation {
        Operation::Add => {
            let a = rng.next_int(min, max);
            let b = rng.next_int(min, max);
            Exercise::new(format!("Oblicz: ${} + {}$", a, b), (a + b).to_string()).distractor(
                (a - b).to_string(),
                "subtracted_instead_of_added",
                "Znak plus oznacza dodawanie.",
            )
        }
        Operation::Subtract => {
            let x = rng.next_int(min, max);
            let y = rng.next_int(min, max);
            let (a, b) = (x.max(y), x.min(y));
            Exercise::new(format!("Oblicz: ${} - {}$", a, b), (a - b).to_string()).distractor(
                (b - a).to_string(),
                "reversed_subtraction_order",
                "Od pierwszej liczby odejmujemy drugą, a nie odwrotnie.",
            )
        }
        Operation::Multiply => {
            let a = rng.next_int(min, max);
            let b = rng.next_int(2, 12);
            Exercise::new(format!("Oblicz: ${} \\cdot {}$", a, b), (a * b).to_string())
                .distractor(
                    (a + b).to_string(),
                    "added_instead_of_multiplied",
                    "Znak kropki oznacza mnożenie.",
                )
        }
        Operation::Divide => {
            let divisor = rng.next_int(2, 12);
            let quotient = rng.next_int(2, max / 10);
            let dividend = divisor * quotient;
            Exercise::new(
                format!("Oblicz: ${} \\div {}$", dividend, divisor),
                quotient.to_string(),
            )
            .distractor(
                (dividend * divisor).to_string(),
                "multiplied_instead_of_divided",
                "Znak dwukropka oznacza dzielenie.",
            )
        }
    }
}
