//! Algebraic expressions: simplifying, evaluating, expanding and factoring.

use super::math::{monomial, polynomial, signed};
use super::{
    nonzero, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator,
};
use crate::random::RandomSource;
use crate::task::{AnswerKind, Department};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionsSkill {
    CombiningLikeTerms,
    EvaluateExpression,
    ExpandingBrackets,
    FactoringCommonTerm,
    SquareOfSum,
    DifferenceOfSquares,
}

impl MicroSkill for ExpressionsSkill {
    fn all() -> &'static [Self] {
        &[
            ExpressionsSkill::CombiningLikeTerms,
            ExpressionsSkill::EvaluateExpression,
            ExpressionsSkill::ExpandingBrackets,
            ExpressionsSkill::FactoringCommonTerm,
            ExpressionsSkill::SquareOfSum,
            ExpressionsSkill::DifferenceOfSquares,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            ExpressionsSkill::CombiningLikeTerms => "combining_like_terms",
            ExpressionsSkill::EvaluateExpression => "evaluate_expression",
            ExpressionsSkill::ExpandingBrackets => "expanding_brackets",
            ExpressionsSkill::FactoringCommonTerm => "factoring_common_term",
            ExpressionsSkill::SquareOfSum => "square_of_sum",
            ExpressionsSkill::DifferenceOfSquares => "difference_of_squares",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            ExpressionsSkill::CombiningLikeTerms => "Redukcja wyrazów podobnych",
            ExpressionsSkill::EvaluateExpression => "Obliczanie wartości wyrażenia",
            ExpressionsSkill::ExpandingBrackets => "Mnożenie sumy przez liczbę",
            ExpressionsSkill::FactoringCommonTerm => "Wyłączanie wspólnego czynnika",
            ExpressionsSkill::SquareOfSum => "Kwadrat sumy",
            ExpressionsSkill::DifferenceOfSquares => "Różnica kwadratów",
        }
    }

    fn difficulty_range(&self) -> (f64, f64) {
        match self {
            ExpressionsSkill::CombiningLikeTerms => (1.0, 4.0),
            ExpressionsSkill::EvaluateExpression => (1.0, 5.0),
            ExpressionsSkill::ExpandingBrackets => (2.0, 5.0),
            ExpressionsSkill::FactoringCommonTerm => (3.0, 6.0),
            ExpressionsSkill::SquareOfSum => (4.0, 7.0),
            ExpressionsSkill::DifferenceOfSquares => (5.0, 8.0),
        }
    }
}

const MISCONCEPTIONS: &[&str] = &["forgot_middle_term", "ignored_subtraction_sign"];

/// Exercises on transforming algebraic expressions.
#[derive(Debug, Clone, Default)]
pub struct ExpressionsTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl ExpressionsTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for ExpressionsTaskGenerator {
    type Skill = ExpressionsSkill;

    fn department(&self) -> Department {
        Department::AlgebraicExpressions
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::DifficultyRange
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: ExpressionsSkill,
        difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        let exercise = match skill {
            ExpressionsSkill::CombiningLikeTerms => combining_like_terms(rng),
            ExpressionsSkill::EvaluateExpression => evaluate_expression(difficulty, rng),
            ExpressionsSkill::ExpandingBrackets => expanding_brackets(rng),
            ExpressionsSkill::FactoringCommonTerm => factoring_common_term(rng),
            ExpressionsSkill::SquareOfSum => square_of_sum(difficulty, rng),
            ExpressionsSkill::DifferenceOfSquares => difference_of_squares(rng),
        };
        Ok(exercise)
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<ExpressionsSkill>> {
        let drill = match misconception {
            "forgot_middle_term" => Drill {
                skill: ExpressionsSkill::SquareOfSum,
                difficulty: 4.0,
                exercise: Exercise::new("Rozwiń wyrażenie: $(x + 3)^2$", "x^2+6x+9")
                    .with_kind(AnswerKind::Symbolic)
                    .distractor(
                        "x^2+9",
                        "forgot_middle_term",
                        "(a+b)^2 = a^2 + 2ab + b^2. Brakuje wyrazu 2 * 3 * x = 6x.",
                    ),
            },
            "ignored_subtraction_sign" => Drill {
                skill: ExpressionsSkill::CombiningLikeTerms,
                difficulty: 1.0,
                exercise: Exercise::new("Uprość wyrażenie: $5x + 3x - 2x$", "6x")
                    .with_kind(AnswerKind::Symbolic)
                    .distractor(
                        "10x",
                        "ignored_subtraction_sign",
                        "Wyraz -2x odejmujemy, a nie dodajemy.",
                    ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn combining_like_terms(rng: &mut dyn RandomSource) -> Exercise {
    let p = rng.next_int(2, 9);
    let q = rng.next_int(2, 9);
    let r = rng.next_int(2, 9);
    let coefficient = p + q - r;

    Exercise::new(
        format!("Uprość wyrażenie: ${}x + {}x - {}x$", p, q, r),
        monomial(coefficient, "x"),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        monomial(p + q + r, "x"),
        "ignored_subtraction_sign",
        format!("Wyraz -{}x odejmujemy, a nie dodajemy.", r),
    )
    .distractor(
        monomial(coefficient, "x^3"),
        "multiplied_variables",
        "Dodając wyrazy podobne, nie mnożymy zmiennych. Sumujemy tylko współczynniki.",
    )
}

fn evaluate_expression(difficulty: f64, rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 5);
    let b = rng.next_int(1, 9);
    let x = if difficulty >= 3.0 {
        nonzero(rng, 5)
    } else {
        rng.next_int(1, 5)
    };
    let value = a * x * x + b;

    let mut exercise = Exercise::new(
        format!(
            "Oblicz wartość wyrażenia ${}x^2 + {}$ dla $x = {}$.",
            a, b, x
        ),
        value.to_string(),
    )
    .distractor(
        ((a * x) * (a * x) + b).to_string(),
        "squared_the_coefficient",
        "Do kwadratu podnosimy tylko x, a nie iloczyn współczynnika i x.",
    );
    if x < 0 {
        exercise = exercise.distractor(
            (-a * x * x + b).to_string(),
            "squared_negative_as_negative",
            "Kwadrat liczby ujemnej jest dodatni.",
        );
    }
    exercise
}

fn expanding_brackets(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 9);
    let b = nonzero(rng, 9);

    Exercise::new(
        format!("Wymnóż: ${}(x{})$", a, signed(b)),
        polynomial(&[(a, "x"), (a * b, "")]),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        polynomial(&[(a, "x"), (b, "")]),
        "multiplied_only_first_term",
        format!("Przez {} mnożymy każdy wyraz w nawiasie.", a),
    )
    .distractor(
        polynomial(&[(1, "x"), (a * b, "")]),
        "multiplied_only_second_term",
        format!("Przez {} mnożymy również x.", a),
    )
}

fn factoring_common_term(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 9);
    let b = rng.next_int(2, 9);

    Exercise::new(
        format!(
            "Wyłącz wspólny czynnik przed nawias: ${}x + {}$",
            a,
            a * b
        ),
        format!("{}(x+{})", a, b),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        format!("{}(x+{})", a, a * b),
        "factored_only_one_term",
        format!("Czynnik {} trzeba wyłączyć z obu wyrazów.", a),
    )
}

fn square_of_sum(difficulty: f64, rng: &mut dyn RandomSource) -> Exercise {
    let a = if difficulty >= 6.0 {
        nonzero(rng, 9)
    } else {
        rng.next_int(1, 9)
    };

    Exercise::new(
        format!("Rozwiń wyrażenie: $(x{})^2$", signed(a)),
        polynomial(&[(1, "x^2"), (2 * a, "x"), (a * a, "")]),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        polynomial(&[(1, "x^2"), (a * a, "")]),
        "forgot_middle_term",
        format!(
            "(a+b)^2 = a^2 + 2ab + b^2. Brakuje wyrazu {}.",
            monomial(2 * a, "x")
        ),
    )
    .distractor(
        polynomial(&[(1, "x^2"), (a, "x"), (a * a, "")]),
        "middle_term_not_doubled",
        "Wyraz środkowy to podwojony iloczyn: 2ab.",
    )
}

fn difference_of_squares(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 12);
    let square = a * a;

    Exercise::new(
        format!(
            "Rozłóż na czynniki: $x^2 - {}$ (zacznij od czynnika z minusem).",
            square
        ),
        format!("(x-{})(x+{})", a, a),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        format!("(x-{})^2", a),
        "wrote_square_of_difference",
        "a^2 - b^2 = (a-b)(a+b), a nie (a-b)^2.",
    )
    .distractor(
        format!("(x-{})(x+{})", square, square),
        "did_not_take_root",
        format!("{} to kwadrat liczby {}.", square, a),
    )
}
