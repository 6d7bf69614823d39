//! Algebra: equations, inequalities, systems and proportions.

use super::math::{polynomial, tex_frac};
use super::{
    fraction, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator,
};
use crate::random::RandomSource;
use crate::task::{AnswerKind, Department};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgebraSkill {
    LinearEquations,
    QuadraticEquations,
    LinearInequalities,
    SystemsOfEquations,
    Proportions,
}

impl MicroSkill for AlgebraSkill {
    fn all() -> &'static [Self] {
        &[
            AlgebraSkill::LinearEquations,
            AlgebraSkill::QuadraticEquations,
            AlgebraSkill::LinearInequalities,
            AlgebraSkill::SystemsOfEquations,
            AlgebraSkill::Proportions,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            AlgebraSkill::LinearEquations => "linear_equations",
            AlgebraSkill::QuadraticEquations => "quadratic_equations",
            AlgebraSkill::LinearInequalities => "linear_inequalities",
            AlgebraSkill::SystemsOfEquations => "systems_of_equations",
            AlgebraSkill::Proportions => "proportions",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            AlgebraSkill::LinearEquations => "Równania liniowe",
            AlgebraSkill::QuadraticEquations => "Równania kwadratowe",
            AlgebraSkill::LinearInequalities => "Nierówności liniowe",
            AlgebraSkill::SystemsOfEquations => "Układy równań",
            AlgebraSkill::Proportions => "Proporcje",
        }
    }
}

const MISCONCEPTIONS: &[&str] = &[
    "forgot_to_divide_by_coefficient",
    "forgot_to_flip_inequality",
    "sign_error_in_roots",
];

/// Exercises on equations and inequalities.
#[derive(Debug, Clone, Default)]
pub struct AlgebraTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl AlgebraTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for AlgebraTaskGenerator {
    type Skill = AlgebraSkill;

    fn department(&self) -> Department {
        Department::Algebra
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::Uniform
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: AlgebraSkill,
        _difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            AlgebraSkill::LinearEquations => linear_equation(rng),
            AlgebraSkill::QuadraticEquations => Ok(quadratic_equation(rng)),
            AlgebraSkill::LinearInequalities => Ok(linear_inequality(rng)),
            AlgebraSkill::SystemsOfEquations => Ok(system_of_equations(rng)),
            AlgebraSkill::Proportions => proportion(rng),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<AlgebraSkill>> {
        let drill = match misconception {
            "forgot_to_divide_by_coefficient" => Drill {
                skill: AlgebraSkill::LinearEquations,
                difficulty: 2.0,
                exercise: Exercise::new("Rozwiąż równanie: $4x + 3 = 23$", "5").distractor(
                    "20",
                    "forgot_to_divide_by_coefficient",
                    "Po przeniesieniu wyrazu wolnego podziel obie strony przez 4.",
                ),
            },
            "forgot_to_flip_inequality" => Drill {
                skill: AlgebraSkill::LinearInequalities,
                difficulty: 4.0,
                exercise: Exercise::new("Rozwiąż nierówność: $-2x + 1 > 7$", "x<-3")
                    .with_kind(AnswerKind::Symbolic)
                    .distractor(
                        "x>-3",
                        "forgot_to_flip_inequality",
                        "Dzieląc nierówność przez liczbę ujemną, zmieniamy zwrot nierówności.",
                    ),
            },
            "sign_error_in_roots" => Drill {
                skill: AlgebraSkill::QuadraticEquations,
                difficulty: 5.0,
                exercise: Exercise::new("Rozwiąż równanie: $x^2-5x+6 = 0$", "2, 3")
                    .with_kind(AnswerKind::UnorderedSet)
                    .distractor(
                        "-3, -2",
                        "sign_error_in_roots",
                        "Pierwiastki mają znaki przeciwne do liczb w nawiasach (x-2)(x-3).",
                    ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn linear_equation(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let a = rng.next_int(2, 8);
    let b = rng.next_int(1, 12);
    let x = rng.next_int(1, 10);
    let rhs = a * x + b;

    Ok(Exercise::new(
        format!("Rozwiąż równanie: ${}x + {} = {}$", a, b, rhs),
        x.to_string(),
    )
    .distractor(
        (rhs - b).to_string(),
        "forgot_to_divide_by_coefficient",
        format!("Po przeniesieniu wyrazu wolnego podziel obie strony przez {}.", a),
    )
    .distractor(
        fraction(rhs + b, a)?.to_string(),
        "wrong_sign_when_moving_term",
        "Przenosząc wyraz na drugą stronę równania, zmieniamy jego znak.",
    ))
}

fn quadratic_equation(rng: &mut dyn RandomSource) -> Exercise {
    let r1 = rng.next_int(1, 5);
    let r2 = rng.next_int(1, 5);
    let (lo, hi) = (r1.min(r2), r1.max(r2));
    let b = -(r1 + r2);
    let c = r1 * r2;

    let mut exercise = Exercise::new(
        format!(
            "Rozwiąż równanie: ${} = 0$",
            polynomial(&[(1, "x^2"), (b, "x"), (c, "")])
        ),
        format!("{}, {}", lo, hi),
    )
    .with_kind(AnswerKind::UnorderedSet)
    .distractor(
        format!("{}, {}", -hi, -lo),
        "sign_error_in_roots",
        "Sprawdź znaki: pierwiastki to liczby, dla których nawiasy w postaci iloczynowej się zerują.",
    );
    if r1 != r2 {
        exercise = exercise.distractor(
            hi.to_string(),
            "missed_second_root",
            "Równanie kwadratowe z dodatnią deltą ma dwa pierwiastki.",
        );
    }
    exercise
}

fn linear_inequality(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 6);
    let k = rng.next_int(-5, 5);
    let b = rng.next_int(1, 10);
    let c = -a * k + b;

    let mut exercise = Exercise::new(
        format!("Rozwiąż nierówność: $-{}x + {} > {}$", a, b, c),
        format!("x<{}", k),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        format!("x>{}", k),
        "forgot_to_flip_inequality",
        "Dzieląc nierówność przez liczbę ujemną, zmieniamy zwrot nierówności.",
    );
    if k != 0 {
        exercise = exercise.distractor(
            format!("x<{}", -k),
            "sign_error_when_dividing",
            "Sprawdź znak wyniku dzielenia przez liczbę ujemną.",
        );
    }
    exercise
}

fn system_of_equations(rng: &mut dyn RandomSource) -> Exercise {
    let x = rng.next_int(1, 9);
    let y = rng.next_int(1, 9);
    let sum = x + y;
    let diff = x - y;

    Exercise::new(
        format!(
            "Rozwiąż układ równań: $\\begin{{cases}} x + y = {} \\\\ x - y = {} \\end{{cases}}$ Podaj odpowiedź w postaci x, y.",
            sum, diff
        ),
        format!("{}, {}", x, y),
    )
    .with_kind(AnswerKind::OrderedTuple)
    .distractor(
        format!("{}, {}", y, x),
        "swapped_variables",
        "Zwróć uwagę na kolejność: najpierw x, potem y.",
    )
    .distractor(
        format!("{}, {}", 2 * x, 2 * y),
        "forgot_to_divide_after_adding",
        "Po dodaniu równań otrzymujesz 2x. Podziel wynik przez 2.",
    )
}

fn proportion(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let b = rng.next_int(2, 6);
    let m = rng.next_int(1, 5);
    let c = rng.next_int(2, 12);
    let a = m * b;

    Ok(Exercise::new(
        format!(
            "Rozwiąż proporcję: ${} = {}$",
            tex_frac("x", c),
            tex_frac(a, b)
        ),
        (m * c).to_string(),
    )
    .distractor(
        fraction(b * c, a)?.to_string(),
        "multiplied_wrong_pair",
        "W proporcji iloczyn wyrazów skrajnych równa się iloczynowi wyrazów środkowych.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    #[test]
    fn test_linear_equation_seed1_scenario() {
        let generator = AlgebraTaskGenerator::new();
        let mut rng = SeededRandom::new("seed1");
        let task = generator
            .generate_task(3.0, Some("linear_equations"), &mut rng)
            .expect("generate");

        assert!(task.latex.contains("3x + 2 = 32"), "latex: {}", task.latex);
        assert_eq!(task.expected_answer, "10");
        assert_eq!(
            task.misconception_for("30").map(|m| m.kind.as_str()),
            Some("forgot_to_divide_by_coefficient")
        );
    }

    #[test]
    fn test_quadratic_roots_are_sorted() {
        let generator = AlgebraTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[3, 2]);
        let task = generator
            .generate_task(5.0, Some("quadratic_equations"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "2, 3");
        assert_eq!(task.answer_kind, AnswerKind::UnorderedSet);
        assert!(task.latex.contains("x^2-5x+6 = 0"), "latex: {}", task.latex);
        assert!(task.misconception_for("-3, -2").is_some());
        assert!(task.misconception_for("3").is_some());
    }

    #[test]
    fn test_double_root_has_no_missed_root_distractor() {
        let generator = AlgebraTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[4, 4]);
        let task = generator
            .generate_task(5.0, Some("quadratic_equations"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "4, 4");
        assert!(!task.covers_misconception("missed_second_root"));
    }

    #[test]
    fn test_inequality_flips_direction() {
        let generator = AlgebraTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[2, -3, 1]);
        let task = generator
            .generate_task(4.0, Some("linear_inequalities"), &mut rng)
            .expect("generate");

        assert_eq!(task.latex, "Rozwiąż nierówność: $-2x + 1 > 7$");
        assert_eq!(task.expected_answer, "x<-3");
        assert_eq!(
            task.misconception_for("x>-3").map(|m| m.kind.as_str()),
            Some("forgot_to_flip_inequality")
        );
    }

    #[test]
    fn test_system_with_equal_unknowns_drops_swap() {
        let generator = AlgebraTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[4, 4]);
        let task = generator
            .generate_task(5.0, Some("systems_of_equations"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "4, 4");
        assert!(!task.covers_misconception("swapped_variables"));
        assert!(task.covers_misconception("forgot_to_divide_after_adding"));
    }

    #[test]
    fn test_every_drill_targets_its_misconception() {
        let generator = AlgebraTaskGenerator::new();
        let mut rng = SeededRandom::new("drills");
        for misconception in generator.misconceptions() {
            let task = generator
                .generate_misconception_task(misconception, &mut rng)
                .expect("drill");
            assert!(task.covers_misconception(misconception), "{}", misconception);
        }
    }

    #[test]
    fn test_fallback_policy_generates_base_skill() {
        let generator = AlgebraTaskGenerator::new().with_selector_policy(SelectorPolicy::Fallback);
        let mut rng = SeededRandom::new("fallback");
        let task = generator
            .generate_misconception_task("divided_by_zero", &mut rng)
            .expect("fallback task");
        assert_eq!(task.micro_skill, "linear_equations");

        let strict = AlgebraTaskGenerator::new();
        assert!(strict
            .generate_misconception_task("divided_by_zero", &mut rng)
            .is_err());
    }
}
