//! Calculus: limits, derivatives and integrals of polynomials.

use super::math::{monomial, polynomial, tex_frac, x_pow};
use super::{
    fraction, nonzero, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy,
    TaskGenerator,
};
use crate::random::RandomSource;
use crate::task::{AnswerKind, Department};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculusSkill {
    PolynomialLimits,
    PowerRule,
    DerivativeAtPoint,
    IndefiniteIntegrals,
    DefiniteIntegrals,
}

impl MicroSkill for CalculusSkill {
    fn all() -> &'static [Self] {
        &[
            CalculusSkill::PolynomialLimits,
            CalculusSkill::PowerRule,
            CalculusSkill::DerivativeAtPoint,
            CalculusSkill::IndefiniteIntegrals,
            CalculusSkill::DefiniteIntegrals,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            CalculusSkill::PolynomialLimits => "polynomial_limits",
            CalculusSkill::PowerRule => "power_rule",
            CalculusSkill::DerivativeAtPoint => "derivative_at_point",
            CalculusSkill::IndefiniteIntegrals => "indefinite_integrals",
            CalculusSkill::DefiniteIntegrals => "definite_integrals",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            CalculusSkill::PolynomialLimits => "Granice funkcji wymiernych",
            CalculusSkill::PowerRule => "Pochodna funkcji potęgowej",
            CalculusSkill::DerivativeAtPoint => "Pochodna w punkcie",
            CalculusSkill::IndefiniteIntegrals => "Całki nieoznaczone",
            CalculusSkill::DefiniteIntegrals => "Całki oznaczone",
        }
    }

    fn difficulty_range(&self) -> (f64, f64) {
        match self {
            CalculusSkill::PolynomialLimits => (5.0, 7.0),
            CalculusSkill::PowerRule => (5.0, 8.0),
            CalculusSkill::DerivativeAtPoint => (6.0, 9.0),
            CalculusSkill::IndefiniteIntegrals => (7.0, 10.0),
            CalculusSkill::DefiniteIntegrals => (8.0, 10.0),
        }
    }
}

const MISCONCEPTIONS: &[&str] = &["dropped_integration_constant", "forgot_to_multiply_by_exponent"];

/// Exercises on limits, derivatives and integrals.
#[derive(Debug, Clone, Default)]
pub struct CalculusTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl CalculusTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for CalculusTaskGenerator {
    type Skill = CalculusSkill;

    fn department(&self) -> Department {
        Department::Calculus
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::DifficultyRange
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: CalculusSkill,
        _difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            CalculusSkill::PolynomialLimits => Ok(polynomial_limit(rng)),
            CalculusSkill::PowerRule => Ok(power_rule(rng)),
            CalculusSkill::DerivativeAtPoint => Ok(derivative_at_point(rng)),
            CalculusSkill::IndefiniteIntegrals => Ok(indefinite_integral(rng)),
            CalculusSkill::DefiniteIntegrals => definite_integral(rng),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<CalculusSkill>> {
        let drill = match misconception {
            "dropped_integration_constant" => Drill {
                skill: CalculusSkill::IndefiniteIntegrals,
                difficulty: 7.0,
                exercise: Exercise::new("Oblicz całkę nieoznaczoną: $\\int 6x^2 \\, dx$", "2x^3+C")
                    .with_kind(AnswerKind::Symbolic)
                    .distractor(
                        "2x^3",
                        "dropped_integration_constant",
                        "Całka nieoznaczona to rodzina funkcji. Dopisz stałą C.",
                    ),
            },
            "forgot_to_multiply_by_exponent" => Drill {
                skill: CalculusSkill::PowerRule,
                difficulty: 5.0,
                exercise: Exercise::new("Oblicz pochodną funkcji $f(x) = 4x^3$.", "12x^2")
                    .with_kind(AnswerKind::Symbolic)
                    .distractor(
                        "4x^2",
                        "forgot_to_multiply_by_exponent",
                        "(x^n)' = n * x^(n-1). Pomnóż współczynnik przez wykładnik 3.",
                    ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn polynomial_limit(rng: &mut dyn RandomSource) -> Exercise {
    let k = rng.next_int(1, 9);

    Exercise::new(
        format!(
            "Oblicz granicę: $\\lim_{{x \\to {}}} {}$",
            k,
            tex_frac(format!("x^2 - {}", k * k), format!("x - {}", k))
        ),
        (2 * k).to_string(),
    )
    .distractor(
        "0",
        "substituted_zero_over_zero",
        "Podstawienie daje symbol 0/0. Rozłóż licznik na czynniki i skróć.",
    )
    .distractor(
        k.to_string(),
        "cancelled_incorrectly",
        format!("x^2 - {} = (x - {})(x + {}). Po skróceniu zostaje x + {}.", k * k, k, k, k),
    )
}

fn power_rule(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 9);
    let n = rng.next_int(2, 6);

    Exercise::new(
        format!("Oblicz pochodną funkcji $f(x) = {}$.", monomial(a, &x_pow(n))),
        monomial(a * n, &x_pow(n - 1)),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        monomial(a, &x_pow(n - 1)),
        "forgot_to_multiply_by_exponent",
        format!("(x^n)' = n * x^(n-1). Pomnóż współczynnik przez {}.", n),
    )
    .distractor(
        monomial(a * n, &x_pow(n)),
        "did_not_reduce_exponent",
        "Po zróżniczkowaniu wykładnik zmniejsza się o 1.",
    )
}

fn derivative_at_point(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(1, 6);
    let b = nonzero(rng, 9);
    let x0 = rng.next_int(1, 5);

    Exercise::new(
        format!(
            "Dana jest funkcja $f(x) = {}$. Oblicz $f'({})$.",
            polynomial(&[(a, "x^2"), (b, "x")]),
            x0
        ),
        (2 * a * x0 + b).to_string(),
    )
    .distractor(
        (a * x0 * x0 + b * x0).to_string(),
        "evaluated_function_instead_of_derivative",
        "Obliczyłeś f(x0). Najpierw wyznacz pochodną, potem podstaw.",
    )
    .distractor(
        (a * x0 + b).to_string(),
        "forgot_power_rule_factor",
        "(ax^2)' = 2ax. Nie zapomnij o czynniku 2.",
    )
}

fn indefinite_integral(rng: &mut dyn RandomSource) -> Exercise {
    let k = rng.next_int(1, 6);
    let m = rng.next_int(2, 5);
    let coefficient = k * m;
    let integrand = monomial(coefficient, &x_pow(m - 1));

    Exercise::new(
        format!("Oblicz całkę nieoznaczoną: $\\int {} \\, dx$", integrand),
        format!("{}+C", monomial(k, &x_pow(m))),
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(
        monomial(k, &x_pow(m)),
        "dropped_integration_constant",
        "Całka nieoznaczona to rodzina funkcji. Dopisz stałą C.",
    )
    .distractor(
        format!("{}+C", monomial(coefficient * (m - 1), &x_pow(m - 2))),
        "differentiated_instead_of_integrated",
        "Obliczyłeś pochodną. Całkując, zwiększamy wykładnik o 1.",
    )
    .distractor(
        format!("{}+C", monomial(coefficient, &x_pow(m))),
        "forgot_to_divide_by_new_exponent",
        format!("Po zwiększeniu wykładnika podziel współczynnik przez {}.", m),
    )
}

fn definite_integral(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let a = rng.next_int(1, 6);
    let p = rng.next_int(0, 3);
    let q = p + rng.next_int(1, 4);
    let doubled = a * (q * q - p * p);

    Ok(Exercise::new(
        format!(
            "Oblicz całkę oznaczoną: $\\int_{{{}}}^{{{}}} {} \\, dx$",
            p,
            q,
            monomial(a, "x")
        ),
        fraction(doubled, 2)?.to_string(),
    )
    .distractor(
        fraction(a * q * q, 2)?.to_string(),
        "ignored_lower_bound",
        "Od wartości funkcji pierwotnej w górnej granicy odejmij jej wartość w dolnej.",
    )
    .distractor(
        doubled.to_string(),
        "forgot_to_halve",
        "Funkcja pierwotna ax to ax^2/2.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    #[test]
    fn test_power_rule_answer() {
        let generator = CalculusTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[4, 3]);
        let task = generator
            .generate_task(6.0, Some("power_rule"), &mut rng)
            .expect("generate");

        assert!(task.latex.contains("4x^3"));
        assert_eq!(task.expected_answer, "12x^2");
        assert_eq!(
            task.misconception_for("4x^2").map(|m| m.kind.as_str()),
            Some("forgot_to_multiply_by_exponent")
        );
        assert!(task.misconception_for("12x^3").is_some());
    }

    #[test]
    fn test_indefinite_integral_keeps_constant() {
        let generator = CalculusTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[2, 3]);
        let task = generator
            .generate_task(8.0, Some("indefinite_integrals"), &mut rng)
            .expect("generate");

        assert!(task.latex.contains("6x^2"), "latex: {}", task.latex);
        assert_eq!(task.expected_answer, "2x^3+C");
        assert!(task.misconception_for("2x^3").is_some());
        assert!(task.misconception_for("12x+C").is_some());
        assert!(task.misconception_for("6x^3+C").is_some());
    }

    #[test]
    fn test_limit_of_removable_discontinuity() {
        let generator = CalculusTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[3]);
        let task = generator
            .generate_task(5.0, Some("polynomial_limits"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "6");
        assert!(task.latex.contains("\\frac{x^2 - 9}{x - 3}"));
        assert!(task.covers_misconception("substituted_zero_over_zero"));
    }

    #[test]
    fn test_definite_integral_from_zero_drops_lower_bound_distractor() {
        let generator = CalculusTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[3, 0, 2]);
        let task = generator
            .generate_task(9.0, Some("definite_integrals"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "6");
        assert!(!task.covers_misconception("ignored_lower_bound"));
        assert_eq!(
            task.misconception_for("12").map(|m| m.kind.as_str()),
            Some("forgot_to_halve")
        );
    }

    #[test]
    fn test_level_below_every_range_widens_by_one() {
        let generator = CalculusTaskGenerator::new();
        let mut rng = SeededRandom::new("widen");
        for _ in 0..20 {
            let task = generator.generate_task(4.0, None, &mut rng).expect("generate");
            assert!(
                ["polynomial_limits", "power_rule"].contains(&task.micro_skill.as_str()),
                "got {}",
                task.micro_skill
            );
        }
    }

    #[test]
    fn test_every_drill_targets_its_misconception() {
        let generator = CalculusTaskGenerator::new();
        let mut rng = SeededRandom::new("drills");
        for misconception in generator.misconceptions() {
            let task = generator
                .generate_misconception_task(misconception, &mut rng)
                .expect("drill");
            assert!(task.covers_misconception(misconception), "{}", misconception);
        }
    }
}
