//! Real numbers: fractions, percentages, powers, roots, logarithms and
//! simple financial mathematics.

use super::math::{format_number, tex_frac, to_fixed};
use super::{
    fraction, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator,
};
use crate::random::{pick, RandomSource};
use crate::task::{AnswerKind, Department};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealNumbersSkill {
    FractionAddition,
    FractionMultiplication,
    AbsoluteValue,
    OrderOfOperations,
    Percentages,
    Powers,
    SquareRoots,
    Logarithms,
    CompoundInterest,
    PresentValue,
}

impl MicroSkill for RealNumbersSkill {
    fn all() -> &'static [Self] {
        &[
            RealNumbersSkill::FractionAddition,
            RealNumbersSkill::FractionMultiplication,
            RealNumbersSkill::AbsoluteValue,
            RealNumbersSkill::OrderOfOperations,
            RealNumbersSkill::Percentages,
            RealNumbersSkill::Powers,
            RealNumbersSkill::SquareRoots,
            RealNumbersSkill::Logarithms,
            RealNumbersSkill::CompoundInterest,
            RealNumbersSkill::PresentValue,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            RealNumbersSkill::FractionAddition => "fraction_addition",
            RealNumbersSkill::FractionMultiplication => "fraction_multiplication",
            RealNumbersSkill::AbsoluteValue => "absolute_value",
            RealNumbersSkill::OrderOfOperations => "order_of_operations",
            RealNumbersSkill::Percentages => "percentages",
            RealNumbersSkill::Powers => "powers",
            RealNumbersSkill::SquareRoots => "square_roots",
            RealNumbersSkill::Logarithms => "logarithms",
            RealNumbersSkill::CompoundInterest => "compound_interest",
            RealNumbersSkill::PresentValue => "present_value",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            RealNumbersSkill::FractionAddition => "Dodawanie ułamków",
            RealNumbersSkill::FractionMultiplication => "Mnożenie ułamków",
            RealNumbersSkill::AbsoluteValue => "Wartość bezwzględna",
            RealNumbersSkill::OrderOfOperations => "Kolejność wykonywania działań",
            RealNumbersSkill::Percentages => "Obliczenia procentowe",
            RealNumbersSkill::Powers => "Potęgi",
            RealNumbersSkill::SquareRoots => "Pierwiastki kwadratowe",
            RealNumbersSkill::Logarithms => "Logarytmy",
            RealNumbersSkill::CompoundInterest => "Procent składany",
            RealNumbersSkill::PresentValue => "Wartość bieżąca kapitału",
        }
    }

    fn difficulty_range(&self) -> (f64, f64) {
        match self {
            RealNumbersSkill::FractionAddition => (1.0, 4.0),
            RealNumbersSkill::FractionMultiplication => (2.0, 5.0),
            RealNumbersSkill::AbsoluteValue => (1.0, 3.0),
            RealNumbersSkill::OrderOfOperations => (1.0, 5.0),
            RealNumbersSkill::Percentages => (2.0, 6.0),
            RealNumbersSkill::Powers => (3.0, 7.0),
            RealNumbersSkill::SquareRoots => (3.0, 7.0),
            RealNumbersSkill::Logarithms => (6.0, 9.0),
            RealNumbersSkill::CompoundInterest => (7.0, 10.0),
            RealNumbersSkill::PresentValue => (8.0, 10.0),
        }
    }
}

const MISCONCEPTIONS: &[&str] = &[
    "adding_numerators_and_denominators",
    "forgot_to_divide_by_100",
    "left_to_right_evaluation",
];

const PERCENTS: &[i64] = &[5, 10, 15, 20, 25, 30, 40, 50, 75];

/// Exercises on real numbers.
#[derive(Debug, Clone, Default)]
pub struct RealNumbersTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl RealNumbersTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for RealNumbersTaskGenerator {
    type Skill = RealNumbersSkill;

    fn department(&self) -> Department {
        Department::RealNumbers
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::DifficultyRange
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: RealNumbersSkill,
        difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            RealNumbersSkill::FractionAddition => fraction_addition(difficulty, rng),
            RealNumbersSkill::FractionMultiplication => fraction_multiplication(difficulty, rng),
            RealNumbersSkill::AbsoluteValue => Ok(absolute_value(rng)),
            RealNumbersSkill::OrderOfOperations => Ok(order_of_operations(difficulty, rng)),
            RealNumbersSkill::Percentages => Ok(percentages(rng)),
            RealNumbersSkill::Powers => Ok(powers(difficulty, rng)),
            RealNumbersSkill::SquareRoots => Ok(square_roots(difficulty, rng)),
            RealNumbersSkill::Logarithms => Ok(logarithms(rng)),
            RealNumbersSkill::CompoundInterest => Ok(compound_interest(rng)),
            RealNumbersSkill::PresentValue => Ok(present_value(rng)),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<RealNumbersSkill>> {
        let drill = match misconception {
            "adding_numerators_and_denominators" => Drill {
                skill: RealNumbersSkill::FractionAddition,
                difficulty: 2.0,
                exercise: Exercise::new(
                    format!("Oblicz: ${} + {}$", tex_frac(1, 2), tex_frac(1, 3)),
                    "5/6",
                )
                .distractor(
                    "2/5",
                    "adding_numerators_and_denominators",
                    "Nie dodajemy mianowników. Sprowadź ułamki do wspólnego mianownika 6.",
                ),
            },
            "forgot_to_divide_by_100" => Drill {
                skill: RealNumbersSkill::Percentages,
                difficulty: 3.0,
                exercise: Exercise::new("Oblicz $20\\%$ z liczby $150$.", "30").distractor(
                    "3000",
                    "forgot_to_divide_by_100",
                    "20% to 20/100. Pomnóż 150 przez 0,2.",
                ),
            },
            "left_to_right_evaluation" => Drill {
                skill: RealNumbersSkill::OrderOfOperations,
                difficulty: 2.0,
                exercise: Exercise::new("Oblicz: $2 + 3 \\cdot 4$", "14").distractor(
                    "20",
                    "left_to_right_evaluation",
                    "Mnożenie wykonujemy przed dodawaniem.",
                ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn max_denominator(difficulty: f64) -> i64 {
    (3 + difficulty.round() as i64).min(12)
}

fn fraction_addition(difficulty: f64, rng: &mut dyn RandomSource) -> Result<Exercise> {
    let max_den = max_denominator(difficulty);
    let b = rng.next_int(2, max_den);
    let d = rng.next_int(2, max_den);
    let a = rng.next_int(1, b - 1);
    let c = rng.next_int(1, d - 1);

    let sum = fraction(a, b)?.add(&fraction(c, d)?);
    let naive = fraction(a + c, b + d)?;
    let product_den = fraction(a + c, b * d)?;

    Ok(Exercise::new(
        format!("Oblicz: ${} + {}$", tex_frac(a, b), tex_frac(c, d)),
        sum.to_string(),
    )
    .distractor(
        naive.to_string(),
        "adding_numerators_and_denominators",
        "Nie dodajemy mianowników. Sprowadź ułamki do wspólnego mianownika.",
    )
    .distractor(
        product_den.to_string(),
        "multiplied_denominators_only",
        "Po pomnożeniu mianowników trzeba też rozszerzyć liczniki.",
    ))
}

fn fraction_multiplication(difficulty: f64, rng: &mut dyn RandomSource) -> Result<Exercise> {
    let max_den = max_denominator(difficulty);
    let b = rng.next_int(2, max_den);
    let d = rng.next_int(2, max_den);
    let a = rng.next_int(1, b + 2);
    let c = rng.next_int(1, d + 2);

    let left = fraction(a, b)?;
    let right = fraction(c, d)?;
    let product = left.mul(&right);
    let quotient = fraction(a * d, b * c)?;
    let sum = left.add(&right);

    Ok(Exercise::new(
        format!("Oblicz: ${} \\cdot {}$", tex_frac(a, b), tex_frac(c, d)),
        product.to_string(),
    )
    .distractor(
        quotient.to_string(),
        "divided_instead_of_multiplied",
        "Mnożymy licznik przez licznik i mianownik przez mianownik.",
    )
    .distractor(
        sum.to_string(),
        "added_instead_of_multiplied",
        "To jest mnożenie, a nie dodawanie ułamków.",
    ))
}

fn absolute_value(rng: &mut dyn RandomSource) -> Exercise {
    let x = rng.next_int(-20, -6);
    let y = rng.next_int(1, 5);
    let inner = x + y;

    Exercise::new(format!("Oblicz: $|{} + {}|$", x, y), inner.abs().to_string())
        .distractor(
            inner.to_string(),
            "kept_negative_sign",
            "Wartość bezwzględna nigdy nie jest ujemna.",
        )
        .distractor(
            (-x + y).to_string(),
            "added_absolute_values",
            "Najpierw oblicz sumę wewnątrz modułu, potem weź jej wartość bezwzględną.",
        )
}

fn order_of_operations(difficulty: f64, rng: &mut dyn RandomSource) -> Exercise {
    let top = 10 + 2 * difficulty.round() as i64;
    let a = rng.next_int(2, top);
    let b = rng.next_int(2, 9);
    let c = rng.next_int(2, 9);

    Exercise::new(
        format!("Oblicz: ${} + {} \\cdot {}$", a, b, c),
        (a + b * c).to_string(),
    )
    .distractor(
        ((a + b) * c).to_string(),
        "left_to_right_evaluation",
        "Mnożenie wykonujemy przed dodawaniem.",
    )
}

fn percentages(rng: &mut dyn RandomSource) -> Exercise {
    let p = pick(rng, PERCENTS).copied().unwrap_or(10);
    let n = 20 * rng.next_int(1, 10);

    Exercise::new(
        format!("Oblicz ${}\\%$ z liczby ${}$.", p, n),
        (n * p / 100).to_string(),
    )
    .distractor(
        (n * p).to_string(),
        "forgot_to_divide_by_100",
        format!("{}% to {}/100. Nie zapomnij podzielić przez 100.", p, p),
    )
    .distractor(
        format_number(n as f64 / p as f64),
        "divided_by_percent",
        "Procent liczby obliczamy mnożąc, a nie dzieląc.",
    )
}

fn powers(difficulty: f64, rng: &mut dyn RandomSource) -> Exercise {
    let max_exp = if difficulty >= 6.0 { 5 } else { 4 };
    let base = rng.next_int(2, 9);
    let exponent = rng.next_int(2, max_exp);
    let value = base.pow(exponent as u32);

    Exercise::new(format!("Oblicz: ${}^{{{}}}$", base, exponent), value.to_string())
        .distractor(
            (base * exponent).to_string(),
            "multiplied_base_by_exponent",
            "Potęga to wielokrotne mnożenie podstawy przez siebie, a nie iloczyn podstawy i wykładnika.",
        )
        .distractor(
            exponent.pow(base as u32).to_string(),
            "swapped_base_and_exponent",
            "Nie zamieniaj podstawy z wykładnikiem.",
        )
}

fn square_roots(difficulty: f64, rng: &mut dyn RandomSource) -> Exercise {
    let top = 6 + 2 * difficulty.round() as i64;
    let root = rng.next_int(2, top);
    let square = root * root;

    Exercise::new(format!("Oblicz: $\\sqrt{{{}}}$", square), root.to_string()).distractor(
        format_number(square as f64 / 2.0),
        "halved_instead_of_root",
        format!("Pierwiastek to liczba, która podniesiona do kwadratu daje {}.", square),
    )
}

fn logarithms(rng: &mut dyn RandomSource) -> Exercise {
    if rng.next_int(0, 1) == 0 {
        let a = rng.next_int(2, 9);
        let b = rng.next_int(2, 9);
        return Exercise::new(
            format!(
                "Zapisz w postaci jednego logarytmu: $\\log_{{10}} {} + \\log_{{10}} {}$",
                a, b
            ),
            format!("log10({})", a * b),
        )
        .with_kind(AnswerKind::Symbolic)
        .distractor(
            format!("log10({})", a + b),
            "added_arguments",
            "Suma logarytmów to logarytm iloczynu, a nie sumy.",
        );
    }

    let base = rng.next_int(2, 5);
    let exponent = rng.next_int(2, 4);
    let argument = base.pow(exponent as u32);
    Exercise::new(
        format!("Oblicz: $\\log_{{{}}} {}$", base, argument),
        exponent.to_string(),
    )
    .distractor(
        argument.to_string(),
        "confused_logarithm_with_argument",
        format!("Szukamy wykładnika, do którego trzeba podnieść {}.", base),
    )
    .distractor(
        format_number(argument as f64 / base as f64),
        "divided_argument_by_base",
        "Logarytm to wykładnik potęgi, a nie iloraz.",
    )
}

fn compound_interest(rng: &mut dyn RandomSource) -> Exercise {
    let principal = 500 * rng.next_int(2, 20);
    let rate = rng.next_int(2, 8);
    let years = rng.next_int(2, 10);

    let growth = (1.0 + rate as f64 / 100.0).powi(years as i32);
    let balance = principal as f64 * growth;
    let simple = principal as f64 * (1.0 + (rate * years) as f64 / 100.0);
    let interest = balance - principal as f64;

    Exercise::new(
        format!(
            "Kapitał ${}$ zł złożono na lokacie oprocentowanej ${}\\%$ w skali roku z roczną kapitalizacją odsetek. Oblicz stan lokaty po ${}$ latach (wynik podaj z dokładnością do 0.01 zł).",
            principal, rate, years
        ),
        to_fixed(balance, 2),
    )
    .distractor(
        to_fixed(simple, 2),
        "simple_instead_of_compound",
        "Przy kapitalizacji odsetki doliczane są do kapitału co roku. Użyj wzoru P(1+r/100)^n.",
    )
    .distractor(
        to_fixed(interest, 2),
        "gave_interest_instead_of_balance",
        "Pytanie dotyczy całego stanu lokaty, a nie samych odsetek.",
    )
}

fn present_value(rng: &mut dyn RandomSource) -> Exercise {
    let future = 1000 * rng.next_int(2, 50);
    let rate = rng.next_int(2, 8);
    let years = rng.next_int(2, 10);

    let factor = 1.0 + rate as f64 / 100.0;
    let value = future as f64 / factor.powi(years as i32);
    let subtracted = future as f64 * (1.0 - rate as f64 / 100.0).powi(years as i32);
    let simple = future as f64 / (1.0 + (rate * years) as f64 / 100.0);

    Exercise::new(
        format!(
            "Jaką kwotę trzeba dziś wpłacić na lokatę oprocentowaną ${}\\%$ rocznie z roczną kapitalizacją, aby po ${}$ latach otrzymać ${}$ zł? Wynik podaj z dokładnością do 0.01 zł.",
            rate, years, future
        ),
        to_fixed(value, 2),
    )
    .distractor(
        to_fixed(subtracted, 2),
        "discounted_by_subtraction",
        "Dyskontowanie to dzielenie przez (1+r/100)^n, a nie mnożenie przez (1-r/100)^n.",
    )
    .distractor(
        to_fixed(simple, 2),
        "simple_discount",
        "Przy kapitalizacji złożonej dzielimy przez (1+r/100)^n.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    #[test]
    fn test_fraction_addition_uses_common_denominator() {
        let generator = RealNumbersTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[2, 3, 1, 1]);
        let task = generator
            .generate_task(2.0, Some("fraction_addition"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "5/6");
        assert!(task.latex.contains("\\frac{1}{2} + \\frac{1}{3}"));
        assert_eq!(
            task.misconception_for("2/5").map(|m| m.kind.as_str()),
            Some("adding_numerators_and_denominators")
        );
    }

    #[test]
    fn test_compound_interest_is_fixed_to_cents() {
        let generator = RealNumbersTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[2, 5, 2]);
        let task = generator
            .generate_task(8.0, Some("compound_interest"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "1102.50");
        assert!(task.covers_misconception("simple_instead_of_compound"));
        assert_eq!(
            task.misconception_for("1100.00").map(|m| m.kind.as_str()),
            Some("simple_instead_of_compound")
        );
    }

    #[test]
    fn test_symbolic_logarithm_answer() {
        let generator = RealNumbersTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[0, 2, 3]);
        let task = generator
            .generate_task(7.0, Some("logarithms"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "log10(6)");
        assert_eq!(task.answer_kind, AnswerKind::Symbolic);
        assert!(task.misconception_for("log10(5)").is_some());
    }

    #[test]
    fn test_high_difficulty_selects_financial_skills() {
        let generator = RealNumbersTaskGenerator::new();
        let mut rng = SeededRandom::new("finance");
        for _ in 0..20 {
            let task = generator.generate_task(10.0, None, &mut rng).expect("generate");
            assert!(
                ["logarithms", "compound_interest", "present_value"]
                    .contains(&task.micro_skill.as_str()),
                "unexpected skill {} at level 10",
                task.micro_skill
            );
        }
    }

    #[test]
    fn test_every_drill_targets_its_misconception() {
        let generator = RealNumbersTaskGenerator::new();
        let mut rng = SeededRandom::new("drills");
        for misconception in generator.misconceptions() {
            let task = generator
                .generate_misconception_task(misconception, &mut rng)
                .expect("drill");
            assert!(task.covers_misconception(misconception), "{}", misconception);
        }
    }

    #[test]
    fn test_unknown_micro_skill_is_rejected() {
        let generator = RealNumbersTaskGenerator::new();
        let mut rng = SeededRandom::new("x");
        let err = generator
            .generate_task(3.0, Some("imaginary_numbers"), &mut rng)
            .expect_err("unknown skill");
        assert!(err.is_unsupported_selector());
    }
}
