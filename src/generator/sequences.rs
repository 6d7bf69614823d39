//! Arithmetic and geometric sequences.

use super::{
    fraction, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator,
};
use crate::random::RandomSource;
use crate::task::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequencesSkill {
    CommonDifference,
    ArithmeticNthTerm,
    ArithmeticSum,
    GeometricNthTerm,
    GeometricSum,
}

impl MicroSkill for SequencesSkill {
    fn all() -> &'static [Self] {
        &[
            SequencesSkill::CommonDifference,
            SequencesSkill::ArithmeticNthTerm,
            SequencesSkill::ArithmeticSum,
            SequencesSkill::GeometricNthTerm,
            SequencesSkill::GeometricSum,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            SequencesSkill::CommonDifference => "common_difference",
            SequencesSkill::ArithmeticNthTerm => "arithmetic_nth_term",
            SequencesSkill::ArithmeticSum => "arithmetic_sum",
            SequencesSkill::GeometricNthTerm => "geometric_nth_term",
            SequencesSkill::GeometricSum => "geometric_sum",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            SequencesSkill::CommonDifference => "Różnica ciągu arytmetycznego",
            SequencesSkill::ArithmeticNthTerm => "Wyraz ogólny ciągu arytmetycznego",
            SequencesSkill::ArithmeticSum => "Suma ciągu arytmetycznego",
            SequencesSkill::GeometricNthTerm => "Wyraz ogólny ciągu geometrycznego",
            SequencesSkill::GeometricSum => "Suma ciągu geometrycznego",
        }
    }

    fn difficulty_range(&self) -> (f64, f64) {
        match self {
            SequencesSkill::CommonDifference => (1.0, 3.0),
            SequencesSkill::ArithmeticNthTerm => (1.0, 5.0),
            SequencesSkill::ArithmeticSum => (3.0, 7.0),
            SequencesSkill::GeometricNthTerm => (3.0, 7.0),
            SequencesSkill::GeometricSum => (6.0, 9.0),
        }
    }
}

const MISCONCEPTIONS: &[&str] = &["off_by_one_index", "forgot_to_halve"];

/// Exercises on arithmetic and geometric sequences.
#[derive(Debug, Clone, Default)]
pub struct SequencesTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl SequencesTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for SequencesTaskGenerator {
    type Skill = SequencesSkill;

    fn department(&self) -> Department {
        Department::Sequences
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::DifficultyRange
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: SequencesSkill,
        _difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            SequencesSkill::CommonDifference => common_difference(rng),
            SequencesSkill::ArithmeticNthTerm => Ok(arithmetic_nth_term(rng)),
            SequencesSkill::ArithmeticSum => Ok(arithmetic_sum(rng)),
            SequencesSkill::GeometricNthTerm => Ok(geometric_nth_term(rng)),
            SequencesSkill::GeometricSum => Ok(geometric_sum(rng)),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<SequencesSkill>> {
        let drill = match misconception {
            "off_by_one_index" => Drill {
                skill: SequencesSkill::ArithmeticNthTerm,
                difficulty: 3.0,
                exercise: Exercise::new(
                    "Ciąg arytmetyczny ma pierwszy wyraz $a_1 = 3$ i różnicę $r = 4$. Oblicz $a_{10}$.",
                    "39",
                )
                .distractor(
                    "43",
                    "off_by_one_index",
                    "a_n = a_1 + (n-1)r. Od a_1 do a_10 jest 9 kroków, a nie 10.",
                ),
            },
            "forgot_to_halve" => Drill {
                skill: SequencesSkill::ArithmeticSum,
                difficulty: 4.0,
                exercise: Exercise::new(
                    "Ciąg arytmetyczny ma pierwszy wyraz $a_1 = 2$ i różnicę $r = 3$. Oblicz sumę $S_{10}$ dziesięciu początkowych wyrazów.",
                    "155",
                )
                .distractor(
                    "310",
                    "forgot_to_halve",
                    "S_n = (a_1 + a_n) * n / 2. Nie zapomnij podzielić przez 2.",
                ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn common_difference(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let a1 = rng.next_int(-10, 10);
    let d = rng.next_int(2, 9);
    let terms: Vec<i64> = (0..5).map(|i| a1 + i * d).collect();

    let mut exercise = Exercise::new(
        format!(
            "Wyznacz różnicę ciągu arytmetycznego: ${}, {}, {}, {}, \\ldots$",
            terms[0], terms[1], terms[2], terms[3]
        ),
        d.to_string(),
    )
    .distractor(
        terms[4].to_string(),
        "gave_next_term",
        "Pytanie dotyczy różnicy między kolejnymi wyrazami, a nie następnego wyrazu.",
    );
    if a1 != 0 {
        exercise = exercise.distractor(
            fraction(terms[1], a1)?.to_string(),
            "confused_difference_with_ratio",
            "W ciągu arytmetycznym odejmujemy kolejne wyrazy, a nie dzielimy.",
        );
    }
    Ok(exercise)
}

fn arithmetic_nth_term(rng: &mut dyn RandomSource) -> Exercise {
    let a1 = rng.next_int(1, 10);
    let d = rng.next_int(2, 9);
    let n = rng.next_int(5, 15);

    Exercise::new(
        format!(
            "Ciąg arytmetyczny ma pierwszy wyraz $a_1 = {}$ i różnicę $r = {}$. Oblicz $a_{{{}}}$.",
            a1, d, n
        ),
        (a1 + (n - 1) * d).to_string(),
    )
    .distractor(
        (a1 + n * d).to_string(),
        "off_by_one_index",
        format!("a_n = a_1 + (n-1)r. Od a_1 do a_{} jest {} kroków.", n, n - 1),
    )
    .distractor(
        ((n - 1) * d).to_string(),
        "ignored_first_term",
        "Do (n-1)r trzeba jeszcze dodać pierwszy wyraz.",
    )
}

fn arithmetic_sum(rng: &mut dyn RandomSource) -> Exercise {
    let a1 = rng.next_int(1, 10);
    let d = rng.next_int(1, 6);
    let n = rng.next_int(5, 20);
    let an = a1 + (n - 1) * d;
    let doubled = n * (a1 + an);

    Exercise::new(
        format!(
            "Ciąg arytmetyczny ma pierwszy wyraz $a_1 = {}$ i różnicę $r = {}$. Oblicz sumę $S_{{{}}}$ {} początkowych wyrazów.",
            a1, d, n, n
        ),
        (doubled / 2).to_string(),
    )
    .distractor(
        doubled.to_string(),
        "forgot_to_halve",
        "S_n = (a_1 + a_n) * n / 2. Nie zapomnij podzielić przez 2.",
    )
    .distractor(
        (n * an).to_string(),
        "multiplied_last_term_by_count",
        "Wyrazy rosną, więc sumy nie można liczyć jako n razy ostatni wyraz.",
    )
}

fn geometric_nth_term(rng: &mut dyn RandomSource) -> Exercise {
    let a1 = rng.next_int(1, 5);
    let q = rng.next_int(2, 4);
    let n = rng.next_int(3, 7);

    Exercise::new(
        format!(
            "Ciąg geometryczny ma pierwszy wyraz $a_1 = {}$ i iloraz $q = {}$. Oblicz $a_{{{}}}$.",
            a1, q, n
        ),
        (a1 * q.pow((n - 1) as u32)).to_string(),
    )
    .distractor(
        (a1 * q.pow(n as u32)).to_string(),
        "off_by_one_exponent",
        "a_n = a_1 * q^(n-1). Wykładnik jest o 1 mniejszy niż numer wyrazu.",
    )
    .distractor(
        (a1 * q).pow((n - 1) as u32).to_string(),
        "raised_product_to_power",
        "Do potęgi podnosimy tylko iloraz q, a nie iloczyn a_1 * q.",
    )
}

fn geometric_sum(rng: &mut dyn RandomSource) -> Exercise {
    let a1 = rng.next_int(1, 5);
    let q = rng.next_int(2, 3);
    let n = rng.next_int(3, 8);
    let power = q.pow(n as u32);

    Exercise::new(
        format!(
            "Ciąg geometryczny ma pierwszy wyraz $a_1 = {}$ i iloraz $q = {}$. Oblicz sumę $S_{{{}}}$ {} początkowych wyrazów.",
            a1, q, n, n
        ),
        (a1 * (power - 1) / (q - 1)).to_string(),
    )
    .distractor(
        (a1 * q.pow((n - 1) as u32)).to_string(),
        "gave_last_term_instead_of_sum",
        "Obliczyłeś ostatni wyraz. Suma to S_n = a_1 * (q^n - 1) / (q - 1).",
    )
    .distractor(
        (a1 * (power - 1)).to_string(),
        "forgot_to_divide_by_ratio_minus_one",
        "We wzorze na sumę dzielimy jeszcze przez (q - 1).",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    #[test]
    fn test_arithmetic_nth_term() {
        let generator = SequencesTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[3, 4, 10]);
        let task = generator
            .generate_task(3.0, Some("arithmetic_nth_term"), &mut rng)
            .expect("generate");

        assert!(task.latex.contains("a_{10}"));
        assert_eq!(task.expected_answer, "39");
        assert_eq!(
            task.misconception_for("43").map(|m| m.kind.as_str()),
            Some("off_by_one_index")
        );
    }

    #[test]
    fn test_geometric_sum_with_ratio_two() {
        let generator = SequencesTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[3, 2, 4]);
        let task = generator
            .generate_task(7.0, Some("geometric_sum"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "45");
        assert!(task.misconception_for("24").is_some());
        // q - 1 == 1, so skipping the division changes nothing
        assert!(!task.covers_misconception("forgot_to_divide_by_ratio_minus_one"));
    }

    #[test]
    fn test_common_difference_starting_at_zero() {
        let generator = SequencesTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[0, 5]);
        let task = generator
            .generate_task(1.0, Some("common_difference"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "5");
        assert!(!task.covers_misconception("confused_difference_with_ratio"));
        assert!(task.misconception_for("20").is_some());
    }

    #[test]
    fn test_every_drill_targets_its_misconception() {
        let generator = SequencesTaskGenerator::new();
        let mut rng = SeededRandom::new("drills");
        for misconception in generator.misconceptions() {
            let task = generator
                .generate_misconception_task(misconception, &mut rng)
                .expect("drill");
            assert!(task.covers_misconception(misconception), "{}", misconception);
        }
    }
}
