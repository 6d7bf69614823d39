//! Descriptive statistics, combinatorics and elementary probability.

use super::math::{binomial, format_number, permutations, to_fixed};
use super::{
    fraction, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator,
};
use crate::random::RandomSource;
use crate::task::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticsSkill {
    Mean,
    Median,
    Mode,
    Range,
    Combinations,
    SimpleProbability,
    Variance,
}

impl MicroSkill for StatisticsSkill {
    fn all() -> &'static [Self] {
        &[
            StatisticsSkill::Mean,
            StatisticsSkill::Median,
            StatisticsSkill::Mode,
            StatisticsSkill::Range,
            StatisticsSkill::Combinations,
            StatisticsSkill::SimpleProbability,
            StatisticsSkill::Variance,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            StatisticsSkill::Mean => "mean",
            StatisticsSkill::Median => "median",
            StatisticsSkill::Mode => "mode",
            StatisticsSkill::Range => "range",
            StatisticsSkill::Combinations => "combinations",
            StatisticsSkill::SimpleProbability => "simple_probability",
            StatisticsSkill::Variance => "variance",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            StatisticsSkill::Mean => "Średnia arytmetyczna",
            StatisticsSkill::Median => "Mediana",
            StatisticsSkill::Mode => "Dominanta",
            StatisticsSkill::Range => "Rozstęp",
            StatisticsSkill::Combinations => "Kombinacje",
            StatisticsSkill::SimpleProbability => "Prawdopodobieństwo klasyczne",
            StatisticsSkill::Variance => "Wariancja",
        }
    }
}

const MISCONCEPTIONS: &[&str] = &["used_permutations_instead_of_combinations", "did_not_sort_data"];

/// Exercises on data sets, counting and probability.
#[derive(Debug, Clone, Default)]
pub struct StatisticsTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl StatisticsTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for StatisticsTaskGenerator {
    type Skill = StatisticsSkill;

    fn department(&self) -> Department {
        Department::Statistics
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::Uniform
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: StatisticsSkill,
        _difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            StatisticsSkill::Mean => Ok(mean(rng)),
            StatisticsSkill::Median => Ok(median(rng)),
            StatisticsSkill::Mode => Ok(mode(rng)),
            StatisticsSkill::Range => Ok(range(rng)),
            StatisticsSkill::Combinations => Ok(combinations(rng)),
            StatisticsSkill::SimpleProbability => simple_probability(rng),
            StatisticsSkill::Variance => Ok(variance(rng)),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<StatisticsSkill>> {
        let drill = match misconception {
            "used_permutations_instead_of_combinations" => Drill {
                skill: StatisticsSkill::Combinations,
                difficulty: 5.0,
                exercise: Exercise::new(
                    "Na ile sposobów można wybrać $2$ osoby z grupy $5$ osób?",
                    "10",
                )
                .distractor(
                    "20",
                    "used_permutations_instead_of_combinations",
                    "Kolejność wyboru nie ma znaczenia. Podziel przez 2!.",
                ),
            },
            "did_not_sort_data" => Drill {
                skill: StatisticsSkill::Median,
                difficulty: 3.0,
                exercise: Exercise::new("Oblicz medianę danych: $7, 1, 9, 3, 5$.", "5")
                    .distractor(
                        "9",
                        "did_not_sort_data",
                        "Przed wyznaczeniem mediany uporządkuj dane rosnąco.",
                    ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn draw_values(rng: &mut dyn RandomSource, count: usize, min: i64, max: i64) -> Vec<i64> {
    (0..count).map(|_| rng.next_int(min, max)).collect()
}

/// Fisher-Yates shuffle driven by the task's random source.
fn shuffle(rng: &mut dyn RandomSource, values: &mut [i64]) {
    for i in (1..values.len()).rev() {
        let j = rng.next_index(i + 1);
        values.swap(i, j);
    }
}

fn list(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Integers verbatim, anything else to two decimals.
fn rounded(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value)
    } else {
        to_fixed(value, 2)
    }
}

fn mean(rng: &mut dyn RandomSource) -> Exercise {
    let count = rng.next_int(4, 6) as usize;
    let values = draw_values(rng, count, 1, 20);
    let sum: i64 = values.iter().sum();
    let n = count as f64;

    Exercise::new(
        format!(
            "Oblicz średnią arytmetyczną danych: ${}$ (wynik z dokładnością do 0.01).",
            list(&values)
        ),
        rounded(sum as f64 / n),
    )
    .distractor(
        rounded(sum as f64 / (n - 1.0)),
        "divided_by_wrong_count",
        format!("Danych jest {}. Sumę dzielimy przez liczbę danych.", count),
    )
    .distractor(
        sum.to_string(),
        "forgot_to_divide",
        "To jest suma danych. Podziel ją przez liczbę danych.",
    )
}

fn median(rng: &mut dyn RandomSource) -> Exercise {
    let values = draw_values(rng, 5, 1, 30);
    let mut sorted = values.clone();
    sorted.sort_unstable();

    Exercise::new(
        format!("Oblicz medianę danych: ${}$.", list(&values)),
        sorted[2].to_string(),
    )
    .distractor(
        values[2].to_string(),
        "did_not_sort_data",
        "Przed wyznaczeniem mediany uporządkuj dane rosnąco.",
    )
}

fn mode(rng: &mut dyn RandomSource) -> Exercise {
    let mode = rng.next_int(1, 9);
    let mut pool: Vec<i64> = (1..=15).filter(|v| *v != mode).collect();
    shuffle(rng, &mut pool);

    let mut values = vec![mode, mode, mode];
    values.extend_from_slice(&pool[..3]);
    shuffle(rng, &mut values);
    let maximum = values.iter().copied().max().unwrap_or(mode);

    Exercise::new(
        format!("Wyznacz dominantę danych: ${}$.", list(&values)),
        mode.to_string(),
    )
    .distractor(
        maximum.to_string(),
        "confused_mode_with_maximum",
        "Dominanta to wartość występująca najczęściej, a nie największa.",
    )
    .distractor(
        "3",
        "gave_frequency_instead_of_value",
        "Podaj wartość, która występuje najczęściej, a nie liczbę jej wystąpień.",
    )
}

fn range(rng: &mut dyn RandomSource) -> Exercise {
    let values = draw_values(rng, 6, 1, 40);
    let max = values.iter().copied().max().unwrap_or(0);
    let min = values.iter().copied().min().unwrap_or(0);
    let unsorted_span = (values[values.len() - 1] - values[0]).abs();

    Exercise::new(
        format!("Oblicz rozstęp danych: ${}$.", list(&values)),
        (max - min).to_string(),
    )
    .distractor(
        max.to_string(),
        "confused_range_with_maximum",
        "Rozstęp to różnica między największą a najmniejszą wartością.",
    )
    .distractor(
        unsorted_span.to_string(),
        "did_not_sort_data",
        "Nie odejmuj skrajnych pozycji listy. Znajdź wartość największą i najmniejszą.",
    )
}

fn combinations(rng: &mut dyn RandomSource) -> Exercise {
    let n = rng.next_int(5, 10);
    let k = rng.next_int(2, 3);

    Exercise::new(
        format!(
            "Na ile sposobów można wybrać ${}$ osoby z grupy ${}$ osób?",
            k, n
        ),
        binomial(n, k).to_string(),
    )
    .distractor(
        permutations(n, k).to_string(),
        "used_permutations_instead_of_combinations",
        format!("Kolejność wyboru nie ma znaczenia. Podziel przez {}!.", k),
    )
    .distractor(
        (n * k).to_string(),
        "multiplied_counts",
        "Liczbę wyborów obliczamy symbolem Newtona, a nie iloczynem n * k.",
    )
}

fn simple_probability(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let white = rng.next_int(1, 9);
    let black = rng.next_int(1, 9);
    let total = white + black;

    Ok(Exercise::new(
        format!(
            "W urnie jest ${}$ kul białych i ${}$ kul czarnych. Losujemy jedną kulę. Oblicz prawdopodobieństwo wylosowania kuli białej.",
            white, black
        ),
        fraction(white, total)?.to_string(),
    )
    .distractor(
        fraction(white, black)?.to_string(),
        "computed_odds_instead_of_probability",
        "Liczbę korzystnych wyników dzielimy przez liczbę wszystkich wyników.",
    )
    .distractor(
        fraction(black, total)?.to_string(),
        "complement_event",
        "Obliczyłeś prawdopodobieństwo wylosowania kuli czarnej.",
    ))
}

fn variance(rng: &mut dyn RandomSource) -> Exercise {
    let values = draw_values(rng, 5, 1, 10);
    let n = values.len() as f64;
    let mean = values.iter().sum::<i64>() as f64 / n;
    let squares: f64 = values.iter().map(|v| (*v as f64 - mean).powi(2)).sum();
    let population = squares / n;

    Exercise::new(
        format!(
            "Oblicz wariancję danych: ${}$ (wynik z dokładnością do 0.01).",
            list(&values)
        ),
        to_fixed(population, 2),
    )
    .distractor(
        to_fixed(population.sqrt(), 2),
        "reported_standard_deviation",
        "To odchylenie standardowe. Wariancja to jego kwadrat.",
    )
    .distractor(
        to_fixed(squares / (n - 1.0), 2),
        "used_sample_variance",
        "Dla całej populacji sumę kwadratów odchyleń dzielimy przez n.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    #[test]
    fn test_combinations_vs_permutations() {
        let generator = StatisticsTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[5, 2]);
        let task = generator
            .generate_task(5.0, Some("combinations"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "10");
        assert_eq!(
            task.misconception_for("20").map(|m| m.kind.as_str()),
            Some("used_permutations_instead_of_combinations")
        );
    }

    #[test]
    fn test_median_of_unsorted_data() {
        let generator = StatisticsTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[7, 1, 9, 3, 5]);
        let task = generator
            .generate_task(3.0, Some("median"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "5");
        assert!(task.misconception_for("9").is_some());
    }

    #[test]
    fn test_mean_rounds_to_two_decimals() {
        let generator = StatisticsTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[4, 1, 2, 2, 2]);
        let task = generator
            .generate_task(3.0, Some("mean"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "1.75");
        assert!(task.misconception_for("2.33").is_some());
        assert!(task.misconception_for("7").is_some());
    }

    #[test]
    fn test_mode_appears_three_times() {
        let generator = StatisticsTaskGenerator::new();
        let mut rng = SeededRandom::new("mode");
        let task = generator
            .generate_task(3.0, Some("mode"), &mut rng)
            .expect("generate");

        let mode = task.expected_answer.clone();
        let occurrences = task
            .latex
            .split(|c: char| !c.is_ascii_digit())
            .filter(|token| *token == mode)
            .count();
        assert_eq!(occurrences, 3, "latex: {}", task.latex);
    }

    #[test]
    fn test_every_drill_targets_its_misconception() {
        let generator = StatisticsTaskGenerator::new();
        let mut rng = SeededRandom::new("drills");
        for misconception in generator.misconceptions() {
            let task = generator
                .generate_misconception_task(misconception, &mut rng)
                .expect("drill");
            assert!(task.covers_misconception(misconception), "{}", misconception);
        }
    }
}
