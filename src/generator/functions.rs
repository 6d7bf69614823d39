//! Functions: linear and quadratic functions and composition.

use super::math::polynomial;
use super::{
    fraction, nonzero, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy,
    TaskGenerator,
};
use crate::random::RandomSource;
use crate::task::{AnswerKind, Department};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionsSkill {
    LinearFunctionValue,
    SlopeFromPoints,
    LinearZero,
    QuadraticVertex,
    FunctionComposition,
}

impl MicroSkill for FunctionsSkill {
    fn all() -> &'static [Self] {
        &[
            FunctionsSkill::LinearFunctionValue,
            FunctionsSkill::SlopeFromPoints,
            FunctionsSkill::LinearZero,
            FunctionsSkill::QuadraticVertex,
            FunctionsSkill::FunctionComposition,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            FunctionsSkill::LinearFunctionValue => "linear_function_value",
            FunctionsSkill::SlopeFromPoints => "slope_from_points",
            FunctionsSkill::LinearZero => "linear_zero",
            FunctionsSkill::QuadraticVertex => "quadratic_vertex",
            FunctionsSkill::FunctionComposition => "function_composition",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            FunctionsSkill::LinearFunctionValue => "Wartość funkcji liniowej",
            FunctionsSkill::SlopeFromPoints => "Współczynnik kierunkowy prostej",
            FunctionsSkill::LinearZero => "Miejsce zerowe funkcji liniowej",
            FunctionsSkill::QuadraticVertex => "Wierzchołek paraboli",
            FunctionsSkill::FunctionComposition => "Złożenie funkcji",
        }
    }
}

const MISCONCEPTIONS: &[&str] = &["reversed_composition_order", "inverted_slope"];

/// Exercises on function values, graphs and composition.
#[derive(Debug, Clone, Default)]
pub struct FunctionsTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl FunctionsTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for FunctionsTaskGenerator {
    type Skill = FunctionsSkill;

    fn department(&self) -> Department {
        Department::Functions
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::Uniform
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: FunctionsSkill,
        _difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            FunctionsSkill::LinearFunctionValue => Ok(linear_function_value(rng)),
            FunctionsSkill::SlopeFromPoints => slope_from_points(rng),
            FunctionsSkill::LinearZero => linear_zero(rng),
            FunctionsSkill::QuadraticVertex => Ok(quadratic_vertex(rng)),
            FunctionsSkill::FunctionComposition => Ok(function_composition(rng)),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<FunctionsSkill>> {
        let drill = match misconception {
            "reversed_composition_order" => Drill {
                skill: FunctionsSkill::FunctionComposition,
                difficulty: 5.0,
                exercise: Exercise::new(
                    "Dane są funkcje $f(x) = 2x+1$ oraz $g(x) = x^2$. Oblicz $f(g(3))$.",
                    "19",
                )
                .distractor(
                    "49",
                    "reversed_composition_order",
                    "Najpierw oblicz g(3) = 9, a dopiero potem f(9).",
                ),
            },
            "inverted_slope" => Drill {
                skill: FunctionsSkill::SlopeFromPoints,
                difficulty: 4.0,
                exercise: Exercise::new(
                    "Prosta przechodzi przez punkty $A = (1, 2)$ i $B = (3, 8)$. Oblicz jej współczynnik kierunkowy.",
                    "3",
                )
                .distractor(
                    "1/3",
                    "inverted_slope",
                    "Współczynnik kierunkowy to przyrost y podzielony przez przyrost x.",
                ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn linear_function_value(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 9);
    let b = nonzero(rng, 9);
    let x0 = rng.next_int(-5, 5);

    Exercise::new(
        format!(
            "Dana jest funkcja $f(x) = {}$. Oblicz $f({})$.",
            polynomial(&[(a, "x"), (b, "")]),
            x0
        ),
        (a * x0 + b).to_string(),
    )
    .distractor(
        (a * (x0 + b)).to_string(),
        "added_before_multiplying",
        "Najpierw mnożymy a przez x, potem dodajemy wyraz wolny.",
    )
    .distractor(
        (b * x0 + a).to_string(),
        "swapped_slope_and_intercept",
        "Współczynnik przy x to a, wyraz wolny to b.",
    )
}

fn slope_from_points(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let x1 = rng.next_int(-5, 5);
    let y1 = rng.next_int(-5, 5);
    let dx = rng.next_int(1, 5);
    let dy = nonzero(rng, 9);
    let (x2, y2) = (x1 + dx, y1 + dy);

    Ok(Exercise::new(
        format!(
            "Prosta przechodzi przez punkty $A = ({}, {})$ i $B = ({}, {})$. Oblicz jej współczynnik kierunkowy.",
            x1, y1, x2, y2
        ),
        fraction(dy, dx)?.to_string(),
    )
    .distractor(
        fraction(dx, dy)?.to_string(),
        "inverted_slope",
        "Współczynnik kierunkowy to przyrost y podzielony przez przyrost x.",
    )
    .distractor(
        fraction(-dy, dx)?.to_string(),
        "mixed_point_order",
        "Odejmuj współrzędne w tej samej kolejności: (y2 - y1) / (x2 - x1).",
    ))
}

fn linear_zero(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let a = nonzero(rng, 9);
    let b = nonzero(rng, 12);

    Ok(Exercise::new(
        format!(
            "Wyznacz miejsce zerowe funkcji $f(x) = {}$.",
            polynomial(&[(a, "x"), (b, "")])
        ),
        fraction(-b, a)?.to_string(),
    )
    .distractor(
        fraction(b, a)?.to_string(),
        "sign_error",
        "Przenosząc b na drugą stronę równania ax + b = 0, zmień jego znak.",
    )
    .distractor(
        fraction(-a, b)?.to_string(),
        "inverted_ratio",
        "Miejsce zerowe to x = -b/a, a nie -a/b.",
    ))
}

fn quadratic_vertex(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(1, 3);
    let p = rng.next_int(-5, 5);
    let q = rng.next_int(-9, 9);
    let c = a * p * p + q;

    Exercise::new(
        format!(
            "Wyznacz współrzędne wierzchołka paraboli $y = {}$. Podaj odpowiedź w postaci p, q.",
            polynomial(&[(a, "x^2"), (-2 * a * p, "x"), (c, "")])
        ),
        format!("{}, {}", p, q),
    )
    .with_kind(AnswerKind::OrderedTuple)
    .distractor(
        format!("{}, {}", -p, q),
        "sign_error_in_vertex",
        "p = -b/(2a). Uważaj na znak.",
    )
    .distractor(
        format!("{}, {}", p, c),
        "used_constant_term_as_vertex_height",
        "Wyraz wolny to f(0), a nie druga współrzędna wierzchołka. Oblicz q = f(p).",
    )
}

fn function_composition(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 5);
    let b = rng.next_int(-5, 5);
    let c = rng.next_int(-5, 5);
    let x0 = rng.next_int(1, 4);

    let f = |x: i64| a * x + b;
    let g = |x: i64| x * x + c;

    Exercise::new(
        format!(
            "Dane są funkcje $f(x) = {}$ oraz $g(x) = {}$. Oblicz $f(g({}))$.",
            polynomial(&[(a, "x"), (b, "")]),
            polynomial(&[(1, "x^2"), (c, "")]),
            x0
        ),
        f(g(x0)).to_string(),
    )
    .distractor(
        g(f(x0)).to_string(),
        "reversed_composition_order",
        format!("Najpierw oblicz g({}), a dopiero potem f.", x0),
    )
    .distractor(
        (f(x0) * g(x0)).to_string(),
        "multiplied_functions",
        "Złożenie funkcji to podstawienie, a nie iloczyn.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    #[test]
    fn test_composition_order() {
        let generator = FunctionsTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[2, 1, 0, 3]);
        let task = generator
            .generate_task(5.0, Some("function_composition"), &mut rng)
            .expect("generate");

        assert!(task.latex.contains("f(x) = 2x+1"), "latex: {}", task.latex);
        assert_eq!(task.expected_answer, "19");
        assert_eq!(
            task.misconception_for("49").map(|m| m.kind.as_str()),
            Some("reversed_composition_order")
        );
    }

    #[test]
    fn test_vertex_is_ordered() {
        let generator = FunctionsTaskGenerator::new();
        let mut rng = ScriptedRandom::new(&[1, 2, -3]);
        let task = generator
            .generate_task(5.0, Some("quadratic_vertex"), &mut rng)
            .expect("generate");

        assert!(task.latex.contains("x^2-4x+1"), "latex: {}", task.latex);
        assert_eq!(task.expected_answer, "2, -3");
        assert_eq!(task.answer_kind, AnswerKind::OrderedTuple);
        assert!(task.misconception_for("-2, -3").is_some());
        assert!(task.misconception_for("2, 1").is_some());
    }

    #[test]
    fn test_linear_zero_is_reduced_fraction() {
        let generator = FunctionsTaskGenerator::new();
        // a = 4, b = -6
        let mut rng = ScriptedRandom::new(&[4, 0, 6, 1]);
        let task = generator
            .generate_task(5.0, Some("linear_zero"), &mut rng)
            .expect("generate");

        assert_eq!(task.expected_answer, "3/2");
        assert!(task.misconception_for("-3/2").is_some());
        assert!(task.misconception_for("2/3").is_some());
    }

    #[test]
    fn test_every_drill_targets_its_misconception() {
        let generator = FunctionsTaskGenerator::new();
        let mut rng = SeededRandom::new("drills");
        for misconception in generator.misconceptions() {
            let task = generator
                .generate_misconception_task(misconception, &mut rng)
                .expect("drill");
            assert!(task.covers_misconception(misconception), "{}", misconception);
        }
    }
}
