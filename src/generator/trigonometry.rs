//! Trigonometry: exact values, conversions, right triangles, identities,
//! equations and the law of cosines.

use std::f64::consts::PI;

use super::math::{tex_frac, to_fixed};
use super::{
    fraction, Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator,
};
use crate::random::{pick, RandomSource};
use crate::task::{AnswerKind, Department};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigonometrySkill {
    StandardAngleValues,
    DegreesToRadians,
    RightTriangleSides,
    PythagoreanIdentity,
    TrigEquations,
    LawOfCosines,
}

impl MicroSkill for TrigonometrySkill {
    fn all() -> &'static [Self] {
        &[
            TrigonometrySkill::StandardAngleValues,
            TrigonometrySkill::DegreesToRadians,
            TrigonometrySkill::RightTriangleSides,
            TrigonometrySkill::PythagoreanIdentity,
            TrigonometrySkill::TrigEquations,
            TrigonometrySkill::LawOfCosines,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            TrigonometrySkill::StandardAngleValues => "standard_angle_values",
            TrigonometrySkill::DegreesToRadians => "degrees_to_radians",
            TrigonometrySkill::RightTriangleSides => "right_triangle_sides",
            TrigonometrySkill::PythagoreanIdentity => "pythagorean_identity",
            TrigonometrySkill::TrigEquations => "trig_equations",
            TrigonometrySkill::LawOfCosines => "law_of_cosines",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            TrigonometrySkill::StandardAngleValues => "Wartości funkcji trygonometrycznych",
            TrigonometrySkill::DegreesToRadians => "Miara łukowa kąta",
            TrigonometrySkill::RightTriangleSides => "Trygonometria w trójkącie prostokątnym",
            TrigonometrySkill::PythagoreanIdentity => "Jedynka trygonometryczna",
            TrigonometrySkill::TrigEquations => "Równania trygonometryczne",
            TrigonometrySkill::LawOfCosines => "Twierdzenie cosinusów",
        }
    }

    fn difficulty_range(&self) -> (f64, f64) {
        match self {
            TrigonometrySkill::StandardAngleValues => (1.0, 4.0),
            TrigonometrySkill::DegreesToRadians => (2.0, 5.0),
            TrigonometrySkill::RightTriangleSides => (3.0, 6.0),
            TrigonometrySkill::PythagoreanIdentity => (4.0, 7.0),
            TrigonometrySkill::TrigEquations => (6.0, 9.0),
            TrigonometrySkill::LawOfCosines => (8.0, 10.0),
        }
    }
}

const MISCONCEPTIONS: &[&str] = &["confused_sine_and_cosine", "missed_second_solution"];

/// Exact value of a trigonometric function at a standard angle, together
/// with the value of its co-function.
struct AngleValue {
    function: &'static str,
    angle: i64,
    value: &'static str,
    cofunction_value: &'static str,
}

const ANGLE_VALUES: &[AngleValue] = &[
    AngleValue {
        function: "sin",
        angle: 30,
        value: "1/2",
        cofunction_value: "sqrt(3)/2",
    },
    AngleValue {
        function: "sin",
        angle: 45,
        value: "sqrt(2)/2",
        cofunction_value: "sqrt(2)/2",
    },
    AngleValue {
        function: "sin",
        angle: 60,
        value: "sqrt(3)/2",
        cofunction_value: "1/2",
    },
    AngleValue {
        function: "cos",
        angle: 30,
        value: "sqrt(3)/2",
        cofunction_value: "1/2",
    },
    AngleValue {
        function: "cos",
        angle: 60,
        value: "1/2",
        cofunction_value: "sqrt(3)/2",
    },
    AngleValue {
        function: "tg",
        angle: 30,
        value: "sqrt(3)/3",
        cofunction_value: "sqrt(3)",
    },
    AngleValue {
        function: "tg",
        angle: 45,
        value: "1",
        cofunction_value: "1",
    },
    AngleValue {
        function: "tg",
        angle: 60,
        value: "sqrt(3)",
        cofunction_value: "sqrt(3)/3",
    },
];

/// Equation `f(x) = value` on `[0, 360)` with its two solutions.
struct TrigEquation {
    function: &'static str,
    value_tex: &'static str,
    solutions: (i64, i64),
    wrong_pair: (i64, i64),
    wrong_kind: &'static str,
}

const TRIG_EQUATIONS: &[TrigEquation] = &[
    TrigEquation {
        function: "sin",
        value_tex: "\\frac{1}{2}",
        solutions: (30, 150),
        wrong_pair: (30, 330),
        wrong_kind: "used_cosine_symmetry",
    },
    TrigEquation {
        function: "sin",
        value_tex: "\\frac{\\sqrt{2}}{2}",
        solutions: (45, 135),
        wrong_pair: (45, 315),
        wrong_kind: "used_cosine_symmetry",
    },
    TrigEquation {
        function: "sin",
        value_tex: "\\frac{\\sqrt{3}}{2}",
        solutions: (60, 120),
        wrong_pair: (60, 300),
        wrong_kind: "used_cosine_symmetry",
    },
    TrigEquation {
        function: "cos",
        value_tex: "\\frac{1}{2}",
        solutions: (60, 300),
        wrong_pair: (60, 120),
        wrong_kind: "used_sine_symmetry",
    },
    TrigEquation {
        function: "cos",
        value_tex: "\\frac{\\sqrt{2}}{2}",
        solutions: (45, 315),
        wrong_pair: (45, 135),
        wrong_kind: "used_sine_symmetry",
    },
    TrigEquation {
        function: "cos",
        value_tex: "\\frac{\\sqrt{3}}{2}",
        solutions: (30, 330),
        wrong_pair: (30, 150),
        wrong_kind: "used_sine_symmetry",
    },
    TrigEquation {
        function: "tg",
        value_tex: "1",
        solutions: (45, 225),
        wrong_pair: (45, 135),
        wrong_kind: "wrong_period_of_tangent",
    },
    TrigEquation {
        function: "tg",
        value_tex: "\\sqrt{3}",
        solutions: (60, 240),
        wrong_pair: (60, 120),
        wrong_kind: "wrong_period_of_tangent",
    },
];

const RADIAN_ANGLES: &[i64] = &[30, 45, 60, 90, 120, 135, 150, 180, 270];

const PYTHAGOREAN_TRIPLES: &[(i64, i64, i64)] =
    &[(3, 4, 5), (5, 12, 13), (8, 15, 17), (7, 24, 25)];

/// Exercises on trigonometric functions.
#[derive(Debug, Clone, Default)]
pub struct TrigonometryTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl TrigonometryTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for TrigonometryTaskGenerator {
    type Skill = TrigonometrySkill;

    fn department(&self) -> Department {
        Department::Trigonometry
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::DifficultyRange
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: TrigonometrySkill,
        _difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        match skill {
            TrigonometrySkill::StandardAngleValues => Ok(standard_angle_value(rng)),
            TrigonometrySkill::DegreesToRadians => Ok(degrees_to_radians(rng)),
            TrigonometrySkill::RightTriangleSides => Ok(right_triangle_side(rng)),
            TrigonometrySkill::PythagoreanIdentity => pythagorean_identity(rng),
            TrigonometrySkill::TrigEquations => Ok(trig_equation(rng)),
            TrigonometrySkill::LawOfCosines => Ok(law_of_cosines(rng)),
        }
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<TrigonometrySkill>> {
        let drill = match misconception {
            "confused_sine_and_cosine" => Drill {
                skill: TrigonometrySkill::StandardAngleValues,
                difficulty: 2.0,
                exercise: Exercise::new("Podaj dokładną wartość: $\\sin 30^\\circ$", "1/2")
                    .with_kind(AnswerKind::Symbolic)
                    .distractor(
                        "sqrt(3)/2",
                        "confused_sine_and_cosine",
                        "To wartość cos 30°. sin 30° = 1/2.",
                    ),
            },
            "missed_second_solution" => Drill {
                skill: TrigonometrySkill::TrigEquations,
                difficulty: 6.0,
                exercise: Exercise::new(
                    "Rozwiąż równanie $\\sin x = \\frac{1}{2}$ w przedziale $[0^\\circ, 360^\\circ)$. Podaj rozwiązania w stopniach.",
                    "30, 150",
                )
                .with_kind(AnswerKind::UnorderedSet)
                .distractor(
                    "30",
                    "missed_second_solution",
                    "Sinus jest dodatni także w II ćwiartce: x = 180° - 30°.",
                ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn function_tex(function: &str) -> String {
    format!("\\{}", function)
}

fn standard_angle_value(rng: &mut dyn RandomSource) -> Exercise {
    let entry = &ANGLE_VALUES[rng.next_index(ANGLE_VALUES.len())];
    let (confusion, feedback) = match entry.function {
        "tg" => (
            "confused_tangent_and_cotangent",
            "Podałeś wartość cotangensa. tg = sin / cos.",
        ),
        _ => (
            "confused_sine_and_cosine",
            "Pomyliłeś sinus z cosinusem. Sprawdź tabelę wartości.",
        ),
    };

    Exercise::new(
        format!(
            "Podaj dokładną wartość: ${} {}^\\circ$",
            function_tex(entry.function),
            entry.angle
        ),
        entry.value,
    )
    .with_kind(AnswerKind::Symbolic)
    .distractor(entry.cofunction_value, confusion, feedback)
}

fn degrees_to_radians(rng: &mut dyn RandomSource) -> Exercise {
    let angle = pick(rng, RADIAN_ANGLES).copied().unwrap_or(90) as f64;

    Exercise::new(
        format!(
            "Zamień ${}^\\circ$ na radiany (wynik z dokładnością do 0.01).",
            angle
        ),
        to_fixed(angle * PI / 180.0, 2),
    )
    .distractor(
        to_fixed(angle * 180.0 / PI, 2),
        "inverted_conversion_factor",
        "Stopnie zamieniamy na radiany mnożąc przez pi/180.",
    )
}

fn right_triangle_side(rng: &mut dyn RandomSource) -> Exercise {
    let hypotenuse = rng.next_int(5, 20) as f64;
    let angle = pick(rng, &[30i64, 45, 60]).copied().unwrap_or(30);
    let radians = angle as f64 * PI / 180.0;

    Exercise::new(
        format!(
            "W trójkącie prostokątnym przeciwprostokątna ma długość ${}$, a kąt ostry $\\alpha = {}^\\circ$. Oblicz długość przyprostokątnej leżącej naprzeciw kąta $\\alpha$ (wynik z dokładnością do 0.01).",
            hypotenuse, angle
        ),
        to_fixed(hypotenuse * radians.sin(), 2),
    )
    .distractor(
        to_fixed(hypotenuse * radians.cos(), 2),
        "used_cosine_for_opposite_side",
        "Przyprostokątna naprzeciw kąta to c * sin(alfa). Cosinus dotyczy przyprostokątnej przyległej.",
    )
}

fn pythagorean_identity(rng: &mut dyn RandomSource) -> Result<Exercise> {
    let (a, b, c) = pick(rng, PYTHAGOREAN_TRIPLES).copied().unwrap_or((3, 4, 5));

    Ok(Exercise::new(
        format!(
            "Kąt $\\alpha$ jest ostry i $\\sin\\alpha = {}$. Oblicz $\\cos\\alpha$.",
            tex_frac(a, c)
        ),
        fraction(b, c)?.to_string(),
    )
    .distractor(
        fraction(c - a, c)?.to_string(),
        "subtracted_instead_of_squaring",
        "Z jedynki trygonometrycznej: cos^2 = 1 - sin^2. Pamiętaj o kwadratach.",
    )
    .distractor(
        fraction(a, b)?.to_string(),
        "confused_cosine_with_tangent",
        "Obliczyłeś tangens. Cosinus to przyprostokątna przyległa przez przeciwprostokątną.",
    ))
}

fn trig_equation(rng: &mut dyn RandomSource) -> Exercise {
    let equation = &TRIG_EQUATIONS[rng.next_index(TRIG_EQUATIONS.len())];
    let (first, second) = equation.solutions;

    Exercise::new(
        format!(
            "Rozwiąż równanie ${} x = {}$ w przedziale $[0^\\circ, 360^\\circ)$. Podaj rozwiązania w stopniach.",
            function_tex(equation.function),
            equation.value_tex
        ),
        format!("{}, {}", first, second),
    )
    .with_kind(AnswerKind::UnorderedSet)
    .distractor(
        first.to_string(),
        "missed_second_solution",
        "W przedziale [0°, 360°) to równanie ma dwa rozwiązania.",
    )
    .distractor(
        format!("{}, {}", equation.wrong_pair.0, equation.wrong_pair.1),
        equation.wrong_kind,
        "Sprawdź, w których ćwiartkach funkcja przyjmuje tę wartość.",
    )
}

fn law_of_cosines(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(3, 12);
    let b = rng.next_int(3, 12);
    let obtuse = rng.next_int(0, 1) == 1;
    let (gamma, cosine_term) = if obtuse { (120, a * b) } else { (60, -a * b) };
    let squares = a * a + b * b;

    Exercise::new(
        format!(
            "Dwa boki trójkąta mają długości ${}$ i ${}$, a kąt między nimi ma miarę ${}^\\circ$. Oblicz długość trzeciego boku (wynik z dokładnością do 0.01).",
            a, b, gamma
        ),
        to_fixed(((squares + cosine_term) as f64).sqrt(), 2),
    )
    .distractor(
        to_fixed((squares as f64).sqrt(), 2),
        "ignored_cosine_term",
        "Trójkąt nie jest prostokątny. Użyj c^2 = a^2 + b^2 - 2ab cos(gamma).",
    )
    .distractor(
        to_fixed(((squares - cosine_term) as f64).sqrt(), 2),
        "wrong_sign_of_cosine_term",
        format!("Sprawdź znak: cos {}° ma znak przeciwny.", gamma),
    )
}
