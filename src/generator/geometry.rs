//! Plane and solid geometry.

use std::f64::consts::PI;

use super::math::{format_number, to_fixed};
use super::{Drill, Exercise, MicroSkill, Result, SelectionPolicy, SelectorPolicy, TaskGenerator};
use crate::random::RandomSource;
use crate::task::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometrySkill {
    PythagoreanTheorem,
    TriangleArea,
    CircleArea,
    CircleCircumference,
    RectanglePerimeter,
    TriangleAngles,
    CuboidVolume,
}

impl MicroSkill for GeometrySkill {
    fn all() -> &'static [Self] {
        &[
            GeometrySkill::PythagoreanTheorem,
            GeometrySkill::TriangleArea,
            GeometrySkill::CircleArea,
            GeometrySkill::CircleCircumference,
            GeometrySkill::RectanglePerimeter,
            GeometrySkill::TriangleAngles,
            GeometrySkill::CuboidVolume,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            GeometrySkill::PythagoreanTheorem => "pythagorean_theorem",
            GeometrySkill::TriangleArea => "triangle_area",
            GeometrySkill::CircleArea => "circle_area",
            GeometrySkill::CircleCircumference => "circle_circumference",
            GeometrySkill::RectanglePerimeter => "rectangle_perimeter",
            GeometrySkill::TriangleAngles => "triangle_angles",
            GeometrySkill::CuboidVolume => "cuboid_volume",
        }
    }

    fn skill_name(&self) -> &'static str {
        match self {
            GeometrySkill::PythagoreanTheorem => "Twierdzenie Pitagorasa",
            GeometrySkill::TriangleArea => "Pole trójkąta",
            GeometrySkill::CircleArea => "Pole koła",
            GeometrySkill::CircleCircumference => "Obwód okręgu",
            GeometrySkill::RectanglePerimeter => "Obwód prostokąta",
            GeometrySkill::TriangleAngles => "Kąty w trójkącie",
            GeometrySkill::CuboidVolume => "Objętość prostopadłościanu",
        }
    }
}

const MISCONCEPTIONS: &[&str] = &["added_legs_instead_of_theorem", "used_circumference_formula"];

/// Exercises on lengths, areas, angles and volumes.
#[derive(Debug, Clone, Default)]
pub struct GeometryTaskGenerator {
    selector_policy: SelectorPolicy,
}

impl GeometryTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }
}

impl TaskGenerator for GeometryTaskGenerator {
    type Skill = GeometrySkill;

    fn department(&self) -> Department {
        Department::Geometry
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::Uniform
    }

    fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    fn build(
        &self,
        skill: GeometrySkill,
        difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Exercise> {
        // Larger figures at higher levels.
        let max_side = 8 + 2 * difficulty.round() as i64;
        let exercise = match skill {
            GeometrySkill::PythagoreanTheorem => pythagorean_theorem(rng),
            GeometrySkill::TriangleArea => triangle_area(max_side, rng),
            GeometrySkill::CircleArea => circle_area(rng),
            GeometrySkill::CircleCircumference => circle_circumference(rng),
            GeometrySkill::RectanglePerimeter => rectangle_perimeter(max_side, rng),
            GeometrySkill::TriangleAngles => triangle_angles(rng),
            GeometrySkill::CuboidVolume => cuboid_volume(rng),
        };
        Ok(exercise)
    }

    fn misconceptions(&self) -> &'static [&'static str] {
        MISCONCEPTIONS
    }

    fn drill(&self, misconception: &str) -> Option<Drill<GeometrySkill>> {
        let drill = match misconception {
            "added_legs_instead_of_theorem" => Drill {
                skill: GeometrySkill::PythagoreanTheorem,
                difficulty: 3.0,
                exercise: Exercise::new(
                    "Przyprostokątne trójkąta prostokątnego mają długości $6$ i $8$. Oblicz długość przeciwprostokątnej (wynik z dokładnością do 0.01).",
                    "10.00",
                )
                .distractor(
                    "14",
                    "added_legs_instead_of_theorem",
                    "Z twierdzenia Pitagorasa: c^2 = a^2 + b^2, więc c = sqrt(36 + 64).",
                ),
            },
            "used_circumference_formula" => Drill {
                skill: GeometrySkill::CircleArea,
                difficulty: 3.0,
                exercise: Exercise::new(
                    "Oblicz pole koła o promieniu $3$ (wynik z dokładnością do 0.01).",
                    "28.27",
                )
                .distractor(
                    "18.85",
                    "used_circumference_formula",
                    "Pole koła to pi * r^2. Wzór 2 * pi * r opisuje obwód.",
                ),
            },
            _ => return None,
        };
        Some(drill)
    }
}

fn pythagorean_theorem(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(3, 12);
    let b = rng.next_int(3, 12);
    let squares = a * a + b * b;

    Exercise::new(
        format!(
            "Przyprostokątne trójkąta prostokątnego mają długości ${}$ i ${}$. Oblicz długość przeciwprostokątnej (wynik z dokładnością do 0.01).",
            a, b
        ),
        to_fixed((squares as f64).sqrt(), 2),
    )
    .distractor(
        (a + b).to_string(),
        "added_legs_instead_of_theorem",
        "Nie dodajemy długości przyprostokątnych. Skorzystaj z c^2 = a^2 + b^2.",
    )
    .distractor(
        squares.to_string(),
        "forgot_square_root",
        "Otrzymałeś c^2. Wyciągnij jeszcze pierwiastek.",
    )
}

fn triangle_area(max_side: i64, rng: &mut dyn RandomSource) -> Exercise {
    let base = rng.next_int(2, max_side);
    let height = rng.next_int(2, max_side);
    let doubled = base * height;

    Exercise::new(
        format!(
            "Oblicz pole trójkąta o podstawie ${}$ i wysokości ${}$ opuszczonej na tę podstawę.",
            base, height
        ),
        format_number(doubled as f64 / 2.0),
    )
    .distractor(
        doubled.to_string(),
        "forgot_to_halve",
        "Pole trójkąta to połowa iloczynu podstawy i wysokości.",
    )
}

fn circle_area(rng: &mut dyn RandomSource) -> Exercise {
    let r = rng.next_int(1, 10) as f64;

    Exercise::new(
        format!(
            "Oblicz pole koła o promieniu ${}$ (wynik z dokładnością do 0.01).",
            r
        ),
        to_fixed(PI * r * r, 2),
    )
    .distractor(
        to_fixed(2.0 * PI * r, 2),
        "used_circumference_formula",
        "Pole koła to pi * r^2. Wzór 2 * pi * r opisuje obwód.",
    )
    .distractor(
        to_fixed(PI * 4.0 * r * r, 2),
        "used_diameter_as_radius",
        "We wzorze na pole występuje promień, a nie średnica.",
    )
}

fn circle_circumference(rng: &mut dyn RandomSource) -> Exercise {
    let r = rng.next_int(1, 10) as f64;

    Exercise::new(
        format!(
            "Oblicz obwód okręgu o promieniu ${}$ (wynik z dokładnością do 0.01).",
            r
        ),
        to_fixed(2.0 * PI * r, 2),
    )
    .distractor(
        to_fixed(PI * r, 2),
        "used_radius_instead_of_diameter",
        "Obwód to pi razy średnica, czyli 2 * pi * r.",
    )
    .distractor(
        to_fixed(PI * r * r, 2),
        "used_area_formula",
        "pi * r^2 to pole koła. Obwód okręgu to 2 * pi * r.",
    )
}

fn rectangle_perimeter(max_side: i64, rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, max_side);
    let b = rng.next_int(2, max_side);

    Exercise::new(
        format!(
            "Oblicz obwód prostokąta o bokach ${}$ i ${}$.",
            a, b
        ),
        (2 * (a + b)).to_string(),
    )
    .distractor(
        (a + b).to_string(),
        "forgot_to_double",
        "Prostokąt ma po dwa boki każdej długości.",
    )
    .distractor(
        (a * b).to_string(),
        "confused_area_with_perimeter",
        "Iloczyn boków to pole. Obwód to suma długości wszystkich boków.",
    )
}

fn triangle_angles(rng: &mut dyn RandomSource) -> Exercise {
    let alpha = rng.next_int(20, 80);
    let beta = rng.next_int(20, 80);

    Exercise::new(
        format!(
            "Dwa kąty trójkąta mają miary ${}^\\circ$ i ${}^\\circ$. Oblicz miarę trzeciego kąta (w stopniach).",
            alpha, beta
        ),
        (180 - alpha - beta).to_string(),
    )
    .distractor(
        (360 - alpha - beta).to_string(),
        "used_full_angle_sum",
        "Suma kątów w trójkącie wynosi 180 stopni.",
    )
}

fn cuboid_volume(rng: &mut dyn RandomSource) -> Exercise {
    let a = rng.next_int(2, 10);
    let b = rng.next_int(2, 10);
    let c = rng.next_int(2, 10);

    Exercise::new(
        format!(
            "Oblicz objętość prostopadłościanu o krawędziach ${}$, ${}$ i ${}$.",
            a, b, c
        ),
        (a * b * c).to_string(),
    )
    .distractor(
        (2 * (a * b + b * c + a * c)).to_string(),
        "computed_surface_area",
        "Policzyłeś pole powierzchni. Objętość to iloczyn trzech krawędzi.",
    )
    .distractor(
        (a + b + c).to_string(),
        "added_edges",
        "Objętość to iloczyn, a nie suma długości krawędzi.",
    )
}
