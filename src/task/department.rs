//! Subject departments of the exercise engine.

use serde::{Deserialize, Serialize};

/// The subject domain an exercise belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    RealNumbers,
    Algebra,
    AlgebraicExpressions,
    Geometry,
    Trigonometry,
    Calculus,
    Functions,
    Sequences,
    Statistics,
}

impl Department {
    /// Returns all departments.
    pub fn all() -> Vec<Department> {
        vec![
            Department::RealNumbers,
            Department::Algebra,
            Department::AlgebraicExpressions,
            Department::Geometry,
            Department::Trigonometry,
            Department::Calculus,
            Department::Functions,
            Department::Sequences,
            Department::Statistics,
        ]
    }

    /// Returns the machine tag used in serialized tasks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::RealNumbers => "real_numbers",
            Department::Algebra => "algebra",
            Department::AlgebraicExpressions => "algebraic_expressions",
            Department::Geometry => "geometry",
            Department::Trigonometry => "trigonometry",
            Department::Calculus => "calculus",
            Department::Functions => "functions",
            Department::Sequences => "sequences",
            Department::Statistics => "statistics",
        }
    }

    /// Parses a department tag. Accepts a few aliases used by older callers
    /// (`arithmetic`, `expressions`, `analysis`, `probability`).
    pub fn parse(tag: &str) -> Option<Department> {
        let normalized = tag.trim().to_lowercase().replace(['-', ' '], "_");
        let department = match normalized.as_str() {
            "real_numbers" | "arithmetic" | "liczby_rzeczywiste" => Department::RealNumbers,
            "algebra" => Department::Algebra,
            "algebraic_expressions" | "expressions" | "wyrazenia_algebraiczne" => {
                Department::AlgebraicExpressions
            }
            "geometry" | "geometria" => Department::Geometry,
            "trigonometry" | "trygonometria" => Department::Trigonometry,
            "calculus" | "analysis" | "analiza" => Department::Calculus,
            "functions" | "funkcje" => Department::Functions,
            "sequences" | "ciagi" => Department::Sequences,
            "statistics" | "probability" | "statystyka" => Department::Statistics,
            _ => return None,
        };
        Some(department)
    }

    /// Returns the Polish display name shown to learners.
    pub fn display_name(&self) -> &'static str {
        match self {
            Department::RealNumbers => "Liczby rzeczywiste",
            Department::Algebra => "Algebra",
            Department::AlgebraicExpressions => "Wyrażenia algebraiczne",
            Department::Geometry => "Geometria",
            Department::Trigonometry => "Trygonometria",
            Department::Calculus => "Analiza matematyczna",
            Department::Functions => "Funkcje",
            Department::Sequences => "Ciągi",
            Department::Statistics => "Statystyka i prawdopodobieństwo",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
