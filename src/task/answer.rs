//! Answer normalization shared by the validator and the generators.
//!
//! The generators use the same matching rules as the validator when they
//! assemble misconception maps, so a distractor that the validator could
//! not tell apart from the canonical answer never reaches a task.

use std::sync::OnceLock;

use ordered_float::OrderedFloat;
use regex::Regex;

use super::AnswerKind;

/// Default absolute tolerance for single numeric answers.
pub const NUMERIC_TOLERANCE: f64 = 1e-9;

/// Default absolute tolerance for members of a set of numbers.
pub const EQUATION_TOLERANCE: f64 = 1e-6;

/// Tolerances applied when comparing answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub numeric: f64,
    pub set: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            numeric: NUMERIC_TOLERANCE,
            set: EQUATION_TOLERANCE,
        }
    }
}

/// How a learner answer matched the canonical answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Trimmed, case-insensitive string equality.
    Exact,
    /// Equal as numbers (decimal or `n/d`) within tolerance.
    Numeric,
    /// Equal after removing all whitespace.
    Formula,
    /// Same multiset of numbers, in any order.
    UnorderedSet,
}

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]+_?\d*\s*=").expect("valid label regex"))
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"-?\d+(?:\.\d+)?(?:\s*/\s*-?\d+(?:\.\d+)?)?").expect("valid number regex")
    })
}

/// Parses a decimal number or a single `numerator/denominator` literal.
///
/// Returns `None` for anything else, including a zero denominator and
/// non-finite values.
pub fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim().replace('\u{2212}', "-");
    if s.is_empty() {
        return None;
    }

    if let Some((num, den)) = s.split_once('/') {
        let num = parse_decimal(num.trim())?;
        let den = parse_decimal(den.trim())?;
        if den == 0.0 {
            return None;
        }
        let value = num / den;
        return value.is_finite().then_some(value);
    }

    parse_decimal(&s)
}

fn parse_decimal(s: &str) -> Option<f64> {
    if s.is_empty()
        || !s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    let value: f64 = s.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Removes every whitespace character.
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whitespace-free, lowercase form used for formula comparison.
pub fn canonical_text(input: &str) -> String {
    strip_whitespace(input).to_lowercase()
}

/// Extracts every number from a free-text list such as `"x1 = 2 lub x2 = -3"`.
///
/// Variable labels (`x =`, `x1=`, `x_2 =`) are dropped first so their
/// indices are not mistaken for values; any other text acts as a separator.
pub fn numeric_tokens(input: &str) -> Vec<f64> {
    let lowered = input.to_lowercase().replace('\u{2212}', "-");
    let unlabeled = label_regex().replace_all(&lowered, " ");
    number_regex()
        .find_iter(&unlabeled)
        .filter_map(|m| parse_number(&strip_whitespace(m.as_str())))
        .collect()
}

/// Order-independent multiset equality within an absolute tolerance.
pub fn multiset_equal(left: &[f64], right: &[f64], tolerance: f64) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut left = left.to_vec();
    let mut right = right.to_vec();
    left.sort_by_key(|v| OrderedFloat(*v));
    right.sort_by_key(|v| OrderedFloat(*v));
    left.iter()
        .zip(right.iter())
        .all(|(a, b)| (a - b).abs() < tolerance)
}

/// Checks a learner answer against the canonical answer, in precedence
/// order: exact, numeric, formula, then (for set answers) multiset.
pub fn match_expected(
    user: &str,
    expected: &str,
    kind: AnswerKind,
    tolerances: Tolerances,
) -> Option<MatchKind> {
    if user.trim().to_lowercase() == expected.trim().to_lowercase() {
        return Some(MatchKind::Exact);
    }

    if let (Some(u), Some(e)) = (parse_number(user), parse_number(expected)) {
        if (u - e).abs() < tolerances.numeric {
            return Some(MatchKind::Numeric);
        }
    }

    if canonical_text(user) == canonical_text(expected) {
        return Some(MatchKind::Formula);
    }

    if kind == AnswerKind::UnorderedSet {
        let user_values = numeric_tokens(user);
        let expected_values = numeric_tokens(expected);
        if !expected_values.is_empty()
            && multiset_equal(&user_values, &expected_values, tolerances.set)
        {
            return Some(MatchKind::UnorderedSet);
        }
    }

    None
}

/// Checks whether a learner answer equals a cataloged wrong answer.
pub fn matches_candidate(
    user: &str,
    candidate: &str,
    kind: AnswerKind,
    tolerances: Tolerances,
) -> bool {
    if let (Some(u), Some(c)) = (parse_number(user), parse_number(candidate)) {
        return (u - c).abs() < tolerances.numeric;
    }

    if canonical_text(user) == canonical_text(candidate) {
        return true;
    }

    if kind == AnswerKind::UnorderedSet {
        let user_values = numeric_tokens(user);
        let candidate_values = numeric_tokens(candidate);
        return candidate_values.len() > 1
            && multiset_equal(&user_values, &candidate_values, tolerances.set);
    }

    false
}
