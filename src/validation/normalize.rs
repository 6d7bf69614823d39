//! Loose answer normalization for callers that compare two raw strings
//! without a task at hand.

use crate::task::answer::{canonical_text, parse_number, NUMERIC_TOLERANCE};

/// A learner answer reduced to a comparable form.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedAnswer {
    Number(f64),
    /// Members of a `{a, b, c}` set, in written order.
    Set(Vec<NormalizedAnswer>),
    /// Whitespace-free, lowercase text.
    Text(String),
}

/// Normalizes an answer.
///
/// Braced input becomes a [`NormalizedAnswer::Set`] whose members are split
/// on top-level `;` or `,` and normalized recursively, so `{{1, 2}, 3}`
/// holds a nested set. A scalar with a decimal comma (`2,5`) is read as a
/// number.
pub fn normalize_answer(input: &str) -> NormalizedAnswer {
    let trimmed = input.trim();

    if let Some(inner) = set_body(trimmed) {
        let members = split_members(inner)
            .into_iter()
            .map(str::trim)
            .filter(|member| !member.is_empty())
            .map(normalize_answer)
            .collect();
        return NormalizedAnswer::Set(members);
    }

    normalize_scalar(trimmed)
}

/// Inside of `{...}` when the opening brace is closed by the final character.
fn set_body(input: &str) -> Option<&str> {
    let inner = input.strip_prefix('{')?.strip_suffix('}')?;
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

fn split_members(inner: &str) -> Vec<&str> {
    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' | ';' if depth == 0 => {
                members.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    members.push(&inner[start..]);
    members
}

fn normalize_scalar(input: &str) -> NormalizedAnswer {
    if let Some(value) = parse_number(input) {
        return NormalizedAnswer::Number(value);
    }
    if input.matches(',').count() == 1 {
        if let Some(value) = parse_number(&input.replace(',', ".")) {
            return NormalizedAnswer::Number(value);
        }
    }
    NormalizedAnswer::Text(canonical_text(input))
}

/// Checks whether two raw answers are equivalent after normalization.
///
/// Sets compare as multisets, numbers within `1e-9`, everything else as
/// normalized text.
pub fn are_answers_equivalent(left: &str, right: &str) -> bool {
    equivalent(&normalize_answer(left), &normalize_answer(right))
}

fn equivalent(left: &NormalizedAnswer, right: &NormalizedAnswer) -> bool {
    match (left, right) {
        (NormalizedAnswer::Number(a), NormalizedAnswer::Number(b)) => {
            (a - b).abs() < NUMERIC_TOLERANCE
        }
        (NormalizedAnswer::Text(a), NormalizedAnswer::Text(b)) => a == b,
        (NormalizedAnswer::Set(a), NormalizedAnswer::Set(b)) => same_members(a, b),
        _ => false,
    }
}

fn same_members(left: &[NormalizedAnswer], right: &[NormalizedAnswer]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut used = vec![false; right.len()];
    left.iter().all(|member| {
        let found = right
            .iter()
            .enumerate()
            .find(|(i, candidate)| !used[*i] && equivalent(member, candidate))
            .map(|(i, _)| i);
        match found {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_scalars() {
        assert_eq!(normalize_answer(" 42 "), NormalizedAnswer::Number(42.0));
        assert_eq!(normalize_answer("2,5"), NormalizedAnswer::Number(2.5));
        assert_eq!(normalize_answer("3/4"), NormalizedAnswer::Number(0.75));
        assert_eq!(
            normalize_answer("X + 1"),
            NormalizedAnswer::Text("x+1".to_string())
        );
    }

    #[test]
    fn test_normalize_set() {
        assert_eq!(
            normalize_answer("{1, 2; a}"),
            NormalizedAnswer::Set(vec![
                NormalizedAnswer::Number(1.0),
                NormalizedAnswer::Number(2.0),
                NormalizedAnswer::Text("a".to_string()),
            ])
        );
        assert_eq!(normalize_answer("{}"), NormalizedAnswer::Set(vec![]));
    }

    #[test]
    fn test_normalize_nested_set() {
        assert_eq!(
            normalize_answer("{ {1, 2}, 3 }"),
            NormalizedAnswer::Set(vec![
                NormalizedAnswer::Set(vec![
                    NormalizedAnswer::Number(1.0),
                    NormalizedAnswer::Number(2.0),
                ]),
                NormalizedAnswer::Number(3.0),
            ])
        );
        assert!(are_answers_equivalent("{{1, 2}, 3}", "{3; {2, 1}}"));
        assert!(!are_answers_equivalent("{{1, 2}, 3}", "{1, 2, 3}"));
        assert_eq!(
            normalize_answer("{1}, {2}"),
            NormalizedAnswer::Text("{1},{2}".to_string())
        );
    }

    #[test]
    fn test_sets_ignore_order() {
        assert!(are_answers_equivalent("{1, 2, 3}", "{3,1,2}"));
        assert!(are_answers_equivalent("{1/2; 2}", "{2; 0.5}"));
        assert!(!are_answers_equivalent("{1, 1, 2}", "{1, 2, 2}"));
        assert!(!are_answers_equivalent("{1, 2}", "{1, 2, 3}"));
    }

    #[test]
    fn test_scalar_equivalence() {
        assert!(are_answers_equivalent("0,5", "1/2"));
        assert!(are_answers_equivalent("2x + 1", "2X+1"));
        assert!(!are_answers_equivalent("2", "{2}"));
        assert!(!are_answers_equivalent("1/0", "0"));
    }
}
