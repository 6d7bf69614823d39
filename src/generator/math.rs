//! Exact arithmetic and number formatting used by the exercise generators.
//!
//! Formatting mirrors JavaScript's `String(number)` and
//! `Number.prototype.toFixed` so stored exercises stay byte-identical with
//! the ones produced by earlier ports of the engine.

use std::fmt;

/// Greatest common divisor (Euclid), always non-negative.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Least common multiple derived from [`gcd`]. Zero if either input is zero.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// Number of k-element combinations of n items.
pub fn binomial(n: i64, k: i64) -> i64 {
    if k < 0 || k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Number of k-element arrangements (ordered) of n items.
pub fn permutations(n: i64, k: i64) -> i64 {
    if k < 0 || k > n {
        return 0;
    }
    (0..k).map(|i| n - i).product()
}

/// A reduced fraction whose denominator is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Creates a reduced fraction. Returns `None` for a zero denominator.
    pub fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let divisor = gcd(num, den).max(1);
        let sign = if den < 0 { -1 } else { 1 };
        Some(Self {
            num: sign * num / divisor,
            den: sign * den / divisor,
        })
    }

    pub fn integer(value: i64) -> Self {
        Self { num: value, den: 1 }
    }

    pub fn numerator(&self) -> i64 {
        self.num
    }

    pub fn denominator(&self) -> i64 {
        self.den
    }

    /// Sum over the least common denominator.
    pub fn add(&self, other: &Fraction) -> Fraction {
        let den = lcm(self.den, other.den);
        let num = self.num * (den / self.den) + other.num * (den / other.den);
        Fraction::new(num, den).unwrap_or(Fraction::integer(0))
    }

    pub fn mul(&self, other: &Fraction) -> Fraction {
        Fraction::new(self.num * other.num, self.den * other.den)
            .unwrap_or(Fraction::integer(0))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Formats a number the way JavaScript's `String(number)` does for the
/// magnitudes the generators produce.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

/// Fixed-point formatting with round-half-away-from-zero on the magnitude.
pub fn to_fixed(value: f64, digits: u32) -> String {
    let factor = 10u64.pow(digits);
    let scaled = (value.abs() * factor as f64).round() as u64;
    let sign = if value < 0.0 && scaled != 0 { "-" } else { "" };
    if digits == 0 {
        return format!("{}{}", sign, scaled);
    }
    format!(
        "{}{}.{:0width$}",
        sign,
        scaled / factor,
        scaled % factor,
        width = digits as usize
    )
}

/// Renders a single monomial: `3x`, `x`, `-x`, `-2x^2`.
pub fn monomial(coef: i64, var: &str) -> String {
    if var.is_empty() {
        return coef.to_string();
    }
    match coef {
        0 => "0".to_string(),
        1 => var.to_string(),
        -1 => format!("-{}", var),
        _ => format!("{}{}", coef, var),
    }
}

/// Joins monomials into a compact polynomial (`x^2+6x+9`), skipping zero
/// terms. Returns `"0"` when every coefficient is zero.
pub fn polynomial(terms: &[(i64, &str)]) -> String {
    let mut out = String::new();
    for &(coef, var) in terms {
        if coef == 0 {
            continue;
        }
        let rendered = monomial(coef, var);
        if !out.is_empty() && coef > 0 {
            out.push('+');
        }
        out.push_str(&rendered);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Renders a signed constant for display inside a statement: ` + 5`, ` - 5`.
pub fn signed(value: i64) -> String {
    if value < 0 {
        format!(" - {}", -value)
    } else {
        format!(" + {}", value)
    }
}

/// LaTeX fraction: `\frac{num}{den}`.
pub fn tex_frac(num: impl fmt::Display, den: impl fmt::Display) -> String {
    format!("\\frac{{{}}}{{{}}}", num, den)
}

/// Power of the variable `x` as rendered in answers: `x`, `x^3`, or empty for `x^0`.
pub fn x_pow(exponent: i64) -> String {
    match exponent {
        0 => String::new(),
        1 => "x".to_string(),
        _ => format!("x^{}", exponent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 6), 0);
    }

    #[test]
    fn test_fraction_normalizes_sign_and_reduces() {
        let f = Fraction::new(6, -8).expect("non-zero denominator");
        assert_eq!(f.numerator(), -3);
        assert_eq!(f.denominator(), 4);
        assert_eq!(f.to_string(), "-3/4");
        assert!(Fraction::new(1, 0).is_none());
    }

    #[test]
    fn test_fraction_addition_uses_common_denominator() {
        let a = Fraction::new(1, 6).expect("valid");
        let b = Fraction::new(1, 4).expect("valid");
        assert_eq!(a.add(&b).to_string(), "5/12");
        let c = Fraction::new(1, 2).expect("valid");
        assert_eq!(c.add(&c).to_string(), "1");
    }

    #[test]
    fn test_format_number_like_js() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(5.0, 2), "5.00");
        assert_eq!(to_fixed(7.211102550927978, 2), "7.21");
        assert_eq!(to_fixed(1102.5, 0), "1103");
        assert_eq!(to_fixed(-2.345, 1), "-2.3");
        assert_eq!(to_fixed(-0.001, 2), "0.00");
        assert_eq!(to_fixed(0.125, 2), "0.13");
    }

    #[test]
    fn test_combinatorics() {
        assert_eq!(binomial(6, 2), 15);
        assert_eq!(permutations(6, 2), 30);
        assert_eq!(binomial(3, 5), 0);
    }

    #[test]
    fn test_polynomial_rendering() {
        assert_eq!(polynomial(&[(1, "x^2"), (6, "x"), (9, "")]), "x^2+6x+9");
        assert_eq!(polynomial(&[(3, "x"), (-12, "")]), "3x-12");
        assert_eq!(polynomial(&[(-1, "x"), (0, "")]), "-x");
        assert_eq!(polynomial(&[(0, "x")]), "0");
        assert_eq!(signed(-4), " - 4");
        assert_eq!(signed(4), " + 4");
    }

    #[test]
    fn test_tex_helpers() {
        assert_eq!(tex_frac(3, 4), "\\frac{3}{4}");
        assert_eq!(x_pow(1), "x");
        assert_eq!(x_pow(3), "x^3");
        assert_eq!(monomial(12, &x_pow(2)), "12x^2");
        assert_eq!(monomial(5, &x_pow(0)), "5");
    }
}
