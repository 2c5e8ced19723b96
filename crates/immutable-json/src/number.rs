//! Arbitrary-precision JSON numbers.
//!
//! A [`JsonNumber`] keeps the literal it was built from, so numbers that do
//! not fit any machine type survive a parse → write cycle. Only the exponent
//! marker is normalised to `e` with an explicit sign. The
//! numeric accessors are narrowing conversions that return `None` instead of
//! losing information silently.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumberFormatError {
    #[error("'{0}' is not a valid JSON number")]
    Invalid(String),
    #[error("{0} cannot be represented as a JSON number")]
    NonFinite(f64),
}

/// A JSON number stored as its canonical literal text.
///
/// The literal is kept digit for digit, except that an exponent is always
/// written as a lowercase `e` followed by an explicit sign (`1E5` becomes
/// `1e+5`). Equality is textual: `1.0` and `1` are different numbers, the same
/// way two decimals of different scale are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonNumber {
    repr: String,
}

impl JsonNumber {
    /// Wraps text already known to follow the JSON number grammar.
    pub(crate) fn from_validated(repr: String) -> Self {
        debug_assert!(is_json_number(&repr), "invalid number literal {repr:?}");
        Self {
            repr: canonical_exponent(repr),
        }
    }

    pub(crate) fn from_serde(n: &serde_json::Number) -> Self {
        // arbitrary_precision keeps the original literal inside serde_json::Number
        Self::from_validated(n.to_string())
    }

    /// The literal text of this number.
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// Returns true when the literal has no fraction and no exponent.
    pub fn is_integral(&self) -> bool {
        !self.repr.contains(['.', 'e', 'E'])
    }

    /// Narrows to `i64`, truncating any fractional part toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        self.truncated()?.parse().ok()
    }

    /// Narrows to `i32`, truncating any fractional part toward zero.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|i| i32::try_from(i).ok())
    }

    /// Narrows to `u64`, truncating any fractional part toward zero.
    pub fn as_u64(&self) -> Option<u64> {
        self.truncated()?.parse().ok()
    }

    /// Converts to the nearest `f64`; `None` when the value overflows to infinity.
    pub fn as_f64(&self) -> Option<f64> {
        self.repr.parse::<f64>().ok().filter(|f| f.is_finite())
    }

    /// Converts to a [`Decimal`]. Exponent forms drop digits past the 28th,
    /// so magnitudes too small for `Decimal` become zero; magnitudes beyond
    /// the `Decimal` range yield `None`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        if self.repr.contains('e') {
            Decimal::from_str(&self.expanded()?).ok()
        } else {
            Decimal::from_str(&self.repr).ok()
        }
    }

    /// The integer part as plain digits, truncated toward zero. `None` once it
    /// is longer than any machine integer.
    fn truncated(&self) -> Option<String> {
        let Some(digits) = Digits::of(&self.repr) else {
            return Some("0".to_owned());
        };
        if digits.point <= 0 {
            return Some("0".to_owned());
        }
        if digits.point > 20 {
            return None;
        }
        let point = digits.point as usize;
        let mut out = String::with_capacity(point + 1);
        if digits.negative {
            out.push('-');
        }
        if point <= digits.significant.len() {
            out.push_str(&digits.significant[..point]);
        } else {
            out.push_str(&digits.significant);
            out.extend(std::iter::repeat('0').take(point - digits.significant.len()));
        }
        Some(out)
    }

    /// The value written without an exponent, cut to the 28 significant
    /// digits a `Decimal` holds. `None` for magnitudes far beyond that range.
    fn expanded(&self) -> Option<String> {
        const MAX_DIGITS: usize = 28;
        let Some(digits) = Digits::of(&self.repr) else {
            return Some("0".to_owned());
        };
        if digits.point > 40 {
            return None;
        }
        if digits.point < -(MAX_DIGITS as i64) {
            return Some("0".to_owned());
        }
        let significant = digits.significant.as_str();
        let (int_part, frac_part) = if digits.point <= 0 {
            let zeros = "0".repeat(digits.point.unsigned_abs() as usize);
            ("0".to_owned(), format!("{zeros}{significant}"))
        } else {
            let point = digits.point as usize;
            if point >= significant.len() {
                let zeros = "0".repeat(point - significant.len());
                (format!("{significant}{zeros}"), String::new())
            } else {
                (significant[..point].to_owned(), significant[point..].to_owned())
            }
        };
        let int_len = if int_part == "0" { 0 } else { int_part.len() };
        let keep = MAX_DIGITS.saturating_sub(int_len).min(frac_part.len());
        let mut out = String::with_capacity(int_part.len() + keep + 2);
        if digits.negative {
            out.push('-');
        }
        out.push_str(&int_part);
        if keep > 0 {
            out.push('.');
            out.push_str(&frac_part[..keep]);
        }
        Some(out)
    }
}

/// A non-zero literal split into its significant digits (no leading zeros)
/// and the position of the decimal point relative to the first of them.
struct Digits {
    negative: bool,
    significant: String,
    point: i64,
}

impl Digits {
    /// `None` when the literal is zero.
    fn of(literal: &str) -> Option<Digits> {
        let (negative, unsigned) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((m, e)) => (m, Some(e)),
            None => (unsigned, None),
        };
        let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all: String = [int_digits, frac_digits].concat();
        let significant = all.trim_start_matches('0');
        if significant.is_empty() {
            return None;
        }
        let leading_zeros = (all.len() - significant.len()) as i64;
        // Exponents too long for i64 saturate; the result is out of any range anyway.
        let exponent = match exponent {
            None => 0,
            Some(e) => e.parse::<i64>().unwrap_or(if e.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            }),
        };
        Some(Digits {
            negative,
            significant: significant.to_owned(),
            point: (int_digits.len() as i64)
                .saturating_add(exponent)
                .saturating_sub(leading_zeros),
        })
    }
}

/// Rewrites `E`/`e` exponents as `e` with an explicit sign.
fn canonical_exponent(repr: String) -> String {
    let Some(at) = repr.find(['e', 'E']) else {
        return repr;
    };
    let (mantissa, rest) = repr.split_at(at);
    let exponent = &rest[1..];
    if exponent.starts_with(['+', '-']) {
        format!("{mantissa}e{exponent}")
    } else {
        format!("{mantissa}e+{exponent}")
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl FromStr for JsonNumber {
    type Err = NumberFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_json_number(s) {
            Ok(Self::from_validated(s.to_owned()))
        } else {
            Err(NumberFormatError::Invalid(s.to_owned()))
        }
    }
}

impl From<i32> for JsonNumber {
    fn from(value: i32) -> Self {
        Self::from_validated(value.to_string())
    }
}

impl From<i64> for JsonNumber {
    fn from(value: i64) -> Self {
        Self::from_validated(value.to_string())
    }
}

impl From<u64> for JsonNumber {
    fn from(value: u64) -> Self {
        Self::from_validated(value.to_string())
    }
}

impl From<Decimal> for JsonNumber {
    fn from(value: Decimal) -> Self {
        Self::from_validated(value.to_string())
    }
}

impl TryFrom<f64> for JsonNumber {
    type Error = NumberFormatError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumberFormatError::NonFinite(value));
        }
        Ok(Self::from_validated(format_float(value)))
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        // Debug gives the shortest round-trip form and switches to exponent
        // notation for very large or very small magnitudes.
        format!("{:?}", f)
    }
}

/// Checks `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
pub(crate) fn is_json_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let start = i;
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> JsonNumber {
        s.parse().unwrap()
    }

    #[test]
    fn test_grammar() {
        for ok in ["0", "-0", "12", "-3.25", "1e10", "1E-2", "0.5e+3"] {
            assert!(is_json_number(ok), "{ok} should be accepted");
        }
        for bad in ["", "-", "01", "1.", ".5", "1e", "+1", "NaN", "1.2.3", " 1"] {
            assert!(!is_json_number(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_narrowing_integers() {
        assert_eq!(num("42").as_i32(), Some(42));
        assert_eq!(num("-7.9").as_i64(), Some(-7));
        assert_eq!(num("1e2").as_i64(), Some(100));
        assert_eq!(num("3000000000").as_i32(), None);
        assert_eq!(num("3000000000").as_i64(), Some(3_000_000_000));
        assert_eq!(num("-1").as_u64(), None);
        assert_eq!(num("18446744073709551615").as_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_narrowing_truncates_the_literal() {
        assert_eq!(num("0.99999999999999999999999999999999").as_i64(), Some(0));
        assert_eq!(num("-0.99999999999999999999999999999999").as_i32(), Some(0));
        assert_eq!(num("-1e-30").as_i64(), Some(0));
        assert_eq!(num("12345e-2").as_i64(), Some(123));
        assert_eq!(num("0.0012e4").as_u64(), Some(12));
        assert_eq!(num("0e999999999999999999999").as_i64(), Some(0));
        assert_eq!(num("1e25").as_i64(), None);
        assert_eq!(num("1e999999999999999999999").as_u64(), None);
        assert_eq!(num("-9223372036854775808.7").as_i64(), Some(i64::MIN));
    }

    #[test]
    fn test_decimal_from_exponent_forms() {
        assert_eq!(num("1.5e3").as_decimal(), Some(Decimal::new(1500, 0)));
        assert_eq!(num("25e-3").as_decimal(), Some(Decimal::new(25, 3)));
        assert_eq!(num("-1e-30").as_decimal(), Some(Decimal::ZERO));
        assert!(num("-3e-29").as_decimal().unwrap().is_zero());
        assert_eq!(num("1.25e-1").as_decimal(), Some(Decimal::new(125, 3)));
        assert_eq!(num("1e60").as_decimal(), None);
    }

    #[test]
    fn test_exponent_is_canonical() {
        assert_eq!(num("1e5").as_str(), "1e+5");
        assert_eq!(num("1E+2").as_str(), "1e+2");
        assert_eq!(num("2.5E-3").as_str(), "2.5e-3");
        assert_eq!(num("1e5"), num("1E+5"));
        assert_eq!(JsonNumber::try_from(1e300).unwrap().as_str(), "1e+300");
    }

    #[test]
    fn test_narrowing_floats() {
        assert_eq!(num("1.5").as_f64(), Some(1.5));
        assert_eq!(num("1e400").as_f64(), None);
    }

    #[test]
    fn test_decimal_keeps_scale() {
        let d = num("10.50").as_decimal().unwrap();
        assert_eq!(d.to_string(), "10.50");
        assert_eq!(JsonNumber::from(d).as_str(), "10.50");
    }

    #[test]
    fn test_huge_literal_is_preserved() {
        let text = "123456789012345678901234567890.000000000000000000001";
        assert_eq!(num(text).to_string(), text);
        assert_eq!(num(text).as_i64(), None);
    }

    #[test]
    fn test_from_float() {
        assert_eq!(JsonNumber::try_from(2.0).unwrap().as_str(), "2");
        assert_eq!(JsonNumber::try_from(0.1).unwrap().as_f64(), Some(0.1));
        assert_eq!(JsonNumber::try_from(1e300).unwrap().as_f64(), Some(1e300));
        assert!(JsonNumber::try_from(f64::NAN).is_err());
        assert!(JsonNumber::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_format_errors() {
        let err = JsonNumber::try_from(f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "NaN cannot be represented as a JSON number");
        assert_eq!(
            "1.".parse::<JsonNumber>().unwrap_err(),
            NumberFormatError::Invalid("1.".to_owned())
        );
        assert_eq!(
            JsonNumber::try_from(f64::INFINITY),
            Err(NumberFormatError::NonFinite(f64::INFINITY))
        );
    }

    #[test]
    fn test_textual_equality() {
        assert_ne!(num("1.0"), num("1"));
        assert!(num("1").is_integral());
        assert!(!num("1.0").is_integral());
    }
}
