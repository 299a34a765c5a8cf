//! Numbers that retain their original textual form.
//!
//! A [`Number`] is interpreted lazily: the text captured from the input (or
//! formatted from a native value) is kept verbatim and only converted when a
//! typed extraction is requested. Two numbers compare equal when their exact
//! decimal values are equal, regardless of the type they originated from, so
//! `Number::from(1_i32) == Number::from(1.0_f64)` and `"1e2"` equals `"100"`.

use alloc::string::{String, ToString};

use thiserror::Error;

/// A conversion failure when extracting a typed value from a [`Number`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// The text does not match the number grammar.
    #[error("'{0}' is not a valid number literal")]
    InvalidLiteral(String),

    /// The value does not fit the requested type without loss.
    #[error("number {literal} cannot be represented as {target}")]
    OutOfRange {
        /// The retained number text.
        literal: String,
        /// Name of the requested type.
        target: &'static str,
    },
}

/// A numeric value retaining its original textual form.
#[derive(Debug, Clone)]
pub struct Number {
    text: String,
}

impl Number {
    /// Parses `text` against the number grammar
    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidLiteral`] if the text fails the grammar.
    pub fn parse(text: impl Into<String>) -> Result<Self, NumberError> {
        let text = text.into();
        if is_valid(&text) {
            Ok(Self { text })
        } else {
            Err(NumberError::InvalidLiteral(text))
        }
    }

    /// Wraps text the caller has already validated.
    pub(crate) fn from_text(text: String) -> Self {
        Self { text }
    }

    /// The retained number text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Extracts an `i32`.
    ///
    /// # Errors
    ///
    /// Fails if the text is not integral or overflows `i32`.
    pub fn as_i32(&self) -> Result<i32, NumberError> {
        self.text.parse().map_err(|_| self.out_of_range("i32"))
    }

    /// Extracts an `i64`.
    ///
    /// # Errors
    ///
    /// Fails if the text is not integral or overflows `i64`.
    pub fn as_i64(&self) -> Result<i64, NumberError> {
        self.text.parse().map_err(|_| self.out_of_range("i64"))
    }

    /// Extracts an `f32`.
    ///
    /// # Errors
    ///
    /// Fails if the text is not a number or overflows to infinity.
    pub fn as_f32(&self) -> Result<f32, NumberError> {
        let value: f32 = self.text.parse().map_err(|_| self.out_of_range("f32"))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.out_of_range("f32"))
        }
    }

    /// Extracts an `f64`.
    ///
    /// # Errors
    ///
    /// Fails if the text is not a number or overflows to infinity.
    pub fn as_f64(&self) -> Result<f64, NumberError> {
        let value: f64 = self.text.parse().map_err(|_| self.out_of_range("f64"))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.out_of_range("f64"))
        }
    }

    fn out_of_range(&self, target: &'static str) -> NumberError {
        NumberError::OutOfRange {
            literal: self.text.clone(),
            target,
        }
    }

    /// Normalized (sign, digits, exponent) decimal decomposition, or `None`
    /// if the text fails the grammar.
    ///
    /// The digit string has no leading or trailing zeros; the exponent is the
    /// power of ten of its last digit. Zero normalizes to `(0, "", 0)` so
    /// `-0`, `0.0` and `0e9` all coincide.
    fn decimal_parts(&self) -> Option<(i8, String, i64)> {
        if !is_valid(&self.text) {
            return None;
        }

        let (sign, rest) = match self.text.strip_prefix('-') {
            Some(rest) => (-1_i8, rest),
            None => (1, self.text.as_str()),
        };
        let (mantissa, exp_part) = match rest.split_once(['e', 'E']) {
            Some((m, e)) => (m, e),
            None => (rest, "0"),
        };
        let mut exponent: i64 = exp_part.parse().ok()?;
        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        exponent -= frac_part.len() as i64;

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);

        let leading = digits.len() - digits.trim_start_matches('0').len();
        digits.drain(..leading);
        let trailing = digits.len() - digits.trim_end_matches('0').len();
        digits.truncate(digits.len() - trailing);
        exponent += trailing as i64;

        if digits.is_empty() {
            return Some((0, digits, 0));
        }
        Some((sign, digits, exponent))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.decimal_parts(), other.decimal_parts()) {
            (Some(a), Some(b)) => a == b,
            _ => self.text == other.text,
        }
    }
}

impl Eq for Number {}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

macro_rules! number_from {
    ($($ty:ty),+) => {
        $(impl From<$ty> for Number {
            fn from(value: $ty) -> Self {
                Self { text: value.to_string() }
            }
        })+
    };
}

// Non-finite floats format to text that fails the grammar; the writer rejects
// them when the number reaches the output boundary.
number_from!(i32, i64, f32, f64);

/// Checks `text` against the number grammar
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
pub(crate) fn is_valid(text: &str) -> bool {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Start,
        IntStart,
        Zero,
        Integer,
        Point,
        Fraction,
        Mark,
        ExponentSign,
        Exponent,
    }
    use State::*;

    let mut state = Start;
    for c in text.chars() {
        state = match (state, c) {
            (Start, '-') => IntStart,
            (Start | IntStart, '0') => Zero,
            (Start | IntStart, '1'..='9') => Integer,
            (Integer, '0'..='9') => Integer,
            (Zero | Integer, '.') => Point,
            (Point | Fraction, '0'..='9') => Fraction,
            (Zero | Integer | Fraction, 'e' | 'E') => Mark,
            (Mark, '+' | '-') => ExponentSign,
            (Mark | ExponentSign | Exponent, '0'..='9') => Exponent,
            _ => return false,
        };
    }
    matches!(state, Zero | Integer | Fraction | Exponent)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0")]
    #[case("-0")]
    #[case("42")]
    #[case("-17")]
    #[case("3.25")]
    #[case("0.001")]
    #[case("1e5")]
    #[case("1E5")]
    #[case("6.02e23")]
    #[case("1e-9")]
    #[case("2E+8")]
    #[case("9223372036854775807")]
    fn grammar_accepts(#[case] text: &str) {
        assert!(is_valid(text), "{text} should be a valid number");
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("+1")]
    #[case("01")]
    #[case("1.")]
    #[case(".5")]
    #[case("1e")]
    #[case("1e+")]
    #[case("1.e5")]
    #[case("NaN")]
    #[case("inf")]
    #[case("0x10")]
    #[case("1 ")]
    fn grammar_rejects(#[case] text: &str) {
        assert!(!is_valid(text), "{text} should be rejected");
    }

    #[rstest]
    #[case("1", "1.0")]
    #[case("1e2", "100")]
    #[case("0.5", "5e-1")]
    #[case("-0", "0")]
    #[case("12.50", "1.25e1")]
    #[case("0", "0.000")]
    fn equal_decimal_values(#[case] a: &str, #[case] b: &str) {
        assert_eq!(Number::parse(a).unwrap(), Number::parse(b).unwrap());
    }

    #[rstest]
    #[case("1", "-1")]
    #[case("1", "10")]
    #[case("0.1", "0.01")]
    #[case("1e2", "1e3")]
    fn unequal_decimal_values(#[case] a: &str, #[case] b: &str) {
        assert_ne!(Number::parse(a).unwrap(), Number::parse(b).unwrap());
    }

    #[test]
    fn equality_ignores_originating_type() {
        assert_eq!(Number::from(1_i32), Number::from(1.0_f64));
        assert_eq!(Number::from(100_i64), Number::parse("1e2").unwrap());
    }

    #[test]
    fn integer_extraction_checks_range() {
        let long_max = Number::parse("9223372036854775807").unwrap();
        assert_eq!(long_max.as_i64(), Ok(9_223_372_036_854_775_807));
        assert_eq!(
            long_max.as_i32(),
            Err(NumberError::OutOfRange {
                literal: "9223372036854775807".into(),
                target: "i32",
            })
        );
    }

    #[test]
    fn fractional_text_is_not_integral() {
        let n = Number::parse("1.5").unwrap();
        assert!(n.as_i32().is_err());
        assert_eq!(n.as_f64(), Ok(1.5));
    }

    #[test]
    fn float_extraction_rejects_overflow() {
        let n = Number::parse("1e60").unwrap();
        assert!(n.as_f32().is_err());
        assert_eq!(n.as_f64(), Ok(1e60));
    }

    #[test]
    fn retains_source_text() {
        let n = Number::parse("6.02e23").unwrap();
        assert_eq!(n.as_str(), "6.02e23");
        assert_eq!(n.to_string(), "6.02e23");
    }
}
