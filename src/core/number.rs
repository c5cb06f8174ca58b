//! Numeric parsing for spreadsheet-exported length values
//!
//! Exports mix two conventions in the same column: pt-BR thousands grouping
//! (`10.204,97`, `19.409`) and plain decimals written with either separator
//! (`1234.56`, `1234,56`). The grammar is closed: anything outside the four
//! patterns below is not a number.

use once_cell::sync::Lazy;
use regex::Regex;

/// `10.204,97` - groups of exactly three digits, decimal comma
static GROUPED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(\.[0-9]{3})+,[0-9]+$").expect("valid pattern"));

/// `19.409` - groups of exactly three digits, no fraction
static GROUPED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(\.[0-9]{3})+$").expect("valid pattern"));

/// `1234.56`
static DOT_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("valid pattern"));

/// `1234,56`
static COMMA_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+,[0-9]+$").expect("valid pattern"));

/// Which textual shape a value was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberPattern {
    GroupedDecimal,
    GroupedInteger,
    DotDecimal,
    CommaDecimal,
}

impl NumberPattern {
    /// Classify a trimmed value, first match wins
    pub fn classify(text: &str) -> Option<Self> {
        if GROUPED_DECIMAL.is_match(text) {
            Some(Self::GroupedDecimal)
        } else if GROUPED_INTEGER.is_match(text) {
            Some(Self::GroupedInteger)
        } else if DOT_DECIMAL.is_match(text) {
            Some(Self::DotDecimal)
        } else if COMMA_DECIMAL.is_match(text) {
            Some(Self::CommaDecimal)
        } else {
            None
        }
    }

    /// Rewrite a value of this shape into Rust's float syntax
    fn normalize(self, text: &str) -> String {
        match self {
            Self::GroupedDecimal => text.replace('.', "").replace(',', "."),
            Self::GroupedInteger => text.replace('.', ""),
            Self::DotDecimal => text.to_string(),
            Self::CommaDecimal => text.replace(',', "."),
        }
    }
}

/// Parse a textual value into a number.
///
/// Returns `None` for empty input, `-`, anything that does not match one of
/// the recognised patterns, and digit runs too long to fit in an `f64`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() || text == "-" {
        return None;
    }

    let pattern = NumberPattern::classify(text)?;
    pattern
        .normalize(text)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Anything that can be read as a length value.
///
/// Values that are already numeric pass through unchanged; absent values are
/// not numbers.
pub trait ToNumber {
    fn to_number(&self) -> Option<f64>;
}

impl ToNumber for str {
    fn to_number(&self) -> Option<f64> {
        parse_number(self)
    }
}

impl ToNumber for String {
    fn to_number(&self) -> Option<f64> {
        parse_number(self)
    }
}

impl ToNumber for f64 {
    fn to_number(&self) -> Option<f64> {
        if !self.is_finite() {
            None
        } else {
            Some(*self)
        }
    }
}

impl<T: ToNumber + ?Sized> ToNumber for &T {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }
}

impl<T: ToNumber> ToNumber for Option<T> {
    fn to_number(&self) -> Option<f64> {
        self.as_ref().and_then(ToNumber::to_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_decimal() {
        assert_eq!(parse_number("10.204,97"), Some(10204.97));
        assert_eq!(parse_number("1.000,00"), Some(1000.0));
        assert_eq!(parse_number("1.234.567,5"), Some(1234567.5));
    }

    #[test]
    fn test_grouped_integer() {
        assert_eq!(parse_number("19.409"), Some(19409.0));
        assert_eq!(parse_number("931.580"), Some(931580.0));
    }

    #[test]
    fn test_plain_decimals() {
        assert_eq!(parse_number("1234.56"), Some(1234.56));
        assert_eq!(parse_number("1234,56"), Some(1234.56));
        assert_eq!(parse_number("900,00"), Some(900.0));
    }

    #[test]
    fn test_short_group_is_plain_decimal() {
        // Not three digits after the dot, so not thousands-grouped
        assert_eq!(NumberPattern::classify("12.34"), Some(NumberPattern::DotDecimal));
        assert_eq!(parse_number("12.34"), Some(12.34));
        assert_eq!(parse_number("1.2345"), Some(1.2345));
    }

    #[test]
    fn test_pattern_priority() {
        assert_eq!(
            NumberPattern::classify("1.234"),
            Some(NumberPattern::GroupedInteger)
        );
        assert_eq!(
            NumberPattern::classify("1.234,5"),
            Some(NumberPattern::GroupedDecimal)
        );
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12"), None);
        assert_eq!(parse_number("-12,5"), None);
        assert_eq!(parse_number("1.23.456"), None);
        assert_eq!(parse_number("1,234.56"), None);
        assert_eq!(parse_number("1234."), None);
    }

    #[test]
    fn test_overflow_is_not_a_number() {
        let huge = format!("{}.0", "9".repeat(400));
        assert_eq!(NumberPattern::classify(&huge), Some(NumberPattern::DotDecimal));
        assert_eq!(parse_number(&huge), None);
        assert_eq!(parse_number(&format!("{},5", "9".repeat(400))), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_number("  1.000,50 "), Some(1000.5));
    }

    #[test]
    fn test_to_number_inputs() {
        assert_eq!(42.5_f64.to_number(), Some(42.5));
        assert_eq!(f64::NAN.to_number(), None);
        assert_eq!(f64::INFINITY.to_number(), None);
        assert_eq!(f64::NEG_INFINITY.to_number(), None);
        assert_eq!("19.409".to_number(), Some(19409.0));
        assert_eq!(String::from("1234,56").to_number(), Some(1234.56));
        assert_eq!(None::<String>.to_number(), None);
        assert_eq!(Some("900,00").to_number(), Some(900.0));
    }
}
