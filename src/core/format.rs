//! Fixed pt-BR number display: `.` groups thousands, `,` marks decimals

/// Two fraction digits, e.g. `-100,00`, `10.204,97`
pub fn format_decimal(value: f64) -> String {
    localize(&format!("{:.2}", round_half_away(value, 2)))
}

/// At most two fraction digits, trailing zeros dropped, e.g. `1.000`, `12,5`
pub fn format_compact(value: f64) -> String {
    let fixed = format!("{:.2}", round_half_away(value, 2));
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    localize(trimmed)
}

/// One fraction digit with a `.` separator, e.g. `-10.0`
pub fn format_percentage(value: f64) -> String {
    let fixed = format!("{:.1}", round_half_away(value, 1));
    strip_negative_zero(&fixed)
}

/// KPI difference text: `<difference> (<percentage>%)`
pub fn format_difference(difference: f64, percentage: f64) -> String {
    format!(
        "{} ({}%)",
        format_decimal(difference),
        format_percentage(percentage)
    )
}

/// Round to `digits` fraction digits, ties away from zero (`{:.N}` alone
/// would round ties to even)
fn round_half_away(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Rewrite Rust's `-1234.5` into `-1.234,5`
fn localize(fixed: &str) -> String {
    let fixed = strip_negative_zero(fixed);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `-0.00` rounds to zero and shows without a sign
fn strip_negative_zero(fixed: &str) -> String {
    match fixed.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => fixed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(0.0), "0,00");
        assert_eq!(format_decimal(-100.0), "-100,00");
        assert_eq!(format_decimal(1000.0), "1.000,00");
        assert_eq!(format_decimal(10204.97), "10.204,97");
        assert_eq!(format_decimal(1234567.891), "1.234.567,89");
        assert_eq!(format_decimal(-0.001), "0,00");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(1000.0), "1.000");
        assert_eq!(format_compact(12.5), "12,5");
        assert_eq!(format_compact(931580.0), "931.580");
        assert_eq!(format_compact(0.004), "0");
        assert_eq!(format_compact(-1500.25), "-1.500,25");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(-10.0), "-10.0");
        assert_eq!(format_percentage(0.0), "0.0");
        assert_eq!(format_percentage(12.345), "12.3");
        assert_eq!(format_percentage(-0.01), "0.0");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_percentage(0.25), "0.3");
        assert_eq!(format_percentage(-0.25), "-0.3");
        assert_eq!(format_decimal(0.125), "0,13");
        assert_eq!(format_decimal(-0.125), "-0,13");
        assert_eq!(format_compact(0.125), "0,13");
        assert_eq!(format_compact(1000.375), "1.000,38");
        assert_eq!(format_difference(1.0, 0.25), "1,00 (0.3%)");
    }

    #[test]
    fn test_format_difference() {
        assert_eq!(format_difference(-100.0, -10.0), "-100,00 (-10.0%)");
        assert_eq!(format_difference(2500.5, 25.005), "2.500,50 (25.0%)");
    }
}
