//! Display helpers for metric values (en-US conventions).

/// Group an integer digit string with commas.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format `value` with `decimals` fraction digits and grouped thousands.
fn grouped_fixed(value: f64, decimals: usize) -> (bool, String, String) {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    // Rounding can turn a tiny negative into "-0"; treat that as zero.
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    (negative, group_thousands(int_part), frac_part.to_owned())
}

/// Thousands-separated number with at most three fraction digits.
///
/// `1234567.0` becomes `"1,234,567"`, `1234.5678` becomes `"1,234.568"`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let (negative, int_part, frac_part) = grouped_fixed(value, 3);
    let frac_part = frac_part.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// One decimal place followed by `%`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// US dollars with two decimals, e.g. `$1,234.50`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let (negative, int_part, frac_part) = grouped_fixed(value, 2);
    let sign = if negative { "-" } else { "" };
    format!("{sign}${int_part}.{frac_part}")
}

/// Percentage for rates, grouped number otherwise.
#[must_use]
pub fn metric_display_value(value: f64, is_rate: bool) -> String {
    if is_rate {
        format_percentage(value)
    } else {
        format_number(value)
    }
}

/// Kebab-case identifier for a camelCase metric name.
///
/// A dash is inserted only between a lowercase letter and an uppercase
/// letter, so `upsell1Rate` becomes `upsell1rate`.
#[must_use]
pub fn metric_id(metric_name: &str) -> String {
    let mut id = String::with_capacity(metric_name.len() + 4);
    let mut prev_lower = false;
    for ch in metric_name.chars() {
        if prev_lower && ch.is_ascii_uppercase() {
            id.push('-');
        }
        prev_lower = ch.is_ascii_lowercase();
        id.push(ch.to_ascii_lowercase());
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234.5678), "1,234.568");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-2500.0), "-2,500");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(4.0), "4.0%");
        assert_eq!(format_percentage(12.345), "12.3%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-42.0), "-$42.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_metric_display_value() {
        assert_eq!(metric_display_value(3.26, true), "3.3%");
        assert_eq!(metric_display_value(4521.0, false), "4,521");
    }

    #[test]
    fn test_metric_id() {
        assert_eq!(metric_id("conversionRate"), "conversion-rate");
        assert_eq!(metric_id("numberOfPostLikes"), "number-of-post-likes");
        assert_eq!(metric_id("upsell1Rate"), "upsell1rate");
        assert_eq!(metric_id("visitors"), "visitors");
    }
}
