//! Amount formatting for the transaction form.
//!
//! Amount inputs hold display strings with `,` thousands separators and at
//! most two decimals. These helpers convert between what the user sees and the
//! numbers the rest of the domain works with.

use shared::TransactionFormConfig;

/// Normalize raw amount input into its grouped display form.
///
/// Everything other than digits and `.` is dropped, text after a second dot is
/// discarded, and the decimal part is cut to two digits. A trailing dot is
/// kept so the user can keep typing decimals.
pub fn format_display(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next();

    let mut display = group_thousands(whole);
    if let Some(fraction) = fraction {
        display.push('.');
        display.extend(fraction.chars().take(2));
    }
    display
}

/// Numeric value of a display string. Returns 0 for anything unparseable.
pub fn parse_value(display: &str) -> f64 {
    let cleaned: String = display.trim().chars().filter(|c| *c != ',').collect();
    let end = numeric_prefix_len(&cleaned);

    cleaned[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Grouped rendering with between `min_fraction` and `max_fraction` decimals,
/// e.g. `format_amount(2000.0, 2, 3) == "2,000.00"`.
pub fn format_amount(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let max_fraction = max_fraction.max(min_fraction);
    let rendered = format!("{:.*}", max_fraction, value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut fraction = fraction.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let negative = value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut out = String::with_capacity(rendered.len() + rendered.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

/// Currency rendering with exactly two decimals, e.g. `₡1,234.50`
pub fn format_currency(value: f64, config: &TransactionFormConfig) -> String {
    format!("{}{}", config.currency_symbol, format_amount(value, 2, 2))
}

/// Shortest plain rendering of an hour count (`2`, `1.5`, `0.25`)
pub fn format_hours(hours: f64) -> String {
    hours.to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Byte length of the leading `[+-]?digits[.digits]` run
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_groups_thousands() {
        assert_eq!(format_display("1234567"), "1,234,567");
        assert_eq!(format_display("123"), "123");
        assert_eq!(format_display("1000"), "1,000");
        assert_eq!(format_display(""), "");
    }

    #[test]
    fn test_format_display_strips_noise() {
        assert_eq!(format_display("₡ 1,234.5"), "1,234.5");
        assert_eq!(format_display("abc"), "");
        assert_eq!(format_display("-500"), "500");
        assert_eq!(format_display("10 000"), "10,000");
    }

    #[test]
    fn test_format_display_limits_decimals() {
        assert_eq!(format_display("1234.5678"), "1,234.56");
        assert_eq!(format_display("1.2.3"), "1.2");
        assert_eq!(format_display("12."), "12.");
        assert_eq!(format_display(".75"), ".75");
    }

    #[test]
    fn test_format_display_is_idempotent() {
        for raw in ["9876543.21", "0.5", "1,000", "12.", "42"] {
            let once = format_display(raw);
            assert_eq!(format_display(&once), once);
        }
    }

    #[test]
    fn test_format_display_output_shape() {
        for raw in ["12345678.999", "x1y2z3", "...", "0001000", "7.0.0.1", "₡3,5"] {
            let display = format_display(raw);
            assert!(display.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.'));
            assert!(display.matches('.').count() <= 1);
            if let Some((whole, fraction)) = display.split_once('.') {
                assert!(fraction.len() <= 2);
                assert!(!fraction.contains(','));
                for group in whole.split(',').skip(1) {
                    assert_eq!(group.len(), 3, "bad grouping in {}", display);
                }
            }
        }
    }

    #[test]
    fn test_parse_value_recovers_formatted_input() {
        assert_eq!(parse_value(&format_display("1234567.89")), 1234567.89);
        assert_eq!(parse_value(&format_display("1234.567")), 1234.56);
        assert_eq!(parse_value(&format_display("10000")), 10000.0);
        assert_eq!(parse_value(&format_display("12.")), 12.0);
    }

    #[test]
    fn test_parse_value_never_fails() {
        assert_eq!(parse_value(""), 0.0);
        assert_eq!(parse_value("abc"), 0.0);
        assert_eq!(parse_value("."), 0.0);
        assert_eq!(parse_value("-"), 0.0);
        assert_eq!(parse_value(",,,"), 0.0);
        assert_eq!(parse_value("12abc"), 12.0);
        assert_eq!(parse_value(" 2.5 "), 2.5);
        assert_eq!(parse_value("-3"), -3.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000.0, 2, 3), "1,000.00");
        assert_eq!(format_amount(2000.0, 2, 3), "2,000.00");
        assert_eq!(format_amount(1234.5, 2, 2), "1,234.50");
        assert_eq!(format_amount(0.125, 2, 3), "0.125");
        assert_eq!(format_amount(1250.0, 0, 0), "1,250");
        assert_eq!(format_amount(-1500.0, 2, 2), "-1,500.00");
        assert_eq!(format_amount(-0.0001, 2, 2), "0.00");
    }

    #[test]
    fn test_format_currency_and_hours() {
        let config = TransactionFormConfig::default();
        assert_eq!(format_currency(150000.0, &config), "₡150,000.00");
        assert_eq!(format_hours(2.0), "2");
        assert_eq!(format_hours(1.5), "1.5");
        assert_eq!(format_hours(0.25), "0.25");
    }
}
