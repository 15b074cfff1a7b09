use serde::Deserialize;

/// A form value as it arrives from the page: a JSON number, a JSON bool or
/// free text (query strings are always text).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl RawValue {
    pub fn amount(&self) -> f64 {
        match self {
            RawValue::Number(v) => finite_or_zero(*v),
            RawValue::Flag(_) => 0.0,
            RawValue::Text(s) => parse_amount(s),
        }
    }

    pub fn flag(&self) -> bool {
        match self {
            RawValue::Number(v) => *v != 0.0 && v.is_finite(),
            RawValue::Flag(v) => *v,
            RawValue::Text(s) => parse_flag(s),
        }
    }
}

/// Reads the longest leading decimal number, like a browser's `parseFloat`.
/// Anything that does not start with a number, or overflows, reads as 0.
pub fn parse_amount(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().map_or(0.0, finite_or_zero)
}

pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn parse_amount_reads_plain_numbers() {
        assert_approx(parse_amount("1000"), 1_000.0);
        assert_approx(parse_amount("  4.5"), 4.5);
        assert_approx(parse_amount("-2.25"), -2.25);
        assert_approx(parse_amount("+3"), 3.0);
        assert_approx(parse_amount(".5"), 0.5);
        assert_approx(parse_amount("7."), 7.0);
        assert_approx(parse_amount("1e3"), 1_000.0);
        assert_approx(parse_amount("2.5E-1"), 0.25);
    }

    #[test]
    fn parse_amount_keeps_leading_number_and_drops_the_rest() {
        assert_approx(parse_amount("1200abc"), 1_200.0);
        assert_approx(parse_amount("12.5%"), 12.5);
        assert_approx(parse_amount("3e"), 3.0);
        assert_approx(parse_amount("3e+"), 3.0);
        assert_approx(parse_amount("1.2.3"), 1.2);
    }

    #[test]
    fn parse_amount_coerces_garbage_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("Infinity"), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
        assert!(parse_amount("-0").is_sign_positive());
    }

    #[test]
    fn parse_flag_accepts_checkbox_spellings() {
        for raw in ["true", "on", "1", "YES", " True "] {
            assert!(parse_flag(raw), "{raw} should be set");
        }
        for raw in ["", "false", "off", "0", "monthly"] {
            assert!(!parse_flag(raw), "{raw} should be unset");
        }
    }

    #[test]
    fn raw_value_deserializes_numbers_bools_and_text() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[12.5, 3, true, "4.5", ""]"#).expect("valid json");

        assert_eq!(values[0], RawValue::Number(12.5));
        assert_eq!(values[1], RawValue::Number(3.0));
        assert_eq!(values[2], RawValue::Flag(true));
        assert_eq!(values[3], RawValue::Text("4.5".to_string()));
        assert_approx(values[3].amount(), 4.5);
        assert_eq!(values[4].amount(), 0.0);
        assert!(values[2].flag());
        assert_eq!(values[2].amount(), 0.0);
    }
}
