// Numeric coercion for loosely-typed request fields.
// Mirrors the number conversion browsers and Node apply to form values, so a
// client posting `"rating": "8"` stores the number 8.

use mongodb::bson::Bson;
use serde_json::Value;

/// Converts an optional JSON value into a number.
///
/// - numbers pass through
/// - `true`/`false` become 1/0, `null` becomes 0
/// - strings are trimmed; empty means 0; decimal, exponent, `0x`/`0o`/`0b`
///   and `Infinity` forms are accepted
/// - a missing value, arrays, objects and anything unparseable become NaN
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_str(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// Same as [`to_number`] but returns the BSON value to persist.
pub fn to_number_bson(value: Option<&Value>) -> Bson {
    number_bson(to_number(value))
}

/// Integral values inside the 32-bit range are stored as int32, the rest as
/// double. Negative zero stays a double.
pub fn number_bson(n: f64) -> Bson {
    let fits_i32 = n.is_finite()
        && n.fract() == 0.0
        && n >= i32::MIN as f64
        && n <= i32::MAX as f64
        && !(n == 0.0 && n.is_sign_negative());

    if fits_i32 {
        Bson::Int32(n as i32)
    } else {
        Bson::Double(n)
    }
}

fn parse_numeric_str(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        // from_str_radix tolerates a leading '+', which is not a digit here.
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust's float parser also accepts "inf" and "nan"; those are not numbers here.
    let decimal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_chars {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_digits_become_numbers() {
        assert_eq!(to_number(Some(&json!("8"))), 8.0);
        assert_eq!(to_number(Some(&json!("  7.5 "))), 7.5);
        assert_eq!(to_number(Some(&json!("1e3"))), 1000.0);
        assert_eq!(to_number(Some(&json!(".5"))), 0.5);
        assert_eq!(to_number(Some(&json!("-2"))), -2.0);
    }

    #[test]
    fn test_radix_prefixes() {
        assert_eq!(to_number(Some(&json!("0x1A"))), 26.0);
        assert_eq!(to_number(Some(&json!("0o17"))), 15.0);
        assert_eq!(to_number(Some(&json!("0b101"))), 5.0);
        assert!(to_number(Some(&json!("0xZZ"))).is_nan());
    }

    #[test]
    fn test_special_values() {
        assert_eq!(to_number(Some(&json!(""))), 0.0);
        assert_eq!(to_number(Some(&json!("   "))), 0.0);
        assert_eq!(to_number(Some(&Value::Null)), 0.0);
        assert_eq!(to_number(Some(&json!(true))), 1.0);
        assert_eq!(to_number(Some(&json!(false))), 0.0);
        assert_eq!(to_number(Some(&json!("Infinity"))), f64::INFINITY);
        assert_eq!(to_number(Some(&json!("-Infinity"))), f64::NEG_INFINITY);
    }

    #[test]
    fn test_not_a_number() {
        assert!(to_number(None).is_nan());
        assert!(to_number(Some(&json!("eight"))).is_nan());
        assert!(to_number(Some(&json!("inf"))).is_nan());
        assert!(to_number(Some(&json!("nan"))).is_nan());
        assert!(to_number(Some(&json!("8 stars"))).is_nan());
        assert!(to_number(Some(&json!({"a": 1}))).is_nan());
        assert!(to_number(Some(&json!([1, 2]))).is_nan());
    }

    #[test]
    fn test_multibyte_strings_are_not_numbers() {
        assert!(to_number(Some(&json!("€5"))).is_nan());
        assert!(to_number(Some(&json!("日本"))).is_nan());
        assert!(to_number(Some(&json!("5€"))).is_nan());
        assert!(to_number(Some(&json!("é"))).is_nan());
    }

    #[test]
    fn test_radix_prefix_without_digits() {
        assert!(to_number(Some(&json!("0x"))).is_nan());
        assert!(to_number(Some(&json!("0x+1"))).is_nan());
    }

    #[test]
    fn test_bson_representation() {
        assert_eq!(to_number_bson(Some(&json!("8"))), Bson::Int32(8));
        assert_eq!(to_number_bson(Some(&json!(9.5))), Bson::Double(9.5));
        assert_eq!(number_bson(3_000_000_000.0), Bson::Double(3_000_000_000.0));
        assert_eq!(number_bson(-0.0), Bson::Double(-0.0));
        assert!(matches!(to_number_bson(None), Bson::Double(f) if f.is_nan()));
    }
}
