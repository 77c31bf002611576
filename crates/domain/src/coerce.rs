//! Coercion policy for untrusted JSON values
//!
//! The sheet's historical data was written by loosely-typed code, so the
//! validators and sanitizer share one explicit policy here instead of
//! scattering ad-hoc casts: dots and XP must be integers (integral floats
//! like `4.0` count, `2.5` does not), and stress boxes coerce by JSON
//! truthiness.

use serde_json::Value;

/// Read a JSON value as an integer.
///
/// Accepts integer numbers and integral finite floats; everything else
/// (fractional numbers, strings, booleans, containers, null) is `None`.
pub(crate) fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| {
                f.is_finite()
                    && f.fract() == 0.0
                    && *f >= i64::MIN as f64
                    && *f <= i64::MAX as f64
            })
            .map(|f| f as i64)
    })
}

/// JSON truthiness: `false`, `0`, `""`, and `null` are false, everything
/// else (including non-empty strings and containers) is true.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_accepts_integers_and_integral_floats() {
        assert_eq!(integral(&json!(4)), Some(4));
        assert_eq!(integral(&json!(-3)), Some(-3));
        assert_eq!(integral(&json!(4.0)), Some(4));
    }

    #[test]
    fn integral_rejects_everything_else() {
        assert_eq!(integral(&json!(2.5)), None);
        assert_eq!(integral(&json!("4")), None);
        assert_eq!(integral(&json!(true)), None);
        assert_eq!(integral(&json!(null)), None);
        assert_eq!(integral(&json!([4])), None);
    }

    #[test]
    fn truthiness_follows_json_emptiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("invalid")));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
    }
}
