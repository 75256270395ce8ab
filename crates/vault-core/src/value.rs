//! Scalar field values and their canonical comparison form

use serde::{Deserialize, Serialize};

/// A scalar field value with type detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    Text(String),
    /// Empty/null field
    Empty,
}

impl Value {
    /// Parse a stored string into a Value, detecting the type
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Value::Empty;
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }

        Value::Text(trimmed.to_string())
    }

    /// Build a text value, mapping blank strings to Empty
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            Value::Empty
        } else {
            Value::Text(s)
        }
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Float(f) => f.is_nan(),
            Value::Integer(_) => false,
        }
    }

    /// Canonical string used for key derivation.
    ///
    /// Blank and NaN values become `""`. Anything that reads as a number
    /// is rounded to one decimal place and written as an integer literal
    /// when that leaves no fractional part. Remaining text is trimmed.
    /// `20`, `"20"`, `"20.0"`, `20.0` and `19.96` all normalize to `"20"`.
    pub fn normalize(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => normalize_number(*f),
            Value::Text(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(n) if !trimmed.is_empty() => normalize_number(n),
                    _ => trimmed.to_string(),
                }
            }
        }
    }

    /// Convert to the string written into snapshot files
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Float(f) if f.is_nan() => String::new(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Empty => String::new(),
        }
    }
}

fn normalize_number(n: f64) -> String {
    if n.is_nan() {
        return String::new();
    }
    if n.is_infinite() {
        return n.to_string();
    }
    let scaled = n * 10.0;
    let rounded = if scaled.is_finite() { scaled.round() / 10.0 } else { n };
    if rounded == 0.0 {
        // also folds -0.0 and tiny negatives
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detects_types() {
        assert_eq!(Value::parse("42"), Value::Integer(42));
        assert_eq!(Value::parse("-2.5"), Value::Float(-2.5));
        assert_eq!(Value::parse(" Crit DMG "), Value::Text("Crit DMG".to_string()));
        assert_eq!(Value::parse("   "), Value::Empty);
        assert_eq!(Value::parse("NaN"), Value::Text("NaN".to_string()));
    }

    #[test]
    fn test_normalize_integral_forms_agree() {
        let forms = [
            Value::Integer(20),
            Value::Float(20.0),
            Value::Text("20".to_string()),
            Value::Text("20.0".to_string()),
            Value::Text(" 20 ".to_string()),
        ];
        for v in &forms {
            assert_eq!(v.normalize(), "20", "{:?}", v);
        }
    }

    #[test]
    fn test_normalize_rounds_to_one_decimal() {
        assert_eq!(Value::Float(62.19999).normalize(), "62.2");
        assert_eq!(Value::Text("3.14".to_string()).normalize(), "3.1");
        assert_eq!(Value::Float(-2.5).normalize(), "-2.5");
    }

    #[test]
    fn test_normalize_rounding_to_whole_number_matches_integer() {
        assert_eq!(Value::Float(19.96).normalize(), Value::Integer(20).normalize());
        assert_eq!(Value::Text("20.04".to_string()).normalize(), "20");
        assert_eq!(Value::Float(-0.04).normalize(), "0");
        assert_eq!(Value::Float(19.94).normalize(), "19.9");
    }

    #[test]
    fn test_normalize_blank_and_nan() {
        assert_eq!(Value::Empty.normalize(), "");
        assert_eq!(Value::Text("  ".to_string()).normalize(), "");
        assert_eq!(Value::Float(f64::NAN).normalize(), "");
        assert_eq!(Value::Text("NaN".to_string()).normalize(), "");
    }

    #[test]
    fn test_normalize_trims_text() {
        assert_eq!(Value::Text("  Amber ".to_string()).normalize(), "Amber");
        assert_eq!(Value::Text("Crit Rate".to_string()).normalize(), "Crit Rate");
    }

    #[test]
    fn test_text_constructor_maps_blank_to_empty() {
        assert_eq!(Value::text(""), Value::Empty);
        assert_eq!(Value::text("Flower"), Value::Text("Flower".to_string()));
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Empty.is_empty());
        assert!(Value::Float(f64::NAN).is_empty());
        assert!(!Value::Integer(0).is_empty());
    }
}
