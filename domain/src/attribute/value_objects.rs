//! Attribute value objects

use serde::{Deserialize, Serialize};

/// Kind of an attribute, fixed when the dataset is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Yes/no flag ("Is it alive?")
    Boolean,
    /// Numeric rating compared against a threshold ("Is it bigger than a cat?")
    #[serde(rename = "scale", alias = "scalar")]
    Scalar,
}

impl AttributeKind {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeKind::Boolean => "boolean",
            AttributeKind::Scalar => "scale",
        }
    }

    /// Convert a raw rating into a typed value for this kind.
    ///
    /// Booleans accept `true`/`false` and the numbers `1`/`0`.
    /// Scalars accept finite numbers, including numeric strings.
    pub fn coerce(&self, raw: &RawRating) -> Result<AttributeValue, String> {
        match (self, raw) {
            (AttributeKind::Boolean, RawRating::Flag(b)) => Ok(AttributeValue::Flag(*b)),
            (AttributeKind::Boolean, RawRating::Number(n)) if *n == 1.0 => {
                Ok(AttributeValue::Flag(true))
            }
            (AttributeKind::Boolean, RawRating::Number(n)) if *n == 0.0 => {
                Ok(AttributeValue::Flag(false))
            }
            (AttributeKind::Boolean, RawRating::Text(text)) => match text.trim() {
                "1" | "true" => Ok(AttributeValue::Flag(true)),
                "0" | "false" => Ok(AttributeValue::Flag(false)),
                _ => Err(format!("expected a boolean flag, got {:?}", text)),
            },
            (AttributeKind::Boolean, RawRating::Number(n)) => {
                Err(format!("expected a boolean flag (0 or 1), got {}", n))
            }
            (AttributeKind::Scalar, RawRating::Flag(b)) => {
                Err(format!("expected a numeric rating, got {}", b))
            }
            (AttributeKind::Scalar, raw) => match raw.as_number() {
                Some(n) if n.is_finite() => Ok(AttributeValue::Rating(n)),
                Some(n) => Err(format!("rating must be finite, got {}", n)),
                None => Err(format!("expected a numeric rating, got {}", raw)),
            },
        }
    }

    /// Infer the kind of an attribute from every value recorded for it.
    ///
    /// All flags make a boolean attribute, all numbers a scalar one.
    /// Mixed or non-numeric text values cannot be classified.
    pub fn infer<'a>(ratings: impl IntoIterator<Item = &'a RawRating>) -> Result<Self, String> {
        let mut kind = None;
        for raw in ratings {
            let this = match raw {
                RawRating::Flag(_) => AttributeKind::Boolean,
                RawRating::Number(_) => AttributeKind::Scalar,
                RawRating::Text(_) if raw.as_number().is_some() => AttributeKind::Scalar,
                RawRating::Text(text) => {
                    return Err(format!("cannot classify non-numeric value {:?}", text));
                }
            };
            match kind {
                None => kind = Some(this),
                Some(k) if k != this => {
                    return Err("mixes boolean flags and numeric ratings".to_string());
                }
                Some(_) => {}
            }
        }
        kind.ok_or_else(|| "has no recorded values".to_string())
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boolean" | "bool" | "binary" => Ok(AttributeKind::Boolean),
            "scale" | "scalar" | "continuous" => Ok(AttributeKind::Scalar),
            other => Err(format!("unknown attribute kind: {}", other)),
        }
    }
}

/// A named attribute with its kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Boolean)
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Scalar)
    }
}

/// A typed value recorded for an entity.
///
/// Comparisons are by value: `Flag(true) == Flag(true)` regardless of
/// where either flag came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Rating(f64),
}

impl AttributeValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            AttributeValue::Rating(_) => None,
        }
    }

    pub fn as_rating(&self) -> Option<f64> {
        match self {
            AttributeValue::Rating(n) => Some(*n),
            AttributeValue::Flag(_) => None,
        }
    }
}

/// An untyped rating as it appears in the ingested data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl RawRating {
    /// Numeric view of this rating; numeric text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawRating::Number(n) => Some(*n),
            RawRating::Text(text) => text.trim().parse().ok(),
            RawRating::Flag(_) => None,
        }
    }
}

impl std::fmt::Display for RawRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawRating::Flag(b) => write!(f, "{}", b),
            RawRating::Number(n) => write!(f, "{}", n),
            RawRating::Text(text) => write!(f, "{:?}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_accepts_flags_and_zero_one() {
        let kind = AttributeKind::Boolean;
        assert_eq!(
            kind.coerce(&RawRating::Flag(true)),
            Ok(AttributeValue::Flag(true))
        );
        assert_eq!(
            kind.coerce(&RawRating::Number(0.0)),
            Ok(AttributeValue::Flag(false))
        );
        assert_eq!(
            kind.coerce(&RawRating::Text(" 1 ".to_string())),
            Ok(AttributeValue::Flag(true))
        );
        assert!(kind.coerce(&RawRating::Number(3.0)).is_err());
    }

    #[test]
    fn test_scalar_rejects_flags_and_words() {
        let kind = AttributeKind::Scalar;
        assert_eq!(
            kind.coerce(&RawRating::Number(7.0)),
            Ok(AttributeValue::Rating(7.0))
        );
        assert_eq!(
            kind.coerce(&RawRating::Text("4.5".to_string())),
            Ok(AttributeValue::Rating(4.5))
        );
        assert!(kind.coerce(&RawRating::Flag(true)).is_err());
        assert!(kind.coerce(&RawRating::Text("big".to_string())).is_err());
        assert!(kind.coerce(&RawRating::Number(f64::NAN)).is_err());
    }

    #[test]
    fn test_flag_equality_is_by_value() {
        let a = AttributeValue::Flag(true);
        let b = AttributeKind::Boolean
            .coerce(&RawRating::Number(1.0))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_infer_kind() {
        let flags = [RawRating::Flag(true), RawRating::Flag(false)];
        assert_eq!(AttributeKind::infer(&flags), Ok(AttributeKind::Boolean));

        let numbers = [RawRating::Number(1.0), RawRating::Text("8".to_string())];
        assert_eq!(AttributeKind::infer(&numbers), Ok(AttributeKind::Scalar));

        let mixed = [RawRating::Flag(true), RawRating::Number(3.0)];
        assert!(AttributeKind::infer(&mixed).is_err());

        assert!(AttributeKind::infer(std::iter::empty()).is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("scale".parse(), Ok(AttributeKind::Scalar));
        assert_eq!("Boolean".parse(), Ok(AttributeKind::Boolean));
        assert!("colour".parse::<AttributeKind>().is_err());
    }

    #[test]
    fn test_kind_deserializes_scale_alias() {
        let kind: AttributeKind = serde_json::from_str("\"scale\"").unwrap();
        assert_eq!(kind, AttributeKind::Scalar);
    }
}
