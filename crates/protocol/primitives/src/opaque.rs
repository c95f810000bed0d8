//! Loosely typed values carried through verbatim.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// A chain value whose shape is not fixed by the node API.
///
/// Clients disagree on fields like `chainId`, `condition` and `creates`: some
/// omit them, some send `null`, others a hex string, a number or an object.
/// The value is kept in whichever shape it arrived so that re-serializing the
/// record reproduces the original.
///
/// [`OpaqueValue::Absent`] stands for a field that was not present at all. Struct
/// fields of this type are declared with
/// `#[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]`, so an
/// absent field stays absent and an explicit `null` stays `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpaqueValue {
    /// The field was not present.
    #[default]
    Absent,
    /// An explicit JSON `null`.
    Null,
    /// A JSON string.
    String(String),
    /// A JSON number.
    Number(Number),
    /// Any other shape: booleans, arrays and objects.
    Structured(Value),
}

impl OpaqueValue {
    /// Returns `true` if the field was not present.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for OpaqueValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::String(s),
            Value::Number(n) => Self::Number(n),
            other => Self::Structured(other),
        }
    }
}

impl From<&str> for OpaqueValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl Serialize for OpaqueValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent | Self::Null => serializer.serialize_unit(),
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(n) => n.serialize(serializer),
            Self::Structured(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for OpaqueValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
        field: OpaqueValue,
    }

    #[rstest]
    #[case::null(r#"{"field":null}"#, OpaqueValue::Null)]
    #[case::string(r#"{"field":"0x1"}"#, OpaqueValue::String("0x1".into()))]
    #[case::number(r#"{"field":1}"#, OpaqueValue::Number(1.into()))]
    #[case::object(r#"{"field":{"block":5}}"#, OpaqueValue::Structured(json!({"block": 5})))]
    #[case::boolean(r#"{"field":true}"#, OpaqueValue::Structured(json!(true)))]
    fn test_shape_survives_round_trip(#[case] raw: &str, #[case] expected: OpaqueValue) {
        let holder: Holder = serde_json::from_str(raw).unwrap();
        assert_eq!(holder.field, expected);
        assert_eq!(serde_json::to_string(&holder).unwrap(), raw);
    }

    #[test]
    fn test_absent_field_stays_absent() {
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.field.is_absent());
        assert_eq!(serde_json::to_string(&holder).unwrap(), "{}");
    }

    #[test]
    fn test_null_is_not_absent() {
        let holder: Holder = serde_json::from_str(r#"{"field":null}"#).unwrap();
        assert_eq!(holder.field, OpaqueValue::Null);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(OpaqueValue::from("0x1").as_str(), Some("0x1"));
        assert_eq!(OpaqueValue::Null.as_str(), None);
    }
}
