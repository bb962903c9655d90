use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::op::OperandKind;

/// Operand of a leaf predicate.
///
/// Serialized untagged: a JSON array is a [`FilterValue::Set`], anything else
/// a [`FilterValue::Scalar`]. A missing `val` is represented by `None` at the
/// `SearchItem` level, never by a variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Set(Vec<Value>),
    Scalar(Value),
}

impl FilterValue {
    pub fn scalar(value: impl Into<Value>) -> Self {
        FilterValue::Scalar(value.into())
    }

    pub fn set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        FilterValue::Set(values.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> OperandKind {
        match self {
            FilterValue::Set(_) => OperandKind::Set,
            FilterValue::Scalar(_) => OperandKind::Scalar,
        }
    }

    /// A scalar holding a JSON primitive (string, number, bool).
    pub fn is_primitive_scalar(&self) -> bool {
        matches!(
            self,
            FilterValue::Scalar(Value::String(_) | Value::Number(_) | Value::Bool(_))
        )
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FilterValue::Scalar(v) => Some(v),
            FilterValue::Set(_) => None,
        }
    }

    pub fn as_set(&self) -> Option<&[Value]> {
        match self {
            FilterValue::Set(values) => Some(values),
            FilterValue::Scalar(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::set(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_deserialize() {
        let set: FilterValue = serde_json::from_value(json!(["1", "2"])).unwrap();
        assert_eq!(set, FilterValue::set(["1", "2"]));

        let scalar: FilterValue = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(scalar, FilterValue::scalar(42));

        let text: FilterValue = serde_json::from_value(json!("admin")).unwrap();
        assert_eq!(text, FilterValue::from("admin"));
    }

    #[test]
    fn test_serialize_is_transparent() {
        assert_eq!(serde_json::to_value(FilterValue::from(vec![1, 2])).unwrap(), json!([1, 2]));
        assert_eq!(serde_json::to_value(FilterValue::from(true)).unwrap(), json!(true));
    }

    #[test]
    fn test_primitive_scalar() {
        assert!(FilterValue::from("x").is_primitive_scalar());
        assert!(FilterValue::from(1.5).is_primitive_scalar());
        assert!(!FilterValue::Scalar(json!({"a": 1})).is_primitive_scalar());
        assert!(!FilterValue::Scalar(Value::Null).is_primitive_scalar());
        assert!(!FilterValue::set([1]).is_primitive_scalar());
    }

    #[test]
    fn test_accessors() {
        let set = FilterValue::set(["a"]);
        assert_eq!(set.kind(), OperandKind::Set);
        assert_eq!(set.as_set().map(<[Value]>::len), Some(1));
        assert!(set.as_scalar().is_none());
    }
}
