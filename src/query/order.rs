use serde::{Deserialize, Serialize};

/// One sort key. A list of orders is applied first-to-last as a stable
/// multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderItem {
    pub column: String,
    pub asc: bool,
}

impl OrderItem {
    pub fn new(column: impl Into<String>, asc: bool) -> Self {
        Self {
            column: column.into(),
            asc,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, true)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors() {
        assert!(OrderItem::asc("createTime").asc);
        assert!(!OrderItem::desc("createTime").asc);
    }

    #[test]
    fn test_wire_shape() {
        assert_eq!(
            serde_json::to_value(OrderItem::desc("sort")).unwrap(),
            json!({"column": "sort", "asc": false})
        );
    }
}
