//! Validation errors for search requests.

use thiserror::Error;

use crate::query::{OperandKind, SearchOp};

/// A search request or filter node that a backend cannot interpret.
///
/// `path` locates the offending node, e.g. `items[0].children[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("pageNumber must be >= 1, got {0}")]
    InvalidPageNumber(u32),

    #[error("pageSize must be >= 1, got {0}")]
    InvalidPageSize(u32),

    #[error("{path}: filter group has no children")]
    EmptyGroup { path: String },

    #[error("{path}: node has both a predicate and children")]
    MixedNode { path: String },

    #[error("{path}: node has neither a predicate nor children")]
    EmptyNode { path: String },

    #[error("{path}: predicate has no field name")]
    MissingField { path: String },

    #[error("{path}: predicate on '{field}' has no operator")]
    MissingOperator { path: String, field: String },

    #[error("{path}: operator '{op}' expects a {expected} operand")]
    OperandMismatch {
        path: String,
        op: SearchOp,
        expected: OperandKind,
    },

    #[error("{path}: operator '{op}' needs at least one value")]
    EmptySet { path: String, op: SearchOp },

    #[error("orders[{index}]: column name is blank")]
    BlankOrderColumn { index: usize },

    #[error("keyword search needs at least one search field")]
    KeywordWithoutFields,
}

impl QueryError {
    /// Path of the offending filter node, if the error concerns one.
    pub fn path(&self) -> Option<&str> {
        match self {
            QueryError::EmptyGroup { path }
            | QueryError::MixedNode { path }
            | QueryError::EmptyNode { path }
            | QueryError::MissingField { path }
            | QueryError::MissingOperator { path, .. }
            | QueryError::OperandMismatch { path, .. }
            | QueryError::EmptySet { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidPageNumber(_) => "QUERY_PAGE_NUMBER",
            QueryError::InvalidPageSize(_) => "QUERY_PAGE_SIZE",
            QueryError::EmptyGroup { .. } => "QUERY_EMPTY_GROUP",
            QueryError::MixedNode { .. } => "QUERY_MIXED_NODE",
            QueryError::EmptyNode { .. } => "QUERY_EMPTY_NODE",
            QueryError::MissingField { .. } => "QUERY_MISSING_FIELD",
            QueryError::MissingOperator { .. } => "QUERY_MISSING_OPERATOR",
            QueryError::OperandMismatch { .. } => "QUERY_OPERAND_MISMATCH",
            QueryError::EmptySet { .. } => "QUERY_EMPTY_SET",
            QueryError::BlankOrderColumn { .. } => "QUERY_BLANK_ORDER",
            QueryError::KeywordWithoutFields => "QUERY_KEYWORD_FIELDS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = QueryError::EmptyGroup {
            path: "items[1].children[0]".to_string(),
        };
        assert_eq!(err.to_string(), "items[1].children[0]: filter group has no children");
        assert_eq!(err.path(), Some("items[1].children[0]"));
    }

    #[test]
    fn test_operand_mismatch_display() {
        let err = QueryError::OperandMismatch {
            path: "items[0]".to_string(),
            op: SearchOp::In,
            expected: OperandKind::Set,
        };
        assert_eq!(err.to_string(), "items[0]: operator 'in' expects a set operand");
    }

    #[test]
    fn test_paging_errors_have_no_path() {
        assert_eq!(QueryError::InvalidPageNumber(0).path(), None);
        assert_eq!(QueryError::InvalidPageSize(0).error_code(), "QUERY_PAGE_SIZE");
    }
}
