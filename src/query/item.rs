use serde::{Deserialize, Serialize};

use super::op::{Logic, OperandKind, SearchOp};
use super::value::FilterValue;
use crate::error::QueryError;

/// One filter predicate or one filter group.
///
/// A well-formed node is either a leaf (`field` + `op`, no `children`) or a
/// group (`children`, no `field`/`op`). The struct mirrors the JSON shape, so
/// malformed nodes are representable; [`SearchItem::validate`] rejects them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<SearchOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<FilterValue>,
    /// Group combinator. On a leaf it is only a hint for the enclosing group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SearchItem>,
}

/// Structural classification of a [`SearchItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Group,
    /// Carries both a predicate and children.
    Mixed,
    /// Carries neither.
    Empty,
}

/// Build a leaf predicate. Every argument is stored as given.
pub fn build_item(
    field: impl Into<String>,
    op: SearchOp,
    val: Option<FilterValue>,
    logic: Option<Logic>,
) -> SearchItem {
    SearchItem {
        field: Some(field.into()),
        op: Some(op),
        val,
        logic,
        children: Vec::new(),
    }
}

/// Build a filter group.
///
/// An empty `children` list is accepted here and rejected by validation.
pub fn build_group(logic: Logic, children: Vec<SearchItem>) -> SearchItem {
    SearchItem {
        field: None,
        op: None,
        val: None,
        logic: Some(logic),
        children,
    }
}

impl SearchItem {
    fn leaf(field: impl Into<String>, op: SearchOp, val: Option<FilterValue>) -> Self {
        build_item(field, op, val, None)
    }

    pub fn eq(field: impl Into<String>, val: impl Into<FilterValue>) -> Self {
        Self::leaf(field, SearchOp::Eq, Some(val.into()))
    }

    pub fn ne(field: impl Into<String>, val: impl Into<FilterValue>) -> Self {
        Self::leaf(field, SearchOp::Ne, Some(val.into()))
    }

    pub fn gt(field: impl Into<String>, val: impl Into<FilterValue>) -> Self {
        Self::leaf(field, SearchOp::Gt, Some(val.into()))
    }

    pub fn ge(field: impl Into<String>, val: impl Into<FilterValue>) -> Self {
        Self::leaf(field, SearchOp::Ge, Some(val.into()))
    }

    pub fn lt(field: impl Into<String>, val: impl Into<FilterValue>) -> Self {
        Self::leaf(field, SearchOp::Lt, Some(val.into()))
    }

    pub fn le(field: impl Into<String>, val: impl Into<FilterValue>) -> Self {
        Self::leaf(field, SearchOp::Le, Some(val.into()))
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::leaf(field, SearchOp::Like, Some(FilterValue::from(pattern.into())))
    }

    pub fn not_like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::leaf(field, SearchOp::NotLike, Some(FilterValue::from(pattern.into())))
    }

    pub fn in_set<I, T>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<serde_json::Value>,
    {
        Self::leaf(field, SearchOp::In, Some(FilterValue::set(values)))
    }

    pub fn not_in<I, T>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<serde_json::Value>,
    {
        Self::leaf(field, SearchOp::NotIn, Some(FilterValue::set(values)))
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::leaf(field, SearchOp::IsNull, None)
    }

    pub fn not_null(field: impl Into<String>) -> Self {
        Self::leaf(field, SearchOp::NotNull, None)
    }

    pub fn and(children: Vec<SearchItem>) -> Self {
        build_group(Logic::And, children)
    }

    pub fn or(children: Vec<SearchItem>) -> Self {
        build_group(Logic::Or, children)
    }

    /// Set the logic hint, consuming `self`.
    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn kind(&self) -> NodeKind {
        let has_predicate = self.field.is_some() || self.op.is_some();
        let has_children = !self.children.is_empty();
        match (has_predicate, has_children) {
            (true, false) => NodeKind::Leaf,
            (false, true) => NodeKind::Group,
            (true, true) => NodeKind::Mixed,
            // A bare `logic` still reads as an (empty) group.
            (false, false) if self.logic.is_some() => NodeKind::Group,
            (false, false) => NodeKind::Empty,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == NodeKind::Leaf
    }

    pub fn is_group(&self) -> bool {
        self.kind() == NodeKind::Group
    }

    /// Combinator applied to `children`; AND when unset.
    pub fn group_logic(&self) -> Logic {
        self.logic.unwrap_or_default()
    }

    /// Number of nodes in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SearchItem::node_count).sum::<usize>()
    }

    /// Depth of this tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(SearchItem::depth).max().unwrap_or(0)
    }

    /// Validate this node and its subtree, reporting paths relative to `item`.
    pub fn validate(&self) -> Result<(), QueryError> {
        self.validate_at("item")
    }

    pub(crate) fn validate_at(&self, path: &str) -> Result<(), QueryError> {
        match self.kind() {
            NodeKind::Mixed => Err(QueryError::MixedNode {
                path: path.to_string(),
            }),
            NodeKind::Empty => Err(QueryError::EmptyNode {
                path: path.to_string(),
            }),
            NodeKind::Group => {
                if self.children.is_empty() {
                    return Err(QueryError::EmptyGroup {
                        path: path.to_string(),
                    });
                }
                for (i, child) in self.children.iter().enumerate() {
                    child.validate_at(&format!("{}.children[{}]", path, i))?;
                }
                Ok(())
            }
            NodeKind::Leaf => self.validate_leaf(path),
        }
    }

    fn validate_leaf(&self, path: &str) -> Result<(), QueryError> {
        let field = match self.field.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => f,
            _ => {
                return Err(QueryError::MissingField {
                    path: path.to_string(),
                })
            }
        };
        let op = self.op.ok_or_else(|| QueryError::MissingOperator {
            path: path.to_string(),
            field: field.to_string(),
        })?;

        let mismatch = || QueryError::OperandMismatch {
            path: path.to_string(),
            op,
            expected: op.operand_kind(),
        };

        match op.operand_kind() {
            OperandKind::None => Ok(()),
            OperandKind::Scalar => match &self.val {
                Some(v) if v.is_primitive_scalar() => Ok(()),
                _ => Err(mismatch()),
            },
            OperandKind::Set => match &self.val {
                Some(FilterValue::Set(values)) if values.is_empty() => Err(QueryError::EmptySet {
                    path: path.to_string(),
                    op,
                }),
                Some(FilterValue::Set(_)) => Ok(()),
                _ => Err(mismatch()),
            },
        }
    }
}
