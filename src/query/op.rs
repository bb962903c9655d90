use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter operator.
///
/// The wire names (`eq`, `notlike`, `isnull`, ...) are shared with the
/// backend and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOp {
    Eq,      // equal
    Ne,      // not equal
    Gt,      // greater than
    Ge,      // greater or equal
    Lt,      // less than
    Le,      // less or equal
    Like,    // substring
    NotLike, // substring absent
    In,      // in set
    NotIn,   // not in set
    IsNull,  // null or missing
    NotNull, // present
}

/// Shape of the operand an operator expects in `val`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// A single JSON primitive.
    Scalar,
    /// A list of JSON primitives.
    Set,
    /// No operand; `val` is ignored.
    None,
}

impl SearchOp {
    pub const ALL: [SearchOp; 12] = [
        SearchOp::Eq,
        SearchOp::Ne,
        SearchOp::Gt,
        SearchOp::Ge,
        SearchOp::Lt,
        SearchOp::Le,
        SearchOp::Like,
        SearchOp::NotLike,
        SearchOp::In,
        SearchOp::NotIn,
        SearchOp::IsNull,
        SearchOp::NotNull,
    ];

    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOp::Eq => "eq",
            SearchOp::Ne => "ne",
            SearchOp::Gt => "gt",
            SearchOp::Ge => "ge",
            SearchOp::Lt => "lt",
            SearchOp::Le => "le",
            SearchOp::Like => "like",
            SearchOp::NotLike => "notlike",
            SearchOp::In => "in",
            SearchOp::NotIn => "notin",
            SearchOp::IsNull => "isnull",
            SearchOp::NotNull => "notnull",
        }
    }

    pub fn operand_kind(&self) -> OperandKind {
        match self {
            SearchOp::In | SearchOp::NotIn => OperandKind::Set,
            SearchOp::IsNull | SearchOp::NotNull => OperandKind::None,
            _ => OperandKind::Scalar,
        }
    }
}

impl fmt::Display for SearchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchOp::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown search operator: {}", s))
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperandKind::Scalar => "scalar",
            OperandKind::Set => "set",
            OperandKind::None => "empty",
        };
        f.write_str(name)
    }
}

/// Boolean combinator for filter groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::And => f.write_str("AND"),
            Logic::Or => f.write_str("OR"),
        }
    }
}
