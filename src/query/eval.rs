//! In-memory evaluation of the query model over JSON records.
//!
//! This is the reference reading of the operator contract: what a conforming
//! backend returns for a given [`SearchRequest`].

use serde_json::{Number, Value};
use std::cmp::Ordering;

use super::item::SearchItem;
use super::op::{Logic, SearchOp};
use super::order::OrderItem;
use super::page::PageResult;
use super::request::SearchRequest;
use super::value::FilterValue;
use crate::error::QueryError;

/// Resolve `field` in `record`. A literal key wins over a dotted path.
fn lookup<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    if let Some(value) = record.get(field) {
        return Some(value);
    }
    if !field.contains('.') {
        return None;
    }
    field
        .split('.')
        .try_fold(record, |current, segment| current.get(segment))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Integers compare exactly; f64 only when either side is a float.
fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    match (a.as_i64(), b.as_i64(), a.as_u64(), b.as_u64()) {
        (Some(x), Some(y), _, _) => Some(x.cmp(&y)),
        (_, _, Some(x), Some(y)) => Some(x.cmp(&y)),
        // one side above i64::MAX, the other negative
        (Some(_), None, _, Some(_)) => Some(Ordering::Less),
        (None, Some(_), Some(_), _) => Some(Ordering::Greater),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// Ordering between two primitives of the same JSON type.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn equals(left: &Value, right: &Value) -> bool {
    compare(left, right) == Some(Ordering::Equal)
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(_) => 4,
    }
}

/// Total order used for sorting: null and missing first, then by type, then
/// by value.
fn sort_cmp(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    let by_rank = type_rank(left).cmp(&type_rank(right));
    if by_rank != Ordering::Equal {
        return by_rank;
    }
    match (left, right) {
        (Some(a), Some(b)) => compare(a, b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn evaluate(op: SearchOp, actual: Option<&Value>, operand: Option<&FilterValue>) -> bool {
    let actual = present(actual);
    let scalar = operand.and_then(FilterValue::as_scalar);
    let set = operand.and_then(FilterValue::as_set).unwrap_or(&[]);

    let ordered = |accept: fn(Ordering) -> bool| match (actual, scalar) {
        (Some(a), Some(b)) => compare(a, b).map_or(false, accept),
        _ => false,
    };

    match op {
        SearchOp::Eq => ordered(|o| o == Ordering::Equal),
        SearchOp::Ne => match (actual, scalar) {
            (Some(a), Some(b)) => !equals(a, b),
            _ => false,
        },
        SearchOp::Gt => ordered(|o| o == Ordering::Greater),
        SearchOp::Ge => ordered(|o| o != Ordering::Less),
        SearchOp::Lt => ordered(|o| o == Ordering::Less),
        SearchOp::Le => ordered(|o| o != Ordering::Greater),
        SearchOp::Like | SearchOp::NotLike => {
            let (Some(Value::String(text)), Some(Value::String(pattern))) = (actual, scalar) else {
                return false;
            };
            text.contains(pattern.as_str()) == (op == SearchOp::Like)
        }
        SearchOp::In => actual.map_or(false, |a| set.iter().any(|v| equals(a, v))),
        SearchOp::NotIn => actual.map_or(false, |a| !set.iter().any(|v| equals(a, v))),
        SearchOp::IsNull => actual.is_none(),
        SearchOp::NotNull => actual.is_some(),
    }
}

impl SearchItem {
    /// Test `record` against this node.
    ///
    /// Groups combine children with their logic (AND when unset). A leaf
    /// without a field or operator matches nothing; a node with neither
    /// children nor predicate matches everything.
    pub fn matches(&self, record: &Value) -> bool {
        if !self.children.is_empty() {
            return match self.group_logic() {
                Logic::And => self.children.iter().all(|c| c.matches(record)),
                Logic::Or => self.children.iter().any(|c| c.matches(record)),
            };
        }
        match (self.field.as_deref(), self.op) {
            (Some(field), Some(op)) => evaluate(op, lookup(record, field.trim()), self.val.as_ref()),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Stable multi-key sort; the first order is the primary key.
pub fn sort_records(records: &mut [Value], orders: &[OrderItem]) {
    if orders.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        orders
            .iter()
            .map(|order| {
                let ord = sort_cmp(lookup(a, &order.column), lookup(b, &order.column));
                if order.asc {
                    ord
                } else {
                    ord.reverse()
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

impl SearchRequest {
    /// Run this request over `records`: validate, filter, sort, paginate.
    pub fn apply<I>(&self, records: I) -> Result<PageResult<Value>, QueryError>
    where
        I: IntoIterator<Item = Value>,
    {
        self.validate()?;

        let filter = self.combined_filter();
        let mut matched: Vec<Value> = records
            .into_iter()
            .filter(|r| filter.as_ref().map_or(true, |f| f.matches(r)))
            .collect();
        sort_records(&mut matched, &self.orders);

        let total_row = matched.len() as u64;
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let page: Vec<Value> = matched
            .into_iter()
            .skip(offset)
            .take(self.page_size as usize)
            .collect();

        Ok(PageResult::new(self.page_number, self.page_size, total_row, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> Vec<Value> {
        vec![
            json!({"id": 1, "username": "admin", "status": 1, "dept": {"name": "Ops"}, "sort": 2}),
            json!({"id": 2, "username": "alice", "status": 0, "dept": {"name": "Dev"}, "sort": 1}),
            json!({"id": 3, "username": "bob", "status": 1, "dept": null, "sort": 1}),
            json!({"id": 4, "username": "Administrator", "status": 1, "sort": null}),
        ]
    }

    fn ids(records: &[Value]) -> Vec<i64> {
        records.iter().filter_map(|r| r["id"].as_i64()).collect()
    }

    fn select(item: &SearchItem) -> Vec<i64> {
        let matched: Vec<Value> = users().into_iter().filter(|r| item.matches(r)).collect();
        ids(&matched)
    }

    #[test]
    fn test_ordered_ops() {
        assert_eq!(select(&SearchItem::eq("status", 1)), vec![1, 3, 4]);
        assert_eq!(select(&SearchItem::ne("status", 1)), vec![2]);
        assert_eq!(select(&SearchItem::gt("id", 2)), vec![3, 4]);
        assert_eq!(select(&SearchItem::ge("id", 2)), vec![2, 3, 4]);
        assert_eq!(select(&SearchItem::lt("id", 2)), vec![1]);
        assert_eq!(select(&SearchItem::le("id", 2)), vec![1, 2]);
        assert_eq!(select(&SearchItem::gt("username", "b")), vec![3]);
    }

    #[test]
    fn test_mismatched_types_never_match() {
        assert!(select(&SearchItem::eq("status", "1")).is_empty());
        assert!(select(&SearchItem::gt("username", 0)).is_empty());
        assert!(select(&SearchItem::ne("missing", 1)).is_empty());
    }

    #[test]
    fn test_large_integer_ids_compare_exactly() {
        let low = 9_007_199_254_740_992i64;
        let record = json!({"id": 9_007_199_254_740_993u64});
        assert!(!SearchItem::eq("id", low).matches(&record));
        assert!(SearchItem::ne("id", low).matches(&record));
        assert!(SearchItem::gt("id", low).matches(&record));
        assert!(!SearchItem::in_set("id", vec![low]).matches(&record));
        assert!(SearchItem::not_in("id", vec![low]).matches(&record));

        let mut records = vec![
            json!({"id": 9_007_199_254_740_993u64}),
            json!({"id": low}),
        ];
        sort_records(&mut records, &[OrderItem::asc("id")]);
        assert_eq!(records[0]["id"], json!(low));

        assert!(SearchItem::gt("id", -1).matches(&json!({"id": u64::MAX})));
        assert!(SearchItem::lt("id", 1.5).matches(&json!({"id": 1})));
    }

    #[test]
    fn test_like_is_case_sensitive() {
        assert_eq!(select(&SearchItem::like("username", "dmin")), vec![1, 4]);
        assert_eq!(select(&SearchItem::like("username", "Adm")), vec![4]);
        assert_eq!(select(&SearchItem::not_like("username", "dmin")), vec![2, 3]);
        assert!(select(&SearchItem::like("status", "1")).is_empty());
    }

    #[test]
    fn test_set_ops() {
        assert_eq!(select(&SearchItem::in_set("id", [2, 4])), vec![2, 4]);
        assert_eq!(select(&SearchItem::not_in("id", [2, 4])), vec![1, 3]);
    }

    #[test]
    fn test_null_ops_and_dotted_paths() {
        assert_eq!(select(&SearchItem::is_null("dept")), vec![3, 4]);
        assert_eq!(select(&SearchItem::not_null("dept")), vec![1, 2]);
        assert_eq!(select(&SearchItem::eq("dept.name", "Dev")), vec![2]);
        assert_eq!(select(&SearchItem::is_null("dept.name")), vec![3, 4]);
    }

    #[test]
    fn test_groups() {
        let tree = SearchItem::and(vec![
            SearchItem::eq("status", 1),
            SearchItem::or(vec![
                SearchItem::like("username", "adm"),
                SearchItem::eq("id", 3),
            ]),
        ]);
        assert_eq!(select(&tree), vec![1, 3]);

        let mut no_logic = SearchItem::or(vec![SearchItem::eq("id", 1), SearchItem::eq("id", 2)]);
        no_logic.logic = None;
        assert!(select(&no_logic).is_empty());
    }

    #[test]
    fn test_sort_multi_key_stable() {
        let mut records = users();
        sort_records(
            &mut records,
            &[OrderItem::asc("sort"), OrderItem::desc("id")],
        );
        assert_eq!(ids(&records), vec![4, 3, 2, 1]);

        let mut records = users();
        sort_records(&mut records, &[OrderItem::desc("sort")]);
        assert_eq!(ids(&records), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_apply_paginates() {
        let req = SearchRequest::new(2, 2)
            .with_item(SearchItem::eq("status", 1))
            .with_order(OrderItem::asc("id"));
        let page = req.apply(users()).unwrap();
        assert_eq!(page.total_row, 3);
        assert_eq!(page.total_page, 2);
        assert_eq!(ids(&page.records), vec![4]);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_apply_combines_keyword_and_items() {
        let req = SearchRequest::default()
            .with_item(SearchItem::eq("status", 1))
            .with_keyword("b", ["username"]);
        let page = req.apply(users()).unwrap();
        assert_eq!(ids(&page.records), vec![3]);
    }

    #[test]
    fn test_apply_rejects_invalid_request() {
        let req = SearchRequest::default().with_item(SearchItem::and(vec![]));
        assert!(matches!(req.apply(users()), Err(QueryError::EmptyGroup { .. })));
    }

    #[test]
    fn test_apply_past_last_page() {
        let page = SearchRequest::new(9, 20).apply(users()).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_row, 4);
    }
}
