//! Structured filter, sort and paging requests for list endpoints.
//!
//! A [`SearchRequest`] carries page coordinates, an optional keyword search
//! and a filter tree of [`SearchItem`] nodes. The wire shape is the backend's
//! camelCase JSON; everything here serializes to it directly.
//!
//! ```
//! use console_client::query::{OrderItem, SearchItem, SearchRequest};
//!
//! let req = SearchRequest::new(1, 10)
//!     .with_item(SearchItem::or(vec![
//!         SearchItem::eq("status", 1),
//!         SearchItem::is_null("deptId"),
//!     ]))
//!     .with_keyword("adm", ["username", "nickname"])
//!     .with_order(OrderItem::desc("createTime"));
//! assert!(req.validate().is_ok());
//! ```

mod eval;
mod item;
mod op;
mod order;
mod page;
mod request;
mod value;

pub use eval::sort_records;
pub use item::{build_group, build_item, NodeKind, SearchItem};
pub use op::{Logic, OperandKind, SearchOp};
pub use order::OrderItem;
pub use page::PageResult;
pub use request::{Filter, SearchRequest, DEFAULT_PAGE_SIZE};
pub use value::FilterValue;
