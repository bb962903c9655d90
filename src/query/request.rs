use serde::{Deserialize, Serialize};

use super::item::{build_group, SearchItem};
use super::op::Logic;
use super::order::OrderItem;
use crate::error::QueryError;

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A paged, filtered, sorted query against a list endpoint.
///
/// `items` and `keyword`/`search_fields` are two independent filter sources.
/// A conforming backend combines them with AND; see
/// [`SearchRequest::combined_filter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub page_number: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_fields: Vec<String>,
    /// Combinator for a flat `items` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SearchItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<OrderItem>,
}

/// The two ways a request can carry structured filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Top-level predicates combined with one logic.
    Flat { logic: Logic, items: Vec<SearchItem> },
    /// A single root group holding an arbitrary tree.
    Tree { root: SearchItem },
}

impl Filter {
    /// Normalize to one canonical tree. An empty flat list is no filter.
    pub fn into_tree(self) -> Option<SearchItem> {
        match self {
            Filter::Flat { items, .. } if items.is_empty() => None,
            Filter::Flat { logic, items } => Some(build_group(logic, items)),
            Filter::Tree { root } => Some(root),
        }
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl SearchRequest {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
            keyword: None,
            search_fields: Vec::new(),
            logic: None,
            items: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// Search `keyword` as a substring of any of `fields`.
    pub fn with_keyword<I, S>(mut self, keyword: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword = Some(keyword.into());
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn with_item(mut self, item: SearchItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = SearchItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_order(mut self, order: OrderItem) -> Self {
        self.orders.push(order);
        self
    }

    /// Replace the structured filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        match filter {
            Filter::Flat { logic, items } => {
                self.logic = Some(logic);
                self.items = items;
            }
            Filter::Tree { root } => {
                self.logic = None;
                self.items = vec![root];
            }
        }
        self
    }

    /// Read `logic`/`items` as a [`Filter`].
    ///
    /// A single group item with no request-level logic reads as a tree;
    /// anything else is a flat list.
    pub fn filter(&self) -> Option<Filter> {
        match self.items.as_slice() {
            [] => None,
            [root] if self.logic.is_none() && root.is_group() => Some(Filter::Tree {
                root: root.clone(),
            }),
            items => Some(Filter::Flat {
                logic: self.logic.unwrap_or_default(),
                items: items.to_vec(),
            }),
        }
    }

    /// The next page of the same query.
    pub fn next_page(&self) -> Self {
        let mut next = self.clone();
        next.page_number = next.page_number.saturating_add(1);
        next
    }

    /// Number of records skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }

    fn keyword_text(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// OR of `like` predicates, one per search field. A blank keyword is no
    /// filter.
    pub fn keyword_filter(&self) -> Option<SearchItem> {
        let keyword = self.keyword_text()?;
        let fields: Vec<SearchItem> = self
            .search_fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(|f| SearchItem::like(f, keyword))
            .collect();
        if fields.is_empty() {
            return None;
        }
        Some(SearchItem::or(fields))
    }

    /// Structured filter AND keyword filter, as a single tree.
    pub fn combined_filter(&self) -> Option<SearchItem> {
        let structured = self.filter().and_then(Filter::into_tree);
        match (structured, self.keyword_filter()) {
            (Some(tree), Some(keyword)) => Some(SearchItem::and(vec![tree, keyword])),
            (Some(tree), None) => Some(tree),
            (None, keyword) => keyword,
        }
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page_number < 1 {
            return Err(QueryError::InvalidPageNumber(self.page_number));
        }
        if self.page_size < 1 {
            return Err(QueryError::InvalidPageSize(self.page_size));
        }
        if self.keyword_text().is_some() && self.search_fields.iter().all(|f| f.trim().is_empty())
        {
            return Err(QueryError::KeywordWithoutFields);
        }
        for (index, order) in self.orders.iter().enumerate() {
            if order.column.trim().is_empty() {
                return Err(QueryError::BlankOrderColumn { index });
            }
        }
        for (i, item) in self.items.iter().enumerate() {
            item.validate_at(&format!("items[{}]", i))?;
        }
        Ok(())
    }
}
