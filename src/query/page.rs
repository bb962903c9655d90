use serde::{Deserialize, Serialize};

/// One page of records as returned by a paged query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub page_number: u32,
    pub page_size: u32,
    pub total_row: u64,
    /// Some endpoints omit it; see [`PageResult::total_pages`].
    #[serde(default)]
    pub total_page: u64,
    pub records: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn new(page_number: u32, page_size: u32, total_row: u64, records: Vec<T>) -> Self {
        let mut page = Self {
            page_number,
            page_size,
            total_row,
            total_page: 0,
            records,
        };
        page.total_page = page.total_pages();
        page
    }

    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self::new(page_number, page_size, 0, Vec::new())
    }

    /// Page count derived from `total_row` and `page_size`.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_row.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page_number) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            page_number: self.page_number,
            page_size: self.page_size,
            total_row: self.total_row,
            total_page: self.total_page,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_pages() {
        let page = PageResult::new(1, 10, 25, vec![0; 10]);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_page, 3);
        assert!(page.has_next());
        assert!(!page.has_prev());

        let last = PageResult::new(3, 10, 25, vec![0; 5]);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn test_empty_page() {
        let page: PageResult<u8> = PageResult::empty(1, 20);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(page.is_empty());
    }

    #[test]
    fn test_deserialize_without_total_page() {
        let page: PageResult<String> = serde_json::from_value(json!({
            "pageNumber": 2,
            "pageSize": 5,
            "totalRow": 11,
            "records": ["a", "b", "c", "d", "e"]
        }))
        .unwrap();
        assert_eq!(page.total_page, 0);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_map() {
        let page = PageResult::new(1, 2, 2, vec![1, 2]).map(|n| n * 10);
        assert_eq!(page.records, vec![10, 20]);
        assert_eq!(page.total_row, 2);
    }
}
