//! Page and sort types shared by all paged queries

use serde::{Deserialize, Serialize};

/// Default page size when a request does not specify one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sort direction for a single sort field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A single field + direction pair in a sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Page index/size plus an ordered list of sort fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: usize,
    /// Number of items per page
    pub size: usize,
    /// Sort fields, applied in order; empty means the query's default sort
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Row offset of the first item on this page
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

/// One page of results plus total-count metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based index of this page
    pub page: usize,
    /// Requested page size (the last page may hold fewer items)
    pub size: usize,
    /// Total matching rows across all pages
    pub total_elements: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// An empty page for the given request
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Total page count, rounding up; 0 when there are no matches
    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
    }

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert!(request.sort.is_empty());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(0, 10);
        let page = Page::new(vec![1, 2, 3], &request, 21);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_total_pages_exact() {
        let request = PageRequest::new(0, 10);
        let page = Page::new(vec![0; 10], &request, 20);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_empty_page() {
        let request = PageRequest::new(2, 10);
        let page: Page<i32> = Page::empty(&request);
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn test_sort_order_helpers() {
        let order = SortOrder::desc("created");
        assert_eq!(order.field, "created");
        assert_eq!(order.direction, SortDirection::Desc);
        assert_eq!(order.direction.as_sql(), "DESC");
        assert_eq!(SortOrder::asc("name").direction.as_sql(), "ASC");
    }
}
