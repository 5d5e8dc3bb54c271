//! Pagination primitives shared by the list operations.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction for list operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Validated page window. Pages are 1-based.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    pub fn new(page: u32, page_size: u32) -> DomainResult<Self> {
        if page < 1 {
            return Err(DomainError::validation("page must be >= 1"));
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(DomainError::validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> usize {
        ((self.page - 1) * self.page_size) as usize
    }

    /// Slice an already-filtered, already-sorted result set into a page.
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect();
        Page {
            items,
            total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// One page of results plus the pre-pagination total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_params() {
        assert!(PageParams::new(0, 10).is_err());
        assert!(PageParams::new(1, 0).is_err());
        assert!(PageParams::new(1, MAX_PAGE_SIZE + 1).is_err());
        assert!(PageParams::new(1, MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn paginates_with_total_preserved() {
        let params = PageParams::new(2, 3).unwrap();
        let page = params.paginate((1..=10).collect::<Vec<_>>());
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 10);
        assert_eq!(page.total_pages(), 4);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let params = PageParams::new(5, 10).unwrap();
        let page = params.paginate(vec![1, 2, 3]);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }
}
