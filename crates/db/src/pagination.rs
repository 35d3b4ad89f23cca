//! Offset pagination shared by every list endpoint.

/// Fixed page size of the product listing.
pub const PER_PAGE: u64 = 12;

/// A resolved, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Page 0 resolves to page 1; a zero page size resolves to [`PER_PAGE`].
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: if per_page == 0 { PER_PAGE } else { per_page },
        }
    }

    /// Resolve a raw `?page=` value the way the listing endpoint accepts it:
    /// anything missing, non-numeric, or below 1 means the first page.
    pub fn from_query(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .map(|page| page as u64)
            .unwrap_or(1);
        Self::new(page, PER_PAGE)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, PER_PAGE)
    }
}

/// One slice of a collection plus the metadata needed to walk it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let last_page = total.div_ceil(request.per_page()).max(1);
        Self {
            items,
            current_page: request.page(),
            last_page,
            per_page: request.per_page(),
            total,
        }
    }

    /// 1-based position of the first item on this page, if any.
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.current_page - 1) * self.per_page + 1)
        }
    }

    /// 1-based position of the last item on this page, if any.
    pub fn to(&self) -> Option<u64> {
        self.from().map(|from| from + self.items.len() as u64 - 1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_below_one_or_garbage_mean_first_page() {
        assert_eq!(PageRequest::from_query(None).page(), 1);
        assert_eq!(PageRequest::from_query(Some("0")).page(), 1);
        assert_eq!(PageRequest::from_query(Some("-3")).page(), 1);
        assert_eq!(PageRequest::from_query(Some("two")).page(), 1);
        assert_eq!(PageRequest::from_query(Some(" 3 ")).page(), 3);
        assert_eq!(PageRequest::from_query(Some("3")).per_page(), PER_PAGE);
    }

    #[test]
    fn offset_follows_page_number() {
        assert_eq!(PageRequest::new(1, 12).offset(), 0);
        assert_eq!(PageRequest::new(2, 12).offset(), 12);
        assert_eq!(PageRequest::new(5, 10).offset(), 40);
    }

    #[test]
    fn metadata_for_a_partial_last_page() {
        let page = Page::new(vec!['m'], PageRequest::new(2, 12), 13);
        assert_eq!(page.last_page, 2);
        assert_eq!(page.from(), Some(13));
        assert_eq!(page.to(), Some(13));
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let page: Page<u8> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.from(), None);
        assert_eq!(page.to(), None);
    }

    #[test]
    fn out_of_range_page_keeps_totals() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(9, 12), 24);
        assert_eq!(page.current_page, 9);
        assert_eq!(page.last_page, 2);
        assert_eq!(page.total, 24);
        assert!(!page.has_next());
    }
}
