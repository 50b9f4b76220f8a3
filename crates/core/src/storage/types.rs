use serde::{Deserialize, Serialize};

/// Default page size for recipe listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Parameters for a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items to return. At least 1.
    pub limit: u32,
    /// Opaque token from a previous page's `next_cursor`. Resumes the
    /// listing after the last item returned by that page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
        }
    }
}

impl PageRequest {
    /// First page with the default limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Resume after a cursor from a previous page.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Present iff more items exist beyond this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// A page with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page with a continuation cursor.
    pub fn with_cursor(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_uses_default_limit() {
        let request = PageRequest::default();
        assert_eq!(request.limit, 20);
        assert!(request.cursor.is_none());
    }

    #[test]
    fn builders_set_limit_and_cursor() {
        let request = PageRequest::new().with_limit(5).with_cursor("abc");
        assert_eq!(request.limit, 5);
        assert_eq!(request.cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn page_constructors_set_has_more() {
        let last: Page<u32> = Page::last(vec![1, 2]);
        assert!(!last.has_more);
        assert!(last.next_cursor.is_none());

        let more: Page<u32> = Page::with_cursor(vec![1], "token");
        assert!(more.has_more);
        assert_eq!(more.next_cursor.as_deref(), Some("token"));
    }
}
