//! Page-number pagination shared by list queries.

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;
/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised for unusable page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    #[error("page numbers start at 1")]
    ZeroPage,
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange { max: u32 },
}

/// Requested page: 1-based number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a request, applying defaults for missing values.
    ///
    /// # Examples
    /// ```
    /// use foodgram::domain::PageRequest;
    ///
    /// let request = PageRequest::try_new(Some(3), None).expect("valid page");
    /// assert_eq!(request.limit(), 5);
    /// assert_eq!(request.offset(), 10);
    /// ```
    pub fn try_new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(PageRequestError::LimitOutOfRange { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, limit })
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub count: u64,
    pub items: Vec<T>,
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Next page number, if more rows exist.
    #[must_use]
    pub fn next(&self) -> Option<u32> {
        let seen = self.request.offset() + self.items.len() as u64;
        (seen < self.count).then(|| self.request.page + 1)
    }

    /// Previous page number, unless this is the first page.
    #[must_use]
    pub fn previous(&self) -> Option<u32> {
        (self.request.page > 1).then(|| self.request.page - 1)
    }

    /// Transform every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
        }
    }
}
