//! Offset pagination primitives shared by Academy list endpoints.
//!
//! A [`PageRequest`] is the validated `skip`/`limit` window supplied by a
//! client, and a [`Page`] is the `{total, items}` envelope returned to it.
//! Page-number style requests (`page`, `limit`) are converted to the same
//! window with [`PageRequest::from_page_number`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of items returned when the client does not supply a limit.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest limit a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised while validating pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The limit was zero.
    #[error("limit must be at least 1")]
    ZeroLimit,
    /// The limit exceeded [`MAX_LIMIT`].
    #[error("limit must not exceed {max}")]
    LimitTooLarge {
        /// Configured maximum.
        max: u32,
    },
    /// Page numbers start at one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// The computed offset does not fit the offset type.
    #[error("page is out of range")]
    PageOutOfRange,
}

/// Validated offset window.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(Some(10), Some(5)).expect("valid window");
/// assert_eq!(request.skip(), 10);
/// assert_eq!(request.limit(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: u64,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a window from optional raw parameters, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroLimit`] or
    /// [`PaginationError::LimitTooLarge`] when the limit is out of bounds.
    pub fn new(skip: Option<u64>, limit: Option<u32>) -> Result<Self, PaginationError> {
        let limit = validate_limit(limit.unwrap_or(DEFAULT_LIMIT))?;
        Ok(Self {
            skip: skip.unwrap_or(0),
            limit,
        })
    }

    /// Build a window from a one-based page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPage`] for page zero, the limit errors
    /// from [`PageRequest::new`], or [`PaginationError::PageOutOfRange`] when
    /// the offset overflows.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::from_page_number(Some(3), Some(10)).expect("valid page");
    /// assert_eq!(request.skip(), 20);
    /// assert_eq!(request.page_number(), 3);
    /// ```
    pub fn from_page_number(page: Option<u64>, limit: Option<u32>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        let limit = validate_limit(limit.unwrap_or(DEFAULT_LIMIT))?;
        let skip = (page - 1)
            .checked_mul(u64::from(limit))
            .ok_or(PaginationError::PageOutOfRange)?;
        Ok(Self { skip, limit })
    }

    /// Number of items to skip.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum number of items to return.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// One-based page number containing the first item of this window.
    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.skip
            .checked_div(u64::from(self.limit))
            .map_or(1, |page| page.saturating_add(1))
    }

    /// Apply the window to an in-memory sequence.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(Some(1), Some(2)).expect("valid window");
    /// let window: Vec<_> = request.apply(vec![1, 2, 3, 4]).collect();
    /// assert_eq!(window, vec![2, 3]);
    /// ```
    pub fn apply<I>(&self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(limit)
    }
}

fn validate_limit(limit: u32) -> Result<u32, PaginationError> {
    match limit {
        0 => Err(PaginationError::ZeroLimit),
        value if value > MAX_LIMIT => Err(PaginationError::LimitTooLarge { max: MAX_LIMIT }),
        value => Ok(value),
    }
}

/// Page envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Number of items matching the filter, ignoring the window.
    pub total: u64,
    /// Items inside the requested window.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Construct a page from its parts.
    #[must_use]
    pub const fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }

    /// Transform every item while keeping the total.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
