//! Pagination primitives: what slice to fetch ([`Pageable`]) and the slice
//! that comes back ([`Page`]).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default number of elements per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound for a page size; larger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Sort direction for a single [`Order`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ValidationError::InvalidSortDirection(s.to_string()))
        }
    }
}

/// Ordering on a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    #[must_use]
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Request for a bounded slice of a larger result set.
///
/// `page` is zero-based. `size` is always within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    page: u32,
    size: u32,
    sort: Vec<Order>,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl Pageable {
    /// Build a pageable, clamping `size` to [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPageSize`] when `size` is zero.
    pub fn new(page: u32, size: u32, sort: Vec<Order>) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(Self {
            page,
            size: size.min(MAX_PAGE_SIZE),
            sort,
        })
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn sort(&self) -> &[Order] {
        &self.sort
    }

    /// Number of elements to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// An ordered slice of a result set with total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Wrap `content` fetched for `pageable`.
    #[must_use]
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        Self {
            content,
            number: pageable.page(),
            size: pageable.size(),
            total_elements,
        }
    }

    /// Total number of pages at the current page size.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    /// Transform every element while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
