//! Page requests, sort orders, and the pagination envelope.
//!
//! A [`PageRequest`] fixes the window (0-based page index and page size) and
//! the sort order for a listing. The store applies predicate, then sort,
//! then window, and reports the match count before windowing; [`Page`] wraps
//! the result with the metadata clients need to walk the listing.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;
use super::record::EntityKind;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Parse a direction, case-insensitively.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidSortDirection`] for anything but `asc`/`desc`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::InvalidSortDirection {
                direction: raw.to_string(),
            }),
        }
    }
}

/// A sortable record property.
pub trait SortField: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Record type the property belongs to.
    const ENTITY: EntityKind;

    /// Look up a property by its wire name.
    fn from_name(name: &str) -> Option<Self>;

    /// Wire name of this property.
    fn name(self) -> &'static str;
}

/// One `(property, direction)` pair of a sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<F> {
    pub field: F,
    pub direction: Direction,
}

impl<F: SortField> SortOrder<F> {
    /// Ascending order on `field`.
    #[must_use]
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    /// Descending order on `field`.
    #[must_use]
    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    /// Parse a `property[,direction]` sort parameter.
    ///
    /// # Errors
    /// Returns an error for unknown properties or directions.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.splitn(2, ',');
        let property = parts.next().unwrap_or_default().trim();
        let field = F::from_name(property).ok_or_else(|| DomainError::UnknownSortProperty {
            entity: F::ENTITY,
            property: property.to_string(),
        })?;
        let direction = match parts.next() {
            Some(direction) => Direction::parse(direction)?,
            None => Direction::Asc,
        };
        Ok(Self { field, direction })
    }

    fn describe(&self) -> SortDescriptor {
        SortDescriptor {
            property: self.field.name(),
            direction: self.direction,
        }
    }
}

/// Serializable form of a [`SortOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortDescriptor {
    pub property: &'static str,
    pub direction: Direction,
}

/// Window and sort order for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    page: u32,
    size: u32,
    sort: Vec<SortOrder<F>>,
}

impl<F: SortField> PageRequest<F> {
    /// Create a page request.
    ///
    /// # Errors
    /// Returns [`DomainError::ZeroPageSize`] when `size` is 0.
    pub fn new(page: u32, size: u32, sort: Vec<SortOrder<F>>) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::ZeroPageSize);
        }
        Ok(Self { page, size, sort })
    }

    /// Unsorted request for the given window.
    ///
    /// # Errors
    /// Returns [`DomainError::ZeroPageSize`] when `size` is 0.
    pub fn unsorted(page: u32, size: u32) -> Result<Self, DomainError> {
        Self::new(page, size, Vec::new())
    }

    /// 0-based page index.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size, always positive.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Requested sort order, without the implicit id tie-breaker.
    #[must_use]
    pub fn sort(&self) -> &[SortOrder<F>] {
        &self.sort
    }

    /// Number of matching rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of listing results plus page metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub sort: Vec<SortDescriptor>,
}

impl<T> Page<T> {
    /// Wrap a query result. `total_elements` counts matches before windowing.
    #[must_use]
    pub fn new<F: SortField>(content: Vec<T>, request: &PageRequest<F>, total_elements: u64) -> Self {
        Self {
            content,
            page_number: request.page(),
            page_size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size())),
            sort: request.sort().iter().map(SortOrder::describe).collect(),
        }
    }

    /// Convert the content, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            sort: self.sort,
        }
    }
}
