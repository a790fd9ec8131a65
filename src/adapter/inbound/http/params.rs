//! Query-string parsing for listing endpoints.
//!
//! Listings accept `page` (0-based), `size`, any number of
//! `sort=property[,asc|desc]` parameters, and per-record filters. Blank
//! values count as absent; unknown parameters are ignored.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::category::CategoryFilter;
use crate::domain::error::DomainError;
use crate::domain::id::CategoryId;
use crate::domain::page::{PageRequest, SortField, SortOrder};
use crate::domain::product::ProductFilter;
use crate::infrastructure::config::pagination::PaginationConfig;

/// Decoded query string.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw query string; `None` yields no parameters.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|raw| {
                url::form_urlencoded::parse(raw.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    fn all<'s>(&'s self, key: &str) -> impl Iterator<Item = &'s str> + 's {
        let key = key.to_owned();
        self.pairs
            .iter()
            .filter(move |(k, _)| *k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First non-blank value of `key`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.all(key).next()
    }

    /// First non-blank value of `key`, parsed.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidParameter`] if the value does not parse.
    pub fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, DomainError> {
        self.text(key)
            .map(|value| {
                value.parse().map_err(|_| DomainError::InvalidParameter {
                    parameter: key.to_string(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    /// Page window and sort order, with the size policy applied.
    ///
    /// # Errors
    /// Returns a [`DomainError`] for non-numeric `page`/`size`, a zero size,
    /// or a bad sort parameter.
    pub fn page_request<F: SortField>(
        &self,
        pagination: &PaginationConfig,
    ) -> Result<PageRequest<F>, DomainError> {
        let page = self.parsed::<u32>("page")?.unwrap_or(0);
        let size = pagination.resolve(self.parsed::<u32>("size")?);
        let sort = self
            .all("sort")
            .map(SortOrder::parse)
            .collect::<Result<Vec<_>, _>>()?;
        PageRequest::new(page, size, sort)
    }

    /// Product filters: `name`, `minPrice`, `maxPrice`, `minQuantity`,
    /// `maxQuantity`, `categoryId`.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidParameter`] for unparseable numbers.
    pub fn product_filter(&self) -> Result<ProductFilter, DomainError> {
        Ok(ProductFilter {
            name: self.text("name").map(str::to_string),
            min_price: self.parsed::<Decimal>("minPrice")?,
            max_price: self.parsed::<Decimal>("maxPrice")?,
            min_quantity: self.parsed::<i32>("minQuantity")?,
            max_quantity: self.parsed::<i32>("maxQuantity")?,
            category_id: self.parsed::<i64>("categoryId")?.map(CategoryId::new),
        })
    }

    /// Category filters: `name`.
    #[must_use]
    pub fn category_filter(&self) -> CategoryFilter {
        CategoryFilter {
            name: self.text("name").map(str::to_string),
        }
    }
}

/// Parse a path identifier.
///
/// # Errors
/// Returns [`DomainError::InvalidParameter`] if `raw` is not an integer.
pub fn path_id(parameter: &str, raw: &str) -> Result<i64, DomainError> {
    raw.parse().map_err(|_| DomainError::InvalidParameter {
        parameter: parameter.to_string(),
        value: raw.to_string(),
    })
}
