//! Input validation for request parameters.
//!
//! Every check here rejects with [`Error::InvalidInput`]; the API turns that
//! into a validation failure before any store access happens.

use uuid::Uuid;

use crate::defaults;
use crate::error::{Error, Result};

/// Parse an id taken from a URL path.
pub fn validate_uuid(value: &str, field: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|e| Error::InvalidInput(format!("{field} is not a valid UUID: {e}")))
}

/// Validated page window for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>> {
    raw.map(|v| {
        v.trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidInput(format!("{name} must be an integer")))
    })
    .transpose()
}

impl Pagination {
    /// `page >= 1`, `1 <= limit <= 100`; missing values take the defaults.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self> {
        let page = page.unwrap_or(defaults::PAGE);
        let limit = limit.unwrap_or(defaults::PAGE_LIMIT);

        if page < 1 {
            return Err(Error::InvalidInput("page must be >= 1".to_string()));
        }
        if limit < 1 {
            return Err(Error::InvalidInput("limit must be >= 1".to_string()));
        }
        if limit > defaults::PAGE_LIMIT_MAX {
            return Err(Error::InvalidInput(format!(
                "limit must be <= {}",
                defaults::PAGE_LIMIT_MAX
            )));
        }

        Ok(Self { page, limit })
    }

    /// Parse raw query-string values, then apply [`Pagination::new`].
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self> {
        Self::new(parse_int("page", page)?, parse_int("limit", limit)?)
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> usize {
        usize::try_from((self.page - 1).saturating_mul(self.limit)).unwrap_or(usize::MAX)
    }

    /// Cut this page out of an already ordered list.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.iter().skip(self.offset()).take(limit).cloned().collect()
    }
}

/// Self-reported recall score for an anchor review, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecallQuality(u8);

impl RecallQuality {
    pub fn new(value: i64) -> Result<Self> {
        match u8::try_from(value) {
            Ok(q @ 1..=5) => Ok(Self(q)),
            _ => Err(Error::InvalidInput(format!(
                "recall_quality must be between 1 and 5, got {value}"
            ))),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}
