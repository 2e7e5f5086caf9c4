//! Pagination requests and the page envelope returned by the store.

use serde::Serialize;

use crate::error::{Result, RosterError};

/// Sort direction of a single `sort=property,(asc|desc)` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One ordering criterion; ascending when the direction is omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Parse a raw `property[,direction]` parameter value.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.splitn(2, ',');
        let property = parts.next().unwrap_or_default().trim();
        if property.is_empty() {
            return Err(RosterError::Validation(
                "sort property must not be empty".to_string(),
            ));
        }
        let direction = match parts.next().map(str::trim) {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(RosterError::Validation(format!(
                    "unsupported sort direction: {other}"
                )));
            }
        };
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }

    /// Resolve the property to a storage column. Properties are whitelisted;
    /// nothing from the request is ever interpolated into SQL directly.
    pub fn column(&self) -> Result<&'static str> {
        match self.property.as_str() {
            "id" => Ok("id"),
            "firstName" | "first_name" => Ok("first_name"),
            "lastName" | "last_name" => Ok("last_name"),
            "email" => Ok("email"),
            "phone" => Ok("phone"),
            other => Err(RosterError::Validation(format!(
                "unsupported sort property: {other}"
            ))),
        }
    }
}

/// A bounded window request over the member store. Pages are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        self.page * self.size
    }

    /// Reject windows the page arithmetic cannot represent.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(RosterError::Validation(
                "page size must be positive".to_string(),
            ));
        }
        for order in &self.sort {
            order.column()?;
        }
        Ok(())
    }
}

/// A page of results with total-count metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
}

impl<T> Page<T> {
    /// Assemble the envelope for `content` cut out of `total_elements`
    /// records by `request`. The request must have been validated.
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(request.size)
        };
        Self {
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
        }
    }
}
