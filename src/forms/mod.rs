//! Request payloads and their conversion into typed domain values.

use crate::domain::types::Description;

pub mod categories;
pub mod history;
pub mod images;
pub mod items;

/// Blank descriptions are stored as `NULL`.
pub(crate) fn optional_description(value: Option<String>) -> Option<Description> {
    value.and_then(|v| Description::new(v).ok())
}
