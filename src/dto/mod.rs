//! Response bodies that do not map one-to-one onto a domain type.

pub mod images;

use serde::Serialize;

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AckDto {
    pub ok: bool,
}

impl AckDto {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
