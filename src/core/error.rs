//! Errors raised while building content.
//!
//! The run engine itself never fails; only turning raw tables into a
//! `ContentProvider` can.

use thiserror::Error;

/// Content validation and parsing errors.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Content JSON could not be parsed.
    #[error("content parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two definitions in one category share an id.
    #[error("duplicate {category} id {id}")]
    DuplicateId { category: &'static str, id: u32 },

    /// A weight or stat is negative or not finite.
    #[error("invalid {field} on {category} {id}: {value}")]
    InvalidNumber {
        category: &'static str,
        id: u32,
        field: &'static str,
        value: f64,
    },
}
