//! Error types for rating and tariff loading

use thiserror::Error;

/// Result type alias using RatingError
pub type Result<T> = std::result::Result<T, RatingError>;

/// Invalid input reaching the rating engine.
///
/// Amounts above the authority ceiling and failed eligibility checks are not
/// errors: they come back as a [`crate::rating::Referral`] so the caller can
/// switch to manual pricing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    /// A categorical field required by the work type is absent
    #[error("{work_type} works require a {field}")]
    MissingField {
        work_type: &'static str,
        field: &'static str,
    },

    /// A Building-only class was supplied for other works
    #[error("{work_type} works take no {field}")]
    UnexpectedField {
        work_type: &'static str,
        field: &'static str,
    },

    /// The tariff has no entry for the requested key
    #[error("no rate in {table} for {key}")]
    UnknownKey { table: &'static str, key: String },

    #[error("equipment must stay on site at least one month")]
    ZeroDuration,
}

impl RatingError {
    pub(crate) fn unknown_key(table: &'static str, key: impl Into<String>) -> Self {
        RatingError::UnknownKey {
            table,
            key: key.into(),
        }
    }
}

/// Errors raised while loading tariff tables or project batches from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown {field}: {value}")]
    UnknownLabel { field: &'static str, value: String },

    #[error("Invalid record: {0}")]
    Invalid(String),
}
