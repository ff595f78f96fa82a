//! TRC Rating - Tariff engine for All Risks Construction Site insurance quotes
//!
//! This library provides:
//! - Project description (works category, amount, duration, deductible tier)
//! - Tariff tables (base rates, equipment rates, ancillary fee brackets)
//! - Schedule rating with optional extensions and site equipment
//! - Eligibility checks and referral for projects outside the schedule
//! - Manual pricing override for underwriter-supplied figures
//! - Contract clauses and supporting document checklists
//! - Parallel batch quoting

pub mod clauses;
pub mod documents;
pub mod error;
pub mod project;
pub mod quote;
pub mod rating;
pub mod tariff;

// Re-export commonly used types
pub use error::{LoadError, RatingError};
pub use project::{ProjectProfile, WorkType};
pub use quote::{QuoteResult, QuoteRunner};
pub use rating::{PremiumBreakdown, QuoteOutcome, QuoteRequest, RateCalculator};
pub use tariff::{RatingConfig, TariffEdition, TariffTables};
