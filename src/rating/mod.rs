//! Rating engine for construction all-risks quotes
//!
//! Pricing runs in four steps:
//! 1. **Eligibility**: the underwriting checklist and the authority ceiling
//!    decide whether the schedule applies at all
//! 2. **Works rate**: base rate by category and duration bucket, deductible
//!    coefficient, debris removal surcharge
//! 3. **Extensions**: one premium function per optional cover, plus the
//!    site equipment list
//! 4. **Aggregation**: net premium, ancillary fee, tax, gross premium
//!
//! Requests carrying [`ManualPricing`] skip steps 1 to 3.

mod breakdown;
mod eligibility;
mod engine;
mod extensions;
mod manual;
pub mod premiums;

pub use breakdown::{Cover, PremiumBreakdown, PremiumLine, PricingBasis, WorksRates};
pub use eligibility::{check_eligibility, EligibilityViolation, UnderwritingAnswers};
pub use engine::{QuoteOutcome, QuoteRequest, RateCalculator, Referral};
pub use extensions::{
    CivilLiabilityCover, EquipmentItem, ExtensionSelection, ReferredCover, ReferredExtension,
};
pub use manual::{ManualPricing, ManualReason};
