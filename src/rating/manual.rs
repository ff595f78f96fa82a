//! Manual pricing path: figures supplied by an underwriter

use std::fmt;

use serde::{Deserialize, Serialize};

use super::breakdown::{PremiumBreakdown, PricingBasis};
use crate::tariff::tax;

/// Why a quote is priced by hand. Chosen by the caller, never by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualReason {
    /// Amount insured above the authority ceiling
    AmountAboveCeiling,
    /// Eligibility failed; the technical department priced the risk
    TechnicalDepartment,
    /// Off-schedule pricing chosen by the user
    Voluntary,
}

impl fmt::Display for ManualReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ManualReason::AmountAboveCeiling => "Manual pricing (amount above authority ceiling)",
            ManualReason::TechnicalDepartment => "Manual pricing (technical department approval)",
            ManualReason::Voluntary => "Manual pricing (off schedule, by choice)",
        };
        f.write_str(text)
    }
}

/// Net premium and ancillary fee entered by the underwriter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualPricing {
    pub reason: ManualReason,
    pub net_premium: f64,
    pub ancillary_fee: f64,
}

impl ManualPricing {
    pub fn new(reason: ManualReason, net_premium: f64, ancillary_fee: f64) -> Self {
        Self {
            reason,
            net_premium,
            ancillary_fee,
        }
    }

    /// Breakdown with tax and gross premium recomputed from the supplied figures
    pub fn breakdown(&self, tax_rate: f64) -> PremiumBreakdown {
        let tax = tax(self.net_premium, self.ancillary_fee, tax_rate);
        PremiumBreakdown {
            basis: PricingBasis::Manual(self.reason),
            works_rates: None,
            lines: Vec::new(),
            net_premium: self.net_premium,
            ancillary_fee: self.ancillary_fee,
            tax,
            gross_premium: self.net_premium + self.ancillary_fee + tax,
        }
    }
}
