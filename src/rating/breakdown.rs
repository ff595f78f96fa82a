//! Premium breakdown produced by the rating engine

use serde::{Deserialize, Serialize};

use super::extensions::ReferredCover;
use super::manual::ManualReason;

/// Cover a breakdown line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cover {
    Works,
    MaintenanceVisit,
    CivilLiability,
    ExistingProperty,
    Equipment,
    Referred(ReferredCover),
}

impl Cover {
    pub fn label(&self) -> &'static str {
        match self {
            Cover::Works => "Works premium",
            Cover::MaintenanceVisit => "Maintenance visit premium (A05)",
            Cover::CivilLiability => "Civil liability premium (A17)",
            Cover::ExistingProperty => "Damage to existing property premium (A20)",
            Cover::Equipment => "Site equipment and installations premium (A21/A22)",
            Cover::Referred(ReferredCover::StrikesRiots) => {
                "Strikes, riots and civil commotion premium (FANAF 01)"
            }
            Cover::Referred(ReferredCover::ExtendedMaintenance) => {
                "Extended maintenance premium (A06)"
            }
            Cover::Referred(ReferredCover::ManufacturerMaintenance) => {
                "Manufacturer maintenance premium (A07)"
            }
        }
    }
}

/// One priced cover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumLine {
    pub cover: Cover,
    pub label: String,
    pub amount: f64,
    /// Per-mille rate, `None` where the line is not rate-based
    pub rate: Option<f64>,
}

impl PremiumLine {
    pub fn new(cover: Cover, amount: f64, rate: Option<f64>) -> Self {
        Self {
            cover,
            label: cover.label().to_string(),
            amount,
            rate,
        }
    }

    /// Rate to three decimals, or "-"
    pub fn rate_display(&self) -> String {
        match self.rate {
            Some(rate) => format!("{:.3}", rate),
            None => "-".to_string(),
        }
    }
}

/// Where the premium figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "basis", content = "reason", rename_all = "snake_case")]
pub enum PricingBasis {
    /// Computed from the tariff schedule
    Schedule,
    /// Supplied by an underwriter
    Manual(ManualReason),
}

/// Intermediate works rates of a schedule-priced quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorksRates {
    pub base_rate: f64,
    pub adjusted_rate: f64,
    pub net_rate: f64,
}

/// Decomposed premium.
///
/// `net_premium` is the sum of `lines` (no lines in manual mode) and
/// `gross_premium = net_premium + ancillary_fee + tax`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub basis: PricingBasis,
    pub works_rates: Option<WorksRates>,
    pub lines: Vec<PremiumLine>,
    pub net_premium: f64,
    pub ancillary_fee: f64,
    pub tax: f64,
    pub gross_premium: f64,
}

impl PremiumBreakdown {
    pub fn is_manual(&self) -> bool {
        matches!(self.basis, PricingBasis::Manual(_))
    }

    /// Line for a given cover, if priced
    pub fn line(&self, cover: Cover) -> Option<&PremiumLine> {
        self.lines.iter().find(|line| line.cover == cover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_display() {
        let line = PremiumLine::new(Cover::Works, 550_000.0, Some(1.1));
        assert_eq!(line.rate_display(), "1.100");
        assert_eq!(line.label, "Works premium");

        let line = PremiumLine::new(Cover::MaintenanceVisit, 55_000.0, None);
        assert_eq!(line.rate_display(), "-");
    }

    #[test]
    fn test_basis_json() {
        let json = serde_json::to_string(&PricingBasis::Manual(ManualReason::Voluntary)).unwrap();
        assert_eq!(json, r#"{"basis":"manual","reason":"voluntary"}"#);
        let json = serde_json::to_string(&PricingBasis::Schedule).unwrap();
        assert_eq!(json, r#"{"basis":"schedule"}"#);
    }
}
