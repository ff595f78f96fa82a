//! Rating configuration and tariff editions
//!
//! The schedule circulated in two editions that disagree on the
//! cross-liability surcharge and on the ancillary fee formula. A calculator
//! runs exactly one edition; the two are never mixed.

use serde::{Deserialize, Serialize};

use super::fees::{AncillaryFeePolicy, DEFAULT_ANCILLARY_PERCENTAGE, DEFAULT_TAX_RATE};

/// Largest amount insured the schedule may price automatically
pub const DEFAULT_AUTHORITY_CEILING: f64 = 2_000_000_000.0;

/// Named tariff editions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffEdition {
    /// Bracketed ancillary fees, +20% cross liability
    Bracket,
    /// 6% ancillary fee, +10% cross liability
    Percentage,
}

impl TariffEdition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TariffEdition::Bracket => "bracket",
            TariffEdition::Percentage => "percentage",
        }
    }
}

/// Configuration applied on top of the tariff tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Amounts above this go to manual pricing
    pub authority_ceiling: f64,

    pub tax_rate: f64,

    /// Multiplier on the liability rate when cross liability is subscribed
    pub crossed_liability_surcharge: f64,

    pub ancillary_fee: AncillaryFeePolicy,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self::bracket_edition()
    }
}

impl RatingConfig {
    pub fn bracket_edition() -> Self {
        Self {
            authority_ceiling: DEFAULT_AUTHORITY_CEILING,
            tax_rate: DEFAULT_TAX_RATE,
            crossed_liability_surcharge: 1.20,
            ancillary_fee: AncillaryFeePolicy::Brackets,
        }
    }

    pub fn percentage_edition() -> Self {
        Self {
            authority_ceiling: DEFAULT_AUTHORITY_CEILING,
            tax_rate: DEFAULT_TAX_RATE,
            crossed_liability_surcharge: 1.10,
            ancillary_fee: AncillaryFeePolicy::Percentage {
                rate: DEFAULT_ANCILLARY_PERCENTAGE,
            },
        }
    }

    pub fn for_edition(edition: TariffEdition) -> Self {
        match edition {
            TariffEdition::Bracket => Self::bracket_edition(),
            TariffEdition::Percentage => Self::percentage_edition(),
        }
    }

    /// Whether the amount is beyond what the schedule may price
    pub fn exceeds_authority(&self, amount: f64) -> bool {
        amount > self.authority_ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bracket_edition() {
        let config = RatingConfig::default();
        assert_eq!(config, RatingConfig::for_edition(TariffEdition::Bracket));
        assert_eq!(config.ancillary_fee, AncillaryFeePolicy::Brackets);
        assert_eq!(config.crossed_liability_surcharge, 1.20);
    }

    #[test]
    fn test_authority_ceiling() {
        let config = RatingConfig::default();
        assert!(!config.exceeds_authority(2_000_000_000.0));
        assert!(config.exceeds_authority(2_000_000_001.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RatingConfig = serde_json::from_str(
            r#"{"ancillary_fee": {"kind": "percentage", "rate": 0.06}, "crossed_liability_surcharge": 1.1}"#,
        )
        .unwrap();
        assert_eq!(config, RatingConfig::percentage_edition());
    }
}
