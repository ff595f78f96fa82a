//! Ancillary fees and tax

use serde::{Deserialize, Serialize};

use crate::error::{RatingError, Result};

/// Tax rate applied to net premium plus ancillary fee
pub const DEFAULT_TAX_RATE: f64 = 0.145;

/// Flat share of net premium charged under the percentage edition
pub const DEFAULT_ANCILLARY_PERCENTAGE: f64 = 0.06;

/// How the ancillary fee is derived from net premium
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AncillaryFeePolicy {
    /// Step function over the bracket table
    #[default]
    Brackets,
    /// Flat share of net premium
    Percentage { rate: f64 },
}

/// One step of the fee table: applies to net premiums up to `up_to` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBracket {
    /// Upper bound of net premium, `None` for the open top bracket
    pub up_to: Option<f64>,
    pub fee: f64,
}

/// Ancillary fee brackets in ascending order
#[derive(Debug, Clone, PartialEq)]
pub struct AncillaryFeeSchedule {
    brackets: Vec<FeeBracket>,
}

impl AncillaryFeeSchedule {
    /// Build from brackets in any order; the open bracket sorts last
    pub fn from_brackets(mut brackets: Vec<FeeBracket>) -> Self {
        brackets.sort_by(|a, b| match (a.up_to, b.up_to) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { brackets }
    }

    pub fn default_schedule() -> Self {
        Self::from_brackets(vec![
            FeeBracket { up_to: Some(100_000.0), fee: 5_000.0 },
            FeeBracket { up_to: Some(500_000.0), fee: 7_500.0 },
            FeeBracket { up_to: Some(1_000_000.0), fee: 10_000.0 },
            FeeBracket { up_to: Some(5_000_000.0), fee: 15_000.0 },
            FeeBracket { up_to: Some(10_000_000.0), fee: 20_000.0 },
            FeeBracket { up_to: Some(50_000_000.0), fee: 30_000.0 },
            FeeBracket { up_to: None, fee: 50_000.0 },
        ])
    }

    /// Fee of the first bracket containing `net_premium`
    pub fn bracket_fee(&self, net_premium: f64) -> Result<f64> {
        self.brackets
            .iter()
            .find(|b| b.up_to.map_or(true, |limit| net_premium <= limit))
            .map(|b| b.fee)
            .ok_or_else(|| {
                RatingError::unknown_key("ancillary fee brackets", format!("{:.0}", net_premium))
            })
    }

    /// Ancillary fee under the given policy
    pub fn fee(&self, policy: AncillaryFeePolicy, net_premium: f64) -> Result<f64> {
        match policy {
            AncillaryFeePolicy::Brackets => self.bracket_fee(net_premium),
            AncillaryFeePolicy::Percentage { rate } => Ok(net_premium * rate),
        }
    }
}

/// Tax on net premium plus ancillary fee
pub fn tax(net_premium: f64, ancillary_fee: f64, tax_rate: f64) -> f64 {
    (net_premium + ancillary_fee) * tax_rate
}
