//! Civil liability (A17) rating parameters and surcharges

use serde::{Deserialize, Serialize};

use crate::project::WorkType;

/// Share of the works rate and floor rate for the liability cover
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiabilityParams {
    /// Fraction of the net works rate
    pub share_of_works_rate: f64,
    /// Minimum liability rate (per mille)
    pub minimum_rate: f64,
}

impl LiabilityParams {
    pub fn for_work_type(work_type: WorkType) -> Self {
        match work_type {
            WorkType::Building => Self {
                share_of_works_rate: 0.15,
                minimum_rate: 0.35,
            },
            WorkType::Sanitation | WorkType::Road => Self {
                share_of_works_rate: 0.20,
                minimum_rate: 0.40,
            },
        }
    }

    /// Liability rate before surcharges, never below the floor
    pub fn base_rate(&self, net_works_rate: f64) -> f64 {
        (net_works_rate * self.share_of_works_rate).max(self.minimum_rate)
    }
}

/// Traffic on public streets and squares adjacent to the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficExposure {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl TrafficExposure {
    pub fn coefficient(&self) -> f64 {
        match self {
            TrafficExposure::None => 1.0,
            TrafficExposure::Low => 1.15,
            TrafficExposure::Medium => 1.30,
            TrafficExposure::High => 1.60,
        }
    }
}

/// Distance to neighbouring buildings or structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityExposure {
    #[default]
    None,
    /// Under 50 m, not adjoining
    #[serde(rename = "under_50m")]
    Under50m,
    #[serde(rename = "50_to_100m")]
    From50To100m,
    #[serde(rename = "100_to_200m")]
    From100To200m,
}

impl ProximityExposure {
    pub fn coefficient(&self) -> f64 {
        match self {
            ProximityExposure::None => 1.0,
            ProximityExposure::Under50m => 1.30,
            ProximityExposure::From50To100m => 1.10,
            ProximityExposure::From100To200m => 1.05,
        }
    }
}

/// Final civil liability rate (per mille).
///
/// `crossed_surcharge` is the edition's cross-liability multiplier when that
/// option is subscribed.
pub fn civil_liability_rate(
    work_type: WorkType,
    net_works_rate: f64,
    traffic: TrafficExposure,
    proximity: ProximityExposure,
    crossed_surcharge: Option<f64>,
) -> f64 {
    let mut rate = LiabilityParams::for_work_type(work_type).base_rate(net_works_rate);
    rate *= traffic.coefficient();
    rate *= proximity.coefficient();
    if let Some(surcharge) = crossed_surcharge {
        rate *= surcharge;
    }
    rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exposure_coefficients() {
        let traffic = [
            (TrafficExposure::None, 1.0),
            (TrafficExposure::Low, 1.15),
            (TrafficExposure::Medium, 1.30),
            (TrafficExposure::High, 1.60),
        ];
        for (tier, coef) in traffic {
            assert_eq!(tier.coefficient(), coef, "{:?}", tier);
        }

        let proximity = [
            (ProximityExposure::None, 1.0),
            (ProximityExposure::Under50m, 1.30),
            (ProximityExposure::From50To100m, 1.10),
            (ProximityExposure::From100To200m, 1.05),
        ];
        for (tier, coef) in proximity {
            assert_eq!(tier.coefficient(), coef, "{:?}", tier);
        }
    }

    #[test]
    fn test_middle_tiers_applied() {
        // Road: 20% of 2.12 = 0.424, medium traffic, 50 to 100 m
        let rate = civil_liability_rate(
            WorkType::Road,
            2.12,
            TrafficExposure::Medium,
            ProximityExposure::From50To100m,
            None,
        );
        assert_relative_eq!(rate, 0.424 * 1.30 * 1.10, epsilon = 1e-12);

        let rate = civil_liability_rate(
            WorkType::Building,
            1.10,
            TrafficExposure::None,
            ProximityExposure::From100To200m,
            Some(1.10),
        );
        assert_relative_eq!(rate, 0.35 * 1.05 * 1.10, epsilon = 1e-12);
    }

    #[test]
    fn test_proximity_json_labels() {
        let tier: ProximityExposure = serde_json::from_str(r#""50_to_100m""#).unwrap();
        assert_eq!(tier, ProximityExposure::From50To100m);
        let tier: ProximityExposure = serde_json::from_str(r#""100_to_200m""#).unwrap();
        assert_eq!(tier, ProximityExposure::From100To200m);
    }

    #[test]
    fn test_floor_rate() {
        // 15% of 0.01 is far below the 0.35 floor
        let rate = civil_liability_rate(
            WorkType::Building,
            0.01,
            TrafficExposure::None,
            ProximityExposure::None,
            None,
        );
        assert_eq!(rate, 0.35);

        let rate = civil_liability_rate(
            WorkType::Road,
            0.01,
            TrafficExposure::None,
            ProximityExposure::None,
            None,
        );
        assert_eq!(rate, 0.40);
    }

    #[test]
    fn test_share_above_floor() {
        // Sanitation: 20% of 2.55 = 0.51 > 0.40
        let rate = civil_liability_rate(
            WorkType::Sanitation,
            2.55,
            TrafficExposure::None,
            ProximityExposure::None,
            None,
        );
        assert_relative_eq!(rate, 0.51, epsilon = 1e-12);
    }

    #[test]
    fn test_surcharges_compound() {
        let rate = civil_liability_rate(
            WorkType::Building,
            1.10,
            TrafficExposure::High,
            ProximityExposure::Under50m,
            Some(1.20),
        );
        assert_relative_eq!(rate, 0.35 * 1.60 * 1.30 * 1.20, epsilon = 1e-12);
    }
}
