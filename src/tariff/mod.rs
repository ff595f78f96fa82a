//! Tariff schedule: base rates, extension parameters, equipment rates, fees

mod base;
mod config;
mod equipment;
mod fees;
mod liability;
pub mod loader;

pub use base::{adjusted_rate, BaseRateTable, DurationBucket};
pub use config::{RatingConfig, TariffEdition, DEFAULT_AUTHORITY_CEILING};
pub use equipment::{
    duration_coefficient, CraneValueBand, EquipmentCategory, EquipmentDeductible,
    EquipmentRateTable, RateGroup, SiteRiskClass, TOWER_CRANE_VALUE_THRESHOLD,
};
pub use fees::{tax, AncillaryFeePolicy, AncillaryFeeSchedule, FeeBracket, DEFAULT_TAX_RATE};
pub use liability::{civil_liability_rate, LiabilityParams, ProximityExposure, TrafficExposure};
pub use loader::LoadedTariffs;

use crate::error::LoadError;
use std::path::Path;

/// Per-mille surcharge added to the works rate for debris removal
pub const DEBRIS_REMOVAL_SURCHARGE: f64 = 0.15;

/// Maintenance visit (A05) premium as a share of the works premium before debris removal
pub const MAINTENANCE_VISIT_SHARE: f64 = 0.10;

/// Existing property (A20) insured value as a share of the works amount
pub const EXISTING_PROPERTY_VALUE_SHARE: f64 = 0.20;

/// Existing property (A20) rate as a share of the net works rate
pub const EXISTING_PROPERTY_RATE_SHARE: f64 = 0.50;

/// Premium for `amount` at a per-mille rate
pub fn per_mille(amount: f64, rate: f64) -> f64 {
    amount * rate / 1000.0
}

/// Container for all lookup tables. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffTables {
    pub base_rates: BaseRateTable,
    pub equipment_rates: EquipmentRateTable,
    pub ancillary_brackets: AncillaryFeeSchedule,
}

impl TariffTables {
    /// Tables of the published schedule
    pub fn default_schedule() -> Self {
        Self {
            base_rates: BaseRateTable::default_schedule(),
            equipment_rates: EquipmentRateTable::default_schedule(),
            ancillary_brackets: AncillaryFeeSchedule::default_schedule(),
        }
    }

    /// Load tables from CSV files in the default location (data/tariffs/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TARIFF_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let loaded = LoadedTariffs::load_from(path)?;
        log::info!("Loaded tariff tables from {}", path.display());

        Ok(Self {
            base_rates: loaded.base_rates,
            equipment_rates: loaded.equipment_rates,
            ancillary_brackets: loaded.ancillary_brackets,
        })
    }
}

impl Default for TariffTables {
    fn default() -> Self {
        Self::default_schedule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_mille() {
        assert!((per_mille(500_000_000.0, 1.10) - 550_000.0).abs() < 1e-6);
        assert_eq!(per_mille(0.0, 2.5), 0.0);
    }

    #[test]
    fn test_csv_matches_default() {
        let loaded = TariffTables::from_csv().expect("Failed to load tariffs");
        assert_eq!(loaded, TariffTables::default_schedule());
    }
}
