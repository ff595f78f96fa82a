//! Site equipment (A21) and temporary structure (A22) rates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RatingError, Result};

/// Tower crane value separating the two rate bands
pub const TOWER_CRANE_VALUE_THRESHOLD: f64 = 30_000_000.0;

/// Site risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteRiskClass {
    /// Isolated, flood-free, flat ground; no deep excavation or major trenches
    #[serde(rename = "class_1")]
    Class1,
    /// Flood-prone area, deep excavations, trenches, difficult ground
    #[serde(rename = "class_2")]
    Class2,
    /// Highly exposed: flood, storm or earthquake, mountain works, landslides
    #[serde(rename = "class_3")]
    Class3,
}

impl SiteRiskClass {
    pub const ALL: [SiteRiskClass; 3] = [
        SiteRiskClass::Class1,
        SiteRiskClass::Class2,
        SiteRiskClass::Class3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteRiskClass::Class1 => "class_1",
            SiteRiskClass::Class2 => "class_2",
            SiteRiskClass::Class3 => "class_3",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// How an equipment category is rated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateGroup {
    /// Rate by value band and site class
    TowerCrane,
    /// Rate by category and site class
    MobilePlant,
    /// Rate by category only
    TemporaryStructure,
}

/// Equipment or installation insured on site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    TowerCrane,
    MobileCrane,
    /// Bulldozers, graders, scrapers
    Earthmovers,
    LoadersDumpers,
    VibratoryCompactors,
    /// Pile drivers and extractors
    PileDrivers,
    RoadRollers,
    SiteLocomotives,
    StorageShed,
    SiteOffice,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 10] = [
        EquipmentCategory::TowerCrane,
        EquipmentCategory::MobileCrane,
        EquipmentCategory::Earthmovers,
        EquipmentCategory::LoadersDumpers,
        EquipmentCategory::VibratoryCompactors,
        EquipmentCategory::PileDrivers,
        EquipmentCategory::RoadRollers,
        EquipmentCategory::SiteLocomotives,
        EquipmentCategory::StorageShed,
        EquipmentCategory::SiteOffice,
    ];

    pub fn rate_group(&self) -> RateGroup {
        match self {
            EquipmentCategory::TowerCrane => RateGroup::TowerCrane,
            EquipmentCategory::StorageShed | EquipmentCategory::SiteOffice => {
                RateGroup::TemporaryStructure
            }
            _ => RateGroup::MobilePlant,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCategory::TowerCrane => "tower_crane",
            EquipmentCategory::MobileCrane => "mobile_crane",
            EquipmentCategory::Earthmovers => "earthmovers",
            EquipmentCategory::LoadersDumpers => "loaders_dumpers",
            EquipmentCategory::VibratoryCompactors => "vibratory_compactors",
            EquipmentCategory::PileDrivers => "pile_drivers",
            EquipmentCategory::RoadRollers => "road_rollers",
            EquipmentCategory::SiteLocomotives => "site_locomotives",
            EquipmentCategory::StorageShed => "storage_shed",
            EquipmentCategory::SiteOffice => "site_office",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// Tower crane value band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CraneValueBand {
    Below30M,
    From30M,
}

impl CraneValueBand {
    pub fn from_value(value: f64) -> Self {
        if value < TOWER_CRANE_VALUE_THRESHOLD {
            CraneValueBand::Below30M
        } else {
            CraneValueBand::From30M
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CraneValueBand::Below30M => "below_30m",
            CraneValueBand::From30M => "from_30m",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "below_30m" => Some(CraneValueBand::Below30M),
            "from_30m" => Some(CraneValueBand::From30M),
            _ => None,
        }
    }
}

/// Deductible retained on an equipment item (10% of claim, with a minimum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentDeductible {
    /// Minimum 500,000
    #[default]
    Standard,
    #[serde(rename = "minimum_1m")]
    Minimum1M,
    #[serde(rename = "minimum_2m")]
    Minimum2M,
    #[serde(rename = "minimum_5m")]
    Minimum5M,
    #[serde(rename = "minimum_10m")]
    Minimum10M,
    Halved,
}

impl EquipmentDeductible {
    pub fn coefficient(&self) -> f64 {
        match self {
            EquipmentDeductible::Standard => 1.0,
            EquipmentDeductible::Minimum1M => 0.95,
            EquipmentDeductible::Minimum2M => 0.90,
            EquipmentDeductible::Minimum5M => 0.85,
            EquipmentDeductible::Minimum10M => 0.75,
            EquipmentDeductible::Halved => 1.25,
        }
    }
}

/// Share of the annual rate charged for 1 to 12 months on site
const SHORT_TERM_COEFFICIENTS: [f64; 12] = [
    0.45, 0.50, 0.55, 0.60, 0.65, 0.70, 0.75, 0.80, 0.85, 0.90, 0.95, 1.00,
];

/// Duration coefficient: short-term table up to 12 months, pro rata beyond
pub fn duration_coefficient(duration_months: u32) -> Result<f64> {
    match duration_months {
        0 => Err(RatingError::ZeroDuration),
        1..=12 => Ok(SHORT_TERM_COEFFICIENTS[(duration_months - 1) as usize]),
        _ => Ok(duration_months as f64 / 12.0),
    }
}

/// Annual per-mille equipment rates
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentRateTable {
    tower_cranes: HashMap<(CraneValueBand, SiteRiskClass), f64>,
    mobile_plant: HashMap<(EquipmentCategory, SiteRiskClass), f64>,
    temporary_structures: HashMap<EquipmentCategory, f64>,
}

impl EquipmentRateTable {
    pub fn empty() -> Self {
        Self {
            tower_cranes: HashMap::new(),
            mobile_plant: HashMap::new(),
            temporary_structures: HashMap::new(),
        }
    }

    pub fn default_schedule() -> Self {
        use EquipmentCategory::*;

        let mut table = Self::empty();

        table.set_tower_crane(CraneValueBand::Below30M, [8.5, 11.05, 13.06]);
        table.set_tower_crane(CraneValueBand::From30M, [10.2, 12.75, 15.3]);

        table.set_mobile_plant(MobileCrane, [12.75, 17.0, 21.25]);
        table.set_mobile_plant(Earthmovers, [8.5, 12.75, 17.0]);
        table.set_mobile_plant(LoadersDumpers, [8.5, 12.75, 17.0]);
        table.set_mobile_plant(VibratoryCompactors, [8.5, 10.2, 12.75]);
        table.set_mobile_plant(PileDrivers, [10.2, 12.75, 15.3]);
        table.set_mobile_plant(RoadRollers, [8.5, 10.2, 12.75]);
        table.set_mobile_plant(SiteLocomotives, [5.1, 6.8, 8.5]);

        table.set_temporary_structure(StorageShed, 4.5);
        table.set_temporary_structure(SiteOffice, 4.0);

        table
    }

    /// Set tower crane rates for classes 1 to 3
    pub fn set_tower_crane(&mut self, band: CraneValueBand, rates: [f64; 3]) {
        for (class, rate) in SiteRiskClass::ALL.into_iter().zip(rates) {
            self.tower_cranes.insert((band, class), rate);
        }
    }

    /// Set mobile plant rates for classes 1 to 3
    pub fn set_mobile_plant(&mut self, category: EquipmentCategory, rates: [f64; 3]) {
        for (class, rate) in SiteRiskClass::ALL.into_iter().zip(rates) {
            self.mobile_plant.insert((category, class), rate);
        }
    }

    pub fn insert_tower_crane(&mut self, band: CraneValueBand, class: SiteRiskClass, rate: f64) {
        self.tower_cranes.insert((band, class), rate);
    }

    pub fn insert_mobile_plant(
        &mut self,
        category: EquipmentCategory,
        class: SiteRiskClass,
        rate: f64,
    ) {
        self.mobile_plant.insert((category, class), rate);
    }

    pub fn set_temporary_structure(&mut self, category: EquipmentCategory, rate: f64) {
        self.temporary_structures.insert(category, rate);
    }

    /// Annual per-mille rate for one item
    pub fn annual_rate(
        &self,
        category: EquipmentCategory,
        value: f64,
        site_class: SiteRiskClass,
    ) -> Result<f64> {
        match category.rate_group() {
            RateGroup::TowerCrane => {
                let band = CraneValueBand::from_value(value);
                self.tower_cranes.get(&(band, site_class)).copied().ok_or_else(|| {
                    RatingError::unknown_key(
                        "tower crane rates",
                        format!("{}/{}", band.as_str(), site_class.as_str()),
                    )
                })
            }
            RateGroup::MobilePlant => self
                .mobile_plant
                .get(&(category, site_class))
                .copied()
                .ok_or_else(|| {
                    RatingError::unknown_key(
                        "mobile plant rates",
                        format!("{}/{}", category.as_str(), site_class.as_str()),
                    )
                }),
            RateGroup::TemporaryStructure => self
                .temporary_structures
                .get(&category)
                .copied()
                .ok_or_else(|| {
                    RatingError::unknown_key("temporary structure rates", category.as_str())
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_coefficient() {
        assert_eq!(duration_coefficient(1).unwrap(), 0.45);
        assert_eq!(duration_coefficient(6).unwrap(), 0.70);
        assert_eq!(duration_coefficient(12).unwrap(), 1.00);
        assert_eq!(duration_coefficient(18).unwrap(), 1.5);
        assert_eq!(duration_coefficient(36).unwrap(), 3.0);
        assert_eq!(duration_coefficient(0), Err(RatingError::ZeroDuration));
    }

    #[test]
    fn test_short_term_table_rises() {
        for pair in SHORT_TERM_COEFFICIENTS.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_tower_crane_band() {
        let table = EquipmentRateTable::default_schedule();
        let below = table
            .annual_rate(EquipmentCategory::TowerCrane, 29_999_999.0, SiteRiskClass::Class2)
            .unwrap();
        let above = table
            .annual_rate(EquipmentCategory::TowerCrane, 30_000_000.0, SiteRiskClass::Class2)
            .unwrap();
        assert_eq!(below, 11.05);
        assert_eq!(above, 12.75);
    }

    #[test]
    fn test_mobile_and_temporary_rates() {
        let table = EquipmentRateTable::default_schedule();
        assert_eq!(
            table
                .annual_rate(EquipmentCategory::MobileCrane, 1.0, SiteRiskClass::Class3)
                .unwrap(),
            21.25
        );
        // Temporary structures ignore the site class
        for class in SiteRiskClass::ALL {
            assert_eq!(
                table
                    .annual_rate(EquipmentCategory::SiteOffice, 1.0, class)
                    .unwrap(),
                4.0
            );
        }
    }

    #[test]
    fn test_every_category_priced() {
        let table = EquipmentRateTable::default_schedule();
        for category in EquipmentCategory::ALL {
            for class in SiteRiskClass::ALL {
                assert!(table.annual_rate(category, 10_000_000.0, class).is_ok());
            }
        }
    }

    #[test]
    fn test_unknown_category_fails() {
        let table = EquipmentRateTable::empty();
        assert!(matches!(
            table.annual_rate(EquipmentCategory::RoadRollers, 1.0, SiteRiskClass::Class1),
            Err(RatingError::UnknownKey { .. })
        ));
    }
}
