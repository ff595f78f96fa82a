//! Optional covers and site equipment supplied with a quote request

use serde::{Deserialize, Serialize};

use crate::tariff::{
    EquipmentCategory, EquipmentDeductible, ProximityExposure, SiteRiskClass, TrafficExposure,
};

/// Civil liability (A17) with its surcharge tiers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CivilLiabilityCover {
    /// Public streets and squares adjacent to the site
    pub traffic: TrafficExposure,
    /// Neighbouring buildings or structures
    pub proximity: ProximityExposure,
    /// Cross liability between parties on site
    pub crossed: bool,
}

/// Covers priced by the technical department rather than the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferredCover {
    /// Strikes, riots and civil commotion (FANAF 01)
    StrikesRiots,
    /// Extended maintenance (A06)
    ExtendedMaintenance,
    /// Manufacturer's maintenance (A07)
    ManufacturerMaintenance,
}

/// A referred cover and the premium the technical department set for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferredExtension {
    pub cover: ReferredCover,
    pub premium: f64,
}

/// Optional covers subscribed on top of the works cover
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionSelection {
    pub civil_liability: Option<CivilLiabilityCover>,

    /// Adds a fixed surcharge to the works rate
    pub debris_removal: bool,

    /// Maintenance visit (A05)
    pub maintenance_visit: bool,

    /// Damage to existing property (A20)
    pub existing_property: bool,

    /// Site equipment and plant (A21)
    pub site_equipment: bool,

    /// Temporary buildings and stores (A22)
    pub temporary_buildings: bool,

    pub referred: Vec<ReferredExtension>,
}

impl ExtensionSelection {
    /// Whether the equipment list takes part in pricing
    pub fn covers_equipment(&self) -> bool {
        self.site_equipment || self.temporary_buildings
    }
}

/// One piece of equipment or installation kept on site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub category: EquipmentCategory,

    #[serde(default)]
    pub designation: String,

    /// Replacement value
    pub value: f64,

    /// Months on site (1 to 36)
    pub duration_months: u32,

    #[serde(default)]
    pub deductible: EquipmentDeductible,

    pub site_class: SiteRiskClass,
}

impl EquipmentItem {
    pub fn new(
        category: EquipmentCategory,
        designation: impl Into<String>,
        value: f64,
        duration_months: u32,
        deductible: EquipmentDeductible,
        site_class: SiteRiskClass,
    ) -> Self {
        Self {
            category,
            designation: designation.into(),
            value,
            duration_months,
            deductible,
            site_class,
        }
    }
}
