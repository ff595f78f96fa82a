//! CSV-based tariff loader
//!
//! Loads rate tables from CSV files in data/tariffs/

use std::fs::File;
use std::path::Path;

use super::base::{BaseRateTable, DurationBucket};
use super::equipment::{CraneValueBand, EquipmentCategory, EquipmentRateTable, RateGroup, SiteRiskClass};
use super::fees::{AncillaryFeeSchedule, FeeBracket};
use crate::error::LoadError;
use crate::project::{BuildingUsage, StructureClass, WorkType};

/// Default path to tariff directory
pub const DEFAULT_TARIFF_PATH: &str = "data/tariffs";

#[derive(Debug, serde::Deserialize)]
struct BaseRateRow {
    #[serde(rename = "WorkType")]
    work_type: String,
    #[serde(rename = "Usage")]
    usage: Option<String>,
    #[serde(rename = "Structure")]
    structure: Option<String>,
    #[serde(rename = "Bucket")]
    bucket: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

#[derive(Debug, serde::Deserialize)]
struct EquipmentRateRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Band")]
    band: Option<String>,
    #[serde(rename = "SiteClass")]
    site_class: Option<String>,
    #[serde(rename = "Rate")]
    rate: f64,
}

#[derive(Debug, serde::Deserialize)]
struct FeeBracketRow {
    #[serde(rename = "UpTo")]
    up_to: Option<f64>,
    #[serde(rename = "Fee")]
    fee: f64,
}

fn unknown(field: &'static str, value: &str) -> LoadError {
    LoadError::UnknownLabel {
        field,
        value: value.to_string(),
    }
}

fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, LoadError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LoadError::Invalid(format!("missing {}", field)))
}

/// Load works base rates from base_rates.csv
pub fn load_base_rates(path: &Path) -> Result<BaseRateTable, LoadError> {
    let file = File::open(path.join("base_rates.csv"))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut table = BaseRateTable::empty();

    for result in reader.deserialize() {
        let row: BaseRateRow = result?;
        let work_type = WorkType::from_label(&row.work_type)
            .ok_or_else(|| unknown("WorkType", &row.work_type))?;
        let bucket = DurationBucket::from_label(&row.bucket)
            .ok_or_else(|| unknown("Bucket", &row.bucket))?;

        match work_type {
            WorkType::Building => {
                let usage_label = required("Usage", &row.usage)?;
                let usage = BuildingUsage::from_label(usage_label)
                    .ok_or_else(|| unknown("Usage", usage_label))?;
                let structure_label = required("Structure", &row.structure)?;
                let structure = StructureClass::from_label(structure_label)
                    .ok_or_else(|| unknown("Structure", structure_label))?;
                table.set_building(usage, structure, bucket, row.rate);
            }
            WorkType::Sanitation | WorkType::Road => {
                table.set_civil_works(work_type, bucket, row.rate);
            }
        }
    }

    Ok(table)
}

/// Load equipment rates from equipment_rates.csv
pub fn load_equipment_rates(path: &Path) -> Result<EquipmentRateTable, LoadError> {
    let file = File::open(path.join("equipment_rates.csv"))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut table = EquipmentRateTable::empty();

    for result in reader.deserialize() {
        let row: EquipmentRateRow = result?;
        let category = EquipmentCategory::from_label(&row.category)
            .ok_or_else(|| unknown("Category", &row.category))?;

        match category.rate_group() {
            RateGroup::TowerCrane => {
                let band_label = required("Band", &row.band)?;
                let band = CraneValueBand::from_label(band_label)
                    .ok_or_else(|| unknown("Band", band_label))?;
                let class_label = required("SiteClass", &row.site_class)?;
                let class = SiteRiskClass::from_label(class_label)
                    .ok_or_else(|| unknown("SiteClass", class_label))?;
                table.insert_tower_crane(band, class, row.rate);
            }
            RateGroup::MobilePlant => {
                let class_label = required("SiteClass", &row.site_class)?;
                let class = SiteRiskClass::from_label(class_label)
                    .ok_or_else(|| unknown("SiteClass", class_label))?;
                table.insert_mobile_plant(category, class, row.rate);
            }
            RateGroup::TemporaryStructure => {
                table.set_temporary_structure(category, row.rate);
            }
        }
    }

    Ok(table)
}

/// Load ancillary fee brackets from ancillary_brackets.csv
pub fn load_ancillary_brackets(path: &Path) -> Result<AncillaryFeeSchedule, LoadError> {
    let file = File::open(path.join("ancillary_brackets.csv"))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut brackets = Vec::new();

    for result in reader.deserialize() {
        let row: FeeBracketRow = result?;
        brackets.push(FeeBracket {
            up_to: row.up_to,
            fee: row.fee,
        });
    }

    if !brackets.iter().any(|b| b.up_to.is_none()) {
        return Err(LoadError::Invalid(
            "ancillary brackets need an open top bracket".to_string(),
        ));
    }

    Ok(AncillaryFeeSchedule::from_brackets(brackets))
}

/// All tables read from a tariff directory
pub struct LoadedTariffs {
    pub base_rates: BaseRateTable,
    pub equipment_rates: EquipmentRateTable,
    pub ancillary_brackets: AncillaryFeeSchedule,
}

impl LoadedTariffs {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, LoadError> {
        Self::load_from(Path::new(DEFAULT_TARIFF_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            base_rates: load_base_rates(path)?,
            equipment_rates: load_equipment_rates(path)?,
            ancillary_brackets: load_ancillary_brackets(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_tariffs() {
        let result = LoadedTariffs::load_default();
        assert!(result.is_ok(), "Failed to load tariffs: {:?}", result.err());

        let tariffs = result.unwrap();

        // Shipped files mirror the built-in schedule
        assert_eq!(tariffs.base_rates, BaseRateTable::default_schedule());
        assert_eq!(tariffs.equipment_rates, EquipmentRateTable::default_schedule());
        assert_eq!(tariffs.ancillary_brackets, AncillaryFeeSchedule::default_schedule());
    }

    #[test]
    fn test_missing_directory() {
        let result = LoadedTariffs::load_from(Path::new("data/no_such_tariffs"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
