//! Works base rates, duration buckets and deductible coefficients

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RatingError, Result};
use crate::project::{BuildingUsage, DeductibleTier, StructureClass, WorkType};

/// Contract duration bucket used by every duration-dependent rate
///
/// The schedule only prices up to 12 and up to 18 months; longer contracts
/// reuse the long rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    /// Up to 12 months
    Short,
    /// More than 12 months
    Long,
}

impl DurationBucket {
    pub fn from_months(duration_months: u32) -> Self {
        if duration_months <= 12 {
            DurationBucket::Short
        } else {
            DurationBucket::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Long => "long",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "short" => Some(DurationBucket::Short),
            "long" => Some(DurationBucket::Long),
            _ => None,
        }
    }
}

impl DeductibleTier {
    /// Multiplier applied to the works base rate
    pub fn coefficient(&self) -> f64 {
        match self {
            DeductibleTier::Normal => 1.0,
            DeductibleTier::Doubled => 0.925,   // 7.5% discount
            DeductibleTier::TimesFive => 0.85,  // 15% discount
            DeductibleTier::TimesTen => 0.75,   // 25% discount
            DeductibleTier::Halved => 1.25,     // 25% surcharge
        }
    }
}

/// Works base rate adjusted for the chosen deductible (per mille)
pub fn adjusted_rate(base_rate: f64, deductible: DeductibleTier) -> f64 {
    base_rate * deductible.coefficient()
}

/// Per-mille works rates by work category and duration bucket
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRateTable {
    building: HashMap<(BuildingUsage, StructureClass, DurationBucket), f64>,
    civil_works: HashMap<(WorkType, DurationBucket), f64>,
}

impl BaseRateTable {
    /// Empty table, filled by the CSV loader
    pub fn empty() -> Self {
        Self {
            building: HashMap::new(),
            civil_works: HashMap::new(),
        }
    }

    /// Rates of the published schedule
    pub fn default_schedule() -> Self {
        use BuildingUsage::*;
        use DurationBucket::*;
        use StructureClass::*;

        let mut table = Self::empty();

        table.set_building(ResidentialCommercial, A, Short, 1.10);
        table.set_building(ResidentialCommercial, A, Long, 1.27);
        table.set_building(ResidentialCommercial, B, Short, 1.27);
        table.set_building(ResidentialCommercial, B, Long, 1.44);
        table.set_building(PublicIndustrial, A, Short, 1.27);
        table.set_building(PublicIndustrial, A, Long, 1.61);
        table.set_building(PublicIndustrial, B, Short, 1.44);
        table.set_building(PublicIndustrial, B, Long, 1.78);

        table.set_civil_works(WorkType::Sanitation, Short, 2.21);
        table.set_civil_works(WorkType::Sanitation, Long, 2.55);
        table.set_civil_works(WorkType::Road, Short, 1.78);
        table.set_civil_works(WorkType::Road, Long, 2.12);

        table
    }

    pub fn set_building(
        &mut self,
        usage: BuildingUsage,
        structure: StructureClass,
        bucket: DurationBucket,
        rate: f64,
    ) {
        self.building.insert((usage, structure, bucket), rate);
    }

    pub fn set_civil_works(&mut self, work_type: WorkType, bucket: DurationBucket, rate: f64) {
        self.civil_works.insert((work_type, bucket), rate);
    }

    /// Resolve the per-mille works rate.
    ///
    /// Building works need both usage and structure; sanitation and road
    /// works depend on the duration bucket only.
    pub fn rate(
        &self,
        work_type: WorkType,
        duration_months: u32,
        usage: Option<BuildingUsage>,
        structure: Option<StructureClass>,
    ) -> Result<f64> {
        let bucket = DurationBucket::from_months(duration_months);

        match work_type {
            WorkType::Building => {
                let usage = usage.ok_or(RatingError::MissingField {
                    work_type: work_type.as_str(),
                    field: "usage class",
                })?;
                let structure = structure.ok_or(RatingError::MissingField {
                    work_type: work_type.as_str(),
                    field: "structure class",
                })?;
                self.building
                    .get(&(usage, structure, bucket))
                    .copied()
                    .ok_or_else(|| {
                        RatingError::unknown_key(
                            "building base rates",
                            format!("{}/{}/{}", usage.as_str(), structure.as_str(), bucket.as_str()),
                        )
                    })
            }
            WorkType::Sanitation | WorkType::Road => {
                let extra = match (usage, structure) {
                    (Some(_), _) => Some("usage class"),
                    (None, Some(_)) => Some("structure class"),
                    (None, None) => None,
                };
                if let Some(field) = extra {
                    return Err(RatingError::UnexpectedField {
                        work_type: work_type.as_str(),
                        field,
                    });
                }
                self.civil_works
                    .get(&(work_type, bucket))
                    .copied()
                    .ok_or_else(|| {
                        RatingError::unknown_key(
                            "civil works base rates",
                            format!("{}/{}", work_type.as_str(), bucket.as_str()),
                        )
                    })
            }
        }
    }
}
