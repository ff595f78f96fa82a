//! Project description supplied by the quote form

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RatingError, Result};

/// Duration used when the works schedule does not yield a positive month count
pub const DEFAULT_DURATION_MONTHS: u32 = 12;

/// Category of construction works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    Building,
    Sanitation,
    Road,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Building => "Building",
            WorkType::Sanitation => "Sanitation",
            WorkType::Road => "Road",
        }
    }

    /// Parse the label used in CSV batches
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Building" => Some(WorkType::Building),
            "Sanitation" => Some(WorkType::Sanitation),
            "Road" => Some(WorkType::Road),
            _ => None,
        }
    }
}

/// Intended use of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingUsage {
    /// Housing, offices, hotels, shops (up to ground + 4 floors)
    #[serde(rename = "logement_commercial")]
    ResidentialCommercial,
    /// Public buildings, industrial sites, schools, factories
    #[serde(rename = "public_industriel")]
    PublicIndustrial,
}

impl BuildingUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingUsage::ResidentialCommercial => "logement_commercial",
            BuildingUsage::PublicIndustrial => "public_industriel",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "logement_commercial" => Some(BuildingUsage::ResidentialCommercial),
            "public_industriel" => Some(BuildingUsage::PublicIndustrial),
            _ => None,
        }
    }
}

/// Structural type of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureClass {
    /// Reinforced concrete or steel, span under 10 m
    A,
    /// Steel or prestressed concrete, span 10 to 15 m
    B,
}

impl StructureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureClass::A => "A",
            StructureClass::B => "B",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "A" => Some(StructureClass::A),
            "B" => Some(StructureClass::B),
            _ => None,
        }
    }
}

/// Deductible chosen for the works cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductibleTier {
    /// Schedule deductible
    Normal,
    /// Deductible x2
    Doubled,
    /// Deductible x5
    TimesFive,
    /// Deductible x10
    TimesTen,
    /// Deductible halved
    Halved,
}

impl DeductibleTier {
    pub const ALL: [DeductibleTier; 5] = [
        DeductibleTier::Normal,
        DeductibleTier::Doubled,
        DeductibleTier::TimesFive,
        DeductibleTier::TimesTen,
        DeductibleTier::Halved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeductibleTier::Normal => "normal",
            DeductibleTier::Doubled => "doubled",
            DeductibleTier::TimesFive => "times_five",
            DeductibleTier::TimesTen => "times_ten",
            DeductibleTier::Halved => "halved",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == label)
    }
}

/// Description of the construction project to be rated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProfile {
    pub work_type: WorkType,

    /// Amount insured (value of the works)
    pub amount: f64,

    /// Planned duration of the works in months, 0 when taken from the works schedule
    #[serde(default)]
    pub duration_months: u32,

    /// Building works only
    #[serde(default)]
    pub usage: Option<BuildingUsage>,

    /// Building works only
    #[serde(default)]
    pub structure: Option<StructureClass>,

    pub deductible: DeductibleTier,
}

impl ProjectProfile {
    pub fn building(
        amount: f64,
        duration_months: u32,
        usage: BuildingUsage,
        structure: StructureClass,
        deductible: DeductibleTier,
    ) -> Self {
        Self {
            work_type: WorkType::Building,
            amount,
            duration_months,
            usage: Some(usage),
            structure: Some(structure),
            deductible,
        }
    }

    pub fn sanitation(amount: f64, duration_months: u32, deductible: DeductibleTier) -> Self {
        Self::civil_works(WorkType::Sanitation, amount, duration_months, deductible)
    }

    pub fn road(amount: f64, duration_months: u32, deductible: DeductibleTier) -> Self {
        Self::civil_works(WorkType::Road, amount, duration_months, deductible)
    }

    fn civil_works(
        work_type: WorkType,
        amount: f64,
        duration_months: u32,
        deductible: DeductibleTier,
    ) -> Self {
        Self {
            work_type,
            amount,
            duration_months,
            usage: None,
            structure: None,
            deductible,
        }
    }

    /// Usage and structure of a building project
    pub fn building_class(&self) -> Result<(BuildingUsage, StructureClass)> {
        let usage = self.usage.ok_or(RatingError::MissingField {
            work_type: WorkType::Building.as_str(),
            field: "usage class",
        })?;
        let structure = self.structure.ok_or(RatingError::MissingField {
            work_type: WorkType::Building.as_str(),
            field: "structure class",
        })?;
        Ok((usage, structure))
    }

    /// Usage and structure must be given for building works and only for them
    pub fn validate(&self) -> Result<()> {
        if self.work_type == WorkType::Building {
            return self.building_class().map(|_| ());
        }
        if self.usage.is_some() {
            return Err(RatingError::UnexpectedField {
                work_type: self.work_type.as_str(),
                field: "usage class",
            });
        }
        if self.structure.is_some() {
            return Err(RatingError::UnexpectedField {
                work_type: self.work_type.as_str(),
                field: "structure class",
            });
        }
        Ok(())
    }

    /// Months to rate: the stated duration, else the works schedule, else the default
    pub fn rated_duration(&self, schedule: Option<&WorksSchedule>) -> u32 {
        match (self.duration_months, schedule) {
            (0, Some(schedule)) => schedule.duration_months(),
            (0, None) => DEFAULT_DURATION_MONTHS,
            (months, _) => months,
        }
    }
}

/// Planned start and end of the works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksSchedule {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WorksSchedule {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Calendar months between start and end (day of month ignored, floored at 0)
    pub fn months(&self) -> u32 {
        let months = (self.end.year() - self.start.year()) * 12
            + (self.end.month() as i32 - self.start.month() as i32);
        months.max(0) as u32
    }

    /// Duration to rate: the schedule length, or the default when it is empty
    pub fn duration_months(&self) -> u32 {
        match self.months() {
            0 => DEFAULT_DURATION_MONTHS,
            months => months,
        }
    }
}
