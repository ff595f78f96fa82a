//! Load project batches from CSV

use super::{BuildingUsage, DeductibleTier, ProjectProfile, StructureClass, WorkType, WorksSchedule};
use crate::error::LoadError;
use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the project batch columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "QuoteId")]
    quote_id: String,
    #[serde(rename = "WorkType")]
    work_type: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "DurationMonths", default)]
    duration_months: Option<u32>,
    #[serde(rename = "StartDate", default)]
    start_date: Option<NaiveDate>,
    #[serde(rename = "EndDate", default)]
    end_date: Option<NaiveDate>,
    #[serde(rename = "Usage")]
    usage: Option<String>,
    #[serde(rename = "Structure")]
    structure: Option<String>,
    #[serde(rename = "Deductible")]
    deductible: String,
}

/// A project read from a batch file, keyed by the caller's quote reference
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub quote_id: String,
    pub profile: ProjectProfile,
}

impl CsvRow {
    fn into_record(self) -> Result<ProjectRecord, LoadError> {
        let work_type = WorkType::from_label(&self.work_type).ok_or(LoadError::UnknownLabel {
            field: "WorkType",
            value: self.work_type.clone(),
        })?;

        let usage = match self.usage.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(label) => Some(BuildingUsage::from_label(label).ok_or(LoadError::UnknownLabel {
                field: "Usage",
                value: label.to_string(),
            })?),
            None => None,
        };

        let structure = match self.structure.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(label) => Some(StructureClass::from_label(label).ok_or(LoadError::UnknownLabel {
                field: "Structure",
                value: label.to_string(),
            })?),
            None => None,
        };

        let deductible =
            DeductibleTier::from_label(&self.deductible).ok_or(LoadError::UnknownLabel {
                field: "Deductible",
                value: self.deductible.clone(),
            })?;

        if self.amount < 0.0 {
            return Err(LoadError::Invalid(format!(
                "{}: negative amount {}",
                self.quote_id, self.amount
            )));
        }
        let schedule = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(WorksSchedule::new(start, end)),
            (None, None) => None,
            _ => {
                return Err(LoadError::Invalid(format!(
                    "{}: works schedule needs both StartDate and EndDate",
                    self.quote_id
                )))
            }
        };
        let duration_months = match (self.duration_months, schedule) {
            (Some(0), _) | (None, None) => {
                return Err(LoadError::Invalid(format!(
                    "{}: duration must be at least one month",
                    self.quote_id
                )))
            }
            (Some(months), _) => months,
            (None, Some(schedule)) => schedule.duration_months(),
        };

        let profile = ProjectProfile {
            work_type,
            amount: self.amount,
            duration_months,
            usage,
            structure,
            deductible,
        };
        profile
            .validate()
            .map_err(|e| LoadError::Invalid(format!("{}: {}", self.quote_id, e)))?;

        Ok(ProjectRecord {
            quote_id: self.quote_id,
            profile,
        })
    }
}

/// Load all projects from a CSV file
pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectRecord>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_projects_from_reader(file)
}

/// Load projects from any reader (e.g., string buffer, uploaded form data)
pub fn load_projects_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ProjectRecord>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut projects = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        projects.push(row.into_record()?);
    }

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible
Q-1,Building,500000000,12,logement_commercial,A,normal
Q-2,Road,250000000,18,,,times_five
";

    #[test]
    fn test_load_projects_from_reader() {
        let projects = load_projects_from_reader(BATCH.as_bytes()).unwrap();
        assert_eq!(projects.len(), 2);

        assert_eq!(projects[0].quote_id, "Q-1");
        assert_eq!(projects[0].profile.usage, Some(BuildingUsage::ResidentialCommercial));
        assert_eq!(projects[0].profile.structure, Some(StructureClass::A));

        assert_eq!(projects[1].profile.work_type, WorkType::Road);
        assert_eq!(projects[1].profile.usage, None);
        assert_eq!(projects[1].profile.deductible, DeductibleTier::TimesFive);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let data = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible
Q-1,Bridge,1000,12,,,normal
";
        let err = load_projects_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownLabel { field: "WorkType", .. }));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let data = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible
Q-1,Sanitation,1000,0,,,normal
";
        assert!(matches!(
            load_projects_from_reader(data.as_bytes()),
            Err(LoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_building_classes_on_road_rejected() {
        let data = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible
R,Road,100000000,12,public_industriel,B,normal
";
        let err = load_projects_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::Invalid(message) => assert_eq!(message, "R: Road works take no usage class"),
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_building_without_structure_rejected() {
        let data = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible
B,Building,100000000,12,logement_commercial,,normal
";
        assert!(matches!(
            load_projects_from_reader(data.as_bytes()),
            Err(LoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_duration_from_schedule_columns() {
        let data = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible,StartDate,EndDate
S-1,Sanitation,200000000,,,,normal,2025-01-15,2026-07-01
S-2,Sanitation,200000000,9,,,normal,2025-01-15,2026-07-01
S-3,Sanitation,200000000,,,,normal,2025-03-01,2025-03-20
";
        let projects = load_projects_from_reader(data.as_bytes()).unwrap();
        assert_eq!(projects[0].profile.duration_months, 18);
        // Stated duration wins
        assert_eq!(projects[1].profile.duration_months, 9);
        // Same month: default duration
        assert_eq!(projects[2].profile.duration_months, 12);
    }

    #[test]
    fn test_half_schedule_rejected() {
        let data = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible,StartDate,EndDate
S-1,Sanitation,200000000,,,,normal,2025-01-15,
";
        assert!(matches!(
            load_projects_from_reader(data.as_bytes()),
            Err(LoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_sample_batch() {
        let projects = load_projects("data/projects/sample_batch.csv").expect("Failed to load projects");
        assert_eq!(projects.len(), 6);
        assert!(projects.iter().all(|p| p.profile.duration_months >= 1));
        assert_eq!(projects[5].profile.duration_months, 18);
    }
}
