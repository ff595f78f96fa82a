//! Contract clauses to insert in the offer

use serde::Serialize;

use crate::project::WorkType;
use crate::rating::{ExtensionSelection, ReferredCover};

/// A standard policy clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub code: &'static str,
    pub title: &'static str,
}

const fn clause(code: &'static str, title: &'static str) -> Clause {
    Clause { code, title }
}

pub const FIRE_FIGHTING: Clause = clause("C01", "Fire-fighting installations");
pub const UNDERGROUND_CABLES: Clause = clause("B03", "Underground cables and pipes");
pub const CROPS_AND_FORESTS: Clause = clause("B05", "Damage to crops, forests and cultivations");
pub const RAIN_AND_FLOOD: Clause = clause("C06", "Special conditions: rain, run-off, flooding");
pub const TRENCH_WORKS: Clause = clause("B09", "Works in trenches");
pub const WATER_MAINS_AND_SEWERS: Clause = clause("117", "Water mains and sewers");

pub const MAINTENANCE_VISIT: Clause = clause("A05", "Visits maintenance");
pub const EXTENDED_MAINTENANCE: Clause = clause("A06", "Extended maintenance");
pub const MANUFACTURER_MAINTENANCE: Clause = clause("A07", "Manufacturer's maintenance");
pub const CIVIL_LIABILITY: Clause = clause("A17", "Third party liability");
pub const CROSS_LIABILITY: Clause = clause("A17", "Cross liability");
pub const EXISTING_PROPERTY: Clause = clause("A20", "Adjacent and existing property");
pub const SITE_EQUIPMENT: Clause = clause("A21", "Construction plant and equipment");
pub const TEMPORARY_BUILDINGS: Clause = clause("A22", "Temporary buildings and stores");
pub const STRIKES_RIOTS: Clause = clause("FANAF 01", "Strikes, riots and civil commotion");

/// Clauses required for every contract of the work type
pub fn mandatory_clauses(work_type: WorkType) -> Vec<Clause> {
    match work_type {
        WorkType::Building => vec![FIRE_FIGHTING, UNDERGROUND_CABLES, RAIN_AND_FLOOD],
        WorkType::Sanitation => vec![
            UNDERGROUND_CABLES,
            CROPS_AND_FORESTS,
            RAIN_AND_FLOOD,
            TRENCH_WORKS,
            WATER_MAINS_AND_SEWERS,
        ],
        WorkType::Road => vec![
            UNDERGROUND_CABLES,
            CROPS_AND_FORESTS,
            RAIN_AND_FLOOD,
            TRENCH_WORKS,
        ],
    }
}

/// Clauses for the subscribed extensions, schedule covers first
pub fn extension_clauses(extensions: &ExtensionSelection) -> Vec<Clause> {
    let mut clauses = Vec::new();

    if extensions.maintenance_visit {
        clauses.push(MAINTENANCE_VISIT);
    }
    if let Some(liability) = &extensions.civil_liability {
        clauses.push(CIVIL_LIABILITY);
        if liability.crossed {
            clauses.push(CROSS_LIABILITY);
        }
    }
    if extensions.existing_property {
        clauses.push(EXISTING_PROPERTY);
    }

    let referred = |cover: ReferredCover| extensions.referred.iter().any(|r| r.cover == cover);
    if referred(ReferredCover::ExtendedMaintenance) {
        clauses.push(EXTENDED_MAINTENANCE);
    }
    if referred(ReferredCover::ManufacturerMaintenance) {
        clauses.push(MANUFACTURER_MAINTENANCE);
    }
    if extensions.site_equipment {
        clauses.push(SITE_EQUIPMENT);
    }
    if extensions.temporary_buildings {
        clauses.push(TEMPORARY_BUILDINGS);
    }
    if referred(ReferredCover::StrikesRiots) {
        clauses.push(STRIKES_RIOTS);
    }

    clauses
}

/// Clauses grouped as printed on the offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractClauses {
    pub mandatory: Vec<Clause>,
    pub extensions: Vec<Clause>,
}

impl ContractClauses {
    pub fn for_quote(work_type: WorkType, extensions: &ExtensionSelection) -> Self {
        Self {
            mandatory: mandatory_clauses(work_type),
            extensions: extension_clauses(extensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{CivilLiabilityCover, ReferredExtension};

    #[test]
    fn test_mandatory_clauses() {
        let codes: Vec<_> = mandatory_clauses(WorkType::Sanitation)
            .iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["B03", "B05", "C06", "B09", "117"]);
        assert_eq!(mandatory_clauses(WorkType::Building)[0], FIRE_FIGHTING);
        assert_eq!(mandatory_clauses(WorkType::Road).len(), 4);
    }

    #[test]
    fn test_no_extension_clauses() {
        assert!(extension_clauses(&ExtensionSelection::default()).is_empty());
    }

    #[test]
    fn test_extension_clause_order() {
        let extensions = ExtensionSelection {
            civil_liability: Some(CivilLiabilityCover {
                crossed: true,
                ..Default::default()
            }),
            maintenance_visit: true,
            temporary_buildings: true,
            referred: vec![
                ReferredExtension {
                    cover: ReferredCover::StrikesRiots,
                    premium: 1.0,
                },
                ReferredExtension {
                    cover: ReferredCover::ExtendedMaintenance,
                    premium: 1.0,
                },
            ],
            ..Default::default()
        };
        let clauses = extension_clauses(&extensions);
        assert_eq!(
            clauses,
            vec![
                MAINTENANCE_VISIT,
                CIVIL_LIABILITY,
                CROSS_LIABILITY,
                EXTENDED_MAINTENANCE,
                TEMPORARY_BUILDINGS,
                STRIKES_RIOTS,
            ]
        );
    }
}
