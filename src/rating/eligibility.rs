//! Underwriting checklist deciding whether the schedule may price a project

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::project::{ProjectProfile, WorkType};
use crate::tariff::RatingConfig;

/// Answers to the underwriting questionnaire.
///
/// The default describes a project that meets every condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwritingAnswers {
    pub maintenance_within_12_months: bool,
    pub resumed_after_interruption: bool,
    pub standard_methods: bool,
    /// Building rehabilitation involving existing or new foundations
    pub foundation_works: bool,
    /// Water table, piles, diaphragm walls, deep foundations (Building, Road)
    pub difficult_soil: bool,
    /// Sanitation works exposed to flooding
    pub flood_exposed: bool,
}

impl Default for UnderwritingAnswers {
    fn default() -> Self {
        Self {
            maintenance_within_12_months: true,
            resumed_after_interruption: false,
            standard_methods: true,
            foundation_works: false,
            difficult_soil: false,
            flood_exposed: false,
        }
    }
}

/// A schedule condition the project fails
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum EligibilityViolation {
    AmountAboveCeiling { amount: f64, ceiling: f64 },
    MaintenanceOver12Months,
    ResumedAfterInterruption,
    NonStandardMethods,
    FoundationWorks,
    DifficultSoil,
    FloodExposure,
}

impl fmt::Display for EligibilityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityViolation::AmountAboveCeiling { amount, ceiling } => {
                write!(f, "Amount {:.0} above authority ceiling {:.0}", amount, ceiling)
            }
            EligibilityViolation::MaintenanceOver12Months => write!(f, "Maintenance over 12 months"),
            EligibilityViolation::ResumedAfterInterruption => {
                write!(f, "Works resumed after interruption")
            }
            EligibilityViolation::NonStandardMethods => write!(f, "Non-standard construction methods"),
            EligibilityViolation::FoundationWorks => {
                write!(f, "Works on existing or new foundations")
            }
            EligibilityViolation::DifficultSoil => write!(f, "Difficult soil conditions"),
            EligibilityViolation::FloodExposure => write!(f, "Works exposed to flooding"),
        }
    }
}

/// Evaluate every schedule condition; an empty result means the schedule applies
pub fn check_eligibility(
    profile: &ProjectProfile,
    answers: &UnderwritingAnswers,
    config: &RatingConfig,
) -> Vec<EligibilityViolation> {
    let mut violations = Vec::new();

    if config.exceeds_authority(profile.amount) {
        violations.push(EligibilityViolation::AmountAboveCeiling {
            amount: profile.amount,
            ceiling: config.authority_ceiling,
        });
    }
    if !answers.maintenance_within_12_months {
        violations.push(EligibilityViolation::MaintenanceOver12Months);
    }
    if answers.resumed_after_interruption {
        violations.push(EligibilityViolation::ResumedAfterInterruption);
    }
    if !answers.standard_methods {
        violations.push(EligibilityViolation::NonStandardMethods);
    }

    match profile.work_type {
        WorkType::Building => {
            if answers.foundation_works {
                violations.push(EligibilityViolation::FoundationWorks);
            }
            if answers.difficult_soil {
                violations.push(EligibilityViolation::DifficultSoil);
            }
        }
        WorkType::Road => {
            if answers.difficult_soil {
                violations.push(EligibilityViolation::DifficultSoil);
            }
        }
        WorkType::Sanitation => {
            if answers.flood_exposed {
                violations.push(EligibilityViolation::FloodExposure);
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{BuildingUsage, DeductibleTier, StructureClass};
    use crate::tariff::DEFAULT_AUTHORITY_CEILING;

    fn building(amount: f64) -> ProjectProfile {
        ProjectProfile::building(
            amount,
            12,
            BuildingUsage::ResidentialCommercial,
            StructureClass::A,
            DeductibleTier::Normal,
        )
    }

    #[test]
    fn test_clean_project_is_eligible() {
        let violations = check_eligibility(
            &building(1e9),
            &UnderwritingAnswers::default(),
            &RatingConfig::default(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_amount_above_ceiling() {
        let violations = check_eligibility(
            &building(3e9),
            &UnderwritingAnswers::default(),
            &RatingConfig::default(),
        );
        assert_eq!(
            violations,
            vec![EligibilityViolation::AmountAboveCeiling {
                amount: 3e9,
                ceiling: DEFAULT_AUTHORITY_CEILING,
            }]
        );
    }

    #[test]
    fn test_common_conditions() {
        let answers = UnderwritingAnswers {
            maintenance_within_12_months: false,
            resumed_after_interruption: true,
            standard_methods: false,
            ..Default::default()
        };
        let violations = check_eligibility(&building(1e8), &answers, &RatingConfig::default());
        assert_eq!(
            violations,
            vec![
                EligibilityViolation::MaintenanceOver12Months,
                EligibilityViolation::ResumedAfterInterruption,
                EligibilityViolation::NonStandardMethods,
            ]
        );
    }

    #[test]
    fn test_work_type_conditions() {
        let answers = UnderwritingAnswers {
            foundation_works: true,
            difficult_soil: true,
            flood_exposed: true,
            ..Default::default()
        };

        let building = check_eligibility(&building(1e8), &answers, &RatingConfig::default());
        assert_eq!(
            building,
            vec![EligibilityViolation::FoundationWorks, EligibilityViolation::DifficultSoil]
        );

        let road = ProjectProfile::road(1e8, 12, DeductibleTier::Normal);
        assert_eq!(
            check_eligibility(&road, &answers, &RatingConfig::default()),
            vec![EligibilityViolation::DifficultSoil]
        );

        let sanitation = ProjectProfile::sanitation(1e8, 12, DeductibleTier::Normal);
        assert_eq!(
            check_eligibility(&sanitation, &answers, &RatingConfig::default()),
            vec![EligibilityViolation::FloodExposure]
        );
    }

    #[test]
    fn test_violation_labels() {
        assert_eq!(
            EligibilityViolation::MaintenanceOver12Months.to_string(),
            "Maintenance over 12 months"
        );
        let label = EligibilityViolation::AmountAboveCeiling {
            amount: 3e9,
            ceiling: 2e9,
        }
        .to_string();
        assert_eq!(label, "Amount 3000000000 above authority ceiling 2000000000");
    }
}
