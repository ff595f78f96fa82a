//! Supporting documents expected with a quote request

use serde::{Deserialize, Serialize};

use crate::project::WorkType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportingDocument {
    /// Construction all-risks questionnaire
    Questionnaire,
    /// Technical specifications (CCTP)
    TechnicalSpecifications,
    TechnicalDescription,
    SoilStudy,
    WorksSchedule,
    /// Bridges and other civil structures, with their cost (road works)
    CivilStructures,
}

impl SupportingDocument {
    pub fn label(&self) -> &'static str {
        match self {
            SupportingDocument::Questionnaire => "TRC questionnaire",
            SupportingDocument::TechnicalSpecifications => "CCTP",
            SupportingDocument::TechnicalDescription => "Technical description",
            SupportingDocument::SoilStudy => "Soil study",
            SupportingDocument::WorksSchedule => "Works schedule",
            SupportingDocument::CivilStructures => "Civil structures",
        }
    }
}

/// Documents the underwriter expects for a work type
pub fn required_documents(work_type: WorkType) -> Vec<SupportingDocument> {
    let mut documents = vec![
        SupportingDocument::Questionnaire,
        SupportingDocument::TechnicalSpecifications,
        SupportingDocument::TechnicalDescription,
        SupportingDocument::SoilStudy,
        SupportingDocument::WorksSchedule,
    ];
    if work_type == WorkType::Road {
        documents.push(SupportingDocument::CivilStructures);
    }
    documents
}

/// Required documents absent from `attached`, in checklist order
pub fn missing_documents(
    work_type: WorkType,
    attached: &[SupportingDocument],
) -> Vec<SupportingDocument> {
    required_documents(work_type)
        .into_iter()
        .filter(|doc| !attached.contains(doc))
        .collect()
}
