//! Quote runner for single and batch pricing
//!
//! Builds the tariff tables once, then prices any number of requests
//! without re-reading CSV files.

use rayon::prelude::*;
use serde::Serialize;

use crate::clauses::ContractClauses;
use crate::documents::{missing_documents, SupportingDocument};
use crate::error::{LoadError, Result};
use crate::project::ProjectRecord;
use crate::rating::{QuoteOutcome, QuoteRequest, RateCalculator};
use crate::tariff::{RatingConfig, TariffTables};

/// Everything the offer document needs for one request
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResult {
    pub quote_id: Option<String>,
    pub outcome: QuoteOutcome,
    pub clauses: ContractClauses,
    pub missing_documents: Vec<SupportingDocument>,
}

/// Pre-loaded quote runner
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::from_csv(RatingConfig::default())?;
///
/// for request in &requests {
///     let result = runner.run(request)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QuoteRunner {
    calculator: RateCalculator,
}

impl QuoteRunner {
    /// Create runner with the built-in schedule and default edition
    pub fn new() -> Self {
        Self::with_config(RatingConfig::default())
    }

    /// Create runner with the built-in schedule and a given configuration
    pub fn with_config(config: RatingConfig) -> Self {
        Self {
            calculator: RateCalculator::new(TariffTables::default_schedule(), config),
        }
    }

    /// Create runner by loading tariffs from CSV files in data/tariffs/
    pub fn from_csv(config: RatingConfig) -> std::result::Result<Self, LoadError> {
        Ok(Self {
            calculator: RateCalculator::new(TariffTables::from_csv()?, config),
        })
    }

    /// Create runner from a specific tariff directory
    pub fn from_csv_path(
        path: &std::path::Path,
        config: RatingConfig,
    ) -> std::result::Result<Self, LoadError> {
        Ok(Self {
            calculator: RateCalculator::new(TariffTables::from_csv_path(path)?, config),
        })
    }

    /// Price one request and attach clauses and the document checklist
    pub fn run(&self, request: &QuoteRequest) -> Result<QuoteResult> {
        let outcome = self.calculator.quote(request)?;
        let work_type = request.project.work_type;

        Ok(QuoteResult {
            quote_id: request.quote_id.clone(),
            outcome,
            clauses: ContractClauses::for_quote(work_type, &request.extensions),
            missing_documents: missing_documents(work_type, &request.attached_documents),
        })
    }

    /// Price many requests in parallel; results keep the input order
    pub fn run_batch(&self, requests: &[QuoteRequest]) -> Vec<Result<QuoteResult>> {
        requests.par_iter().map(|request| self.run(request)).collect()
    }

    /// Price a loaded project batch with no extensions and default answers
    pub fn run_projects(&self, projects: &[ProjectRecord]) -> Vec<Result<QuoteResult>> {
        let requests: Vec<QuoteRequest> = projects
            .iter()
            .map(|record| {
                let mut request = QuoteRequest::new(record.profile.clone());
                request.quote_id = Some(record.quote_id.clone());
                request
            })
            .collect();
        self.run_batch(&requests)
    }
}

impl Default for QuoteRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RatingError;
    use crate::project::{load_projects_from_reader, DeductibleTier, ProjectProfile, StructureClass};
    use crate::rating::PricingBasis;

    #[test]
    fn test_run_attaches_clauses_and_documents() {
        let runner = QuoteRunner::new();
        let request = QuoteRequest::new(ProjectProfile::road(
            400_000_000.0,
            10,
            DeductibleTier::Normal,
        ));
        let result = runner.run(&request).unwrap();

        assert!(matches!(result.outcome, QuoteOutcome::Priced(_)));
        assert_eq!(result.clauses.mandatory.len(), 4);
        assert!(result.clauses.extensions.is_empty());
        assert_eq!(result.missing_documents.len(), 6);
    }

    #[test]
    fn test_sample_request_file() {
        let file = std::fs::File::open("data/requests/sample_building.json").unwrap();
        let request: QuoteRequest = serde_json::from_reader(file).unwrap();
        let result = QuoteRunner::new().run(&request).unwrap();

        let breakdown = result.outcome.breakdown().unwrap();
        // works, maintenance visit, civil liability, equipment, strikes and riots
        assert_eq!(breakdown.lines.len(), 5);
        assert_eq!(result.clauses.extensions.len(), 5);
        assert_eq!(
            result.missing_documents,
            vec![
                SupportingDocument::TechnicalDescription,
                SupportingDocument::WorksSchedule,
            ]
        );
    }

    #[test]
    fn test_batch_keeps_order() {
        let batch = "\
QuoteId,WorkType,Amount,DurationMonths,Usage,Structure,Deductible
A,Building,500000000,12,logement_commercial,A,normal
B,Road,3000000000,12,,,normal
D,Sanitation,200000000,18,,,halved
";
        let projects = load_projects_from_reader(batch.as_bytes()).unwrap();
        let runner = QuoteRunner::new();
        let results = runner.run_projects(&projects);

        assert_eq!(results.len(), 3);

        let a = results[0].as_ref().unwrap();
        assert_eq!(a.quote_id.as_deref(), Some("A"));
        assert_eq!(
            a.outcome.breakdown().map(|b| b.basis),
            Some(PricingBasis::Schedule)
        );

        let b = results[1].as_ref().unwrap();
        assert!(matches!(&b.outcome, QuoteOutcome::Referral(r) if r.exceeds_authority()));

        let d = results[2].as_ref().unwrap();
        assert_eq!(d.quote_id.as_deref(), Some("D"));
    }

    #[test]
    fn test_batch_reports_invalid_request_in_place() {
        let mut road = ProjectProfile::road(100_000_000.0, 12, DeductibleTier::Normal);
        road.structure = Some(StructureClass::B);

        let requests = vec![
            QuoteRequest::new(ProjectProfile::sanitation(1e8, 12, DeductibleTier::Normal)),
            QuoteRequest::new(road),
            QuoteRequest::new(ProjectProfile::road(1e8, 12, DeductibleTier::Normal)),
        ];
        let results = QuoteRunner::new().run_batch(&requests);

        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(RatingError::UnexpectedField { field: "structure class", .. })
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = QuoteRunner::with_config(RatingConfig::percentage_edition());
        let requests: Vec<_> = [100_000_000.0, 250_000_000.0, 900_000_000.0]
            .iter()
            .map(|&amount| QuoteRequest::new(ProjectProfile::sanitation(amount, 12, DeductibleTier::Normal)))
            .collect();

        let batch = runner.run_batch(&requests);
        for (request, result) in requests.iter().zip(&batch) {
            let single = runner.run(request).unwrap();
            assert_eq!(result.as_ref().unwrap().outcome, single.outcome);
        }
    }
}
