//! Rate calculator: routes a quote request to schedule or manual pricing

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::documents::SupportingDocument;
use crate::error::Result;
use crate::project::{ProjectProfile, WorksSchedule};
use crate::tariff::{adjusted_rate, per_mille, tax, RatingConfig, TariffTables};

use super::breakdown::{Cover, PremiumBreakdown, PremiumLine, PricingBasis, WorksRates};
use super::eligibility::{check_eligibility, EligibilityViolation, UnderwritingAnswers};
use super::extensions::{EquipmentItem, ExtensionSelection};
use super::manual::ManualPricing;
use super::premiums::{
    civil_liability_premium, equipment_premium, existing_property_premium,
    existing_property_rate, maintenance_visit_premium, net_works_rate,
};

/// Everything the quote form collects for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub quote_id: Option<String>,

    pub project: ProjectProfile,

    /// Planned works dates; rate on their length when the project states no duration
    #[serde(default)]
    pub schedule: Option<WorksSchedule>,

    #[serde(default)]
    pub extensions: ExtensionSelection,

    /// Snapshot of the caller's equipment list
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,

    #[serde(default)]
    pub answers: UnderwritingAnswers,

    /// Underwriter figures; when present the schedule is not consulted
    #[serde(default)]
    pub manual: Option<ManualPricing>,

    #[serde(default)]
    pub attached_documents: Vec<SupportingDocument>,
}

impl QuoteRequest {
    /// Request with no extensions, default answers and schedule pricing
    pub fn new(project: ProjectProfile) -> Self {
        Self {
            quote_id: None,
            project,
            schedule: None,
            extensions: ExtensionSelection::default(),
            equipment: Vec::new(),
            answers: UnderwritingAnswers::default(),
            manual: None,
            attached_documents: Vec::new(),
        }
    }

    pub fn with_schedule(mut self, schedule: WorksSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Project with its duration resolved against the works schedule
    pub fn rated_project(&self) -> ProjectProfile {
        let mut project = self.project.clone();
        project.duration_months = project.rated_duration(self.schedule.as_ref());
        project
    }

    pub fn with_extensions(mut self, extensions: ExtensionSelection) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_equipment(mut self, equipment: Vec<EquipmentItem>) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_answers(mut self, answers: UnderwritingAnswers) -> Self {
        self.answers = answers;
        self
    }

    pub fn with_manual(mut self, manual: ManualPricing) -> Self {
        self.manual = Some(manual);
        self
    }
}

/// The schedule has no authority over the project.
///
/// The caller either obtains manual pricing and resubmits with
/// [`ManualPricing`], or blocks the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    pub violations: Vec<EligibilityViolation>,
}

impl Referral {
    pub fn exceeds_authority(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, EligibilityViolation::AmountAboveCeiling { .. }))
    }
}

/// Result of rating a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuoteOutcome {
    Priced(PremiumBreakdown),
    Referral(Referral),
}

impl QuoteOutcome {
    pub fn breakdown(&self) -> Option<&PremiumBreakdown> {
        match self {
            QuoteOutcome::Priced(breakdown) => Some(breakdown),
            QuoteOutcome::Referral(_) => None,
        }
    }
}

/// Stateless premium calculator over immutable tariff tables
#[derive(Debug, Clone)]
pub struct RateCalculator {
    tables: TariffTables,
    config: RatingConfig,
}

impl RateCalculator {
    pub fn new(tables: TariffTables, config: RatingConfig) -> Self {
        Self { tables, config }
    }

    pub fn tables(&self) -> &TariffTables {
        &self.tables
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Rate a request.
    ///
    /// A project whose usage or structure class does not fit its works type
    /// is rejected first. Manual figures then win over everything else.
    /// Without them, any failed eligibility condition (the authority ceiling
    /// included) yields a referral before a single rate is looked up.
    pub fn quote(&self, request: &QuoteRequest) -> Result<QuoteOutcome> {
        let project = request.rated_project();
        project.validate()?;

        if let Some(manual) = &request.manual {
            info!("{}", manual.reason);
            return Ok(QuoteOutcome::Priced(manual.breakdown(self.config.tax_rate)));
        }

        let violations = check_eligibility(&project, &request.answers, &self.config);
        if !violations.is_empty() {
            warn!(
                "Referral required: {}",
                violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            );
            return Ok(QuoteOutcome::Referral(Referral { violations }));
        }

        debug!("Rating {} months", project.duration_months);
        self.price_schedule(&project, &request.extensions, &request.equipment)
            .map(QuoteOutcome::Priced)
    }

    /// Per-mille works rate for the project's category and duration
    pub fn base_rate(&self, project: &ProjectProfile) -> Result<f64> {
        self.tables.base_rates.rate(
            project.work_type,
            project.duration_months,
            project.usage,
            project.structure,
        )
    }

    fn price_schedule(
        &self,
        project: &ProjectProfile,
        extensions: &ExtensionSelection,
        equipment: &[EquipmentItem],
    ) -> Result<PremiumBreakdown> {
        let base_rate = self.base_rate(project)?;
        let adjusted = adjusted_rate(base_rate, project.deductible);
        let net_rate = net_works_rate(adjusted, extensions.debris_removal);
        debug!(
            "Works rates: base={:.4} adjusted={:.4} net={:.4}",
            base_rate, adjusted, net_rate
        );

        let amount = project.amount;
        let mut lines = vec![PremiumLine::new(
            Cover::Works,
            per_mille(amount, net_rate),
            Some(net_rate),
        )];

        if extensions.maintenance_visit {
            lines.push(PremiumLine::new(
                Cover::MaintenanceVisit,
                maintenance_visit_premium(amount, adjusted),
                None,
            ));
        }

        if let Some(cover) = &extensions.civil_liability {
            let (rate, premium) = civil_liability_premium(
                project.work_type,
                amount,
                net_rate,
                cover,
                self.config.crossed_liability_surcharge,
            );
            debug!("Civil liability rate={:.4}", rate);
            lines.push(PremiumLine::new(Cover::CivilLiability, premium, Some(rate)));
        }

        if extensions.existing_property {
            lines.push(PremiumLine::new(
                Cover::ExistingProperty,
                existing_property_premium(amount, net_rate),
                Some(existing_property_rate(net_rate)),
            ));
        }

        if extensions.covers_equipment() {
            let total = equipment_premium(&self.tables.equipment_rates, equipment)?;
            if total > 0.0 {
                let mut line = PremiumLine::new(Cover::Equipment, total, None);
                line.label = format!("{} - {} item(s)", line.label, equipment.len());
                lines.push(line);
            }
        } else if !equipment.is_empty() {
            warn!(
                "{} equipment item(s) ignored: neither A21 nor A22 subscribed",
                equipment.len()
            );
        }

        for referred in &extensions.referred {
            lines.push(PremiumLine::new(
                Cover::Referred(referred.cover),
                referred.premium,
                None,
            ));
        }

        let net_premium: f64 = lines.iter().map(|line| line.amount).sum();
        let ancillary_fee = self
            .tables
            .ancillary_brackets
            .fee(self.config.ancillary_fee, net_premium)?;
        let tax = tax(net_premium, ancillary_fee, self.config.tax_rate);

        Ok(PremiumBreakdown {
            basis: PricingBasis::Schedule,
            works_rates: Some(WorksRates {
                base_rate,
                adjusted_rate: adjusted,
                net_rate,
            }),
            lines,
            net_premium,
            ancillary_fee,
            tax,
            gross_premium: net_premium + ancillary_fee + tax,
        })
    }
}

impl Default for RateCalculator {
    fn default() -> Self {
        Self::new(TariffTables::default_schedule(), RatingConfig::default())
    }
}
