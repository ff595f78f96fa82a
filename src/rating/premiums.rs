//! Premium functions for the works cover and each extension
//!
//! All rates are per mille. `adjusted_rate` is the base rate after the
//! deductible coefficient; `net_works_rate` adds the debris removal surcharge
//! and is the "rate on works" every later extension refers to, except the
//! maintenance visit.

use crate::error::Result;
use crate::project::WorkType;
use crate::tariff::{
    civil_liability_rate, duration_coefficient, per_mille, EquipmentRateTable,
    DEBRIS_REMOVAL_SURCHARGE, EXISTING_PROPERTY_RATE_SHARE, EXISTING_PROPERTY_VALUE_SHARE,
    MAINTENANCE_VISIT_SHARE,
};

use super::extensions::{CivilLiabilityCover, EquipmentItem};

/// Works rate including the debris removal surcharge when subscribed
pub fn net_works_rate(adjusted_rate: f64, debris_removal: bool) -> f64 {
    if debris_removal {
        adjusted_rate + DEBRIS_REMOVAL_SURCHARGE
    } else {
        adjusted_rate
    }
}

/// Maintenance visit (A05): 10% of the works premium at the adjusted rate.
/// Debris removal is deliberately left out of the basis.
pub fn maintenance_visit_premium(amount: f64, adjusted_rate: f64) -> f64 {
    per_mille(amount, adjusted_rate) * MAINTENANCE_VISIT_SHARE
}

/// Rate of the existing property cover (A20)
pub fn existing_property_rate(net_works_rate: f64) -> f64 {
    net_works_rate * EXISTING_PROPERTY_RATE_SHARE
}

/// Existing property (A20): 20% of the works amount at half the net works rate
pub fn existing_property_premium(amount: f64, net_works_rate: f64) -> f64 {
    let insured_value = amount * EXISTING_PROPERTY_VALUE_SHARE;
    per_mille(insured_value, existing_property_rate(net_works_rate))
}

/// Civil liability (A17) rate and premium
pub fn civil_liability_premium(
    work_type: WorkType,
    amount: f64,
    net_works_rate: f64,
    cover: &CivilLiabilityCover,
    crossed_surcharge: f64,
) -> (f64, f64) {
    let rate = civil_liability_rate(
        work_type,
        net_works_rate,
        cover.traffic,
        cover.proximity,
        cover.crossed.then_some(crossed_surcharge),
    );
    (rate, per_mille(amount, rate))
}

/// Premium of a single equipment item
pub fn equipment_item_premium(table: &EquipmentRateTable, item: &EquipmentItem) -> Result<f64> {
    let annual_rate = table.annual_rate(item.category, item.value, item.site_class)?;
    let duration_coef = duration_coefficient(item.duration_months)?;
    Ok(item.value * (annual_rate / 1000.0) * duration_coef * item.deductible.coefficient())
}

/// Total premium of the equipment list; an empty list costs nothing
pub fn equipment_premium(table: &EquipmentRateTable, items: &[EquipmentItem]) -> Result<f64> {
    items
        .iter()
        .map(|item| equipment_item_premium(table, item))
        .sum()
}
