//! Emission engine: one month at a time, then the whole batch.

use crate::{
    catalog::{Factor, FactorCatalog},
    error::{Co2Error, Result},
    model::{
        ActivityType, AnnualResult, BatchCalculationRequest, EmissionLineItem, FuelKind,
        MonthlyActivity, MonthlySummary,
    },
};
use log::{debug, info, warn};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to 3 decimal places, half-to-even on the exact binary value of `x`.
///
/// Goes through `Decimal` so a value stored just below a midpoint rounds down,
/// then re-parses the decimal text so the result is the f64 closest to it.
/// NaN and magnitudes beyond `Decimal` (about 7.9e28) fall back to f64 arithmetic,
/// still ties-to-even.
pub fn round3(x: f64) -> f64 {
    Decimal::from_f64_retain(x)
        .map(|d| d.round_dp_with_strategy(3, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_string().parse::<f64>().ok())
        .unwrap_or_else(|| (x * 1000.0).round_ties_even() / 1000.0)
}

fn line_item(
    activity_type: ActivityType,
    usage: f64,
    usage_unit: &str,
    factor: Factor<'_>,
) -> EmissionLineItem {
    EmissionLineItem {
        activity_type,
        usage_value: usage,
        usage_unit: usage_unit.to_string(),
        factor_used: factor.value,
        co2_kg: round3(usage * factor.value),
    }
}

/// Emissions of a single month.
///
/// Electricity comes first, then the fuels in [`FuelKind::ALL`] order; only
/// activities with usage above zero produce a line item. The monthly total is
/// the rounded sum of the already rounded line items.
pub fn calculate_monthly_emission(
    activity: &MonthlyActivity,
    catalog: &FactorCatalog,
) -> Result<MonthlySummary> {
    let month = &activity.target_month;
    let mut details = Vec::with_capacity(ActivityType::ALL.len());

    if activity.usage_kwh > 0.0 {
        let (supplier_id, menu_id) = activity.power_plan().ok_or_else(|| Co2Error::Validation {
            month: month.clone(),
            usage_kwh: activity.usage_kwh,
        })?;
        let factor = catalog
            .lookup_electricity_factor(supplier_id, menu_id)
            .ok_or_else(|| Co2Error::Lookup {
                month: month.clone(),
                supplier_id: supplier_id.to_string(),
                menu_id: menu_id.to_string(),
            })?;
        details.push(line_item(
            ActivityType::Electricity,
            activity.usage_kwh,
            factor.usage_unit(),
            factor,
        ));
    }

    for kind in FuelKind::ALL {
        let usage = activity.fuel_usage(kind);
        if usage > 0.0 {
            // catalog construction guarantees all four kinds
            let factor = catalog
                .lookup_fuel_factor(kind)
                .ok_or_else(|| Co2Error::Catalog(format!("missing fuel factor: {kind}")))?;
            details.push(line_item(kind.activity_type(), usage, kind.usage_unit(), factor));
        }
    }

    let total_co2_kg = round3(details.iter().map(|d| d.co2_kg).sum());
    debug!("{month}: {} line items, {total_co2_kg} kg-CO2", details.len());

    Ok(MonthlySummary {
        target_month: month.clone(),
        total_co2_kg,
        details,
    })
}

/// Emissions of a whole batch, in input order.
///
/// Stops at the first failing month and returns only that error.
pub fn calculate_annual_emissions(
    request: &BatchCalculationRequest,
    catalog: &FactorCatalog,
) -> Result<AnnualResult> {
    if request.monthly_activities.is_empty() {
        return Err(Co2Error::InvalidRequest("monthly_activities is empty".into()));
    }

    let monthly_summaries = request
        .monthly_activities
        .iter()
        .map(|a| calculate_monthly_emission(a, catalog))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| {
            warn!("fiscal year {} rejected: {e}", request.target_fiscal_year);
            e
        })?;

    let annual_total_co2_kg = round3(monthly_summaries.iter().map(|m| m.total_co2_kg).sum());
    info!(
        "fiscal year {}: {} months, {annual_total_co2_kg} kg-CO2 (factors {})",
        request.target_fiscal_year,
        monthly_summaries.len(),
        catalog.version()
    );

    Ok(AnnualResult {
        factors_version: catalog.version().to_string(),
        annual_total_co2_kg,
        monthly_summaries,
    })
}
