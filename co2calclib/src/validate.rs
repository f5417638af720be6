//! Request format checks, applied at the input boundary before the engine runs.

use crate::{
    error::{Co2Error, Result},
    fiscal::parse_month,
    model::{BatchCalculationRequest, FuelKind, MonthlyActivity},
};
use regex::Regex;

pub const MIN_FISCAL_YEAR: i32 = 2020;

fn month_token() -> Result<Regex> {
    Regex::new(r"^\d{4}-\d{2}$").map_err(|e| Co2Error::Parse(e.to_string()))
}

fn usage_field(kind: FuelKind) -> &'static str {
    match kind {
        FuelKind::CityGas => "city_gas_m3",
        FuelKind::LpGas => "lp_gas_kg",
        FuelKind::Kerosene => "kerosene_l",
        FuelKind::Gasoline => "gasoline_l",
    }
}

pub fn validate_request(req: &BatchCalculationRequest) -> Result<()> {
    if req.target_fiscal_year < MIN_FISCAL_YEAR {
        return Err(Co2Error::InvalidRequest(format!(
            "target_fiscal_year {} is before {MIN_FISCAL_YEAR}",
            req.target_fiscal_year
        )));
    }
    if req.monthly_activities.is_empty() {
        return Err(Co2Error::InvalidRequest("monthly_activities is empty".into()));
    }
    let re = month_token()?;
    req.monthly_activities
        .iter()
        .enumerate()
        .try_for_each(|(i, a)| check_activity(&re, a).map_err(|e| at_index(i, e)))
}

pub fn validate_activity(a: &MonthlyActivity) -> Result<()> {
    check_activity(&month_token()?, a)
}

fn check_activity(re: &Regex, a: &MonthlyActivity) -> Result<()> {
    let month = &a.target_month;
    if !re.is_match(month) {
        return Err(Co2Error::InvalidRequest(format!(
            "target_month '{month}' is not in YYYY-MM form"
        )));
    }
    parse_month(month).map_err(|_| {
        Co2Error::InvalidRequest(format!("target_month '{month}' is not a calendar month"))
    })?;

    check_quantity(month, "usage_kwh", a.usage_kwh)?;
    for kind in FuelKind::ALL {
        check_quantity(month, usage_field(kind), a.fuel_usage(kind))?;
    }
    Ok(())
}

fn check_quantity(month: &str, field: &str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(Co2Error::InvalidRequest(format!(
            "{field} must be a non-negative number, got {v} (month: {month})"
        )))
    }
}

fn at_index(i: usize, e: Co2Error) -> Co2Error {
    match e {
        Co2Error::InvalidRequest(msg) => {
            Co2Error::InvalidRequest(format!("monthly_activities[{i}]: {msg}"))
        }
        other => other,
    }
}
