//! Fiscal year helpers. A fiscal year starts in April: FY2025 is 2025-04 .. 2026-03.

use crate::{
    error::{Co2Error, Result},
    model::{BatchCalculationRequest, MonthlyActivity},
};
use chrono::{Datelike, Months, NaiveDate};

pub const FIRST_MONTH: u32 = 4;

/// Parses a `YYYY-MM` token into the first day of that month.
pub fn parse_month(token: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{token}-01"), "%Y-%m-%d")
        .map_err(|e| Co2Error::Parse(format!("target_month '{token}': {e}")))
}

/// Fiscal year a month token belongs to.
pub fn fiscal_year_of(token: &str) -> Result<i32> {
    let d = parse_month(token)?;
    Ok(if d.month() >= FIRST_MONTH {
        d.year()
    } else {
        d.year() - 1
    })
}

/// The twelve month tokens of `year`, April first.
pub fn fiscal_year_months(year: i32) -> Vec<String> {
    let Some(start) = NaiveDate::from_ymd_opt(year, FIRST_MONTH, 1) else {
        return Vec::new();
    };
    (0..12)
        .filter_map(|i| start.checked_add_months(Months::new(i)))
        .map(|d| d.format("%Y-%m").to_string())
        .collect()
}

/// Empty twelve-month request, every month preset to one supplier plan.
pub fn template_request(year: i32, supplier_id: &str, menu_id: &str) -> BatchCalculationRequest {
    let monthly_activities = fiscal_year_months(year)
        .into_iter()
        .map(|m| MonthlyActivity {
            power_supplier_id: Some(supplier_id.to_string()),
            power_menu_type: Some(menu_id.to_string()),
            ..MonthlyActivity::new(m)
        })
        .collect();

    BatchCalculationRequest {
        target_fiscal_year: year,
        monthly_activities,
    }
}
