//! Plain CSV.
//!
//! Input, one row per month:
//! target_month,usage_kwh,power_supplier_id,power_menu_type,city_gas_m3,lp_gas_kg,kerosene_l,gasoline_l
//!
//! Output, one row per month plus a closing `annual` row:
//! target_month,electricity,city_gas,lp_gas,kerosene,gasoline,total_co2_kg

use crate::{
    calc::round3,
    error::{Co2Error, Result},
    fiscal::fiscal_year_of,
    model::{ActivityType, AnnualResult, BatchCalculationRequest, MonthlyActivity},
};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct CsvRow {
    target_month: String,
    usage_kwh: Option<String>,
    power_supplier_id: Option<String>,
    #[serde(alias = "power_menu_id")]
    power_menu_type: Option<String>,
    city_gas_m3: Option<String>,
    lp_gas_kg: Option<String>,
    kerosene_l: Option<String>,
    gasoline_l: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    target_month: &'a str,
    electricity: f64,
    city_gas: f64,
    lp_gas: f64,
    kerosene: f64,
    gasoline: f64,
    total_co2_kg: f64,
}

fn quantity(month: &str, field: &str, v: &Option<String>) -> Result<f64> {
    match v.as_deref().map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(s) => s
            .parse::<f64>()
            .map_err(|e| Co2Error::Parse(format!("{field} '{s}' (month: {month}): {e}"))),
    }
}

fn id(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub struct Csv;

impl crate::traits::ReadRequest for Csv {
    /// The fiscal year is taken from the first row's month.
    fn read<R: BufRead>(r: R) -> Result<BatchCalculationRequest> {
        let mut rdr = ReaderBuilder::new().flexible(true).trim(Trim::Headers).from_reader(r);
        let mut monthly_activities = Vec::new();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            let month = row.target_month.trim().to_string();

            monthly_activities.push(MonthlyActivity {
                usage_kwh: quantity(&month, "usage_kwh", &row.usage_kwh)?,
                city_gas_m3: quantity(&month, "city_gas_m3", &row.city_gas_m3)?,
                lp_gas_kg: quantity(&month, "lp_gas_kg", &row.lp_gas_kg)?,
                kerosene_l: quantity(&month, "kerosene_l", &row.kerosene_l)?,
                gasoline_l: quantity(&month, "gasoline_l", &row.gasoline_l)?,
                power_supplier_id: id(row.power_supplier_id),
                power_menu_type: id(row.power_menu_type),
                target_month: month,
            });
        }

        let first = monthly_activities
            .first()
            .ok_or_else(|| Co2Error::InvalidRequest("no monthly rows".into()))?;
        let target_fiscal_year = fiscal_year_of(&first.target_month)?;

        Ok(BatchCalculationRequest {
            target_fiscal_year,
            monthly_activities,
        })
    }
}

impl crate::traits::WriteReport for Csv {
    fn write<W: Write>(mut w: W, res: &AnnualResult) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for m in &res.monthly_summaries {
            wrt.serialize(CsvOutRow {
                target_month: &m.target_month,
                electricity: m.co2_for(ActivityType::Electricity),
                city_gas: m.co2_for(ActivityType::CityGas),
                lp_gas: m.co2_for(ActivityType::LpGas),
                kerosene: m.co2_for(ActivityType::Kerosene),
                gasoline: m.co2_for(ActivityType::Gasoline),
                total_co2_kg: m.total_co2_kg,
            })?;
        }

        let annual = |a: ActivityType| round3(res.monthly_summaries.iter().map(|m| m.co2_for(a)).sum());
        wrt.serialize(CsvOutRow {
            target_month: "annual",
            electricity: annual(ActivityType::Electricity),
            city_gas: annual(ActivityType::CityGas),
            lp_gas: annual(ActivityType::LpGas),
            kerosene: annual(ActivityType::Kerosene),
            gasoline: annual(ActivityType::Gasoline),
            total_co2_kg: res.annual_total_co2_kg,
        })?;
        wrt.flush()?;
        Ok(())
    }
}
