//! Simple XML report: <annual_result><factors_version/>...<month>...</month></annual_result>

use crate::{
    error::{Co2Error, Result},
    model::AnnualResult,
};
use quick_xml::se::to_string;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize, Debug)]
struct XmlItem {
    activity_type: String,
    usage_value: f64,
    usage_unit: String,
    factor_used: f64,
    co2_kg: f64,
}

#[derive(Serialize, Debug)]
struct XmlMonth {
    target_month: String,
    total_co2_kg: f64,
    #[serde(rename = "item")]
    details: Vec<XmlItem>,
}

#[derive(Serialize, Debug)]
#[serde(rename = "annual_result")]
struct XmlAnnual {
    factors_version: String,
    annual_total_co2_kg: f64,
    #[serde(rename = "month")]
    months: Vec<XmlMonth>,
}

pub struct SimpleXml;

impl crate::traits::WriteReport for SimpleXml {
    fn write<W: Write>(mut w: W, res: &AnnualResult) -> Result<()> {
        let months = res
            .monthly_summaries
            .iter()
            .map(|m| XmlMonth {
                target_month: m.target_month.clone(),
                total_co2_kg: m.total_co2_kg,
                details: m
                    .details
                    .iter()
                    .map(|d| XmlItem {
                        activity_type: d.activity_type.as_str().into(),
                        usage_value: d.usage_value,
                        usage_unit: d.usage_unit.clone(),
                        factor_used: d.factor_used,
                        co2_kg: d.co2_kg,
                    })
                    .collect(),
            })
            .collect();

        let x = XmlAnnual {
            factors_version: res.factors_version.clone(),
            annual_total_co2_kg: res.annual_total_co2_kg,
            months,
        };

        let s = to_string(&x).map_err(|e| Co2Error::Xml(format!("{e}")))?;
        w.write_all(s.as_bytes())?;
        writeln!(w)?;
        Ok(())
    }
}
