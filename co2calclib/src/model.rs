//! Domain models: the request/response layer shared by the engine and every format.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    CityGas,
    LpGas,
    Kerosene,
    Gasoline,
}

impl FuelKind {
    /// Output order of fuel line items.
    pub const ALL: [FuelKind; 4] = [
        FuelKind::CityGas,
        FuelKind::LpGas,
        FuelKind::Kerosene,
        FuelKind::Gasoline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FuelKind::CityGas => "city_gas",
            FuelKind::LpGas => "lp_gas",
            FuelKind::Kerosene => "kerosene",
            FuelKind::Gasoline => "gasoline",
        }
    }

    /// Unit of the consumption figure as reported in line items.
    pub fn usage_unit(self) -> &'static str {
        match self {
            FuelKind::CityGas => "m³",
            FuelKind::LpGas => "kg",
            FuelKind::Kerosene | FuelKind::Gasoline => "L",
        }
    }

    pub fn activity_type(self) -> ActivityType {
        match self {
            FuelKind::CityGas => ActivityType::CityGas,
            FuelKind::LpGas => ActivityType::LpGas,
            FuelKind::Kerosene => ActivityType::Kerosene,
            FuelKind::Gasoline => ActivityType::Gasoline,
        }
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Electricity,
    CityGas,
    LpGas,
    Kerosene,
    Gasoline,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Electricity,
        ActivityType::CityGas,
        ActivityType::LpGas,
        ActivityType::Kerosene,
        ActivityType::Gasoline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Electricity => "electricity",
            ActivityType::CityGas => "city_gas",
            ActivityType::LpGas => "lp_gas",
            ActivityType::Kerosene => "kerosene",
            ActivityType::Gasoline => "gasoline",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One month of household consumption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MonthlyActivity {
    /// `YYYY-MM`
    pub target_month: String,
    #[serde(default)]
    pub usage_kwh: f64,
    #[serde(default)]
    pub power_supplier_id: Option<String>,
    #[serde(default, alias = "power_menu_id")]
    pub power_menu_type: Option<String>,
    #[serde(default)]
    pub city_gas_m3: f64,
    #[serde(default)]
    pub lp_gas_kg: f64,
    #[serde(default)]
    pub kerosene_l: f64,
    #[serde(default)]
    pub gasoline_l: f64,
}

impl MonthlyActivity {
    pub fn new(target_month: impl Into<String>) -> Self {
        MonthlyActivity {
            target_month: target_month.into(),
            ..Default::default()
        }
    }

    pub fn fuel_usage(&self, kind: FuelKind) -> f64 {
        match kind {
            FuelKind::CityGas => self.city_gas_m3,
            FuelKind::LpGas => self.lp_gas_kg,
            FuelKind::Kerosene => self.kerosene_l,
            FuelKind::Gasoline => self.gasoline_l,
        }
    }

    /// Supplier and menu ids, treating empty strings as absent.
    pub fn power_plan(&self) -> Option<(&str, &str)> {
        let supplier = self.power_supplier_id.as_deref().filter(|s| !s.is_empty())?;
        let menu = self.power_menu_type.as_deref().filter(|s| !s.is_empty())?;
        Some((supplier, menu))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchCalculationRequest {
    /// April-start year: 2025 covers 2025-04 .. 2026-03.
    pub target_fiscal_year: i32,
    pub monthly_activities: Vec<MonthlyActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmissionLineItem {
    pub activity_type: ActivityType,
    pub usage_value: f64,
    pub usage_unit: String,
    pub factor_used: f64,
    pub co2_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub target_month: String,
    pub total_co2_kg: f64,
    pub details: Vec<EmissionLineItem>,
}

impl MonthlySummary {
    /// CO2 of one activity in this month, 0 when it had no usage.
    pub fn co2_for(&self, activity: ActivityType) -> f64 {
        self.details
            .iter()
            .find(|d| d.activity_type == activity)
            .map_or(0.0, |d| d.co2_kg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnualResult {
    pub factors_version: String,
    pub annual_total_co2_kg: f64,
    pub monthly_summaries: Vec<MonthlySummary>,
}

pub type BatchCalculationResponse = AnnualResult;
