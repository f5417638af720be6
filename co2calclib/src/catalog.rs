//! Emission factor catalog. Built and validated once, read-only afterwards.
//!
//! File layout (JSON):
//! `{version, data_source?, electricity_unit, fuel: {kind: {unit, factor}},
//! electricity: {provider: {plan: {factor, factor_type, name, source}}}}`

use crate::{
    error::{Co2Error, Result},
    model::FuelKind,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// R4 (2024 publication) edition bundled with the crate.
const BUILTIN_R4_2024: &str = include_str!("../data/factors_r4_2024.json");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FactorType {
    Basic,
    Adjusted,
}

impl FactorType {
    pub fn as_str(self) -> &'static str {
        match self {
            FactorType::Basic => "basic",
            FactorType::Adjusted => "adjusted",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelFactor {
    pub unit: String,
    pub factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElectricityFactor {
    pub factor: f64,
    pub factor_type: FactorType,
    pub name: String,
    pub source: String,
}

/// A resolved factor together with the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor<'a> {
    pub value: f64,
    pub unit: &'a str,
}

impl<'a> Factor<'a> {
    /// Consumption unit, i.e. `kWh` for `kg-CO2/kWh`.
    pub fn usage_unit(&self) -> &'a str {
        self.unit.rsplit_once('/').map_or(self.unit, |(_, u)| u)
    }
}

/// One row of [`FactorCatalog::electricity_plans`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanEntry<'a> {
    pub provider_id: &'a str,
    pub plan_id: &'a str,
    pub plan: &'a ElectricityFactor,
}

#[derive(Deserialize)]
struct CatalogFile {
    version: String,
    #[serde(default)]
    data_source: Option<String>,
    electricity_unit: String,
    fuel: HashMap<FuelKind, FuelFactor>,
    electricity: HashMap<String, HashMap<String, ElectricityFactor>>,
}

#[derive(Debug, Clone)]
pub struct FactorCatalog {
    version: String,
    data_source: Option<String>,
    electricity_unit: String,
    fuel: HashMap<FuelKind, FuelFactor>,
    electricity: HashMap<String, HashMap<String, ElectricityFactor>>,
}

impl FactorCatalog {
    /// Validates and freezes a factor table.
    ///
    /// Fails with [`Co2Error::Catalog`] when a fuel kind is missing, a factor is
    /// negative or not finite, a unit has no `/`, or the version is empty.
    pub fn new(
        version: impl Into<String>,
        electricity_unit: impl Into<String>,
        fuel: HashMap<FuelKind, FuelFactor>,
        electricity: HashMap<String, HashMap<String, ElectricityFactor>>,
    ) -> Result<Self> {
        let catalog = FactorCatalog {
            version: version.into(),
            data_source: None,
            electricity_unit: electricity_unit.into(),
            fuel,
            electricity,
        };
        catalog.check()?;
        Ok(catalog)
    }

    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = Some(data_source.into());
        self
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_R4_2024)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: CatalogFile =
            serde_json::from_str(s).map_err(|e| Co2Error::Catalog(format!("{e}")))?;
        Self::from_file(raw, "inline table")
    }

    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        Self::read_from(r, "reader")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file), &path.display().to_string())
    }

    fn read_from<R: Read>(r: R, origin: &str) -> Result<Self> {
        let raw: CatalogFile =
            serde_json::from_reader(r).map_err(|e| Co2Error::Catalog(format!("{origin}: {e}")))?;
        Self::from_file(raw, origin)
    }

    fn from_file(raw: CatalogFile, origin: &str) -> Result<Self> {
        let mut catalog = Self::new(raw.version, raw.electricity_unit, raw.fuel, raw.electricity)?;
        catalog.data_source = raw.data_source;
        info!(
            "factor catalog {} loaded from {origin}: {} fuel factors, {} power suppliers",
            catalog.version,
            catalog.fuel.len(),
            catalog.electricity.len()
        );
        Ok(catalog)
    }

    fn check(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Co2Error::Catalog("empty version".into()));
        }
        check_unit("electricity", &self.electricity_unit)?;

        for kind in FuelKind::ALL {
            let f = self
                .fuel
                .get(&kind)
                .ok_or_else(|| Co2Error::Catalog(format!("missing fuel factor: {kind}")))?;
            check_unit(kind.as_str(), &f.unit)?;
            check_value(kind.as_str(), f.factor)?;
        }

        for (provider, plans) in &self.electricity {
            for (plan, f) in plans {
                check_value(&format!("{provider}/{plan}"), f.factor)?;
            }
        }
        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn data_source(&self) -> Option<&str> {
        self.data_source.as_deref()
    }

    pub fn electricity_unit(&self) -> &str {
        &self.electricity_unit
    }

    pub fn lookup_fuel_factor(&self, kind: FuelKind) -> Option<Factor<'_>> {
        self.fuel.get(&kind).map(|f| Factor {
            value: f.factor,
            unit: &f.unit,
        })
    }

    /// Two-level lookup, case-sensitive on both ids.
    pub fn lookup_electricity_factor(&self, provider_id: &str, plan_id: &str) -> Option<Factor<'_>> {
        self.electricity_plan(provider_id, plan_id).map(|p| Factor {
            value: p.factor,
            unit: &self.electricity_unit,
        })
    }

    pub fn electricity_plan(&self, provider_id: &str, plan_id: &str) -> Option<&ElectricityFactor> {
        self.electricity.get(provider_id)?.get(plan_id)
    }

    /// All supplier plans, sorted by provider then plan id.
    pub fn electricity_plans(&self) -> Vec<PlanEntry<'_>> {
        let mut out: Vec<PlanEntry<'_>> = self
            .electricity
            .iter()
            .flat_map(|(provider, plans)| {
                plans.iter().map(move |(plan_id, plan)| PlanEntry {
                    provider_id: provider,
                    plan_id,
                    plan,
                })
            })
            .collect();
        out.sort_by(|a, b| (a.provider_id, a.plan_id).cmp(&(b.provider_id, b.plan_id)));
        out
    }
}

fn check_unit(label: &str, unit: &str) -> Result<()> {
    match unit.rsplit_once('/') {
        Some((_, u)) if !u.is_empty() => Ok(()),
        _ => Err(Co2Error::Catalog(format!("{label}: unit '{unit}' has no consumption part"))),
    }
}

fn check_value(label: &str, factor: f64) -> Result<()> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(())
    } else {
        Err(Co2Error::Catalog(format!("{label}: invalid factor {factor}")))
    }
}
