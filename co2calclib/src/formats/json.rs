//! JSON request/response, field names as in the calculation API:
//! `{"target_fiscal_year": 2025, "monthly_activities": [{"target_month": "2025-04", ...}]}`

use crate::{
    error::Result,
    model::{AnnualResult, BatchCalculationRequest},
};
use std::io::{BufRead, Write};

pub struct Json;

impl Json {
    /// Writes a request, e.g. a fiscal-year template for the caller to fill in.
    pub fn write_request<W: Write>(mut w: W, req: &BatchCalculationRequest) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, req)?;
        writeln!(w)?;
        Ok(())
    }
}

impl crate::traits::ReadRequest for Json {
    fn read<R: BufRead>(r: R) -> Result<BatchCalculationRequest> {
        Ok(serde_json::from_reader(r)?)
    }
}

impl crate::traits::WriteReport for Json {
    fn write<W: Write>(mut w: W, res: &AnnualResult) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, res)?;
        writeln!(w)?;
        Ok(())
    }
}
