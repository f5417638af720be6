//! Unified read/write traits over std::io::{BufRead, Write}.

use crate::{
    error::Result,
    model::{AnnualResult, BatchCalculationRequest},
};
use std::io::{BufRead, Write};

pub trait ReadRequest {
    fn read<R: BufRead>(r: R) -> Result<BatchCalculationRequest>;
}

pub trait WriteReport {
    fn write<W: Write>(w: W, res: &AnnualResult) -> Result<()>;
}

pub trait Format: ReadRequest + WriteReport {}
impl<T: ReadRequest + WriteReport> Format for T {}
