use co2calclib::{
    calculate_annual_emissions,
    formats::{csv::Csv, json::Json},
    traits::{ReadRequest, WriteReport},
    FactorCatalog,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // JSON request on stdin -> monthly CSV report on stdout, bundled factors
    let catalog = FactorCatalog::builtin()?;
    let req = Json::read(std::io::BufReader::new(std::io::stdin()))?;
    let res = calculate_annual_emissions(&req, &catalog)?;
    Csv::write(std::io::stdout(), &res)?;
    Ok(())
}
