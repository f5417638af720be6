use clap::{Parser, ValueEnum};
use co2calclib::{
    calculate_annual_emissions,
    error::{Co2Error, ErrorKind, Result},
    formats::{csv::Csv, json::Json, xml::SimpleXml},
    traits::{ReadRequest, WriteReport},
    validate::validate_request,
    FactorCatalog,
};
use log::info;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InFmt {
    Json,
    Csv,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutFmt {
    Json,
    Csv,
    Xml,
}

#[derive(Parser, Debug)]
#[command(name = "co2calc", version, about = "Fiscal-year CO2 emissions from household energy use")]
struct Cli {
    /// Input file (stdin by default)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Output file (stdout by default)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Input format
    #[arg(long = "in-format", value_enum, default_value = "json")]
    in_format: InFmt,

    /// Output format
    #[arg(long = "out-format", value_enum, default_value = "json")]
    out_format: OutFmt,

    /// Emission factor table (JSON); the bundled R4 2024 edition by default
    #[arg(long = "factors")]
    factors: Option<PathBuf>,

    /// Override the fiscal year of the request
    #[arg(long = "fiscal-year")]
    fiscal_year: Option<i32>,

    /// Print the supplier plans of the factor table and exit
    #[arg(long = "list-factors")]
    list_factors: bool,

    /// Print an empty twelve-month request for this fiscal year and exit
    #[arg(long = "template", value_name = "YEAR")]
    template: Option<i32>,

    /// Supplier id preset in --template months
    #[arg(long = "supplier", default_value = "hokkaido_electric")]
    supplier: String,

    /// Menu id preset in --template months
    #[arg(long = "menu", default_value = "standard_plan")]
    menu: String,
}

fn open_output(path: Option<String>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    })
}

fn list_factors(catalog: &FactorCatalog, mut w: impl Write) -> Result<()> {
    writeln!(w, "factors {} ({})", catalog.version(), catalog.electricity_unit())?;
    if let Some(src) = catalog.data_source() {
        writeln!(w, "source: {src}")?;
    }
    for e in catalog.electricity_plans() {
        writeln!(
            w,
            "{}\t{}\t{:.3}\t{}\t{}\t{}",
            e.provider_id,
            e.plan_id,
            e.plan.factor,
            e.plan.factor_type.as_str(),
            e.plan.name,
            e.plan.source
        )?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    if let Some(year) = cli.template {
        let req = co2calclib::fiscal::template_request(year, &cli.supplier, &cli.menu);
        let mut writer = open_output(cli.output)?;
        Json::write_request(&mut writer, &req)?;
        return writer.flush().map_err(Co2Error::from);
    }

    let catalog = match &cli.factors {
        Some(path) => FactorCatalog::from_path(path)?,
        None => FactorCatalog::builtin()?,
    };

    if cli.list_factors {
        let mut writer = open_output(cli.output)?;
        list_factors(&catalog, &mut writer)?;
        return writer.flush().map_err(Co2Error::from);
    }

    // reader
    let reader: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    let mut req = match cli.in_format {
        InFmt::Json => Json::read(br),
        InFmt::Csv => Csv::read(br),
    }?;
    if let Some(year) = cli.fiscal_year {
        req.target_fiscal_year = year;
    }

    validate_request(&req)?;
    let res = calculate_annual_emissions(&req, &catalog)?;
    info!("{} months written as {:?}", res.monthly_summaries.len(), cli.out_format);

    // writer
    let mut writer = open_output(cli.output)?;
    match cli.out_format {
        OutFmt::Json => Json::write(&mut writer, &res),
        OutFmt::Csv => Csv::write(&mut writer, &res),
        OutFmt::Xml => SimpleXml::write(&mut writer, &res),
    }?;

    writer.flush().map_err(Co2Error::from)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("co2calc: {e}");
            match e.kind() {
                ErrorKind::Client => ExitCode::from(2),
                ErrorKind::Internal => ExitCode::FAILURE,
            }
        }
    }
}
