use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;

use crate::{
    app::{
        input_parse::{parse_date_format, parse_default_efficiency, parse_period_or_current},
        list_jurisdictions_to_console, run_ifta_app_to_console, Options,
    },
    fueltax::{
        bookkeeping::SurchargeRule,
        csv_common::{FuelCsvCol, TripCsvCol},
        io::RecordCsvParseOptions,
        Period, ReportOptions,
    },
    util::rw::{DescribedReader, WriteHandle},
    write_errln,
};

const ABOUT: &str = "IFTA quarterly fuel tax report generator";

fn get_long_about() -> String {
    format!("\
A cli tool which generates IFTA (International Fuel Tax Agreement) quarterly
reports from trip logs and fuel receipts.

Fuel consumed in each jurisdiction is estimated from its miles and the fleet
average MPG for the quarter, and taxed at that jurisdiction's rate. Tax already
paid at the pump is credited against it.

Trip CSVs should contain a header with these column names:
{}
Fuel CSVs should contain a header with these column names:
{}
Locations are free text, like \"Denver, CO\" or \"Topeka, Kansas\".",
        TripCsvCol::export_order_cols().iter().join(", "),
        FuelCsvCol::export_order_cols().iter().join(", "))
}

#[derive(Parser, Debug)]
#[command(version = crate::app::IFTA_APP_VERSION,
          about = ABOUT, long_about = get_long_about())]
pub struct Args {
    /// Trip log CSV file. May be provided multiple times.
    #[arg(short, long = "trips", required_unless_present = "list_jurisdictions")]
    pub trip_files: Vec<String>,

    /// Fuel receipt CSV file. May be provided multiple times.
    #[arg(short, long = "fuel")]
    pub fuel_files: Vec<String>,

    /// Quarter to report on. Eg. 2024Q1 or Q1-2024.
    /// The default is the current quarter.
    #[arg(short, long)]
    pub period: Option<String>,

    /// Fleet MPG to use when there is no fuel data for the quarter.
    #[arg(long, default_value = "6.5")]
    pub default_mpg: String,

    /// Do not compute weight-distance surcharges (Kentucky KYU)
    #[arg(long, default_value_t = false)]
    pub no_surcharge: bool,

    /// Format of how dates appear in the csv files.
    /// The default is "[year]-[month]-[day]".
    ///
    /// See https://time-rs.github.io/book/api/format-description.html
    #[arg(long)]
    pub date_fmt: Option<String>,

    /// Write output as CSV to the specified directory.
    #[arg(short = 'd', long)]
    pub csv_output_dir: Option<String>,

    /// Write the report as JSON
    #[arg(long, default_value_t = false, conflicts_with = "csv_output_dir")]
    pub json: bool,

    /// Print verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Print the jurisdictions and their fuel tax rates, and exit
    #[arg(long, default_value_t = false)]
    pub list_jurisdictions: bool,
}

pub type Error = String;

pub fn args_to_options(args: &Args) -> Result<Options, Error> {
    let default_efficiency = parse_default_efficiency(&args.default_mpg)?;
    let date_format = parse_date_format(&args.date_fmt)?;
    Ok(Options {
        report_options: ReportOptions {
            default_efficiency,
            surcharge_rule: if args.no_surcharge {
                None
            } else {
                Some(SurchargeRule::default())
            },
        },
        csv_parse_options: RecordCsvParseOptions { date_format },
        csv_output_dir: args.csv_output_dir.clone(),
        json_output: args.json,
    })
}

pub fn args_to_period(args: &Args) -> Result<Period, Error> {
    parse_period_or_current(args.period.as_deref())
}

fn file_readers(paths: &[String]) -> Vec<DescribedReader> {
    paths
        .iter()
        .map(|p| DescribedReader::from_file_path(PathBuf::from(p)))
        .collect()
}

/// Returned Err is for exit code determination only. Errors are written
/// to stderr.
pub fn command_main() -> Result<(), ()> {
    crate::tracing::setup_tracing();

    let args = Args::parse();
    tracing::debug!("command_main: {:#?}", args);
    crate::log::set_verbose(args.verbose);

    let mut err_printer = WriteHandle::stderr_write_handle();

    let options = args_to_options(&args)
        .map_err(|e| write_errln!(err_printer, "Error: {e}"))?;

    if args.list_jurisdictions {
        return list_jurisdictions_to_console(options, err_printer);
    }

    let period = args_to_period(&args)
        .map_err(|e| write_errln!(err_printer, "Error: {e}"))?;
    crate::verboseln!("Reporting on {} ({})", period, period.date_range_string());

    run_ifta_app_to_console(
        file_readers(&args.trip_files),
        file_readers(&args.fuel_files),
        period,
        options,
        err_printer,
    )
}
