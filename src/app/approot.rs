use crate::{
    fueltax::{
        build_quarterly_report,
        io::{fuel_csv::parse_fuel_csv, trip_csv::parse_trip_csv, RecordCsvParseOptions},
        render::{render_jurisdictions_table, render_report, ReportTables},
        FuelPurchaseRecord, Period, QuarterlyTaxReport, ReportOptions, TripRecord,
    },
    util::rw::{DescribedReader, WriteHandle},
    verboseln, write_errln,
};

use super::outfmt::{
    csv::CsvWriter,
    json::JsonWriter,
    model::{IftaWriter, OutputType},
    text::TextWriter,
};

pub type Error = String;

#[derive(Debug, Default)]
pub struct Options {
    pub report_options: ReportOptions,
    pub csv_parse_options: RecordCsvParseOptions,
    pub csv_output_dir: Option<String>,
    pub json_output: bool,
}

/// Reads every trip csv, in order, into one list.
pub fn load_trip_records(
    csv_file_readers: Vec<DescribedReader>,
    parse_options: &RecordCsvParseOptions,
    err_printer: &mut WriteHandle,
) -> Result<Vec<TripRecord>, Error> {
    let mut all_trips = Vec::<TripRecord>::new();
    for mut csv_reader in csv_file_readers {
        let mut trips = parse_trip_csv(&mut csv_reader, parse_options, err_printer)?;
        verboseln!("Loaded {} trips from {}", trips.len(), csv_reader.desc());
        all_trips.append(&mut trips);
    }
    Ok(all_trips)
}

pub fn load_fuel_records(
    csv_file_readers: Vec<DescribedReader>,
    parse_options: &RecordCsvParseOptions,
    err_printer: &mut WriteHandle,
) -> Result<Vec<FuelPurchaseRecord>, Error> {
    let mut all_receipts = Vec::<FuelPurchaseRecord>::new();
    for mut csv_reader in csv_file_readers {
        let mut receipts = parse_fuel_csv(&mut csv_reader, parse_options, err_printer)?;
        verboseln!("Loaded {} fuel receipts from {}", receipts.len(), csv_reader.desc());
        all_receipts.append(&mut receipts);
    }
    Ok(all_receipts)
}

/// Loads the records and builds the report for period. Nothing is rendered.
pub fn run_ifta_app_to_report(
    trip_csv_readers: Vec<DescribedReader>,
    fuel_csv_readers: Vec<DescribedReader>,
    period: Period,
    options: &Options,
    mut err_printer: WriteHandle,
) -> Result<QuarterlyTaxReport, Error> {
    let trips = load_trip_records(
        trip_csv_readers, &options.csv_parse_options, &mut err_printer)?;
    let receipts = load_fuel_records(
        fuel_csv_readers, &options.csv_parse_options, &mut err_printer)?;

    let report = build_quarterly_report(&trips, &receipts, period, &options.report_options);

    if report.unresolved_trip_count > 0 || report.unresolved_receipt_count > 0 {
        write_errln!(
            err_printer,
            "Warning: {} trips and {} fuel receipts in {} had unrecognized locations",
            report.unresolved_trip_count,
            report.unresolved_receipt_count,
            period
        );
    }
    Ok(report)
}

pub struct AppRenderResult {
    pub report: QuarterlyTaxReport,
    pub tables: ReportTables,
}

/// Runs the app up to a generic render model, which can then be fed to any
/// of the output writers.
pub fn run_ifta_app_to_render_model(
    trip_csv_readers: Vec<DescribedReader>,
    fuel_csv_readers: Vec<DescribedReader>,
    period: Period,
    options: &Options,
    err_printer: WriteHandle,
) -> Result<AppRenderResult, Error> {
    let report = run_ifta_app_to_report(
        trip_csv_readers, fuel_csv_readers, period, options, err_printer)?;
    let tables = render_report(&report);
    Ok(AppRenderResult { report, tables })
}

/// Returned Err is for exit code determination only.
/// All errors are written to err_printer.
pub fn run_ifta_app_to_writer(
    writer: &mut dyn IftaWriter,
    trip_csv_readers: Vec<DescribedReader>,
    fuel_csv_readers: Vec<DescribedReader>,
    period: Period,
    options: &Options,
    mut err_printer: WriteHandle,
) -> Result<AppRenderResult, ()> {
    let render_res = match run_ifta_app_to_render_model(
        trip_csv_readers, fuel_csv_readers, period, options, err_printer.clone())
    {
        Ok(r) => r,
        Err(e) => {
            write_errln!(err_printer, "{}", e);
            return Err(());
        }
    };

    if let Err(e) = writer.write_report(&render_res.report, &render_res.tables) {
        write_errln!(err_printer, "{}", e);
        return Err(());
    }

    Ok(render_res)
}

fn make_console_writer(
    options: &Options,
    err_printer: &mut WriteHandle,
) -> Result<Box<dyn IftaWriter>, ()> {
    if let Some(dir_path) = &options.csv_output_dir {
        return match CsvWriter::new(dir_path) {
            Ok(w) => Ok(Box::new(w)),
            Err(e) => {
                write_errln!(err_printer, "Failed to create {dir_path}: {e}");
                Err(())
            }
        };
    }
    let out = WriteHandle::stdout_write_handle();
    if options.json_output {
        Ok(Box::new(JsonWriter::new(out)))
    } else {
        Ok(Box::new(TextWriter::new(out)))
    }
}

pub fn run_ifta_app_to_console(
    trip_csv_readers: Vec<DescribedReader>,
    fuel_csv_readers: Vec<DescribedReader>,
    period: Period,
    options: Options,
    mut err_printer: WriteHandle,
) -> Result<(), ()> {
    let mut writer = make_console_writer(&options, &mut err_printer)?;

    run_ifta_app_to_writer(
        writer.as_mut(), trip_csv_readers, fuel_csv_readers, period, &options,
        err_printer.clone())?;

    writer.finish().map_err(|e| write_errln!(err_printer, "{e}"))
}

/// Prints the jurisdiction reference table.
pub fn list_jurisdictions_to_writer(
    writer: &mut dyn IftaWriter,
    mut err_printer: WriteHandle,
) -> Result<(), ()> {
    writer
        .print_render_table(OutputType::Jurisdictions, "", &render_jurisdictions_table())
        .map_err(|e| write_errln!(err_printer, "Rendering jurisdictions: {e}"))
}

pub fn list_jurisdictions_to_console(
    options: Options,
    mut err_printer: WriteHandle,
) -> Result<(), ()> {
    let mut writer = make_console_writer(&options, &mut err_printer)?;
    list_jurisdictions_to_writer(writer.as_mut(), err_printer.clone())?;
    writer.finish().map_err(|e| write_errln!(err_printer, "{e}"))
}
