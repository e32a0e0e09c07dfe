pub mod fuel_csv;
pub mod trip_csv;

use std::borrow::BorrowMut;
use std::collections::{HashMap, HashSet};
use std::io::Read;

use rust_decimal::Decimal;
use time::Date;

use crate::util::date::DynDateFormat;
use crate::util::decimal::parse_lenient_decimal;
use crate::util::rw::{DescribedReader, WriteHandle};
use crate::write_errln;

type Error = String;

#[derive(Debug, Default)]
pub struct RecordCsvParseOptions {
    pub date_format: Option<DynDateFormat>,
}

/// The recognized, non-empty (trimmed) cells of one csv row.
pub(super) struct CsvRow<'a> {
    // Starts at 2 for the user, since the header is row 1.
    pub row_num: usize,
    pub csv_desc: &'a str,
    pub values: HashMap<&'static str, String>,
}

impl<'a> CsvRow<'a> {
    pub fn take(&mut self, col: &'static str) -> Option<String> {
        self.values.remove(col)
    }

    /// None if the date is missing or can't be parsed. Either way, a warning
    /// is written and the caller should skip the row.
    pub fn take_date(
        &mut self,
        col: &'static str,
        parse_options: &RecordCsvParseOptions,
        err_stream: &mut WriteHandle,
    ) -> Option<Date> {
        let (row_num, csv_desc) = (self.row_num, self.csv_desc);
        match self.take(col) {
            Some(s) => match crate::util::date::parse_date(&s, &parse_options.date_format) {
                Ok(d) => Some(d),
                Err(e) => {
                    write_errln!(
                        err_stream,
                        "Warning: Skipping row {row_num} of {csv_desc}: \
                         Failed to parse {col} \"{s}\": {e}"
                    );
                    None
                }
            },
            None => {
                write_errln!(
                    err_stream,
                    "Warning: Skipping row {row_num} of {csv_desc}: No {col}"
                );
                None
            }
        }
    }

    /// Missing values are zero. Values which are not numbers are also zero,
    /// with a warning.
    pub fn take_decimal(&mut self, col: &'static str, err_stream: &mut WriteHandle) -> Decimal {
        let (row_num, csv_desc) = (self.row_num, self.csv_desc);
        match self.take(col) {
            Some(s) => parse_lenient_decimal(&s).unwrap_or_else(|e| {
                write_errln!(
                    err_stream,
                    "Warning: Row {row_num} of {csv_desc}: Invalid {col} \"{s}\" ({e}). Using 0"
                );
                Decimal::ZERO
            }),
            None => Decimal::ZERO,
        }
    }

    pub fn take_string(&mut self, col: &'static str) -> String {
        self.take(col).unwrap_or_default()
    }
}

/// Reads a header-driven csv, and calls row_fn with each row.
///
/// Header names are matched case-insensitively against known_cols. Unknown
/// columns are ignored with a warning. A missing required column, or a
/// malformed csv, is an error.
pub(super) fn read_csv_rows<F>(
    desc_reader: &mut DescribedReader,
    known_cols: &HashSet<&'static str>,
    required_cols: &[&'static str],
    err_stream: &mut WriteHandle,
    mut row_fn: F,
) -> Result<(), Error>
where
    F: FnMut(CsvRow, &mut WriteHandle),
{
    let csv_desc = desc_reader.desc().to_string();
    let mut reader_box = desc_reader
        .reader()
        .map_err(|e| format!("Failed to open {csv_desc}: {e}"))?;
    let reader: &mut dyn Read = reader_box.borrow_mut();

    let mut csv_r = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut col_index_to_name: HashMap<usize, &'static str> = HashMap::new();
    let mut found_col_names: HashSet<&'static str> = HashSet::new();

    let headers_res = csv_r
        .headers()
        .map_err(|e| format!("Error in csv headers of {csv_desc}: {e}"))?;
    for (i, col) in headers_res.iter().enumerate() {
        let lower_col = col.to_lowercase();
        let san_col = lower_col.trim();
        match known_cols.get(san_col).copied() {
            Some(static_str) => {
                col_index_to_name.insert(i, static_str);
                found_col_names.insert(static_str);
            }
            None => {
                write_errln!(
                    err_stream,
                    "Warning: Unrecognized column in {csv_desc}: {san_col}"
                );
            }
        }
    }

    for col in required_cols {
        if !found_col_names.contains(col) {
            return Err(format!("{csv_desc} is missing required column '{col}'"));
        }
    }

    let col_index_to_name = col_index_to_name;

    for (i, record_res) in csv_r.records().enumerate() {
        let row_num = i + 2;

        let record = record_res.map_err(|e| {
            format!("Error reading csv record in {csv_desc} at row {row_num}: {e}")
        })?;

        let mut values = HashMap::<&'static str, String>::new();
        for (i, col_val) in record.iter().enumerate() {
            if col_val.trim().is_empty() {
                continue;
            }
            if let Some(&col_name) = col_index_to_name.get(&i) {
                values.insert(col_name, col_val.trim().to_string());
            }
        }

        row_fn(CsvRow { row_num, csv_desc: &csv_desc, values }, err_stream);
    }

    Ok(())
}
