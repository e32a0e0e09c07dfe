use tracing::debug;

use crate::fueltax::csv_common::TripCsvCol;
use crate::fueltax::model::records::TripRecord;
use crate::util::rw::{DescribedReader, WriteHandle};

use super::{read_csv_rows, RecordCsvParseOptions};

type Error = String;

/// Loads trip records from a csv trip log.
///
/// Rows without a valid date are skipped with a warning on err_stream.
/// Miles which can't be parsed are read as 0 (also with a warning).
pub fn parse_trip_csv(
    desc_reader: &mut DescribedReader,
    parse_options: &RecordCsvParseOptions,
    err_stream: &mut WriteHandle,
) -> Result<Vec<TripRecord>, Error> {
    let mut trips = Vec::<TripRecord>::new();
    let mut skipped = 0;

    read_csv_rows(
        desc_reader,
        &TripCsvCol::get_csv_cols(),
        &TripCsvCol::required_cols(),
        err_stream,
        |mut row, err_stream| {
            let date = match row.take_date(TripCsvCol::DATE, parse_options, err_stream) {
                Some(d) => d,
                None => {
                    skipped += 1;
                    return;
                }
            };
            trips.push(TripRecord {
                date,
                miles_driven: row.take_decimal(TripCsvCol::MILES, err_stream),
                start_location: row.take_string(TripCsvCol::START_LOCATION),
                end_location: row.take_string(TripCsvCol::END_LOCATION),
            });
        },
    )?;

    debug!("parse_trip_csv: {}: {} trips, {} skipped", desc_reader.desc(), trips.len(), skipped);
    Ok(trips)
}

#[cfg(test)]
pub mod testlib {
    use crate::fueltax::{csv_common::TripCsvCol, io::testlib::TestCsvRow};

    #[derive(Default)]
    pub struct TestTripCsvRow {
        pub d: &'static str,  // DATE
        pub mi: &'static str, // MILES
        pub s: &'static str,  // START_LOCATION
        pub e: &'static str,  // END_LOCATION
    }

    impl TestCsvRow for TestTripCsvRow {
        fn get_col(&self, col: &str) -> &'static str {
            match col {
                TripCsvCol::DATE => self.d,
                TripCsvCol::MILES => self.mi,
                TripCsvCol::START_LOCATION => self.s,
                TripCsvCol::END_LOCATION => self.e,
                _ => panic!("Invalid col {}", col),
            }
        }
    }
}
