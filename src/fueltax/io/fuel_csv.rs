use tracing::debug;

use crate::fueltax::csv_common::FuelCsvCol;
use crate::fueltax::model::records::FuelPurchaseRecord;
use crate::util::rw::{DescribedReader, WriteHandle};

use super::{read_csv_rows, RecordCsvParseOptions};

type Error = String;

/// Loads fuel purchase records from a csv of receipts.
pub fn parse_fuel_csv(
    desc_reader: &mut DescribedReader,
    parse_options: &RecordCsvParseOptions,
    err_stream: &mut WriteHandle,
) -> Result<Vec<FuelPurchaseRecord>, Error> {
    let mut receipts = Vec::<FuelPurchaseRecord>::new();

    read_csv_rows(
        desc_reader,
        &FuelCsvCol::get_csv_cols(),
        &FuelCsvCol::required_cols(),
        err_stream,
        |mut row, err_stream| {
            if let Some(purchase_date) =
                row.take_date(FuelCsvCol::DATE, parse_options, err_stream)
            {
                receipts.push(FuelPurchaseRecord {
                    purchase_date,
                    location: row.take_string(FuelCsvCol::LOCATION),
                    gallons_purchased: row.take_decimal(FuelCsvCol::GALLONS, err_stream),
                    total_amount_paid: row.take_decimal(FuelCsvCol::TOTAL_AMOUNT, err_stream),
                });
            }
        },
    )?;

    debug!("parse_fuel_csv: {}: {} receipts", desc_reader.desc(), receipts.len());
    Ok(receipts)
}

#[cfg(test)]
pub mod testlib {
    use crate::fueltax::{csv_common::FuelCsvCol, io::testlib::TestCsvRow};

    #[derive(Default)]
    pub struct TestFuelCsvRow {
        pub d: &'static str,   // DATE
        pub loc: &'static str, // LOCATION
        pub gal: &'static str, // GALLONS
        pub amt: &'static str, // TOTAL_AMOUNT
    }

    impl TestCsvRow for TestFuelCsvRow {
        fn get_col(&self, col: &str) -> &'static str {
            match col {
                FuelCsvCol::DATE => self.d,
                FuelCsvCol::LOCATION => self.loc,
                FuelCsvCol::GALLONS => self.gal,
                FuelCsvCol::TOTAL_AMOUNT => self.amt,
                _ => panic!("Invalid col {}", col),
            }
        }
    }
}
