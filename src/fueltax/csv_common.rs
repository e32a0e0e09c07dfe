use std::collections::HashSet;

/// Columns of a trip log csv. Names are matched case-insensitively.
pub struct TripCsvCol();
impl TripCsvCol {
    pub const DATE: &'static str = "date";
    pub const MILES: &'static str = "miles";
    pub const START_LOCATION: &'static str = "start location";
    pub const END_LOCATION: &'static str = "end location";

    pub fn get_csv_cols() -> HashSet<&'static str> {
        HashSet::from(TripCsvCol::export_order_cols())
    }

    pub fn export_order_cols() -> [&'static str; 4] {
        [
            TripCsvCol::DATE,
            TripCsvCol::MILES,
            TripCsvCol::START_LOCATION,
            TripCsvCol::END_LOCATION,
        ]
    }

    pub fn required_cols() -> [&'static str; 2] {
        [TripCsvCol::DATE, TripCsvCol::MILES]
    }
}

/// Columns of a fuel receipt csv.
pub struct FuelCsvCol();
impl FuelCsvCol {
    pub const DATE: &'static str = "date";
    pub const LOCATION: &'static str = "location";
    pub const GALLONS: &'static str = "gallons";
    pub const TOTAL_AMOUNT: &'static str = "total amount";

    pub fn get_csv_cols() -> HashSet<&'static str> {
        HashSet::from(FuelCsvCol::export_order_cols())
    }

    pub fn export_order_cols() -> [&'static str; 4] {
        [
            FuelCsvCol::DATE,
            FuelCsvCol::LOCATION,
            FuelCsvCol::GALLONS,
            FuelCsvCol::TOTAL_AMOUNT,
        ]
    }

    pub fn required_cols() -> [&'static str; 2] {
        [FuelCsvCol::DATE, FuelCsvCol::GALLONS]
    }
}

#[cfg(test)]
mod tests {
    use super::{FuelCsvCol, TripCsvCol};

    #[test]
    fn test_required_cols_are_known() {
        let trip_cols = TripCsvCol::get_csv_cols();
        assert_eq!(trip_cols.len(), TripCsvCol::export_order_cols().len());
        for c in TripCsvCol::required_cols() {
            assert!(trip_cols.contains(c), "{c}");
        }

        let fuel_cols = FuelCsvCol::get_csv_cols();
        assert_eq!(fuel_cols.len(), FuelCsvCol::export_order_cols().len());
        for c in FuelCsvCol::required_cols() {
            assert!(fuel_cols.contains(c), "{c}");
        }
    }
}
