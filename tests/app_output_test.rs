mod common;

use std::path::Path;

use ifta::{
    app::{
        list_jurisdictions_to_writer,
        outfmt::{csv::CsvWriter, text::TextWriter},
        run_ifta_app_to_writer, Options,
    },
    fueltax::Period,
    testlib::{assert_re, assert_vec_eq},
    util::rw::{DescribedReader, WriteHandle},
};
use common::NonAutoCreatingTestDir;

fn sample_readers() -> (Vec<DescribedReader>, Vec<DescribedReader>) {
    (
        vec![DescribedReader::from_file_path(
            Path::new("./tests/data/sample_trips.csv").into())],
        vec![DescribedReader::from_file_path(
            Path::new("./tests/data/sample_fuel.csv").into())],
    )
}

fn q1() -> Period {
    Period::new(1, 2024).unwrap()
}

#[test]
fn test_csv_dir_output() {
    let dir = NonAutoCreatingTestDir::new();
    let dir_str = dir.path.to_str().unwrap().to_string();

    let mut writer = CsvWriter::new(&dir_str).unwrap();
    assert!(dir.path.is_dir());

    let (trips, fuel) = sample_readers();
    run_ifta_app_to_writer(
        &mut writer, trips, fuel, q1(), &Options::default(),
        WriteHandle::empty_write_handle())
        .unwrap();

    let breakdown = std::fs::read_to_string(dir.path.join("breakdown-2024-q1.csv")).unwrap();
    let lines: Vec<&str> = breakdown.lines().collect();
    assert_vec_eq(lines[..5].to_vec(), vec![
        "Jurisdiction,Miles,Fuel Purchased (gal),Fuel Used (gal),Tax Rate,Tax Owed,Tax Paid,Net Tax,Surcharge",
        "Kentucky (KY),1230,150.00,190.49,$0.2460,$46.86,$36.90,$9.96,$35.06",
        "Colorado (CO),700,120.50,108.41,$0.3250,$35.23,$39.16,-$3.93,",
        "Kansas (KS),496,90.00,76.74,$0.2600,$19.95,$23.40,-$3.45,",
        "Total,2522,390.50,375.63,,$102.04,$99.46,$2.58,$35.06",
    ]);
    // Notes follow, in the first column
    assert!(lines[5].starts_with("Fleet efficiency: 6.46 MPG"), "{}", lines[5]);
    assert!(lines.iter().any(|l| l.starts_with(
        "1 trip with an unrecognized location counted towards total miles only")));

    let summary = std::fs::read_to_string(dir.path.join("summary-2024-q1.csv")).unwrap();
    assert!(summary.starts_with("Item,Value\nPeriod,2024 Q1\n"), "{summary}");
    assert_re("Net Amount Due,\\$2\\.58", &summary);
    assert_re("Surcharges,\\$35\\.06", &summary);
}

#[test]
fn test_text_output() {
    let (out, buff) = WriteHandle::string_buff_write_handle();
    let (err_stream, err_buff) = WriteHandle::string_buff_write_handle();
    let mut writer = TextWriter::new(out);

    let (trips, fuel) = sample_readers();
    let res = run_ifta_app_to_writer(
        &mut writer, trips, fuel, q1(), &Options::default(), err_stream)
        .unwrap();
    assert_eq!(res.report.breakdown.len(), 3);

    let text = buff.borrow().as_str().to_string();
    assert!(text.starts_with("IFTA Summary for 2024 Q1\n"), "{text}");
    assert_re("Jurisdiction Breakdown for 2024 Q1", &text);
    assert_re(r"Kentucky \(KY\) +\| +1230", &text);
    assert_re("Surcharges are weight-distance taxes", &text);

    let errs = err_buff.borrow().as_str().to_string();
    assert_re("Unrecognized column in ./tests/data/sample_trips.csv: driver", &errs);
    assert_re("1 trips and 1 fuel receipts in 2024 Q1 had unrecognized locations", &errs);
}

#[test]
fn test_missing_file() {
    let (err_stream, err_buff) = WriteHandle::string_buff_write_handle();
    let mut writer = TextWriter::new(WriteHandle::empty_write_handle());
    let res = run_ifta_app_to_writer(
        &mut writer,
        vec![DescribedReader::from_file_path(Path::new("./tests/data/nope.csv").into())],
        vec![],
        q1(),
        &Options::default(),
        err_stream,
    );
    assert!(res.is_err());
    assert_re("^Failed to open ./tests/data/nope.csv: ", err_buff.borrow().as_str());
}

#[test]
fn test_list_jurisdictions_csv() {
    let dir = NonAutoCreatingTestDir::new();
    let mut writer = CsvWriter::new(dir.path.to_str().unwrap()).unwrap();
    list_jurisdictions_to_writer(&mut writer, WriteHandle::empty_write_handle()).unwrap();

    let text = std::fs::read_to_string(dir.path.join("jurisdictions.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 49);
    assert_eq!(lines[0], "Code,Jurisdiction,Fuel Tax ($/gal)");
    assert!(lines.contains(&"CO,Colorado,$0.3250"));
}
