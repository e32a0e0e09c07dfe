use std::cell::RefCell;

use chrono::Datelike;
pub use time::Date;
use time::{macros::format_description, Month, UtcOffset};

pub type StaticDateFormat<'a> =
    &'static [time::format_description::BorrowedFormatItem<'a>];
pub type DynDateFormat = time::format_description::OwnedFormatItem;

pub const STANDARD_DATE_FORMAT: StaticDateFormat =
    format_description!("[year]-[month]-[day]");

pub fn parse_standard_date(date_str: &str) -> Result<Date, time::error::Parse> {
    Date::parse(date_str, STANDARD_DATE_FORMAT)
}

pub fn parse_dyn_date_format(fmt: &str) -> Result<DynDateFormat, String> {
    // The documentation recommends version 2
    const VERSION: usize = 2;
    time::format_description::parse_owned::<VERSION>(fmt)
        .map_err(|e| format!("{}", e))
}

pub fn parse_date(
    date_str: &str,
    fmt: &Option<DynDateFormat>,
) -> Result<Date, time::error::Parse> {
    match fmt {
        Some(fmt_) => Date::parse(date_str, fmt_),
        None => parse_standard_date(date_str),
    }
}

fn date_naive_to_date(dn: &chrono::NaiveDate) -> Option<Date> {
    Date::from_calendar_date(
        dn.year(),
        Month::December.nth_next(dn.month() as u8),
        dn.day() as u8,
    )
    .ok()
}

pub fn to_pretty_string(d: &Date) -> String {
    format!("{} {}, {}", d.month(), d.day(), d.year())
}

thread_local! {
    static TODAYS_DATE_FOR_TEST_TL: RefCell<Date> = const { RefCell::new(Date::MIN) };
}

pub fn set_todays_date_for_test(d: Date) {
    TODAYS_DATE_FOR_TEST_TL.with_borrow_mut(|d_| *d_ = d);
}

/// Today's date in the local timezone. Used to pick the default
/// reporting period.
pub fn today_local() -> Date {
    let test_date: Date = TODAYS_DATE_FOR_TEST_TL.with_borrow(|d| *d);
    if test_date != Date::MIN {
        return test_date;
    }
    let now = chrono::offset::Local::now();
    date_naive_to_date(&now.date_naive())
        .unwrap_or_else(|| time::OffsetDateTime::now_utc().date())
}

// Gets the current system UtcOffset of the local timezone.
// UtcOffset::current_local_offset will return an error on Linux
// unless some "unsafe" feature is enabled, so go through chrono instead.
pub fn local_utc_offset() -> Result<UtcOffset, time::error::ComponentRange> {
    let now = chrono::offset::Local::now();
    let offset = now.offset();
    UtcOffset::from_whole_seconds(-offset.utc_minus_local())
}
