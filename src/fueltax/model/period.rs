use std::{fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use time::{Date, Month};

use crate::util::date::to_pretty_string;

type Error = String;

/// A quarterly reporting period. Always holds a quarter in 1..=4.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize)]
pub struct Period {
    // Field order matters for Ord (year first).
    year: i32,
    quarter: u8,
}

impl Period {
    pub fn new(quarter: u8, year: i32) -> Result<Period, Error> {
        if !(1..=4).contains(&quarter) {
            return Err(format!("Invalid quarter {quarter}. Must be 1 to 4"));
        }
        Ok(Period { year, quarter })
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    fn first_month(&self) -> Month {
        Month::January.nth_next((self.quarter - 1) * 3)
    }

    pub fn first_day(&self) -> Date {
        // Day 1 exists in every month, and Period always has a valid quarter.
        Date::from_calendar_date(self.year, self.first_month(), 1)
            .unwrap_or(Date::MIN)
    }

    pub fn last_day(&self) -> Date {
        let next = if self.quarter == 4 {
            Period { year: self.year.saturating_add(1), quarter: 1 }
        } else {
            Period { year: self.year, quarter: self.quarter + 1 }
        };
        next.first_day().previous_day().unwrap_or(Date::MIN)
    }

    pub fn contains(&self, d: Date) -> bool {
        classify_period(d) == *self
    }

    /// eg. "January 1, 2024 - March 31, 2024"
    pub fn date_range_string(&self) -> String {
        format!("{} - {}",
                to_pretty_string(&self.first_day()),
                to_pretty_string(&self.last_day()))
    }
}

/// Maps a calendar date to its reporting period. quarter = ceil(month / 3)
pub fn classify_period(d: Date) -> Period {
    let month = d.month() as u8;
    Period { year: d.year(), quarter: month.div_ceil(3) }
}

// Auto-implements to_string()
impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Q{}", self.year, self.quarter)
    }
}

lazy_static! {
    static ref YEAR_FIRST_RE: Regex =
        Regex::new(r"(?i)^\s*(\d{4})\s*[-_ ]?\s*Q([0-9])\s*$").unwrap();
    static ref QUARTER_FIRST_RE: Regex =
        Regex::new(r"(?i)^\s*Q([0-9])\s*[-_ ]?\s*(\d{4})\s*$").unwrap();
}

impl FromStr for Period {
    type Err = Error;

    /// Accepts 2024Q1, 2024-Q1, 2024 q1, Q1 2024, Q1-2024
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year_str, quarter_str) = if let Some(caps) = YEAR_FIRST_RE.captures(s) {
            (caps[1].to_string(), caps[2].to_string())
        } else if let Some(caps) = QUARTER_FIRST_RE.captures(s) {
            (caps[2].to_string(), caps[1].to_string())
        } else {
            return Err(format!(
                "\"{s}\" is not a valid period. Use a format like 2024Q1 or Q1-2024"));
        };

        let year = year_str.parse::<i32>().map_err(|e| e.to_string())?;
        let quarter = quarter_str.parse::<u8>().map_err(|e| e.to_string())?;
        Period::new(quarter, year)
    }
}
