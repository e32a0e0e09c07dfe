pub mod approot;
pub mod input_parse;
pub mod outfmt;

pub use self::approot::*;

// Version is of the format 0.YY.MM[.i]. The tax rates in the reference table
// are as of this date, so it is more useful than a semver.
pub const IFTA_APP_VERSION: &str = "0.24.10";
