pub mod aggregate;
pub mod bookkeeping;
pub mod csv_common;
pub mod io;
pub mod model;
pub mod quarterly;
pub mod render;
pub mod resolver;

pub use self::model::jurisdiction::*;
pub use self::model::period::*;
pub use self::model::records::*;
pub use self::model::report::*;
pub use self::quarterly::{build_quarterly_report, build_quarterly_report_with_resolver, ReportOptions};
pub use self::resolver::{resolve_jurisdiction, JurisdictionResolver, TextHeuristicResolver};
