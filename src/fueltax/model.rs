pub mod jurisdiction;
pub mod period;
pub mod records;
pub mod report;
