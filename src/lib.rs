pub mod app;
pub mod cmd;
pub mod fueltax;
pub mod log;
pub mod tracing;
pub mod util;

extern crate lazy_static;

#[cfg(any(test, feature = "testlib"))]
pub mod testlib;
