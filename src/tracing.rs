use time::{format_description, UtcOffset};
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber};

pub const TRACE_ENV_VAR: &str = "TRACE";

// Sets up tracing. Goes to stderr, filtered by the TRACE env var.
// Levels are: trace, debug, info, warn, error
//
// EnvFilter has a standard syntax, but basically can be boiled down to (for example):
//
// All targets, info level:                    info
// All modules under fueltax, debug level:     ifta::fueltax=debug
// Global at info, csv loading as debug:       info,ifta::fueltax::io=debug
//
// More generally: target[span{field=value}]=level
// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn setup_tracing() {
    // 5 digits of sub-second precision is plenty.
    let time_format =
        match format_description::parse("[hour]:[minute]:[second].[subsecond digits:5]") {
            Ok(f) => f,
            Err(_) => return,
        };

    let time_offset = crate::util::date::local_utc_offset().unwrap_or(UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(time_offset, time_format);

    // Off by default, unless TRACE is set.
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_env(TRACE_ENV_VAR))
        .with_timer(timer)
        .finish();

    // May already be set (eg. by another test in the same process).
    let _ = tracing::subscriber::set_global_default(subscriber);
}
