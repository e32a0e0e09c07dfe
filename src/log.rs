use std::sync::atomic::{AtomicBool, Ordering};

// User-facing verbose output (--verbose). This is separate from tracing,
// which is for debugging, and configured through the TRACE env var.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verb: bool) {
    VERBOSE.store(verb, Ordering::Relaxed);
}

pub fn get_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

// tt - TokenTree
// ($($arg:tt)*) Variable number of tts
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {{
        if $crate::log::get_verbose() {
            eprint!($($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! verboseln {
    ($($arg:tt)*) => {{
        if $crate::log::get_verbose() {
            eprintln!($($arg)*);
        }
    }};
}
