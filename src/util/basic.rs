// Writes a line to a WriteHandle (or any io::Write), discarding any
// write error. Used for warnings and errors aimed at the user.
#[macro_export]
macro_rules! write_errln {
    ($w:expr, $($arg:tt)*) => {{
        use std::io::Write as _;
        let _ = writeln!($w, $($arg)*);
    }};
}
