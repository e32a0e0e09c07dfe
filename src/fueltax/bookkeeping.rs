mod efficiency;
mod surcharge;
mod tax_line;

pub use self::efficiency::*;
pub use self::surcharge::*;
pub use self::tax_line::*;
