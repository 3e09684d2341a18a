pub mod array;
pub mod band;
pub mod error;
pub mod format_num;
pub mod numeric;
pub mod temporal;

pub use band::{BandScale, CategoryMargins};
pub use error::ChartwellScaleError;
pub use format_num::NumberFormat;
pub use numeric::{linear::LinearNumericScale, log::LogNumericScale, NumericScale};
pub use temporal::{date_ticks, DateFormat, DateTickUnit};
