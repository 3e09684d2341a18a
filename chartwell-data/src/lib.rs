pub mod box_whisker;
pub mod category;
pub mod dataset_utils;
pub mod error;
pub mod gantt;
pub mod interval;
pub mod keyed;
pub mod kinds;
pub mod listeners;
pub mod pie;
pub mod statistical;
pub mod statistics;
pub mod table;
pub mod time;
pub mod traits;
pub mod value;
pub mod xy;
pub mod xyz;

pub use error::ChartwellDataError;
pub use kinds::{CategoryDatasetKind, XYDatasetKind};
