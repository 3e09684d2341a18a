pub mod axis;
pub mod chart;
pub mod chart_factory;
pub mod entity;
pub mod error;
pub mod imagemap;
pub mod info;
pub mod labels;
pub mod legend;
pub mod plot;
pub mod renderer;
pub mod supplier;
pub mod theme;
pub mod title;
pub mod urls;
mod usize_keys;

pub use chart::{Chart, Plot, RenderedChart};
pub use chart_factory::ChartOptions;
pub use error::ChartwellChartError;
pub use theme::ChartTheme;
