use chartwell_common::error::ChartwellCommonError;
use chartwell_data::ChartwellDataError;
use chartwell_guides::error::ChartwellGuidesError;
use chartwell_scales::ChartwellScaleError;
use chartwell_scenegraph::error::ChartwellSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartwellChartError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Renderer `{renderer}` cannot draw a `{dataset}` dataset")]
    IncompatibleDataset {
        renderer: &'static str,
        dataset: &'static str,
    },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Unknown theme: `{0}`")]
    UnknownTheme(String),

    #[error("Data error: {0}")]
    DataError(#[from] ChartwellDataError),

    #[error("Scale error: {0}")]
    ScaleError(#[from] ChartwellScaleError),

    #[error("Scene graph error: {0}")]
    SceneGraphError(#[from] ChartwellSceneGraphError),

    #[error("Guides error: {0}")]
    GuidesError(#[from] ChartwellGuidesError),

    #[error("Common error: {0}")]
    CommonError(#[from] ChartwellCommonError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
