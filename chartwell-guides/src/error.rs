use std::collections::HashSet;

use chartwell_scenegraph::error::ChartwellSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartwellGuidesError {
    #[error("Invalid mix of encoding lengths: {0:?}")]
    InvalidEncodingLength(HashSet<usize>),

    #[error("Scene graph error: {0}")]
    SceneGraphError(#[from] ChartwellSceneGraphError),
}
