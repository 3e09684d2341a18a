use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartwellSceneGraphError {
    #[error("Internal error: `{0}`")]
    InternalError(String),

    #[error("Mark `{name}` has {actual} values for `{field}` but expected {expected}")]
    LengthMismatch {
        name: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("No mark at path {0:?}")]
    InvalidMarkPath(Vec<usize>),
}
