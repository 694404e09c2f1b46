use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParsetsSceneGraphError {
    #[error("Mark `{name}` has {actual} values for `{channel}`, expected {expected}")]
    LengthMismatch {
        name: String,
        channel: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Mark path {0:?} does not exist")]
    InvalidMarkPath(Vec<usize>),
}
