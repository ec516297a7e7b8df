use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode scene: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no scenes found in input")]
    EmptyInput,

    #[error("unknown mouse event kind `{0}`")]
    UnknownEventKind(String),
}
