use thiserror::Error;

#[derive(Debug, Error)]
pub enum TfqError {
    #[error(transparent)]
    Source(#[from] crate::sources::SourceError),

    #[error(transparent)]
    Module(#[from] crate::terraform::ModuleError),

    #[error("configuration error: {0}")]
    Config(String),
}
