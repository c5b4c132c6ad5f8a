use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocragError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
