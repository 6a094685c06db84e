use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("invalid {kind} name: {name:?}")]
    InvalidName { kind: &'static str, name: String },

    #[error("invalid export: {0}")]
    InvalidExport(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = core::result::Result<T, Error>;
