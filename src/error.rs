use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The line source could not be read at all. The only fatal extraction error.
    #[error("input unavailable: {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is not valid UTF-8: {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("got {ids} file ids but {links} links")]
    LinkCountMismatch { ids: usize, links: usize },

    #[error("additional file with id {0} not found")]
    UnknownFileId(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
