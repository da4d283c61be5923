use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OktogenError {
    #[error("No character class left to generate from. Enable a class or exclude fewer characters.")]
    EmptyAlphabet,

    #[error("Could not read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, OktogenError>;
