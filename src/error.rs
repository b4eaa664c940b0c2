use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Json2SassError {
    #[error("Error transforming JSON to SASS. Check if {} parses correctly: {source}", path.display())]
    MalformedContent {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Value nesting exceeds {max_depth} levels (cyclic or runaway structure)")]
    CyclicStructure { max_depth: usize },

    #[error("Top-level JSON value must be an object, found {0}")]
    NotAMapping(&'static str),

    #[error("Failed to parse CSS asset {name}: {message}")]
    CssParse { name: String, message: String },

    #[error("Failed to print CSS asset {name}: {message}")]
    CssPrint { name: String, message: String },

    #[error("Invalid minifier options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Json2SassError>;
