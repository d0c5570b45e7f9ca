use std::path::PathBuf;
use std::result;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key is required. Set OPENAI_API_KEY or [generation].api_key")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation service error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Generation service returned no message content")]
    MissingContent,

    #[error("Expected exactly one code block in the generated reply, found {found}")]
    AmbiguousOutput { found: usize },

    #[error("Failed to read prompt {}: {source}", path.display())]
    Prompt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid icon catalog: {0}")]
    IconCatalog(String),
}

pub type Result<T> = result::Result<T, GenerationError>;
