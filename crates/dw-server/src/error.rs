use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dw_generate::GenerationError;
use dw_refine::RefineError;
use thiserror::Error;
use tracing::error;

/// Body sent for every failed generation request; the cause only goes to the log.
pub const GENERIC_FAILURE: &str = "An error occurred on the server.";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Refine(#[from] RefineError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Generation service is not configured (set OPENAI_API_KEY)")]
    GeneratorUnavailable,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Refine(err) if err.is_parse() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return (status, self.to_string()).into_response();
        }

        error!(error = %self, "request failed");
        (status, GENERIC_FAILURE).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// Wraps failures of the `/ui-gen` flow, which always answers with the
/// generic 500 even when refinement rejects the generated source.
#[derive(Debug)]
pub struct GenerationFailure(pub ServerError);

impl IntoResponse for GenerationFailure {
    fn into_response(self) -> Response {
        error!(error = %self.0, "ui generation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response()
    }
}
