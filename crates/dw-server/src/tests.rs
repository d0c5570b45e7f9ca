use axum::http::StatusCode;
use axum::response::IntoResponse;
use dw_generate::GenerationError;
use dw_refine::SyntaxTree;
use pretty_assertions::assert_eq;

use crate::error::GenerationFailure;
use crate::logging::{log_filter, LogLevel};
use crate::ServerError;

#[test]
fn log_level_flag_overrides_verbosity() {
    assert_eq!(log_filter(0, false, None), "info");
    assert_eq!(log_filter(1, false, None), "debug");
    assert_eq!(log_filter(5, false, None), "trace");
    assert_eq!(log_filter(2, true, None), "error");
    assert_eq!(log_filter(2, true, Some(LogLevel::Warn)), "warn");
}

#[test]
fn parse_errors_map_to_unprocessable_entity() {
    let parse_error = SyntaxTree::parse("const = ;").err().unwrap();
    assert_eq!(
        ServerError::from(parse_error).status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[test]
fn other_failures_map_to_internal_error() {
    let errors = [
        ServerError::GeneratorUnavailable,
        ServerError::Generation(GenerationError::MissingContent),
        ServerError::Config("bad".to_string()),
    ];
    for err in errors {
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test]
fn generation_failures_are_always_internal_errors() {
    let parse_error = SyntaxTree::parse("export default function P() { return <Card> }")
        .err()
        .unwrap();
    let response = GenerationFailure(ServerError::from(parse_error)).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
