use miette::{Diagnostic, NamedSource, SourceSpan};
use std::result;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum RefineError {
    #[error("Syntax error at {line}:{column}: {message}")]
    #[diagnostic(
        code(dewhale::syntax_error),
        help("the generated module must be valid TSX before it can be refined")
    )]
    Parse {
        message: String,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("syntax error here")]
        span: SourceSpan,
    },

    #[error("Invalid import rule pattern `{pattern}`: {source}")]
    #[diagnostic(
        code(dewhale::invalid_rule),
        help("rule patterns use Rust regex syntax, e.g. `^Card.*`")
    )]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid refine setting `{field}` = {value:?}: {reason}")]
    #[diagnostic(code(dewhale::invalid_setting))]
    InvalidSetting {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Failed to print refined module: {0}")]
    #[diagnostic(code(dewhale::emit_error))]
    Emit(#[from] std::io::Error),
}

impl RefineError {
    pub fn is_parse(&self) -> bool {
        matches!(self, RefineError::Parse { .. })
    }
}

pub type Result<T> = result::Result<T, RefineError>;
