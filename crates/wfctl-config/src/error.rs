use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to parse wfctl configuration")]
    #[diagnostic(
        code(wfctl::config::parse_error),
        help("the file must be a KDL document with optional `global` and `aliases` sections")
    )]
    ParseError {
        #[source_code]
        src: String,
        #[label("here")]
        span: miette::SourceSpan,
        #[source]
        source: kdl::KdlError,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(wfctl::config::invalid))]
    Invalid { message: String },

    #[error("Missing value for {field}")]
    #[diagnostic(
        code(wfctl::config::missing_field),
        help("write aliases as `name \"command text\"`")
    )]
    MissingField { field: String },

    #[error("Failed to read {path}")]
    #[diagnostic(code(wfctl::config::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
