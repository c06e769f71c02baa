use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TinyObjError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read schema {path}: {reason}")]
    SourceReadFailure {
        path:   PathBuf,
        reason: String,
    },

    #[error("Field \"{structure}.{field}\" is missing required attribute \"{attribute}\"")]
    MissingAttribute {
        structure: String,
        field:     String,
        attribute: &'static str,
    },

    #[error("Field \"{structure}.{field}\" has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        structure: String,
        field:     String,
        attribute: &'static str,
        value:     String,
    },

    #[error("Field \"{structure}.{field}\" is a vchar and must specify size=\"xxx\"")]
    MissingSizeBound {
        structure: String,
        field:     String,
    },

    #[error("Field \"{structure}.{field}\" reuses num {number}")]
    DuplicateFieldNumber {
        structure: String,
        field:     String,
        number:    i32,
    },

    #[error("Struct \"{0}\" must have at least one key")]
    MissingPrimaryKey(String),

    #[error("\"{0}\" is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("External compiler failed for {path} (status {status:?}): {output}")]
    ExternalCompilerFailure {
        path:   PathBuf,
        status: Option<i32>,
        output: String,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl TinyObjError {
    /// Whether this error must stop the whole batch rather than just the
    /// file being compiled.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TinyObjError::ExternalCompilerFailure { .. })
    }
}
