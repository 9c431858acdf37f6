use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not find model [{name}], possible values [{}]", join_names(.known))]
    UnknownModel {
        name: String,
        known: BTreeSet<String>,
    },

    #[error("Could not load model [{name}] with path [{}]: {reason}", .path.display())]
    ModelLoad {
        name: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Field [{field}] {reason}")]
    FieldAccess { field: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid model pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn field_access(field: &str, reason: impl Into<String>) -> Self {
        Self::FieldAccess {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
