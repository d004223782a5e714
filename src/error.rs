//! Error taxonomy.
//!
//! - [`RuleError`]: raised by a single conversion rule.
//! - [`NormalizeError`]: the parser handed over a tree that breaks its contract.
//! - [`ConversionError`]: a rule error located in a file and declaration.
//! - [`Error`]: anything that stops one file from being processed.
use std::path::PathBuf;

use crate::ir::{Annotation, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("unknown attribute `{key}` on @{annotation}")]
    UnknownAttribute { annotation: String, key: String },

    #[error("malformed attribute `{key}` on @{annotation}: expected {expected}, found {found}")]
    MalformedArgument {
        annotation: String,
        key: String,
        expected: &'static str,
        found: NodeKind,
    },
}

impl RuleError {
    pub fn unknown(annotation: &Annotation, key: &str) -> Self {
        Self::UnknownAttribute {
            annotation: annotation.simple_name().to_string(),
            key: key.to_string(),
        }
    }

    pub fn malformed(annotation: &Annotation, key: &str, expected: &'static str, found: NodeKind) -> Self {
        Self::MalformedArgument {
            annotation: annotation.simple_name().to_string(),
            key: key.to_string(),
            expected,
            found,
        }
    }

    /// Offending attribute key.
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownAttribute { key, .. } | Self::MalformedArgument { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("@{annotation} has more than one positional argument")]
    ExtraPositional { annotation: String },

    #[error("`{name}` is not a qualified annotation name")]
    InvalidQualifiedName { name: String },
}

/// A fatal rule failure, located.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: in `{declaration}`: {source}", path.display())]
pub struct ConversionError {
    pub path: PathBuf,
    pub declaration: String,
    #[source]
    pub source: RuleError,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {message}", origin.display())]
    Decode { origin: PathBuf, message: String },

    #[error("failed to select units from {}: {message}", origin.display())]
    Select { origin: PathBuf, message: String },

    #[error("bad input pattern: {0}")]
    Glob(String),

    #[error("{}: {source}", path.display())]
    Normalize {
        path: PathBuf,
        #[source]
        source: NormalizeError,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn decode(origin: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode { origin: origin.into(), message: message.into() }
    }
}
