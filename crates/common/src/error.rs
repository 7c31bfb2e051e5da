//! Error types for the Nimbus provider

use thiserror::Error;

/// Result type alias using the provider Error
pub type Result<T> = std::result::Result<T, Error>;

/// Nimbus provider error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("no {kind} found matching {name:?}")]
    NotFound { kind: &'static str, name: String },

    #[error("{count} {kind} entries match {name:?}")]
    AmbiguousName {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("{resource}: required field {field:?} is missing")]
    MissingField {
        resource: &'static str,
        field: &'static str,
    },

    #[error("{resource}: conflicting fields: {}", fmt_pairs(.pairs))]
    ConflictingFields {
        resource: &'static str,
        pairs: Vec<(&'static str, &'static str)>,
    },

    #[error("invalid value for {field:?}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{op} failed with code {code}: {text}")]
    Api { op: String, code: u16, text: String },

    #[error("{op}: {message}")]
    Transport { op: String, message: String },

    #[error("{resource} does not support {op}")]
    Unsupported {
        resource: &'static str,
        op: &'static str,
    },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with operation context (resource kind and name).
    pub fn ctx(self, context: impl Into<String>) -> Error {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with any context layers peeled off.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Extension trait to attach operation context to a failing result.
pub trait ResultExt<T> {
    fn ctx_with<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for Result<T> {
    fn ctx_with<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.ctx(f()))
    }
}

fn fmt_pairs(pairs: &[(&'static str, &'static str)]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("{a}/{b}"))
        .collect::<Vec<_>>()
        .join(", ")
}
