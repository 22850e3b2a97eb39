//! Errors reported while binding environment variables.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::kind::Kind;

/// Errors returned by [`crate::load`] and [`crate::Loader::load`].
///
/// Binding stops at the first error. Fields bound before it keep their new
/// values.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The load target is not a record.
    #[error("expected pointer-like argument, found {kind}")]
    Type { kind: Kind },
    /// A composite or unsupported field carries an `env` annotation.
    #[error("field {field} is of kind {kind} and must not carry an env annotation")]
    Schema { field: String, kind: Kind },
    /// An environment value or default literal did not parse into the field.
    #[error("env var {key} could not be parsed into field {field} of kind {kind}")]
    Parse {
        key: String,
        field: String,
        kind: Kind,
        #[source]
        source: ValueError,
    },
}

/// Why a value string failed to parse.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    /// Booleans accept only the exact literals `true` and `false`.
    #[error("expected `true` or `false`, found {0:?}")]
    Bool(String),
    #[error("value is not valid unicode")]
    NotUnicode,
}
