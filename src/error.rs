//! Error types for kernel generation.

use crate::dtype::{DType, Intrinsic};
use std::io;
use thiserror::Error;

/// Errors that can occur while resolving or rendering a kernel variant.
#[derive(Debug, Error)]
pub enum Error {
    /// Dtype string outside of int8/int16/int32.
    #[error("Supported dtypes: [\"int16\", \"int32\", \"int8\"] (got \"{0}\")")]
    UnsupportedDType(String),

    /// Intrinsic string that names no known MAC intrinsic.
    #[error("Unknown intrinsic \"{0}\"")]
    UnknownIntrinsic(String),

    /// No variant is registered under the key.
    #[error("No variant registered for ('{0}', '{1}', '{2}')")]
    NoVariant(DType, DType, Intrinsic),

    /// K/N or data dimensions violate the constraints of the variant.
    #[error("{0}")]
    Geometry(String),

    /// A strategy was handed an intrinsic it has no code block for.
    #[error("{strategy} only supports {supported}")]
    UnsupportedIntrinsic {
        strategy: &'static str,
        supported: &'static str,
    },

    /// A strategy parameter was not present after merging defaults and overrides.
    #[error("Missing parameter \"{0}\"")]
    MissingParam(String),

    /// A strategy parameter had the wrong kind of value.
    #[error("Parameter \"{key}\" must be {expected}")]
    InvalidParam { key: String, expected: &'static str },

    /// A line of an integer text file could not be parsed.
    #[error("{file}:{line}: cannot parse \"{token}\" as an integer")]
    Parse {
        file: String,
        line: usize,
        token: String,
    },

    /// Reading or writing an artifact failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for kernel generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Fails with a geometry error carrying `msg` unless `cond` holds.
pub(crate) fn require(cond: bool, msg: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::Geometry(msg.to_owned()))
    }
}
