//! Error taxonomy for the generation pipeline.
//!
//! Every variant is fatal for the batch it occurs in. A line that fails to
//! match the active strategy is not an error and never reaches this type.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The named source file does not exist anywhere under the search root.
    #[error("source file `{name}` not found under {}", .root.display())]
    SourceNotFound { name: String, root: PathBuf },

    /// Read or write failure, original error kept as the source.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A job that cannot run as configured. Raised before any I/O.
    #[error("misconfigured job: {0}")]
    MisconfiguredJob(String),

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Two members with the same name in one enum (strict mode only).
    #[error("duplicate member `{member}` in enum {enum_name}")]
    DuplicateMember { enum_name: String, member: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
