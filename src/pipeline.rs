//! The per-record entry point: normalization followed by renderer dispatch.
//! One raw record goes in; out comes either a rendered record, an explicit
//! "hidden" outcome for records marked invisible, or a typed failure. All
//! failures are record-scoped; batch policy (fail-fast vs collect-and-report)
//! belongs to the caller.

use crate::normalize::{self, Normalized};
use crate::record::Record;
use crate::render::{self, Renderer};
use std::fmt;

/// The outcome of processing one record: rendered and ready for indexing,
/// or explicitly hidden by its author.
#[derive(Clone, Debug, PartialEq)]
pub enum Processed {
    Rendered(Record),
    Hidden,
}

/// Normalizes and renders one raw record. Hidden records short-circuit the
/// render stage entirely; they never reach a renderer.
pub fn process(record: Record, renderers: &[Renderer]) -> Result<Processed> {
    match normalize::normalize(record)? {
        Normalized::Excluded => Ok(Processed::Hidden),
        Normalized::Included(record) => {
            Ok(Processed::Rendered(render::render(record, renderers)?))
        }
    }
}

/// The result of processing one record.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a record-scoped failure in the normalize or render stage.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned for errors during normalization.
    Normalize(normalize::Error),

    /// Returned for errors during renderer dispatch.
    Render(render::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Normalize(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Normalize(err) => Some(err),
            Error::Render(err) => Some(err),
        }
    }
}

impl From<normalize::Error> for Error {
    /// Converts [`normalize::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator in [`process`].
    fn from(err: normalize::Error) -> Error {
        Error::Normalize(err)
    }
}

impl From<render::Error> for Error {
    /// Converts [`render::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator in [`process`].
    fn from(err: render::Error) -> Error {
        Error::Render(err)
    }
}
