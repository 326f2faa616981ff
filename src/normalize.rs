//! Pre-dispatch cleanup for raw [`Record`]s: migrates deprecated field
//! spellings onto their canonical names, drops records explicitly marked
//! invisible, and rejects records that still have no content type. Hidden
//! records are a distinct [`Normalized::Excluded`] outcome rather than an
//! error, so callers can omit them silently.

use crate::record::Record;
use std::fmt;

/// The outcome of normalizing a record: either a cleaned-up record that
/// should continue through the pipeline, or an explicit exclusion for
/// records marked `visible: false`.
#[derive(Clone, Debug, PartialEq)]
pub enum Normalized {
    Included(Record),
    Excluded,
}

/// Cleans up one raw record.
///
/// 1. Migrates the deprecated `content_type`/`alt_text` keys to their
///    canonical `content-type`/`alt-text` spellings. A canonical value
///    already present wins; the deprecated field is cleared either way.
/// 2. Excludes records explicitly marked `visible: false`.
/// 3. Fails with [`Error::MissingContentType`] if no content type is
///    present after migration.
pub fn normalize(mut record: Record) -> Result<Normalized> {
    if record.content_type.is_none() {
        record.content_type = record.content_type_deprecated.take();
    } else {
        record.content_type_deprecated = None;
    }
    if record.alt_text.is_none() {
        record.alt_text = record.alt_text_deprecated.take();
    } else {
        record.alt_text_deprecated = None;
    }

    if record.visible == Some(false) {
        return Ok(Normalized::Excluded);
    }

    if record.content_type.is_none() {
        return Err(Error::MissingContentType {
            id: record.id.clone(),
        });
    }

    Ok(Normalized::Included(record))
}

/// The result of a normalization operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error normalizing a [`Record`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when a record has no content type after the deprecated-key
    /// migration. Carries the record's `id` so the author can find the
    /// offending source file.
    MissingContentType { id: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingContentType { id } => {
                write!(f, "post `{}` must contain a content-type directive", id)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
