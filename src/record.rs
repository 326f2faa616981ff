//! Defines the [`Record`] type, the unit of work for the whole pipeline. A
//! record is decoded from a YAML source file, cleaned up by
//! [`crate::normalize`], given its `html` field by [`crate::render`], indexed
//! by [`crate::index`], and finally annotated with navigation and date
//! metadata by [`crate::link`] before being handed to whatever templates the
//! output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single content item (a blog post). Every field that isn't guaranteed by
/// the source format is optional; renderers check for the named fields they
/// need rather than reflecting over arbitrary keys.
///
/// The `content_type_deprecated` and `alt_text_deprecated` fields exist only
/// to accept the legacy `content_type`/`alt_text` spellings from old source
/// files; [`crate::normalize::normalize`] migrates them onto the canonical
/// fields and clears them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// A batch-unique identifier, derived from the source file name by the
    /// driver before normalization. Cross-linking looks records up by `id`.
    #[serde(default)]
    pub id: String,

    /// The source file name, attached by the driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// The full source file path, attached by the driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// The record's content type (`youtube`, `image`, `comic`, `html`,
    /// `markdown`, `irc`, ...). Required after normalization.
    #[serde(
        default,
        rename = "content-type",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,

    /// Deprecated spelling of `content-type`. Never set after normalization.
    #[serde(default, rename = "content_type", skip_serializing)]
    pub content_type_deprecated: Option<String>,

    /// Alt text for image content. Always HTML-escaped before embedding.
    #[serde(default, rename = "alt-text", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,

    /// Deprecated spelling of `alt-text`. Never set after normalization.
    #[serde(default, rename = "alt_text", skip_serializing)]
    pub alt_text_deprecated: Option<String>,

    /// Whether the record should be published. Absent means visible;
    /// `Some(false)` drops the record before rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    /// The record's creation timestamp. Required for ordering; parsed by
    /// [`crate::date::parse`].
    #[serde(default)]
    pub created: String,

    /// The categories the record belongs to, in declaration order. Category
    /// names are opaque strings compared by exact equality.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// The record's title. Records without a title are left out of the
    /// global index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The video identifier for `youtube` records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,

    /// The image URL (or URLs) for `image` records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<OneOrMany>,

    /// The image URL (or URLs) for `comic` records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comic: Option<OneOrMany>,

    /// The markdown source for `markdown` records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<OneOrMany>,

    /// Generic content payload, accepted by the `html`, `markdown`, and `irc`
    /// renderers. Takes precedence over the type-specific field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<OneOrMany>,

    /// The transcript for `irc` records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irc: Option<String>,

    /// The rendered HTML fragment. Set exactly once by a renderer; its
    /// presence is the success marker of the dispatch stage. Source files
    /// with content type `html` may supply it directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// The chronologically first record of the whole index. Set by
    /// [`crate::link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<NavRef>,

    /// The chronologically last record of the whole index. Set by
    /// [`crate::link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<NavRef>,

    /// The record preceding this one in the index, if any. Set by
    /// [`crate::link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavRef>,

    /// The record following this one in the index, if any. Set by
    /// [`crate::link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NavRef>,

    /// Per-category navigation descriptors, in the order the record's
    /// `categories` were declared. Set by [`crate::link`].
    #[serde(
        default,
        rename = "category_items",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub category_items: Vec<CategoryItem>,

    /// `created` formatted as an RFC-822-style string for feed consumers.
    /// Set by [`crate::link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,

    /// `created` formatted with the configured datetime pattern. Set by
    /// [`crate::link`].
    #[serde(
        default,
        rename = "human_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub human_datetime: Option<String>,

    /// `created` formatted with the configured date pattern. Set by
    /// [`crate::link`].
    #[serde(default, rename = "human_date", skip_serializing_if = "Option::is_none")]
    pub human_date: Option<String>,

    /// `created` formatted with the configured time pattern. Set by
    /// [`crate::link`].
    #[serde(default, rename = "human_time", skip_serializing_if = "Option::is_none")]
    pub human_time: Option<String>,
}

/// A payload field that may hold either a single string or a list of strings
/// (the source format accepts both, e.g. a single image URL or a list of
/// them).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Views the payload as a slice of values, regardless of which form the
    /// source file used.
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    /// Collapses the payload into a single string. Multi-value payloads are
    /// joined with newlines, which is only meaningful for line-oriented
    /// content (IRC transcripts).
    pub fn join(&self, separator: &str) -> String {
        match self {
            OneOrMany::One(value) => value.clone(),
            OneOrMany::Many(values) => values.join(separator),
        }
    }
}

impl From<&str> for OneOrMany {
    /// Converts a single value into a [`OneOrMany`]. Mostly a convenience
    /// for tests and callers constructing records by hand.
    fn from(value: &str) -> OneOrMany {
        OneOrMany::One(value.to_owned())
    }
}

/// A lightweight reference to another [`Record`], used for the navigation
/// fields (`first`/`last`/`previous`/`next`). Carries just the fields
/// templates need to render a link, so records never reference each other
/// directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavRef {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub created: String,
}

impl From<&Record> for NavRef {
    /// Strips a [`Record`] down to the fields navigation links need.
    fn from(record: &Record) -> NavRef {
        NavRef {
            id: record.id.clone(),
            title: record.title.clone(),
            created: record.created.clone(),
        }
    }
}

/// Per-category navigation for one record: the boundary and neighbor records
/// within that category's own chronological list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<NavRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<NavRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NavRef>,
}
