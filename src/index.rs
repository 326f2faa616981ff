//! Aggregates a batch of rendered [`Record`]s into ordered collections: a
//! chronological global index (records with titles only) and per-category
//! chronological lists. Sorting is stable, so records with equal timestamps
//! keep their input order.

use crate::date;
use crate::record::{NavRef, Record};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The master aggregate for one batch: the global index plus the
/// per-category lists. `first`/`last` are stamped by
/// [`crate::link::link_master`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Master {
    pub index: Vec<Record>,
    pub categories: BTreeMap<String, Vec<Record>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<NavRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<NavRef>,
}

/// Builds the [`Master`] aggregate from a batch of rendered records.
pub fn build_master(records: Vec<Record>) -> Result<Master> {
    Ok(Master {
        categories: build_categories(&records)?,
        index: build_index(&records)?,
        first: None,
        last: None,
    })
}

/// Builds the global index: records with a non-empty `title`, sorted
/// ascending by `created`. Records lacking a title are deliberately
/// filtered out rather than rejected; they can still appear in category
/// lists.
pub fn build_index(records: &[Record]) -> Result<Vec<Record>> {
    sort_chronologically(
        records
            .iter()
            .filter(|record| record.title.as_deref().map_or(false, |t| !t.is_empty()))
            .cloned()
            .collect(),
    )
}

/// Groups records by category, each list sorted ascending by `created`. A
/// record with N categories appears in N lists; a record with none appears
/// in none.
pub fn build_categories(records: &[Record]) -> Result<BTreeMap<String, Vec<Record>>> {
    let mut categories: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for record in records {
        for category in &record.categories {
            categories
                .entry(category.clone())
                .or_insert_with(Vec::new)
                .push(record.clone());
        }
    }
    categories
        .into_iter()
        .map(|(name, list)| Ok((name, sort_chronologically(list)?)))
        .collect()
}

/// Like [`build_categories`], but with each list reversed for
/// most-recent-first presentation. A distinct operation rather than a flag
/// so each builder stays single-purpose.
pub fn build_reverse_categories(records: &[Record]) -> Result<BTreeMap<String, Vec<Record>>> {
    let mut categories = build_categories(records)?;
    for list in categories.values_mut() {
        list.reverse();
    }
    Ok(categories)
}

/// Stable-sorts records ascending by their parsed `created` timestamp.
fn sort_chronologically(records: Vec<Record>) -> Result<Vec<Record>> {
    let mut keyed = records
        .into_iter()
        .map(|record| match date::parse(&record.created) {
            Ok(created) => Ok((created, record)),
            Err(err) => Err(Error::Date {
                id: record.id.clone(),
                err,
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

/// The result of an index-building operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error building the index or category lists.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when a record's `created` timestamp can't be parsed for
    /// ordering. Carries the record's `id`.
    Date { id: String, err: date::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Date { id, err } => write!(f, "indexing post `{}`: {}", id, err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Date { id: _, err } => Some(err),
        }
    }
}
