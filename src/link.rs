//! The cross-linking stage: annotates records with navigational metadata
//! (`first`/`last`/`previous`/`next`, globally and per category) and
//! human-readable date strings. Neighbor links are computed from the
//! chronological order produced by [`crate::index`]; [`link_master`] reverses
//! the index for most-recent-first presentation only after every link is in
//! place, so `previous`/`next` stay chronological.

use crate::date;
use crate::index::Master;
use crate::record::{CategoryItem, NavRef, Record};
use std::fmt;

/// Format patterns for the human-readable date strings. `pubdate` is always
/// [`date::PUBDATE_FORMAT`] and is not configurable.
#[derive(Clone, Debug, PartialEq)]
pub struct Formats {
    /// Pattern for `human_datetime`. Defaults to
    /// [`date::DEFAULT_DATETIME_FORMAT`].
    pub datetime: String,

    /// Pattern for `human_date`. Defaults to [`date::DEFAULT_DATE_FORMAT`].
    pub date: String,

    /// Pattern for `human_time`. Defaults to [`date::DEFAULT_TIME_FORMAT`].
    pub time: String,
}

impl Default for Formats {
    fn default() -> Formats {
        Formats {
            datetime: date::DEFAULT_DATETIME_FORMAT.to_owned(),
            date: date::DEFAULT_DATE_FORMAT.to_owned(),
            time: date::DEFAULT_TIME_FORMAT.to_owned(),
        }
    }
}

/// Annotates a single record against a built [`Master`].
///
/// Globally, `first` and `last` are the boundary records of the whole index
/// (the same values for every record), and `previous`/`next` come from the
/// record's own position, found by matching `id`. Per category, the same
/// boundary rules are applied against that category's own list, collected
/// into `category_items` in the order the record's `categories` were
/// declared. Finally the `pubdate` and `human_*` date strings are formatted
/// from `created`.
pub fn link_post(record: &mut Record, master: &Master, formats: &Formats) -> Result<()> {
    let position = master
        .index
        .iter()
        .position(|candidate| candidate.id == record.id);
    link_post_at(record, master, position, formats)
}

/// Like [`link_post`], but with the record's index position supplied by the
/// caller to avoid a repeated lookup. Both yield the same result.
pub fn link_post_at(
    record: &mut Record,
    master: &Master,
    position: Option<usize>,
    formats: &Formats,
) -> Result<()> {
    record.first = master.index.first().map(NavRef::from);
    record.last = master.index.last().map(NavRef::from);
    if let Some(position) = position {
        if position > 0 {
            record.previous = master.index.get(position - 1).map(NavRef::from);
        }
        record.next = master.index.get(position + 1).map(NavRef::from);
    }

    let items = record
        .categories
        .iter()
        .map(|name| category_item(&record.id, name, master))
        .collect();
    record.category_items = items;

    let created = date::parse(&record.created).map_err(|err| Error::Date {
        id: record.id.clone(),
        err,
    })?;
    record.pubdate = Some(created.format(date::PUBDATE_FORMAT).to_string());
    record.human_datetime = Some(created.format(&formats.datetime).to_string());
    record.human_date = Some(created.format(&formats.date).to_string());
    record.human_time = Some(created.format(&formats.time).to_string());
    Ok(())
}

/// Annotates every record in a master collection, stamps `first`/`last`
/// onto the master itself, and then reverses the index for presentation.
/// The reversal happens once, after all relative links are computed, so
/// neighbor links remain chronological even though the display order is
/// reverse-chronological.
pub fn link_master(master: &mut Master, formats: &Formats) -> Result<()> {
    master.first = master.index.first().map(NavRef::from);
    master.last = master.index.last().map(NavRef::from);

    // Records can't be mutated while the master they link against is
    // borrowed, so link against a copy of the pre-link index.
    let snapshot = master.clone();
    for (position, record) in master.index.iter_mut().enumerate() {
        link_post_at(record, &snapshot, Some(position), formats)?;
    }
    master.index.reverse();
    Ok(())
}

/// Computes one per-category navigation descriptor. A category the master
/// doesn't know about yields a bare descriptor with no links.
fn category_item(id: &str, name: &str, master: &Master) -> CategoryItem {
    let mut item = CategoryItem {
        name: name.to_owned(),
        ..CategoryItem::default()
    };
    if let Some(list) = master.categories.get(name) {
        item.first = list.first().map(NavRef::from);
        item.last = list.last().map(NavRef::from);
        if let Some(position) = list.iter().position(|candidate| candidate.id == id) {
            if position > 0 {
                item.previous = list.get(position - 1).map(NavRef::from);
            }
            item.next = list.get(position + 1).map(NavRef::from);
        }
    }
    item
}

/// The result of a cross-linking operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error cross-linking a [`Record`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when a record's `created` timestamp can't be parsed for
    /// formatting. Carries the record's `id`.
    Date { id: String, err: date::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Date { id, err } => write!(f, "linking post `{}`: {}", id, err),
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::index::build_master;

    fn record(id: &str, created: &str, title: &str, categories: &[&str]) -> Record {
        Record {
            id: id.to_owned(),
            created: created.to_owned(),
            title: Some(title.to_owned()),
            categories: categories.iter().map(|c| (*c).to_owned()).collect(),
            ..Record::default()
        }
    }

    fn master() -> Master {
        build_master(vec![
            record("1", "2020-01-01", "A", &["x"]),
            record("2", "2020-01-02", "B", &["x", "y"]),
            record("3", "2020-01-03", "C", &["y"]),
        ])
        .unwrap()
    }

    fn nav_id(nav: &Option<NavRef>) -> Option<&str> {
        nav.as_ref().map(|n| n.id.as_str())
    }

    #[test]
    fn test_boundary_links() {
        let master = master();
        let formats = Formats::default();

        let mut first = master.index[0].clone();
        link_post(&mut first, &master, &formats).unwrap();
        assert_eq!(nav_id(&first.first), Some("1"));
        assert_eq!(nav_id(&first.last), Some("3"));
        assert_eq!(first.previous, None);
        assert_eq!(nav_id(&first.next), Some("2"));

        let mut last = master.index[2].clone();
        link_post(&mut last, &master, &formats).unwrap();
        assert_eq!(nav_id(&last.first), Some("1"));
        assert_eq!(nav_id(&last.last), Some("3"));
        assert_eq!(nav_id(&last.previous), Some("2"));
        assert_eq!(last.next, None);
    }

    #[test]
    fn test_category_items() {
        let master = master();
        let mut middle = master.index[1].clone();
        link_post(&mut middle, &master, &Formats::default()).unwrap();

        // descriptors follow the record's category declaration order
        assert_eq!(middle.category_items.len(), 2);

        let x = &middle.category_items[0];
        assert_eq!(x.name, "x");
        assert_eq!(nav_id(&x.first), Some("1"));
        assert_eq!(nav_id(&x.last), Some("2"));
        assert_eq!(nav_id(&x.previous), Some("1"));
        assert_eq!(x.next, None);

        let y = &middle.category_items[1];
        assert_eq!(y.name, "y");
        assert_eq!(nav_id(&y.first), Some("2"));
        assert_eq!(nav_id(&y.last), Some("3"));
        assert_eq!(y.previous, None);
        assert_eq!(nav_id(&y.next), Some("3"));
    }

    #[test]
    fn test_unknown_category_yields_bare_descriptor() {
        let master = master();
        let mut record = record("9", "2020-02-01", "Z", &["nope"]);
        link_post(&mut record, &master, &Formats::default()).unwrap();
        assert_eq!(
            record.category_items,
            vec![CategoryItem {
                name: String::from("nope"),
                ..CategoryItem::default()
            }]
        );
    }

    #[test]
    fn test_date_formatting() {
        let master = master();
        let mut record = master.index[0].clone();
        link_post(&mut record, &master, &Formats::default()).unwrap();
        assert_eq!(
            record.pubdate.as_deref(),
            Some("Wed, 01 Jan 2020 00:00:00 +00:00")
        );
        assert_eq!(
            record.human_datetime.as_deref(),
            Some("Wednesday, January 1, 2020 12:00 AM")
        );
        assert_eq!(record.human_date.as_deref(), Some("January 1, 2020"));
        assert_eq!(record.human_time.as_deref(), Some("12:00 AM"));
    }

    #[test]
    fn test_custom_formats() {
        let master = master();
        let mut record = master.index[0].clone();
        let formats = Formats {
            date: String::from("%Y/%m/%d"),
            ..Formats::default()
        };
        link_post(&mut record, &master, &formats).unwrap();
        assert_eq!(record.human_date.as_deref(), Some("2020/01/01"));
    }

    #[test]
    fn test_link_master_reverses_after_linking() {
        let mut master = master();
        link_master(&mut master, &Formats::default()).unwrap();

        assert_eq!(nav_id(&master.first), Some("1"));
        assert_eq!(nav_id(&master.last), Some("3"));

        // display order is most-recent-first
        let ids: Vec<&str> = master.index.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        // but neighbor links stay chronological
        let newest = &master.index[0];
        assert_eq!(nav_id(&newest.previous), Some("2"));
        assert_eq!(newest.next, None);
        let oldest = &master.index[2];
        assert_eq!(oldest.previous, None);
        assert_eq!(nav_id(&oldest.next), Some("2"));
    }

    #[test]
    fn test_unparseable_created() {
        let master = master();
        let mut record = record("9", "whenever", "Z", &[]);
        assert_eq!(
            link_post(&mut record, &master, &Formats::default()),
            Err(Error::Date {
                id: String::from("9"),
                err: date::Error::Unparseable {
                    value: String::from("whenever")
                }
            })
        );
    }
}
