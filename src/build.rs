//! Exports the [`build_site`] function which stitches together the
//! high-level steps of a batch run: loading raw records from the posts
//! directory, normalizing and rendering each one ([`crate::pipeline`]),
//! aggregating the survivors into the master index ([`crate::index`]),
//! cross-linking ([`crate::link`]), and writing the output JSON records for
//! the downstream template stage.
//!
//! Per-record failures never abort the batch: a record that fails to decode,
//! normalize, or render is reported to stderr and skipped, and its siblings
//! continue through the pipeline.

use crate::config::Config;
use crate::date;
use crate::index::{self, Error as IndexError, Master};
use crate::link::{self, Error as LinkError};
use crate::pipeline::{self, Processed};
use crate::record::Record;
use crate::render::DEFAULT_RENDERERS;
use std::fmt;
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Runs one full batch from a [`Config`]. Calls into
/// [`pipeline::process`], [`index::build_master`], and
/// [`link::link_master`], which do the heavy lifting, then writes the
/// linked records to the output directory.
pub fn build_site(config: &Config) -> Result<()> {
    let mut rendered: Vec<Record> = Vec::new();
    for result in WalkDir::new(&config.posts_source_directory).sort_by_file_name() {
        let entry = result?;
        if !is_post_source(&entry) {
            continue;
        }
        let record = match load_record(entry.path()) {
            Ok(record) => record,
            Err(err) => {
                eprintln!("skipping `{}`: {}", entry.path().display(), err);
                continue;
            }
        };
        let id = record.id.clone();
        match pipeline::process(record, &DEFAULT_RENDERERS) {
            // Validate `created` here, while failures are still
            // record-scoped; the aggregation phase operates on the whole
            // batch and a bad timestamp there would abort every sibling.
            Ok(Processed::Rendered(record)) => match date::parse(&record.created) {
                Ok(_) => rendered.push(record),
                Err(err) => eprintln!("skipping post `{}`: {}", id, err),
            },
            Ok(Processed::Hidden) => {}
            Err(err) => eprintln!("skipping post `{}`: {}", id, err),
        }
    }

    let mut master = index::build_master(rendered)?;
    link::link_master(&mut master, &config.formats)?;
    write_output(&master, &config.output_directory)
}

fn is_post_source(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && matches!(
            entry.path().extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
}

/// Decodes one YAML source file into a [`Record`] and attaches its file
/// info: `id` (the file stem), `filename`, and `path`. This happens before
/// normalization so error messages can name the offending file.
fn load_record(path: &Path) -> Result<Record> {
    use std::io::Read;
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    let mut record: Record =
        serde_yaml::from_str(&contents).map_err(|err| Error::DeserializeYaml {
            path: path.to_owned(),
            err,
        })?;
    record.id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    record.filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    record.path = Some(path.to_owned());
    Ok(record)
}

/// Writes the linked master collection: `index.json` with the whole
/// aggregate, plus one `posts/{id}.json` per indexed record.
fn write_output(master: &Master, output_directory: &Path) -> Result<()> {
    let posts_directory = output_directory.join("posts");
    create_dir_all(&posts_directory)?;
    serde_json::to_writer_pretty(
        File::create(output_directory.join("index.json"))?,
        master,
    )?;
    for record in &master.index {
        serde_json::to_writer_pretty(
            File::create(posts_directory.join(format!("{}.json", record.id)))?,
            record,
        )?;
    }
    Ok(())
}

/// The result of a site build.
type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during directory
/// walking, record decoding, indexing, linking, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors decoding a source file as YAML.
    DeserializeYaml {
        path: PathBuf,
        err: serde_yaml::Error,
    },

    /// Returned for errors building the index or category lists.
    Index(IndexError),

    /// Returned for errors cross-linking records.
    Link(LinkError),

    /// Returned for errors serializing output records as JSON.
    SerializeJson(serde_json::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DeserializeYaml { path, err } => {
                write!(f, "decoding `{}`: {}", path.display(), err)
            }
            Error::Index(err) => err.fmt(f),
            Error::Link(err) => err.fmt(f),
            Error::SerializeJson(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DeserializeYaml { path: _, err } => Some(err),
            Error::Index(err) => Some(err),
            Error::Link(err) => Some(err),
            Error::SerializeJson(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<IndexError> for Error {
    /// Converts [`IndexError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: IndexError) -> Error {
        Error::Index(err)
    }
}

impl From<LinkError> for Error {
    /// Converts [`LinkError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: LinkError) -> Error {
        Error::Link(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts [`serde_json::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: serde_json::Error) -> Error {
        Error::SerializeJson(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
