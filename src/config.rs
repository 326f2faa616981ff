//! Project configuration, loaded from an `arglebargle.yaml` file found in
//! the project directory or any parent. All values are optional; date
//! format patterns fall back to the documented defaults in [`crate::date`].

use crate::link::Formats;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

const PROJECT_FILE: &str = "arglebargle.yaml";

/// The on-disk shape of the project file.
#[derive(Deserialize)]
struct Project {
    /// The directory of YAML post sources, relative to the project root.
    #[serde(default = "default_posts_directory")]
    posts_directory: PathBuf,

    /// Pattern for `human_datetime` values.
    #[serde(default)]
    datetime_format: Option<String>,

    /// Pattern for `human_date` values.
    #[serde(default)]
    date_format: Option<String>,

    /// Pattern for `human_time` values.
    #[serde(default)]
    time_format: Option<String>,
}

fn default_posts_directory() -> PathBuf {
    PathBuf::from("posts")
}

/// Resolved configuration for one build.
pub struct Config {
    pub posts_source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub formats: Formats,
}

impl Config {
    /// Searches `dir` and its parents for the project file and loads it.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output_directory)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(Error::ProjectFileNotFound),
            }
        }
    }

    /// Loads configuration from a specific project file path.
    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file)?;
        let project_root = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Config {
            posts_source_directory: project_root.join(&project.posts_directory),
            output_directory: output_directory.to_owned(),
            formats: project.formats(),
        })
    }
}

impl Project {
    /// Merges the project file's format patterns over the defaults.
    fn formats(&self) -> Formats {
        let defaults = Formats::default();
        Formats {
            datetime: self.datetime_format.clone().unwrap_or(defaults.datetime),
            date: self.date_format.clone().unwrap_or(defaults.date),
            time: self.time_format.clone().unwrap_or(defaults.time),
        }
    }
}

/// The result of a configuration-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading project configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no `arglebargle.yaml` exists in the provided directory
    /// or any of its parents.
    ProjectFileNotFound,

    /// Returned for I/O problems opening the project file.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing the project file as YAML.
    DeserializeYaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ProjectFileNotFound => write!(
                f,
                "could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::Open { path, err } => {
                write!(f, "opening project file `{}`: {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ProjectFileNotFound => None,
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date;

    #[test]
    fn test_project_defaults() {
        let project: Project = serde_yaml::from_str("{}").unwrap();
        assert_eq!(project.posts_directory, PathBuf::from("posts"));
        let formats = project.formats();
        assert_eq!(formats.datetime, date::DEFAULT_DATETIME_FORMAT);
        assert_eq!(formats.date, date::DEFAULT_DATE_FORMAT);
        assert_eq!(formats.time, date::DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_project_overrides() {
        let project: Project = serde_yaml::from_str(
            "posts_directory: content\ndate_format: \"%Y/%m/%d\"\n",
        )
        .unwrap();
        assert_eq!(project.posts_directory, PathBuf::from("content"));
        let formats = project.formats();
        assert_eq!(formats.date, "%Y/%m/%d");
        assert_eq!(formats.time, date::DEFAULT_TIME_FORMAT);
    }
}
