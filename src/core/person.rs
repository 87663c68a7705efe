//! The person records the picker chooses from, and loading them.
//!
//! The list is loaded once at startup and never mutated afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Data set compiled into the binary, used when no `--people` file is given.
const BUILTIN_PEOPLE: &str = include_str!("../../data/people.json");

/// Categorical attribute of a person.  Only used to pick a display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

/// A single selectable record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub slug: String,
    /// Display name; the only field the filter searches.
    pub name: String,
    pub sex: Sex,
    pub born: i32,
    pub died: i32,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} - {})", self.name, self.born, self.died)
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read people file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid people data in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate slug {0:?} in people data")]
    DuplicateSlug(String),
}

/// The built-in data set.
pub fn builtin_people() -> Result<Vec<Person>, DataError> {
    parse_people(BUILTIN_PEOPLE, "built-in data")
}

/// Load a JSON array of people from `path`.
pub fn load_people(path: &Path) -> Result<Vec<Person>, DataError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_people(&contents, &path.display().to_string())
}

/// Parse a JSON array of people, keeping source order.  Slugs must be unique.
pub fn parse_people(json: &str, origin: &str) -> Result<Vec<Person>, DataError> {
    let people: Vec<Person> = serde_json::from_str(json).map_err(|source| DataError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    let mut seen = std::collections::HashSet::with_capacity(people.len());
    for person in &people {
        if !seen.insert(person.slug.as_str()) {
            return Err(DataError::DuplicateSlug(person.slug.clone()));
        }
    }

    Ok(people)
}
