use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dates::parse_year;

// ---------------------------------------------------------------------------
// ContentType – the `type` column
// ---------------------------------------------------------------------------

/// Kind of title. Ordering is `Movie < TvShow`, which is also the stacking
/// order used by every per-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = RowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "movie" => Ok(ContentType::Movie),
            "tvshow" | "tv" => Ok(ContentType::TvShow),
            _ => Err(RowError::UnknownType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RowError – why a single row was rejected at load time
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("missing 'type'")]
    MissingType,

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("missing 'release_year'")]
    MissingReleaseYear,

    #[error("invalid release_year '{0}'")]
    InvalidReleaseYear(String),
}

// ---------------------------------------------------------------------------
// RawRow – untyped row as produced by every loader
// ---------------------------------------------------------------------------

/// One source row before validation. Every column is optional text so that
/// CSV, JSON and Parquet loaders can share the same conversion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub release_year: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub listed_in: Option<String>,
}

// ---------------------------------------------------------------------------
// CatalogRecord – one validated row plus derived columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub title: String,
    pub kind: ContentType,
    /// Comma-separated list of names.
    pub director: Option<String>,
    /// Comma-separated list of country names.
    pub country: Option<String>,
    /// Free-form text as found in the source.
    pub date_added: Option<String>,
    pub release_year: i32,
    pub rating: Option<String>,
    /// Minutes for movies, seasons for TV shows.
    pub duration: Option<String>,
    /// Comma-separated list of genres.
    pub listed_in: Option<String>,

    /// Number of whitespace-separated tokens in `title`.
    pub title_length: usize,
    /// Year parsed from `date_added`, absent when parsing failed.
    pub year_added: Option<i32>,
}

impl CatalogRecord {
    /// Validate a raw row and compute the derived columns.
    pub fn from_raw(raw: RawRow) -> Result<Self, RowError> {
        let kind = match clean(raw.kind) {
            Some(t) => t.parse::<ContentType>()?,
            None => return Err(RowError::MissingType),
        };
        let release_year = match clean(raw.release_year) {
            Some(y) => parse_release_year(&y).ok_or(RowError::InvalidReleaseYear(y))?,
            None => return Err(RowError::MissingReleaseYear),
        };

        let title = clean(raw.title).unwrap_or_default();
        let date_added = clean(raw.date_added);
        let year_added = date_added.as_deref().and_then(parse_year);

        Ok(CatalogRecord {
            title_length: title.split_whitespace().count(),
            title,
            kind,
            director: clean(raw.director),
            country: clean(raw.country),
            date_added,
            release_year,
            rating: clean(raw.rating),
            duration: clean(raw.duration),
            listed_in: clean(raw.listed_in),
            year_added,
        })
    }
}

/// Blank cells are treated as absent.
fn clean(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Accepts "2019" as well as float renderings such as "2019.0".
fn parse_release_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f.abs() < i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Immutable record collection handed to every aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Catalog { records }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of a load: how many rows made it in and how many were dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}
