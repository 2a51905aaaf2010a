//! CSV review ingestion
//!
//! Turns an uploaded CSV file into validated [`Review`] values in the
//! newest-first order the engine expects.
//!
//! - Header must contain `date`, `rating` and `review_text` (any order,
//!   extra columns ignored)
//! - Rows with an empty field or a rating outside 1-5 are skipped and counted
//! - Review text has markup tags stripped and whitespace collapsed

use cfa_common::{Rating, Review};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Columns every upload must provide
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "rating", "review_text"];

/// Default upload limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup tag pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("The CSV file must include the header columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Upload is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported file format: {0} (expected a .csv file)")]
    UnsupportedFormat(String),

    #[error("File is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Order of rows in the source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputOrder {
    /// Rows were appended over time; last row is the most recent
    #[default]
    OldestFirst,
    /// First row is already the most recent
    NewestFirst,
}

/// A row that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line in the source file
    pub line: u64,
    pub reason: String,
}

/// Outcome of ingesting one file
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Accepted reviews in file order
    pub reviews: Vec<Review>,
    pub skipped: Vec<SkippedRow>,
}

impl IngestReport {
    pub fn imported(&self) -> usize {
        self.reviews.len()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped.len()
    }

    /// Consume the report and return reviews newest-first
    pub fn into_feed(self, order: InputOrder) -> Vec<Review> {
        let mut reviews = self.reviews;
        if order == InputOrder::OldestFirst {
            reviews.reverse();
        }
        reviews
    }
}

/// Column positions of the required fields
struct ColumnIndex {
    date: usize,
    rating: usize,
    review_text: usize,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
        };

        match (position("date"), position("rating"), position("review_text")) {
            (Some(date), Some(rating), Some(review_text)) => Ok(Self {
                date,
                rating,
                review_text,
            }),
            _ => Err(IngestError::MissingColumns(
                REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            )),
        }
    }
}

/// Ingest CSV content from any reader
pub fn ingest_csv<R: Read>(reader: R) -> Result<IngestReport, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::locate(csv_reader.headers()?)?;
    let mut report = IngestReport::default();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(index as u64 + 2, |p| p.line());

        match parse_row(&record, &columns) {
            Ok(review) => report.reviews.push(review),
            Err(reason) => {
                debug!(line, %reason, "Skipping CSV row");
                report.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    info!(
        imported = report.imported(),
        skipped = report.skipped_rows(),
        "CSV ingestion complete"
    );
    Ok(report)
}

/// Ingest a CSV file from disk, enforcing extension and size limits
pub fn ingest_file(path: &Path, max_bytes: u64) -> Result<IngestReport, IngestError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(IngestError::UnsupportedFormat(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(IngestError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let content = String::from_utf8(std::fs::read(path)?)?;
    debug!(path = %path.display(), size, "Reading review upload");
    ingest_csv(content.as_bytes())
}

fn parse_row(record: &csv::StringRecord, columns: &ColumnIndex) -> Result<Review, String> {
    let field = |index: usize, name: &str| {
        let value = record.get(index).unwrap_or("").trim();
        if value.is_empty() {
            Err(format!("missing {}", name))
        } else {
            Ok(value)
        }
    };

    let date = field(columns.date, "date")?;
    let rating: Rating = field(columns.rating, "rating")?
        .parse()
        .map_err(|e: cfa_common::Error| e.to_string())?;
    let text = sanitize_text(field(columns.review_text, "review_text")?);
    if text.is_empty() {
        return Err("review_text is empty after removing markup".to_string());
    }

    Ok(Review::new(date, rating, text))
}

/// Strip markup tags and collapse whitespace
pub fn sanitize_text(raw: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(raw, " ");
    WHITESPACE_RUN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}
