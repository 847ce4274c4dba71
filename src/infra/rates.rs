//! Rate table loading from a local CSV file or an http(s) URL.
//!
//! - Every load re-reads the source; nothing is cached between calls.
//! - Numbers are parsed and range-checked here, so the selector only ever
//!   sees well-formed records.

use std::{
    collections::HashSet,
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use reqwest::{Client, Url};
use thiserror::Error;
use time::{format_description, OffsetDateTime};
use tracing::{debug, info};

use super::table::{CsvRow, CsvTable, TableError};
use crate::domain::{RateRecord, TransportMode};

const USER_AGENT: &str = concat!("freight-cost-optimizer/", env!("CARGO_PKG_VERSION"));

pub const RATE_COLUMNS: [&str; 7] = [
    "origin",
    "destination",
    "mode",
    "rate_per_km",
    "distance_km",
    "transit_days",
    "co2_per_km",
];

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("malformed table: {0}")]
    Table(#[from] TableError),
    #[error("line {line}: missing value for '{column}'")]
    MissingField { line: usize, column: &'static str },
    #[error("line {line}: '{value}' in '{column}' is not a number")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: '{column}' must be {expected}, got {value}")]
    OutOfRange {
        line: usize,
        column: &'static str,
        expected: &'static str,
        value: f64,
    },
    #[error("line {line}: unknown mode '{value}' (expected air, sea or rail)")]
    UnknownMode { line: usize, value: String },
    #[error("line {line}: duplicate route {origin} -> {destination} ({mode})")]
    DuplicateRoute {
        line: usize,
        origin: String,
        destination: String,
        mode: TransportMode,
    },
}

/// Where a rate table comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(Url),
}

impl DataSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl FromStr for DataSource {
    type Err = DataSourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Ok(Self::Remote(Url::parse(trimmed)?))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Records from one load, with provenance for display.
#[derive(Clone, Debug, PartialEq)]
pub struct RateSnapshot {
    pub source: String,
    pub loaded_at: OffsetDateTime,
    pub records: Vec<RateRecord>,
}

impl RateSnapshot {
    /// Distinct origin/destination pairs, in table order.
    pub fn lanes(&self) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert((r.origin.as_str(), r.destination.as_str())))
            .map(|r| (r.origin.clone(), r.destination.clone()))
            .collect()
    }

    pub fn loaded_at_label(&self) -> String {
        format_description::parse(LOADED_AT_FORMAT)
            .ok()
            .and_then(|format| self.loaded_at.format(&format).ok())
            .unwrap_or_else(|| self.loaded_at.to_string())
    }
}

const LOADED_AT_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second] UTC";

/// Explicit handle on a rate table source. Cheap to clone.
#[derive(Clone)]
pub struct RateRepository {
    source: DataSource,
    http: Client,
}

impl RateRepository {
    pub fn new(source: DataSource) -> Result<Self, DataSourceError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { source, http })
    }

    pub fn from_source_str(source: &str) -> Result<Self, DataSourceError> {
        Self::new(source.parse()?)
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Read and validate the table. Each call hits the source again.
    pub async fn load(&self) -> Result<RateSnapshot, DataSourceError> {
        let records = match &self.source {
            DataSource::File(path) => load_rate_file(path)?,
            DataSource::Remote(url) => {
                let text = self.fetch_text(url.clone()).await?;
                parse_rate_table(&text)?
            }
        };
        info!(source = %self.source, records = records.len(), "loaded rate table");
        Ok(RateSnapshot {
            source: self.source.to_string(),
            loaded_at: OffsetDateTime::now_utc(),
            records,
        })
    }

    async fn fetch_text(&self, url: Url) -> Result<String, DataSourceError> {
        debug!(%url, "fetching rate table");
        let text = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

/// Read a rate table from disk.
pub fn load_rate_file(path: impl AsRef<Path>) -> Result<Vec<RateRecord>, DataSourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataSourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rate_table(&text)
}

/// Parse CSV text with a header row into validated rate records.
pub fn parse_rate_table(text: &str) -> Result<Vec<RateRecord>, DataSourceError> {
    let table = CsvTable::parse(text)?;
    let columns = RateColumns::resolve(&table)?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let record = columns.record(row)?;
        let (origin, destination, mode) = record.identity();
        if !seen.insert((origin.to_string(), destination.to_string(), mode)) {
            return Err(DataSourceError::DuplicateRoute {
                line: row.line,
                origin: record.origin,
                destination: record.destination,
                mode: record.mode,
            });
        }
        records.push(record);
    }

    debug!(records = records.len(), "parsed rate table");
    Ok(records)
}

/// Header positions of the required columns.
struct RateColumns {
    indices: [usize; 7],
}

impl RateColumns {
    fn resolve(table: &CsvTable) -> Result<Self, DataSourceError> {
        let mut indices = [0; 7];
        for (slot, name) in indices.iter_mut().zip(RATE_COLUMNS) {
            *slot = table.require_column(name)?;
        }
        Ok(Self { indices })
    }

    /// The cell exactly as written. Blank cells count as missing.
    fn text<'r>(&self, row: &'r CsvRow, column: usize) -> Result<&'r str, DataSourceError> {
        let name = RATE_COLUMNS[column];
        row.get(self.indices[column])
            .filter(|value| !value.trim().is_empty())
            .ok_or(DataSourceError::MissingField {
                line: row.line,
                column: name,
            })
    }

    fn number(&self, row: &CsvRow, column: usize, allow_zero: bool) -> Result<f64, DataSourceError> {
        let name = RATE_COLUMNS[column];
        let raw = self.text(row, column)?.trim();
        let value: f64 = raw
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| DataSourceError::InvalidNumber {
                line: row.line,
                column: name,
                value: raw.to_string(),
            })?;

        let in_range = if allow_zero { value >= 0.0 } else { value > 0.0 };
        if !in_range {
            return Err(DataSourceError::OutOfRange {
                line: row.line,
                column: name,
                expected: if allow_zero { ">= 0" } else { "> 0" },
                value,
            });
        }
        Ok(value)
    }

    fn record(&self, row: &CsvRow) -> Result<RateRecord, DataSourceError> {
        let mode_raw = self.text(row, 2)?.trim();
        let mode = mode_raw
            .parse::<TransportMode>()
            .map_err(|_| DataSourceError::UnknownMode {
                line: row.line,
                value: mode_raw.to_string(),
            })?;

        Ok(RateRecord {
            origin: self.text(row, 0)?.to_string(),
            destination: self.text(row, 1)?.to_string(),
            mode,
            rate_per_km: self.number(row, 3, false)?,
            distance_km: self.number(row, 4, false)?,
            transit_days: self.number(row, 5, false)?,
            co2_per_km: self.number(row, 6, true)?,
        })
    }
}
