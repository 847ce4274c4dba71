//! Output artifacts: derived result tables and chart files.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::info;

use super::charts::ChartKind;
use super::table::join_record;
use crate::domain::{BatchOutcome, BatchRow, QuoteResult, NO_ROUTE_COST};

pub const BATCH_FILE_NAME: &str = "batch_results.csv";

const RESULT_HEADER: [&str; 8] = [
    "origin",
    "destination",
    "mode",
    "rate_per_km",
    "distance_km",
    "transit_days",
    "co2_per_km",
    "total_cost",
];

const BATCH_HEADER: [&str; 8] = [
    "origin",
    "destination",
    "weight",
    "mode",
    "total_cost",
    "transit_days",
    "co2_per_km",
    "note",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// `recommendations_{origin}_{destination}_{kg}kg.csv`, weight truncated to whole kg.
pub fn results_file_name(origin: &str, destination: &str, weight_kg: f64) -> String {
    format!(
        "recommendations_{}_{}_{}kg.csv",
        sanitize(origin),
        sanitize(destination),
        weight_kg.trunc() as u64
    )
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '-' { ch } else { '_' })
        .collect()
}

/// Serialise ranked results as CSV text.
pub fn results_csv(results: &[QuoteResult]) -> String {
    let mut out = join_record(RESULT_HEADER);
    out.push('\n');
    for result in results {
        let record = &result.record;
        out.push_str(&join_record([
            record.origin.clone(),
            record.destination.clone(),
            record.mode.to_string(),
            record.rate_per_km.to_string(),
            record.distance_km.to_string(),
            record.transit_days.to_string(),
            record.co2_per_km.to_string(),
            format!("{:.2}", result.total_cost),
        ]));
        out.push('\n');
    }
    out
}

/// Serialise batch rows as CSV text, sentinel rows included.
pub fn batch_csv(rows: &[BatchRow]) -> String {
    let mut out = join_record(BATCH_HEADER);
    out.push('\n');
    for row in rows {
        let (days, co2) = row
            .best()
            .map(|best| (best.transit_days().to_string(), best.co2_per_km().to_string()))
            .unwrap_or_default();
        let note = match &row.outcome {
            BatchOutcome::InvalidWeight(err) => err.to_string(),
            _ => String::new(),
        };
        let cost = match row.best() {
            Some(best) => format!("{:.2}", best.total_cost),
            None => NO_ROUTE_COST.to_string(),
        };
        out.push_str(&join_record([
            row.request.origin.clone(),
            row.request.destination.clone(),
            row.request.weight_input.clone(),
            row.mode_label(),
            cost,
            days,
            co2,
            note,
        ]));
        out.push('\n');
    }
    out
}

/// Write the ranked results for one shipment into `dir`.
pub fn write_results_table(
    results: &[QuoteResult],
    dir: &Path,
    origin: &str,
    destination: &str,
    weight_kg: f64,
) -> Result<PathBuf, ExportError> {
    if results.is_empty() {
        return Err(ExportError::Empty);
    }
    let path = dir.join(results_file_name(origin, destination, weight_kg));
    write_file(&path, &results_csv(results))?;
    info!(path = %path.display(), rows = results.len(), "saved results table");
    Ok(path)
}

pub fn write_batch_table(rows: &[BatchRow], dir: &Path) -> Result<PathBuf, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }
    let path = dir.join(BATCH_FILE_NAME);
    write_file(&path, &batch_csv(rows))?;
    info!(path = %path.display(), rows = rows.len(), "saved batch table");
    Ok(path)
}

/// Write cost, transit time and emissions charts into `dir`.
pub fn write_charts(results: &[QuoteResult], dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    if results.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut written = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = dir.join(kind.file_name());
        write_file(&path, &kind.render(results))?;
        written.push(path);
    }
    info!(dir = %dir.display(), "saved charts");
    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let wrap = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, contents).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_truncates_weight_and_sanitizes_cities() {
        assert_eq!(
            results_file_name("Shanghai", "Los Angeles", 999.9),
            "recommendations_Shanghai_Los_Angeles_999kg.csv"
        );
        assert_eq!(
            results_file_name("A/B", "C", 1000.0),
            "recommendations_A_B_C_1000kg.csv"
        );
    }

    #[test]
    fn empty_results_are_not_written() {
        let dir = std::env::temp_dir();
        assert!(matches!(
            write_results_table(&[], &dir, "A", "B", 1.0),
            Err(ExportError::Empty)
        ));
        assert!(matches!(write_charts(&[], &dir), Err(ExportError::Empty)));
    }
}
