//! Batch request files: `origin,destination,weight` per row.

use std::{fs, path::Path};

use super::rates::DataSourceError;
use super::table::{CsvRow, CsvTable};
use crate::domain::BatchRequest;

/// Parse batch requests from CSV text.
///
/// Only the table structure can fail here. Cells are kept as written, so a
/// blank city or a bad weight spoils its own row when the batch runs and
/// nothing else.
pub fn parse_batch_requests(text: &str) -> Result<Vec<BatchRequest>, DataSourceError> {
    let table = CsvTable::parse(text)?;
    let origin = table.require_column("origin")?;
    let destination = table.require_column("destination")?;
    let weight = table.require_column("weight")?;

    let cell = |row: &CsvRow, index: usize| row.get(index).unwrap_or_default().to_string();
    Ok(table
        .rows()
        .iter()
        .map(|row| BatchRequest {
            origin: cell(row, origin),
            destination: cell(row, destination),
            weight_input: cell(row, weight),
        })
        .collect())
}

pub fn load_batch_file(path: impl AsRef<Path>) -> Result<Vec<BatchRequest>, DataSourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataSourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_batch_requests(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_weights_as_typed() {
        let requests =
            parse_batch_requests("origin,destination,weight\nA,B,1000kg\nX,Y,bad\nC,D,\n").unwrap();
        assert_eq!(
            requests,
            vec![
                BatchRequest::new("A", "B", "1000kg"),
                BatchRequest::new("X", "Y", "bad"),
                BatchRequest::new("C", "D", ""),
            ]
        );
    }

    #[test]
    fn blank_city_stays_a_request() {
        let requests = parse_batch_requests(
            "origin,destination,weight\nShanghai,Los Angeles,1000\n,Los Angeles,10\nHamburg,New York,5\n",
        )
        .unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1], BatchRequest::new("", "Los Angeles", "10"));
        assert_eq!(requests[2].origin, "Hamburg");
    }

    #[test]
    fn weight_column_is_required() {
        assert!(parse_batch_requests("origin,destination\nA,B\n").is_err());
    }
}
