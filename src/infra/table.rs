//! Minimal header-keyed CSV reading and writing.
//!
//! Rate tables are small, so the whole text is read at once. Fields may be
//! wrapped in double quotes (with `""` as an escaped quote) so city names can
//! contain commas. Cell values are kept exactly as written; only header
//! names are trimmed and lowercased for lookup.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table is empty (a header row is required)")]
    MissingHeader,
    #[error("required column '{0}' is missing from the header")]
    MissingColumn(String),
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}

/// One data row with its 1-based line number in the source text.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvRow {
    pub line: usize,
    fields: Vec<String>,
}

impl CsvRow {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut lines = text
            .trim_start_matches('\u{feff}')
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines.next().ok_or(TableError::MissingHeader)?;
        let headers = split_record(header, header_line)?
            .into_iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();

        let rows = lines
            .map(|(line, raw)| {
                split_record(raw, line).map(|fields| CsvRow { line, fields })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[CsvRow] {
        &self.rows
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}

fn split_record(line: &str, line_no: usize) -> Result<Vec<String>, TableError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err(TableError::UnterminatedQuote { line: line_no });
    }
    fields.push(current);
    Ok(fields)
}

/// Quote a field for output when it would otherwise break the row.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render one output row.
pub fn join_record<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
