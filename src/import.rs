use thiserror::Error;

use crate::elements::{CellValue, Row};

/// Rows kept as the sample of an imported table. The full row count is still
/// reported via [`ParsedTable::row_count`].
pub const SAMPLE_ROW_LIMIT: usize = 100;

/// A parsed table handed over by an upload collaborator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Total number of data rows in the source, not just the retained sample.
    pub row_count: usize,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no columns found in the CSV file")]
    NoColumns,
}

fn strip_quotes(value: &str) -> &str {
    let v = value.trim();
    v.strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(v)
}

fn coerce(value: &str) -> CellValue {
    // Rust parses "NaN" and "inf" as floats; those cells stay text.
    if !value.is_empty() {
        if let Ok(n) = value.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
    }
    match value.to_lowercase().as_str() {
        "true" => CellValue::Bool(true),
        "false" => CellValue::Bool(false),
        _ => CellValue::Text(value.to_string()),
    }
}

/// Parses comma-separated text into a [`ParsedTable`].
///
/// The first line is the header. Values are coerced in order: numeric,
/// boolean, text. Quoted cells lose their surrounding quotes; missing
/// trailing cells become empty text. Only the first [`SAMPLE_ROW_LIMIT`]
/// rows are retained.
pub fn parse_csv(text: &str) -> Result<ParsedTable, ImportError> {
    let mut lines = text.trim().lines();

    let header = lines.next().ok_or(ImportError::NoColumns)?;
    let columns: Vec<String> = header
        .split(',')
        .map(|h| strip_quotes(h).to_string())
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(ImportError::NoColumns);
    }

    let mut rows = Vec::new();
    let mut row_count = 0;
    for line in lines {
        row_count += 1;
        if rows.len() >= SAMPLE_ROW_LIMIT {
            continue;
        }

        let values: Vec<&str> = line.split(',').map(strip_quotes).collect();
        let row: Row = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = values.get(i).copied().unwrap_or_default();
                (column.clone(), coerce(value))
            })
            .collect();
        rows.push(row);
    }

    Ok(ParsedTable {
        columns,
        rows,
        row_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_coerces_values() {
        let table = parse_csv("age,name,approved\n34,Ada,true\n28,Grace,false").unwrap();

        assert_eq!(table.columns, vec!["age", "name", "approved"]);
        assert_eq!(table.row_count, 2);
        assert_eq!(table.rows[0]["age"], CellValue::Number(34.));
        assert_eq!(table.rows[0]["name"], CellValue::Text("Ada".to_string()));
        assert_eq!(table.rows[0]["approved"], CellValue::Bool(true));
        assert_eq!(table.rows[1]["approved"], CellValue::Bool(false));
    }

    #[test]
    fn strips_surrounding_quotes() {
        let table = parse_csv("\"city\",\"pop\"\n\"Oslo\",634293").unwrap();
        assert_eq!(table.columns, vec!["city", "pop"]);
        assert_eq!(table.rows[0]["city"], CellValue::Text("Oslo".to_string()));
        assert_eq!(table.rows[0]["pop"], CellValue::Number(634_293.));
    }

    #[test]
    fn caps_sample_rows_but_counts_all() {
        let mut text = "x\n".to_string();
        for i in 0..250 {
            text.push_str(&format!("{i}\n"));
        }
        let table = parse_csv(&text).unwrap();
        assert_eq!(table.rows.len(), SAMPLE_ROW_LIMIT);
        assert_eq!(table.row_count, 250);
    }

    #[test]
    fn non_finite_values_stay_text() {
        let table = parse_csv("v\nNaN\ninf\n-infinity\n3.5").unwrap();
        assert_eq!(table.rows[0]["v"], CellValue::Text("NaN".to_string()));
        assert_eq!(table.rows[1]["v"], CellValue::Text("inf".to_string()));
        assert_eq!(
            table.rows[2]["v"],
            CellValue::Text("-infinity".to_string())
        );
        assert_eq!(table.rows[3]["v"], CellValue::Number(3.5));
    }

    #[test]
    fn missing_trailing_cells_become_empty_text() {
        let table = parse_csv("a,b\n1").unwrap();
        assert_eq!(table.rows[0]["b"], CellValue::Text(String::new()));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse_csv("   "), Err(ImportError::NoColumns)));
    }
}
