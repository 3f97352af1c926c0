// src/matrix/parse.rs
use csv::{ReaderBuilder, Terminator};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::{CompatibilityMatrix, DrugRow};
use crate::code::Compatibility;

/// Leading columns before the first data column: a numeric row index, then the row drug.
const LEADING_COLUMNS: usize = 2;

/// Strip every quote character, then trim whitespace.
fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

impl CompatibilityMatrix {
    /// Parse the raw CSV text into an immutable matrix.
    ///
    /// - The first non-blank line is the header: fields 0 and 1 are dropped,
    ///   the rest name the column drugs by position.
    /// - In each later line field 1 is the row drug. Rows without one are skipped.
    /// - Field `j >= 2` belongs to header `j - 2`; cells past the header are dropped.
    ///
    /// Never fails: short, long or unreadable lines lose data instead of raising.
    #[tracing::instrument(level = "debug", skip(raw), fields(bytes = raw.len()))]
    pub fn parse(raw: &str) -> Self {
        // Quotes are stripped, not interpreted, so a quoted comma still splits.
        // Lines end at `\n` only; a trailing `\r` is trimmed with the last field.
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(raw.trim_start().as_bytes());

        let mut headers: Vec<String> = Vec::new();
        let mut rows: HashMap<String, DrugRow> = HashMap::new();
        let mut seen_header = false;

        for (idx, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!(record = idx, error = %e, "skipping unreadable line");
                    continue;
                }
            };

            // 1) header row
            if !seen_header {
                headers = record
                    .iter()
                    .skip(LEADING_COLUMNS)
                    .map(clean_field)
                    .collect();
                seen_header = true;
                continue;
            }

            // 2) data rows
            let name = match record.get(1).map(clean_field) {
                Some(n) if !n.is_empty() => n,
                _ => {
                    debug!(record = idx, "skipping row without a drug name");
                    continue;
                }
            };

            let mut row = DrugRow::new(name.clone());
            for (col, cell) in record.iter().enumerate().skip(LEADING_COLUMNS) {
                let Some(column_drug) = headers.get(col - LEADING_COLUMNS) else {
                    continue;
                };
                let cell = clean_field(cell);
                let code = Compatibility::from_cell(&cell);
                if code == Compatibility::MissingData && !matches!(cell.as_str(), "" | "G") {
                    debug!(row = %name, column = %column_drug, value = %cell, "unrecognized code, using G");
                }
                row.cells.insert(column_drug.clone(), code);
            }

            if rows.insert(name.clone(), row).is_some() {
                debug!(row = %name, "duplicate row drug, keeping the later row");
            }
        }

        debug!(headers = headers.len(), rows = rows.len(), "parsed compatibility table");
        CompatibilityMatrix::from_parts(headers, rows)
    }
}
