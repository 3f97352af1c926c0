// src/matrix/mod.rs

pub mod parse;

use crate::code::Compatibility;
use serde::Serialize;
use std::collections::HashMap;

/// One data row of the table: the row drug and its codes keyed by column drug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DrugRow {
    pub name: String,
    pub cells: HashMap<String, Compatibility>,
}

impl DrugRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    pub fn get(&self, column_drug: &str) -> Option<Compatibility> {
        self.cells.get(column_drug).copied()
    }
}

/// The parsed compatibility table. Built once by [`CompatibilityMatrix::parse`]
/// and only read afterwards.
///
/// `headers` and the row keys are expected to name the same drugs, but nothing
/// here relies on it: a name present on one side only just yields `MissingData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompatibilityMatrix {
    headers: Vec<String>,
    rows: HashMap<String, DrugRow>,
}

/// An entry of the second selector once a first drug is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub code: Compatibility,
    pub selectable: bool,
}

impl CompatibilityMatrix {
    pub(crate) fn from_parts(headers: Vec<String>, rows: HashMap<String, DrugRow>) -> Self {
        Self { headers, rows }
    }

    /// Column drugs, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row(&self, drug: &str) -> Option<&DrugRow> {
        self.rows.get(drug)
    }

    pub fn row_names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Code for `drug1` (row) against `drug2` (column).
    ///
    /// Directional: `matrix[drug2][drug1]` is never consulted, so an asymmetric
    /// dataset answers differently depending on argument order.
    pub fn lookup(&self, drug1: &str, drug2: &str) -> Compatibility {
        self.rows
            .get(drug1)
            .and_then(|row| row.get(drug2))
            .unwrap_or(Compatibility::MissingData)
    }

    /// Every column drug except `selected`, sorted by name, with its code
    /// against `selected`. Only `Compatible` entries are selectable.
    pub fn candidates(&self, selected: &str) -> Vec<Candidate> {
        let mut names: Vec<&String> = self.headers.iter().filter(|h| *h != selected).collect();
        names.sort();

        names
            .into_iter()
            .map(|name| {
                let code = self.lookup(selected, name);
                Candidate {
                    name: name.clone(),
                    code,
                    selectable: code.is_selectable(),
                }
            })
            .collect()
    }
}
