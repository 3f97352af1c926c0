// src/session.rs

use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::{
    code::Compatibility,
    error::LoadFailure,
    fetch::{fetch_text, DataSource},
    matrix::CompatibilityMatrix,
};

/// Queries a presentation layer runs against one loaded table.
///
/// A `Session` only exists once the data source loaded, so a [`LoadFailure`]
/// leaves nothing to query.
#[derive(Debug, Clone)]
pub struct Session {
    matrix: CompatibilityMatrix,
}

/// A second-selector entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    pub name: String,
    pub suffix_label: &'static str,
    pub selectable: bool,
    pub code: Compatibility,
}

impl CandidateView {
    /// `name` followed by its suffix label.
    pub fn display_text(&self) -> String {
        format!("{}{}", self.name, self.suffix_label)
    }
}

/// Rendered result of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub code: Compatibility,
    pub message: &'static str,
    pub style_class: &'static str,
}

impl From<Compatibility> for Verdict {
    fn from(code: Compatibility) -> Self {
        Self {
            code,
            message: code.message(),
            style_class: code.style_class(),
        }
    }
}

impl Session {
    /// Fetch the source once and build the table from its full content.
    pub async fn load(client: &Client, source: &DataSource) -> Result<Self, LoadFailure> {
        let text = fetch_text(client, source).await?;
        let session = Self::from_text(&text);
        info!(
            drugs = session.matrix.len(),
            columns = session.matrix.headers().len(),
            "compatibility table ready"
        );
        Ok(session)
    }

    pub fn from_text(raw: &str) -> Self {
        Self::from_matrix(CompatibilityMatrix::parse(raw))
    }

    pub fn from_matrix(matrix: CompatibilityMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &CompatibilityMatrix {
        &self.matrix
    }

    /// Every row drug, sorted. Feeds the first selector.
    pub fn drug_list(&self) -> Vec<String> {
        let mut drugs: Vec<String> = self.matrix.row_names().map(str::to_string).collect();
        drugs.sort();
        drugs
    }

    /// Entries for the second selector once `selected` is chosen.
    /// Nothing is offered until a first drug is picked.
    pub fn candidates(&self, selected: &str) -> Vec<CandidateView> {
        if selected.trim().is_empty() {
            return Vec::new();
        }

        self.matrix
            .candidates(selected)
            .into_iter()
            .map(|c| CandidateView {
                suffix_label: c.code.suffix_label(),
                selectable: c.selectable,
                code: c.code,
                name: c.name,
            })
            .collect()
    }

    pub fn classify(&self, drug1: &str, drug2: &str) -> Verdict {
        Verdict::from(self.matrix.lookup(drug1, drug2))
    }
}
