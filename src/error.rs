// src/error.rs
use std::path::PathBuf;

/// The data source could not be loaded. Fatal for the session: no matrix exists
/// and no query can be answered.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    #[error("invalid data source `{source_str}`: {reason}")]
    InvalidSource { source_str: String, reason: String },

    #[error("fetching {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading {} failed", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadFailure {
    /// Single line shown to the user when the session cannot start.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadFailure::InvalidSource { .. } => {
                "Error: la ruta del archivo de compatibilidad no es válida."
            }
            LoadFailure::Request { .. } | LoadFailure::Read { .. } => {
                "Error: no se pudo cargar el archivo CSV."
            }
        }
    }
}
