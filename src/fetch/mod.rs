// src/fetch/mod.rs

use reqwest::Client;
use std::{
    fmt,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, info};
use url::Url;

use crate::error::LoadFailure;

/// Where the compatibility CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(Url),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched over the network;
    /// anything else is treated as a local path.
    pub fn parse(s: &str) -> Result<Self, LoadFailure> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LoadFailure::InvalidSource {
                source_str: s.to_string(),
                reason: "empty location".into(),
            });
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(s).map_err(|e| LoadFailure::InvalidSource {
                source_str: s.to_string(),
                reason: e.to_string(),
            })?;
            Ok(DataSource::Url(url))
        } else {
            Ok(DataSource::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the whole data source as text. One attempt, no retries.
#[tracing::instrument(level = "info", skip(client, source), fields(source = %source))]
pub async fn fetch_text(client: &Client, source: &DataSource) -> Result<String, LoadFailure> {
    let text = match source {
        DataSource::Url(url) => fetch_url(client, url).await?,
        DataSource::File(path) => read_file(path).await?,
    };
    info!(bytes = text.len(), "loaded data source");
    Ok(text)
}

async fn fetch_url(client: &Client, url: &Url) -> Result<String, LoadFailure> {
    let request_failed = |source| LoadFailure::Request {
        url: url.to_string(),
        source,
    };

    debug!("GET {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .map_err(request_failed)?
        .error_for_status()
        .map_err(request_failed)?
        .text()
        .await
        .map_err(request_failed)
}

async fn read_file(path: &Path) -> Result<String, LoadFailure> {
    debug!("reading {}", path.display());
    fs::read_to_string(path)
        .await
        .map_err(|source| LoadFailure::Read {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_client() -> Result<Client> {
        Ok(Client::builder().no_proxy().build()?)
    }

    /// Serve exactly one HTTP response on a local port and return its base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        Ok(format!("http://{}/data/compatibilidad_medicamentos.csv", addr))
    }

    #[test]
    fn test_parse_data_source() -> Result<()> {
        assert_eq!(
            DataSource::parse("data/compatibilidad_medicamentos.csv")?,
            DataSource::File(PathBuf::from("data/compatibilidad_medicamentos.csv"))
        );
        assert!(matches!(
            DataSource::parse("https://example.org/data.csv")?,
            DataSource::Url(_)
        ));
        assert!(matches!(
            DataSource::parse("   "),
            Err(LoadFailure::InvalidSource { .. })
        ));
        assert!(matches!(
            DataSource::parse("http://"),
            Err(LoadFailure::InvalidSource { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"\"\",\"\",\"Atropina\"\n")?;

        let source = DataSource::File(tmp.path().to_path_buf());
        let text = fetch_text(&Client::new(), &source).await?;
        assert_eq!(text, "\"\",\"\",\"Atropina\"\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let source = DataSource::File(PathBuf::from("/nonexistent/compatibilidad.csv"));
        let err = fetch_text(&Client::new(), &source).await.unwrap_err();
        assert!(matches!(err, LoadFailure::Read { .. }));
    }

    #[tokio::test]
    async fn test_fetch_url() -> Result<()> {
        let url = serve_once("200 OK", "\"\",\"\",\"Atropina\"\n\"1\",\"Morfina\",\"V\"\n").await?;

        let source = DataSource::parse(&url)?;
        let text = fetch_text(&local_client()?, &source).await?;
        assert!(text.contains("Morfina"));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_url_error_status() -> Result<()> {
        let url = serve_once("404 Not Found", "not here").await?;

        let source = DataSource::parse(&url)?;
        let err = fetch_text(&local_client()?, &source).await.unwrap_err();
        assert!(matches!(err, LoadFailure::Request { .. }));
        Ok(())
    }
}
