//! Dataset downloads from third-party URLs.

use std::path::{Path, PathBuf};

use flower_core::DatasetDescriptor;
use tracing::info;

use crate::{error::RemoteError, http::build_client, http::check_response};

/// Fetches registered datasets into a local data directory.
///
/// Each dataset lands in `<data_dir>/<name>/<file>`, where `<file>` is the
/// last segment of the dataset URL.
#[derive(Clone)]
pub struct DatasetDownloader {
    http: reqwest::Client,
    data_dir: PathBuf,
}

impl DatasetDownloader {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_client()?,
            data_dir: data_dir.into(),
        })
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Download `dataset` and return the path of the written file.
    ///
    /// An existing file at the target path is overwritten.
    ///
    /// # Errors
    ///
    /// [`RemoteError::InvalidUrl`] for unparseable URLs, transport or API
    /// errors from the remote host, and [`RemoteError::Io`] when the file
    /// cannot be written.
    pub async fn download(&self, dataset: &DatasetDescriptor) -> Result<PathBuf, RemoteError> {
        let url = reqwest::Url::parse(&dataset.url).map_err(|e| RemoteError::InvalidUrl {
            url: dataset.url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidUrl {
                url: dataset.url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let target_dir = self.data_dir.join(sanitize(&dataset.name));
        let target = target_dir.join(file_name(&url, &dataset.name));

        let resp = check_response(self.http.get(url).send().await?).await?;
        let body = resp.bytes().await?;

        tokio::fs::create_dir_all(&target_dir).await?;
        tokio::fs::write(&target, &body).await?;
        info!(dataset = %dataset.name, path = %target.display(), bytes = body.len(), "downloaded dataset");
        Ok(target)
    }
}

/// Last non-empty path segment of `url`, or `<name>.csv` when there is none.
fn file_name(url: &reqwest::Url, name: &str) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(|s| urlencoding::decode(s).map_or_else(|_| s.to_string(), |d| d.into_owned()))
        .map(|s| sanitize(&s))
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .unwrap_or_else(|| format!("{}.csv", sanitize(name)))
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
