//! Loading the dataset, over HTTP or from a local copy.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Published location of the monthly global land-surface temperature data.
pub const DEFAULT_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Remote JSON document.
    Url(String),
    /// Local JSON file.
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self {
        Self::Url(DEFAULT_URL.to_string())
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// HTTP client for the dataset endpoint.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Returns a new fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetches and validates the dataset at `url`.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] on transport failure or timeout
    /// - [`Error::HttpStatus`] on a non-success response
    /// - [`Error::Json`] or a validation error for a bad body
    pub async fn fetch(&self, url: &str) -> Result<Dataset> {
        info!(%url, "fetching dataset");
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }

        let json = res.text().await?;
        debug!(bytes = json.len(), "received dataset body");
        Dataset::from_json(&json)
    }

    /// Loads the dataset from whichever source is given.
    ///
    /// # Errors
    ///
    /// See [`Fetcher::fetch`] and [`load_file`].
    pub async fn load(&self, source: &Source) -> Result<Dataset> {
        match source {
            Source::Url(url) => self.fetch(url).await,
            Source::File(path) => load_file(path).await,
        }
    }
}

/// Reads and validates a dataset saved on disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise see
/// [`Dataset::from_json`].
pub async fn load_file(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    info!(path = %path.display(), "reading dataset file");
    let json = tokio::fs::read_to_string(path).await?;
    Dataset::from_json(&json)
}
