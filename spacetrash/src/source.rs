//! Where the catalog text comes from

use serde::Deserialize;
use std::{
    fmt, fs,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Unsupported catalog source scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("Invalid catalog source URL")]
    Url(#[from] url::ParseError),
    #[error("The file URL '{0}' doesn't name a local path")]
    FileUrl(Url),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("The catalog server responded with HTTP status {0}")]
    Status(u16),
    #[error("The catalog server responded with non-text content type '{0}'")]
    ContentType(String),
    #[error("The catalog server response has no content type")]
    MissingContentType,
    #[error("Failed to reach the catalog server: {0}")]
    Transport(String),
    #[error("Failed to read the catalog '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("The catalog fetch task did not complete")]
    Join(#[from] tokio::task::JoinError),
}

/// A flat text resource holding 3LE groups
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub enum CatalogSource {
    Http(Url),
    File(PathBuf),
}

impl CatalogSource {
    /// Retrieves the whole catalog text.
    ///
    /// The blocking work runs on tokio's blocking pool, so this is the only
    /// point where the caller suspends.
    pub async fn fetch(&self) -> Result<String, FetchError> {
        debug!(source = %self, "Fetching catalog");
        let source = self.clone();
        let result = tokio::task::spawn_blocking(move || match source {
            CatalogSource::Http(url) => fetch_http(&url),
            CatalogSource::File(path) => fetch_file(&path),
        })
        .await?;
        if let Err(e) = &result {
            warn!(source = %self, error = %e, "Catalog fetch failed");
        }
        result
    }
}

fn fetch_http(url: &Url) -> Result<String, FetchError> {
    let resp = match ureq::get(url.as_str()).call() {
        Ok(resp) => resp,
        Err(ureq::Error::Status(code, _)) => return Err(FetchError::Status(code)),
        Err(e) => return Err(FetchError::Transport(e.to_string())),
    };
    check_response(resp.status(), resp.header("content-type"))?;

    // Full catalog dumps exceed the size cap of `Response::into_string`
    let mut text = String::new();
    resp.into_reader()
        .read_to_string(&mut text)
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    Ok(text)
}

fn fetch_file(path: &Path) -> Result<String, FetchError> {
    fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_owned(),
        source,
    })
}

/// A catalog response needs a 2xx status and an explicit `text/*` content type
pub fn check_response(status: u16, content_type: Option<&str>) -> Result<(), FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }
    let content_type = content_type.ok_or(FetchError::MissingContentType)?;
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !mime.starts_with("text/") {
        return Err(FetchError::ContentType(content_type.to_owned()));
    }
    Ok(())
}

impl FromStr for CatalogSource {
    type Err = SourceError;

    /// `http(s)://` and `file://` URLs, anything else is a local path
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.contains("://") {
            return Ok(CatalogSource::File(PathBuf::from(s)));
        }
        let url = Url::parse(s)?;
        match url.scheme() {
            "http" | "https" => Ok(CatalogSource::Http(url)),
            "file" => url
                .to_file_path()
                .map(CatalogSource::File)
                .map_err(|_| SourceError::FileUrl(url)),
            other => Err(SourceError::UnsupportedScheme(other.to_owned())),
        }
    }
}

impl TryFrom<String> for CatalogSource {
    type Error = SourceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Http(url) => write!(f, "{url}"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
