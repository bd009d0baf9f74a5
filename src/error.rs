//! Error enum
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    Reqwest(reqwest::Error),
    Url(url::ParseError),
    /// A tabular source lacks a required column.
    MissingColumn(String),
    /// A fetch failed. Keeps the url and destination for reporting.
    Download {
        url: String,
        dst: PathBuf,
        source: Box<Error>,
    },
    Custom(String),
}

impl Error {
    /// wraps `self` into a [Error::Download] with fetch context.
    pub fn with_download_context(self, url: &str, dst: PathBuf) -> Self {
        Error::Download {
            url: url.to_string(),
            dst,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Csv(e) => write!(f, "csv error: {e}"),
            Error::Serde(e) => write!(f, "serialization error: {e}"),
            Error::Reqwest(e) => write!(f, "http error: {e}"),
            Error::Url(e) => write!(f, "invalid url: {e}"),
            Error::MissingColumn(c) => write!(f, "missing required column `{c}`"),
            Error::Download { url, dst, source } => {
                write!(f, "could not download {url} to {dst:?}: {source}")
            }
            Error::Custom(s) => write!(f, "{s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Serde(e) => Some(e),
            Error::Reqwest(e) => Some(e),
            Error::Url(e) => Some(e),
            Error::Download { source, .. } => Some(source.as_ref()),
            Error::MissingColumn(_) | Error::Custom(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
