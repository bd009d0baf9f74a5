/*! Corpus acquisition.

Fetches a fixed set of named resources into category directories under the data root.
Downloads are sequential and blocking. Nothing is cached: re-running overwrites previous files.

The actual transfer goes through the [Fetch] trait, [HttpFetcher] being the default implementation.
!*/
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;

/// size of the buffer used to stream responses to disk.
const CHUNK_SIZE: usize = 8192;

/// Kind of downloaded data. Each kind lands in its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RawText,
    LearnerCorpus,
    Audio,
}

impl Category {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::RawText => "raw_text",
            Category::LearnerCorpus => "learner_corpus",
            Category::Audio => "audio",
        }
    }
}

/// A remote resource, identified by a logical name (eg. `wikipedia`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    name: String,
    url: String,
    category: Category,
    extension: String,
}

impl Resource {
    pub fn new(name: &str, url: &str, category: Category, extension: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            category,
            extension: extension.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// `<data_root>/<category>/<name><extension>`
    pub fn destination(&self, data_root: &Path) -> PathBuf {
        data_root
            .join(self.category.dir_name())
            .join(format!("{}{}", self.name, self.extension))
    }
}

/// What to do with the remaining resources once one of them failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// stop at the first failure.
    #[default]
    FailFast,
    /// attempt every resource, collecting failures.
    Continue,
}

/// Fetches a single url into a local file, returning the number of written bytes.
pub trait Fetch {
    fn fetch(&self, url: &Url, dst: &Path) -> Result<u64, Error>;
}

/// Blocking HTTP(S) fetcher.
///
/// Non-2xx responses are errors.
/// The body is streamed through a [CHUNK_SIZE] buffer and never fully held in memory.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url, dst: &Path) -> Result<u64, Error> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send()?.error_for_status()?;
        let mut out = File::create(dst)?;
        let mut buf = BufReader::with_capacity(CHUNK_SIZE, response);
        let written = std::io::copy(&mut buf, &mut out)?;
        Ok(written)
    }
}

/// holds resources to download and the fetcher that will make the requests.
pub struct Downloader<F: Fetch = HttpFetcher> {
    data_root: PathBuf,
    resources: Vec<Resource>,
    fetcher: F,
}

impl Downloader<HttpFetcher> {
    pub fn from_config(config: &Config) -> Self {
        Self::with_fetcher(config, HttpFetcher::new())
    }
}

impl<F: Fetch> Downloader<F> {
    pub fn with_fetcher(config: &Config, fetcher: F) -> Self {
        Self {
            data_root: config.data_root().to_path_buf(),
            resources: config.resources().to_vec(),
            fetcher,
        }
    }

    /// Download a single resource, creating its category directory if needed.
    ///
    /// Failures are logged with the url and destination, then returned as [Error::Download].
    pub fn download(&self, resource: &Resource) -> Result<PathBuf, Error> {
        let dst = resource.destination(&self.data_root);
        match self.fetch_to(resource, &dst) {
            Ok(nb_bytes) => {
                info!(
                    "Successfully downloaded {} to {:?} ({} bytes)",
                    resource.url(),
                    dst,
                    nb_bytes
                );
                Ok(dst)
            }
            Err(e) => {
                error!("Error downloading {} to {:?}: {}", resource.url(), dst, e);
                Err(e.with_download_context(resource.url(), dst))
            }
        }
    }

    fn fetch_to(&self, resource: &Resource, dst: &Path) -> Result<u64, Error> {
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let url = Url::parse(resource.url())?;
        self.fetcher.fetch(&url, dst)
    }

    /// sequentially download every resource.
    ///
    /// With [FailurePolicy::FailFast], the returned vector ends at the first failure.
    pub fn download_all(&self, policy: FailurePolicy) -> Vec<Result<PathBuf, Error>> {
        let nb_resources = self.resources.len();
        let mut results = Vec::with_capacity(nb_resources);

        for (idx, resource) in self.resources.iter().enumerate() {
            info!(
                "[{}] downloading {}/{}",
                resource.name(),
                idx + 1,
                nb_resources
            );
            let result = self.download(resource);
            let failed = result.is_err();
            results.push(result);

            if failed && policy == FailurePolicy::FailFast {
                warn!(
                    "aborting acquisition, {} resource(s) not attempted",
                    nb_resources - idx - 1
                );
                break;
            }
        }

        results
    }
}
