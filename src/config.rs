/*! Run configuration.

Every path, url and year used by the pipelines lives here, so that tests (and users)
can substitute them without touching the filesystem layout or the network.

[Config::default] mirrors the historical hard-coded values:

```text
data/
├── original.csv          frequency table
├── <year>_<gender>.txt   expanded name partitions
├── raw_text/
├── learner_corpus/
├── audio/
└── processed_text/
```
!*/
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::download::{Category, Resource};
use crate::error::Error;
use crate::preprocess::Language;

const FREQUENCY_TABLE: &str = "original.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    data_root: PathBuf,
    target_years: BTreeSet<i32>,
    resources: Vec<Resource>,
    language: Language,
}

impl Config {
    pub fn new(
        data_root: PathBuf,
        target_years: BTreeSet<i32>,
        resources: Vec<Resource>,
        language: Language,
    ) -> Self {
        Self {
            data_root,
            target_years,
            resources,
            language,
        }
    }

    /// Read a JSON configuration. Absent fields take their default value.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        debug!("reading config from {:?}", path);
        let f = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(f)?)
    }

    /// Get a reference to the config's data root.
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn set_data_root(&mut self, data_root: PathBuf) {
        self.data_root = data_root;
    }

    /// Get a reference to the config's target years.
    pub fn target_years(&self) -> &BTreeSet<i32> {
        &self.target_years
    }

    /// Get a reference to the config's resources.
    pub fn resources(&self) -> &[Resource] {
        self.resources.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// directory holding resources of a given [Category].
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.data_root.join(category.dir_name())
    }

    pub fn raw_text_dir(&self) -> PathBuf {
        self.category_dir(Category::RawText)
    }

    pub fn learner_corpus_dir(&self) -> PathBuf {
        self.category_dir(Category::LearnerCorpus)
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.category_dir(Category::Audio)
    }

    pub fn processed_text_dir(&self) -> PathBuf {
        self.data_root.join("processed_text")
    }

    /// location of the name frequency table.
    pub fn frequency_table(&self) -> PathBuf {
        self.data_root.join(FREQUENCY_TABLE)
    }
}

impl Default for Config {
    fn default() -> Self {
        let resources = vec![
            Resource::new(
                "wikipedia",
                "https://dumps.wikimedia.org/eswiki/latest/eswiki-latest-pages-articles.xml.bz2",
                Category::RawText,
                ".txt",
            ),
            Resource::new(
                "opensubtitles",
                "https://opus.nlpl.eu/OpenSubtitles/v2018/moses/es-en.txt.zip",
                Category::RawText,
                ".txt",
            ),
            Resource::new(
                "lang8",
                "https://lang8.com/downloads/corpus.zip",
                Category::LearnerCorpus,
                ".zip",
            ),
            Resource::new(
                "common_voice",
                "https://voice-prod-bundler-ee1969a6ce8178826482b88e843c335139bd3fb4.s3.amazonaws.com/cv-corpus-14.0-2023-06-22/es.tar.gz",
                Category::Audio,
                ".tar.gz",
            ),
        ];

        Self {
            data_root: PathBuf::from("data"),
            target_years: [1999, 2014].into_iter().collect(),
            resources,
            language: Language::Spanish,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::Config;
    use crate::download::Category;
    use crate::preprocess::Language;

    #[test]
    fn default_layout() {
        let c = Config::default();
        assert_eq!(c.raw_text_dir(), PathBuf::from("data/raw_text"));
        assert_eq!(c.learner_corpus_dir(), PathBuf::from("data/learner_corpus"));
        assert_eq!(c.audio_dir(), PathBuf::from("data/audio"));
        assert_eq!(c.processed_text_dir(), PathBuf::from("data/processed_text"));
        assert_eq!(c.frequency_table(), PathBuf::from("data/original.csv"));
        assert_eq!(
            c.target_years().iter().copied().collect::<Vec<_>>(),
            vec![1999, 2014]
        );
    }

    #[test]
    fn default_resources() {
        let c = Config::default();
        let names: Vec<&str> = c.resources().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["wikipedia", "opensubtitles", "lang8", "common_voice"]
        );
        let audio = &c.resources()[3];
        assert_eq!(audio.category(), Category::Audio);
        assert_eq!(
            audio.destination(c.data_root()),
            PathBuf::from("data/audio/common_voice.tar.gz")
        );
    }

    #[test]
    fn partial_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"data_root": "/tmp/corpora", "target_years": [2000], "language": "italian"}}"#
        )
        .unwrap();

        let c = Config::from_path(f.path()).unwrap();
        assert_eq!(c.data_root(), PathBuf::from("/tmp/corpora").as_path());
        assert_eq!(c.target_years().len(), 1);
        assert!(c.target_years().contains(&2000));
        assert_eq!(c.language(), Language::Italian);
        // resources fall back to defaults
        assert_eq!(c.resources().len(), 4);
    }

    #[test]
    fn invalid_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        assert!(Config::from_path(f.path()).is_err());
    }
}
