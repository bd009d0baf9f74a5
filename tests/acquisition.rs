// acquisition through a local "mirror": urls are mapped to files of a source folder.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use lengua::config::Config;
use lengua::download::{Category, Downloader, FailurePolicy, Fetch, Resource};
use lengua::error::Error;
use lengua::preprocess::{Language, Preprocessor, Segmenter};
use reqwest::Url;

struct Mirror {
    root: PathBuf,
}

impl Fetch for Mirror {
    fn fetch(&self, url: &Url, dst: &Path) -> Result<u64, Error> {
        let filename = url
            .path_segments()
            .and_then(|segments| segments.last())
            .ok_or_else(|| Error::Custom(format!("no file in {url}")))?;
        Ok(std::fs::copy(self.root.join(filename), dst)?)
    }
}

fn config(root: &Path) -> Config {
    Config::new(
        root.to_path_buf(),
        BTreeSet::new(),
        vec![
            Resource::new(
                "wikipedia",
                "https://mirror.test/wikipedia.txt",
                Category::RawText,
                ".txt",
            ),
            Resource::new(
                "learner_corpus",
                "https://mirror.test/learner_corpus.csv",
                Category::RawText,
                ".csv",
            ),
            Resource::new(
                "lang8",
                "https://mirror.test/lang8.zip",
                Category::LearnerCorpus,
                ".zip",
            ),
        ],
        Language::Spanish,
    )
}

#[test]
fn download_then_preprocess() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let dl = Downloader::with_fetcher(
        &config,
        Mirror {
            root: PathBuf::from("res"),
        },
    );

    let results = dl.download_all(FailurePolicy::Continue);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    // lang8.zip is not in the mirror
    match &results[2] {
        Err(Error::Download { url, dst, source }) => {
            assert_eq!(url, "https://mirror.test/lang8.zip");
            assert_eq!(dst, &config.learner_corpus_dir().join("lang8.zip"));
            assert!(matches!(**source, Error::Io(_)));
        }
        other => panic!("expected a download error, got {:?}", other),
    }

    let p = Preprocessor::from_config(&config, Segmenter::load(config.language())).unwrap();
    p.process_document(
        &p.raw_path("wikipedia.txt"),
        &p.processed_path("processed_wikipedia.txt"),
    )
    .unwrap();
    assert_eq!(
        p.process_learner_pairs(
            &p.raw_path("learner_corpus.csv"),
            &p.processed_path("processed_learner_corpus.json"),
        )
        .unwrap(),
        3
    );
    assert!(config
        .processed_text_dir()
        .join("processed_wikipedia.txt")
        .exists());
}

#[test]
fn fail_fast_by_default() {
    let root = tempfile::tempdir().unwrap();
    // failing resource first
    let json = serde_json::json!({
        "data_root": root.path(),
        "resources": [
            {"name": "lang8", "url": "https://mirror.test/lang8.zip", "category": "learner_corpus", "extension": ".zip"},
            {"name": "wikipedia", "url": "https://mirror.test/wikipedia.txt", "category": "raw_text", "extension": ".txt"}
        ]
    });
    let config_path = root.path().join("config.json");
    std::fs::write(&config_path, json.to_string()).unwrap();
    let config = Config::from_path(&config_path).unwrap();

    let dl = Downloader::with_fetcher(
        &config,
        Mirror {
            root: PathBuf::from("res"),
        },
    );
    let results = dl.download_all(FailurePolicy::default());
    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
    assert!(!config.raw_text_dir().join("wikipedia.txt").exists());
}
