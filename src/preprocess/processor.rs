//! File level preprocessing: raw documents and learner correction pairs.
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use super::tokenizer::Tokenize;
use crate::config::Config;
use crate::error::Error;

const PAIR_COLUMNS: [&str; 3] = ["original", "corrected", "error_type"];

/// A learner sentence and its correction, labeled by error type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerPair {
    pub original: String,
    pub corrected: String,
    pub error_type: String,
}

impl LearnerPair {
    /// Normalize both sentences. `error_type` is kept verbatim.
    pub fn normalized(self) -> Self {
        Self {
            original: normalize(&self.original),
            corrected: normalize(&self.corrected),
            error_type: self.error_type,
        }
    }
}

/// Read learner pairs from a csv source, checking required columns first.
pub fn read_pairs<R: Read>(rdr: R) -> Result<Vec<LearnerPair>, Error> {
    let mut rdr = csv::Reader::from_reader(rdr);
    let headers = rdr.headers()?.clone();
    for column in PAIR_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn(column.to_string()));
        }
    }

    rdr.deserialize::<LearnerPair>()
        .map(|pair| pair.map_err(Error::from))
        .collect()
}

/// Holds the raw/processed locations and the tokenizer handle.
pub struct Preprocessor<T: Tokenize> {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
    tokenizer: T,
}

impl<T: Tokenize> Preprocessor<T> {
    /// Creates the processed directory if it does not exist.
    pub fn new(raw_dir: PathBuf, processed_dir: PathBuf, tokenizer: T) -> Result<Self, Error> {
        std::fs::create_dir_all(&processed_dir)?;
        Ok(Self {
            raw_dir,
            processed_dir,
            tokenizer,
        })
    }

    pub fn from_config(config: &Config, tokenizer: T) -> Result<Self, Error> {
        Self::new(config.raw_text_dir(), config.processed_text_dir(), tokenizer)
    }

    /// path of a raw file named `filename`.
    pub fn raw_path(&self, filename: &str) -> PathBuf {
        self.raw_dir.join(filename)
    }

    /// path of a processed file named `filename`.
    pub fn processed_path(&self, filename: &str) -> PathBuf {
        self.processed_dir.join(filename)
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Normalize the whole content of `input` into `output`.
    pub fn process_document(&self, input: &Path, output: &Path) -> Result<(), Error> {
        let text = std::fs::read_to_string(input)?;
        std::fs::write(output, normalize(&text))?;
        info!("Processed document {:?} saved to {:?}", input, output);
        Ok(())
    }

    /// Normalize learner pairs from the csv at `input`,
    /// writing them to `output` as a pretty-printed JSON array.
    ///
    /// Returns the number of pairs.
    pub fn process_learner_pairs(&self, input: &Path, output: &Path) -> Result<usize, Error> {
        let pairs: Vec<LearnerPair> = read_pairs(File::open(input)?)?
            .into_iter()
            .map(LearnerPair::normalized)
            .collect();

        let mut w = BufWriter::new(File::create(output)?);
        serde_json::to_writer_pretty(&mut w, &pairs)?;
        w.flush()?;

        info!(
            "Processed {} learner pairs from {:?} saved to {:?}",
            pairs.len(),
            input,
            output
        );
        Ok(pairs.len())
    }

    /// Tokenize `input`, writing one token per line to `output`.
    ///
    /// Returns the number of tokens.
    pub fn tokenize_document(&self, input: &Path, output: &Path) -> Result<usize, Error> {
        let text = std::fs::read_to_string(input)?;
        let tokens = self.tokenize(&text);

        let mut w = BufWriter::new(File::create(output)?);
        for token in &tokens {
            writeln!(w, "{}", token)?;
        }
        w.flush()?;

        info!(
            "Tokenized {:?} ({} tokens) saved to {:?}",
            input,
            tokens.len(),
            output
        );
        Ok(tokens.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::{Language, Segmenter};

    /// splits on spaces only
    struct SpaceTokenizer;
    impl Tokenize for SpaceTokenizer {
        fn tokenize(&self, text: &str) -> Vec<String> {
            text.split(' ').map(String::from).collect()
        }
    }

    #[test]
    fn pairs_missing_column() {
        let csv = "original,error_type\nYo comi,accent missing\n";
        match read_pairs(csv.as_bytes()) {
            Err(Error::MissingColumn(c)) => assert_eq!(c, "corrected"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn pairs_normalized() {
        let csv = "original,corrected,error_type\n\"Yo  comi manzana ayer.\",\"Yo comí una MANZANA ayer.\",accent missing\n";
        let pairs: Vec<LearnerPair> = read_pairs(csv.as_bytes())
            .unwrap()
            .into_iter()
            .map(LearnerPair::normalized)
            .collect();
        assert_eq!(
            pairs,
            vec![LearnerPair {
                original: "yo comi manzana ayer.".to_string(),
                corrected: "yo comí una manzana ayer.".to_string(),
                error_type: "accent missing".to_string(),
            }]
        );
    }

    #[test]
    fn creates_processed_dir() {
        let dir = tempfile::tempdir().unwrap();
        let processed = dir.path().join("a").join("processed_text");
        let p = Preprocessor::new(dir.path().join("raw"), processed.clone(), SpaceTokenizer)
            .unwrap();
        assert!(processed.is_dir());
        assert_eq!(p.processed_path("x.txt"), processed.join("x.txt"));
        assert_eq!(p.raw_path("x.txt"), dir.path().join("raw").join("x.txt"));
    }

    #[test]
    fn tokenizer_is_injected() {
        let dir = tempfile::tempdir().unwrap();
        let p = Preprocessor::new(dir.path().into(), dir.path().into(), SpaceTokenizer).unwrap();
        assert_eq!(p.tokenize("¡hola! mundo"), vec!["¡hola!", "mundo"]);

        let p = Preprocessor::new(
            dir.path().into(),
            dir.path().into(),
            Segmenter::load(Language::Spanish),
        )
        .unwrap();
        assert_eq!(p.tokenize("¡hola! mundo"), vec!["¡", "hola", "!", "mundo"]);
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let p = Preprocessor::new(dir.path().into(), dir.path().into(), SpaceTokenizer).unwrap();
        let res = p.process_document(&dir.path().join("nope.txt"), &dir.path().join("out.txt"));
        assert!(matches!(res, Err(Error::Io(_))));
        assert!(!dir.path().join("out.txt").exists());
    }
}
