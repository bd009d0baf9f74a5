/*! Language-aware tokenization.

Tokens are built on top of Unicode word boundaries (UAX#29):
whitespace is dropped and punctuation marks become standalone tokens.
Some language-specific rules are then applied:

- known abbreviations keep their trailing dot (`Sr.`, `etc.`),
- runs of dots are kept together (`...`),
- in Italian, elided articles and prepositions are split from the following word (`l'amico` -> `l'`, `amico`).
!*/
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Error;

lazy_static! {
    static ref ES_ABBREVIATIONS: HashSet<&'static str> = [
        "sr", "sra", "srta", "dr", "dra", "lic", "ing", "prof", "etc", "ej", "pág", "núm", "av",
        "ud", "uds", "vd", "vds", "aprox", "tel",
    ]
    .into_iter()
    .collect();
    static ref IT_ABBREVIATIONS: HashSet<&'static str> = [
        "sig", "sigg", "sig.ra", "dott", "dr", "prof", "ing", "avv", "ecc", "pag", "es", "tel",
        "geom", "rag",
    ]
    .into_iter()
    .collect();
    static ref IT_ELISIONS: HashSet<&'static str> = [
        "l", "un", "dell", "all", "dall", "nell", "sull", "coll", "pell", "quest", "quell", "bell",
        "sant", "c", "d", "m", "t", "s", "v", "n",
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Spanish,
    Italian,
}

/// Text to ordered tokens.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Rule based segmenter.
///
/// Built once with [Segmenter::load] and passed around by the caller.
#[derive(Debug, Clone)]
pub struct Segmenter {
    language: Language,
    abbreviations: HashSet<String>,
}

impl Segmenter {
    /// Build a segmenter with the built-in rules for `language`.
    pub fn load(language: Language) -> Self {
        let builtin: &HashSet<&str> = match language {
            Language::Spanish => &*ES_ABBREVIATIONS,
            Language::Italian => &*IT_ABBREVIATIONS,
        };
        debug!(
            "loading {:?} segmenter ({} abbreviations)",
            language,
            builtin.len()
        );
        Self {
            language,
            abbreviations: builtin.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Extend known abbreviations with the ones in `path` (one per line, trailing dot optional).
    pub fn with_abbreviations(mut self, path: &Path) -> Result<Self, Error> {
        let f = BufReader::new(File::open(path)?);
        let mut nb_added = 0;
        for line in f.lines() {
            let line = line?;
            let abbr = line.trim().trim_end_matches('.').to_lowercase();
            if !abbr.is_empty() && self.abbreviations.insert(abbr) {
                nb_added += 1;
            }
        }
        debug!("added {} abbreviations from {:?}", nb_added, path);
        Ok(self)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn is_abbreviation(&self, token: &str) -> bool {
        self.abbreviations.contains(&token.to_lowercase())
    }

    /// splits `l'amico` into `l'` and `amico` when the elided part is known.
    fn split_elision<'a>(&self, word: &'a str) -> Option<(&'a str, &'a str)> {
        if self.language != Language::Italian {
            return None;
        }
        let idx = word.find(|c: char| c == '\'' || c == '’')?;
        let apostrophe_len = word[idx..].chars().next()?.len_utf8();
        let (head, tail) = word.split_at(idx + apostrophe_len);
        if tail.is_empty() || !IT_ELISIONS.contains(word[..idx].to_lowercase().as_str()) {
            return None;
        }
        Some((head, tail))
    }
}

impl Tokenize for Segmenter {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        // whether the last token directly precedes the current piece
        let mut adjacent = false;

        for piece in text.split_word_bounds() {
            if piece.chars().all(char::is_whitespace) {
                adjacent = false;
                continue;
            }

            if piece == "." && adjacent {
                if let Some(last) = tokens.last_mut() {
                    if last.chars().all(|c| c == '.') || self.is_abbreviation(last) {
                        last.push('.');
                        continue;
                    }
                }
            }

            let mut rest = piece;
            while let Some((head, tail)) = self.split_elision(rest) {
                tokens.push(head.to_string());
                rest = tail;
            }
            tokens.push(rest.to_string());
            adjacent = true;
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn es(text: &str) -> Vec<String> {
        Segmenter::load(Language::Spanish).tokenize(text)
    }

    fn it(text: &str) -> Vec<String> {
        Segmenter::load(Language::Italian).tokenize(text)
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            es("¡Hola! ¿Cómo estás?"),
            vec!["¡", "Hola", "!", "¿", "Cómo", "estás", "?"]
        );
    }

    #[test]
    fn empty() {
        assert!(es("").is_empty());
        assert!(es("  \n\t").is_empty());
    }

    #[test]
    fn abbreviations_and_ellipsis() {
        assert_eq!(
            es("El Sr. García llegó..."),
            vec!["El", "Sr.", "García", "llegó", "..."]
        );
        assert_eq!(
            es("manzanas, peras, etc."),
            vec!["manzanas", ",", "peras", ",", "etc."]
        );
        // not glued when separated by a space
        assert_eq!(es("Sr ."), vec!["Sr", "."]);
        assert_eq!(es("Fin."), vec!["Fin", "."]);
    }

    #[test]
    fn numbers() {
        assert_eq!(es("Pesa 3,5 kg."), vec!["Pesa", "3,5", "kg", "."]);
    }

    #[test]
    fn italian_elisions() {
        assert_eq!(
            it("L'amico dell'uomo è qui."),
            vec!["L'", "amico", "dell'", "uomo", "è", "qui", "."]
        );
        assert_eq!(it("un’altra"), vec!["un’", "altra"]);
        // spanish keeps the word whole
        assert_eq!(es("l'amico"), vec!["l'amico"]);
    }

    #[test]
    fn order_preserved() {
        let text = "uno dos tres cuatro";
        assert_eq!(es(text), vec!["uno", "dos", "tres", "cuatro"]);
    }

    #[test]
    fn extra_abbreviations() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "Gral.").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "cía").unwrap();

        let s = Segmenter::load(Language::Spanish)
            .with_abbreviations(f.path())
            .unwrap();
        assert_eq!(
            s.tokenize("El Gral. Pérez y Cía."),
            vec!["El", "Gral.", "Pérez", "y", "Cía."]
        );
    }
}
