/*! # Lengua

Download, expand and normalize small Spanish/Italian text datasets.

- [download] fetches raw corpora, learner corpora and audio data into the data root,
- [names] expands a name frequency table into per (year, gender) files,
- [preprocess] normalizes and tokenizes raw documents and learner correction pairs.

Every location, url and year comes from a [config::Config].
!*/
pub mod config;
pub mod download;
pub mod error;
pub mod names;
pub mod preprocess;
