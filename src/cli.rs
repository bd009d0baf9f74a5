//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "lengua", about = "spanish/italian dataset preparation tool.")]
pub struct Lengua {
    #[structopt(
        parse(from_os_str),
        long = "data-root",
        help = "data root. Overrides the configuration file value. Default is data."
    )]
    pub data_root: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "config",
        short = "c",
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
/// Holds every command that is callable by the `lengua` command.
pub enum Command {
    #[structopt(about = "Download raw corpora, learner corpora and audio data")]
    Download(Download),
    #[structopt(about = "Expand a name frequency table into per year/gender files")]
    Expand(Expand),
    #[structopt(about = "Normalize a raw document and a learner corpus")]
    Preprocess(Preprocess),
    #[structopt(about = "Tokenize a raw document, one token per line")]
    Tokenize(Tokenize),
}

#[derive(Debug, StructOpt)]
/// Download command and parameters.
/// ```sh
/// lengua-download 0.1.0
/// Download raw corpora, learner corpora and audio data
///
/// USAGE:
///     lengua download [FLAGS]
///
/// FLAGS:
///     -k, --continue-on-error    keep downloading remaining resources after a failure
/// ```
pub struct Download {
    #[structopt(
        short = "k",
        long = "continue-on-error",
        help = "keep downloading remaining resources after a failure"
    )]
    pub continue_on_error: bool,
}

#[derive(Debug, StructOpt)]
pub struct Expand {
    #[structopt(
        parse(from_os_str),
        long = "src",
        help = "frequency table. Default is <data-root>/original.csv"
    )]
    pub src: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "dst",
        help = "destination folder. Default is <data-root>"
    )]
    pub dst: Option<PathBuf>,
    #[structopt(
        long = "year",
        short = "y",
        help = "target year (repeatable). Overrides configured years."
    )]
    pub years: Vec<i32>,
}

#[derive(Debug, StructOpt)]
pub struct Preprocess {
    #[structopt(
        long = "document",
        help = "raw document, in raw_text",
        default_value = "wikipedia.txt"
    )]
    pub document: String,
    #[structopt(
        long = "document-out",
        help = "processed document, in processed_text",
        default_value = "processed_wikipedia.txt"
    )]
    pub document_out: String,
    #[structopt(
        long = "pairs",
        help = "learner corpus csv, in raw_text",
        default_value = "learner_corpus.csv"
    )]
    pub pairs: String,
    #[structopt(
        long = "pairs-out",
        help = "processed learner corpus, in processed_text",
        default_value = "processed_learner_corpus.json"
    )]
    pub pairs_out: String,
}

#[derive(Debug, StructOpt)]
pub struct Tokenize {
    #[structopt(help = "raw document, in raw_text")]
    pub document: String,
    #[structopt(help = "token file, in processed_text")]
    pub output: String,
    #[structopt(
        parse(from_os_str),
        long = "abbreviations",
        help = "additional abbreviations, one per line"
    )]
    pub abbreviations: Option<PathBuf>,
}
