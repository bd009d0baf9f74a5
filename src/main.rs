//! # Lengua
//!
//! Preparation of small Spanish/Italian text datasets.
//!
//! ## Getting started
//!
//! ```sh
//! lengua 0.1.0
//! spanish/italian dataset preparation tool.
//!
//! USAGE:
//!     lengua [OPTIONS] <SUBCOMMAND>
//!
//! OPTIONS:
//!     -c, --config <config>          JSON configuration file
//!         --data-root <data-root>    data root. Overrides the configuration file value. Default is data.
//!
//! SUBCOMMANDS:
//!     download      Download raw corpora, learner corpora and audio data
//!     expand        Expand a name frequency table into per year/gender files
//!     help          Prints this message or the help of the given subcommand(s)
//!     preprocess    Normalize a raw document and a learner corpus
//!     tokenize      Tokenize a raw document, one token per line
//! ```
//!
//! Logging is configured through `RUST_LOG` (eg. `RUST_LOG=info lengua download`).
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;

use lengua::config::Config;
use lengua::download::{Downloader, FailurePolicy};
use lengua::error::Error;
use lengua::names;
use lengua::preprocess::{Preprocessor, Segmenter};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Lengua::from_args();
    debug!("cli args\n{:#?}", opt);

    let mut config = match &opt.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(data_root) = opt.data_root {
        config.set_data_root(data_root);
    }

    match opt.cmd {
        cli::Command::Download(d) => {
            let policy = if d.continue_on_error {
                FailurePolicy::Continue
            } else {
                FailurePolicy::FailFast
            };
            std::fs::create_dir_all(config.data_root())?;
            let dl = Downloader::from_config(&config);
            let results = dl.download_all(policy);

            let failures: Vec<Error> = results.into_iter().filter_map(Result::err).collect();
            if !failures.is_empty() {
                // write download errors
                let mut error_file = File::create(config.data_root().join("errors.txt"))?;
                for failure in &failures {
                    error!("Error during download:\n {:?}", failure);
                    if let Error::Download { url, dst, .. } = failure {
                        writeln!(error_file, "{}\t{}", url, dst.display())?;
                    }
                }
                return Err(Error::Custom(format!(
                    "{} download(s) failed",
                    failures.len()
                )));
            }
        }

        cli::Command::Expand(e) => {
            let src = e.src.unwrap_or_else(|| config.frequency_table());
            let dst = e.dst.unwrap_or_else(|| config.data_root().to_path_buf());
            let years: BTreeSet<i32> = if e.years.is_empty() {
                config.target_years().clone()
            } else {
                e.years.into_iter().collect()
            };
            let written = names::expand(&src, &dst, &years)?;
            info!("{} partition files written", written.len());
        }

        cli::Command::Preprocess(p) => {
            let segmenter = Segmenter::load(config.language());
            let preprocessor = Preprocessor::from_config(&config, segmenter)?;
            preprocessor.process_document(
                &preprocessor.raw_path(&p.document),
                &preprocessor.processed_path(&p.document_out),
            )?;
            preprocessor.process_learner_pairs(
                &preprocessor.raw_path(&p.pairs),
                &preprocessor.processed_path(&p.pairs_out),
            )?;
        }

        cli::Command::Tokenize(t) => {
            let mut segmenter = Segmenter::load(config.language());
            if let Some(path) = &t.abbreviations {
                segmenter = segmenter.with_abbreviations(path)?;
            }
            let preprocessor = Preprocessor::from_config(&config, segmenter)?;
            preprocessor.tokenize_document(
                &preprocessor.raw_path(&t.document),
                &preprocessor.processed_path(&t.output),
            )?;
        }
    };
    Ok(())
}
