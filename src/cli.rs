use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, Config};

/// Build a year-grouped markdown publications page from PubMed records.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// File listing one PubMed ID per line
    #[arg(long, value_name = "FILE", default_value = config::DEFAULT_IDS_PATH)]
    pub ids: PathBuf,

    /// File of pre-formatted extra citation blocks
    #[arg(long, value_name = "FILE", default_value = config::DEFAULT_EXTRA_PATH)]
    pub extra: PathBuf,

    /// Markdown page to write
    #[arg(long, value_name = "FILE", default_value = config::DEFAULT_OUT_PATH)]
    pub out: PathBuf,

    /// Author name ("Last Initials") to bold in author lists
    #[arg(long, value_name = "NAME", default_value = config::DEFAULT_HIGHLIGHT)]
    pub highlight: String,

    /// Contact email sent with each efetch request
    #[arg(long, value_name = "ADDR", default_value = config::DEFAULT_EMAIL)]
    pub email: String,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            ids_path: self.ids,
            extra_path: self.extra,
            out_path: self.out,
            highlight_author: self.highlight,
            contact_email: self.email,
        }
    }
}
