use std::path::PathBuf;

pub const DEFAULT_IDS_PATH: &str = "_data/pubmed_ids.list";
pub const DEFAULT_EXTRA_PATH: &str = "_data/biorxiv_citations.md";
pub const DEFAULT_OUT_PATH: &str = "publications.md";
pub const DEFAULT_HIGHLIGHT: &str = "Stone MR";
pub const DEFAULT_EMAIL: &str = "matthew.stone12@gmail.com";

/// Input/output locations and page-owner identity for one build.
///
/// The defaults reproduce the site layout this tool grew up in; every field
/// can be overridden from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// File listing one PubMed ID per line.
    pub ids_path: PathBuf,
    /// File of pre-formatted citation blocks to merge in.
    pub extra_path: PathBuf,
    /// Markdown page to write.
    pub out_path: PathBuf,
    /// Rendered author name to embolden, e.g. "Stone MR".
    pub highlight_author: String,
    /// Contact address sent to NCBI with every request, per their usage
    /// policy.
    pub contact_email: String,
}
