use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a page build.
///
/// The tool is a one-shot batch job with no partial-success mode, so every
/// variant is fatal and names the offending record, line, or input precisely
/// enough to fix the source data.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to E-utilities.
    #[error("efetch request failed: {0}")]
    Http(#[from] ureq::Error),

    /// The service answered, but the payload is unusable: an `ERROR`
    /// element, an empty record set, or a structurally incomplete record.
    #[error("efetch response rejected: {0}")]
    Fetch(String),

    /// The response body is not parseable XML.
    #[error("malformed efetch XML: {0}")]
    Xml(String),

    /// A non-blank line of the identifier list is not a PubMed ID.
    #[error("identifier list line {line}: {value:?} is not a PubMed ID")]
    IdList { line: usize, value: String },

    /// A record lacks the DOI or PMID entry the citation template needs.
    #[error("record {pmid} has no {id_type} identifier")]
    MissingIdentifier { pmid: String, id_type: &'static str },

    /// A record's publication date is absent or in an unrecognized shape.
    #[error("record {pmid}: unusable publication date: {detail}")]
    DateParse { pmid: String, detail: String },

    /// A citation body does not carry the `_Journal_. Year ...` second line
    /// that year extraction relies on.
    #[error("no publication year found in citation starting {head:?}")]
    YearExtraction { head: String },

    /// The extra-citations file breaks its four-line block framing.
    #[error("extra citations line {line}: {reason}")]
    ExtraFormat { line: usize, reason: String },
}
