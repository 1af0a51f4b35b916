use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

pub mod date;
pub mod fetch;
pub mod xml;

/// One article's metadata as pulled from the efetch response, holding
/// exactly the fields the citation template consumes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// The record's own `MedlineCitation/PMID`, used to label this record in
    /// error messages. The citable PMID link comes from `article_ids`.
    pub pmid: String,
    pub authors: Vec<Author>,
    pub title: String,
    /// `ISOAbbreviation` of the journal, periods still in place.
    pub journal_abbrev: String,
    /// `JournalIssue/PubDate` parts, as the service spells them ("2021",
    /// "Aug", "15"). Year and month are required downstream; day is not.
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub volume: String,
    pub issue: String,
    /// `Pagination/MedlinePgn`, e.g. "583-589".
    pub pages: String,
    pub article_ids: Vec<ArticleId>,
}

/// One `AuthorList/Author` entry. Collective-name authors parse with both
/// fields `None` and are rejected when the citation is rendered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Author {
    pub last_name: Option<String>,
    pub initials: Option<String>,
}

/// Typed identifier from `PubmedData/ArticleIdList`, e.g. `doi` or `pubmed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleId {
    pub id_type: String,
    pub value: String,
}

/// Parse the identifier-list file: one PubMed ID per line, whitespace
/// trimmed, blank lines skipped. Anything else is rejected here, before it
/// can reach the network inside a comma join.
pub fn parse_id_list(content: &str) -> Result<Vec<String>> {
    static PMID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

    let mut ids = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !PMID_RE.is_match(trimmed) {
            return Err(Error::IdList {
                line: idx + 1,
                value: trimmed.to_string(),
            });
        }
        ids.push(trimmed.to_string());
    }
    Ok(ids)
}

/// Order records newest publication date first. The sort is stable, so
/// records sharing a date keep their fetch order.
pub fn sort_newest_first(records: Vec<RawRecord>) -> Result<Vec<RawRecord>> {
    let mut keyed = Vec::with_capacity(records.len());
    for record in records {
        let key = date::sort_key(&record)?;
        keyed.push((key, record));
    }
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
