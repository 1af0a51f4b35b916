use crate::citation::Citation;
use crate::error::{Error, Result};
use crate::pubmed::{RawRecord, date};

/// Render one record as a three-line markdown citation.
///
/// Line 1: authors and title. Line 2: italicised journal, date and issue.
/// Line 3: PMID and DOI links. The first two lines end in two spaces to
/// force a markdown line break.
pub fn format_record(record: &RawRecord, highlight: &str) -> Result<Citation> {
    let Some(year) = record.year.clone() else {
        return Err(Error::DateParse {
            pmid: record.pmid.clone(),
            detail: "missing Year in PubDate".to_string(),
        });
    };

    let authors = render_authors(record, highlight)?;
    let title = title_case(&record.title);
    let journal = record.journal_abbrev.replace('.', "");
    let date = date::render(record)?;
    let issue = format!("{}({}):{}", record.volume, record.issue, record.pages);
    let pmid = last_id(record, "pubmed").ok_or_else(|| Error::MissingIdentifier {
        pmid: record.pmid.clone(),
        id_type: "pubmed",
    })?;
    let doi = last_id(record, "doi").ok_or_else(|| Error::MissingIdentifier {
        pmid: record.pmid.clone(),
        id_type: "doi",
    })?;

    let body = format!(
        "{authors}. {title}.  \n\
         _{journal}_. {date};{issue}.  \n\
         PMID: [{pmid}](https://www.ncbi.nlm.nih.gov/pubmed/{pmid}). \
         DOI: [{doi}](https://doi.org/{doi})."
    );

    Ok(Citation { year, body })
}

fn render_authors(record: &RawRecord, highlight: &str) -> Result<String> {
    let mut rendered = Vec::with_capacity(record.authors.len());
    for (idx, author) in record.authors.iter().enumerate() {
        let (Some(last), Some(initials)) = (&author.last_name, &author.initials) else {
            return Err(Error::Fetch(format!(
                "record {}: author {} lacks LastName or Initials",
                record.pmid,
                idx + 1
            )));
        };
        let name = format!("{last} {initials}");
        if name == highlight {
            rendered.push(format!("**{name}**"));
        } else {
            rendered.push(name);
        }
    }
    Ok(rendered.join(", "))
}

/// When a record carries several identifiers of one type the last one wins.
fn last_id<'a>(record: &'a RawRecord, id_type: &str) -> Option<&'a str> {
    record
        .article_ids
        .iter()
        .rfind(|id| id.id_type == id_type)
        .map(|id| id.value.as_str())
}

/// Sentence-case a title, then join the last two words with a no-break
/// space so the final word never wraps alone.
fn title_case(title: &str) -> String {
    let cleaned = title.replace('\u{a0}', " ");
    let cleaned = cleaned.trim_end_matches('.');
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    let mut out = String::with_capacity(cleaned.len());
    for (idx, word) in words.iter().enumerate() {
        // all-caps words (gene names, acronyms) stay as-is
        let cased = if is_all_upper(word) {
            (*word).to_string()
        } else if idx == 0 {
            capitalize(word)
        } else {
            word.to_lowercase()
        };
        if idx == 0 {
            out.push_str(&cased);
        } else if idx == words.len() - 1 {
            out.push('\u{a0}');
            out.push_str(&cased);
        } else {
            out.push(' ');
            out.push_str(&cased);
        }
    }
    out
}

fn is_all_upper(word: &str) -> bool {
    let mut has_upper = false;
    for ch in word.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
