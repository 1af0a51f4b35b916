use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::{Error, Result};
use crate::pubmed::{ArticleId, Author, RawRecord};

/// Text slot the parser is currently filling, if any.
///
/// A capture survives inline markup: `<i>`, `<sub>` and friends inside an
/// `ArticleTitle` neither reset the buffer nor end the capture, so mixed
/// content comes out as one string.
#[derive(Clone, Copy, PartialEq)]
enum Capture {
    None,
    Pmid,
    Title,
    IsoAbbrev,
    Volume,
    Issue,
    Pages,
    Year,
    Month,
    Day,
    LastName,
    Initials,
    ArticleId,
    ServiceError,
}

/// Parse an efetch response into records, in document order.
///
/// Guards keep PubMed's decoy elements out of the wrong slots: `Year`/
/// `Month`/`Day` also appear under `DateCompleted`, `DateRevised`,
/// `ArticleDate` and `History`, `ArticleId` under each `Reference`, and a
/// second `PMID` under `CommentsCorrections`.
pub fn parse_records(xml: &str) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_str(xml);

    let mut records = Vec::new();
    let mut record = RawRecord::default();
    let mut capture = Capture::None;
    let mut cur_text = String::new();
    let mut pending_id_type: Option<String> = None;

    let mut in_pub_date = false;
    let mut in_author_list = false;
    let mut in_author = false;
    let mut in_article_id_list = false;
    let mut in_reference_list = false;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"PubmedArticle" => {
                    record = RawRecord::default();
                    capture = Capture::None;
                    cur_text.clear();
                    in_pub_date = false;
                    in_author_list = false;
                    in_author = false;
                    in_article_id_list = false;
                    in_reference_list = false;
                }
                b"PMID" if record.pmid.is_empty() => {
                    capture = Capture::Pmid;
                    cur_text.clear();
                }
                b"ArticleTitle" => {
                    capture = Capture::Title;
                    cur_text.clear();
                }
                b"ISOAbbreviation" => {
                    capture = Capture::IsoAbbrev;
                    cur_text.clear();
                }
                b"Volume" => {
                    capture = Capture::Volume;
                    cur_text.clear();
                }
                b"Issue" => {
                    capture = Capture::Issue;
                    cur_text.clear();
                }
                b"MedlinePgn" => {
                    capture = Capture::Pages;
                    cur_text.clear();
                }
                b"PubDate" => in_pub_date = true,
                b"Year" if in_pub_date => {
                    capture = Capture::Year;
                    cur_text.clear();
                }
                b"Month" if in_pub_date => {
                    capture = Capture::Month;
                    cur_text.clear();
                }
                b"Day" if in_pub_date => {
                    capture = Capture::Day;
                    cur_text.clear();
                }
                b"AuthorList" => in_author_list = true,
                b"Author" if in_author_list => {
                    record.authors.push(Author::default());
                    in_author = true;
                }
                b"LastName" if in_author => {
                    capture = Capture::LastName;
                    cur_text.clear();
                }
                b"Initials" if in_author => {
                    capture = Capture::Initials;
                    cur_text.clear();
                }
                b"ReferenceList" => in_reference_list = true,
                b"ArticleIdList" if !in_reference_list => in_article_id_list = true,
                b"ArticleId" if in_article_id_list && !in_reference_list => {
                    pending_id_type = get_attr_value(&e, b"IdType");
                    capture = Capture::ArticleId;
                    cur_text.clear();
                }
                b"ERROR" => {
                    capture = Capture::ServiceError;
                    cur_text.clear();
                }
                _ => {}
            },
            Ok(Event::End(e)) => match (capture, e.name().as_ref()) {
                (Capture::Pmid, b"PMID") => {
                    let text = take_trimmed(&mut cur_text);
                    if record.pmid.is_empty() {
                        record.pmid = text;
                    }
                    capture = Capture::None;
                }
                (Capture::Title, b"ArticleTitle") => {
                    record.title = normalize_ws(&cur_text);
                    cur_text.clear();
                    capture = Capture::None;
                }
                (Capture::IsoAbbrev, b"ISOAbbreviation") => {
                    record.journal_abbrev = take_trimmed(&mut cur_text);
                    capture = Capture::None;
                }
                (Capture::Volume, b"Volume") => {
                    record.volume = take_trimmed(&mut cur_text);
                    capture = Capture::None;
                }
                (Capture::Issue, b"Issue") => {
                    record.issue = take_trimmed(&mut cur_text);
                    capture = Capture::None;
                }
                (Capture::Pages, b"MedlinePgn") => {
                    record.pages = take_trimmed(&mut cur_text);
                    capture = Capture::None;
                }
                (Capture::Year, b"Year") => {
                    record.year = Some(take_trimmed(&mut cur_text));
                    capture = Capture::None;
                }
                (Capture::Month, b"Month") => {
                    record.month = Some(take_trimmed(&mut cur_text));
                    capture = Capture::None;
                }
                (Capture::Day, b"Day") => {
                    record.day = Some(take_trimmed(&mut cur_text));
                    capture = Capture::None;
                }
                (Capture::LastName, b"LastName") => {
                    if let Some(author) = record.authors.last_mut() {
                        author.last_name = Some(take_trimmed(&mut cur_text));
                    }
                    capture = Capture::None;
                }
                (Capture::Initials, b"Initials") => {
                    if let Some(author) = record.authors.last_mut() {
                        author.initials = Some(take_trimmed(&mut cur_text));
                    }
                    capture = Capture::None;
                }
                (Capture::ArticleId, b"ArticleId") => {
                    record.article_ids.push(ArticleId {
                        id_type: pending_id_type.take().unwrap_or_default(),
                        value: take_trimmed(&mut cur_text),
                    });
                    capture = Capture::None;
                }
                (Capture::ServiceError, b"ERROR") => {
                    return Err(Error::Fetch(format!(
                        "service error: {}",
                        take_trimmed(&mut cur_text)
                    )));
                }
                (_, b"PubmedArticle") => {
                    records.push(finish_record(std::mem::take(&mut record))?);
                }
                (_, b"PubDate") => in_pub_date = false,
                (_, b"AuthorList") => in_author_list = false,
                (_, b"Author") => in_author = false,
                (_, b"ArticleIdList") => in_article_id_list = false,
                (_, b"ReferenceList") => in_reference_list = false,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if capture != Capture::None {
                    let text = t
                        .decode()
                        .map_err(|e| Error::Xml(format!("text decode: {e}")))?;
                    cur_text.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if capture != Capture::None {
                    cur_text.push_str(&String::from_utf8_lossy(t.as_ref()));
                }
            }
            Ok(Event::GeneralRef(r)) => {
                if capture != Capture::None {
                    push_entity(&mut cur_text, &r)?;
                }
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"ERROR" {
                    return Err(Error::Fetch("service error with no detail".to_string()));
                }
            }
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

/// Reject records missing a field the citation template cannot do without.
/// Author completeness is checked later, when the citation is rendered.
fn finish_record(record: RawRecord) -> Result<RawRecord> {
    let missing = if record.pmid.is_empty() {
        Some("PMID")
    } else if record.title.is_empty() {
        Some("ArticleTitle")
    } else if record.journal_abbrev.is_empty() {
        Some("ISOAbbreviation")
    } else if record.volume.is_empty() {
        Some("Volume")
    } else if record.issue.is_empty() {
        Some("Issue")
    } else if record.pages.is_empty() {
        Some("MedlinePgn")
    } else {
        None
    };
    match missing {
        Some(element) => {
            let label = if record.pmid.is_empty() {
                "<no PMID>"
            } else {
                record.pmid.as_str()
            };
            Err(Error::Fetch(format!("record {label}: missing {element}")))
        }
        None => Ok(record),
    }
}

fn get_attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .map(|a| String::from_utf8_lossy(a.value.as_ref()).to_string())
}

/// Resolve a general entity reference the reader surfaced as its own event.
/// Unknown entities are kept visible rather than dropped.
fn push_entity(out: &mut String, reference: &BytesRef<'_>) -> Result<()> {
    if let Some(decoded) = reference
        .resolve_char_ref()
        .map_err(|e| Error::Xml(format!("character reference: {e}")))?
    {
        out.push(decoded);
        return Ok(());
    }
    let name = reference
        .decode()
        .map_err(|e| Error::Xml(format!("entity reference: {e}")))?;
    match resolve_predefined_entity(&name) {
        Some(text) => out.push_str(text),
        None => {
            out.push('&');
            out.push_str(&name);
            out.push(';');
        }
    }
    Ok(())
}

fn take_trimmed(buf: &mut String) -> String {
    let out = buf.trim().to_string();
    buf.clear();
    out
}

fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
