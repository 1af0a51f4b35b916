use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::pubmed::RawRecord;

/// Render the publication date the way the citation template wants it:
/// `"2020 Jan"`, or `"2020 Jan 5"` when the record carries a day.
pub fn render(record: &RawRecord) -> Result<String> {
    let (Some(year), Some(month)) = (&record.year, &record.month) else {
        return Err(Error::DateParse {
            pmid: record.pmid.clone(),
            detail: "missing Year or Month in PubDate".to_string(),
        });
    };
    Ok(match &record.day {
        Some(day) => format!("{year} {month} {day}"),
        None => format!("{year} {month}"),
    })
}

/// Comparable key for newest-first record ordering, derived from the
/// rendered date. Dates without a day sort as the first of the month.
pub fn sort_key(record: &RawRecord) -> Result<NaiveDate> {
    let rendered = render(record)?;
    let mut padded = rendered.clone();
    if padded.split_whitespace().count() == 2 {
        padded.push_str(" 1");
    }
    NaiveDate::parse_from_str(&padded, "%Y %b %d").map_err(|e| Error::DateParse {
        pmid: record.pmid.clone(),
        detail: format!("cannot parse {rendered:?}: {e}"),
    })
}
