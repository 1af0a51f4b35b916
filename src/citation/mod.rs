use crate::error::{Error, Result};

pub mod format;

/// One formatted citation, ready to be grouped and written.
///
/// `body` is the three-line markdown block; `year` is kept alongside so
/// grouping never has to re-parse the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub year: String,
    pub body: String,
}

/// Pull the publication year out of a citation body.
///
/// The year is the first whitespace-delimited token after the `"_. "` that
/// closes the italicised journal name on the second line. Periods are
/// stripped from journal abbreviations at format time, so a well-formed
/// body contains that delimiter exactly once.
pub fn extract_year(body: &str) -> Result<String> {
    body.lines()
        .nth(1)
        .and_then(|line| line.split_once("_. "))
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .map(str::to_string)
        .ok_or_else(|| Error::YearExtraction {
            head: head_of(body),
        })
}

fn head_of(body: &str) -> String {
    body.lines().next().unwrap_or("").chars().take(60).collect()
}
