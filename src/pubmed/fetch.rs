use once_cell::sync::Lazy;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pubmed::{RawRecord, xml};

/// NCBI E-utilities efetch endpoint.
const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Fetch every listed record in one synchronous whole-batch efetch call.
pub fn fetch_records(config: &Config, ids: &[String]) -> Result<Vec<RawRecord>> {
    let url = build_fetch_url(ids, &config.contact_email);
    let cfg = ureq::Agent::config_builder()
        .timeout_connect(Some(std::time::Duration::from_secs(5)))
        .timeout_global(Some(std::time::Duration::from_secs(30)))
        .build();
    let agent = ureq::Agent::new_with_config(cfg);
    let body: String = agent
        .get(url.as_str())
        .header(
            "User-Agent",
            "Mozilla/5.0 (compatible; pubpage/0.1; +https://www.ncbi.nlm.nih.gov/)",
        )
        .call()?
        .into_body()
        .read_to_string()
        .map_err(|e| Error::Fetch(format!("failed to read response body: {e}")))?;

    let records = xml::parse_records(&body)?;
    if records.is_empty() {
        return Err(Error::Fetch(format!(
            "no PubmedArticle records returned for {} ids",
            ids.len()
        )));
    }
    Ok(records)
}

fn build_fetch_url(ids: &[String], email: &str) -> Url {
    static BASE: Lazy<Url> = Lazy::new(|| Url::parse(EFETCH_URL).unwrap());

    let mut url = BASE.clone();
    url.query_pairs_mut()
        .append_pair("db", "pubmed")
        .append_pair("id", &ids.join(","))
        .append_pair("retmode", "xml")
        .append_pair("tool", "pubpage")
        .append_pair("email", email);
    url
}
