use crate::citation::{self, Citation};
use crate::error::{Error, Result};

/// Load hand-maintained citations from a positionally framed file.
///
/// Each block is three content lines in the usual citation shape, followed
/// by one blank separator line; the final block may omit the separator.
/// The third line is trimmed, the first two are kept verbatim so their
/// markdown line breaks survive.
pub fn parse_blocks(content: &str) -> Result<Vec<Citation>> {
    let lines: Vec<&str> = content.lines().collect();

    let mut citations = Vec::new();
    for (idx, block) in lines.chunks(4).enumerate() {
        let start_line = idx * 4 + 1;
        if block.len() < 3 {
            return Err(Error::ExtraFormat {
                line: start_line,
                reason: format!("truncated citation block ({} of 3 lines)", block.len()),
            });
        }
        if let Some(separator) = block.get(3)
            && !separator.trim().is_empty()
        {
            return Err(Error::ExtraFormat {
                line: start_line + 3,
                reason: format!("expected a blank separator line, found {separator:?}"),
            });
        }

        let body = format!("{}\n{}\n{}", block[0], block[1], block[2].trim());
        let year = citation::extract_year(&body)?;
        citations.push(Citation { year, body });
    }

    Ok(citations)
}
