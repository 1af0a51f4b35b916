use crate::citation::Citation;

/// Static Jekyll front matter for the generated page.
pub const FRONT_MATTER: &str = "---\n\
                                layout: page\n\
                                title: Publications\n\
                                permalink: /publications/\n\
                                ---\n";

#[derive(Debug, PartialEq, Eq)]
pub struct YearGroup {
    pub year: String,
    pub citations: Vec<Citation>,
}

/// Order citations newest year first and bucket consecutive equal years.
///
/// The sort is stable, so within a year the incoming order survives:
/// fetched citations stay newest-first, ahead of any extras appended
/// after them.
pub fn group_by_year(mut citations: Vec<Citation>) -> Vec<YearGroup> {
    citations.sort_by(|a, b| b.year.cmp(&a.year));

    let mut groups: Vec<YearGroup> = Vec::new();
    for citation in citations {
        match groups.last_mut() {
            Some(group) if group.year == citation.year => group.citations.push(citation),
            _ => groups.push(YearGroup {
                year: citation.year.clone(),
                citations: vec![citation],
            }),
        }
    }
    groups
}

/// Render the full markdown document: front matter, then one `###` header
/// per year with each citation followed by a blank line.
pub fn render_page(citations: Vec<Citation>) -> String {
    let mut out = String::from(FRONT_MATTER);
    for group in group_by_year(citations) {
        out.push_str("### ");
        out.push_str(&group.year);
        out.push('\n');
        for citation in &group.citations {
            out.push_str(&citation.body);
            out.push_str("\n\n");
        }
    }
    out
}
