//! Heuristic section-header detection over free text.
//!
//! Headers are matched against an ordered list of candidate spellings tried
//! in priority order. This is pattern matching over unstructured documents,
//! a known source of extraction noise, not a guaranteed-correct parser.

/// A located section: optional content on the header line itself
/// ("Skills: Python, SQL") plus the body lines below it.
#[derive(Debug)]
pub struct Section<'a> {
    pub inline: Option<&'a str>,
    pub lines: Vec<&'a str>,
}

/// Every section name the parsers know about. Used to terminate the body of
/// whichever section is being collected.
const KNOWN_HEADERS: &[&str] = &[
    "technical skills",
    "core competencies",
    "skills",
    "competencies",
    "professional experience",
    "work experience",
    "employment history",
    "work history",
    "experience",
    "employment",
    "education",
    "academic background",
    "key responsibilities",
    "responsibilities",
    "duties",
    "requirements",
    "qualifications",
    "projects",
    "certifications",
    "summary",
];

/// Finds the first section whose header matches one of `candidates`
/// (tried in order). The body runs until the next line that looks like a
/// header. Returns `None` when no header matches; absence of a section is
/// never an error upstream.
pub fn find_section<'a>(lines: &[&'a str], candidates: &[&str]) -> Option<Section<'a>> {
    for candidate in candidates {
        for (idx, line) in lines.iter().enumerate() {
            if let Some(inline) = match_header(line, candidate) {
                let body = lines[idx + 1..]
                    .iter()
                    .take_while(|l| !is_known_header(l) && !looks_like_header(l))
                    .copied()
                    .collect();
                return Some(Section {
                    inline,
                    lines: body,
                });
            }
        }
    }
    None
}

fn is_known_header(line: &str) -> bool {
    KNOWN_HEADERS
        .iter()
        .any(|h| match_header(line, h).is_some())
}

/// Matches a single line against one candidate header. On a match, returns
/// any content trailing the header on the same line.
fn match_header<'a>(line: &'a str, candidate: &str) -> Option<Option<&'a str>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 60 {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    if lowered == candidate || lowered == format!("{candidate}:") {
        return Some(None);
    }
    if let Some(rest) = lowered.strip_prefix(candidate) {
        if rest.starts_with(':') && trimmed.is_char_boundary(candidate.len() + 1) {
            let inline = trimmed[candidate.len() + 1..].trim();
            return Some(if inline.is_empty() { None } else { Some(inline) });
        }
    }
    None
}

/// Generic header shape: a short line that either ends with a colon or is
/// written in all capitals. List-like lines (commas) are excluded so
/// "PYTHON, SQL, AWS" inside a skills section does not end it.
pub fn looks_like_header(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 40 || trimmed.contains(',') {
        return false;
    }
    if trimmed.ends_with(':') {
        return true;
    }
    let words = trimmed.split_whitespace().count();
    words <= 4
        && trimmed.chars().any(|c| c.is_alphabetic())
        && !trimmed.chars().any(|c| c.is_lowercase() || c.is_ascii_digit())
}
