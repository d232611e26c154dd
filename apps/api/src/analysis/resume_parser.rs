//! Resume Fact Extractor: turns extracted plain text into a structured
//! profile of skills, work-experience spans, education entries, and keywords.
//!
//! Extraction is best-effort throughout. A missing section or an
//! unparseable date yields an empty collection or a skipped entry, never
//! an error; the penalty shows up as a low component score downstream.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::sections::find_section;
use crate::analysis::tokenize::extract_keywords;
use crate::analysis::vocabulary::{detect_skills, SkillMatcher, Vocabulary};

const SKILLS_HEADERS: &[&str] = &[
    "technical skills",
    "core competencies",
    "skills",
    "competencies",
];

const EXPERIENCE_HEADERS: &[&str] = &[
    "professional experience",
    "work experience",
    "employment history",
    "work history",
    "experience",
    "employment",
];

/// Month/year range with "Present"/"Current" as an open end, e.g.
/// "Jan 2020 - Present", "2018 – 2021", "March 2019 to June 2022".
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b([A-Za-z]{3,9}\.?\s+\d{4}|\d{4})\s*(?:[-\u{2013}\u{2014}]|to)\s*([A-Za-z]{3,9}\.?\s+\d{4}|\d{4}|present|current)\b",
    )
    .expect("date range regex is valid")
});

/// Degree-level keywords, dotted abbreviations included. Two-letter bare
/// forms ("BS", "MA") are deliberately excluded; they collide with too many
/// ordinary words and US state names.
static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(associate(?:'s)?\s+(?:degree|of|in)|bachelor(?:'s)?s?|b\.\s?s(?:c)?\.?|b\.\s?a\.?|b\.\s?e\.?|b\.?tech|master(?:'s)?s?|m\.\s?s(?:c)?\.?|m\.\s?a\.?|m\.\s?e\.?|m\.?tech|mba|ph\.?\s?d\.?|doctorate|doctoral)\b",
    )
    .expect("degree regex is valid")
});

/// Field of study following a degree mention. "Bachelor of Science in X"
/// names the field after "in"; "Master of Business Administration" names it
/// after "of".
static FIELD_AFTER_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\s+of\s+[A-Za-z]+)?\s+in\s+([A-Za-z][A-Za-z&/ ]{2,48})")
        .expect("field regex is valid")
});

static FIELD_AFTER_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s+of\s+([A-Za-z][A-Za-z&/ ]{2,48})").expect("field regex is valid")
});

/// Ordinal ranking of credential tiers, used for threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeLevel {
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl DegreeLevel {
    pub fn rank(self) -> u8 {
        match self {
            DegreeLevel::Associate => 1,
            DegreeLevel::Bachelor => 2,
            DegreeLevel::Master => 3,
            DegreeLevel::Doctorate => 4,
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        let k = keyword.to_lowercase().replace([' ', '.'], "");
        if k.starts_with("associate") || k == "aas" {
            Some(DegreeLevel::Associate)
        } else if k.starts_with("bachelor") || matches!(k.as_str(), "bs" | "bsc" | "ba" | "be" | "btech") {
            Some(DegreeLevel::Bachelor)
        } else if k.starts_with("master")
            || matches!(k.as_str(), "ms" | "msc" | "ma" | "me" | "mtech" | "mba")
        {
            Some(DegreeLevel::Master)
        } else if k.starts_with("phd") || k.starts_with("doctor") {
            Some(DegreeLevel::Doctorate)
        } else {
            None
        }
    }
}

impl fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DegreeLevel::Associate => "associate",
            DegreeLevel::Bachelor => "bachelor's",
            DegreeLevel::Master => "master's",
            DegreeLevel::Doctorate => "doctorate",
        };
        f.write_str(name)
    }
}

/// One dated work-experience span, in document order. `end = None` means the
/// position is current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub raw_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub level: DegreeLevel,
    pub field: Option<String>,
    pub raw_text: String,
}

/// Structured facts extracted from a resume. Skills and keywords are
/// case-normalized and deduplicated; experience entries keep document order
/// and are not assumed chronologically sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub skills: BTreeSet<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub keywords: BTreeSet<String>,
}

pub fn parse_resume(text: &str, vocab: &Vocabulary, matcher: &dyn SkillMatcher) -> ResumeProfile {
    let lines: Vec<&str> = text.lines().collect();
    ResumeProfile {
        skills: extract_skills(text, &lines, vocab, matcher),
        experience: extract_experience(&lines),
        education: extract_education(&lines),
        keywords: extract_keywords(text, vocab),
    }
}

/// Vocabulary matches over the whole text, plus everything listed under a
/// "Skills" header. Section content is taken as high-confidence regardless
/// of vocabulary membership.
fn extract_skills(
    text: &str,
    lines: &[&str],
    vocab: &Vocabulary,
    matcher: &dyn SkillMatcher,
) -> BTreeSet<String> {
    let mut skills = detect_skills(text, vocab, matcher);

    if let Some(section) = find_section(lines, SKILLS_HEADERS) {
        for chunk in section.inline.into_iter().chain(section.lines.iter().copied()) {
            for item in chunk.split([',', ';', '|', '\u{2022}']) {
                let item = item
                    .trim()
                    .trim_start_matches(['-', '*', '\u{2022}'])
                    .trim();
                if (3..=40).contains(&item.len()) && !item.contains(':') {
                    skills.insert(item.to_lowercase());
                }
            }
        }
    }
    skills
}

/// Scans for date-range lines, preferring the experience section when one is
/// present. Falls back to the whole document when the section is absent or
/// yields nothing.
fn extract_experience(lines: &[&str]) -> Vec<ExperienceEntry> {
    if let Some(section) = find_section(lines, EXPERIENCE_HEADERS) {
        let entries = collect_date_ranges(&section.lines);
        if !entries.is_empty() {
            return entries;
        }
    }
    collect_date_ranges(lines)
}

fn collect_date_ranges(lines: &[&str]) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    for line in lines {
        let Some(caps) = DATE_RANGE.captures(line) else {
            continue;
        };
        let Some(start) = parse_month_year(&caps[1]) else {
            continue;
        };
        let end_raw = caps[2].to_lowercase();
        let end = if end_raw == "present" || end_raw == "current" {
            None
        } else {
            match parse_month_year(&caps[2]) {
                Some(d) if d >= start => Some(d),
                _ => continue, // reversed or unparseable range
            }
        };
        entries.push(ExperienceEntry {
            start,
            end,
            raw_text: line.trim().to_string(),
        });
    }
    entries
}

/// Parses "Jan 2020", "January 2020", or a bare "2020" (taken as January).
fn parse_month_year(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(year) = s.parse::<i32>() {
        if !plausible_year(year) {
            return None;
        }
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    let (name, year) = s.split_once(char::is_whitespace)?;
    let year: i32 = year.trim().parse().ok()?;
    if !plausible_year(year) {
        return None;
    }
    let month = match name.to_lowercase().trim_end_matches('.').get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn plausible_year(year: i32) -> bool {
    (1950..=2100).contains(&year)
}

fn extract_education(lines: &[&str]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    for line in lines {
        let Some(caps) = DEGREE.captures(line) else {
            continue;
        };
        let whole = caps.get(1).expect("degree regex has one group");
        let Some(level) = DegreeLevel::from_keyword(whole.as_str()) else {
            continue;
        };
        let rest = &line[whole.end()..];
        let field = FIELD_AFTER_IN
            .captures(rest)
            .or_else(|| FIELD_AFTER_OF.captures(rest))
            .map(|f| f[1].trim().to_string());
        entries.push(EducationEntry {
            level,
            field,
            raw_text: line.trim().to_string(),
        });
    }
    entries
}

/// Total experience in years as the union of the dated intervals: overlapping
/// ranges are counted once, never summed twice. The end month is counted
/// inclusively, so Jan 2019 through Jun 2021 is 30 months.
pub fn total_experience_years(entries: &[ExperienceEntry]) -> f64 {
    total_experience_years_at(entries, Utc::now().date_naive())
}

fn total_experience_years_at(entries: &[ExperienceEntry], today: NaiveDate) -> f64 {
    let now = month_index(today);
    let mut spans: Vec<(i32, i32)> = entries
        .iter()
        .map(|e| {
            let start = month_index(e.start);
            let end = e.end.map(month_index).unwrap_or(now).max(start);
            (start, end)
        })
        .collect();
    spans.sort_unstable();

    let mut total_months = 0;
    let mut spans = spans.into_iter();
    if let Some((mut cur_start, mut cur_end)) = spans.next() {
        for (start, end) in spans {
            if start <= cur_end {
                cur_end = cur_end.max(end);
            } else {
                total_months += cur_end - cur_start + 1;
                cur_start = start;
                cur_end = end;
            }
        }
        total_months += cur_end - cur_start + 1;
    }
    f64::from(total_months) / 12.0
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}
