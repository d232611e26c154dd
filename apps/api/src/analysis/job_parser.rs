//! Job Description Fact Extractor: mirrors the resume extractor against the
//! posting text — required skills, an experience-years threshold, an
//! education floor, responsibilities, and keywords.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::resume_parser::DegreeLevel;
use crate::analysis::sections::find_section;
use crate::analysis::tokenize::extract_keywords;
use crate::analysis::vocabulary::{detect_skills, SkillMatcher, Vocabulary};

const RESPONSIBILITY_HEADERS: &[&str] = &[
    "key responsibilities",
    "responsibilities",
    "duties",
    "what you'll do",
    "what you will do",
];

const MAX_RESPONSIBILITIES: usize = 10;

/// "5+ years of experience", "minimum of 3 years", "at least 2 years".
/// Tried in order; the first pattern that matches wins.
static YEARS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d{1,2}(?:\.\d)?)\s*\+?\s*years?\s+(?:of\s+)?(?:\w+\s+){0,2}?experience",
        r"(?i)minimum\s+(?:of\s+)?(\d{1,2})\s+years?",
        r"(?i)at\s+least\s+(\d{1,2})\s+years?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("experience regex is valid"))
    .collect()
});

static DEGREE_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(associate|bachelor|b\.\s?s(?:c)?\.?|b\.\s?a\.?|master|m\.\s?s(?:c)?\.?|m\.\s?a\.?|mba|ph\.?\s?d\.?|doctorate|doctoral)(?:'s)?\b",
    )
    .expect("degree mention regex is valid")
});

/// Structured requirements extracted from a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: BTreeSet<String>,
    pub min_experience_years: Option<f64>,
    pub required_education: Option<DegreeLevel>,
    pub keywords: BTreeSet<String>,
    pub responsibilities: Vec<String>,
}

pub fn parse_job_description(
    text: &str,
    vocab: &Vocabulary,
    matcher: &dyn SkillMatcher,
) -> JobRequirements {
    JobRequirements {
        required_skills: detect_skills(text, vocab, matcher),
        min_experience_years: extract_experience_years(text),
        required_education: extract_education_floor(text),
        keywords: extract_keywords(text, vocab),
        responsibilities: extract_responsibilities(text),
    }
}

fn extract_experience_years(text: &str) -> Option<f64> {
    for pattern in YEARS_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(years) = caps[1].parse::<f64>() {
                return Some(years);
            }
        }
    }
    None
}

/// The lowest degree level explicitly mentioned is taken as the required
/// floor: a posting that accepts "Bachelor's or Master's" requires a
/// bachelor's.
fn extract_education_floor(text: &str) -> Option<DegreeLevel> {
    DEGREE_MENTION
        .captures_iter(text)
        .filter_map(|caps| degree_level_of(&caps[1]))
        .min()
}

fn degree_level_of(keyword: &str) -> Option<DegreeLevel> {
    let k = keyword.to_lowercase().replace([' ', '.', '\''], "");
    if k.starts_with("associate") {
        Some(DegreeLevel::Associate)
    } else if k.starts_with("bachelor") || matches!(k.as_str(), "bs" | "bsc" | "ba") {
        Some(DegreeLevel::Bachelor)
    } else if k.starts_with("master") || matches!(k.as_str(), "ms" | "msc" | "ma" | "mba") {
        Some(DegreeLevel::Master)
    } else if k.starts_with("phd") || k.starts_with("doctor") {
        Some(DegreeLevel::Doctorate)
    } else {
        None
    }
}

/// Sentence-per-line segmentation under a responsibilities-style header,
/// capped to keep the output focused.
fn extract_responsibilities(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(section) = find_section(&lines, RESPONSIBILITY_HEADERS) else {
        return Vec::new();
    };

    section
        .inline
        .into_iter()
        .chain(section.lines.iter().copied())
        .flat_map(split_sentences)
        .map(|s| {
            s.trim()
                .trim_start_matches(['-', '*', '\u{2022}'])
                .trim()
                .to_string()
        })
        .filter(|s| s.len() > 10)
        .take(MAX_RESPONSIBILITIES)
        .collect()
}

fn split_sentences(line: &str) -> Vec<&str> {
    line.split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
