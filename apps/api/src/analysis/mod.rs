//! Resume-versus-job analysis pipeline: text extraction, fact extraction on
//! both sides, similarity, and scoring.

pub mod extractor;
pub mod handlers;
pub mod job_parser;
pub mod resume_parser;
pub mod scoring;
pub mod sections;
pub mod similarity;
pub mod store;
pub mod tokenize;
pub mod vocabulary;

use std::sync::Arc;

use crate::analysis::extractor::{extract_text, RawDocument};
use crate::analysis::job_parser::parse_job_description;
use crate::analysis::resume_parser::parse_resume;
use crate::analysis::scoring::{AnalysisResult, Scorer};
use crate::analysis::vocabulary::{SkillMatcher, Vocabulary};
use crate::errors::AppError;

/// The analysis engine. Built once at startup and shared across requests;
/// all of its state is read-only.
pub struct Analyzer {
    vocabulary: Arc<Vocabulary>,
    matcher: Arc<dyn SkillMatcher>,
    scorer: Scorer,
}

impl Analyzer {
    pub fn new(vocabulary: Arc<Vocabulary>, matcher: Arc<dyn SkillMatcher>, scorer: Scorer) -> Self {
        Self {
            vocabulary,
            matcher,
            scorer,
        }
    }

    /// Runs the full pipeline for one resume/job pair. CPU-bound; callers in
    /// async context should wrap this in `spawn_blocking`.
    pub fn analyze(&self, resume: RawDocument, job_text: &str) -> Result<AnalysisResult, AppError> {
        if job_text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let resume_text = extract_text(&resume)?;
        let profile = parse_resume(&resume_text, &self.vocabulary, self.matcher.as_ref());
        let requirements =
            parse_job_description(job_text, &self.vocabulary, self.matcher.as_ref());

        tracing::debug!(
            skills = profile.skills.len(),
            experience_entries = profile.experience.len(),
            required_skills = requirements.required_skills.len(),
            "parsed resume and job description"
        );

        Ok(self.scorer.score(
            &profile,
            &requirements,
            &resume_text,
            job_text,
            &self.vocabulary,
            self.matcher.as_ref(),
        ))
    }
}
