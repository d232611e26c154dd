//! Scoring Engine: combines the structured-fact comparisons and the
//! similarity signal into weighted component scores, an overall score, and
//! human-readable strengths/suggestions. A pure function of its inputs; it
//! never fails on well-formed profiles.

use serde::{Deserialize, Serialize};

use crate::analysis::job_parser::JobRequirements;
use crate::analysis::resume_parser::{total_experience_years, ResumeProfile};
use crate::analysis::similarity::semantic_similarity;
use crate::analysis::vocabulary::{SkillMatcher, Vocabulary};

/// Fixed component weights; they sum to 1.0, so the overall score is a
/// convex combination of the components and stays in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub keywords: f64,
    pub experience: f64,
    pub education: f64,
    pub semantic: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            keywords: 0.20,
            experience: 0.15,
            education: 0.10,
            semantic: 0.20,
        }
    }
}

/// Report thresholds. Components at or above `strong` produce a strength
/// line; components below `weak` produce a suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub strong: f64,
    pub weak: f64,
    /// Minimum education score once the resume shows any credential at all,
    /// so a near-miss on degree level is not zeroed out.
    pub education_floor: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            strong: 75.0,
            weak: 50.0,
            education_floor: 25.0,
        }
    }
}

/// Per-signal scores, each in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentScores {
    pub skills: f64,
    pub keywords: f64,
    pub experience: f64,
    pub education: f64,
    pub semantic: f64,
}

/// Immutable output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub component_scores: ComponentScores,
    pub matched_skills: Vec<String>,
    /// Ordered by first appearance in the job description text.
    pub missing_skills: Vec<String>,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
}

const TOP_MISSING_SKILLS: usize = 5;
const TOP_MISSING_KEYWORDS: usize = 5;
const TOP_RESPONSIBILITIES: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    pub weights: ScoreWeights,
    pub thresholds: ScoreThresholds,
}

impl Scorer {
    pub fn new(weights: ScoreWeights, thresholds: ScoreThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn score(
        &self,
        resume: &ResumeProfile,
        job: &JobRequirements,
        resume_text: &str,
        job_text: &str,
        vocab: &Vocabulary,
        matcher: &dyn SkillMatcher,
    ) -> AnalysisResult {
        let (matched_skills, missing_skills) = partition_skills(resume, job, matcher, job_text);

        let skills = ratio_score(matched_skills.len(), job.required_skills.len());
        let keywords = keyword_score(resume, job);
        let total_years = total_experience_years(&resume.experience);
        let experience = experience_score(total_years, job.min_experience_years);
        let education = self.education_score(resume, job);
        let semantic = 100.0 * semantic_similarity(resume_text, job_text, vocab);

        let component_scores = ComponentScores {
            skills: round1(skills),
            keywords: round1(keywords),
            experience: round1(experience),
            education: round1(education),
            semantic: round1(semantic),
        };
        let overall_score = round1(
            self.weights.skills * component_scores.skills
                + self.weights.keywords * component_scores.keywords
                + self.weights.experience * component_scores.experience
                + self.weights.education * component_scores.education
                + self.weights.semantic * component_scores.semantic,
        );

        let strengths = self.build_strengths(&component_scores, resume, &matched_skills, total_years);
        let missing_keywords = missing_keywords(resume, job, job_text);
        let suggestions = self.build_suggestions(
            &component_scores,
            overall_score,
            job,
            &missing_skills,
            &missing_keywords,
            total_years,
        );

        AnalysisResult {
            overall_score,
            component_scores,
            matched_skills,
            missing_skills,
            strengths,
            suggestions,
        }
    }

    fn education_score(&self, resume: &ResumeProfile, job: &JobRequirements) -> f64 {
        let Some(required) = job.required_education else {
            return 100.0;
        };
        let Some(best) = resume.education.iter().map(|e| e.level).max() else {
            return 0.0;
        };
        if best >= required {
            100.0
        } else {
            let partial = 100.0 * f64::from(best.rank()) / f64::from(required.rank());
            partial.max(self.thresholds.education_floor)
        }
    }

    fn build_strengths(
        &self,
        scores: &ComponentScores,
        resume: &ResumeProfile,
        matched_skills: &[String],
        total_years: f64,
    ) -> Vec<String> {
        let strong = self.thresholds.strong;
        let mut strengths = Vec::new();

        if scores.skills >= strong && !matched_skills.is_empty() {
            strengths.push(format!(
                "Strong technical skills match ({} skills aligned with the job requirements)",
                matched_skills.len()
            ));
        }
        if scores.keywords >= strong {
            strengths.push("Good keyword alignment with the job description".to_string());
        }
        if scores.experience >= strong && !resume.experience.is_empty() {
            strengths.push(format!(
                "Demonstrated work experience ({} positions, {:.1} years total)",
                resume.experience.len(),
                total_years
            ));
        }
        if scores.education >= strong && !resume.education.is_empty() {
            strengths.push("Educational background meets the job requirement".to_string());
        }
        if scores.semantic >= strong {
            strengths.push(
                "Strong overall alignment with the job description's language".to_string(),
            );
        }
        if strengths.is_empty() {
            strengths.push(
                "Resume shows potential, but needs more alignment with the job requirements"
                    .to_string(),
            );
        }
        strengths
    }

    fn build_suggestions(
        &self,
        scores: &ComponentScores,
        overall: f64,
        job: &JobRequirements,
        missing_skills: &[String],
        missing_keywords: &[String],
        total_years: f64,
    ) -> Vec<String> {
        let weak = self.thresholds.weak;
        let mut suggestions = Vec::new();

        if scores.skills < weak && !missing_skills.is_empty() {
            let top: Vec<&str> = missing_skills
                .iter()
                .take(TOP_MISSING_SKILLS)
                .map(String::as_str)
                .collect();
            suggestions.push(format!(
                "Add missing key skills: {}. If you have experience with these, make sure they appear in your resume.",
                top.join(", ")
            ));
        }
        if scores.keywords < weak {
            if missing_keywords.is_empty() {
                suggestions.push(
                    "Work more of the job posting's language into your resume; few of its key terms appear."
                        .to_string(),
                );
            } else {
                let top: Vec<&str> = missing_keywords
                    .iter()
                    .take(TOP_MISSING_KEYWORDS)
                    .map(String::as_str)
                    .collect();
                suggestions.push(format!(
                    "Work more of the job posting's language into your resume; key terms like {} are absent.",
                    top.join(", ")
                ));
            }
        }
        if scores.experience < weak {
            if let Some(required) = job.min_experience_years {
                suggestions.push(format!(
                    "The job asks for {required} years of experience; your resume shows {total_years:.1}. Make sure your experience section is clearly formatted with date ranges."
                ));
            }
        }
        if scores.education < weak {
            if let Some(required) = job.required_education {
                suggestions.push(format!(
                    "The job lists a {required} degree requirement; call out your highest qualification clearly."
                ));
            }
        }
        if scores.semantic < weak {
            let mut advice = String::from(
                "Improve semantic alignment: mirror phrasing from the job description and reflect its responsibilities in your bullet points.",
            );
            let duties: Vec<&str> = job
                .responsibilities
                .iter()
                .take(TOP_RESPONSIBILITIES)
                .map(String::as_str)
                .collect();
            if !duties.is_empty() {
                advice.push_str(&format!(" Speak to duties such as: {}.", duties.join("; ")));
            }
            suggestions.push(advice);
        }
        if overall < weak && suggestions.is_empty() {
            suggestions.push(
                "Overall match is low. Revise the resume to mirror the job description's skills and keywords."
                    .to_string(),
            );
        }
        suggestions
    }
}

/// Splits the job's required skills into matched and missing, using the same
/// matcher tolerance as extraction so near-synonym names count. Matched
/// skills come back sorted; missing skills keep job-description order of
/// first appearance.
fn partition_skills(
    resume: &ResumeProfile,
    job: &JobRequirements,
    matcher: &dyn SkillMatcher,
    job_text: &str,
) -> (Vec<String>, Vec<String>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for required in &job.required_skills {
        if resume.skills.iter().any(|s| matcher.matches(s, required)) {
            matched.push(required.clone());
        } else {
            missing.push(required.clone());
        }
    }
    let job_lower = job_text.to_lowercase();
    missing.sort_by_key(|skill| job_lower.find(skill.as_str()).unwrap_or(usize::MAX));
    (matched, missing)
}

/// Job keywords with no exact counterpart in the resume, ordered by first
/// appearance in the job description text like missing skills are.
fn missing_keywords(resume: &ResumeProfile, job: &JobRequirements, job_text: &str) -> Vec<String> {
    let job_lower = job_text.to_lowercase();
    let mut missing: Vec<String> = job.keywords.difference(&resume.keywords).cloned().collect();
    missing.sort_by_key(|k| job_lower.find(k.as_str()).unwrap_or(usize::MAX));
    missing
}

fn ratio_score(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 100.0; // no requirement to fail
    }
    100.0 * matched as f64 / required as f64
}

fn keyword_score(resume: &ResumeProfile, job: &JobRequirements) -> f64 {
    let overlap = job.keywords.intersection(&resume.keywords).count();
    ratio_score(overlap, job.keywords.len())
}

fn experience_score(total_years: f64, required_years: Option<f64>) -> f64 {
    match required_years {
        None => 100.0,
        Some(required) if required <= 0.0 => 100.0,
        Some(required) => 100.0 * (total_years / required).min(1.0),
    }
}

fn round1(score: f64) -> f64 {
    (score.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::analysis::resume_parser::{DegreeLevel, EducationEntry, ExperienceEntry};
    use crate::analysis::vocabulary::FuzzySkillMatcher;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn profile(skills: &[&str]) -> ResumeProfile {
        ResumeProfile {
            skills: set(skills),
            experience: Vec::new(),
            education: Vec::new(),
            keywords: BTreeSet::new(),
        }
    }

    fn job(skills: &[&str]) -> JobRequirements {
        JobRequirements {
            required_skills: set(skills),
            min_experience_years: None,
            required_education: None,
            keywords: BTreeSet::new(),
            responsibilities: Vec::new(),
        }
    }

    fn span(start: (i32, u32), end: (i32, u32)) -> ExperienceEntry {
        ExperienceEntry {
            start: NaiveDate::from_ymd_opt(start.0, start.1, 1).unwrap(),
            end: Some(NaiveDate::from_ymd_opt(end.0, end.1, 1).unwrap()),
            raw_text: String::new(),
        }
    }

    fn score(resume: &ResumeProfile, job: &JobRequirements) -> AnalysisResult {
        score_with_texts(resume, job, "resume text", "job text")
    }

    fn score_with_texts(
        resume: &ResumeProfile,
        job: &JobRequirements,
        resume_text: &str,
        job_text: &str,
    ) -> AnalysisResult {
        let vocab = Vocabulary::builtin();
        let matcher = FuzzySkillMatcher::default();
        Scorer::default().score(resume, job, resume_text, job_text, &vocab, &matcher)
    }

    #[test]
    fn test_empty_required_skills_scores_100() {
        let result = score(&profile(&[]), &job(&[]));
        assert_eq!(result.component_scores.skills, 100.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_skills_scenario_one_of_three() {
        // Resume {python, react, sql} vs job {python, docker, aws}
        let resume = profile(&["python", "react", "sql"]);
        let job = job(&["python", "docker", "aws"]);
        let result = score_with_texts(
            &resume,
            &job,
            "resume",
            "We use Docker and AWS alongside Python.",
        );
        assert_eq!(result.matched_skills, vec!["python"]);
        // Missing skills ordered by first appearance in the job text.
        assert_eq!(result.missing_skills, vec!["docker", "aws"]);
        assert_eq!(result.component_scores.skills, 33.3);
    }

    #[test]
    fn test_matched_and_missing_partition_required() {
        let resume = profile(&["python", "kubernetes"]);
        let jobreq = job(&["python", "docker", "kubernetes", "terraform"]);
        let result = score(&resume, &jobreq);
        let union: BTreeSet<String> = result
            .matched_skills
            .iter()
            .chain(result.missing_skills.iter())
            .cloned()
            .collect();
        assert_eq!(union, jobreq.required_skills);
        for skill in &result.matched_skills {
            assert!(!result.missing_skills.contains(skill));
        }
    }

    #[test]
    fn test_fuzzy_skill_names_count_as_matches() {
        let resume = profile(&["postgres sql", "kubernets"]);
        let jobreq = job(&["kubernetes"]);
        let result = score(&resume, &jobreq);
        assert_eq!(result.matched_skills, vec!["kubernetes"]);
    }

    #[test]
    fn test_experience_half_of_requirement_scores_50() {
        let mut resume = profile(&[]);
        resume.experience = vec![span((2021, 1), (2023, 6))]; // 30 months = 2.5 years
        let mut jobreq = job(&[]);
        jobreq.min_experience_years = Some(5.0);
        let result = score(&resume, &jobreq);
        assert_eq!(result.component_scores.experience, 50.0);
    }

    #[test]
    fn test_experience_exceeding_requirement_caps_at_100() {
        let mut resume = profile(&[]);
        resume.experience = vec![span((2010, 1), (2023, 1))];
        let mut jobreq = job(&[]);
        jobreq.min_experience_years = Some(3.0);
        let result = score(&resume, &jobreq);
        assert_eq!(result.component_scores.experience, 100.0);
    }

    #[test]
    fn test_no_experience_requirement_scores_100() {
        let result = score(&profile(&[]), &job(&[]));
        assert_eq!(result.component_scores.experience, 100.0);
    }

    #[test]
    fn test_education_meets_requirement() {
        let mut resume = profile(&[]);
        resume.education = vec![EducationEntry {
            level: DegreeLevel::Master,
            field: None,
            raw_text: String::new(),
        }];
        let mut jobreq = job(&[]);
        jobreq.required_education = Some(DegreeLevel::Bachelor);
        let result = score(&resume, &jobreq);
        assert_eq!(result.component_scores.education, 100.0);
    }

    #[test]
    fn test_education_near_miss_gets_partial_not_zero() {
        let mut resume = profile(&[]);
        resume.education = vec![EducationEntry {
            level: DegreeLevel::Bachelor,
            field: None,
            raw_text: String::new(),
        }];
        let mut jobreq = job(&[]);
        jobreq.required_education = Some(DegreeLevel::Doctorate);
        let result = score(&resume, &jobreq);
        assert_eq!(result.component_scores.education, 50.0); // 2/4 ranks
        assert!(result.component_scores.education > 0.0);
    }

    #[test]
    fn test_education_missing_entirely_scores_zero() {
        let mut jobreq = job(&[]);
        jobreq.required_education = Some(DegreeLevel::Bachelor);
        let result = score(&profile(&[]), &jobreq);
        assert_eq!(result.component_scores.education, 0.0);
    }

    #[test]
    fn test_identical_texts_semantic_100() {
        let text = "Senior Python engineer building data pipelines with Airflow";
        let result = score_with_texts(&profile(&[]), &job(&[]), text, text);
        assert_eq!(result.component_scores.semantic, 100.0);
    }

    #[test]
    fn test_overall_is_convex_combination_in_bounds() {
        let resume = profile(&["python"]);
        let jobreq = job(&["python", "docker"]);
        let result = score(&resume, &jobreq);
        let c = &result.component_scores;
        let w = ScoreWeights::default();
        let expected = w.skills * c.skills
            + w.keywords * c.keywords
            + w.experience * c.experience
            + w.education * c.education
            + w.semantic * c.semantic;
        assert!((result.overall_score - round1(expected)).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&result.overall_score));
    }

    #[test]
    fn test_strengths_generated_above_strong_threshold() {
        let resume = profile(&["python", "docker", "aws", "sql", "terraform"]);
        let jobreq = job(&["python", "docker", "aws", "sql", "terraform"]);
        let result = score(&resume, &jobreq);
        assert!(result
            .strengths
            .iter()
            .any(|s| s.contains("Strong technical skills match (5 skills")));
    }

    #[test]
    fn test_suggestions_name_top_missing_skills_in_jd_order() {
        let resume = profile(&[]);
        let jobreq = job(&["aws", "docker", "kafka", "kubernetes", "python", "terraform"]);
        let result = score_with_texts(
            &resume,
            &jobreq,
            "unrelated resume",
            "terraform kubernetes python kafka docker aws",
        );
        assert_eq!(
            result.missing_skills,
            vec!["terraform", "kubernetes", "python", "kafka", "docker", "aws"]
        );
        let suggestion = result
            .suggestions
            .iter()
            .find(|s| s.starts_with("Add missing key skills"))
            .expect("missing-skills suggestion present");
        assert!(suggestion.contains("terraform, kubernetes, python, kafka, docker"));
        assert!(!suggestion.contains("aws")); // capped at five
    }

    #[test]
    fn test_weak_keyword_suggestion_names_absent_terms() {
        let resume = profile(&[]);
        let mut jobreq = job(&[]);
        jobreq.keywords = set(&["batch", "pipelines", "streaming"]);
        let result = score_with_texts(
            &resume,
            &jobreq,
            "unrelated resume",
            "batch streaming pipelines",
        );
        let suggestion = result
            .suggestions
            .iter()
            .find(|s| s.contains("key terms like"))
            .expect("keyword suggestion present");
        // Ordered by first appearance in the job text.
        assert!(suggestion.contains("batch, streaming, pipelines"));
    }

    #[test]
    fn test_weak_semantic_suggestion_names_responsibilities() {
        let resume = profile(&[]);
        let mut jobreq = job(&[]);
        jobreq.responsibilities = vec![
            "Design and operate batch pipelines".to_string(),
            "Mentor junior engineers".to_string(),
        ];
        let result = score_with_texts(
            &resume,
            &jobreq,
            "watercolor painting instructor",
            "kubernetes platform engineer",
        );
        let suggestion = result
            .suggestions
            .iter()
            .find(|s| s.contains("semantic alignment"))
            .expect("semantic suggestion present");
        assert!(suggestion.contains("Design and operate batch pipelines"));
        assert!(suggestion.contains("Mentor junior engineers"));
    }

    #[test]
    fn test_fallback_strength_when_nothing_is_strong() {
        let resume = profile(&[]);
        let mut jobreq = job(&["python", "docker", "kafka"]);
        jobreq.min_experience_years = Some(10.0);
        jobreq.required_education = Some(DegreeLevel::Doctorate);
        jobreq.keywords = set(&["streaming", "pipelines"]);
        let result = score(&resume, &jobreq);
        assert_eq!(result.strengths.len(), 1);
        assert!(result.strengths[0].contains("needs more alignment"));
    }
}
