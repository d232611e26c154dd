use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted analysis, one row per scored resume/job pair. The list fields
/// (matched skills, strengths, suggestions) are stored as JSONB.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub filename: String,
    /// Truncated to 500 characters at insert time.
    pub job_description: String,
    pub overall_score: f64,
    pub skills_score: f64,
    pub keywords_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub semantic_score: f64,
    pub matched_skills: serde_json::Value,
    pub missing_skills: serde_json::Value,
    pub strengths: serde_json::Value,
    pub suggestions: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Compact projection for the history listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisSummaryRow {
    pub id: Uuid,
    pub filename: String,
    pub overall_score: f64,
    pub matched_skills: serde_json::Value,
    pub missing_skills: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
