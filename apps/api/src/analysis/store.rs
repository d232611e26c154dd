//! Persistence for analysis results.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE analyses (
//!     id UUID PRIMARY KEY,
//!     filename TEXT NOT NULL,
//!     job_description TEXT NOT NULL,
//!     overall_score DOUBLE PRECISION NOT NULL,
//!     skills_score DOUBLE PRECISION NOT NULL,
//!     keywords_score DOUBLE PRECISION NOT NULL,
//!     experience_score DOUBLE PRECISION NOT NULL,
//!     education_score DOUBLE PRECISION NOT NULL,
//!     semantic_score DOUBLE PRECISION NOT NULL,
//!     matched_skills JSONB NOT NULL,
//!     missing_skills JSONB NOT NULL,
//!     strengths JSONB NOT NULL,
//!     suggestions JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::scoring::AnalysisResult;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisSummaryRow};

/// Stored job descriptions are truncated; the full text is only needed for
/// scoring, which has already happened.
const STORED_JOB_DESCRIPTION_CHARS: usize = 500;

pub async fn insert_analysis(
    pool: &PgPool,
    filename: &str,
    job_description: &str,
    result: &AnalysisResult,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    let stored_jd: String = job_description
        .chars()
        .take(STORED_JOB_DESCRIPTION_CHARS)
        .collect();

    sqlx::query(
        r#"
        INSERT INTO analyses (
            id, filename, job_description,
            overall_score, skills_score, keywords_score,
            experience_score, education_score, semantic_score,
            matched_skills, missing_skills, strengths, suggestions
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(id)
    .bind(filename)
    .bind(stored_jd)
    .bind(result.overall_score)
    .bind(result.component_scores.skills)
    .bind(result.component_scores.keywords)
    .bind(result.component_scores.experience)
    .bind(result.component_scores.education)
    .bind(result.component_scores.semantic)
    .bind(json!(result.matched_skills))
    .bind(json!(result.missing_skills))
    .bind(json!(result.strengths))
    .bind(json!(result.suggestions))
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<AnalysisSummaryRow>, AppError> {
    let rows = sqlx::query_as::<_, AnalysisSummaryRow>(
        r#"
        SELECT id, filename, overall_score, matched_skills, missing_skills, created_at
        FROM analyses
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_analysis(pool: &PgPool, id: Uuid) -> Result<AnalysisRow, AppError> {
    let row = sqlx::query_as::<_, AnalysisRow>(
        r#"
        SELECT id, filename, job_description,
               overall_score, skills_score, keywords_score,
               experience_score, education_score, semantic_score,
               matched_skills, missing_skills, strengths, suggestions,
               created_at
        FROM analyses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| AppError::NotFound(format!("Analysis '{id}' not found")))
}
