use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::extractor::{DocumentFormat, RawDocument};
use crate::analysis::scoring::AnalysisResult;
use crate::analysis::store;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisSummaryRow};
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 10;
const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// POST /api/v1/analyze
///
/// Multipart form with a `resume` file part (PDF or DOCX) and a
/// `job_description` text part. Runs the analysis pipeline, persists the
/// result, and returns it with its id.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<(String, RawDocument)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| {
                        AppError::Validation("Resume part must include a filename".to_string())
                    })?
                    .to_string();
                let format = DocumentFormat::from_extension(&filename).ok_or_else(|| {
                    AppError::UnsupportedFormat(format!(
                        "'{filename}' is not a supported resume format; upload a PDF or DOCX"
                    ))
                })?;
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume upload: {e}"))
                })?;
                if bytes.is_empty() {
                    return Err(AppError::Validation(
                        "Uploaded resume file is empty".to_string(),
                    ));
                }
                resume = Some((filename, RawDocument { bytes, format }));
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {} // unknown parts are ignored
        }
    }

    let (filename, document) = resume
        .ok_or_else(|| AppError::Validation("Missing 'resume' file part".to_string()))?;
    let job_description = job_description.unwrap_or_default();

    tracing::info!(filename = %filename, "analyzing resume");

    // Extraction and scoring are CPU-bound; keep them off the async runtime.
    let analyzer = state.analyzer.clone();
    let jd = job_description.clone();
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(document, &jd))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task panicked: {e}")))??;

    let id = store::insert_analysis(&state.db, &filename, &job_description, &result).await?;

    tracing::info!(%id, overall_score = result.overall_score, "analysis stored");

    Ok(Json(AnalyzeResponse { id, result }))
}

/// GET /api/v1/analyses?limit=N
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<AnalysisSummaryRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let rows = store::list_recent(&state.db, limit).await?;
    Ok(Json(rows))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisRow>, AppError> {
    let row = store::get_analysis(&state.db, id).await?;
    Ok(Json(row))
}
