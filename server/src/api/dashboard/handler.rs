//! Dashboard API Handlers

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};

use crate::core::ServerState;
use crate::services::dashboard::DashboardSummary;
use crate::services::report;
use crate::utils::{time, AppError, AppResult};

#[derive(serde::Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(serde::Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    /// Set when the month has no records at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/dashboard?year=&month= - monthly summary
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let data = state.dashboard.month_data(query.year, query.month).await?;
    let summary = state.dashboard.summarize(&data);

    let message = if summary.has_data {
        None
    } else {
        Some(format!(
            "No se encontraron datos para {} de {}.",
            time::month_name_es(query.month),
            query.year
        ))
    };

    Ok(Json(DashboardResponse { summary, message }))
}

/// GET /api/dashboard/export?year=&month= - xlsx report download
pub async fn export(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let data = state.dashboard.month_data(query.year, query.month).await?;

    let bytes = report::build_workbook(&data, state.config.timezone)
        .map_err(|e| AppError::Internal(format!("Failed to build report: {}", e)))?;

    let filename = report::report_filename(query.year, query.month);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .map_err(|e| AppError::Internal(format!("Invalid filename header: {}", e)))?,
    );

    tracing::info!(year = query.year, month = query.month, "report exported");
    Ok((headers, bytes))
}
