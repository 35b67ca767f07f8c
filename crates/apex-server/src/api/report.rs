use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use apex_core::ReportRequest;

use super::{AppState, PipelineError, ValidationError};

/// POST /generate-pdf: validate the payload, resolve competitor images,
/// render the report document, and export it through the PDF engine.
pub async fn generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "rejected report payload");
            return ValidationError {
                error: rejection.body_text(),
            }
            .into_response();
        }
    };

    // Renders queue here in arrival order until a permit frees up.
    let _permit = match state.render_permits.clone().acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            return PipelineError {
                error: "report service is shutting down".to_owned(),
                details: "render queue closed".to_owned(),
            }
            .into_response();
        }
    };

    let started = std::time::Instant::now();
    let resolved = state.resolver.resolve_competitors(&request.competitor_data).await;
    tracing::debug!(
        competitors = resolved.len(),
        elapsed = ?started.elapsed(),
        "competitor images resolved"
    );

    let html = apex_render::render_report(
        &request.final_report,
        &request.client_info,
        &resolved,
        &request.client_url,
    );

    match state.engine.render(&html).await {
        Ok(pdf) => {
            tracing::info!(
                bytes = pdf.len(),
                elapsed = ?started.elapsed(),
                client_url = %request.client_url,
                "report exported"
            );
            pdf_response(pdf)
        }
        Err(e) => {
            tracing::error!(error = %e, client_url = %request.client_url, "pdf export failed");
            PipelineError {
                error: "failed to generate report PDF".to_owned(),
                details: e.to_string(),
            }
            .into_response()
        }
    }
}

fn pdf_response(pdf: Vec<u8>) -> Response {
    let filename = format!("apex-report-{}.pdf", Utc::now().format("%Y-%m-%d"));
    let disposition = format!("attachment; filename=\"{filename}\"");
    let mut response = (StatusCode::OK, pdf).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
