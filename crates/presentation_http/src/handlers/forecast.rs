//! Forecast report endpoint

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use infrastructure::OutputFormat;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query parameters for the report endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// `json` (default), `text` or `html`
    pub format: Option<String>,
}

impl ReportQuery {
    /// Requested output format
    pub fn output_format(&self) -> Result<OutputFormat, ApiError> {
        self.format
            .as_deref()
            .map_or(Ok(OutputFormat::Json), str::parse)
            .map_err(ApiError::BadRequest)
    }
}

/// Build and render the report for today's window
#[instrument(skip(state))]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let format = query.output_format()?;
    let report = state.build_report().await?;
    let body = state.templates.render_report(&report, state.rounding, format)?;
    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}
