//! HTML dashboard

use axum::{extract::State, response::Html};
use infrastructure::OutputFormat;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Render the dashboard for today's window
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let report = state.build_report().await?;
    let page = state
        .templates
        .render_report(&report, state.rounding, OutputFormat::Html)?;
    Ok(Html(page))
}
