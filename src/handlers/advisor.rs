use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use std::time::Instant;
use crate::error::AdvisorError;
use crate::metrics::{REQUEST_TOTAL, UPSTREAM_LATENCY};
use crate::models::{AdviceRequest, AdviceResponse};
use crate::prompt::build_completion_request;
use crate::state::AppState;

pub async fn advisor_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AdviceRequest>, JsonRejection>,
) -> Result<Json<AdviceResponse>, AdvisorError> {
    REQUEST_TOTAL.inc();

    // an unreadable body is treated like an empty one
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable advice body");
            AdviceRequest::default()
        }
    };

    let call = build_completion_request(&state.model, &request)?;

    let start_time = Instant::now();
    let result = state.completion.complete(&call).await;
    let elapsed = start_time.elapsed();
    UPSTREAM_LATENCY.observe(elapsed.as_secs_f64());
    tracing::debug!(?elapsed, ok = result.is_ok(), "completion call finished");

    let completion = result?;
    let answer = completion
        .first_content()
        .ok_or(AdvisorError::EmptyUpstream)?;

    Ok(Json(AdviceResponse {
        answer: answer.to_string(),
    }))
}
