//! Message endpoint: answer one query

use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

use super::state::AppState;
use super::types::{ApiError, CreateMessageRequest};

/// `POST /messages/create/`
///
/// 200 with `{reply, category}`; a query that failed while being answered is
/// reported as a 500 carrying an `ERROR` response.
pub async fn create_message(
    State(state): State<AppState>,
    request: CreateMessageRequest,
) -> Result<impl IntoResponse, ApiError> {
    debug!(chars = request.text.chars().count(), "Received message");

    let response = state.query_service.handle(&request.text).await;

    if response.is_error() {
        return Err(ApiError::server(response.reply));
    }

    Ok(Json(response))
}
