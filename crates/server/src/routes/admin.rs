use axum::{extract::State, http::StatusCode};

use crate::errors::JsonApiError;
use crate::observability;
use crate::state::AppState;

#[utoipa::path(delete, path = "/admin/luggage", tag = "admin",
    responses((status = 204, description = "All records removed"), (status = 401, description = "Unauthorized"), (status = 403, description = "Admin routes disabled")))]
pub async fn clear_all(State(state): State<AppState>) -> Result<StatusCode, JsonApiError> {
    match state.luggage.clear_all().await {
        Ok(()) => {
            observability::record("clear_all", "ok");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            observability::record("clear_all", e.kind());
            Err(e.into())
        }
    }
}
