use crate::auth::Principal;
use crate::response::{ApiError, ApiResponse, api_error};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::factoid::Model as FactoidModel;
use util::state::AppState;

/// DELETE /api/factoid/{*name}
///
/// Gated by `factoid.manage`.
///
/// ### Responses
/// - `200 OK` when the factoid was removed
/// - `401 Unauthorized` from the gate
/// - `404 Not Found` when no factoid has that name
/// - `500 Internal Server Error` on database failure
pub async fn delete_factoid(
    State(app_state): State<AppState>,
    Extension(Principal(principal)): Extension<Principal>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let removed = FactoidModel::delete_by_name(app_state.db(), &name)
        .await
        .map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to delete factoid: {e}"),
            )
        })?;

    if !removed {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Factoid '{name}' not found"),
        ));
    }

    tracing::info!(factoid = %name, by = %principal, "factoid deleted");
    Ok(Json(ApiResponse::success((), "Factoid deleted successfully")))
}
