use super::common::{FactoidRequest, FactoidResponse};
use crate::auth::Principal;
use crate::response::{ApiError, ApiResponse, api_error};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::factoid::Model as FactoidModel;
use util::state::AppState;
use validator::Validate;

/// PUT /api/factoid/{*name}
///
/// Creates the factoid or replaces its content.
///
/// Gated by `factoid.manage`.
///
/// ### Request Body
/// ```json
/// { "content": "Read the FAQ before asking" }
/// ```
///
/// ### Responses
/// - `200 OK` with the stored factoid
/// - `400 Bad Request` when `content` is empty
/// - `401 Unauthorized` from the gate
/// - `500 Internal Server Error` on database failure
pub async fn update_factoid(
    State(app_state): State<AppState>,
    Extension(Principal(principal)): Extension<Principal>,
    Path(name): Path<String>,
    Json(req): Json<FactoidRequest>,
) -> Result<Json<ApiResponse<FactoidResponse>>, ApiError> {
    if let Err(e) = req.validate() {
        return Err(api_error(StatusCode::BAD_REQUEST, format_validation_errors(&e)));
    }

    let factoid = FactoidModel::upsert(app_state.db(), &name, &req.content)
        .await
        .map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save factoid: {e}"),
            )
        })?;

    tracing::info!(factoid = %name, by = %principal, "factoid saved");
    Ok(Json(ApiResponse::success(
        FactoidResponse::from(factoid),
        "Factoid saved successfully",
    )))
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>()
        .join("; ")
}
