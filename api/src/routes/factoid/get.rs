use super::common::FactoidResponse;
use crate::response::{ApiError, ApiResponse, api_error};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::factoid::Model as FactoidModel;
use util::state::AppState;

/// GET /api/factoid
///
/// Lists every factoid, ordered by name. Public.
///
/// ### Responses
/// - `200 OK` with `data` as an array of factoids
/// - `500 Internal Server Error` on database failure
pub async fn list_factoids(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FactoidResponse>>>, ApiError> {
    let factoids = FactoidModel::all(app_state.db()).await.map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list factoids: {e}"),
        )
    })?;

    let data: Vec<FactoidResponse> = factoids.into_iter().map(FactoidResponse::from).collect();
    Ok(Json(ApiResponse::success(data, "Factoids retrieved successfully")))
}

/// GET /api/factoid/{*name}
///
/// Fetches one factoid. The name may contain `/`. Public.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` when no factoid has that name
/// - `500 Internal Server Error` on database failure
pub async fn get_factoid(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<FactoidResponse>>, ApiError> {
    match FactoidModel::find_by_name(app_state.db(), &name).await {
        Ok(Some(factoid)) => Ok(Json(ApiResponse::success(
            FactoidResponse::from(factoid),
            "Factoid retrieved successfully",
        ))),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Factoid '{name}' not found"),
        )),
        Err(e) => Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch factoid: {e}"),
        )),
    }
}
