//! `/api/factoid` routes. Reads are public; writes go through the
//! `factoid.manage` permission gate.

use crate::auth::{FACTOID_MANAGE, PermissionGate, authorize};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod put;

use delete::delete_factoid;
use get::{get_factoid, list_factoids};
use put::update_factoid;

pub fn factoid_routes(app_state: AppState) -> Router<AppState> {
    let manage = from_fn_with_state(PermissionGate::new(app_state, FACTOID_MANAGE), authorize);

    Router::new().route("/", get(list_factoids)).route(
        "/{*name}",
        get(get_factoid).merge(
            put(update_factoid)
                .delete(delete_factoid)
                .route_layer(manage),
        ),
    )
}
