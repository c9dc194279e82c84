use axum::{Router, routing::get};
use util::state::AppState;

pub mod discord;
pub mod get;

use get::{login, login_callback};

/// `/login` and `/login-callback`.
pub fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/login-callback", get(login_callback))
}
