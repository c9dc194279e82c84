//! Route table for the panel.
//!
//! - `/api/factoid` → factoid listing and CRUD (writes gated by `factoid.manage`)
//! - `/login`, `/login-callback` → Discord OAuth2 login
//! - `/css`, `/fonts`, `/img`, `/js`, `/favicon.*` → static assets from the web root
//! - anything else, including a known path with an unsupported method →
//!   [`fallback::FallbackResolver`]

use crate::auth::middleware::log_request;
use axum::{Router, extract::Request, middleware::from_fn_with_state};
use std::path::PathBuf;
use util::{config::AppConfig, paths::resolve_root, state::AppState};

pub mod assets;
pub mod factoid;
pub mod fallback;
pub mod login;

use assets::asset_routes;
use factoid::factoid_routes;
use fallback::FallbackResolver;
use login::login_routes;

/// Where the built frontend lives and which paths must never fall back to it.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub root: PathBuf,
    /// Unmatched paths with one of these prefixes get a 404 instead of the SPA shell.
    pub no_fallback_prefixes: Vec<String>,
}

impl WebConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            no_fallback_prefixes: vec!["/api/".to_string()],
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(resolve_root(&config.web_root))
    }
}

/// `/api/...` routes.
pub fn api_routes(app_state: AppState) -> Router<AppState> {
    Router::new().nest("/factoid", factoid_routes(app_state))
}

/// Builds the complete application router.
///
/// Called once at startup. Session cookie settings come from `app_state`,
/// file locations from `web`.
pub fn build_router(app_state: AppState, web: &WebConfig) -> Router {
    let resolver = FallbackResolver::new(web);
    let unmatched = resolver.clone();
    let wrong_method = resolver.clone();

    Router::new()
        .nest("/api", api_routes(app_state.clone()))
        .merge(login_routes())
        .merge(asset_routes(&web.root, resolver))
        .fallback(move |req: Request| async move { unmatched.resolve(req).await })
        // Must come after every route is added; it only reaches existing routes.
        .method_not_allowed_fallback(move |req: Request| async move {
            wrong_method.resolve(req).await
        })
        .layer(from_fn_with_state(app_state.clone(), log_request))
        .with_state(app_state)
}
