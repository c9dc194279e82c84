use super::discord::{self, OAuthError};
use crate::auth::session::{OAUTH_STATE_KEY, PRINCIPAL_KEY, Session};
use crate::response::{ApiError, api_error};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use util::state::AppState;
use uuid::Uuid;

/// GET /login
///
/// Starts the OAuth2 flow: remembers a fresh `state` value in the session and
/// redirects (303) to the provider's authorize page.
pub async fn login(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    mut session: Session,
) -> Result<(SignedCookieJar, Redirect), ApiError> {
    let state = Uuid::new_v4().simple().to_string();

    let url = discord::authorize_url(app_state.discord(), &state).map_err(|e| {
        tracing::error!(error = %e, "cannot build authorize URL");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    session.insert(OAUTH_STATE_KEY, state);
    let jar = session.store(jar, app_state.session().name());

    Ok((jar, Redirect::to(url.as_str())))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /login-callback
///
/// Completes the OAuth2 flow and stores the Discord user id in the session.
///
/// ### Responses
/// - `303 See Other` to `/` on success
/// - `400 Bad Request` when the provider reported an error, parameters are
///   missing, or `state` does not match the one issued by `/login`
/// - `502 Bad Gateway` when talking to the provider fails
pub async fn login_callback(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    mut session: Session,
    Query(query): Query<CallbackQuery>,
) -> Result<(SignedCookieJar, Redirect), ApiError> {
    if let Some(error) = query.error {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Login was not completed: {error}"),
        ));
    }

    let (Some(code), Some(state)) = (query.code, query.state) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Missing code or state parameter",
        ));
    };

    if session.get(OAUTH_STATE_KEY) != Some(state.as_str()) {
        return Err(api_error(StatusCode::BAD_REQUEST, "Login state mismatch"));
    }

    let user = fetch_user(&app_state, &code).await.map_err(|e| {
        tracing::warn!(error = %e, "OAuth callback failed");
        api_error(StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    session.remove(OAUTH_STATE_KEY);
    session.insert(PRINCIPAL_KEY, user.id.as_str());
    tracing::info!(user = %user.id, username = %user.username, "login completed");

    let jar = session.store(jar, app_state.session().name());
    Ok((jar, Redirect::to("/")))
}

async fn fetch_user(app_state: &AppState, code: &str) -> Result<discord::DiscordUser, OAuthError> {
    let token = discord::exchange_code(app_state.http(), app_state.discord(), code).await?;
    discord::current_user(app_state.http(), app_state.discord(), &token).await
}
