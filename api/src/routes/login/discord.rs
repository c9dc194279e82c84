//! Minimal Discord OAuth2 client: authorize URL, code exchange, current user.

use serde::Deserialize;
use thiserror::Error;
use url::Url;
use util::config::DiscordConfig;

pub const SCOPE: &str = "identify";

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("invalid OAuth configuration: {0}")]
    Config(#[from] url::ParseError),

    #[error("request to identity provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity provider answered {status} for {endpoint}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    #[serde(default)]
    pub username: String,
}

/// URL the browser is sent to by `/login`.
pub fn authorize_url(config: &DiscordConfig, state: &str) -> Result<Url, OAuthError> {
    let url = Url::parse_with_params(
        &config.authorize_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("scope", SCOPE),
            ("redirect_uri", config.redirect_url.as_str()),
            ("state", state),
            ("prompt", "none"),
        ],
    )?;
    Ok(url)
}

fn endpoint(config: &DiscordConfig, path: &str) -> String {
    format!("{}/{}", config.api_url.trim_end_matches('/'), path)
}

/// Trades an authorization code for an access token.
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &DiscordConfig,
    code: &str,
) -> Result<String, OAuthError> {
    let response = client
        .post(endpoint(config, "oauth2/token"))
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_url.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(OAuthError::Status {
            endpoint: "oauth2/token",
            status: response.status(),
        });
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}

/// Fetches the user the access token belongs to.
pub async fn current_user(
    client: &reqwest::Client,
    config: &DiscordConfig,
    access_token: &str,
) -> Result<DiscordUser, OAuthError> {
    let response = client
        .get(endpoint(config, "users/@me"))
        .bearer_auth(access_token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(OAuthError::Status {
            endpoint: "users/@me",
            status: response.status(),
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DiscordConfig {
        DiscordConfig {
            client_id: "1234".into(),
            client_secret: "shh".into(),
            redirect_url: "http://127.0.0.1:3000/login-callback".into(),
            api_url: "https://discord.com/api/".into(),
            authorize_url: "https://discord.com/oauth2/authorize".into(),
        }
    }

    #[test]
    fn authorize_url_carries_client_redirect_and_state() {
        let url = authorize_url(&config(), "xyz").unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("discord.com"));
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "1234");
        assert_eq!(params["scope"], "identify");
        assert_eq!(params["redirect_uri"], "http://127.0.0.1:3000/login-callback");
        assert_eq!(params["state"], "xyz");
    }

    #[test]
    fn bad_authorize_url_is_a_config_error() {
        let mut cfg = config();
        cfg.authorize_url = "not a url".into();

        assert!(matches!(authorize_url(&cfg, "xyz"), Err(OAuthError::Config(_))));
    }

    #[test]
    fn endpoints_tolerate_trailing_slash() {
        assert_eq!(endpoint(&config(), "users/@me"), "https://discord.com/api/users/@me");
    }
}
