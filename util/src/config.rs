//! Application configuration.
//!
//! `AppConfig` is loaded once at startup from `.env` and environment variables
//! and then handed to whoever needs it. Nothing reads the environment at
//! request time.

use std::env;

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    /// `web.root`: directory holding the built SPA and its static assets.
    pub web_root: String,
    /// `session.secret`: signing secret for the session cookie.
    pub session_secret: String,
    /// `session.name`: name of the session cookie.
    pub session_name: String,
    pub discord: DiscordConfig,
}

/// OAuth2 client settings for the Discord login flow.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    /// Base of the REST API (`{api_url}/oauth2/token`, `{api_url}/users/@me`).
    pub api_url: String,
    pub authorize_url: String,
}

pub const DEFAULT_SESSION_SECRET: &str = "changeme";
pub const DEFAULT_SESSION_NAME: &str = "panelsession";

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every key has a default, so this never fails. Unparseable ports fall
    /// back to the default as well.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "panel"),
            log_level: var_or("LOG_LEVEL", "panel=info"),
            log_file: var_or("LOG_FILE", "panel.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/panel.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            web_root: var_or("WEB_ROOT", "web"),
            session_secret: var_or("SESSION_SECRET", DEFAULT_SESSION_SECRET),
            session_name: var_or("SESSION_NAME", DEFAULT_SESSION_NAME),
            discord: DiscordConfig {
                client_id: env::var("DISCORD_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("DISCORD_CLIENT_SECRET").unwrap_or_default(),
                redirect_url: var_or(
                    "DISCORD_REDIRECT_URL",
                    "http://127.0.0.1:3000/login-callback",
                ),
                api_url: var_or("DISCORD_API_URL", "https://discord.com/api"),
                authorize_url: var_or(
                    "DISCORD_AUTHORIZE_URL",
                    "https://discord.com/oauth2/authorize",
                ),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Empty values count as unset, matching how `.env` files are usually written.
fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
