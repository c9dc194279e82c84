//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection, the
//! session cookie settings and the outbound HTTP client. It is cheap to clone
//! and passed into route handlers via Axum's `State<T>` extractor.

use crate::config::{AppConfig, DiscordConfig};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha512};
use std::{sync::Arc, time::Duration};

const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

/// Name and signing key of the session cookie.
#[derive(Clone)]
pub struct SessionConfig {
    name: Arc<str>,
    key: Key,
}

impl SessionConfig {
    /// Derives the cookie signing key from an arbitrary-length secret.
    ///
    /// The secret is stretched through SHA-512 because the signing key needs
    /// 64 bytes of material and `session.secret` defaults to a short string.
    pub fn new(secret: &str, name: &str) -> Self {
        let digest = Sha512::digest(secret.as_bytes());
        Self {
            name: Arc::from(name),
            key: Key::from(digest.as_slice()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
}

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    session: SessionConfig,
    discord: Arc<DiscordConfig>,
    http: reqwest::Client,
}

impl AppState {
    /// Creates a new `AppState` from a database connection and explicit settings.
    pub fn new(db: DatabaseConnection, session: SessionConfig, discord: DiscordConfig) -> Self {
        Self {
            db,
            session,
            discord: Arc::new(discord),
            http: reqwest::Client::builder()
                .timeout(OUTBOUND_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Builds the state from a loaded `AppConfig`.
    pub fn from_config(db: DatabaseConnection, config: &AppConfig) -> Self {
        Self::new(
            db,
            SessionConfig::new(&config.session_secret, &config.session_name),
            config.discord.clone(),
        )
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn discord(&self) -> &DiscordConfig {
        &self.discord
    }

    /// Shared client for outbound calls (OAuth token exchange).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

impl FromRef<AppState> for SessionConfig {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session.key.clone()
    }
}
