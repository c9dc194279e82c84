//! Cookie-backed session store.
//!
//! A session is a small string map serialized as JSON into a single signed
//! cookie. The signature is checked on every read; a cookie that fails
//! verification or does not parse reads as an empty session.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, convert::Infallible};
use time::Duration;
use util::state::SessionConfig;

/// Session key holding the authenticated principal (Discord user id).
pub const PRINCIPAL_KEY: &str = "discordId";

/// Session key holding the pending OAuth `state` value between `/login` and the callback.
pub const OAUTH_STATE_KEY: &str = "oauthState";

/// How long a browser keeps the session cookie.
pub const SESSION_MAX_AGE: Duration = Duration::days(30);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    values: BTreeMap<String, String>,
}

impl Session {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// The authenticated identity, if any. An empty id counts as absent.
    pub fn principal(&self) -> Option<&str> {
        self.get(PRINCIPAL_KEY).filter(|id| !id.is_empty())
    }

    /// Reads the session cookie `name` out of a verified jar.
    pub fn from_jar(jar: &SignedCookieJar, name: &str) -> Self {
        let Some(cookie) = jar.get(name) else {
            return Self::default();
        };

        serde_json::from_str(cookie.value()).unwrap_or_else(|e| {
            tracing::debug!(error = %e, cookie = name, "discarding unreadable session cookie");
            Self::default()
        })
    }

    /// Writes the session into `jar` as cookie `name`, replacing any previous value.
    pub fn store(&self, jar: SignedCookieJar, name: &str) -> SignedCookieJar {
        // BTreeMap<String, String> always serializes.
        let value = serde_json::to_string(&self.values).unwrap_or_default();

        let cookie = Cookie::build((name.to_owned(), value))
            .path("/")
            .max_age(SESSION_MAX_AGE)
            .http_only(true)
            .same_site(SameSite::Lax);

        jar.add(cookie)
    }
}

/// Extracts the current session using the state's cookie name and key.
///
/// Never rejects: requests without a (valid) cookie get an empty session.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = SessionConfig::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, config.key().clone());

        Ok(Session::from_jar(&jar, config.name()))
    }
}
