#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response, header},
    response::IntoResponse,
};
use axum_extra::extract::SignedCookieJar;
use panel::auth::session::{PRINCIPAL_KEY, Session};
use panel::routes::{WebConfig, build_router};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::{fs, path::Path};
use tempfile::TempDir;
use util::{
    config::DiscordConfig,
    state::{AppState, SessionConfig},
};

pub const SESSION_SECRET: &str = "changeme";
pub const SESSION_NAME: &str = "panelsession";

pub const SHELL_HTML: &str = "<!doctype html><html><head><title>panel</title></head><body><div id=\"app\"></div></body></html>";
pub const SITE_CSS: &str = "body { margin: 0; padding: 0; font-family: sans-serif; color: #222; }\n";
pub const APP_JS: &str = "(function () { console.log('panel booted'); window.panel = { ready: true }; })();\n";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: DatabaseConnection,
    /// Keep alive for as long as the router serves files.
    pub web_root: TempDir,
}

pub fn test_discord_config(api_url: &str) -> DiscordConfig {
    DiscordConfig {
        client_id: "test-client".into(),
        client_secret: "test-secret".into(),
        redirect_url: "http://127.0.0.1:3000/login-callback".into(),
        api_url: api_url.into(),
        authorize_url: "https://discord.test/oauth2/authorize".into(),
    }
}

/// App over a fresh in-memory database and a populated temporary web root.
pub async fn make_test_app() -> TestApp {
    make_test_app_with(db::test_utils::setup_test_db().await, "http://127.0.0.1:9").await
}

pub async fn make_test_app_with(db: DatabaseConnection, discord_api_url: &str) -> TestApp {
    let web_root = TempDir::new().expect("failed to create web root");
    populate_web_root(web_root.path());

    let state = AppState::new(
        db.clone(),
        SessionConfig::new(SESSION_SECRET, SESSION_NAME),
        test_discord_config(discord_api_url),
    );
    let router = build_router(state.clone(), &WebConfig::new(web_root.path()));

    TestApp {
        router,
        state,
        db,
        web_root,
    }
}

pub fn write_file(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn populate_web_root(root: &Path) {
    write_file(root, "index.html", SHELL_HTML.as_bytes());
    write_file(root, "favicon.ico", b"\x00\x00\x01\x00icon");
    write_file(root, "favicon.png", b"\x89PNG\r\n\x1a\nicon");
    write_file(root, "css/site.css", SITE_CSS.repeat(4).as_bytes());
    write_file(root, "fonts/panel.woff2", &[b'w'; 256]);
    write_file(root, "img/logo.png", &[0x89; 256]);
    write_file(root, "js/app.js", APP_JS.repeat(4).as_bytes());
    write_file(root, "theme/dark.css", SITE_CSS.as_bytes());
    write_file(root, "bundle.js", APP_JS.as_bytes());
    write_file(root, "manifest.json", br#"{"name":"panel"}"#);
    write_file(root, "backup.tar", b"tar-bytes");
}

/// `Cookie` header value carrying a session signed with the app's key.
pub fn session_cookie(state: &AppState, session: &Session) -> String {
    let config = state.session();
    let jar = session.store(SignedCookieJar::new(config.key().clone()), config.name());
    let response = jar.into_response();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("jar should emit Set-Cookie")
        .to_str()
        .unwrap();
    cookie_pair(set_cookie)
}

pub fn principal_cookie(state: &AppState, principal: &str) -> String {
    let mut session = Session::default();
    session.insert(PRINCIPAL_KEY, principal);
    session_cookie(state, &session)
}

/// `name=value` part of a `Set-Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

pub fn build_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    json: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    match json {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn content_type(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
}
