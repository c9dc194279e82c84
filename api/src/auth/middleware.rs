use crate::auth::session::Session;
use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::{Origin, UserAgent};
use std::{net::SocketAddr, time::Instant};
use tracing::info;

/// Logs method, path, client address, session principal (if any), origin,
/// user-agent, response status and latency for each incoming HTTP request.
/// Skips CORS preflight `OPTIONS` requests.
///
/// ### Usage:
///
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn_with_state;
/// use panel::auth::middleware::log_request;
///
/// let app = Router::new().layer(from_fn_with_state(app_state, log_request));
/// ```
///
/// The client address is only known when the server was started with
/// `into_make_service_with_connect_info`; otherwise it is logged as `unknown`.
pub async fn log_request(session: Session, req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if parts.method == Method::OPTIONS {
        let req = Request::from_parts(parts, body);
        return next.run(req).await;
    }

    let ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let origin = TypedHeader::<Origin>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(o)| o.to_string());

    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string());

    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();
    let started = Instant::now();

    let req = Request::from_parts(parts, body);
    let response = next.run(req).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        ip = ip.as_deref().unwrap_or("unknown"),
        user = session.principal().unwrap_or("-"),
        origin = origin.as_deref().unwrap_or("unknown"),
        user_agent = user_agent.as_deref().unwrap_or("unknown"),
        "Handled request"
    );

    response
}
