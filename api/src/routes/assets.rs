//! Static asset mounts under the web root.
//!
//! | prefix   | directory        | gzip | forced content type      |
//! |----------|------------------|------|--------------------------|
//! | `/css`   | `{root}/css`     | yes  |                          |
//! | `/fonts` | `{root}/fonts`   | yes  |                          |
//! | `/img`   | `{root}/img`     | no   |                          |
//! | `/js`    | `{root}/js`      | yes  | `application/javascript` |
//!
//! plus `/favicon.png` and `/favicon.ico` served as single files.
//!
//! The mounts only answer `GET` and `HEAD`; other methods are handed to the
//! [`FallbackResolver`] with the full request path.

use super::fallback::FallbackResolver;
use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::{Next, from_fn_with_state},
    response::Response,
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};
use util::{paths::web_subdir, state::AppState};

pub fn asset_routes(web_root: &Path, resolver: FallbackResolver) -> Router<AppState> {
    let css = ServiceBuilder::new()
        .layer(CompressionLayer::new())
        .service(ServeDir::new(web_subdir(web_root, "css")));

    let fonts = ServiceBuilder::new()
        .layer(CompressionLayer::new())
        .service(ServeDir::new(web_subdir(web_root, "fonts")));

    let img = ServeDir::new(web_subdir(web_root, "img"));

    let js = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/javascript"),
        ))
        .layer(CompressionLayer::new())
        .service(ServeDir::new(web_subdir(web_root, "js")));

    Router::new()
        .nest_service("/css", css)
        .nest_service("/fonts", fonts)
        .nest_service("/img", img)
        .nest_service("/js", js)
        .route_service("/favicon.png", ServeFile::new(web_root.join("favicon.png")))
        .route_service("/favicon.ico", ServeFile::new(web_root.join("favicon.ico")))
        .layer(from_fn_with_state(resolver, divert_other_methods))
}

async fn divert_other_methods(
    State(resolver): State<FallbackResolver>,
    req: Request,
    next: Next,
) -> Response {
    match *req.method() {
        Method::GET | Method::HEAD => next.run(req).await,
        _ => resolver.resolve(req).await,
    }
}
