//! Handler for requests that matched no declared route.
//!
//! API paths get a plain 404. Everything else is served from the web root:
//! a handful of extensions are served as files with a fixed content type, and
//! any other path gets the SPA shell so the client-side router can take over.
//!
//! The method does not matter. Requests on a declared path with a method it
//! does not accept land here too, so `POST /login` gets the shell and
//! `POST /api/factoid` gets a 404.

use crate::routes::WebConfig;
use axum::{
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::{convert::Infallible, path::PathBuf, sync::Arc};
use tower::{Service, ServiceExt};
use tower_http::services::{ServeDir, ServeFile};
use util::paths::spa_shell;

/// Checked in order; the first matching suffix wins.
pub const CONTENT_TYPE_OVERRIDES: [(&str, &str); 4] = [
    (".js", "application/javascript"),
    (".json", "application/json"),
    (".css", "text/css"),
    (".tar", "application/x-tar"),
];

/// Forced content type for `path`, if its suffix is one of the overridden ones.
pub fn content_type_for(path: &str) -> Option<&'static str> {
    CONTENT_TYPE_OVERRIDES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map(|(_, content_type)| *content_type)
}

#[derive(Debug, Clone)]
pub struct FallbackResolver {
    root: Arc<PathBuf>,
    excluded_prefixes: Arc<[String]>,
}

impl FallbackResolver {
    pub fn new(web: &WebConfig) -> Self {
        Self {
            root: Arc::new(web.root.clone()),
            excluded_prefixes: web.no_fallback_prefixes.clone().into(),
        }
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Resolves an unmatched request.
    ///
    /// Files are served without an existence check; a missing file comes back
    /// as the file service's own 404.
    pub async fn resolve(&self, mut req: Request) -> Response {
        let path = req.uri().path().to_owned();

        if self.is_excluded(&path) {
            return StatusCode::NOT_FOUND.into_response();
        }

        // The file services only answer GET and HEAD.
        if req.method() != Method::HEAD {
            *req.method_mut() = Method::GET;
        }

        match content_type_for(&path) {
            Some(content_type) => {
                let mut response = serve(ServeDir::new(self.root.as_path()), req).await;
                if response.status().is_success() {
                    response
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
                }
                response
            }
            None => serve(ServeFile::new(spa_shell(&self.root)), req).await,
        }
    }
}

async fn serve<S>(service: S, req: Request) -> Response
where
    S: Service<Request, Error = Infallible>,
    S::Response: IntoResponse,
{
    match service.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_map_to_fixed_content_types() {
        assert_eq!(content_type_for("/app.js"), Some("application/javascript"));
        assert_eq!(content_type_for("/manifest.json"), Some("application/json"));
        assert_eq!(content_type_for("/theme/site.css"), Some("text/css"));
        assert_eq!(content_type_for("/dl/backup.tar"), Some("application/x-tar"));
    }

    #[test]
    fn other_paths_have_no_override() {
        assert_eq!(content_type_for("/"), None);
        assert_eq!(content_type_for("/factoids"), None);
        assert_eq!(content_type_for("/logo.svg"), None);
        assert_eq!(content_type_for("/archive.tar.gz"), None);
        assert_eq!(content_type_for("/app.jsx"), None);
    }

    #[test]
    fn excluded_prefixes_match_only_at_the_start() {
        let resolver = FallbackResolver::new(&WebConfig::new("/srv/panel"));

        assert!(resolver.is_excluded("/api/"));
        assert!(resolver.is_excluded("/api/unknown/thing.js"));
        assert!(!resolver.is_excluded("/api"));
        assert!(!resolver.is_excluded("/docs/api/"));
    }
}
