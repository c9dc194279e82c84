//! Session handling, the permission gate and request logging.

pub mod guards;
pub mod middleware;
pub mod session;

pub use guards::{FACTOID_MANAGE, PermissionGate, Principal, authorize};
pub use session::Session;
