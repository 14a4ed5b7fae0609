// Middleware for authentication and role gating

pub mod auth;
pub mod auth_middleware;

pub use auth::{AuthenticatedUser, OptionalUser};
pub use auth_middleware::{auth_middleware, auth_optional_middleware, require_admin};
