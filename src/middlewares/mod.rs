pub mod auth;
pub mod cors;

pub use auth::{auth_context, require_admin, AuthContext, AuthMiddleware};
pub use cors::create_cors;
