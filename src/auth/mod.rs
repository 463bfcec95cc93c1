use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod errors;
pub mod handlers;
pub mod jwt;
pub mod services;

pub use errors::AuthError;
pub use jwt::{JwtKeys, TokenPair};
pub use services::AuthService;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
