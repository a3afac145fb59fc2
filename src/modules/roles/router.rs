use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_role, get_role_level, get_roles, validate_role};

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_roles))
        .route("/validate", post(validate_role))
        .route("/{key}", get(get_role))
        .route("/{key}/level", get(get_role_level))
}
