use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{
    can_assign, check_access, effective_access, expand_permissions, filter_permissions,
};

pub fn init_access_router() -> Router<AppState> {
    Router::new()
        .route("/expand", post(expand_permissions))
        .route("/filter", post(filter_permissions))
        .route("/effective", post(effective_access))
        .route("/check", post(check_access))
        .route("/can-assign", post(can_assign))
}
