//! Resource routes: one /{Entity}/{operation} route per public API row.
//! Reads go through the query string, writes through the body.

use axum::{routing::get, routing::post, Router};

use crate::handlers::{product, student};
use crate::state::AppState;

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/Product/create", post(product::create))
        .route("/Product/read", get(product::read))
        .route("/Product/update", post(product::update))
        .route("/Product/delete", post(product::delete))
        .route("/Product/list", get(product::list))
        .route("/Student/create", post(student::create))
        .route("/Student/read", get(student::read))
        .route("/Student/update", post(student::update))
        .route("/Student/delete", post(student::delete))
        .route("/Student/list", get(student::list))
        .with_state(state)
}
