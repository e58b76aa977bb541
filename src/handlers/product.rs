//! Product endpoints: create, read, update, delete, list.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;

use super::{int_param, object_body, parse_list_query, typed_body, IdPayload};
use crate::error::AppError;
use crate::model::product::{CreateProduct, UpdateProduct, RULES};
use crate::response;
use crate::service::{ProductService, RequestValidator};
use crate::state::AppState;

/// Fields the list operation may filter on (partial match).
const FINDABLE: &[&str] = &["name", "description"];
/// Fields the list operation may sort on.
const SORTABLE: &[&str] = &["id", "name", "description"];

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let map = object_body(&body)?;
    let input: CreateProduct = typed_body(body)?;
    RequestValidator::validate(&map, RULES)?;
    let row = ProductService::create(&state.pool, &input).await?;
    Ok(response::created(row, "Product created successfully"))
}

pub async fn read(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let id = int_param(&params, "id")?;
    let row = ProductService::read(&state.pool, id).await?;
    Ok(response::success(row, "Product retrieved successfully"))
}

pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let map = object_body(&body)?;
    let input: UpdateProduct = typed_body(body)?;
    RequestValidator::validate_partial(&map, RULES)?;
    let row = ProductService::update(&state.pool, &input).await?;
    Ok(response::updated(row, "Product updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let input: IdPayload = typed_body(body)?;
    ProductService::delete(&state.pool, input.id).await?;
    Ok(response::deleted("Product deleted successfully"))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let query = parse_list_query(&params, FINDABLE, SORTABLE)?;
    let rows = ProductService::list(&state.pool, &query).await?;
    Ok(response::success_list(rows, "Products retrieved successfully"))
}
