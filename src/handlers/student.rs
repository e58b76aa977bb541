//! Student endpoints: create, read, update, delete, list.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;

use super::{int_param, object_body, parse_list_query, typed_body, IdPayload};
use crate::error::AppError;
use crate::model::student::{CreateStudent, UpdateStudent, RULES};
use crate::response;
use crate::service::{RequestValidator, StudentService};
use crate::state::AppState;

const FINDABLE: &[&str] = &["name", "description", "class"];
const SORTABLE: &[&str] = &["id", "name", "description", "class"];

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let map = object_body(&body)?;
    let input: CreateStudent = typed_body(body)?;
    RequestValidator::validate(&map, RULES)?;
    let row = StudentService::create(&state.pool, &input).await?;
    Ok(response::created(row, "Student created successfully"))
}

pub async fn read(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let id = int_param(&params, "id")?;
    let row = StudentService::read(&state.pool, id).await?;
    Ok(response::success(row, "Student retrieved successfully"))
}

pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let map = object_body(&body)?;
    let input: UpdateStudent = typed_body(body)?;
    RequestValidator::validate_partial(&map, RULES)?;
    let row = StudentService::update(&state.pool, &input).await?;
    Ok(response::updated(row, "Student updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let input: IdPayload = typed_body(body)?;
    StudentService::delete(&state.pool, input.id).await?;
    Ok(response::deleted("Student deleted successfully"))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let query = parse_list_query(&params, FINDABLE, SORTABLE)?;
    let rows = StudentService::list(&state.pool, &query).await?;
    Ok(response::success_list(rows, "Students retrieved successfully"))
}
