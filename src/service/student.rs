//! Student business rules: accessor results mapped to uniform outcomes.

use sqlx::PgPool;

use crate::error::AppError;
use crate::model::student::{CreateStudent, Student, UpdateStudent, TABLE};
use crate::service::accessor::{Accessor, ListQuery};

pub struct StudentService;

impl StudentService {
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, AppError> {
        Accessor::insert(pool, &TABLE, &input.values())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create Student: {}", e)))
    }

    pub async fn read(pool: &PgPool, id: i64) -> Result<Student, AppError> {
        Accessor::fetch_by_id(pool, &TABLE, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".into()))
    }

    pub async fn update(pool: &PgPool, input: &UpdateStudent) -> Result<Student, AppError> {
        Self::read(pool, input.id).await?;
        Accessor::update(pool, &TABLE, input.id, &input.changes())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update Student: {}", e)))?
            .ok_or_else(|| AppError::NotFound("Student not found".into()))
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        Self::read(pool, id).await?;
        Accessor::delete(pool, &TABLE, id)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete Student: {}", e)))?;
        Ok(())
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Vec<Student>, AppError> {
        Accessor::list(pool, &TABLE, query)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to list Students: {}", e)))
    }
}
