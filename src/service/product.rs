//! Product business rules: accessor results mapped to uniform outcomes.

use sqlx::PgPool;

use crate::error::AppError;
use crate::model::product::{CreateProduct, Product, UpdateProduct, TABLE};
use crate::service::accessor::{Accessor, ListQuery};

pub struct ProductService;

impl ProductService {
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, AppError> {
        Accessor::insert(pool, &TABLE, &input.values())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create Product: {}", e)))
    }

    pub async fn read(pool: &PgPool, id: i64) -> Result<Product, AppError> {
        Accessor::fetch_by_id(pool, &TABLE, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    /// Update requires an existing row; only the fields present in the
    /// payload change. An empty change-set returns the row untouched.
    pub async fn update(pool: &PgPool, input: &UpdateProduct) -> Result<Product, AppError> {
        Self::read(pool, input.id).await?;
        Accessor::update(pool, &TABLE, input.id, &input.changes())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update Product: {}", e)))?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    /// Delete requires an existing row; removal is permanent.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        Self::read(pool, id).await?;
        Accessor::delete(pool, &TABLE, id)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete Product: {}", e)))?;
        Ok(())
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Vec<Product>, AppError> {
        Accessor::list(pool, &TABLE, query)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to list Products: {}", e)))
    }
}
