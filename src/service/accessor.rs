//! Generic CRUD execution against PostgreSQL.
//!
//! Every operation takes a table schema and returns typed rows; the SQL
//! text and parameter list come from the builder.

use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::model::TableSchema;
use crate::sql::{self, PgBindValue, QueryBuf};

/// Validated list parameters. The like filter and sort column have
/// already been checked against the handler's declared field sets.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub like: Option<(&'static str, String)>,
    pub sort_by: Option<&'static str>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub struct Accessor;

impl Accessor {
    /// Fetch one row by primary key.
    pub async fn fetch_by_id<T>(pool: &PgPool, schema: &TableSchema, id: i64) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let q = sql::select_by_id(schema, id);
        Self::fetch_optional(pool, &q).await
    }

    /// List rows with optional LIKE filter, sort column, limit (default
    /// 100, max 1000), offset (default 0).
    pub async fn list<T>(pool: &PgPool, schema: &TableSchema, query: &ListQuery) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let like = query.like.as_ref().map(|(col, needle)| (*col, needle.as_str()));
        let q = sql::select_list(schema, like, query.sort_by, query.limit, query.offset);
        Self::fetch_all(pool, &q).await
    }

    /// Insert one row; returns the created row.
    pub async fn insert<T>(pool: &PgPool, schema: &TableSchema, values: &[(&str, Value)]) -> Result<T, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let q = sql::insert(schema, values);
        let row = Self::fetch_optional(pool, &q).await?;
        row.ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Update one row by primary key. Returns the updated row, or None
    /// when the id no longer matches.
    pub async fn update<T>(
        pool: &PgPool,
        schema: &TableSchema,
        id: i64,
        changes: &[(&str, Value)],
    ) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let q = sql::update(schema, id, changes);
        Self::fetch_optional(pool, &q).await
    }

    /// Delete one row by primary key. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, schema: &TableSchema, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(schema, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let result = query.execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_optional<T>(pool: &PgPool, q: &QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        Ok(query.fetch_optional(pool).await?)
    }

    async fn fetch_all<T>(pool: &PgPool, q: &QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        Ok(query.fetch_all(pool).await?)
    }
}
