//! Startup DDL from the row schemas: tables first, then indexes.
//! Idempotent (IF NOT EXISTS throughout), applied on every boot.

use sqlx::PgPool;

use crate::error::AppError;
use crate::model::{self, TableSchema};

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// CREATE TABLE IF NOT EXISTS with column defs, defaults, and the
/// primary key inline.
pub fn create_table_sql(schema: &TableSchema) -> String {
    let mut defs: Vec<String> = Vec::new();
    for c in schema.columns {
        let mut def = format!("{} {}", quote(c.name), c.ty.ddl());
        if c.primary_key {
            def.push_str(" PRIMARY KEY");
        } else if !c.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(expr) = c.default {
            def.push_str(" DEFAULT ");
            def.push_str(expr);
        }
        defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quote(schema.table),
        defs.join(",\n  ")
    )
}

/// One CREATE [UNIQUE] INDEX IF NOT EXISTS per indexed or unique column.
pub fn index_sql(schema: &TableSchema) -> Vec<String> {
    schema
        .columns
        .iter()
        .filter(|c| (c.indexed || c.unique) && !c.primary_key)
        .map(|c| {
            let unique = if c.unique { "UNIQUE " } else { "" };
            let name = format!("idx_{}_{}", schema.table, c.name);
            format!(
                "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
                unique,
                quote(&name),
                quote(schema.table),
                quote(c.name)
            )
        })
        .collect()
}

/// Apply DDL for every registered entity schema.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for schema in model::schemas() {
        let ddl = create_table_sql(schema);
        tracing::debug!(sql = %ddl, "migrate");
        sqlx::query(&ddl).execute(pool).await?;
        for idx in index_sql(schema) {
            tracing::debug!(sql = %idx, "migrate");
            sqlx::query(&idx).execute(pool).await?;
        }
        tracing::info!(table = schema.table, "schema ensured");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{product, student};

    #[test]
    fn product_table_ddl() {
        let ddl = create_table_sql(&product::TABLE);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS \"products\""));
        assert!(ddl.contains("\"id\" BIGSERIAL PRIMARY KEY"));
        assert!(ddl.contains("\"name\" TEXT NOT NULL"));
        assert!(ddl.contains("\"description\" TEXT,"));
        assert!(ddl.contains("\"price\" DOUBLE PRECISION NOT NULL DEFAULT 0"));
        assert!(ddl.contains("\"created_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()"));
    }

    #[test]
    fn student_table_has_no_timestamps() {
        let ddl = create_table_sql(&student::TABLE);
        assert!(!ddl.contains("created_at"));
        assert!(ddl.contains("\"class\" TEXT NOT NULL"));
    }

    #[test]
    fn name_index_is_unique() {
        let indexes = index_sql(&product::TABLE);
        assert!(indexes
            .iter()
            .any(|s| s.starts_with("CREATE UNIQUE INDEX IF NOT EXISTS \"idx_products_name\"")));
        // everything except the pk and the two timestamps is indexed
        assert_eq!(indexes.len(), product::TABLE.columns.len() - 3);
    }
}
