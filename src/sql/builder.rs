//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table schema.
//!
//! Placeholders carry an explicit cast (`$n::bigint`) so dynamically
//! typed parameters bind correctly regardless of the declared wire type.

use serde_json::Value;

use crate::model::TableSchema;

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

/// Quote identifier for PostgreSQL (safe: only from schema declarations).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT list: every schema column, quoted.
fn select_column_list(schema: &TableSchema) -> String {
    schema
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key.
pub fn select_by_id(schema: &TableSchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}::bigint",
        select_column_list(schema),
        quoted(schema.table),
        quoted(schema.pk),
        n
    );
    q
}

/// SELECT list with an optional LIKE filter and sort column, LIMIT/OFFSET.
/// Filter and sort columns outside the schema are ignored; the order
/// falls back to the primary key.
pub fn select_list(
    schema: &TableSchema,
    like: Option<(&str, &str)>,
    sort_by: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = offset.unwrap_or(0);

    let where_clause = match like {
        Some((column, needle)) if schema.has_column(column) => {
            let n = q.push_param(Value::String(format!("%{}%", needle)));
            format!(" WHERE {} LIKE ${}::text", quoted(column), n)
        }
        _ => String::new(),
    };
    let order_column = match sort_by {
        Some(col) if schema.has_column(col) => col,
        _ => schema.pk,
    };

    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(schema),
        quoted(schema.table),
        where_clause,
        quoted(order_column),
        limit,
        offset
    );
    q
}

/// INSERT: given column/value pairs, filtered to schema columns, never
/// the primary key. Omitted columns take their declared defaults.
/// Returns the created row.
pub fn insert(schema: &TableSchema, values: &[(&str, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, value) in values {
        let Some(col) = schema.column(name) else { continue };
        if col.primary_key {
            continue;
        }
        let n = q.push_param(value.clone());
        cols.push(quoted(name));
        placeholders.push(format!("${}::{}", n, col.ty.cast()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(schema.table),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(schema)
    );
    q
}

/// UPDATE by primary key: SET only the given columns, plus
/// `updated_at = NOW()` when the schema carries that column. An empty
/// change-set degrades to a SELECT so the caller still gets the row.
pub fn update(schema: &TableSchema, id: i64, changes: &[(&str, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, value) in changes {
        let Some(col) = schema.column(name) else { continue };
        if col.primary_key {
            continue;
        }
        let n = q.push_param(value.clone());
        sets.push(format!("{} = ${}::{}", quoted(name), n, col.ty.cast()));
    }
    if sets.is_empty() {
        return select_by_id(schema, id);
    }
    if schema.has_column("updated_at") {
        sets.push(format!("{} = NOW()", quoted("updated_at")));
    }
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}::bigint RETURNING {}",
        quoted(schema.table),
        sets.join(", "),
        quoted(schema.pk),
        n,
        select_column_list(schema)
    );
    q
}

/// DELETE by primary key.
pub fn delete(schema: &TableSchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}::bigint",
        quoted(schema.table),
        quoted(schema.pk),
        n
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{product, student};
    use serde_json::json;

    #[test]
    fn select_by_id_targets_pk() {
        let q = select_by_id(&product::TABLE, 7);
        assert!(q.sql.contains("FROM \"products\""));
        assert!(q.sql.contains("WHERE \"id\" = $1::bigint"));
        assert_eq!(q.params, vec![json!(7)]);
    }

    #[test]
    fn select_list_wraps_needle_in_wildcards() {
        let q = select_list(&product::TABLE, Some(("name", "wid")), None, None, None);
        assert!(q.sql.contains("\"name\" LIKE $1::text"));
        assert_eq!(q.params, vec![json!("%wid%")]);
    }

    #[test]
    fn select_list_ignores_unknown_filter_column() {
        let q = select_list(&product::TABLE, Some(("owner", "x")), None, None, None);
        assert!(!q.sql.contains("WHERE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_list_defaults_to_pk_order() {
        let q = select_list(&product::TABLE, None, None, None, None);
        assert!(q.sql.contains("ORDER BY \"id\""));
        assert!(q.sql.contains("LIMIT 100 OFFSET 0"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_list_with_filter_and_sort() {
        let q = select_list(&student::TABLE, Some(("class", "Sec")), Some("name"), Some(10), Some(5));
        assert!(q.sql.contains("WHERE \"class\" LIKE $1::text"));
        assert!(q.sql.contains("ORDER BY \"name\""));
        assert!(q.sql.contains("LIMIT 10 OFFSET 5"));
        assert_eq!(q.params, vec![json!("%Sec%")]);
    }

    #[test]
    fn select_list_caps_limit() {
        let q = select_list(&product::TABLE, None, None, Some(5000), None);
        assert!(q.sql.contains("LIMIT 1000"));
    }

    #[test]
    fn insert_skips_pk_and_unknown_columns() {
        let q = insert(
            &student::TABLE,
            &[
                ("id", json!(9)),
                ("name", json!("Ada")),
                ("description", json!("d")),
                ("class", json!("Secondary")),
                ("owner", json!("x")),
            ],
        );
        assert!(q.sql.starts_with(
            "INSERT INTO \"students\" (\"name\", \"description\", \"class\") VALUES"
        ));
        assert!(!q.sql.contains("owner"));
        assert!(q.sql.contains("RETURNING"));
        assert_eq!(q.params.len(), 3);
    }

    #[test]
    fn insert_casts_placeholders() {
        let q = insert(&product::TABLE, &[("name", json!("w")), ("price", json!(1.5))]);
        assert!(q.sql.contains("$1::text"));
        assert!(q.sql.contains("$2::double precision"));
    }

    #[test]
    fn update_touches_updated_at_only_when_present() {
        let q = update(&product::TABLE, 1, &[("name", json!("w"))]);
        assert!(q.sql.contains("\"updated_at\" = NOW()"));
        let q = update(&student::TABLE, 1, &[("name", json!("Ada"))]);
        assert!(!q.sql.contains("updated_at"));
    }

    #[test]
    fn update_binds_id_last() {
        let q = update(&product::TABLE, 4, &[("name", json!("w")), ("stock", json!(2))]);
        assert!(q.sql.contains("WHERE \"id\" = $3::bigint"));
        assert_eq!(q.params.last(), Some(&json!(4)));
    }

    #[test]
    fn update_without_changes_degrades_to_select() {
        let q = update(&product::TABLE, 4, &[]);
        assert!(q.sql.starts_with("SELECT"));
        assert_eq!(q.params, vec![json!(4)]);
    }

    #[test]
    fn delete_targets_pk() {
        let q = delete(&student::TABLE, 2);
        assert_eq!(q.sql, "DELETE FROM \"students\" WHERE \"id\" = $1::bigint");
        assert_eq!(q.params, vec![json!(2)]);
    }
}
