//! Product entity: row shape, table schema, request payloads, field rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ColumnDef, ColumnType, TableSchema};
use crate::service::validation::FieldRule;

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub sku: Option<String>,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const TABLE: TableSchema = TableSchema {
    table: "products",
    pk: "id",
    columns: &[
        ColumnDef::new("id", ColumnType::BigSerial).primary_key(),
        ColumnDef::new("name", ColumnType::Text).unique().indexed(),
        ColumnDef::new("description", ColumnType::Text).nullable().indexed(),
        ColumnDef::new("color", ColumnType::Text).nullable().indexed(),
        ColumnDef::new("price", ColumnType::DoublePrecision).default_sql("0").indexed(),
        ColumnDef::new("stock", ColumnType::Integer).default_sql("0").indexed(),
        ColumnDef::new("sku", ColumnType::Text).nullable().indexed(),
        ColumnDef::new("category_id", ColumnType::BigInt).nullable().indexed(),
        ColumnDef::new("created_at", ColumnType::Timestamptz).default_sql("NOW()"),
        ColumnDef::new("updated_at", ColumnType::Timestamptz).default_sql("NOW()"),
    ],
};

pub const RULES: &[(&str, FieldRule)] = &[
    ("name", FieldRule { required: true, min_length: Some(1), max_length: Some(255), ..FieldRule::NONE }),
    ("description", FieldRule { required: true, max_length: Some(2000), ..FieldRule::NONE }),
    ("price", FieldRule { minimum: Some(0.0), ..FieldRule::NONE }),
    ("stock", FieldRule { minimum: Some(0.0), ..FieldRule::NONE }),
    ("sku", FieldRule { max_length: Some(64), pattern: Some("^[A-Za-z0-9_-]+$"), ..FieldRule::NONE }),
];

/// Create body: name and description required, the rest optional.
/// Unknown keys are rejected at deserialization.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl CreateProduct {
    /// Column/value pairs for INSERT. Timestamps and the id come from
    /// column defaults; unset price/stock fall back to zero.
    pub fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::String(self.name.clone())),
            ("description", Value::String(self.description.clone())),
            ("color", opt_string(&self.color)),
            ("price", Value::from(self.price.unwrap_or(0.0))),
            ("stock", Value::from(self.stock.unwrap_or(0))),
            ("sku", opt_string(&self.sku)),
            ("category_id", self.category_id.map(Value::from).unwrap_or(Value::Null)),
        ]
    }
}

/// Update body: id required, every other field optional.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProduct {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl UpdateProduct {
    /// Only the fields present in the payload.
    pub fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut out = Vec::new();
        if let Some(v) = &self.name {
            out.push(("name", Value::String(v.clone())));
        }
        if let Some(v) = &self.description {
            out.push(("description", Value::String(v.clone())));
        }
        if let Some(v) = &self.color {
            out.push(("color", Value::String(v.clone())));
        }
        if let Some(v) = self.price {
            out.push(("price", Value::from(v)));
        }
        if let Some(v) = self.stock {
            out.push(("stock", Value::from(v)));
        }
        if let Some(v) = &self.sku {
            out.push(("sku", Value::String(v.clone())));
        }
        if let Some(v) = self.category_id {
            out.push(("category_id", Value::from(v)));
        }
        out
    }
}

fn opt_string(v: &Option<String>) -> Value {
    v.clone().map(Value::String).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_rejects_unknown_fields() {
        let body = json!({"name": "Widget", "description": "d", "owner": "x"});
        assert!(serde_json::from_value::<CreateProduct>(body).is_err());
    }

    #[test]
    fn create_requires_name_and_description() {
        assert!(serde_json::from_value::<CreateProduct>(json!({"name": "Widget"})).is_err());
        assert!(serde_json::from_value::<CreateProduct>(json!({"description": "d"})).is_err());
    }

    #[test]
    fn create_defaults_price_and_stock_to_zero() {
        let input: CreateProduct =
            serde_json::from_value(json!({"name": "Widget", "description": "d"})).unwrap();
        let values = input.values();
        let price = values.iter().find(|(c, _)| *c == "price").unwrap();
        let stock = values.iter().find(|(c, _)| *c == "stock").unwrap();
        assert_eq!(price.1, json!(0.0));
        assert_eq!(stock.1, json!(0));
    }

    #[test]
    fn update_changes_carry_only_present_fields() {
        let input: UpdateProduct =
            serde_json::from_value(json!({"id": 3, "price": 9.5})).unwrap();
        let changes = input.changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, "price");
    }

    #[test]
    fn update_requires_id() {
        assert!(serde_json::from_value::<UpdateProduct>(json!({"name": "x"})).is_err());
    }
}
