//! Student entity: row shape, table schema, request payloads, field rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ColumnDef, ColumnType, TableSchema};
use crate::service::validation::FieldRule;

/// `class` is a keyword in Rust; the field is renamed on both the wire
/// and the row mapping.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "class")]
    #[sqlx(rename = "class")]
    pub class_name: String,
}

pub const TABLE: TableSchema = TableSchema {
    table: "students",
    pk: "id",
    columns: &[
        ColumnDef::new("id", ColumnType::BigSerial).primary_key(),
        ColumnDef::new("name", ColumnType::Text).unique().indexed(),
        ColumnDef::new("description", ColumnType::Text).indexed(),
        ColumnDef::new("class", ColumnType::Text).indexed(),
    ],
};

pub const RULES: &[(&str, FieldRule)] = &[
    ("name", FieldRule { required: true, min_length: Some(1), max_length: Some(255), ..FieldRule::NONE }),
    ("description", FieldRule { required: true, max_length: Some(2000), ..FieldRule::NONE }),
    ("class", FieldRule { required: true, max_length: Some(64), ..FieldRule::NONE }),
];

/// Create body: all three fields required.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateStudent {
    pub name: String,
    pub description: String,
    #[serde(rename = "class")]
    pub class_name: String,
}

impl CreateStudent {
    pub fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::String(self.name.clone())),
            ("description", Value::String(self.description.clone())),
            ("class", Value::String(self.class_name.clone())),
        ]
    }
}

/// Update body: id required, the rest optional.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateStudent {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "class")]
    pub class_name: Option<String>,
}

impl UpdateStudent {
    pub fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut out = Vec::new();
        if let Some(v) = &self.name {
            out.push(("name", Value::String(v.clone())));
        }
        if let Some(v) = &self.description {
            out.push(("description", Value::String(v.clone())));
        }
        if let Some(v) = &self.class_name {
            out.push(("class", Value::String(v.clone())));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn class_field_maps_to_class_key() {
        let input: CreateStudent = serde_json::from_value(
            json!({"name": "Ada", "description": "d", "class": "Secondary"}),
        )
        .unwrap();
        assert_eq!(input.class_name, "Secondary");
        let values = input.values();
        assert!(values.iter().any(|(c, v)| *c == "class" && v == "Secondary"));
    }

    #[test]
    fn create_requires_class() {
        let body = json!({"name": "Ada", "description": "d"});
        assert!(serde_json::from_value::<CreateStudent>(body).is_err());
    }

    #[test]
    fn student_row_serializes_class_key() {
        let row = Student {
            id: 1,
            name: "Ada".into(),
            description: "d".into(),
            class_name: "Secondary".into(),
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["class"], "Secondary");
        assert!(v.get("class_name").is_none());
    }
}
