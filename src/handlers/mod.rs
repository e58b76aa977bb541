//! Request handlers: shape validation, field rules, dispatch.

pub mod product;
pub mod student;

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::AppError;
use crate::service::accessor::ListQuery;

/// Body shape for delete: the id and nothing else.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdPayload {
    pub id: i64,
}

/// The raw body as an object, for field-rule checks.
pub(crate) fn object_body(body: &Value) -> Result<Map<String, Value>, AppError> {
    body.as_object()
        .cloned()
        .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))
}

/// Deserialize the body into its declared shape; unknown or missing
/// fields short-circuit with a validation error.
pub(crate) fn typed_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

/// Required integer query parameter.
pub(crate) fn int_param(params: &HashMap<String, String>, name: &str) -> Result<i64, AppError> {
    params
        .get(name)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| AppError::Validation(format!("{} is required and must be an integer", name)))
}

/// Parse list parameters against the declared findable/sortable sets.
/// `find_like` is `field=value` and matches partially (LIKE).
pub(crate) fn parse_list_query(
    params: &HashMap<String, String>,
    findable: &'static [&'static str],
    sortable: &'static [&'static str],
) -> Result<ListQuery, AppError> {
    let like = match params.get("find_like") {
        Some(raw) => {
            let (field, needle) = raw
                .split_once('=')
                .ok_or_else(|| AppError::Validation("find_like must be field=value".into()))?;
            let canonical = findable
                .iter()
                .find(|f| **f == field)
                .ok_or_else(|| AppError::Validation(format!("{} is not a findable field", field)))?;
            Some((*canonical, needle.to_string()))
        }
        None => None,
    };
    let sort_by = match params.get("sort_by") {
        Some(field) => Some(
            *sortable
                .iter()
                .find(|s| **s == field.as_str())
                .ok_or_else(|| AppError::Validation(format!("{} is not a sortable field", field)))?,
        ),
        None => None,
    };
    let limit = params.get("limit").and_then(|v| v.parse().ok());
    let offset = params.get("offset").and_then(|v| v.parse().ok());
    Ok(ListQuery {
        like,
        sort_by,
        limit,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    const FINDABLE: &[&str] = &["name", "description"];
    const SORTABLE: &[&str] = &["id", "name"];

    #[test]
    fn int_param_rejects_missing_and_non_numeric() {
        assert!(int_param(&params(&[]), "id").is_err());
        assert!(int_param(&params(&[("id", "abc")]), "id").is_err());
        assert_eq!(int_param(&params(&[("id", "7")]), "id").unwrap(), 7);
    }

    #[test]
    fn find_like_parses_field_and_value() {
        let q = parse_list_query(&params(&[("find_like", "name=wid")]), FINDABLE, SORTABLE).unwrap();
        assert_eq!(q.like, Some(("name", "wid".to_string())));
    }

    #[test]
    fn find_like_value_may_contain_equals() {
        let q = parse_list_query(&params(&[("find_like", "name=a=b")]), FINDABLE, SORTABLE).unwrap();
        assert_eq!(q.like, Some(("name", "a=b".to_string())));
    }

    #[test]
    fn find_like_rejects_unknown_field() {
        assert!(parse_list_query(&params(&[("find_like", "price=1")]), FINDABLE, SORTABLE).is_err());
    }

    #[test]
    fn find_like_rejects_malformed_pair() {
        assert!(parse_list_query(&params(&[("find_like", "name")]), FINDABLE, SORTABLE).is_err());
    }

    #[test]
    fn sort_by_rejects_undeclared_field() {
        assert!(parse_list_query(&params(&[("sort_by", "price")]), FINDABLE, SORTABLE).is_err());
        let q = parse_list_query(&params(&[("sort_by", "name")]), FINDABLE, SORTABLE).unwrap();
        assert_eq!(q.sort_by, Some("name"));
    }

    #[test]
    fn delete_payload_rejects_extra_fields() {
        assert!(typed_body::<IdPayload>(json!({"id": 1, "name": "x"})).is_err());
        assert_eq!(typed_body::<IdPayload>(json!({"id": 1})).unwrap().id, 1);
    }

    #[test]
    fn object_body_rejects_arrays() {
        assert!(object_body(&json!([1, 2])).is_err());
    }
}
