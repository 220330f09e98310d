//! Static schema descriptors for data sources.
//!
//! A [`Resource`] declares the fields a data source accepts and produces. The
//! host side uses it twice: to validate user configuration before a read, and
//! to check every value the read writes back into the output store.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Primitive and collection types a field can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    List,
    Set,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::List => "list",
            ValueType::Set => "set",
        };
        f.write_str(name)
    }
}

/// Field validator: receives the configured value and the field name.
pub type ValidateFn = fn(&Value, &str) -> Result<(), ValidationError>;

/// Element type of a list or set field
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Elem {
    Schema(Box<Schema>),
    Resource(Resource),
}

/// Description of a single field
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub ty: ValueType,
    pub required: bool,
    pub computed: bool,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<Elem>,
    #[serde(skip)]
    pub validate: Option<ValidateFn>,
}

/// A named set of fields
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resource {
    pub schema: BTreeMap<&'static str, Schema>,
}

/// Problems found in user configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}: required field is not set")]
    Required(String),

    #[error("{0}: unknown field")]
    Unknown(String),

    #[error("{0}: computed field cannot be set in configuration")]
    Computed(String),

    #[error("{key}: expected {expected}, got {found}")]
    Type {
        key: String,
        expected: ValueType,
        found: &'static str,
    },

    #[error("{0}: must not be a zero value")]
    ZeroValue(String),
}

/// Errors writing a value into an output store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Invalid address to set: {0:?}")]
    UnknownKey(String),

    #[error("{path}: expected {expected}, got {found}")]
    Shape {
        path: String,
        expected: ValueType,
        found: &'static str,
    },

    #[error("{path}: expected object, got {found}")]
    NotAnObject { path: String, found: &'static str },
}

impl Schema {
    pub fn new(ty: ValueType) -> Self {
        Self {
            ty,
            required: false,
            computed: false,
            description: "",
            elem: None,
            validate: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn elem(mut self, elem: Elem) -> Self {
        self.elem = Some(elem);
        self
    }

    pub fn validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }
}

impl Resource {
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Schema)>,
    {
        Self {
            schema: fields.into_iter().collect(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Schema> {
        self.schema.get(key)
    }

    /// Check user configuration, collecting every problem rather than stopping at the first.
    pub fn validate_config(&self, config: &Map<String, Value>) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (key, schema) in &self.schema {
            if schema.required && config.get(*key).map_or(true, Value::is_null) {
                errors.push(ValidationError::Required(key.to_string()));
            }
        }

        for (key, value) in config {
            let schema = match self.schema.get(key.as_str()) {
                Some(schema) => schema,
                None => {
                    errors.push(ValidationError::Unknown(key.clone()));
                    continue;
                }
            };
            if schema.computed && !schema.required {
                errors.push(ValidationError::Computed(key.clone()));
                continue;
            }
            if value.is_null() {
                continue;
            }
            if !matches_type(schema.ty, value) {
                errors.push(ValidationError::Type {
                    key: key.clone(),
                    expected: schema.ty,
                    found: json_type_name(value),
                });
                continue;
            }
            if let Some(validate) = schema.validate {
                if let Err(e) = validate(value, key) {
                    errors.push(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Check `value` against the field `key`, returning it normalised for storage.
    pub fn check_value(&self, key: &str, value: Value) -> Result<Value, StoreError> {
        let schema = self
            .schema
            .get(key)
            .ok_or_else(|| StoreError::UnknownKey(key.to_string()))?;
        check(schema, key, value)
    }
}

fn check(schema: &Schema, path: &str, value: Value) -> Result<Value, StoreError> {
    if value.is_null() {
        return Ok(value);
    }
    if !matches_type(schema.ty, &value) {
        return Err(StoreError::Shape {
            path: path.to_string(),
            expected: schema.ty,
            found: json_type_name(&value),
        });
    }

    let items = match value {
        Value::Array(items) => items,
        other => return Ok(other),
    };

    let mut checked = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let item_path = format!("{}.{}", path, i);
        let item = match &schema.elem {
            None => item,
            Some(Elem::Schema(elem)) => check(elem, &item_path, item)?,
            Some(Elem::Resource(resource)) => check_object(resource, &item_path, item)?,
        };
        checked.push(item);
    }

    if schema.ty == ValueType::Set {
        checked.sort_by_key(set_sort_key);
        checked.dedup();
    }
    Ok(Value::Array(checked))
}

fn check_object(resource: &Resource, path: &str, value: Value) -> Result<Value, StoreError> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(StoreError::NotAnObject {
                path: path.to_string(),
                found: json_type_name(&other),
            })
        }
    };

    let mut out = Map::new();
    for (key, item) in object {
        let item_path = format!("{}.{}", path, key);
        let schema = resource
            .schema
            .get(key.as_str())
            .ok_or_else(|| StoreError::UnknownKey(item_path.clone()))?;
        out.insert(key, check(schema, &item_path, item)?);
    }
    Ok(Value::Object(out))
}

fn set_sort_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches_type(ty: ValueType, value: &Value) -> bool {
    match ty {
        ValueType::String => value.is_string(),
        ValueType::Int => value.is_i64() || value.is_u64(),
        ValueType::Float => value.is_number(),
        ValueType::Bool => value.is_boolean(),
        ValueType::List | ValueType::Set => value.is_array(),
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reject the zero value of the field's type: "", 0, false, or an empty collection.
pub fn no_zero_values(value: &Value, key: &str) -> Result<(), ValidationError> {
    let zero = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if zero {
        Err(ValidationError::ZeroValue(key.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Resource {
        let item = Resource::new([
            ("name", Schema::new(ValueType::String).computed()),
            ("disk", Schema::new(ValueType::Int).computed()),
            (
                "ids",
                Schema::new(ValueType::Set)
                    .computed()
                    .elem(Elem::Schema(Box::new(Schema::new(ValueType::String)))),
            ),
        ]);
        Resource::new([
            ("tag", Schema::new(ValueType::String).required().validate(no_zero_values)),
            (
                "items",
                Schema::new(ValueType::List).computed().elem(Elem::Resource(item)),
            ),
        ])
    }

    #[test]
    fn test_no_zero_values() {
        assert!(no_zero_values(&json!("web"), "tag").is_ok());
        assert_eq!(
            no_zero_values(&json!(""), "tag"),
            Err(ValidationError::ZeroValue("tag".into()))
        );
        assert!(no_zero_values(&json!(0), "n").is_err());
        assert!(no_zero_values(&json!(false), "b").is_err());
    }

    #[test]
    fn test_validate_config_ok() {
        let config = json!({"tag": "web"});
        assert!(sample().validate_config(config.as_object().unwrap()).is_ok());
    }

    #[test]
    fn test_validate_config_reports_all_problems() {
        let config = json!({"items": [], "extra": 1});
        let errors = sample().validate_config(config.as_object().unwrap()).unwrap_err();
        assert!(errors.contains(&ValidationError::Required("tag".into())));
        assert!(errors.contains(&ValidationError::Computed("items".into())));
        assert!(errors.contains(&ValidationError::Unknown("extra".into())));
    }

    #[test]
    fn test_validate_config_empty_tag() {
        let config = json!({"tag": ""});
        let errors = sample().validate_config(config.as_object().unwrap()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ZeroValue("tag".into())]);
    }

    #[test]
    fn test_validate_config_wrong_type() {
        let config = json!({"tag": 5});
        let errors = sample().validate_config(config.as_object().unwrap()).unwrap_err();
        assert!(matches!(errors[0], ValidationError::Type { expected: ValueType::String, .. }));
    }

    #[test]
    fn test_check_value_normalises_sets() {
        let value = json!([{"name": "a", "disk": 25, "ids": ["b", "a", "b"]}]);
        let stored = sample().check_value("items", value).unwrap();
        assert_eq!(stored, json!([{"name": "a", "disk": 25, "ids": ["a", "b"]}]));
    }

    #[test]
    fn test_check_value_rejects_unknown_nested_key() {
        let value = json!([{"name": "a", "bogus": true}]);
        assert_eq!(
            sample().check_value("items", value),
            Err(StoreError::UnknownKey("items.0.bogus".into()))
        );
    }

    #[test]
    fn test_check_value_rejects_wrong_type() {
        let value = json!([{"disk": "big"}]);
        match sample().check_value("items", value) {
            Err(StoreError::Shape { path, expected, found }) => {
                assert_eq!(path, "items.0.disk");
                assert_eq!(expected, ValueType::Int);
                assert_eq!(found, "string");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_check_value_rejects_non_object_element() {
        let err = sample().check_value("items", json!(["web-1"])).unwrap_err();
        assert_eq!(
            err,
            StoreError::NotAnObject {
                path: "items.0".into(),
                found: "string",
            }
        );
        assert_eq!(err.to_string(), "items.0: expected object, got string");
    }

    #[test]
    fn test_check_value_unknown_top_level_key() {
        assert_eq!(
            sample().check_value("nope", json!(1)),
            Err(StoreError::UnknownKey("nope".into()))
        );
    }
}
