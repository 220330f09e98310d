/// Output store a data source writes its results into
use serde_json::{Map, Value};

use crate::schema::{Resource, StoreError, ValidationError};

/// What a data source read needs from the host's state.
pub trait OutputStore {
    /// Assign the identifier of the snapshot being written.
    fn set_id(&mut self, id: String);

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Schema-checked configuration and state for a single data source read.
#[derive(Clone, Debug)]
pub struct ResourceData {
    schema: Resource,
    id: Option<String>,
    config: Map<String, Value>,
    state: Map<String, Value>,
}

impl ResourceData {
    pub fn new(schema: Resource) -> Self {
        Self {
            schema,
            id: None,
            config: Map::new(),
            state: Map::new(),
        }
    }

    pub fn set_config(&mut self, key: &str, value: Value) {
        self.config.insert(key.to_string(), value);
    }

    pub fn validate_config(&self) -> Result<(), Vec<ValidationError>> {
        self.schema.validate_config(&self.config)
    }

    /// Configured string value, if the key is set to a string.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Stored value, falling back to configuration.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key).or_else(|| self.config.get(key))
    }
}

impl OutputStore for ResourceData {
    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let value = self.schema.check_value(key, value)?;
        self.state.insert(key.to_string(), value);
        Ok(())
    }
}
