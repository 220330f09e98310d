// Identifier utilities
pub mod unique_id;

// JSON utilities
pub mod json_converter;

// Re-export all utilities for convenient access
pub use unique_id::{prefixed_unique_id, unique_id, UNIQUE_ID_PREFIX};
pub use json_converter::{value_to_cell, value_to_short_string, EMPTY_CELL};
