/// Shared schema and flattening for droplet tags
use std::collections::BTreeSet;

use crate::schema::{Elem, Schema, ValueType};

/// Computed set of tag names, as exposed by data sources.
pub fn tags_data_source_schema() -> Schema {
    Schema::new(ValueType::Set)
        .computed()
        .description("list of tags applied to the droplet")
        .elem(Elem::Schema(Box::new(Schema::new(ValueType::String))))
}

pub fn flatten_tags(tags: &[String]) -> BTreeSet<String> {
    tags.iter().cloned().collect()
}
