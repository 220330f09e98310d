//! Read-only data sources backed by the DigitalOcean API.

mod error;
pub mod droplets;
pub mod flatten;

pub use error::DataSourceError;
pub use droplets::{
    droplets_data_source_schema, fetch_droplets, read_droplets, read_droplets_by_tag,
    DROPLETS_PER_PAGE,
};
pub use flatten::{flatten_droplet, flatten_droplets};
