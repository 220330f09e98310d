//! Tag-scoped droplet lookup for the DigitalOcean API.
//!
//! Given a tag, [`datasource::read_droplets_by_tag`] pages through every
//! droplet carrying that tag, flattens each one into a [`models::DropletRecord`]
//! and writes the list into an [`resource_data::OutputStore`] under `droplets`.
//!
//! ```no_run
//! use droplets::config::Config;
//! use droplets::datasource::{droplets_data_source_schema, read_droplets};
//! use droplets::resource_data::ResourceData;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Config::from_env().client()?;
//! let mut data = ResourceData::new(droplets_data_source_schema());
//! data.set_config("tag", serde_json::json!("web"));
//! read_droplets(&client, &mut data).await?;
//! println!("{}", data.get("droplets").unwrap());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod datasource;
pub mod models;
pub mod resource_data;
pub mod schema;
pub mod tags;
pub mod utils;
