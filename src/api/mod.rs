// DigitalOcean API modules
pub mod client;
pub mod droplets;
pub mod error;
pub mod links;

// Re-export commonly used items
pub use client::{set_silent, ApiClient};
pub use droplets::{
    to_urn, Droplet, DropletsService, Image, ListOptions, NetworkV4, NetworkV6, Networks, Region,
    Size,
};
pub use error::{ApiError, LinksError};
pub use links::{Links, Meta, Pages, Response};
