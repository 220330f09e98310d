use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::links::{Links, Meta, Response};

pub const DROPLETS_ENDPOINT: &str = "/v2/droplets";

/// Paging parameters for list calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page: u64,
    pub per_page: u64,
}

/// A droplet as returned by the compute API
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    pub memory: i64,
    pub vcpus: i64,
    pub disk: i64,
    pub region: Region,
    pub image: Image,
    pub size: Size,
    pub size_slug: String,
    pub status: String,
    pub locked: bool,
    /// `None` when the API sends `null` or omits the list
    pub features: Option<Vec<String>>,
    pub volume_ids: Vec<String>,
    pub tags: Vec<String>,
    pub networks: Networks,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Region {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Image {
    pub id: i64,
    pub name: String,
    pub distribution: String,
    /// Snapshots and custom images come back with a null slug
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Size {
    pub slug: String,
    pub memory: i64,
    pub vcpus: i64,
    pub disk: i64,
    pub price_monthly: f64,
    pub price_hourly: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Networks {
    pub v4: Vec<NetworkV4>,
    pub v6: Vec<NetworkV6>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkV4 {
    pub ip_address: String,
    pub netmask: String,
    pub gateway: String,
    /// "public" or "private"
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkV6 {
    pub ip_address: String,
    pub netmask: i64,
    pub gateway: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Image {
    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or("")
    }
}

impl Droplet {
    /// Uniform resource name, e.g. `do:droplet:3164444`
    pub fn urn(&self) -> String {
        to_urn("Droplet", self.id)
    }
}

pub fn to_urn(resource_type: &str, id: impl std::fmt::Display) -> String {
    format!("do:{}:{}", resource_type.to_lowercase(), id)
}

/// Wire shape of `GET /v2/droplets`
#[derive(Debug, Deserialize)]
struct DropletsRoot {
    #[serde(default)]
    droplets: Vec<Droplet>,
    #[serde(default)]
    links: Option<Links>,
    #[serde(default)]
    meta: Option<Meta>,
}

/// The slice of the droplets API the lookup depends on
#[async_trait]
pub trait DropletsService: Send + Sync {
    /// List one page of droplets carrying `tag`.
    async fn list_by_tag(
        &self,
        tag: &str,
        opts: &ListOptions,
    ) -> Result<(Vec<Droplet>, Response), ApiError>;
}

#[async_trait]
impl DropletsService for ApiClient {
    async fn list_by_tag(
        &self,
        tag: &str,
        opts: &ListOptions,
    ) -> Result<(Vec<Droplet>, Response), ApiError> {
        let params = vec![
            ("tag_name".to_string(), tag.to_string()),
            ("page".to_string(), opts.page.to_string()),
            ("per_page".to_string(), opts.per_page.to_string()),
        ];
        let root: DropletsRoot = self.get(DROPLETS_ENDPOINT, &params).await?;
        Ok((
            root.droplets,
            Response {
                links: root.links,
                meta: root.meta,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urn() {
        let droplet = Droplet { id: 3164444, ..Default::default() };
        assert_eq!(droplet.urn(), "do:droplet:3164444");
        assert_eq!(to_urn("Volume", "abc-123"), "do:volume:abc-123");
    }

    #[test]
    fn test_deserialize_snapshot_image_and_null_features() {
        let body = r#"{
            "id": 7,
            "name": "db-1",
            "image": {"id": 12345, "slug": null, "name": "backup"},
            "features": null,
            "networks": {"v4": [{"ip_address": "10.0.0.5", "type": "private"}]},
            "unknown_field": true
        }"#;
        let droplet: Droplet = serde_json::from_str(body).unwrap();
        assert_eq!(droplet.image.slug(), "");
        assert_eq!(droplet.image.id, 12345);
        assert_eq!(droplet.features, None);
        assert_eq!(droplet.networks.v4[0].kind, "private");
        assert!(droplet.networks.v6.is_empty());
    }

    #[test]
    fn test_deserialize_empty_features_list() {
        let droplet: Droplet = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert_eq!(droplet.features, Some(vec![]));
    }
}
