use std::collections::BTreeSet;

use serde::Serialize;

/// One flattened droplet, shaped like an element of the `droplets` output list.
///
/// Optional fields are left out of the serialized record when absent: a
/// missing `backups` means the API reported no feature list, which is not
/// the same as `backups = false`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DropletRecord {
    pub name: String,
    pub urn: String,
    pub region: String,
    pub image: String,
    pub size: String,
    pub disk: i64,
    pub vcpus: i64,
    pub memory: i64,
    pub price_hourly: f64,
    pub price_monthly: f64,
    pub status: String,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_address_private: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_address_private: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backups: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_networking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<bool>,
    pub volume_ids: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}
