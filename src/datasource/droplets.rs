use super::error::DataSourceError;
use super::flatten::flatten_droplets;
use crate::api::{ApiError, Droplet, DropletsService, LinksError, ListOptions};
use crate::resource_data::{OutputStore, ResourceData};
use crate::schema::{no_zero_values, Elem, Resource, Schema, ValueType};
use crate::tags::tags_data_source_schema;
use crate::utils::unique_id;

/// Page size requested from the API; the largest it allows.
pub const DROPLETS_PER_PAGE: u64 = 200;

fn computed(ty: ValueType, description: &'static str) -> Schema {
    Schema::new(ty).computed().description(description)
}

/// Schema of the droplets-by-tag data source.
pub fn droplets_data_source_schema() -> Resource {
    let droplet = Resource::new([
        ("name", computed(ValueType::String, "name of the droplet")),
        ("urn", computed(ValueType::String, "the uniform resource name for the Droplet")),
        ("region", computed(ValueType::String, "the region that the droplet instance is deployed in")),
        ("image", computed(ValueType::String, "the image id or slug of the Droplet")),
        ("size", computed(ValueType::String, "the current size of the Droplet")),
        ("disk", computed(ValueType::Int, "the size of the droplets disk in gigabytes")),
        ("vcpus", computed(ValueType::Int, "the number of virtual cpus")),
        ("memory", computed(ValueType::Int, "memory of the droplet in megabytes")),
        ("price_hourly", computed(ValueType::Float, "the droplets hourly price")),
        ("price_monthly", computed(ValueType::Float, "the droplets monthly price")),
        ("status", computed(ValueType::String, "state of the droplet instance")),
        ("locked", computed(ValueType::Bool, "whether the droplet has been locked")),
        ("ipv4_address", computed(ValueType::String, "the droplets public ipv4 address")),
        ("ipv4_address_private", computed(ValueType::String, "the droplets private ipv4 address")),
        ("ipv6_address", computed(ValueType::String, "the droplets public ipv6 address")),
        ("ipv6_address_private", computed(ValueType::String, "the droplets private ipv6 address")),
        ("backups", computed(ValueType::Bool, "whether the droplet has backups enabled")),
        ("ipv6", computed(ValueType::Bool, "whether the droplet has ipv6 enabled")),
        ("private_networking", computed(ValueType::Bool, "whether the droplet has private networking enabled")),
        ("monitoring", computed(ValueType::Bool, "whether the droplet has monitoring enabled")),
        (
            "volume_ids",
            computed(ValueType::Set, "list of volumes attached to the droplet")
                .elem(Elem::Schema(Box::new(Schema::new(ValueType::String)))),
        ),
        ("tags", tags_data_source_schema()),
    ]);

    Resource::new([
        (
            "tag",
            Schema::new(ValueType::String)
                .required()
                .description("tag associated to the droplets")
                .validate(no_zero_values),
        ),
        (
            "droplets",
            computed(ValueType::List, "List of droplet that match the tag").elem(Elem::Resource(droplet)),
        ),
    ])
}

/// Collect every droplet tagged `tag`, following pagination until the last page.
///
/// Pages are requested one after another. The first failure aborts the whole
/// fetch and whatever was collected so far is dropped.
pub async fn fetch_droplets<S>(service: &S, tag: &str) -> Result<Vec<Droplet>, DataSourceError>
where
    S: DropletsService + ?Sized,
{
    let mut opts = ListOptions {
        page: 1,
        per_page: DROPLETS_PER_PAGE,
    };
    let mut droplet_list = Vec::new();

    loop {
        let (droplets, resp) = service
            .list_by_tag(tag, &opts)
            .await
            .map_err(DataSourceError::Retrieve)?;
        tracing::debug!(tag, page = opts.page, count = droplets.len(), "fetched droplets page");
        droplet_list.extend(droplets);

        let links = match resp.links {
            Some(links) if !links.is_last_page() => links,
            _ => break,
        };

        let page = links
            .current_page()
            .map_err(|e| DataSourceError::Retrieve(ApiError::Pagination(e)))?;
        opts.page = page.checked_add(1).ok_or_else(|| {
            DataSourceError::Retrieve(ApiError::Pagination(LinksError::PageOverflow(page)))
        })?;
    }

    Ok(droplet_list)
}

/// Fetch droplets tagged `tag`, flatten them and write them to `store` under `droplets`.
///
/// Nothing is written when the fetch fails. A failed write is returned as is.
pub async fn read_droplets_by_tag<S, O>(service: &S, tag: &str, store: &mut O) -> Result<(), DataSourceError>
where
    S: DropletsService + ?Sized,
    O: OutputStore + ?Sized,
{
    let droplets = match fetch_droplets(service, tag).await {
        Ok(droplets) => droplets,
        Err(e) => {
            tracing::error!(%e, tag, "Failed to read droplets");
            return Err(e);
        }
    };
    let records = flatten_droplets(&droplets);
    tracing::info!(tag, count = records.len(), "Read droplets by tag");

    let value = serde_json::to_value(&records)?;
    store.set_id(unique_id());
    store.set("droplets", value)?;
    Ok(())
}

/// Validate `data`'s configuration, then read droplets for its `tag`.
pub async fn read_droplets<S>(service: &S, data: &mut ResourceData) -> Result<(), DataSourceError>
where
    S: DropletsService + ?Sized,
{
    data.validate_config().map_err(DataSourceError::InvalidConfig)?;
    let tag = data.config_str("tag").unwrap_or_default().to_string();
    read_droplets_by_tag(service, &tag, data).await
}
