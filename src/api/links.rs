/// Pagination metadata returned alongside list responses
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::LinksError;

/// Links block of a list response
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Links {
    #[serde(default)]
    pub pages: Option<Pages>,
}

/// Absolute URLs of the neighbouring pages. Missing links are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Pages {
    pub first: String,
    pub prev: String,
    pub last: String,
    pub next: String,
}

/// Meta block of a list response
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Meta {
    pub total: u64,
}

/// Everything besides the payload that a list call hands back
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Response {
    #[serde(default)]
    pub links: Option<Links>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl Links {
    /// Whether this is the last page of results.
    pub fn is_last_page(&self) -> bool {
        match &self.pages {
            None => true,
            Some(pages) => pages.next.is_empty(),
        }
    }

    /// Page number of the response these links came with.
    ///
    /// The API only links to neighbours, so the current page is derived from
    /// the `prev` link: one past it, or 1 when there is no previous page.
    ///
    /// ```
    /// use droplets::api::{Links, Pages};
    ///
    /// let links = Links {
    ///     pages: Some(Pages {
    ///         prev: "https://api.digitalocean.com/v2/droplets?page=2&per_page=200".into(),
    ///         next: "https://api.digitalocean.com/v2/droplets?page=4&per_page=200".into(),
    ///         ..Default::default()
    ///     }),
    /// };
    /// assert_eq!(links.current_page().unwrap(), 3);
    /// ```
    pub fn current_page(&self) -> Result<u64, LinksError> {
        let pages = match &self.pages {
            None => return Ok(1),
            Some(pages) => pages,
        };
        if !pages.prev.is_empty() {
            let prev = page_for_url(&pages.prev)?;
            return prev.checked_add(1).ok_or(LinksError::PageOverflow(prev));
        }
        Ok(1)
    }
}

/// Read the `page` query parameter out of a page link
pub fn page_for_url(raw: &str) -> Result<u64, LinksError> {
    let url = Url::parse(raw).map_err(|source| LinksError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    let value = url
        .query_pairs()
        .find(|(k, _)| k == "page")
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| LinksError::MissingPage(raw.to_string()))?;
    value.parse::<u64>().map_err(|source| LinksError::InvalidPage {
        url: raw.to_string(),
        value,
        source,
    })
}
