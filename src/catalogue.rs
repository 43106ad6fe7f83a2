use std::time::Duration;

use anyhow::Context as _;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::CatalogueProfile;
use crate::document::StructuredDocument;

/// Successful catalogue lookup: the record plus the author/title short code
/// the catalogue computed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueHit {
    pub document: StructuredDocument,
    #[serde(default)]
    pub title_short_code: String,
}

pub trait CatalogueClient {
    /// `Ok(None)` means the catalogue answered but has no record for the
    /// identifier; `Err` covers transport, decoding and profile problems.
    fn lookup(
        &self,
        identifier: &str,
        profile: &CatalogueProfile,
    ) -> anyhow::Result<Option<CatalogueHit>>;
}

impl<C: CatalogueClient + ?Sized> CatalogueClient for &C {
    fn lookup(
        &self,
        identifier: &str,
        profile: &CatalogueProfile,
    ) -> anyhow::Result<Option<CatalogueHit>> {
        (**self).lookup(identifier, profile)
    }
}

#[derive(Debug, Clone)]
pub struct HttpCatalogueClient {
    client: reqwest::blocking::Client,
}

impl HttpCatalogueClient {
    pub fn new(profile: &CatalogueProfile) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(profile.timeout_secs.max(1)))
            .build()
            .context("build catalogue http client")?;
        Ok(Self { client })
    }
}

impl CatalogueClient for HttpCatalogueClient {
    fn lookup(
        &self,
        identifier: &str,
        profile: &CatalogueProfile,
    ) -> anyhow::Result<Option<CatalogueHit>> {
        let endpoint = record_endpoint(profile, identifier)?;
        tracing::debug!(%endpoint, "catalogue lookup");

        let response = self
            .client
            .get(endpoint.clone())
            .header(USER_AGENT, concat!("catalogue-import/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .with_context(|| format!("GET {endpoint}"))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let raw = response.text().context("read catalogue response body")?;
        if !status.is_success() {
            anyhow::bail!("catalogue {} error ({status}): {}", profile.name, raw.trim());
        }
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(None);
        }

        let hit: CatalogueHit =
            serde_json::from_str(&raw).context("parse catalogue response")?;
        Ok(Some(hit))
    }
}

/// `{base_url}/{profile}/records/{identifier}?field={search_field}`
pub fn record_endpoint(profile: &CatalogueProfile, identifier: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(&profile.base_url)
        .with_context(|| format!("parse catalogue base url: {}", profile.base_url))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("catalogue base url must be http/https: {url}");
    }
    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("catalogue base url cannot be a base: {}", profile.base_url))?
        .pop_if_empty()
        .extend([profile.name.as_str(), "records", identifier]);
    url.query_pairs_mut()
        .append_pair("field", &profile.search_field);
    Ok(url)
}
