//! Snipe-IT implementation of the inventory client.
//!
//! Talks to the Snipe-IT REST API (`<base_url>api/v1/`) with a static bearer
//! token, and turns its JSON payloads into [`AssetSummary`] values.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::base::{
    config::Config,
    types::{AssetStatus, AssetSummary, Lookup, LookupError, LookupResult, Res},
};

use super::{GenericInventoryClient, InventoryClient};

// Extra methods on `InventoryClient` applied by the snipe-it implementation.

impl InventoryClient {
    /// Creates a new Snipe-IT inventory client.
    pub fn snipeit(config: &Config) -> Res<Self> {
        let client = SnipeItInventoryClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Payloads.

/// A paged list response, as returned by the search endpoints.
#[derive(Debug, Deserialize)]
struct Rows<T> {
    #[serde(default)]
    total: u64,
    #[serde(default = "Vec::new")]
    rows: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SnipeUser {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SnipeNamed {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnipeStatusLabel {
    status_meta: String,
}

#[derive(Debug, Deserialize)]
struct SnipeAsset {
    id: u64,
    asset_tag: Option<String>,
    serial: Option<String>,
    model: Option<SnipeNamed>,
    status_label: Option<SnipeStatusLabel>,
    assigned_to: Option<SnipeNamed>,
}

// Specific implementations.

/// Snipe-IT inventory client implementation.
#[derive(Clone)]
pub struct SnipeItInventoryClient {
    http: reqwest::Client,
    base_url: String,
    api_base: Url,
}

impl SnipeItInventoryClient {
    /// Create a new Snipe-IT inventory client.
    #[instrument(name = "SnipeItInventoryClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        // Compute headers.

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.snipe_it.api_token))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Build client.

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.snipe_it.request_timeout_secs))
            .build()?;

        let base_url = config.snipe_it.base_url.clone();
        let api_base = Url::parse(&base_url)?.join("api/v1/")?;
        if api_base.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Snipe-IT base URL `{}` cannot hold API paths.", base_url));
        }

        info!("Snipe-IT API base: {}", api_base);

        Ok(Self { http, base_url, api_base })
    }

    /// Build the URL for an API endpoint, percent-encoding each segment.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    /// Issue a GET against an API endpoint and return its JSON body.
    #[instrument(skip(self))]
    async fn get_json(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Value, LookupError> {
        let endpoint = segments.join("/");
        let url = self.endpoint_url(segments);

        let response = self.http.get(url).query(query).send().await.map_err(|e| request_error(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            error!(endpoint = %endpoint, status = status.as_u16(), "Snipe-IT returned a non-success status.");
            return Err(LookupError::Status { endpoint, status: status.as_u16() });
        }

        debug!(endpoint = %endpoint, status = status.as_u16(), "Snipe-IT responded.");

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout { endpoint: endpoint.clone() }
            } else {
                LookupError::Shape { endpoint: endpoint.clone(), detail: format!("body is not JSON: {e}") }
            }
        })
    }
}

#[async_trait]
impl GenericInventoryClient for SnipeItInventoryClient {
    #[instrument(skip(self))]
    async fn lookup_user_assets(&self, username: &str) -> LookupResult {
        let search = self.get_json(&["users"], &[("search", username), ("limit", "1"), ("sort", "username"), ("order", "desc")]).await?;

        let Some(user) = parse_user_search(search)? else {
            info!("No user matched `{}`.", username);
            return Ok(Lookup::NotFound);
        };

        debug!("Matched user `{}` with ID {}.", user.name, user.id);

        let user_id = user.id.to_string();
        let endpoint = format!("users/{user_id}/assets");
        let assets = self.get_json(&["users", user_id.as_str(), "assets"], &[]).await?;

        let rows = parse_rows(assets, &endpoint)?;
        let assets = rows.rows.into_iter().map(|a| summarize(a, &self.base_url, &endpoint)).collect::<Result<Vec<_>, _>>()?;

        Ok(Lookup::UserAssets {
            user_name: user.name,
            total: rows.total,
            assets,
        })
    }

    #[instrument(skip(self))]
    async fn lookup_asset_by_serial(&self, serial: &str) -> LookupResult {
        let endpoint = format!("hardware/byserial/{serial}");
        let value = self.get_json(&["hardware", "byserial", serial], &[]).await?;

        parse_serial_lookup(value, &self.base_url, &endpoint)
    }

    #[instrument(skip(self))]
    async fn lookup_asset_by_tag(&self, tag: &str) -> LookupResult {
        let endpoint = format!("hardware/bytag/{tag}");
        let value = self.get_json(&["hardware", "bytag", tag], &[]).await?;

        parse_tag_lookup(value, &self.base_url, &endpoint)
    }
}

// Helpers.

/// Map a `reqwest` error to the lookup error taxonomy.
fn request_error(endpoint: &str, e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout { endpoint: endpoint.to_string() }
    } else {
        LookupError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    }
}

fn shape_error(endpoint: &str, detail: impl Into<String>) -> LookupError {
    LookupError::Shape {
        endpoint: endpoint.to_string(),
        detail: detail.into(),
    }
}

/// Snipe-IT reports some misses as `{"status": "error", "messages": ...}` with a 200.
fn is_error_payload(value: &Value) -> bool {
    value.get("status").and_then(Value::as_str) == Some("error")
}

/// Take the first user from a `users` search, if any.
fn parse_user_search(value: Value) -> Result<Option<SnipeUser>, LookupError> {
    let rows: Rows<SnipeUser> = serde_json::from_value(value).map_err(|e| shape_error("users", e.to_string()))?;

    if rows.total == 0 {
        return Ok(None);
    }

    Ok(rows.rows.into_iter().next())
}

fn parse_rows(value: Value, endpoint: &str) -> Result<Rows<SnipeAsset>, LookupError> {
    serde_json::from_value(value).map_err(|e| shape_error(endpoint, e.to_string()))
}

fn parse_serial_lookup(value: Value, base_url: &str, endpoint: &str) -> LookupResult {
    if is_error_payload(&value) {
        return Ok(Lookup::NotFound);
    }

    let rows = parse_rows(value, endpoint)?;
    if rows.total == 0 || rows.rows.is_empty() {
        return Ok(Lookup::NotFound);
    }

    let assets = rows.rows.into_iter().map(|a| summarize(a, base_url, endpoint)).collect::<Result<Vec<_>, _>>()?;

    Ok(Lookup::BySerial(assets))
}

fn parse_tag_lookup(value: Value, base_url: &str, endpoint: &str) -> LookupResult {
    if value.get("id").is_none() {
        return Ok(Lookup::NotFound);
    }

    let asset: SnipeAsset = serde_json::from_value(value).map_err(|e| shape_error(endpoint, e.to_string()))?;

    Ok(Lookup::ByTag(summarize(asset, base_url, endpoint)?))
}

/// Pluck the reply fields out of an asset row.
fn summarize(asset: SnipeAsset, base_url: &str, endpoint: &str) -> Result<AssetSummary, LookupError> {
    let id = asset.id;

    let model_name = asset
        .model
        .and_then(|m| m.name)
        .ok_or_else(|| shape_error(endpoint, format!("asset {id} has no model name")))?;

    let status = asset
        .status_label
        .map(|s| AssetStatus::from_meta(&s.status_meta))
        .ok_or_else(|| shape_error(endpoint, format!("asset {id} has no status label")))?;

    let assigned_to_name = asset.assigned_to.and_then(|a| a.name);

    if status == AssetStatus::Deployed && assigned_to_name.is_none() {
        return Err(shape_error(endpoint, format!("asset {id} is deployed but has no assignee")));
    }

    Ok(AssetSummary {
        id,
        asset_tag: asset.asset_tag.unwrap_or_default(),
        serial: asset.serial.unwrap_or_default(),
        model_name,
        status,
        assigned_to_name,
        link: format!("{base_url}hardware/{id}"),
    })
}

// Tests.
