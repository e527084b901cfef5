//! Device position lookup.
//!
//! A position query is one async call that either yields a coordinate or says
//! why it could not (denied, unsupported, lookup failure).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{error::LocationError, model::GeoCoordinate};

pub const DEFAULT_IP_LOCATOR_URL: &str = "https://ipapi.co";

#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<GeoCoordinate, LocationError>;
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocator {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_IP_LOCATOR_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<GeoCoordinate, LocationError> {
        let url = format!("{}/json/", self.base_url);
        let res = self.http.get(&url).send().await?;

        let status = res.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "IP lookup returned status {status}"
            )));
        }

        let body: IpLookupResponse = res.json().await?;
        if body.error {
            return Err(LocationError::Unavailable(
                body.reason.unwrap_or_else(|| "IP lookup rejected".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lon)) => Ok(GeoCoordinate::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                "IP lookup returned no coordinates".to_string(),
            )),
        }
    }
}

/// Always answers with the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub GeoCoordinate);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<GeoCoordinate, LocationError> {
        Ok(self.0)
    }
}

/// For environments with no way to determine a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLocator;

#[async_trait]
impl Locator for UnsupportedLocator {
    async fn locate(&self) -> Result<GeoCoordinate, LocationError> {
        Err(LocationError::Unsupported)
    }
}
