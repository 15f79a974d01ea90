//! Bands in Town client: upcoming events for an artist.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{endpoint, nullable_string};
use crate::utils::redact_query;
use crate::{log_debug, log_trace};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct VenueEvent {
    #[serde(default)]
    pub venue: Venue,
    /// Local start time, `YYYY-MM-DDTHH:mm:ss`.
    #[serde(default, deserialize_with = "nullable_string")]
    pub datetime: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Venue {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub city: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub region: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub country: String,
}

pub struct BandsintownClient {
    client: Client,
    base: Url,
    app_id: String,
}

impl BandsintownClient {
    pub fn new(client: Client, base: Url, app_id: &str) -> Self {
        Self {
            client,
            base,
            app_id: app_id.to_string(),
        }
    }

    pub fn events_url(&self, artist: &str) -> Result<Url> {
        let mut url = endpoint(&self.base, &["artists", artist, "events"])?;
        url.query_pairs_mut().append_pair("app_id", &self.app_id);
        Ok(url)
    }

    pub async fn artist_events(&self, artist: &str) -> Result<Vec<Option<VenueEvent>>> {
        let url = self.events_url(artist)?;
        log_debug!("GET {}", redact_query(&url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Bands in Town request failed")?;
        log_trace!("Bands in Town responded {}", response.status());

        if !response.status().is_success() {
            bail!(
                "Bands in Town request failed with status {}",
                response.status()
            );
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Bands in Town returned an unreadable body")?;
        parse_events(body)
    }
}

/// The event list is a JSON array; errors come back as an object carrying
/// `errorMessage` even on 200.
pub fn parse_events(body: serde_json::Value) -> Result<Vec<Option<VenueEvent>>> {
    if !body.is_array() {
        let reason = body
            .get("errorMessage")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string());
        bail!("Bands in Town: {reason}");
    }
    serde_json::from_value(body).context("Bands in Town returned an unexpected event shape")
}
