//! Spotify Web API client: client-credentials token + track search.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{endpoint, nullable_string};
use crate::utils::redact_query;
use crate::{log_debug, log_trace};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TrackRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(default)]
    pub popularity: u32,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ArtistRef {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AlbumRef {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<TrackRecord>,
}

pub struct SpotifyClient {
    client: Client,
    accounts_base: Url,
    api_base: Url,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl SpotifyClient {
    pub fn new(
        client: Client,
        accounts_base: Url,
        api_base: Url,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            client,
            accounts_base,
            api_base,
            client_id,
            client_secret,
        }
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        let Some(id) = self.client_id.as_deref().filter(|s| !s.is_empty()) else {
            bail!("Spotify client id not configured (set SPOTIFY_ID or spotify_id in the config file)");
        };
        let Some(secret) = self.client_secret.as_deref().filter(|s| !s.is_empty()) else {
            bail!("Spotify client secret not configured (set SPOTIFY_SECRET or spotify_secret in the config file)");
        };
        Ok((id, secret))
    }

    async fn access_token(&self) -> Result<String> {
        let (id, secret) = self.credentials()?;
        let url = endpoint(&self.accounts_base, &["api", "token"])?;
        log_debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .basic_auth(id, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Spotify token request failed")?;
        log_trace!("Spotify accounts responded {}", response.status());

        if !response.status().is_success() {
            bail!(
                "Spotify token request failed with status {}",
                response.status()
            );
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Spotify returned an unreadable token response")?;
        Ok(token.access_token)
    }

    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = endpoint(&self.api_base, &["v1", "search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "track");
        Ok(url)
    }

    /// Track candidates matching `query`, in Spotify's order.
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<TrackRecord>> {
        let token = self.access_token().await?;
        let url = self.search_url(query)?;
        log_debug!("GET {}", redact_query(&url));

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Spotify search request failed")?;
        log_trace!("Spotify search responded {}", response.status());

        if !response.status().is_success() {
            bail!("Spotify search failed with status {}", response.status());
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Spotify returned an unexpected search shape")?;
        Ok(body.tracks.map(|t| t.items).unwrap_or_default())
    }
}
