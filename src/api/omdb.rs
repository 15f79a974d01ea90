//! OMDb client: movie metadata by title.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::nullable_string;
use crate::utils::redact_query;
use crate::{log_debug, log_trace};

/// A movie as returned by `?t=<title>`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(rename = "Title", default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(rename = "Year", default, deserialize_with = "nullable_string")]
    pub year: String,
    #[serde(rename = "imdbRating", default, deserialize_with = "nullable_string")]
    pub imdb_rating: String,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    #[serde(rename = "Country", default, deserialize_with = "nullable_string")]
    pub country: String,
    #[serde(rename = "Language", default, deserialize_with = "nullable_string")]
    pub language: String,
    #[serde(rename = "Plot", default, deserialize_with = "nullable_string")]
    pub plot: String,
    #[serde(rename = "Actors", default, deserialize_with = "nullable_string")]
    pub actors: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Rating {
    #[serde(rename = "Source", default, deserialize_with = "nullable_string")]
    pub source: String,
    #[serde(rename = "Value", default, deserialize_with = "nullable_string")]
    pub value: String,
}

impl MovieRecord {
    /// Value of the first rating from `source`.
    pub fn rating_from(&self, source: &str) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.value.as_str())
    }
}

pub struct OmdbClient {
    client: Client,
    base: Url,
    api_key: String,
}

impl OmdbClient {
    pub fn new(client: Client, base: Url, api_key: &str) -> Self {
        Self {
            client,
            base,
            api_key: api_key.to_string(),
        }
    }

    pub fn request_url(&self, title: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("t", title)
            .append_pair("apikey", &self.api_key);
        url
    }

    /// Look a movie up by exact title.
    pub async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>> {
        let url = self.request_url(title);
        log_debug!("GET {}", redact_query(&url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("OMDb request failed")?;
        log_trace!("OMDb responded {}", response.status());

        if !response.status().is_success() {
            bail!("OMDb request failed with status {}", response.status());
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("OMDb returned an unreadable body")?;
        parse_movie(body)
    }
}

/// Interpret an OMDb body. Lookups that miss still come back as 200 with
/// `"Response": "False"` and an `Error` message.
pub fn parse_movie(body: serde_json::Value) -> Result<Option<MovieRecord>> {
    if body.is_null() {
        return Ok(None);
    }
    if body.get("Response").and_then(|v| v.as_str()) == Some("False") {
        let reason = body
            .get("Error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error");
        bail!("OMDb: {reason}");
    }
    let movie = serde_json::from_value(body).context("OMDb returned an unexpected movie shape")?;
    Ok(Some(movie))
}
