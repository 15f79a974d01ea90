//! External collaborators: the three web services `liri` reads from.
//!
//! Collaborators -> trait the dispatcher is generic over
//! HttpCollaborators -> reqwest-backed implementation (OMDb, Spotify, Bands in Town)
//! Records: MovieRecord / TrackRecord / VenueEvent (serde models of the responses)

pub mod bandsintown;
pub mod omdb;
pub mod spotify;

use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::config::Settings;

pub use bandsintown::{BandsintownClient, VenueEvent};
pub use omdb::{MovieRecord, OmdbClient};
pub use spotify::{SpotifyClient, TrackRecord};

/// The calls a command can make. Exactly one is awaited per invocation.
#[allow(async_fn_in_trait)]
pub trait Collaborators {
    /// Movie metadata by title. `None` when the service answered with an empty record.
    async fn movie(&self, title: &str) -> Result<Option<MovieRecord>>;

    /// Track candidates for a free-text query.
    async fn tracks(&self, query: &str) -> Result<Vec<TrackRecord>>;

    /// Upcoming events for an artist, in service order. Entries may be null.
    async fn events(&self, artist: &str) -> Result<Vec<Option<VenueEvent>>>;
}

/// Live implementation sharing one HTTP client across the three services.
pub struct HttpCollaborators {
    omdb: OmdbClient,
    spotify: SpotifyClient,
    bandsintown: BandsintownClient,
}

impl HttpCollaborators {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("liri/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            omdb: OmdbClient::new(
                client.clone(),
                settings.omdb_base.clone(),
                &settings.omdb_api_key,
            ),
            spotify: SpotifyClient::new(
                client.clone(),
                settings.spotify_accounts_base.clone(),
                settings.spotify_api_base.clone(),
                settings.spotify_id.clone(),
                settings.spotify_secret.clone(),
            ),
            bandsintown: BandsintownClient::new(
                client,
                settings.bandsintown_base.clone(),
                &settings.bandsintown_app_id,
            ),
        })
    }
}

impl Collaborators for HttpCollaborators {
    async fn movie(&self, title: &str) -> Result<Option<MovieRecord>> {
        self.omdb.find_by_title(title).await
    }

    async fn tracks(&self, query: &str) -> Result<Vec<TrackRecord>> {
        self.spotify.search_tracks(query).await
    }

    async fn events(&self, artist: &str) -> Result<Vec<Option<VenueEvent>>> {
        self.bandsintown.artist_events(artist).await
    }
}

/// Append path segments (each percent-encoded as a single segment) to a base URL.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("base URL cannot carry a path: {base}"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Deserialize a string that may be `null` as an empty string.
pub(crate) fn nullable_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let base = Url::parse("https://api.spotify.com/").unwrap();
        let url = endpoint(&base, &["v1", "search"]).unwrap();
        assert_eq!(url.as_str(), "https://api.spotify.com/v1/search");
    }

    #[test]
    fn endpoint_keeps_existing_prefix() {
        let base = Url::parse("http://127.0.0.1:8080/mock/").unwrap();
        let url = endpoint(&base, &["artists", "x", "events"]).unwrap();
        assert_eq!(url.path(), "/mock/artists/x/events");
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let base = Url::parse("https://rest.bandsintown.com").unwrap();
        let url = endpoint(&base, &["artists", "AC/DC", "events"]).unwrap();
        assert_eq!(url.path(), "/artists/AC%2FDC/events");
    }

    #[test]
    fn endpoint_rejects_cannot_be_a_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(endpoint(&base, &["x"]).is_err());
    }
}
