/*!
extract.rs - pure formatting from collaborator records to display lines.

  movie_summary(Option<&MovieRecord>)   -> "Title: ..., Actors: ..."
  select_track(&[TrackRecord])          -> most popular candidate (first wins ties)
  track_summary(Option<&TrackRecord>)   -> "Artist: ..., Album: ..."
  venue_summary(Option<&VenueEvent>)    -> "Name of venue: ..., Date of Event: MM/DD/YYYY"

An absent record always formats to the empty string.
*/

use chrono::NaiveDateTime;

use crate::api::{MovieRecord, TrackRecord, VenueEvent};

/// Shown where a response omits a value the summary needs.
pub const NOT_AVAILABLE: &str = "N/A";

pub const ROTTEN_TOMATOES: &str = "Rotten Tomatoes";

const EVENT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const EVENT_DATE_DISPLAY: &str = "%m/%d/%Y";

pub fn movie_summary(movie: Option<&MovieRecord>) -> String {
    let Some(m) = movie else {
        return String::new();
    };
    let rotten = m.rating_from(ROTTEN_TOMATOES).unwrap_or(NOT_AVAILABLE);
    format!(
        "Title: {}, Year: {}, IMDB Rating: {}, Rotten Tomatoes Rating: {}, Produced in: {}, Language: {}, Plot: {}, Actors: {}",
        m.title, m.year, m.imdb_rating, rotten, m.country, m.language, m.plot, m.actors
    )
}

/// Pick the candidate with the strictly greatest popularity, scanning left to
/// right so the earliest of equally popular tracks is kept.
pub fn select_track(candidates: &[TrackRecord]) -> Option<&TrackRecord> {
    let (first, rest) = candidates.split_first()?;
    Some(rest.iter().fold(first, |best, current| {
        if current.popularity > best.popularity {
            current
        } else {
            best
        }
    }))
}

pub fn track_summary(track: Option<&TrackRecord>) -> String {
    let Some(t) = track else {
        return String::new();
    };
    let artist = t
        .artists
        .first()
        .map(|a| a.name.as_str())
        .unwrap_or(NOT_AVAILABLE);
    let preview = t.preview_url.as_deref().unwrap_or(NOT_AVAILABLE);
    format!(
        "Artist: {artist}, Song name: {}, Preview link: {preview}, Album: {}",
        t.name, t.album.name
    )
}

pub fn venue_summary(event: Option<&VenueEvent>) -> String {
    let Some(e) = event else {
        return String::new();
    };
    let v = &e.venue;
    format!(
        "Name of venue: {}, Location: {}, {}, {}, Date of Event: {}",
        v.name,
        v.city,
        v.region,
        v.country,
        format_event_date(&e.datetime)
    )
}

/// `2018-05-01T19:00:00` -> `05/01/2018`. Unparseable input renders as `Invalid date`.
pub fn format_event_date(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, EVENT_DATETIME_FORMAT) {
        Ok(dt) => dt.format(EVENT_DATE_DISPLAY).to_string(),
        Err(_) => "Invalid date".to_string(),
    }
}
