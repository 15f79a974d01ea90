/*!
Runtime settings.

Resolution order for every value:
  1. CLI flag
  2. environment variable
  3. config file (`--config PATH` or `LIRI_CONFIG`; `.yaml`/`.yml` parsed as YAML, anything else as JSON)
  4. built-in default

Environment variables:
  OMDB_API_KEY, BANDSINTOWN_APP_ID, SPOTIFY_ID, SPOTIFY_SECRET, LIRI_RANDOM_FILE,
  OMDB_BASE_URL, SPOTIFY_ACCOUNTS_URL, SPOTIFY_API_URL, BANDSINTOWN_BASE_URL, LIRI_CONFIG

Config file keys are the snake_case field names of `FileConfig`; unknown keys are rejected.
*/

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_OMDB_API_KEY: &str = "706d5031";
pub const DEFAULT_BANDSINTOWN_APP_ID: &str = "codingbootcamp";
pub const DEFAULT_RANDOM_FILE: &str = "random.txt";

pub const DEFAULT_OMDB_BASE: &str = "http://www.omdbapi.com/";
pub const DEFAULT_SPOTIFY_ACCOUNTS_BASE: &str = "https://accounts.spotify.com/";
pub const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/";
pub const DEFAULT_BANDSINTOWN_BASE: &str = "https://rest.bandsintown.com/";

/// Values supplied on the command line (all optional).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub random_file: Option<PathBuf>,
    pub omdb_api_key: Option<String>,
    pub bandsintown_app_id: Option<String>,
}

/// On-disk config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub omdb_api_key: Option<String>,
    pub bandsintown_app_id: Option<String>,
    pub spotify_id: Option<String>,
    pub spotify_secret: Option<String>,
    pub random_file: Option<PathBuf>,
    pub omdb_base_url: Option<String>,
    pub spotify_accounts_url: Option<String>,
    pub spotify_api_url: Option<String>,
    pub bandsintown_base_url: Option<String>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub omdb_api_key: String,
    pub bandsintown_app_id: String,
    pub spotify_id: Option<String>,
    pub spotify_secret: Option<String>,
    pub random_file: PathBuf,
    pub omdb_base: Url,
    pub spotify_accounts_base: Url,
    pub spotify_api_base: Url,
    pub bandsintown_base: Url,
}

impl Settings {
    /// Resolve against the process environment.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an injectable environment lookup. Empty or blank
    /// environment values count as unset.
    pub fn resolve(overrides: &Overrides, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let config_path = overrides
            .config
            .clone()
            .or_else(|| env("LIRI_CONFIG").map(PathBuf::from));
        let file = match &config_path {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };

        let pick = |cli: Option<String>, var: &str, from_file: Option<String>| {
            cli.or_else(|| env(var)).or(from_file)
        };

        let omdb_api_key = pick(
            overrides.omdb_api_key.clone(),
            "OMDB_API_KEY",
            file.omdb_api_key,
        )
        .unwrap_or_else(|| DEFAULT_OMDB_API_KEY.to_string());

        let bandsintown_app_id = pick(
            overrides.bandsintown_app_id.clone(),
            "BANDSINTOWN_APP_ID",
            file.bandsintown_app_id,
        )
        .unwrap_or_else(|| DEFAULT_BANDSINTOWN_APP_ID.to_string());

        let random_file = overrides
            .random_file
            .clone()
            .or_else(|| env("LIRI_RANDOM_FILE").map(PathBuf::from))
            .or(file.random_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RANDOM_FILE));

        Ok(Settings {
            omdb_api_key,
            bandsintown_app_id,
            spotify_id: env("SPOTIFY_ID").or(file.spotify_id),
            spotify_secret: env("SPOTIFY_SECRET").or(file.spotify_secret),
            random_file,
            omdb_base: base_url(
                env("OMDB_BASE_URL").or(file.omdb_base_url),
                DEFAULT_OMDB_BASE,
            )?,
            spotify_accounts_base: base_url(
                env("SPOTIFY_ACCOUNTS_URL").or(file.spotify_accounts_url),
                DEFAULT_SPOTIFY_ACCOUNTS_BASE,
            )?,
            spotify_api_base: base_url(
                env("SPOTIFY_API_URL").or(file.spotify_api_url),
                DEFAULT_SPOTIFY_API_BASE,
            )?,
            bandsintown_base: base_url(
                env("BANDSINTOWN_BASE_URL").or(file.bandsintown_base_url),
                DEFAULT_BANDSINTOWN_BASE,
            )?,
        })
    }
}

fn base_url(raw: Option<String>, default: &str) -> Result<Url> {
    let raw = raw.as_deref().unwrap_or(default);
    let url = Url::parse(raw).with_context(|| format!("invalid base URL: '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("unsupported URL scheme '{other}' in '{raw}'")),
    }
}

/// Read a YAML or JSON config file (chosen by extension).
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let lower = path.to_string_lossy().to_ascii_lowercase();

    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        serde_yaml::from_str(&raw).context("failed to parse YAML config file")
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON config file")
    }
}
