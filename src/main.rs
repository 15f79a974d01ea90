use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod cmd;
mod config;
mod utils;

use config::{Overrides, Settings};

/// LIRI - Language Interpretation and Recognition Interface for the terminal.
///
/// Layout:
///   liri [FLAGS] concert-this <artist>
///   liri [FLAGS] spotify-this-song [<song>]
///   liri [FLAGS] movie-this [<movie>]
///   liri [FLAGS] do-what-it-says
///
/// Flags go before the command; every word after the command is treated as
/// its argument (quote multi-word arguments).
///
/// Global flags / env:
///   -v / -vv / -vvv   Log info / debug / trace to stderr
///   --json            Machine-readable output
///   -c / --config     YAML or JSON settings file (or LIRI_CONFIG)
///   -f / --file       Command file for do-what-it-says (or LIRI_RANDOM_FILE)
///   SPOTIFY_ID / SPOTIFY_SECRET   Spotify client credentials
///
/// Examples:
///   liri concert-this "Iron Maiden"
///   liri spotify-this-song "I Want it That Way"
///   liri movie-this
///   liri -f commands.txt do-what-it-says
#[derive(Parser, Debug)]
#[command(
    name = "liri",
    version,
    about = "LIRI - search concerts, songs and movies from the command line",
    after_help = cmd::USAGE,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Settings file (YAML or JSON). Falls back to LIRI_CONFIG
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// File read by do-what-it-says. Falls back to LIRI_RANDOM_FILE, then ./random.txt
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    random_file: Option<PathBuf>,

    /// OMDb API key. Falls back to OMDB_API_KEY
    #[arg(long = "omdb-key", value_name = "KEY")]
    omdb_api_key: Option<String>,

    /// Bands in Town app id. Falls back to BANDSINTOWN_APP_ID
    #[arg(long = "bandsintown-app-id", value_name = "ID")]
    bandsintown_app_id: Option<String>,

    /// Command followed by its argument
    #[arg(value_name = "COMMAND [ARGUMENT]", num_args = 1.., trailing_var_arg = true)]
    words: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            random_file: self.random_file.clone(),
            omdb_api_key: self.omdb_api_key.clone(),
            bandsintown_app_id: self.bandsintown_app_id.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose);
    utils::init_logging(level);

    let Some(invocation) = cmd::parse_invocation(&cli.words) else {
        log_debug!("rejected arguments: {:?}", cli.words);
        cmd::print_invalid_arguments(cli.json);
        return Ok(());
    };

    let settings = Settings::load(&cli.overrides())?;
    cmd::execute(invocation, &settings, cli.json)
}
