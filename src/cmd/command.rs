/*!
Command vocabulary for the `liri` CLI.

Variants:
  concert-this       <artist>   (argument required)
  spotify-this-song  [<song>]   (defaults to "The Sign")
  movie-this         [<movie>]  (defaults to "Mr. Nobody")
  do-what-it-says               (no argument; re-dispatches from a file)

Helpers:
  - variants()
  - from_name()
  - arity() / Arity::accepts()
  - default_argument()
*/

use std::fmt;

/// Song searched when `spotify-this-song` gets no argument.
pub const DEFAULT_SONG: &str = "The Sign";

/// Movie looked up when `movie-this` gets no argument.
pub const DEFAULT_MOVIE: &str = "Mr. Nobody";

/// Usage text printed after argument and re-dispatch errors.
pub const USAGE: &str = "Expected usage: liri <command> [command argument]\n\n\
Commands:\n\n\
* concert-this <artist/band name here>: Will search Bands in Town Artist Events\n\n\
* spotify-this-song [<song name here>]: Will search song information from Spotify or will default to 'The Sign' by Ace of Base\n\n\
* movie-this [<movie name here>]: Will search for movie information from OMDB or will default to 'Mr. Nobody'\n\n\
* do-what-it-says: Will read the contents of random.txt file and interpret it as LIRI command.\n";

/// The four operations `liri` knows how to run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    /// Upcoming events for an artist (Bands in Town)
    ConcertThis,
    /// Most popular matching track (Spotify)
    SpotifyThisSong,
    /// Movie metadata (OMDb)
    MovieThis,
    /// Read a command line from the re-dispatch file and run it
    DoWhatItSays,
}

/// How many trailing arguments a command takes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    /// Exactly one.
    Required,
    /// Zero or one.
    Optional,
    /// Exactly zero.
    None,
}

impl Arity {
    pub fn accepts(&self, trailing: usize) -> bool {
        match self {
            Arity::Required => trailing == 1,
            Arity::Optional => trailing <= 1,
            Arity::None => trailing == 0,
        }
    }
}

impl Command {
    /// All variants, in usage-text order.
    pub const fn variants() -> &'static [Command] {
        &[
            Command::ConcertThis,
            Command::SpotifyThisSong,
            Command::MovieThis,
            Command::DoWhatItSays,
        ]
    }

    /// Exact (case-sensitive) lookup by CLI spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|c| c.name() == name)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Command::ConcertThis => "concert-this",
            Command::SpotifyThisSong => "spotify-this-song",
            Command::MovieThis => "movie-this",
            Command::DoWhatItSays => "do-what-it-says",
        }
    }

    pub const fn arity(&self) -> Arity {
        match self {
            Command::ConcertThis => Arity::Required,
            Command::SpotifyThisSong | Command::MovieThis => Arity::Optional,
            Command::DoWhatItSays => Arity::None,
        }
    }

    /// Argument substituted when none was given.
    pub const fn default_argument(&self) -> Option<&'static str> {
        match self {
            Command::SpotifyThisSong => Some(DEFAULT_SONG),
            Command::MovieThis => Some(DEFAULT_MOVIE),
            Command::ConcertThis | Command::DoWhatItSays => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
