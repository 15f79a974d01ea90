/*!
dispatch.rs - maps a command to its collaborator call and extractor.

  Dispatcher::dispatch(command, argument)  -> what ran and the summaries to print
  Dispatcher::redispatch_from_file()       -> `do-what-it-says`: one level of
                                              indirection through the command file
  split_directive(text)                    -> (command, argument) from file text

Exactly one collaborator call is awaited per dispatch. Failures are returned,
never retried; the caller decides how to render them.
*/

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::command::Command;
use super::error::CommandError;
use super::extract::{movie_summary, select_track, track_summary, venue_summary};
use crate::api::Collaborators;
use crate::{log_debug, log_info};

/// A command line read from the re-dispatch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub command: String,
    pub argument: Option<String>,
}

/// Split file text on single spaces: first token is the command, the rest
/// (re-joined with single spaces) the argument. Trailing line breaks are
/// dropped first. Returns `None` for empty content.
pub fn split_directive(text: &str) -> Option<Directive> {
    let text = text.trim_end_matches(['\r', '\n']);
    if text.is_empty() {
        return None;
    }
    let mut words = text.split(' ');
    let command = words.next()?.to_string();
    let argument = words.collect::<Vec<_>>().join(" ");
    Some(Directive {
        command,
        argument: (!argument.is_empty()).then_some(argument),
    })
}

/// Outcome of a dispatch: the command that actually ran, its effective
/// argument (after defaults) and the summaries it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub command: Command,
    pub argument: Option<String>,
    pub lines: Vec<String>,
}

pub struct Dispatcher<C> {
    collaborators: C,
    random_file: PathBuf,
}

impl<C: Collaborators> Dispatcher<C> {
    pub fn new(collaborators: C, random_file: impl Into<PathBuf>) -> Self {
        Self {
            collaborators,
            random_file: random_file.into(),
        }
    }

    pub fn random_file(&self) -> &Path {
        &self.random_file
    }

    pub async fn dispatch(&self, command: Command, argument: Option<&str>) -> Result<Dispatched> {
        match command {
            Command::DoWhatItSays => self.redispatch_from_file().await,
            other => self.run(other, argument).await,
        }
    }

    /// Command names from the file are untyped text, so the lookup happens here.
    pub async fn redispatch_from_file(&self) -> Result<Dispatched> {
        let text = tokio::fs::read_to_string(&self.random_file)
            .await
            .with_context(|| format!("failed to read {}", self.random_file.display()))?;

        let directive = split_directive(&text)
            .ok_or_else(|| CommandError::EmptyFile(self.random_file.clone()))?;
        log_info!(
            "{} -> {} {}",
            self.random_file.display(),
            directive.command,
            directive.argument.as_deref().unwrap_or("")
        );

        let command = Command::from_name(&directive.command)
            .ok_or_else(|| CommandError::UnknownCommand(directive.command.clone()))?;
        self.run(command, directive.argument.as_deref()).await
    }

    async fn run(&self, command: Command, argument: Option<&str>) -> Result<Dispatched> {
        let argument = argument.or(command.default_argument());
        log_debug!("{command} {}", argument.unwrap_or("<none>"));

        let lines = match command {
            Command::ConcertThis => {
                let artist = argument.ok_or(CommandError::MissingArgument(command))?;
                let events = self.collaborators.events(artist).await?;
                log_info!("{} event(s) for {artist}", events.len());
                events.iter().map(|e| venue_summary(e.as_ref())).collect()
            }
            Command::SpotifyThisSong => {
                let query = argument.ok_or(CommandError::MissingArgument(command))?;
                let candidates = self.collaborators.tracks(query).await?;
                log_info!("{} candidate track(s) for {query}", candidates.len());
                let track =
                    select_track(&candidates).ok_or_else(|| CommandError::NoTracks(query.into()))?;
                vec![track_summary(Some(track))]
            }
            Command::MovieThis => {
                let title = argument.ok_or(CommandError::MissingArgument(command))?;
                let movie = self.collaborators.movie(title).await?;
                vec![movie_summary(movie.as_ref())]
            }
            // Only reachable from the file: never read it a second time.
            Command::DoWhatItSays => return Err(CommandError::SelfInvocation.into()),
        };
        Ok(Dispatched {
            command,
            argument: argument.map(str::to_string),
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::bandsintown::Venue;
    use crate::api::spotify::{AlbumRef, ArtistRef};
    use crate::api::{MovieRecord, TrackRecord, VenueEvent};
    use anyhow::bail;
    use std::io::Write;
    use std::sync::Mutex;

    /// Records every call and answers from canned data.
    #[derive(Default)]
    struct FakeCollaborators {
        calls: Mutex<Vec<String>>,
        tracks: Vec<TrackRecord>,
        fail: bool,
    }

    impl FakeCollaborators {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                bail!("service unavailable");
            }
            Ok(())
        }
    }

    impl Collaborators for FakeCollaborators {
        async fn movie(&self, title: &str) -> Result<Option<MovieRecord>> {
            self.record(format!("movie:{title}"))?;
            Ok(Some(MovieRecord {
                title: title.to_string(),
                ..Default::default()
            }))
        }

        async fn tracks(&self, query: &str) -> Result<Vec<TrackRecord>> {
            self.record(format!("tracks:{query}"))?;
            Ok(self.tracks.clone())
        }

        async fn events(&self, artist: &str) -> Result<Vec<Option<VenueEvent>>> {
            self.record(format!("events:{artist}"))?;
            Ok(vec![
                Some(VenueEvent {
                    venue: Venue {
                        name: "Red Rocks".into(),
                        city: "Morrison".into(),
                        region: "CO".into(),
                        country: "United States".into(),
                    },
                    datetime: "2018-05-01T19:00:00".into(),
                }),
                None,
            ])
        }
    }

    fn track(name: &str, popularity: u32) -> TrackRecord {
        TrackRecord {
            name: name.into(),
            artists: vec![ArtistRef { name: "Ace of Base".into() }],
            preview_url: None,
            album: AlbumRef { name: "Happy Nation".into() },
            popularity,
        }
    }

    fn dispatcher(fake: FakeCollaborators) -> Dispatcher<FakeCollaborators> {
        Dispatcher::new(fake, "does-not-exist.txt")
    }

    fn with_file(fake: FakeCollaborators, content: &str) -> (Dispatcher<FakeCollaborators>, tempfile::NamedTempFile) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{content}").unwrap();
        (Dispatcher::new(fake, f.path()), f)
    }

    fn command_error(err: &anyhow::Error) -> Option<&CommandError> {
        err.downcast_ref::<CommandError>()
    }

    #[test]
    fn split_command_and_argument() {
        assert_eq!(
            split_directive("movie-this Inception"),
            Some(Directive {
                command: "movie-this".into(),
                argument: Some("Inception".into()),
            })
        );
    }

    #[test]
    fn split_rejoins_multi_word_argument() {
        let d = split_directive("spotify-this-song I Want it That Way\n").unwrap();
        assert_eq!(d.command, "spotify-this-song");
        assert_eq!(d.argument.as_deref(), Some("I Want it That Way"));
    }

    #[test]
    fn split_single_token_has_no_argument() {
        let d = split_directive("do-what-it-says").unwrap();
        assert_eq!(d.argument, None);
    }

    #[test]
    fn split_empty_content() {
        assert_eq!(split_directive(""), None);
        assert_eq!(split_directive("\n"), None);
    }

    #[tokio::test]
    async fn spotify_defaults_to_the_sign() {
        let fake = FakeCollaborators {
            tracks: vec![track("The Sign", 70)],
            ..Default::default()
        };
        let d = dispatcher(fake);
        let out = d.dispatch(Command::SpotifyThisSong, None).await.unwrap();
        assert_eq!(d.collaborators.calls(), vec!["tracks:The Sign"]);
        assert_eq!(out.argument.as_deref(), Some("The Sign"));
        assert_eq!(
            out.lines,
            vec!["Artist: Ace of Base, Song name: The Sign, Preview link: N/A, Album: Happy Nation"]
        );
    }

    #[tokio::test]
    async fn spotify_picks_most_popular() {
        let fake = FakeCollaborators {
            tracks: vec![track("a", 10), track("b", 30), track("c", 30), track("d", 5)],
            ..Default::default()
        };
        let out = dispatcher(fake)
            .dispatch(Command::SpotifyThisSong, Some("x"))
            .await
            .unwrap();
        assert!(out.lines[0].contains("Song name: b,"));
    }

    #[tokio::test]
    async fn spotify_without_candidates_is_an_error() {
        let err = dispatcher(FakeCollaborators::default())
            .dispatch(Command::SpotifyThisSong, Some("zzzz"))
            .await
            .unwrap_err();
        assert_eq!(command_error(&err), Some(&CommandError::NoTracks("zzzz".into())));
    }

    #[tokio::test]
    async fn movie_defaults_to_mr_nobody() {
        let d = dispatcher(FakeCollaborators::default());
        let out = d.dispatch(Command::MovieThis, None).await.unwrap();
        assert_eq!(d.collaborators.calls(), vec!["movie:Mr. Nobody"]);
        assert!(out.lines[0].starts_with("Title: Mr. Nobody,"));
    }

    #[tokio::test]
    async fn concert_maps_every_event() {
        let d = dispatcher(FakeCollaborators::default());
        let out = d.dispatch(Command::ConcertThis, Some("Phish")).await.unwrap();
        assert_eq!(d.collaborators.calls(), vec!["events:Phish"]);
        assert_eq!(
            out.lines,
            vec![
                "Name of venue: Red Rocks, Location: Morrison, CO, United States, Date of Event: 05/01/2018".to_string(),
                String::new(),
            ]
        );
    }

    #[tokio::test]
    async fn concert_requires_argument() {
        let d = dispatcher(FakeCollaborators::default());
        let err = d.dispatch(Command::ConcertThis, None).await.unwrap_err();
        assert_eq!(
            command_error(&err),
            Some(&CommandError::MissingArgument(Command::ConcertThis))
        );
        assert!(d.collaborators.calls().is_empty());
    }

    #[tokio::test]
    async fn collaborator_failure_propagates() {
        let fake = FakeCollaborators {
            fail: true,
            ..Default::default()
        };
        let err = dispatcher(fake)
            .dispatch(Command::MovieThis, Some("Alien"))
            .await
            .unwrap_err();
        assert!(command_error(&err).is_none());
        assert!(err.to_string().contains("service unavailable"));
    }

    #[tokio::test]
    async fn file_redispatches_movie() {
        let (d, _f) = with_file(FakeCollaborators::default(), "movie-this Inception");
        let out = d.dispatch(Command::DoWhatItSays, None).await.unwrap();
        assert_eq!(d.collaborators.calls(), vec!["movie:Inception"]);
        assert!(out.lines[0].starts_with("Title: Inception,"));
    }

    #[tokio::test]
    async fn file_dispatch_reports_the_directive_that_ran() {
        let (d, _f) = with_file(FakeCollaborators::default(), "movie-this Inception\n");
        let out = d.dispatch(Command::DoWhatItSays, Some("ignored")).await.unwrap();
        assert_eq!(out.command, Command::MovieThis);
        assert_eq!(out.argument.as_deref(), Some("Inception"));
    }

    #[tokio::test]
    async fn command_is_dispatched_without_name_lookup() {
        let d = dispatcher(FakeCollaborators::default());
        let out = d.dispatch(Command::MovieThis, Some("Alien")).await.unwrap();
        assert_eq!(out.command, Command::MovieThis);
        assert_eq!(out.argument.as_deref(), Some("Alien"));
        assert_eq!(d.collaborators.calls(), vec!["movie:Alien"]);
    }

    #[tokio::test]
    async fn file_command_without_argument_uses_default() {
        let fake = FakeCollaborators {
            tracks: vec![track("The Sign", 1)],
            ..Default::default()
        };
        let (d, _f) = with_file(fake, "spotify-this-song\n");
        let out = d.redispatch_from_file().await.unwrap();
        assert_eq!(d.collaborators.calls(), vec!["tracks:The Sign"]);
        assert_eq!(out.command, Command::SpotifyThisSong);
        assert_eq!(out.argument.as_deref(), Some("The Sign"));
    }

    #[tokio::test]
    async fn file_refuses_self_invocation() {
        let (d, _f) = with_file(FakeCollaborators::default(), "do-what-it-says");
        let err = d.dispatch(Command::DoWhatItSays, None).await.unwrap_err();
        assert_eq!(command_error(&err), Some(&CommandError::SelfInvocation));
        assert!(d.collaborators.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_file_makes_no_call() {
        let (d, f) = with_file(FakeCollaborators::default(), "");
        let err = d.redispatch_from_file().await.unwrap_err();
        assert_eq!(
            command_error(&err),
            Some(&CommandError::EmptyFile(f.path().to_path_buf()))
        );
        assert!(command_error(&err).unwrap().shows_usage());
        assert!(d.collaborators.calls().is_empty());
    }

    #[tokio::test]
    async fn unreadable_file_is_a_plain_error() {
        let d = dispatcher(FakeCollaborators::default());
        let err = d.redispatch_from_file().await.unwrap_err();
        assert!(command_error(&err).is_none());
        assert!(err.to_string().contains("does-not-exist.txt"));
    }

    #[tokio::test]
    async fn file_with_unknown_command() {
        let (d, _f) = with_file(FakeCollaborators::default(), "my-tweets now");
        let err = d.redispatch_from_file().await.unwrap_err();
        assert_eq!(
            command_error(&err),
            Some(&CommandError::UnknownCommand("my-tweets".into()))
        );
        assert!(command_error(&err).unwrap().shows_usage());
        assert!(d.collaborators.calls().is_empty());
    }
}
