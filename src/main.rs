use anyhow::Result;
use clap::Parser;
use log::{debug, warn};

mod audio;
mod cli;
mod core;
mod error;
mod input;
mod messaging;
mod note;
mod settings;

use audio::AudioSession;
use cli::{Cli, Commands};
use crate::core::scheduler;
use crate::core::{Catalog, Song, Voice};
use input::RawKeyboard;
use settings::{Config, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let config = Config::resolve(cli, settings);
    debug!("configuration: {:?}", config);

    let mut catalog = Catalog::builtin();
    if let Some(path) = &config.songs_file {
        catalog.load_file(path)?;
    }

    if cli.command == Some(Commands::List) {
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    // Unknown songs fail here, before any device is touched
    let song = catalog.get(&config.song)?;

    match cli.command {
        Some(Commands::Autoplay) => autoplay(song, &config),
        _ => play_with_keyboard(song, &config),
    }
}

fn autoplay(song: &Song, config: &Config) -> Result<()> {
    let voice = Voice::new();
    with_session(&voice, config.sample_rate, |session| {
        scheduler::autoplay(song, &voice, &mut session.faults())?;
        Ok(())
    })
}

fn play_with_keyboard(song: &Song, config: &Config) -> Result<()> {
    println!(
        "Playing '{}': press any key for the next note, Ctrl-C to quit.",
        song.name()
    );
    let mut keyboard = RawKeyboard::enable()?;
    let voice = Voice::new();
    with_session(&voice, config.sample_rate, |session| {
        scheduler::interactive(song, &voice, &mut keyboard, session.faults())
    })
}

/// Run `play` against a started audio session and close the session on every
/// exit path. A playback error takes precedence over a close error.
fn with_session<F>(voice: &Voice, sample_rate: u32, play: F) -> Result<()>
where
    F: FnOnce(&AudioSession) -> Result<()>,
{
    let session = AudioSession::start(voice.frequency_cell(), sample_rate)?;
    debug!("session open at {} Hz", session.sample_rate());

    let played = play(&session);
    let closed = session.close();
    match (played, closed) {
        (Err(err), Err(close_err)) => {
            warn!("{:#}", close_err);
            Err(err)
        }
        (played, closed) => played.and(closed),
    }
}
