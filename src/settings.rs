//! Persistent settings and the effective configuration of a run.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::audio::DEFAULT_SAMPLE_RATE;
use crate::cli::Cli;
use crate::core::song::DEFAULT_SONG;

/// Contents of `settings.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub song: Option<String>,
    pub songs_file: Option<PathBuf>,
    pub sample_rate: Option<u32>,
}

impl Settings {
    fn settings_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hackerbeeper"))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::settings_dir().map(|dir| dir.join("settings.json"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open settings file {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Load the explicitly requested file, or the default one if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("loading settings from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Effective options: command line first, then settings, then defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub song: String,
    pub songs_file: Option<PathBuf>,
    pub sample_rate: u32,
}

impl Config {
    pub fn resolve(cli: &Cli, settings: Settings) -> Self {
        Self {
            song: cli
                .song
                .clone()
                .or(settings.song)
                .unwrap_or_else(|| DEFAULT_SONG.to_string()),
            songs_file: cli.songs.clone().or(settings.songs_file),
            sample_rate: cli
                .sample_rate
                .or(settings.sample_rate)
                .filter(|rate| *rate > 0)
                .unwrap_or(DEFAULT_SAMPLE_RATE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hackerbeeper").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(&cli(&[]), Settings::default());
        assert_eq!(
            config,
            Config {
                song: "bumblebees".into(),
                songs_file: None,
                sample_rate: 44_100,
            }
        );
    }

    #[test]
    fn test_command_line_overrides_settings() {
        let settings = Settings {
            song: Some("scale".into()),
            songs_file: Some("songs.json".into()),
            sample_rate: Some(48_000),
        };
        let config = Config::resolve(&cli(&["--song", "other", "--sample-rate", "22050"]), settings);
        assert_eq!(config.song, "other");
        assert_eq!(config.songs_file, Some(PathBuf::from("songs.json")));
        assert_eq!(config.sample_rate, 22_050);
    }

    #[test]
    fn test_zero_sample_rate_in_settings_ignored() {
        let settings = Settings {
            sample_rate: Some(0),
            ..Settings::default()
        };
        assert_eq!(Config::resolve(&cli(&[]), settings).sample_rate, 44_100);
    }

    #[test]
    fn test_load_partial_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"song": "scale"}}"#).unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.song.as_deref(), Some("scale"));
        assert_eq!(settings.sample_rate, None);
    }

    #[test]
    fn test_load_malformed_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_settings() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("nope.json"))).is_err());
    }
}
