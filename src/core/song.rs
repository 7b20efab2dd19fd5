//! Songs and the catalog they are looked up in.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::PlayError;
use crate::note::{frequency_of, Note, NoteValue, DEFAULT_BPM};

pub const DEFAULT_SONG: &str = "bumblebees";

#[rustfmt::skip]
const BUMBLEBEES: &[&str] = &[
    "E6", "Eb6", "D6", "Db6", "D6", "Db6", "C6", "B5",
    "C6", "B5", "Bb5", "A5", "Ab5", "G5", "Gb5", "F5",
    "E5", "Eb5", "D5", "Db5", "D5", "Db5", "C5", "B4",
    "C5", "B4", "Bb4", "A4", "Ab4", "G4", "Gb4", "F4",
    "E4", "Eb4", "D4", "Db4", "D4", "Db4", "C4", "B3",
    "E4", "Eb4", "D4", "Db4", "D4", "Db4", "C4", "B3",
    "E4", "Eb4", "D4", "Db4", "C4", "F4", "E4", "Eb4",
    "E4", "Eb4", "D4", "Db4", "C4", "Db4", "D4", "D#4",
];

/// An ordered, non-empty sequence of notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    name: String,
    notes: Vec<Note>,
}

impl Song {
    pub fn new(name: impl Into<String>, notes: Vec<Note>) -> Result<Self, PlayError> {
        let name = name.into();
        if notes.is_empty() {
            return Err(PlayError::EmptySong(name));
        }
        Ok(Self { name, notes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Wall time of one pass over the song.
    pub fn total_duration(&self) -> std::time::Duration {
        self.notes.iter().map(|n| n.duration).sum()
    }
}

/// Song as written in a song file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongDef {
    pub name: String,
    #[serde(default = "default_bpm")]
    pub bpm: u32,
    pub notes: Vec<NoteDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDef {
    /// Note name from the pitch table, or `rest`.
    pub note: String,
    /// Division of a whole note: 4 is a quarter, 16 a sixteenth.
    pub value: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongFile {
    pub songs: Vec<SongDef>,
}

fn default_bpm() -> u32 {
    DEFAULT_BPM
}

impl SongDef {
    pub fn compile(&self) -> Result<Song, PlayError> {
        if self.bpm == 0 {
            return Err(PlayError::InvalidSong {
                song: self.name.clone(),
                reason: "bpm must be positive".into(),
            });
        }

        let notes = self
            .notes
            .iter()
            .map(|def| {
                let frequency = frequency_of(&def.note).ok_or_else(|| PlayError::UnknownNote {
                    song: self.name.clone(),
                    name: def.note.clone(),
                })?;
                let duration =
                    NoteValue(def.value)
                        .duration(self.bpm)
                        .ok_or_else(|| PlayError::InvalidSong {
                            song: self.name.clone(),
                            reason: format!("note value of '{}' must be positive", def.note),
                        })?;
                Ok(Note::new(frequency, duration))
            })
            .collect::<Result<Vec<_>, PlayError>>()?;

        Song::new(self.name.clone(), notes)
    }
}

/// Read-only table of songs by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: BTreeMap<String, Song>,
}

impl Catalog {
    /// Catalog holding only the songs that ship with the binary.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::default();
        let bumblebees = SongDef {
            name: DEFAULT_SONG.into(),
            bpm: DEFAULT_BPM,
            notes: BUMBLEBEES
                .iter()
                .map(|name| NoteDef {
                    note: (*name).into(),
                    value: NoteValue::SIXTEENTH.0,
                })
                .collect(),
        };
        match bumblebees.compile() {
            Ok(song) => catalog.insert(song),
            Err(err) => warn!("built-in song skipped: {}", err),
        }
        catalog
    }

    pub fn insert(&mut self, song: Song) {
        if self.songs.contains_key(song.name()) {
            warn!("song '{}' replaces an existing entry", song.name());
        }
        self.songs.insert(song.name.clone(), song);
    }

    /// Add every song defined in a JSON song file.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read song file {}", path.display()))?;
        let file: SongFile = serde_json::from_str(&contents).map_err(|source| PlayError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        for def in &file.songs {
            let song = def.compile()?;
            debug!("loaded song '{}' ({} notes)", song.name(), song.len());
            self.insert(song);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Song, PlayError> {
        self.songs
            .get(name)
            .ok_or_else(|| PlayError::UnknownSong(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.songs.keys().map(String::as_str)
    }
}
