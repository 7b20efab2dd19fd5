use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a playback session before or while it runs.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("song not found: {0}")]
    UnknownSong(String),

    #[error("unknown note name '{name}' in song '{song}'")]
    UnknownNote { song: String, name: String },

    #[error("song '{0}' has no notes")]
    EmptySong(String),

    #[error("song '{song}': {reason}")]
    InvalidSong { song: String, reason: String },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("unsupported sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("audio device fault: {0}")]
    DeviceFault(#[from] cpal::StreamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_song_message() {
        let err = PlayError::UnknownSong("xyz".into());
        assert_eq!(err.to_string(), "song not found: xyz");
    }

    #[test]
    fn test_unknown_note_message() {
        let err = PlayError::UnknownNote {
            song: "scale".into(),
            name: "H2".into(),
        };
        assert_eq!(err.to_string(), "unknown note name 'H2' in song 'scale'");
    }
}
