//! Note names, the pitch table and note values.

use std::time::Duration;

pub const LOWEST_OCTAVE: u8 = 0;
pub const HIGHEST_OCTAVE: u8 = 8;

/// Frequencies in Hz indexed by `[octave][pitch class]`, pitch classes
/// running C, C#, D, D#, E, F, F#, G, G#, A, A#, B.
///
/// This table is tuned one octave above scientific pitch notation: `A3` is
/// 440 Hz. Enharmonic pairs (`C#`/`Db`, `D#`/`Eb`, `F#`/`Gb`, `G#`/`Ab`,
/// `A#`/`Bb`) share an entry.
#[rustfmt::skip]
pub const FREQUENCIES: [[f64; 12]; 9] = [
    [32.7032, 34.6478, 36.7081, 38.8909, 41.2034, 43.6535, 46.2493, 48.9994, 51.9131, 55.0000, 58.2705, 61.7354],
    [65.4064, 69.2957, 73.4162, 77.7817, 82.4069, 87.3071, 92.4986, 97.9989, 103.8262, 110.0000, 116.5409, 123.4708],
    [130.8128, 138.5913, 146.8324, 155.5635, 164.8138, 174.6141, 184.9972, 195.9977, 207.6523, 220.0000, 233.0819, 246.9417],
    [261.6256, 277.1826, 293.6648, 311.1270, 329.6276, 349.2282, 369.9944, 391.9954, 415.3047, 440.0000, 466.1638, 493.8833],
    [523.2511, 554.3653, 587.3295, 622.2540, 659.2551, 698.4565, 739.9888, 783.9909, 830.6094, 880.0000, 932.3275, 987.7666],
    [1046.5023, 1108.7305, 1174.6591, 1244.5079, 1318.5102, 1396.9129, 1479.9777, 1567.9817, 1661.2188, 1760.0000, 1864.6550, 1975.5332],
    [2093.0045, 2217.4610, 2349.3181, 2489.0159, 2637.0205, 2793.8259, 2959.9554, 3135.9635, 3322.4376, 3520.0000, 3729.3101, 3951.0664],
    [4186.0090, 4434.9221, 4698.6363, 4978.0317, 5274.0409, 5587.6517, 5919.9108, 6271.9270, 6644.8752, 7040.0000, 7458.6202, 7902.1328],
    [8372.0181, 8869.8442, 9397.2726, 9956.0635, 10548.0818, 11175.3034, 11839.8215, 12543.8540, 13289.7503, 14080.0000, 14917.2404, 15804.2656],
];

/// Frequency used for rests.
pub const REST: f64 = 0.0;

pub const DEFAULT_BPM: u32 = 120;

/// Look up the frequency of a note name such as `A3`, `C#4`, `Eb5`, `Cs4` or `Df4`.
///
/// `rest` and `r` (any case) map to [`REST`]. Returns `None` for anything
/// outside the table.
pub fn frequency_of(name: &str) -> Option<f64> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("rest") || name.eq_ignore_ascii_case("r") {
        return Some(REST);
    }

    let mut chars = name.chars();
    let natural = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (class, octave) = match rest.chars().next()? {
        '#' | 's' => (sharpen(natural)?, &rest[1..]),
        'b' | 'f' => (flatten(natural)?, &rest[1..]),
        _ => (natural, rest),
    };

    let octave: u8 = octave.parse().ok()?;
    if !(LOWEST_OCTAVE..=HIGHEST_OCTAVE).contains(&octave) {
        return None;
    }
    Some(FREQUENCIES[octave as usize][class])
}

// E# and B# are not part of the table
fn sharpen(natural: usize) -> Option<usize> {
    match natural {
        4 | 11 => None,
        n => Some(n + 1),
    }
}

// Cb and Fb are not part of the table
fn flatten(natural: usize) -> Option<usize> {
    match natural {
        0 | 5 => None,
        n => Some(n - 1),
    }
}

/// Length of a note relative to a whole note, e.g. 16 for a sixteenth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteValue(pub u32);

impl NoteValue {
    pub const SIXTEENTH: NoteValue = NoteValue(16);

    /// Duration at the given tempo, counting quarter notes as beats.
    ///
    /// Returns `None` if either the tempo or the division is zero.
    pub fn duration(self, bpm: u32) -> Option<Duration> {
        if bpm == 0 || self.0 == 0 {
            return None;
        }
        let whole = Duration::from_secs(4 * 60) / bpm;
        Some(whole / self.0)
    }
}

/// A single tone of a song: what to play and for how long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Frequency in Hz; [`REST`] is silence.
    pub frequency: f64,
    pub duration: Duration,
}

impl Note {
    pub const fn new(frequency: f64, duration: Duration) -> Self {
        Self { frequency, duration }
    }

    pub fn is_rest(&self) -> bool {
        self.frequency == REST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pitches() {
        assert_eq!(frequency_of("A3"), Some(440.0));
        assert_eq!(frequency_of("C0"), Some(32.7032));
        assert_eq!(frequency_of("B8"), Some(15804.2656));
        assert_eq!(frequency_of("E6"), Some(2637.0205));
    }

    #[test]
    fn test_enharmonic_aliases() {
        assert_eq!(frequency_of("D#4"), frequency_of("Eb4"));
        assert_eq!(frequency_of("Ds4"), frequency_of("Ef4"));
        assert_eq!(frequency_of("C#2"), frequency_of("Db2"));
        assert_eq!(frequency_of("F#7"), frequency_of("Gb7"));
        assert_eq!(frequency_of("G#1"), frequency_of("Ab1"));
        assert_eq!(frequency_of("A#5"), frequency_of("Bb5"));
        assert_eq!(frequency_of("Bb5"), Some(1864.6550));
    }

    #[test]
    fn test_rejects_unknown_names() {
        for name in ["H4", "C9", "Cb4", "Fb2", "E#3", "B#3", "C", "", "C#", "A-1", "Cx4"] {
            assert_eq!(frequency_of(name), None, "{name}");
        }
    }

    #[test]
    fn test_rest() {
        assert_eq!(frequency_of("rest"), Some(REST));
        assert_eq!(frequency_of("R"), Some(REST));
        assert!(Note::new(REST, Duration::from_millis(10)).is_rest());
    }

    #[test]
    fn test_note_value_durations() {
        assert_eq!(NoteValue(1).duration(120), Some(Duration::from_secs(2)));
        assert_eq!(NoteValue(4).duration(120), Some(Duration::from_millis(500)));
        assert_eq!(NoteValue::SIXTEENTH.duration(120), Some(Duration::from_millis(125)));
        assert_eq!(NoteValue(8).duration(60), Some(Duration::from_millis(500)));
        assert_eq!(NoteValue(0).duration(120), None);
        assert_eq!(NoteValue(2).duration(0), None);
    }
}
