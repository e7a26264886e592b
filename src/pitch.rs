//! # Pitch Types
//!
//! Structured pitch values used everywhere a note name crosses the API.
//!
//! - [`PitchClass`] - one of the 12 semitone classes, always spelled with sharps
//! - [`Pitch`] - a pitch class in a specific octave, ordered by `octave * 12 + class`
//!
//! The canonical string form is `"<name><octave>"` (e.g. `"C#4"`). [`Pitch`] implements
//! [`std::fmt::Display`] and [`std::str::FromStr`] for that form; serde uses the same
//! string so memory descriptors serialize as readable note names.
//!
//! ## Example
//! ```rust
//! use chordgen::{Pitch, PitchClass};
//!
//! let pitch: Pitch = "Bb3".parse()?;
//! assert_eq!(pitch.pitch_class, PitchClass::A_SHARP);
//! assert_eq!(pitch.to_string(), "A#3"); // flats are normalised to sharps
//! assert_eq!(pitch.midi(), 58);
//! # Ok::<(), chordgen::ChordError>(())
//! ```

use crate::error::ChordError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sharp-based spelling of the 12 pitch classes, indexed by semitone.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A semitone class (0 = C, 11 = B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const C_SHARP: PitchClass = PitchClass(1);
    pub const D: PitchClass = PitchClass(2);
    pub const D_SHARP: PitchClass = PitchClass(3);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const F_SHARP: PitchClass = PitchClass(6);
    pub const G: PitchClass = PitchClass(7);
    pub const G_SHARP: PitchClass = PitchClass(8);
    pub const A: PitchClass = PitchClass(9);
    pub const A_SHARP: PitchClass = PitchClass(10);
    pub const B: PitchClass = PitchClass(11);

    /// Build a pitch class from any semitone count, wrapping into 0-11.
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    /// All 12 pitch classes in ascending order.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }

    pub fn semitone(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }

    /// Semitone distance going up from `other` to `self` (0-11).
    pub fn interval_from(self, other: PitchClass) -> u8 {
        (self.0 + 12 - other.0) % 12
    }

    /// Parse a note name like "C", "F#", "Bb" or "e".
    ///
    /// Flat spellings are accepted and normalised to their sharp equivalent.
    pub fn from_str(s: &str) -> Option<Self> {
        spelled_semitone(s).map(PitchClass::new)
    }
}

/// Semitone of a spelled note name relative to C, before wrapping: "Cb" is -1 and
/// "B#" is 12.
fn spelled_semitone(s: &str) -> Option<i32> {
    let mut chars = s.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let base: i32 = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let accidental = match (chars.next(), chars.next()) {
        (None, _) => 0,
        (Some('#'), None) => 1,
        (Some('b'), None) => -1,
        _ => return None,
    };
    Some(base + accidental)
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PitchClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PitchClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PitchClass::from_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown note name '{}'", s)))
    }
}

/// A pitch class in a specific octave.
///
/// Field order matters: the derived ordering compares the octave first and the pitch
/// class second, which is the same as comparing `octave * 12 + class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch {
    pub octave: i32,
    pub pitch_class: PitchClass,
}

impl Pitch {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            octave,
            pitch_class,
        }
    }

    /// The pitch `offset` semitones above `root` in `octave`, carrying into higher
    /// octaves as needed.
    ///
    /// ```
    /// use chordgen::{Pitch, PitchClass};
    ///
    /// // A4 plus a major ninth lands in the next octave
    /// assert_eq!(Pitch::from_offset(PitchClass::A, 4, 14).to_string(), "B5");
    /// ```
    pub fn from_offset(root: PitchClass, octave: i32, offset: u8) -> Self {
        let total = root.semitone() as i32 + offset as i32;
        Self::new(PitchClass::new(total), octave + total.div_euclid(12))
    }

    /// Absolute semitone value used for ordering (`octave * 12 + class`).
    pub fn value(self) -> i32 {
        self.octave * 12 + self.pitch_class.semitone() as i32
    }

    /// MIDI note number, with C4 = 60.
    pub fn midi(self) -> i32 {
        self.value() + 12
    }

    /// The same pitch class `octaves` octaves higher (or lower when negative).
    pub fn shift_octave(self, octaves: i32) -> Self {
        Self::new(self.pitch_class, self.octave + octaves)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class.name(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let error = |message: String| ChordError::PitchParse {
            input: s.to_string(),
            message,
        };

        // The octave starts at the first digit or minus sign after the note name
        let split = trimmed
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| error("missing octave number".to_string()))?;
        let (name, octave) = trimmed.split_at(split);

        let semitone = spelled_semitone(name)
            .ok_or_else(|| error(format!("unknown note name '{}'", name)))?;
        let octave: i32 = octave
            .parse()
            .map_err(|_| error(format!("invalid octave '{}'", octave)))?;

        // Cb4 is B3 and B#3 is C4
        Ok(Pitch::new(
            PitchClass::new(semitone),
            octave + semitone.div_euclid(12),
        ))
    }
}

impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pitch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Format a chord as the list of pitch names handed to a sound backend.
pub fn pitch_names(pitches: &[Pitch]) -> Vec<String> {
    pitches.iter().map(Pitch::to_string).collect()
}
