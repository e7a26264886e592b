//! Chord selector type definitions
//!
//! The orthogonal parameters that pick a chord: mode, quality, extension, override chord
//! type and voicing, bundled per call into a [`ChordContext`].

use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};

/// Seven-note scale patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Major,
        Mode::Minor,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Locrian,
    ];

    /// Semitone offsets of the seven scale degrees from the tonic.
    /// Always strictly increasing, starting at 0 and staying below 12.
    pub fn offsets(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
            Mode::Dorian => [0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => [0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => [0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            Mode::Locrian => [0, 1, 3, 5, 6, 8, 10],
        }
    }

    /// Scale degree index (0-6) of a semitone offset from the tonic, if it is in the scale.
    pub fn degree_of(self, offset: u8) -> Option<usize> {
        self.offsets().iter().position(|&o| o == offset)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Locrian => "locrian",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Mode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
    }
}

/// Third/fifth/seventh/ninth offsets for a forced chord quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityIntervals {
    pub third: u8,
    pub fifth: u8,
    pub seventh: u8,
    pub ninth: u8,
}

/// Harmonic colour of scale-based chords.
///
/// `Natural` derives every interval from the active mode; the others stamp a fixed
/// textbook shape on the root regardless of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Natural,
    Major,
    Minor,
    Diminished,
}

impl Quality {
    pub const ALL: [Quality; 4] = [
        Quality::Natural,
        Quality::Major,
        Quality::Minor,
        Quality::Diminished,
    ];

    /// Fixed intervals for a forced quality; `None` for `Natural`.
    pub fn intervals(self) -> Option<QualityIntervals> {
        match self {
            Quality::Natural => None,
            Quality::Major => Some(QualityIntervals {
                third: 4,
                fifth: 7,
                seventh: 11,
                ninth: 14,
            }),
            Quality::Minor => Some(QualityIntervals {
                third: 3,
                fifth: 7,
                seventh: 10,
                ninth: 14,
            }),
            Quality::Diminished => Some(QualityIntervals {
                third: 3,
                fifth: 6,
                seventh: 9,
                ninth: 13,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Natural => "natural",
            Quality::Major => "major",
            Quality::Minor => "minor",
            Quality::Diminished => "diminished",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Quality::ALL
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(s))
    }
}

/// How many stacked thirds a scale-based chord has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    #[default]
    Triad,
    Seventh,
    Ninth,
    Add9,
}

impl Extension {
    pub const ALL: [Extension; 4] = [
        Extension::Triad,
        Extension::Seventh,
        Extension::Ninth,
        Extension::Add9,
    ];

    /// Scale-degree steps above the root, in construction order.
    pub fn steps(self) -> &'static [usize] {
        match self {
            Extension::Triad => &[0, 2, 4],         // 1-3-5
            Extension::Seventh => &[0, 2, 4, 6],    // 1-3-5-7
            Extension::Ninth => &[0, 2, 4, 6, 8],   // 1-3-5-7-9
            Extension::Add9 => &[0, 2, 4, 8],       // 1-3-5-9
        }
    }

    /// Highest inversion a caller may select for this extension.
    pub fn max_inversion(self) -> u8 {
        match self {
            Extension::Triad => 2,
            Extension::Seventh => 3,
            Extension::Ninth => 4,
            Extension::Add9 => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Extension::Triad => "triad",
            Extension::Seventh => "seventh",
            Extension::Ninth => "ninth",
            Extension::Add9 => "add9",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Extension::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
    }
}

/// Mode-independent chord vocabulary that replaces scale-based derivation entirely.
///
/// Declaration order is the on-screen button order: two pages of eight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordType {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Minor7,
    Dominant7,
    Diminished7,
    Major9,
    Minor9,
    Dominant9,
    Sus2,
    Sus4,
    Major6,
    Minor6,
    Add9,
}

impl ChordType {
    pub const ALL: [ChordType; 16] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Major7,
        ChordType::Minor7,
        ChordType::Dominant7,
        ChordType::Diminished7,
        ChordType::Major9,
        ChordType::Minor9,
        ChordType::Dominant9,
        ChordType::Sus2,
        ChordType::Sus4,
        ChordType::Major6,
        ChordType::Minor6,
        ChordType::Add9,
    ];

    /// Semitone offsets from the root.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordType::Major => &[0, 4, 7],
            ChordType::Minor => &[0, 3, 7],
            ChordType::Diminished => &[0, 3, 6],
            ChordType::Augmented => &[0, 4, 8],
            ChordType::Major7 => &[0, 4, 7, 11],
            ChordType::Minor7 => &[0, 3, 7, 10],
            ChordType::Dominant7 => &[0, 4, 7, 10],
            ChordType::Diminished7 => &[0, 3, 6, 9],
            ChordType::Major9 => &[0, 4, 7, 11, 14],
            ChordType::Minor9 => &[0, 3, 7, 10, 14],
            ChordType::Dominant9 => &[0, 4, 7, 10, 14],
            ChordType::Sus2 => &[0, 2, 7],
            ChordType::Sus4 => &[0, 5, 7],
            ChordType::Major6 => &[0, 4, 7, 9],
            ChordType::Minor6 => &[0, 3, 7, 9],
            ChordType::Add9 => &[0, 4, 7, 14],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordType::Major => "major",
            ChordType::Minor => "minor",
            ChordType::Diminished => "diminished",
            ChordType::Augmented => "augmented",
            ChordType::Major7 => "major7",
            ChordType::Minor7 => "minor7",
            ChordType::Dominant7 => "dominant7",
            ChordType::Diminished7 => "diminished7",
            ChordType::Major9 => "major9",
            ChordType::Minor9 => "minor9",
            ChordType::Dominant9 => "dominant9",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
            ChordType::Major6 => "major6",
            ChordType::Minor6 => "minor6",
            ChordType::Add9 => "add9",
        }
    }

    /// Button position (0-15) in declaration order.
    pub fn from_index(index: usize) -> Option<Self> {
        ChordType::ALL.get(index).copied()
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        ChordType::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }
}

/// Spatial rearrangement applied after inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voicing {
    #[default]
    Close,
    Open,
    Drop2,
    Drop3,
    Shell,
}

impl Voicing {
    pub const ALL: [Voicing; 5] = [
        Voicing::Close,
        Voicing::Open,
        Voicing::Drop2,
        Voicing::Drop3,
        Voicing::Shell,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Voicing::Close => "close",
            Voicing::Open => "open",
            Voicing::Drop2 => "drop2",
            Voicing::Drop3 => "drop3",
            Voicing::Shell => "shell",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Voicing::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
    }
}

/// Everything besides the root and octave that decides which chord is built.
///
/// A context is a plain value passed into every [`compute_chord`](super::compute_chord)
/// call. `temp_inversion` and `temp_voicing` are one-shot selections that win over the
/// persisted `inversion` and `voicing` when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordContext {
    pub key: PitchClass,
    pub mode: Mode,
    pub quality: Quality,
    pub extension: Extension,
    #[serde(rename = "override", skip_serializing_if = "Option::is_none", default)]
    pub override_type: Option<ChordType>,
    pub inversion: u8,
    pub voicing: Voicing,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub temp_inversion: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub temp_voicing: Option<Voicing>,
}

impl ChordContext {
    pub fn new(key: PitchClass, mode: Mode) -> Self {
        Self {
            key,
            mode,
            ..Self::default()
        }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Switch extension, dropping back to root position when the current inversion
    /// does not exist for the new shape.
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension = extension;
        if self.inversion > extension.max_inversion() {
            self.inversion = 0;
        }
        self
    }

    pub fn with_override(mut self, chord_type: Option<ChordType>) -> Self {
        self.override_type = chord_type;
        self
    }

    pub fn with_inversion(mut self, inversion: u8) -> Self {
        self.inversion = inversion;
        self
    }

    pub fn with_voicing(mut self, voicing: Voicing) -> Self {
        self.voicing = voicing;
        self
    }

    pub fn effective_inversion(&self) -> u8 {
        self.temp_inversion.unwrap_or(self.inversion)
    }

    pub fn effective_voicing(&self) -> Voicing {
        self.temp_voicing.unwrap_or(self.voicing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_offsets_are_well_formed() {
        for mode in Mode::ALL {
            let offsets = mode.offsets();
            assert_eq!(offsets[0], 0, "{} must start at the tonic", mode.name());
            assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            assert!(offsets.iter().all(|&o| o < 12));
        }
    }

    #[test]
    fn test_names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_str(mode.name()), Some(mode));
        }
        for chord in ChordType::ALL {
            assert_eq!(ChordType::from_str(chord.name()), Some(chord));
        }
        assert_eq!(Voicing::from_str("DROP2"), Some(Voicing::Drop2));
        assert_eq!(Extension::from_str("add9"), Some(Extension::Add9));
        assert_eq!(Quality::from_str("augmented"), None);
    }

    #[test]
    fn test_with_extension_resets_inversion() {
        let ctx = ChordContext::default()
            .with_extension(Extension::Ninth)
            .with_inversion(4)
            .with_extension(Extension::Triad);
        assert_eq!(ctx.inversion, 0);

        let ctx = ChordContext::default()
            .with_inversion(2)
            .with_extension(Extension::Seventh);
        assert_eq!(ctx.inversion, 2);
    }

    #[test]
    fn test_temporary_selections_win() {
        let mut ctx = ChordContext::default()
            .with_inversion(1)
            .with_voicing(Voicing::Open);
        assert_eq!(ctx.effective_inversion(), 1);
        ctx.temp_inversion = Some(0);
        ctx.temp_voicing = Some(Voicing::Shell);
        assert_eq!(ctx.effective_inversion(), 0);
        assert_eq!(ctx.effective_voicing(), Voicing::Shell);
    }
}
