//! # Settings
//!
//! Starting state for a [`Session`](crate::session::Session), read from YAML.
//!
//! ## Format
//! Every field is optional; missing fields keep their defaults.
//!
//! ```yaml
//! key: D
//! mode: dorian
//! quality: natural
//! extension: seventh
//! inversion: 1
//! voicing: drop2
//! octave: 3
//! memory-slots: 8
//! ```
//!
//! ## Example
//! ```rust
//! use chordgen::{Mode, PitchClass, Settings};
//!
//! let settings = Settings::from_yaml("key: Eb\nmode: mixolydian\n")?;
//! assert_eq!(settings.context.key, PitchClass::D_SHARP);
//! assert_eq!(settings.context.mode, Mode::Mixolydian);
//! assert_eq!(settings.octave, 4);
//! # Ok::<(), chordgen::ChordError>(())
//! ```

use crate::engine::{ChordContext, Extension, Mode, Quality, Voicing};
use crate::error::ChordError;
use crate::memory::{COMPACT_CAPACITY, DEFAULT_CAPACITY};
use crate::pitch::PitchClass;
use serde::Deserialize;

/// Lowest base octave a session can shift to.
pub const MIN_OCTAVE: i32 = 1;

/// Highest base octave a session can shift to.
pub const MAX_OCTAVE: i32 = 6;

/// Validated session settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub context: ChordContext,
    pub octave: i32,
    pub memory_slots: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            context: ChordContext::default(),
            octave: 4,
            memory_slots: DEFAULT_CAPACITY,
        }
    }
}

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSettings {
    pub key: Option<String>,
    pub mode: Option<String>,
    pub quality: Option<String>,
    pub extension: Option<String>,
    pub inversion: Option<u8>,
    pub voicing: Option<String>,
    pub octave: Option<i32>,
    pub memory_slots: Option<usize>,
}

impl Settings {
    /// Parse and validate a YAML settings document.
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        // An empty document deserializes as unit, not as a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawSettings =
            serde_yaml::from_str(content).map_err(|e| ChordError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawSettings) -> Result<Self, ChordError> {
        let mut settings = Settings::default();
        let ctx = &mut settings.context;

        if let Some(key) = &raw.key {
            ctx.key = PitchClass::from_str(key).ok_or_else(|| unknown("key", key))?;
        }
        if let Some(mode) = &raw.mode {
            ctx.mode = Mode::from_str(mode).ok_or_else(|| unknown("mode", mode))?;
        }
        if let Some(quality) = &raw.quality {
            ctx.quality = Quality::from_str(quality).ok_or_else(|| unknown("quality", quality))?;
        }
        if let Some(extension) = &raw.extension {
            ctx.extension =
                Extension::from_str(extension).ok_or_else(|| unknown("extension", extension))?;
        }
        if let Some(voicing) = &raw.voicing {
            ctx.voicing = Voicing::from_str(voicing).ok_or_else(|| unknown("voicing", voicing))?;
        }
        if let Some(inversion) = raw.inversion {
            let max = ctx.extension.max_inversion();
            if inversion > max {
                return Err(ChordError::InvalidInversion {
                    inversion,
                    extension: ctx.extension.name().to_string(),
                    max,
                });
            }
            ctx.inversion = inversion;
        }

        if let Some(octave) = raw.octave {
            if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
                return Err(ChordError::ConfigError(format!(
                    "octave must be between {} and {}, got {}",
                    MIN_OCTAVE, MAX_OCTAVE, octave
                )));
            }
            settings.octave = octave;
        }
        if let Some(slots) = raw.memory_slots {
            if slots != COMPACT_CAPACITY && slots != DEFAULT_CAPACITY {
                return Err(ChordError::ConfigError(format!(
                    "memory-slots must be {} or {}, got {}",
                    COMPACT_CAPACITY, DEFAULT_CAPACITY, slots
                )));
            }
            settings.memory_slots = slots;
        }

        Ok(settings)
    }
}

fn unknown(kind: &'static str, value: &str) -> ChordError {
    ChordError::UnknownName {
        kind,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_settings() {
        let yaml = r#"
key: D
mode: dorian
quality: minor
extension: seventh
inversion: 3
voicing: drop2
octave: 3
memory-slots: 8
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.context.key, PitchClass::D);
        assert_eq!(settings.context.mode, Mode::Dorian);
        assert_eq!(settings.context.quality, Quality::Minor);
        assert_eq!(settings.context.extension, Extension::Seventh);
        assert_eq!(settings.context.inversion, 3);
        assert_eq!(settings.context.voicing, Voicing::Drop2);
        assert_eq!(settings.octave, 3);
        assert_eq!(settings.memory_slots, 8);
    }

    #[test]
    fn test_empty_settings_are_default() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        assert_eq!(Settings::from_yaml("key: C\n").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            Settings::from_yaml("mode: aeolian"),
            Err(ChordError::UnknownName {
                kind: "mode",
                value: "aeolian".to_string()
            })
        );
        assert!(matches!(
            Settings::from_yaml("voicing: spread"),
            Err(ChordError::UnknownName { kind: "voicing", .. })
        ));
        assert!(matches!(
            Settings::from_yaml("key: H"),
            Err(ChordError::UnknownName { kind: "key", .. })
        ));
    }

    #[test]
    fn test_out_of_range_values() {
        assert!(matches!(
            Settings::from_yaml("inversion: 3"),
            Err(ChordError::InvalidInversion { max: 2, .. })
        ));
        assert!(matches!(
            Settings::from_yaml("octave: 9"),
            Err(ChordError::ConfigError(_))
        ));
        assert!(matches!(
            Settings::from_yaml("memory-slots: 12"),
            Err(ChordError::ConfigError(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            Settings::from_yaml("key: [C, D"),
            Err(ChordError::ConfigError(_))
        ));
        assert!(matches!(
            Settings::from_yaml("tempo: 120"),
            Err(ChordError::ConfigError(_))
        ));
    }
}
