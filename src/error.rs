//! # Error Types
//!
//! This module defines all error types for the chord generator.
//!
//! The theory engine itself never fails: an unplayable root yields an empty chord and an
//! unknown interval pattern yields the `"Custom"` label. Errors only appear at the
//! boundaries where text comes in (pitch strings, settings files, selector names) or where
//! a session setting is validated.
//!
//! ## Error Types
//! - `PitchParse` - A `"<name><octave>"` string that cannot be read as a pitch
//! - `UnknownName` - A mode, quality, extension, voicing or chord-type name that doesn't exist
//! - `InvalidInversion` - An inversion above the current extension's maximum
//! - `ConfigError` - Invalid YAML settings
//!
//! ## Usage
//! ```rust
//! use chordgen::{ChordError, Pitch};
//!
//! match "H4".parse::<Pitch>() {
//!     Ok(pitch) => println!("Parsed {}", pitch),
//!     Err(ChordError::PitchParse { input, message }) => {
//!         eprintln!("Bad pitch '{}': {}", input, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ChordError {
    /// A pitch string could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordgen::ChordError;
    /// let err = ChordError::PitchParse {
    ///     input: "X4".to_string(),
    ///     message: "unknown note name 'X'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid pitch 'X4': unknown note name 'X'");
    /// ```
    #[error("Invalid pitch '{input}': {message}")]
    PitchParse { input: String, message: String },

    /// A selector name (mode, quality, extension, voicing, chord type) is not recognised.
    ///
    /// # Example
    /// ```
    /// # use chordgen::ChordError;
    /// let err = ChordError::UnknownName {
    ///     kind: "mode",
    ///     value: "aeolian".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unknown mode: aeolian");
    /// ```
    #[error("Unknown {kind}: {value}")]
    UnknownName { kind: &'static str, value: String },

    /// The requested inversion is out of range for the active extension.
    #[error("Inversion {inversion} is not available for {extension} chords (maximum {max})")]
    InvalidInversion {
        inversion: u8,
        extension: String,
        max: u8,
    },

    /// Invalid settings file.
    ///
    /// # Example
    /// ```
    /// # use chordgen::ChordError;
    /// let err = ChordError::ConfigError("memory-slots must be 8 or 16".to_string());
    /// assert_eq!(err.to_string(), "Invalid settings: memory-slots must be 8 or 16");
    /// ```
    #[error("Invalid settings: {0}")]
    ConfigError(String),
}
