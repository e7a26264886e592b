//! # Chord Theory Engine
//!
//! Pure functions that turn a root plus a [`ChordContext`] into concrete pitches, and
//! pitches back into a chord label.
//!
//! ## Sub-modules
//! - `types` - Mode, Quality, Extension, ChordType, Voicing and ChordContext
//! - `builder` - Chord construction (base notes → inversion → voicing)
//! - `classify` - Interval-pattern classification for display labels
//!
//! ## Entry Points
//! - [`compute_chord()`] - Build an ascending list of pitches (possibly empty)
//! - [`classify_chord_type()`] - Label a list of pitches ("maj", "min7", "Custom", ...)
//!
//! ## Example
//! ```rust
//! use chordgen::engine::{classify_chord_type, compute_chord, ChordContext, ChordType};
//! use chordgen::{pitch_names, PitchClass};
//!
//! let ctx = ChordContext::default().with_override(Some(ChordType::Dominant7));
//! let chord = compute_chord(PitchClass::G, 3, &ctx);
//!
//! assert_eq!(pitch_names(&chord), ["G3", "B3", "D4", "F4"]);
//! assert_eq!(classify_chord_type(&chord, 0), "dom7");
//! ```
//!
//! ## Scale-Based Chords
//!
//! Without an override, the root is located in the active scale and the chord is stacked
//! in thirds from the scale itself, so every degree gets its diatonic colour for free:
//! in C major, `B` with a seventh extension yields the half-diminished `B D F A`.
//!
//! Under `Quality::Natural` a root outside the scale produces an empty chord. Forced
//! qualities (`Major`, `Minor`, `Diminished`) ignore scale membership and use fixed
//! third/fifth/seventh/ninth intervals.
//!
//! ## Inversion and Voicing
//!
//! Inversion `k` raises the first `k` notes of the chord *in construction order* (root,
//! third, fifth, ...) by an octave and re-sorts. Voicings then rearrange that list and
//! always hand back ascending pitches. Callers are expected to keep the inversion within
//! [`Extension::max_inversion`]; the engine itself never indexes past the chord.

mod builder;
mod classify;
mod types;


pub use builder::{apply_inversion, apply_voicing, compute_chord, is_note_playable, scale_notes};
pub use classify::{classify_chord_type, interval_pattern, CUSTOM_LABEL};
pub use types::{ChordContext, ChordType, Extension, Mode, Quality, QualityIntervals, Voicing};
