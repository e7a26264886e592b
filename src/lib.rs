pub mod config;
pub mod engine;
pub mod error;
pub mod keymap;
pub mod memory;
pub mod pitch;
pub mod session;

pub use config::Settings;
pub use engine::{
    classify_chord_type, compute_chord, is_note_playable, scale_notes, ChordContext, ChordType,
    Extension, Mode, Quality, Voicing,
};
pub use error::*;
pub use memory::{ChordDescriptor, MemoryStore};
pub use pitch::{pitch_names, Pitch, PitchClass};

/// Compute the chord for a root given as text (e.g. "F#") and return its pitch names
/// together with its display label.
/// This is the main convenience entry point for callers that work with strings.
///
/// ```
/// use chordgen::{chord_for_name, ChordContext};
///
/// let (names, label) = chord_for_name("A", 3, &ChordContext::default())?;
/// assert_eq!(names, ["A3", "C4", "E4"]);
/// assert_eq!(label, "min");
/// # Ok::<(), chordgen::ChordError>(())
/// ```
pub fn chord_for_name(
    root: &str,
    octave: i32,
    context: &ChordContext,
) -> Result<(Vec<String>, String), ChordError> {
    let root = PitchClass::from_str(root).ok_or_else(|| ChordError::UnknownName {
        kind: "note",
        value: root.to_string(),
    })?;
    let pitches = compute_chord(root, octave, context);
    let label = classify_chord_type(&pitches, context.effective_inversion());
    Ok((pitch_names(&pitches), label))
}
