//! Chord-type classification for display labels
//!
//! Best-effort inverse of [`compute_chord`](super::compute_chord): undo the recorded
//! inversion, reduce the notes to pitch classes relative to the lowest one, and look the
//! resulting interval pattern up in a fixed table.
//!
//! Ninths are stored folded into the octave (14 → 2) because the pattern is built from
//! pitch classes, so `dom9`, `maj9`, `min9` and `add9` can actually match.

use crate::pitch::Pitch;

/// Known interval patterns, as sorted semitone distances from the lowest note.
const CHORD_PATTERNS: [(&[u8], &str); 16] = [
    (&[0, 4, 7], "maj"),
    (&[0, 3, 7], "min"),
    (&[0, 3, 6], "dim"),
    (&[0, 4, 8], "aug"),
    (&[0, 4, 7, 10], "dom7"),
    (&[0, 4, 7, 11], "maj7"),
    (&[0, 3, 7, 10], "min7"),
    (&[0, 3, 6, 9], "dim7"),
    (&[0, 2, 4, 7, 10], "dom9"),
    (&[0, 2, 4, 7, 11], "maj9"),
    (&[0, 2, 3, 7, 10], "min9"),
    (&[0, 2, 7], "sus2"),
    (&[0, 5, 7], "sus4"),
    (&[0, 4, 7, 9], "maj6"),
    (&[0, 3, 7, 9], "min6"),
    (&[0, 2, 4, 7], "add9"),
];

/// Label for chords whose pattern is not in the table.
pub const CUSTOM_LABEL: &str = "Custom";

/// Classify a chord into a short label such as `"maj7"`.
///
/// `inversion` is the inversion the chord was built with; it is undone first by lowering
/// the first `inversion` notes (in the given order) an octave. This is lossy when a
/// voicing has already moved notes around.
///
/// Returns an empty string for fewer than three notes and [`CUSTOM_LABEL`] for unknown
/// shapes.
///
/// # Examples
/// ```
/// use chordgen::{classify_chord_type, Pitch};
///
/// let notes: Vec<Pitch> = ["G3", "B3", "D4", "F4"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// assert_eq!(classify_chord_type(&notes, 0), "dom7");
///
/// let cluster: Vec<Pitch> = ["C4", "C#4", "D4"].iter().map(|s| s.parse().unwrap()).collect();
/// assert_eq!(classify_chord_type(&cluster, 0), "Custom");
/// ```
pub fn classify_chord_type(pitches: &[Pitch], inversion: u8) -> String {
    if pitches.len() < 3 {
        return String::new();
    }

    let mut normalized = pitches.to_vec();
    if inversion > 0 {
        for note in normalized.iter_mut().take(inversion as usize) {
            *note = note.shift_octave(-1);
        }
        normalized.sort();
    }

    let intervals = intervals_from_first(&normalized);
    CHORD_PATTERNS
        .iter()
        .find(|(pattern, _)| *pattern == intervals.as_slice())
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| CUSTOM_LABEL.to_string())
}

/// Canonical pattern string (e.g. `"0,4,7"`) relative to the first note.
pub fn interval_pattern(pitches: &[Pitch]) -> String {
    intervals_from_first(pitches)
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn intervals_from_first(pitches: &[Pitch]) -> Vec<u8> {
    let Some(first) = pitches.first() else {
        return vec![];
    };
    let mut intervals: Vec<u8> = pitches
        .iter()
        .map(|p| p.pitch_class.interval_from(first.pitch_class))
        .collect();
    intervals.sort_unstable();
    intervals
}
