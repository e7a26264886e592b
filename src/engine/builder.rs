//! Chord construction: base notes, inversion, voicing.

use super::types::{ChordContext, ChordType, Mode, QualityIntervals, Voicing};
use crate::pitch::{Pitch, PitchClass};
use tracing::{debug, trace};

/// Build the chord rooted at `tonic` in `octave` for the given context.
///
/// Returns the pitches in ascending order. An empty result means the root is foreign to
/// the active scale under natural quality and nothing should sound.
///
/// # Pipeline
/// 1. Base notes, from the override table when one is selected, otherwise from the
///    scale (natural quality) or the forced-quality table
/// 2. Inversion: the first `k` notes in construction order move up an octave
/// 3. Voicing
///
/// # Examples
/// ```
/// use chordgen::{compute_chord, pitch_names, ChordContext, Extension, Mode, PitchClass};
///
/// let ctx = ChordContext::new(PitchClass::C, Mode::Major);
/// let chord = compute_chord(PitchClass::C, 4, &ctx);
/// assert_eq!(pitch_names(&chord), ["C4", "E4", "G4"]);
///
/// // ii7 in C major comes out as a minor seventh
/// let ctx = ctx.with_extension(Extension::Seventh);
/// let chord = compute_chord(PitchClass::D, 4, &ctx);
/// assert_eq!(pitch_names(&chord), ["D4", "F4", "A4", "C5"]);
///
/// // C# is not in C major
/// assert!(compute_chord(PitchClass::C_SHARP, 4, &ctx).is_empty());
/// ```
pub fn compute_chord(tonic: PitchClass, octave: i32, context: &ChordContext) -> Vec<Pitch> {
    let notes = match context.override_type {
        Some(chord_type) => override_notes(tonic, octave, chord_type),
        None => scale_notes_for(tonic, octave, context),
    };

    let inverted = apply_inversion(notes, context.effective_inversion());
    let voiced = apply_voicing(inverted, context.effective_voicing());

    debug!(
        root = %tonic,
        octave,
        notes = ?voiced.iter().map(Pitch::to_string).collect::<Vec<_>>(),
        "computed chord"
    );
    voiced
}

/// Stamp a mode-independent chord shape on the root.
fn override_notes(tonic: PitchClass, octave: i32, chord_type: ChordType) -> Vec<Pitch> {
    trace!(chord_type = chord_type.name(), "using override chord");
    chord_type
        .intervals()
        .iter()
        .map(|&interval| Pitch::from_offset(tonic, octave, interval))
        .collect()
}

fn scale_notes_for(tonic: PitchClass, octave: i32, context: &ChordContext) -> Vec<Pitch> {
    let offsets = match context.quality.intervals() {
        None => match natural_offsets(tonic, context) {
            Some(offsets) => offsets,
            None => {
                trace!(root = %tonic, key = %context.key, "root is outside the scale");
                return vec![];
            }
        },
        Some(intervals) => forced_offsets(context, intervals),
    };

    offsets
        .into_iter()
        .map(|offset| Pitch::from_offset(tonic, octave, offset))
        .collect()
}

/// Intervals stacked from the mode itself. `None` when the root is not a scale degree.
fn natural_offsets(tonic: PitchClass, context: &ChordContext) -> Option<Vec<u8>> {
    let scale = context.mode.offsets();
    let degree = context.mode.degree_of(tonic.interval_from(context.key))?;

    Some(
        context
            .extension
            .steps()
            .iter()
            .map(|&step| {
                let target = (degree + step) % 7;
                (scale[target] + 12 - scale[degree]) % 12
            })
            .collect(),
    )
}

fn forced_offsets(context: &ChordContext, intervals: QualityIntervals) -> Vec<u8> {
    context
        .extension
        .steps()
        .iter()
        .map(|&step| match step {
            0 => 0,
            2 => intervals.third,
            4 => intervals.fifth,
            6 => intervals.seventh,
            8 => intervals.ninth,
            _ => 0,
        })
        .collect()
}

/// Raise the first `inversion` notes (construction order) by an octave, then sort.
///
/// An inversion larger than the chord raises every note; it never reads past the end.
pub fn apply_inversion(mut notes: Vec<Pitch>, inversion: u8) -> Vec<Pitch> {
    if inversion == 0 || notes.is_empty() {
        return notes;
    }
    for note in notes.iter_mut().take(inversion as usize) {
        *note = note.shift_octave(1);
    }
    notes.sort();
    notes
}

/// Rearrange a chord across octaves and sort it ascending.
///
/// Positions refer to the list as it comes out of the inversion step: pitch order after
/// an inversion, construction order in root position (where a folded ninth still sits
/// last). Chords with fewer than three notes are only sorted.
pub fn apply_voicing(mut notes: Vec<Pitch>, voicing: Voicing) -> Vec<Pitch> {
    let len = notes.len();
    if len < 3 {
        notes.sort();
        return notes;
    }

    match voicing {
        Voicing::Close => {}
        Voicing::Open => {
            for note in notes.iter_mut().skip(1) {
                *note = note.shift_octave(1);
            }
        }
        Voicing::Drop2 => {
            if len >= 4 {
                notes[len - 2] = notes[len - 2].shift_octave(-1);
            }
        }
        Voicing::Drop3 => {
            if len >= 4 {
                notes[len - 3] = notes[len - 3].shift_octave(-1);
            }
        }
        Voicing::Shell => {
            // root, third, seventh
            if len >= 4 {
                notes = vec![notes[0], notes[1], notes[3]];
            }
        }
    }

    notes.sort();
    notes
}

/// Whether `note` is a degree of the scale `key`/`mode`.
pub fn is_note_playable(note: PitchClass, key: PitchClass, mode: Mode) -> bool {
    mode.degree_of(note.interval_from(key)).is_some()
}

/// The seven pitch classes of a scale, in degree order starting at the tonic.
///
/// ```
/// use chordgen::{scale_notes, Mode, PitchClass};
///
/// let names: Vec<&str> = scale_notes(PitchClass::D, Mode::Dorian)
///     .iter()
///     .map(|pc| pc.name())
///     .collect();
/// assert_eq!(names, ["D", "E", "F", "G", "A", "B", "C"]);
/// ```
pub fn scale_notes(key: PitchClass, mode: Mode) -> [PitchClass; 7] {
    mode.offsets()
        .map(|offset| PitchClass::new(key.semitone() as i32 + offset as i32))
}
