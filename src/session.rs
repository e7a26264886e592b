//! # Session
//!
//! The single-threaded controller that sits between input events and the engine.
//!
//! A [`Session`] owns the user's current selections, the chord memory and a
//! [`SoundBackend`]. Each trigger computes a chord from an explicit [`ChordContext`],
//! silences whatever was sounding, attacks the new pitches and records them.
//!
//! ## Temporary Override
//! Selecting an override chord type only lasts for the next trigger: after a chord is
//! played the override is cleared. Releasing a key also clears it unless a scale key or
//! override key is still held.
//!
//! ## Example
//! ```rust
//! use chordgen::session::{Session, SoundBackend};
//! use chordgen::{ChordType, PitchClass, Settings};
//!
//! #[derive(Default)]
//! struct Silent;
//! impl SoundBackend for Silent {
//!     fn attack(&mut self, _pitches: &[String]) {}
//!     fn release_all(&mut self) {}
//! }
//!
//! let mut session = Session::new(Silent, &Settings::default());
//! session.select_override(Some(ChordType::Sus4));
//! let chord = session.play_chord(PitchClass::D);
//!
//! assert_eq!(chord.len(), 3);
//! assert_eq!(session.memory().label(0).as_deref(), Some("sus4"));
//! assert_eq!(session.context().override_type, None);
//! ```

use crate::config::{Settings, MAX_OCTAVE, MIN_OCTAVE};
use crate::engine::{
    compute_chord, scale_notes, ChordContext, ChordType, Extension, Mode, Quality, Voicing,
};
use crate::error::ChordError;
use crate::keymap::{Command, PAGE_SIZE};
use crate::memory::{ChordDescriptor, MemoryStore};
use crate::pitch::{pitch_names, Pitch, PitchClass};
use tracing::{debug, info};

/// External synthesizer.
///
/// Both calls are fire-and-forget; the session never waits for or inspects a result.
pub trait SoundBackend {
    /// Start sounding exactly these pitches (e.g. `["C4", "E4", "G4"]`).
    fn attack(&mut self, pitches: &[String]);

    /// Stop every sounding note.
    fn release_all(&mut self);
}

/// Backend that only logs what would be played.
#[derive(Debug, Default)]
pub struct LoggingBackend;

impl SoundBackend for LoggingBackend {
    fn attack(&mut self, pitches: &[String]) {
        let midi: Vec<i32> = pitches
            .iter()
            .filter_map(|name| name.parse::<Pitch>().ok())
            .map(Pitch::midi)
            .collect();
        info!(?midi, "attack {}", pitches.join(" "));
    }

    fn release_all(&mut self) {
        debug!("release all");
    }
}

pub struct Session<B: SoundBackend> {
    backend: B,
    context: ChordContext,
    octave: i32,
    temp_override: Option<ChordType>,
    memory: MemoryStore,
    override_page: usize,
    memory_page: usize,
    /// Held scale degrees, oldest press first.
    held_scale_keys: Vec<usize>,
    held_override_key: Option<usize>,
    held_memory_key: Option<usize>,
}

impl<B: SoundBackend> Session<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            context: settings.context.with_override(None),
            octave: settings.octave,
            temp_override: None,
            memory: MemoryStore::new(settings.memory_slots),
            override_page: 0,
            memory_page: 0,
            held_scale_keys: Vec::new(),
            held_override_key: None,
            held_memory_key: None,
        }
    }

    /// The context the next trigger will use, temporary override included.
    pub fn context(&self) -> ChordContext {
        self.context.with_override(self.temp_override)
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn override_page(&self) -> usize {
        self.override_page
    }

    pub fn memory_page(&self) -> usize {
        self.memory_page
    }

    /// The seven roots of the current scale keyboard.
    pub fn scale_roots(&self) -> [PitchClass; 7] {
        scale_notes(self.context.key, self.context.mode)
    }

    pub fn set_key(&mut self, key: PitchClass) {
        self.context.key = key;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.context.mode = mode;
    }

    pub fn set_quality(&mut self, quality: Quality) {
        self.context.quality = quality;
    }

    /// Change extension; an inversion the new shape doesn't have resets to root position.
    pub fn set_extension(&mut self, extension: Extension) {
        self.context = self.context.with_extension(extension);
    }

    pub fn set_inversion(&mut self, inversion: u8) -> Result<(), ChordError> {
        let max = self.context.extension.max_inversion();
        if inversion > max {
            return Err(ChordError::InvalidInversion {
                inversion,
                extension: self.context.extension.name().to_string(),
                max,
            });
        }
        self.context.inversion = inversion;
        Ok(())
    }

    pub fn set_voicing(&mut self, voicing: Voicing) {
        self.context.voicing = voicing;
    }

    /// Use `inversion` for the next trigger only.
    pub fn set_temp_inversion(&mut self, inversion: Option<u8>) {
        self.context.temp_inversion = inversion;
    }

    /// Use `voicing` for the next trigger only.
    pub fn set_temp_voicing(&mut self, voicing: Option<Voicing>) {
        self.context.temp_voicing = voicing;
    }

    /// Arm an override chord type for the next trigger.
    pub fn select_override(&mut self, chord_type: Option<ChordType>) {
        self.temp_override = chord_type;
    }

    pub fn octave_up(&mut self) {
        if self.octave < MAX_OCTAVE {
            self.octave += 1;
        }
    }

    pub fn octave_down(&mut self) {
        if self.octave > MIN_OCTAVE {
            self.octave -= 1;
        }
    }

    /// Build and sound the chord on `root` at the base octave.
    ///
    /// Nothing sounds and nothing is recorded when the root is outside the scale under
    /// natural quality. The temporary override, inversion and voicing are consumed either
    /// way.
    pub fn play_chord(&mut self, root: PitchClass) -> Vec<Pitch> {
        let ctx = self.context();
        let pitches = compute_chord(root, self.octave, &ctx);

        if pitches.is_empty() {
            debug!(root = %root, "root not playable in current scale");
        } else {
            self.backend.release_all();
            self.backend.attack(&pitch_names(&pitches));
            self.memory
                .record(ChordDescriptor::new(root, self.octave, &ctx, pitches.clone()));
        }

        self.temp_override = None;
        self.context.temp_inversion = None;
        self.context.temp_voicing = None;
        pitches
    }

    /// Play the chord on scale degree `degree` (0-6) of the current key.
    pub fn play_scale_degree(&mut self, degree: usize) -> Vec<Pitch> {
        match self.scale_roots().get(degree) {
            Some(&root) => self.play_chord(root),
            None => vec![],
        }
    }

    /// Replay a stored chord exactly as it was recorded, without recording it again.
    ///
    /// The stored extension, inversion and voicing become the current selections and the
    /// stored override is armed, as if the user had dialled the chord back in.
    pub fn play_memory(&mut self, slot: usize) -> Vec<Pitch> {
        let Some(stored) = self.memory.recall(slot).cloned() else {
            debug!(slot, "memory slot is empty");
            return vec![];
        };

        self.temp_override = stored.override_type;
        self.context = self
            .context
            .with_extension(stored.extension)
            .with_inversion(stored.inversion)
            .with_voicing(stored.voicing);

        self.backend.release_all();
        self.backend.attack(&pitch_names(&stored.pitches));
        stored.pitches
    }

    /// Silence everything. The armed override survives only while a scale or override
    /// key is held.
    pub fn stop(&mut self) {
        self.backend.release_all();
        if self.held_scale_keys.is_empty() && self.held_override_key.is_none() {
            self.temp_override = None;
        }
    }

    /// Dispatch a keyboard command. Returns the pitches that started sounding, if any.
    pub fn apply(&mut self, command: Command) -> Vec<Pitch> {
        debug!(?command, "applying command");
        match command {
            Command::ScaleKeyDown(degree) => {
                self.held_scale_keys.retain(|&held| held != degree);
                self.held_scale_keys.push(degree);
                self.play_scale_degree(degree)
            }
            Command::ScaleKeyUp(degree) => {
                self.held_scale_keys.retain(|&held| held != degree);
                self.stop();
                vec![]
            }
            Command::MemoryKeyDown(index) => {
                self.held_memory_key = Some(index);
                self.play_memory(self.memory_page * PAGE_SIZE + index)
            }
            Command::MemoryKeyUp(index) => {
                if self.held_memory_key == Some(index) {
                    self.held_memory_key = None;
                    self.stop();
                }
                vec![]
            }
            Command::OverrideKeyDown(index) => {
                let Some(chord_type) = ChordType::from_index(self.override_page * PAGE_SIZE + index)
                else {
                    return vec![];
                };
                self.held_override_key = Some(index);
                self.temp_override = Some(chord_type);
                // Re-trigger the most recently pressed scale key with the new chord type
                match self.held_scale_keys.last().copied() {
                    Some(degree) => self.play_scale_degree(degree),
                    None => vec![],
                }
            }
            Command::OverrideKeyUp(index) => {
                if self.held_override_key == Some(index) {
                    if self.held_scale_keys.is_empty() {
                        self.temp_override = None;
                    }
                    self.held_override_key = None;
                }
                vec![]
            }
            Command::OverridePage(page) => {
                self.override_page = page;
                vec![]
            }
            Command::MemoryPage(page) => {
                self.memory_page = page;
                vec![]
            }
            Command::OctaveDown => {
                self.octave_down();
                vec![]
            }
            Command::OctaveUp => {
                self.octave_up();
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingBackend {
        events: Vec<String>,
    }

    impl SoundBackend for RecordingBackend {
        fn attack(&mut self, pitches: &[String]) {
            self.events.push(format!("attack {}", pitches.join(" ")));
        }

        fn release_all(&mut self) {
            self.events.push("release".to_string());
        }
    }

    fn session() -> Session<RecordingBackend> {
        Session::new(RecordingBackend::default(), &Settings::default())
    }

    #[test]
    fn test_play_chord_releases_then_attacks_and_records() {
        let mut s = session();
        let chord = s.play_chord(PitchClass::C);
        assert_eq!(pitch_names(&chord), ["C4", "E4", "G4"]);
        assert_eq!(s.backend().events, ["release", "attack C4 E4 G4"]);
        assert_eq!(s.memory().len(), 1);
    }

    #[test]
    fn test_unplayable_root_is_silent() {
        let mut s = session();
        assert!(s.play_chord(PitchClass::C_SHARP).is_empty());
        assert!(s.backend().events.is_empty());
        assert!(s.memory().is_empty());
    }

    #[test]
    fn test_override_is_consumed_by_trigger() {
        let mut s = session();
        s.select_override(Some(ChordType::Minor));
        let chord = s.play_chord(PitchClass::C_SHARP);
        assert_eq!(pitch_names(&chord), ["C#4", "E4", "G#4"]);
        assert_eq!(s.context().override_type, None);
        assert!(s.play_chord(PitchClass::C_SHARP).is_empty());
    }

    #[test]
    fn test_recall_does_not_record() {
        let mut s = session();
        s.play_chord(PitchClass::C);
        s.play_chord(PitchClass::G);
        let recalled = s.play_memory(1);
        assert_eq!(pitch_names(&recalled), ["C4", "E4", "G4"]);
        assert_eq!(s.memory().len(), 2);
        assert_eq!(s.backend().events.last().unwrap(), "attack C4 E4 G4");

        assert!(s.play_memory(5).is_empty());
        assert!(s.play_memory(99).is_empty());
    }

    #[test]
    fn test_recall_restores_chord_settings() {
        let mut s = session();
        s.set_extension(Extension::Seventh);
        s.set_inversion(2).unwrap();
        s.set_voicing(Voicing::Drop2);
        s.play_chord(PitchClass::D);

        s.set_extension(Extension::Triad);
        s.set_voicing(Voicing::Close);
        s.play_memory(0);

        let ctx = s.context();
        assert_eq!(ctx.extension, Extension::Seventh);
        assert_eq!(ctx.inversion, 2);
        assert_eq!(ctx.voicing, Voicing::Drop2);
    }

    #[test]
    fn test_inversion_validation() {
        let mut s = session();
        assert!(matches!(
            s.set_inversion(3),
            Err(ChordError::InvalidInversion { max: 2, .. })
        ));
        s.set_extension(Extension::Ninth);
        s.set_inversion(4).unwrap();
        s.set_extension(Extension::Seventh);
        assert_eq!(s.context().inversion, 0);
    }

    #[test]
    fn test_octave_limits() {
        let mut s = session();
        for _ in 0..10 {
            s.apply(Command::OctaveUp);
        }
        assert_eq!(s.octave(), MAX_OCTAVE);
        for _ in 0..10 {
            s.apply(Command::OctaveDown);
        }
        assert_eq!(s.octave(), MIN_OCTAVE);
    }

    #[test]
    fn test_scale_keys_follow_key_and_mode() {
        let mut s = session();
        s.set_key(PitchClass::A);
        s.set_mode(Mode::Minor);
        let chord = s.apply(Command::ScaleKeyDown(2));
        assert_eq!(pitch_names(&chord), ["C4", "E4", "G4"]);
        s.apply(Command::ScaleKeyUp(2));
        assert_eq!(s.backend().events.last().unwrap(), "release");
    }

    #[test]
    fn test_override_key_retriggers_held_scale_key() {
        let mut s = session();
        s.apply(Command::ScaleKeyDown(0));
        // page 0, key 7 -> dominant7
        let chord = s.apply(Command::OverrideKeyDown(6));
        assert_eq!(pitch_names(&chord), ["C4", "E4", "G4", "A#4"]);
        assert_eq!(s.memory().label(0).as_deref(), Some("dominant7"));
    }

    #[test]
    fn test_override_key_paging() {
        let mut s = session();
        s.apply(Command::OverridePage(1));
        s.apply(Command::OverrideKeyDown(0));
        assert_eq!(s.context().override_type, Some(ChordType::Major9));

        // Releasing with no scale key held disarms it
        s.apply(Command::OverrideKeyUp(0));
        assert_eq!(s.context().override_type, None);
    }

    #[test]
    fn test_override_held_across_stop() {
        let mut s = session();
        s.apply(Command::OverrideKeyDown(3));
        s.stop();
        assert_eq!(s.context().override_type, Some(ChordType::Augmented));
    }

    #[test]
    fn test_memory_keys_use_pages() {
        let mut s = session();
        for root in s.scale_roots() {
            s.play_chord(root);
        }
        // Seven chords: B is newest in slot 0, C is oldest in slot 6
        let chord = s.apply(Command::MemoryKeyDown(6));
        assert_eq!(chord[0].pitch_class, PitchClass::C);
        s.apply(Command::MemoryKeyUp(6));

        s.apply(Command::MemoryPage(1));
        assert!(s.apply(Command::MemoryKeyDown(0)).is_empty());
    }

    #[test]
    fn test_releasing_one_scale_key_keeps_the_other_held() {
        let mut s = session();
        s.apply(Command::ScaleKeyDown(0));
        s.apply(Command::ScaleKeyDown(1));
        s.apply(Command::ScaleKeyUp(0));

        // "s" (D) is still down, so a dominant7 override re-triggers it
        let chord = s.apply(Command::OverrideKeyDown(6));
        assert_eq!(pitch_names(&chord), ["D4", "F#4", "A4", "C5"]);
        assert_eq!(s.memory().label(0).as_deref(), Some("dominant7"));
    }

    #[test]
    fn test_override_survives_release_while_another_scale_key_is_held() {
        let mut s = session();
        s.apply(Command::ScaleKeyDown(0));
        s.apply(Command::ScaleKeyDown(1));
        s.select_override(Some(ChordType::Sus4));
        s.apply(Command::ScaleKeyUp(0));
        assert_eq!(s.context().override_type, Some(ChordType::Sus4));

        s.apply(Command::ScaleKeyUp(1));
        assert_eq!(s.context().override_type, None);
    }

    #[test]
    fn test_retrigger_uses_latest_held_scale_key() {
        let mut s = session();
        s.apply(Command::ScaleKeyDown(4));
        s.apply(Command::ScaleKeyDown(2));
        // page 0, key 4 -> augmented
        let chord = s.apply(Command::OverrideKeyDown(3));
        assert_eq!(pitch_names(&chord), ["E4", "G#4", "C5"]);
    }

    #[test]
    fn test_temporary_inversion_and_voicing_last_one_trigger() {
        let mut s = session();
        s.set_extension(Extension::Seventh);
        s.set_temp_inversion(Some(1));
        s.set_temp_voicing(Some(Voicing::Shell));
        let chord = s.play_chord(PitchClass::C);
        // C raised an octave, then shell keeps E, G and C from E G B C
        assert_eq!(pitch_names(&chord), ["E4", "G4", "C5"]);
        assert_eq!(s.memory().recall(0).map(|d| d.voicing), Some(Voicing::Shell));
        assert_eq!(s.memory().recall(0).map(|d| d.inversion), Some(1));

        let chord = s.play_chord(PitchClass::C);
        assert_eq!(pitch_names(&chord), ["C4", "E4", "G4", "B4"]);
        assert_eq!(s.context().temp_inversion, None);
        assert_eq!(s.context().temp_voicing, None);
    }

    #[test]
    fn test_locked_memory_still_plays() {
        let mut s = session();
        s.memory_mut().toggle_lock();
        assert_eq!(s.play_chord(PitchClass::F).len(), 3);
        assert!(s.memory().is_empty());
    }
}
