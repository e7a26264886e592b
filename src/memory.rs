//! # Chord Memory Store
//!
//! A fixed-size bank of recently played chords.
//!
//! ## Slot Model
//! - Slot 0 always receives the newest chord; everything else shifts one slot down
//! - The slot past the capacity falls off, whether it held a chord or was empty
//! - Deleting a slot leaves a hole that moves along with later insertions
//! - While locked, recording is ignored, but swap/delete/clear still work
//!
//! ## Duplicates
//! A chord is a duplicate when any occupied slot already holds the exact same list of
//! pitches. The settings that produced it (override, inversion, ...) are not compared, so
//! two routes to the same sounding chord only take one slot.
//!
//! ## Example
//! ```rust
//! use chordgen::{compute_chord, ChordContext, ChordDescriptor, MemoryStore, PitchClass};
//!
//! let ctx = ChordContext::default();
//! let mut memory = MemoryStore::new(8);
//!
//! let pitches = compute_chord(PitchClass::C, 4, &ctx);
//! assert!(memory.record(ChordDescriptor::new(PitchClass::C, 4, &ctx, pitches.clone())));
//! assert!(!memory.record(ChordDescriptor::new(PitchClass::C, 4, &ctx, pitches)));
//!
//! assert_eq!(memory.len(), 1);
//! assert_eq!(memory.label(0).as_deref(), Some("maj"));
//! ```

use crate::engine::{classify_chord_type, ChordContext, ChordType, Extension, Voicing};
use crate::pitch::{Pitch, PitchClass};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Slots in the full memory bank (two pages of eight).
pub const DEFAULT_CAPACITY: usize = 16;

/// Slots in the compact, single-page configuration.
pub const COMPACT_CAPACITY: usize = 8;

/// A chord as it was played, together with the settings that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDescriptor {
    pub root: PitchClass,
    pub octave: i32,
    #[serde(rename = "override")]
    pub override_type: Option<ChordType>,
    pub extension: Extension,
    pub inversion: u8,
    pub voicing: Voicing,
    pub pitches: Vec<Pitch>,
}

impl ChordDescriptor {
    /// Capture the chord-shaping part of `context` alongside the computed pitches.
    pub fn new(root: PitchClass, octave: i32, context: &ChordContext, pitches: Vec<Pitch>) -> Self {
        Self {
            root,
            octave,
            override_type: context.override_type,
            extension: context.extension,
            inversion: context.effective_inversion(),
            voicing: context.effective_voicing(),
            pitches,
        }
    }

    /// Display label: the override name when one was used, otherwise the classified
    /// chord type.
    pub fn label(&self) -> String {
        match self.override_type {
            Some(chord_type) => chord_type.name().to_string(),
            None => classify_chord_type(&self.pitches, self.inversion),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    slots: Vec<Option<ChordDescriptor>>,
    locked: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            locked: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Put a freshly played chord in slot 0.
    ///
    /// Returns `false` without touching the bank when it is locked or the chord's
    /// pitches are already stored.
    pub fn record(&mut self, descriptor: ChordDescriptor) -> bool {
        if self.locked {
            debug!("memory locked, not recording");
            return false;
        }
        if self.contains_pitches(&descriptor.pitches) {
            debug!(root = %descriptor.root, "chord already in memory");
            return false;
        }

        debug!(root = %descriptor.root, label = %descriptor.label(), "recording chord");
        let capacity = self.capacity();
        self.slots.insert(0, Some(descriptor));
        self.slots.truncate(capacity);
        true
    }

    fn contains_pitches(&self, pitches: &[Pitch]) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|existing| existing.pitches == pitches)
    }

    /// The chord in `slot`, or `None` for empty and out-of-range slots.
    pub fn recall(&self, slot: usize) -> Option<&ChordDescriptor> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Label of the chord in `slot`.
    pub fn label(&self, slot: usize) -> Option<String> {
        self.recall(slot).map(ChordDescriptor::label)
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b || a >= self.capacity() || b >= self.capacity() {
            return;
        }
        debug!(a, b, "swapping memory slots");
        self.slots.swap(a, b);
    }

    pub fn delete(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            debug!(slot, "clearing memory slot");
            *entry = None;
        }
    }

    pub fn clear(&mut self) {
        debug!("clearing all memory slots");
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Flip the lock and return the new state.
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        debug!(locked = self.locked, "memory lock toggled");
        self.locked
    }

    /// All slots in order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = Option<&ChordDescriptor>> {
        self.slots.iter().map(Option::as_ref)
    }
}
