//! # Keyboard Command Map
//!
//! Translates computer-keyboard shortcuts into [`Command`]s for a
//! [`Session`](crate::session::Session).
//!
//! ## Layout
//! ```text
//! 1 2 3 4 5 6 7 8   override chord (page * 8 + index)     9 / 0   override page 1 / 2
//!  q w e r t y u i  memory slot    (page * 8 + index)     o / p   memory page 1 / 2
//!   a s d f g h j   scale degrees 1-7
//!    z x            octave down / up
//! ```
//!
//! Keys are matched case-insensitively. Scale, memory and override keys produce both a
//! press and a release command; page and octave keys only act on press.

use std::collections::HashSet;

/// Keys that trigger scale degrees 1-7.
pub const SCALE_KEYS: [char; 7] = ['a', 's', 'd', 'f', 'g', 'h', 'j'];

/// Keys that recall memory slots within the current page.
pub const MEMORY_KEYS: [char; 8] = ['q', 'w', 'e', 'r', 't', 'y', 'u', 'i'];

/// Keys that select override chords within the current page.
pub const OVERRIDE_KEYS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// Number of slots or chord types reachable from one page.
pub const PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ScaleKeyDown(usize),
    ScaleKeyUp(usize),
    MemoryKeyDown(usize),
    MemoryKeyUp(usize),
    OverrideKeyDown(usize),
    OverrideKeyUp(usize),
    OverridePage(usize),
    MemoryPage(usize),
    OctaveDown,
    OctaveUp,
}

/// Look up the command for a key press (`pressed = true`) or release.
///
/// ```
/// use chordgen::keymap::{command_for_key, Command};
///
/// assert_eq!(command_for_key('S', true), Some(Command::ScaleKeyDown(1)));
/// assert_eq!(command_for_key('3', false), Some(Command::OverrideKeyUp(2)));
/// assert_eq!(command_for_key('x', false), None);
/// ```
pub fn command_for_key(key: char, pressed: bool) -> Option<Command> {
    let key = key.to_ascii_lowercase();

    if let Some(i) = SCALE_KEYS.iter().position(|&k| k == key) {
        return Some(if pressed {
            Command::ScaleKeyDown(i)
        } else {
            Command::ScaleKeyUp(i)
        });
    }
    if let Some(i) = MEMORY_KEYS.iter().position(|&k| k == key) {
        return Some(if pressed {
            Command::MemoryKeyDown(i)
        } else {
            Command::MemoryKeyUp(i)
        });
    }
    if let Some(i) = OVERRIDE_KEYS.iter().position(|&k| k == key) {
        return Some(if pressed {
            Command::OverrideKeyDown(i)
        } else {
            Command::OverrideKeyUp(i)
        });
    }

    if !pressed {
        return None;
    }
    match key {
        '9' => Some(Command::OverridePage(0)),
        '0' => Some(Command::OverridePage(1)),
        'o' => Some(Command::MemoryPage(0)),
        'p' => Some(Command::MemoryPage(1)),
        'z' => Some(Command::OctaveDown),
        'x' => Some(Command::OctaveUp),
        _ => None,
    }
}

/// Tracks held keys so auto-repeated presses don't retrigger commands.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashSet<char>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command for a key going down, or `None` if it is already held or unmapped.
    pub fn press(&mut self, key: char) -> Option<Command> {
        if !self.held.insert(key.to_ascii_lowercase()) {
            return None;
        }
        command_for_key(key, true)
    }

    pub fn release(&mut self, key: char) -> Option<Command> {
        self.held.remove(&key.to_ascii_lowercase());
        command_for_key(key, false)
    }

    pub fn is_held(&self, key: char) -> bool {
        self.held.contains(&key.to_ascii_lowercase())
    }
}
