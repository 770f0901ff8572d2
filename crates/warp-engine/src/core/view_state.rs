//! Process-wide view state shared by every renderer and panel.
//!
//! There is exactly one [`ViewStore`] (the writer, deliberately not `Clone`) and any
//! number of [`ViewReader`]s. Readers take a [`ViewState`] snapshot at the start of a
//! frame and use it for that whole frame.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Content section the presentation is focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Home,
    Message,
    Memories,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Home, Section::Message, Section::Memories];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Message => "message",
            Section::Memories => "memories",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownSection(s.to_string()))
    }
}

/// A copy of every flag at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub is_unlocked: bool,
    pub is_warping: bool,
    pub active_section: Section,
    pub is_playing: bool,
    pub current_track: usize,
}

/// The single writer of the shared view state.
#[derive(Debug, Default)]
pub struct ViewStore {
    cell: Rc<Cell<ViewState>>,
}

/// Read-only handle to the shared view state.
#[derive(Debug, Clone)]
pub struct ViewReader {
    cell: Rc<Cell<ViewState>>,
}

impl ViewReader {
    pub fn snapshot(&self) -> ViewState {
        self.cell.get()
    }

    pub fn is_warping(&self) -> bool {
        self.cell.get().is_warping
    }

    pub fn is_unlocked(&self) -> bool {
        self.cell.get().is_unlocked
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a reader for a renderer or panel.
    pub fn reader(&self) -> ViewReader {
        ViewReader {
            cell: Rc::clone(&self.cell),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.cell.get()
    }

    fn update(&mut self, f: impl FnOnce(&mut ViewState)) {
        let mut state = self.cell.get();
        f(&mut state);
        self.cell.set(state);
    }

    pub fn set_unlocked(&mut self, unlocked: bool) {
        self.update(|s| s.is_unlocked = unlocked);
    }

    pub fn set_warping(&mut self, warping: bool) {
        self.update(|s| s.is_warping = warping);
    }

    pub fn set_section(&mut self, section: Section) {
        self.update(|s| s.active_section = section);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.update(|s| s.is_playing = playing);
    }

    pub fn toggle_play(&mut self) {
        self.update(|s| s.is_playing = !s.is_playing);
    }

    /// Select a track. Out-of-range indices are ignored.
    pub fn set_track(&mut self, index: usize, track_count: usize) {
        if index < track_count {
            self.update(|s| s.current_track = index);
        }
    }

    /// Advance to the next track, wrapping at the end of the playlist.
    pub fn next_track(&mut self, track_count: usize) {
        if track_count == 0 {
            return;
        }
        self.update(|s| s.current_track = (s.current_track + 1) % track_count);
    }

    /// Step back one track, wrapping at the start of the playlist.
    pub fn prev_track(&mut self, track_count: usize) {
        if track_count == 0 {
            return;
        }
        self.update(|s| s.current_track = (s.current_track + track_count - 1) % track_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_locked_and_calm() {
        let store = ViewStore::new();
        let state = store.snapshot();
        assert!(!state.is_unlocked);
        assert!(!state.is_warping);
        assert_eq!(state.active_section, Section::Home);
    }

    #[test]
    fn readers_see_writes() {
        let mut store = ViewStore::new();
        let reader = store.reader();
        store.set_warping(true);
        assert!(reader.is_warping());
        store.set_warping(false);
        store.set_unlocked(true);
        assert!(!reader.is_warping());
        assert!(reader.is_unlocked());
    }

    #[test]
    fn snapshot_is_stable_after_write() {
        let mut store = ViewStore::new();
        let reader = store.reader();
        let before = reader.snapshot();
        store.set_warping(true);
        assert!(!before.is_warping);
    }

    #[test]
    fn track_navigation_wraps() {
        let mut store = ViewStore::new();
        store.prev_track(7);
        assert_eq!(store.snapshot().current_track, 6);
        store.next_track(7);
        assert_eq!(store.snapshot().current_track, 0);
        store.set_track(3, 7);
        store.set_track(9, 7);
        assert_eq!(store.snapshot().current_track, 3);
    }

    #[test]
    fn empty_playlist_is_a_no_op() {
        let mut store = ViewStore::new();
        store.next_track(0);
        store.prev_track(0);
        assert_eq!(store.snapshot().current_track, 0);
    }

    #[test]
    fn toggle_play_flips() {
        let mut store = ViewStore::new();
        store.toggle_play();
        assert!(store.snapshot().is_playing);
        store.toggle_play();
        assert!(!store.snapshot().is_playing);
    }

    #[test]
    fn section_parses_case_insensitively() {
        assert_eq!("Memories".parse::<Section>().unwrap(), Section::Memories);
        assert!("gallery".parse::<Section>().is_err());
    }
}
