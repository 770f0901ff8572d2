use crate::config::{ExperienceConfig, Track};
use crate::core::unlock::{Attempt, UnlockSequence};
use crate::core::view_state::{Section, ViewReader, ViewState, ViewStore};

/// The one component allowed to write view state. Panels and input handlers go
/// through it; renderers get a [`ViewReader`].
#[derive(Debug)]
pub struct Director {
    store: ViewStore,
    unlock: UnlockSequence,
    tracks: Vec<Track>,
}

impl Director {
    pub fn new(config: &ExperienceConfig) -> Self {
        Self {
            store: ViewStore::new(),
            unlock: UnlockSequence::from_config(config),
            tracks: config.tracks.clone(),
        }
    }

    pub fn reader(&self) -> ViewReader {
        self.store.reader()
    }

    pub fn state(&self) -> ViewState {
        self.store.snapshot()
    }

    pub fn submit_passcode(&mut self, input: &str, now: f64) -> Attempt {
        self.unlock.submit(input, now, &mut self.store)
    }

    pub fn poll(&mut self, now: f64) {
        self.unlock.poll(now, &mut self.store);
    }

    pub fn has_error(&self) -> bool {
        self.unlock.has_error()
    }

    pub fn set_section(&mut self, section: Section) {
        self.store.set_section(section);
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.store.snapshot().current_track)
    }

    pub fn toggle_play(&mut self) {
        self.store.toggle_play();
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.store.set_playing(playing);
    }

    pub fn next_track(&mut self) {
        self.store.next_track(self.tracks.len());
    }

    pub fn prev_track(&mut self) {
        self.store.prev_track(self.tracks.len());
    }

    pub fn set_track(&mut self, index: usize) {
        self.store.set_track(index, self.tracks.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExperienceConfig {
        ExperienceConfig {
            tracks: ["Medusa", "Stay", "Señales"]
                .iter()
                .map(|t| Track {
                    title: t.to_string(),
                    src: format!("/music/{}.mp3", t),
                    artist: String::new(),
                })
                .collect(),
            ..ExperienceConfig::default()
        }
    }

    #[test]
    fn readers_follow_unlock() {
        let mut director = Director::new(&config());
        let reader = director.reader();
        director.submit_passcode("EUREKA", 0.0);
        assert!(reader.is_warping());
        director.poll(1.0);
        assert!(reader.is_unlocked());
        assert!(!reader.is_warping());
    }

    #[test]
    fn playlist_wraps_both_ways() {
        let mut director = Director::new(&config());
        director.prev_track();
        assert_eq!(director.current_track().unwrap().title, "Señales");
        director.next_track();
        assert_eq!(director.current_track().unwrap().title, "Medusa");
        director.set_track(1);
        assert_eq!(director.current_track().unwrap().title, "Stay");
    }

    #[test]
    fn empty_playlist_has_no_current_track() {
        let mut director = Director::new(&ExperienceConfig::default());
        director.next_track();
        assert!(director.current_track().is_none());
    }

    #[test]
    fn section_and_playback() {
        let mut director = Director::new(&config());
        director.set_section(Section::Memories);
        director.toggle_play();
        let state = director.state();
        assert_eq!(state.active_section, Section::Memories);
        assert!(state.is_playing);
    }
}
