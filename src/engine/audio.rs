// Audio service contract
//
// The simulation only ever asks for a cue to be played. Mixing, decoding and
// device handling belong to whatever implements `AudioService`.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Playback controls shared between the game and the mixer
#[derive(Debug)]
pub struct AudioParameters {
    volume_bits: AtomicU32,
    paused: AtomicBool,
    done: AtomicBool,
}

impl Default for AudioParameters {
    fn default() -> Self {
        Self {
            volume_bits: AtomicU32::new(1.0f32.to_bits()),
            paused: AtomicBool::new(false),
            done: AtomicBool::new(false),
        }
    }
}

/// Handle to a playing sound or music track
#[derive(Debug, Clone, Default)]
pub struct AudioHandle(Arc<AudioParameters>);

impl AudioHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.0.volume_bits.load(Ordering::Relaxed))
    }

    pub fn set_volume(&self, volume: f32) {
        self.0
            .volume_bits
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.0.paused.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.0.paused.store(paused, Ordering::Relaxed);
    }

    pub fn is_done(&self) -> bool {
        self.0.done.load(Ordering::Relaxed)
    }

    /// Ask the mixer to drop this track
    pub fn stop(&self) {
        self.0.done.store(true, Ordering::Relaxed);
    }
}

/// Fire-and-forget sound playback.
///
/// Implementations must not block; failures are silently ignored.
pub trait AudioService {
    /// Play a one-shot sound effect by logical name (e.g. `"throw1"`)
    fn play_sound(&mut self, name: &str) -> AudioHandle;

    /// Start a looping music track by logical name
    fn play_music(&mut self, name: &str) -> AudioHandle;
}

/// Asset path for a logical sound name
pub fn sound_asset_path(name: &str) -> String {
    format!("assets/sound/{name}.ogg")
}

/// Asset path for a logical music name
pub fn music_asset_path(name: &str) -> String {
    format!("assets/music/{name}.ogg")
}

/// Audio service that plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioService for NullAudio {
    fn play_sound(&mut self, _name: &str) -> AudioHandle {
        AudioHandle::new()
    }

    fn play_music(&mut self, _name: &str) -> AudioHandle {
        AudioHandle::new()
    }
}

/// Audio service that remembers every cue, for tests and headless runs
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub sounds: Vec<String>,
    pub music: Vec<String>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a sound cue was played
    pub fn count(&self, name: &str) -> usize {
        self.sounds.iter().filter(|s| s.as_str() == name).count()
    }
}

impl AudioService for RecordingAudio {
    fn play_sound(&mut self, name: &str) -> AudioHandle {
        log::trace!("sound: {}", sound_asset_path(name));
        self.sounds.push(name.to_string());
        AudioHandle::new()
    }

    fn play_music(&mut self, name: &str) -> AudioHandle {
        log::debug!("music: {}", music_asset_path(name));
        self.music.push(name.to_string());
        AudioHandle::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_defaults() {
        let handle = AudioHandle::new();
        assert_eq!(handle.volume(), 1.0);
        assert!(!handle.is_paused());
        assert!(!handle.is_done());
    }

    #[test]
    fn test_handle_shared_between_clones() {
        let handle = AudioHandle::new();
        let mixer_side = handle.clone();

        handle.set_volume(0.25);
        handle.set_paused(true);
        handle.stop();

        assert_eq!(mixer_side.volume(), 0.25);
        assert!(mixer_side.is_paused());
        assert!(mixer_side.is_done());
    }

    #[test]
    fn test_volume_clamped() {
        let handle = AudioHandle::new();
        handle.set_volume(3.0);
        assert_eq!(handle.volume(), 1.0);
        handle.set_volume(-1.0);
        assert_eq!(handle.volume(), 0.0);
    }

    #[test]
    fn test_recording_audio_counts() {
        let mut audio = RecordingAudio::new();
        audio.play_sound("stab");
        audio.play_sound("stab");
        audio.play_music("make_your_stand");
        assert_eq!(audio.count("stab"), 2);
        assert_eq!(audio.music, vec!["make_your_stand".to_string()]);
    }

    #[test]
    fn test_asset_paths() {
        assert_eq!(sound_asset_path("throw1"), "assets/sound/throw1.ogg");
        assert_eq!(music_asset_path("make_your_stand"), "assets/music/make_your_stand.ogg");
    }
}
