// Collaborators threaded through every tick

use crate::engine::audio::AudioService;
use crate::engine::random::GameRng;

/// Audio and randomness for one tick of simulation.
///
/// Controllers, skills and projectile scripts receive this explicitly instead
/// of reaching for globals, so a test can swap in a recorder and a seed.
pub struct BattleServices<'a> {
    pub audio: &'a mut dyn AudioService,
    pub rng: &'a mut GameRng,
}

impl<'a> BattleServices<'a> {
    pub fn new(audio: &'a mut dyn AudioService, rng: &'a mut GameRng) -> Self {
        Self { audio, rng }
    }

    /// Fire-and-forget sound cue
    pub fn play_sound(&mut self, name: &str) {
        let _ = self.audio.play_sound(name);
    }
}
