//! Sound cue requests
//!
//! The core only asks for sounds; mixing and playback belong to the host.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Sound samples the game plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Ball bounces off a wall or the mover
    Hit,
    /// Ball served; also used for the mover's hit feedback
    Spawn,
}

/// A positional, fire-and-forget sound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub cue: SoundCue,
    pub location: Vec3,
    /// Distance at which the cue plays at full volume
    pub distance_ref: f32,
}

impl SoundRequest {
    pub fn new(cue: SoundCue, location: Vec3, distance_ref: f32) -> Self {
        Self {
            cue,
            location,
            distance_ref,
        }
    }
}

/// Host audio device
pub trait AudioBackend {
    fn play_hit_cue(&mut self, location: Vec3, distance_ref: f32);
    fn play_spawn_cue(&mut self, location: Vec3, distance_ref: f32);
}

/// Route a request to the matching backend call
pub fn play(backend: &mut impl AudioBackend, request: &SoundRequest) {
    match request.cue {
        SoundCue::Hit => backend.play_hit_cue(request.location, request.distance_ref),
        SoundCue::Spawn => backend.play_spawn_cue(request.location, request.distance_ref),
    }
}

/// Gates cues through volume and mute before they reach the backend
pub struct AudioManager<B> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    fn audible(&self) -> bool {
        self.effective_volume() > 0.0
    }
}

impl<B: AudioBackend> AudioBackend for AudioManager<B> {
    fn play_hit_cue(&mut self, location: Vec3, distance_ref: f32) {
        if self.audible() {
            self.backend.play_hit_cue(location, distance_ref);
        }
    }

    fn play_spawn_cue(&mut self, location: Vec3, distance_ref: f32) {
        if self.audible() {
            self.backend.play_spawn_cue(location, distance_ref);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundCue, f32)>,
    }

    impl AudioBackend for Recorder {
        fn play_hit_cue(&mut self, _location: Vec3, distance_ref: f32) {
            self.played.push((SoundCue::Hit, distance_ref));
        }

        fn play_spawn_cue(&mut self, _location: Vec3, distance_ref: f32) {
            self.played.push((SoundCue::Spawn, distance_ref));
        }
    }

    #[test]
    fn test_play_routes_by_cue() {
        let mut rec = Recorder::default();
        play(&mut rec, &SoundRequest::new(SoundCue::Spawn, Vec3::ZERO, 30.0));
        play(&mut rec, &SoundRequest::new(SoundCue::Hit, Vec3::ZERO, 10.0));
        assert_eq!(rec.played, vec![(SoundCue::Spawn, 30.0), (SoundCue::Hit, 10.0)]);
    }

    #[test]
    fn test_mute_and_zero_volume_drop_cues() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play_hit_cue(Vec3::ZERO, 10.0);
        audio.set_muted(false);
        audio.set_sfx_volume(0.0);
        audio.play_hit_cue(Vec3::ZERO, 10.0);
        assert!(audio.backend().played.is_empty());

        audio.set_sfx_volume(2.0);
        audio.play_hit_cue(Vec3::ZERO, 10.0);
        assert_eq!(audio.into_inner().played.len(), 1);
    }
}
