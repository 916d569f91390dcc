use std::path::Path;

use super::error::EngineError;
use super::types::{ChannelId, InitFlags, SoundId, SoundMode, Vec3};

/// A positional audio engine.
///
/// Constructing the engine creates it and dropping it releases it; everything
/// in between goes through these calls. Positions set with
/// [`set_3d_attributes`](AudioEngine::set_3d_attributes) take effect on the
/// next [`update`](AudioEngine::update).
pub trait AudioEngine {
    /// Open the output and allow at most `max_channels` live channels.
    fn init(&mut self, max_channels: usize, flags: InitFlags) -> Result<(), EngineError>;

    /// Global 3D scaling: doppler strength, world units per meter, and rolloff strength.
    fn set_3d_settings(
        &mut self,
        doppler_scale: f32,
        distance_factor: f32,
        rolloff_scale: f32,
    ) -> Result<(), EngineError>;

    fn create_sound(&mut self, path: &Path, mode: SoundMode) -> Result<SoundId, EngineError>;

    fn play_sound(&mut self, sound: SoundId, paused: bool) -> Result<ChannelId, EngineError>;

    fn set_3d_min_max_distance(
        &mut self,
        channel: ChannelId,
        min: f32,
        max: f32,
    ) -> Result<(), EngineError>;

    /// Move a channel. `None` velocity means the source is stationary.
    fn set_3d_attributes(
        &mut self,
        channel: ChannelId,
        position: Vec3,
        velocity: Option<Vec3>,
    ) -> Result<(), EngineError>;

    fn set_paused(&mut self, channel: ChannelId, paused: bool) -> Result<(), EngineError>;

    fn stop(&mut self, channel: ChannelId) -> Result<(), EngineError>;

    fn release_sound(&mut self, sound: SoundId) -> Result<(), EngineError>;

    /// Advance the engine: apply pending 3D state and reap finished channels.
    fn update(&mut self) -> Result<(), EngineError>;

    /// Stop everything and close the output. The engine can be initialized again.
    fn close(&mut self) -> Result<(), EngineError>;
}
