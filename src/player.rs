//! The orbit player: plays one track while circling it around the listener.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::audio::{AudioEngine, ChannelId, SoundMode, Vec3};
use crate::config::{OrbitSettings, Settings};
use crate::error::{AppError, EngineCall};
use crate::input::{KeySource, PlayerKey};
use crate::library::Track;
use crate::orbit::Orbit;

/// How a track's playback ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerOutcome {
    /// The user stopped the track and wants the menu again.
    Stopped,
    /// The user asked to leave the program.
    Exit,
}

pub struct OrbitPlayer {
    orbit: OrbitSettings,
    min_distance: f32,
    max_distance: f32,
    tick: Duration,
}

impl OrbitPlayer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            orbit: settings.orbit.clone(),
            min_distance: settings.engine.min_distance,
            max_distance: settings.engine.max_distance,
            tick: Duration::from_millis(settings.orbit.tick_ms),
        }
    }

    /// Play `track` looped and orbiting until the user stops or exits.
    ///
    /// The sound and channel are released before returning on both outcomes.
    pub fn play<E, K, W>(
        &self,
        engine: &mut E,
        track: &Track,
        keys: &mut K,
        out: &mut W,
    ) -> Result<PlayerOutcome, AppError>
    where
        E: AudioEngine + ?Sized,
        K: KeySource + ?Sized,
        W: Write,
    {
        let sound = engine
            .create_sound(&track.path, SoundMode::POSITIONAL_LOOPED)
            .call("create_sound")?;
        let channel = engine.play_sound(sound, true).call("play_sound")?;

        engine
            .set_3d_min_max_distance(channel, self.min_distance, self.max_distance)
            .call("set_3d_min_max_distance")?;
        engine
            .set_3d_attributes(channel, Vec3::ZERO, None)
            .call("set_3d_attributes")?;
        engine.set_paused(channel, false).call("set_paused")?;

        writeln!(out)?;
        writeln!(out, "Now playing: {}", track.file_name)?;
        writeln!(out, "[SPACE] Stop and choose new track")?;
        writeln!(out, "[ESC] Exit")?;
        out.flush()?;
        tracing::info!(track = %track.path.display(), "now playing");

        keys.attach()?;
        let result = self.run_ticks(engine, channel, keys);
        let detached = keys.detach();
        let outcome = result?;
        detached?;

        engine.stop(channel).call("stop")?;
        engine.release_sound(sound).call("release_sound")?;
        tracing::info!(track = %track.path.display(), ?outcome, "playback ended");
        Ok(outcome)
    }

    fn run_ticks<E, K>(
        &self,
        engine: &mut E,
        channel: ChannelId,
        keys: &mut K,
    ) -> Result<PlayerOutcome, AppError>
    where
        E: AudioEngine + ?Sized,
        K: KeySource + ?Sized,
    {
        let mut orbit = Orbit::from_settings(&self.orbit);

        loop {
            // Position first so the engine update mixes with it this tick.
            engine
                .set_3d_attributes(channel, orbit.position(), None)
                .call("set_3d_attributes")?;
            engine.update().call("update")?;
            orbit.advance();
            tracing::trace!(angle = orbit.angle(), "orbit tick");

            match keys.poll_key()? {
                Some(PlayerKey::Stop) => return Ok(PlayerOutcome::Stopped),
                Some(PlayerKey::Exit) => return Ok(PlayerOutcome::Exit),
                None => {}
            }

            if !self.tick.is_zero() {
                thread::sleep(self.tick);
            }
        }
    }
}
