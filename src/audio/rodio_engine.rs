//! `AudioEngine` implementation on top of `rodio`.
//!
//! Every channel is a `SpatialSink` connected to the output mixer, normally
//! the default device's. Positions are buffered per channel and pushed to the
//! sinks on `update`.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Source, SpatialSink};

use crate::config::{EngineSettings, Handedness};

use super::engine::AudioEngine;
use super::error::EngineError;
use super::spatial::{self, WorldScale};
use super::types::{ChannelId, InitFlags, SoundId, SoundMode, Vec3};

type BoxedSource = Box<dyn Source + Send>;

/// Open `path` and hand it to rodio's decoder.
fn open_source(path: &Path, looped: bool) -> Result<BoxedSource, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let decode_err = |source| EngineError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let source: BoxedSource = if looped {
        Box::new(Decoder::new_looped(reader).map_err(decode_err)?)
    } else {
        Box::new(Decoder::new(reader).map_err(decode_err)?)
    };
    Ok(source)
}

struct Sound {
    path: PathBuf,
    mode: SoundMode,
    // Decoder opened by `create_sound`, handed to the first channel that plays it.
    primed: Option<BoxedSource>,
}

struct Channel {
    sound: SoundId,
    sink: SpatialSink,
    positional: bool,
    min_distance: f32,
    max_distance: f32,
    position: Vec3,
    velocity: Vec3,
    dirty: bool,
}

/// Where channels are mixed while the engine is initialized.
struct Output {
    mixer: Mixer,
    // Kept alive for as long as the device should play; `None` for a detached mixer.
    _stream: Option<OutputStream>,
}

pub struct RodioEngine {
    output: Option<Output>,
    // Mixer to use instead of opening the default device.
    detached: Option<Mixer>,
    max_channels: usize,
    handedness: Handedness,
    scale: WorldScale,
    ear_spacing: f32,
    default_min_distance: f32,
    default_max_distance: f32,
    sounds: HashMap<SoundId, Sound>,
    channels: HashMap<ChannelId, Channel>,
    next_id: u32,
}

impl RodioEngine {
    /// Create an engine. No output device is touched until `init`.
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            output: None,
            detached: None,
            max_channels: 0,
            handedness: settings.handedness,
            scale: WorldScale::default(),
            ear_spacing: settings.ear_spacing,
            default_min_distance: settings.min_distance,
            default_max_distance: settings.max_distance,
            sounds: HashMap::new(),
            channels: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create an engine that mixes into `mixer` instead of an output device.
    #[cfg(test)]
    pub(crate) fn with_mixer(settings: &EngineSettings, mixer: Mixer) -> Self {
        Self {
            detached: Some(mixer),
            ..Self::new(settings)
        }
    }

    fn output(&self) -> Result<&Output, EngineError> {
        self.output.as_ref().ok_or(EngineError::NotInitialized)
    }

    fn insert_sound(&mut self, path: PathBuf, mode: SoundMode, primed: BoxedSource) -> SoundId {
        let id = SoundId(self.alloc_id());
        self.sounds.insert(
            id,
            Sound {
                path,
                mode,
                primed: Some(primed),
            },
        );
        id
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    fn channel_mut(&mut self, channel: ChannelId) -> Result<&mut Channel, EngineError> {
        self.output()?;
        self.channels
            .get_mut(&channel)
            .ok_or(EngineError::InvalidHandle("channel"))
    }

    /// Push a channel's buffered 3D state into its sink.
    fn apply_3d(&self, ch: &Channel) {
        if !ch.positional {
            ch.sink.set_emitter_position(spatial::emitter_position(Vec3::ZERO, 1.0));
            return;
        }

        let position = spatial::to_listener_space(ch.position, self.handedness);
        let velocity = spatial::to_listener_space(ch.velocity, self.handedness);
        let gain = spatial::rolloff_gain(
            position.length(),
            ch.min_distance,
            ch.max_distance,
            self.scale.rolloff,
        );

        ch.sink
            .set_emitter_position(spatial::emitter_position(position, gain));
        ch.sink
            .set_speed(spatial::doppler_pitch(position, velocity, &self.scale));
    }
}

impl AudioEngine for RodioEngine {
    fn init(&mut self, max_channels: usize, flags: InitFlags) -> Result<(), EngineError> {
        if self.output.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }
        if max_channels == 0 {
            return Err(EngineError::InvalidParam(
                "max_channels must be at least 1".to_string(),
            ));
        }

        let output = match &self.detached {
            Some(mixer) => Output {
                mixer: mixer.clone(),
                _stream: None,
            },
            None => {
                let mut stream = OutputStreamBuilder::open_default_stream()?;
                // rodio logs to stderr when OutputStream is dropped, which would land
                // in the middle of the menu.
                stream.log_on_drop(false);
                Output {
                    mixer: stream.mixer().clone(),
                    _stream: Some(stream),
                }
            }
        };

        self.output = Some(output);
        self.max_channels = max_channels;
        self.handedness = flags.handedness;
        tracing::info!(max_channels, handedness = ?flags.handedness, "audio engine initialized");
        Ok(())
    }

    fn set_3d_settings(
        &mut self,
        doppler_scale: f32,
        distance_factor: f32,
        rolloff_scale: f32,
    ) -> Result<(), EngineError> {
        if !(distance_factor > 0.0) {
            return Err(EngineError::InvalidParam(format!(
                "distance factor must be > 0, got {distance_factor}"
            )));
        }
        if !(distance_factor.is_finite()
            && doppler_scale.is_finite()
            && doppler_scale >= 0.0
            && rolloff_scale.is_finite()
            && rolloff_scale >= 0.0)
        {
            return Err(EngineError::InvalidParam(format!(
                "3D scales must be finite and non-negative, got doppler {doppler_scale}, \
                 distance {distance_factor}, rolloff {rolloff_scale}"
            )));
        }

        self.scale = WorldScale {
            doppler: doppler_scale,
            distance_factor,
            rolloff: rolloff_scale,
        };
        for ch in self.channels.values_mut() {
            ch.dirty = true;
        }
        Ok(())
    }

    fn create_sound(&mut self, path: &Path, mode: SoundMode) -> Result<SoundId, EngineError> {
        self.output()?;
        let primed = open_source(path, mode.looped)?;

        let id = self.insert_sound(path.to_path_buf(), mode, primed);
        tracing::debug!(path = %path.display(), ?mode, "sound created");
        Ok(id)
    }

    fn play_sound(&mut self, sound: SoundId, paused: bool) -> Result<ChannelId, EngineError> {
        let output = self.output.as_ref().ok_or(EngineError::NotInitialized)?;
        if self.channels.len() >= self.max_channels {
            return Err(EngineError::ChannelLimit(self.max_channels));
        }

        let s = self
            .sounds
            .get_mut(&sound)
            .ok_or(EngineError::InvalidHandle("sound"))?;
        let source = match s.primed.take() {
            Some(source) => source,
            None => open_source(&s.path, s.mode.looped)?,
        };
        let positional = s.mode.positional;

        let (left_ear, right_ear) = spatial::ears(self.ear_spacing);
        let sink = SpatialSink::connect_new(
            &output.mixer,
            spatial::emitter_position(Vec3::ZERO, 1.0),
            left_ear,
            right_ear,
        );
        sink.pause();
        sink.append(source);

        let channel = Channel {
            sound,
            sink,
            positional,
            min_distance: self.default_min_distance,
            max_distance: self.default_max_distance,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            dirty: false,
        };
        self.apply_3d(&channel);
        if !paused {
            channel.sink.play();
        }

        let id = ChannelId(self.alloc_id());
        self.channels.insert(id, channel);
        tracing::debug!(?sound, channel = ?id, paused, "sound playing");
        Ok(id)
    }

    fn set_3d_min_max_distance(
        &mut self,
        channel: ChannelId,
        min: f32,
        max: f32,
    ) -> Result<(), EngineError> {
        if !(min > 0.0 && max.is_finite() && max >= min) {
            return Err(EngineError::InvalidParam(format!(
                "3D distance range must satisfy 0 < min <= max, got {min}..{max}"
            )));
        }
        let ch = self.channel_mut(channel)?;
        ch.min_distance = min;
        ch.max_distance = max;
        ch.dirty = true;
        Ok(())
    }

    fn set_3d_attributes(
        &mut self,
        channel: ChannelId,
        position: Vec3,
        velocity: Option<Vec3>,
    ) -> Result<(), EngineError> {
        let ch = self.channel_mut(channel)?;
        ch.position = position;
        ch.velocity = velocity.unwrap_or(Vec3::ZERO);
        ch.dirty = true;
        Ok(())
    }

    fn set_paused(&mut self, channel: ChannelId, paused: bool) -> Result<(), EngineError> {
        let ch = self.channel_mut(channel)?;
        if paused {
            ch.sink.pause();
        } else {
            ch.sink.play();
        }
        Ok(())
    }

    fn stop(&mut self, channel: ChannelId) -> Result<(), EngineError> {
        self.output()?;
        // A channel whose sound already ran out was reaped by `update`;
        // stopping it again is not an error.
        match self.channels.remove(&channel) {
            Some(ch) => ch.sink.stop(),
            None => tracing::debug!(?channel, "stop on a finished channel"),
        }
        Ok(())
    }

    fn release_sound(&mut self, sound: SoundId) -> Result<(), EngineError> {
        self.output()?;
        if self.sounds.remove(&sound).is_none() {
            return Err(EngineError::InvalidHandle("sound"));
        }
        // Channels still playing the sound go with it.
        self.channels.retain(|_, ch| {
            if ch.sound == sound {
                ch.sink.stop();
                false
            } else {
                true
            }
        });
        Ok(())
    }

    fn update(&mut self) -> Result<(), EngineError> {
        self.output()?;

        self.channels.retain(|id, ch| {
            let alive = !ch.sink.empty();
            if !alive {
                tracing::debug!(channel = ?id, "channel finished");
            }
            alive
        });

        for ch in self.channels.values() {
            if ch.dirty {
                self.apply_3d(ch);
            }
        }
        for ch in self.channels.values_mut() {
            ch.dirty = false;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), EngineError> {
        let Some(output) = self.output.take() else {
            return Err(EngineError::NotInitialized);
        };

        for (_, ch) in self.channels.drain() {
            ch.sink.stop();
        }
        self.sounds.clear();
        drop(output);
        tracing::info!("audio engine closed");
        Ok(())
    }
}
