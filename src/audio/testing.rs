//! A recording `AudioEngine` for player and session tests.

use std::path::{Path, PathBuf};

use super::engine::AudioEngine;
use super::error::EngineError;
use super::types::{ChannelId, InitFlags, SoundId, SoundMode, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Init(usize, InitFlags),
    Set3dSettings(f32, f32, f32),
    CreateSound(PathBuf, SoundMode),
    PlaySound(SoundId, bool),
    MinMaxDistance(ChannelId, f32, f32),
    Attributes(ChannelId, Vec3),
    SetPaused(ChannelId, bool),
    Stop(ChannelId),
    Release(SoundId),
    Update,
    Close,
}

/// Names of engine calls `RecordingEngine` can be told to fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailOn {
    Init,
    CreateSound,
    PlaySound,
}

#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub fail_on: Option<FailOn>,
    next_id: u32,
}

impl RecordingEngine {
    pub fn failing(on: FailOn) -> Self {
        Self {
            fail_on: Some(on),
            ..Self::default()
        }
    }

    fn fail(&self, on: FailOn) -> Result<(), EngineError> {
        if self.fail_on == Some(on) {
            Err(EngineError::InvalidParam(format!("{on:?} rigged to fail")))
        } else {
            Ok(())
        }
    }

    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Attributes(_, p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl AudioEngine for RecordingEngine {
    fn init(&mut self, max_channels: usize, flags: InitFlags) -> Result<(), EngineError> {
        self.fail(FailOn::Init)?;
        self.calls.push(Call::Init(max_channels, flags));
        Ok(())
    }

    fn set_3d_settings(&mut self, doppler: f32, distance: f32, rolloff: f32) -> Result<(), EngineError> {
        self.calls.push(Call::Set3dSettings(doppler, distance, rolloff));
        Ok(())
    }

    fn create_sound(&mut self, path: &Path, mode: SoundMode) -> Result<SoundId, EngineError> {
        self.fail(FailOn::CreateSound)?;
        self.calls.push(Call::CreateSound(path.to_path_buf(), mode));
        Ok(SoundId(self.id()))
    }

    fn play_sound(&mut self, sound: SoundId, paused: bool) -> Result<ChannelId, EngineError> {
        self.fail(FailOn::PlaySound)?;
        self.calls.push(Call::PlaySound(sound, paused));
        Ok(ChannelId(self.id()))
    }

    fn set_3d_min_max_distance(&mut self, ch: ChannelId, min: f32, max: f32) -> Result<(), EngineError> {
        self.calls.push(Call::MinMaxDistance(ch, min, max));
        Ok(())
    }

    fn set_3d_attributes(
        &mut self,
        ch: ChannelId,
        position: Vec3,
        _velocity: Option<Vec3>,
    ) -> Result<(), EngineError> {
        self.calls.push(Call::Attributes(ch, position));
        Ok(())
    }

    fn set_paused(&mut self, ch: ChannelId, paused: bool) -> Result<(), EngineError> {
        self.calls.push(Call::SetPaused(ch, paused));
        Ok(())
    }

    fn stop(&mut self, ch: ChannelId) -> Result<(), EngineError> {
        self.calls.push(Call::Stop(ch));
        Ok(())
    }

    fn release_sound(&mut self, sound: SoundId) -> Result<(), EngineError> {
        self.calls.push(Call::Release(sound));
        Ok(())
    }

    fn update(&mut self) -> Result<(), EngineError> {
        self.calls.push(Call::Update);
        Ok(())
    }

    fn close(&mut self) -> Result<(), EngineError> {
        self.calls.push(Call::Close);
        Ok(())
    }
}
