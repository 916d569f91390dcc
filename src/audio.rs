//! Audio engine boundary and its rodio implementation.
//!
//! `AudioEngine` is the set of calls the player and session need from a
//! positional audio engine. `RodioEngine` implements it over `rodio`'s
//! spatial sinks; the attenuation and doppler math lives in `spatial`.

mod engine;
mod error;
mod rodio_engine;
pub mod spatial;
mod types;

pub use engine::AudioEngine;
pub use error::EngineError;
pub use rodio_engine::RodioEngine;
pub use types::{ChannelId, InitFlags, SoundId, SoundMode, Vec3};

#[cfg(test)]
pub(crate) mod testing;
