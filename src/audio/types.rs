//! Handle and vector types shared by every engine implementation.

use crate::config::Handedness;

/// A point or direction in world space.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn scale(self, k: f32) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(self) -> Option<Vec3> {
        let len = self.length();
        if len > f32::EPSILON && len.is_finite() {
            Some(self.scale(1.0 / len))
        } else {
            None
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Handle to a loaded sound.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SoundId(pub(crate) u32);

/// Handle to one playing instance of a sound.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(pub(crate) u32);

/// How a sound is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SoundMode {
    /// Panned and attenuated from its 3D attributes.
    pub positional: bool,
    /// Restart from the beginning when the stream ends.
    pub looped: bool,
}

impl SoundMode {
    pub const POSITIONAL_LOOPED: SoundMode = SoundMode {
        positional: true,
        looped: true,
    };
}

/// Options passed to [`AudioEngine::init`](super::AudioEngine::init).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InitFlags {
    pub handedness: Handedness,
}
