//! Circular motion of the sound source around the listener.

use std::f32::consts::TAU;

use crate::audio::Vec3;
use crate::config::OrbitSettings;

/// Angle, radius and angular speed of one playback session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orbit {
    angle: f32,
    radius: f32,
    speed: f32,
}

impl Orbit {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self {
            angle: 0.0,
            radius,
            speed,
        }
    }

    pub fn from_settings(settings: &OrbitSettings) -> Self {
        Self::new(settings.radius, settings.speed)
    }

    /// Current angle in radians, always in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Position on the horizontal circle around the listener.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.cos(),
            0.0,
            self.radius * self.angle.sin(),
        )
    }

    /// Move one tick along the circle.
    pub fn advance(&mut self) {
        self.angle = (self.angle + self.speed).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs.
        if self.angle >= TAU {
            self.angle = 0.0;
        }
    }
}
