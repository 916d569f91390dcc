//! Distance attenuation, doppler and coordinate helpers.
//!
//! `rodio::SpatialSink` pans between two ears and scales each ear by the
//! inverse square of its distance. The helpers here compute an inverse
//! rolloff gain bounded by a channel's min/max distance and then choose an
//! emitter position that makes the sink produce that gain.

use crate::config::Handedness;

use super::types::Vec3;

/// Meters per second.
pub const SPEED_OF_SOUND: f32 = 340.0;

const MIN_PITCH: f32 = 0.5;
const MAX_PITCH: f32 = 2.0;
const MIN_GAIN: f32 = 1.0e-6;

/// Straight ahead of the listener, in listener space.
const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Engine-wide 3D scale factors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldScale {
    pub doppler: f32,
    pub distance_factor: f32,
    pub rolloff: f32,
}

impl Default for WorldScale {
    fn default() -> Self {
        Self {
            doppler: 1.0,
            distance_factor: 1.0,
            rolloff: 1.0,
        }
    }
}

/// Inverse rolloff: full volume up to `min`, `min / d` falloff at unit rolloff,
/// no further attenuation past `max`.
pub fn rolloff_gain(distance: f32, min: f32, max: f32, rolloff: f32) -> f32 {
    let d = distance.clamp(min, max);
    if d <= min {
        return 1.0;
    }
    let gain = min / (min + rolloff.max(0.0) * (d - min));
    gain.clamp(MIN_GAIN, 1.0)
}

/// Pitch multiplier for a source at `position` moving with `velocity`,
/// relative to a stationary listener at the origin.
pub fn doppler_pitch(position: Vec3, velocity: Vec3, scale: &WorldScale) -> f32 {
    let Some(dir) = position.normalized() else {
        return 1.0;
    };
    // Positive when the source moves away.
    let radial = velocity.dot(dir) * scale.doppler;
    if radial == 0.0 {
        return 1.0;
    }

    let c = SPEED_OF_SOUND * scale.distance_factor;
    let denom = c + radial;
    if denom <= 0.0 {
        return MAX_PITCH;
    }
    (c / denom).clamp(MIN_PITCH, MAX_PITCH)
}

/// Convert a world vector to the left-handed listener space the sink works in.
pub fn to_listener_space(v: Vec3, handedness: Handedness) -> Vec3 {
    match handedness {
        Handedness::LeftHanded => v,
        Handedness::RightHanded => Vec3::new(v.x, v.y, -v.z),
    }
}

/// Where to put the sink's emitter so that it plays `position` at `gain`.
///
/// A source sitting exactly on the listener is placed straight ahead.
pub fn emitter_position(position: Vec3, gain: f32) -> [f32; 3] {
    let dir = position.normalized().unwrap_or(FORWARD);
    let distance = 1.0 / gain.clamp(MIN_GAIN, 1.0).sqrt();
    dir.scale(distance).to_array()
}

/// Left and right ear positions for a listener at the origin.
pub fn ears(spacing: f32) -> ([f32; 3], [f32; 3]) {
    let half = spacing / 2.0;
    ([-half, 0.0, 0.0], [half, 0.0, 0.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn rolloff_gain_is_unity_inside_min_distance() {
        assert_eq!(rolloff_gain(0.0, 1.0, 10000.0, 1.0), 1.0);
        assert_eq!(rolloff_gain(0.5, 1.0, 10000.0, 1.0), 1.0);
        assert_eq!(rolloff_gain(1.0, 1.0, 10000.0, 1.0), 1.0);
    }

    #[test]
    fn rolloff_gain_falls_off_inversely() {
        assert!(close(rolloff_gain(5.0, 1.0, 10000.0, 1.0), 0.2));
        assert!(close(rolloff_gain(2.0, 1.0, 10000.0, 1.0), 0.5));
        // Half rolloff: 1 / (1 + 0.5 * 4)
        assert!(close(rolloff_gain(5.0, 1.0, 10000.0, 0.5), 1.0 / 3.0));
    }

    #[test]
    fn rolloff_gain_stops_at_max_distance() {
        let at_max = rolloff_gain(10.0, 1.0, 10.0, 1.0);
        let beyond = rolloff_gain(1000.0, 1.0, 10.0, 1.0);
        assert!(close(at_max, 0.1));
        assert_eq!(at_max, beyond);
    }

    #[test]
    fn zero_rolloff_disables_attenuation() {
        assert_eq!(rolloff_gain(500.0, 1.0, 10000.0, 0.0), 1.0);
    }

    #[test]
    fn emitter_distance_reproduces_gain_under_inverse_square() {
        let pos = Vec3::new(3.0, 0.0, 4.0);
        let e = emitter_position(pos, 0.25);
        let d = Vec3::new(e[0], e[1], e[2]).length();
        assert!(close(d, 2.0));
        // Direction is preserved.
        assert!(close(e[0] / d, 0.6));
        assert!(close(e[2] / d, 0.8));
    }

    #[test]
    fn emitter_for_source_on_listener_is_straight_ahead() {
        assert_eq!(emitter_position(Vec3::ZERO, 1.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn doppler_is_identity_without_radial_motion() {
        let scale = WorldScale::default();
        let pos = Vec3::new(5.0, 0.0, 0.0);
        assert_eq!(doppler_pitch(pos, Vec3::ZERO, &scale), 1.0);
        // Tangential motion does not shift pitch.
        assert_eq!(doppler_pitch(pos, Vec3::new(0.0, 0.0, 3.0), &scale), 1.0);
        // Nor does anything when the source sits on the listener.
        assert_eq!(doppler_pitch(Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0), &scale), 1.0);
    }

    #[test]
    fn doppler_lowers_receding_and_raises_approaching_sources() {
        let scale = WorldScale::default();
        let pos = Vec3::new(5.0, 0.0, 0.0);
        let away = doppler_pitch(pos, Vec3::new(34.0, 0.0, 0.0), &scale);
        let toward = doppler_pitch(pos, Vec3::new(-34.0, 0.0, 0.0), &scale);
        assert!(close(away, 340.0 / 374.0));
        assert!(close(toward, 340.0 / 306.0));
    }

    #[test]
    fn doppler_scale_zero_disables_shift() {
        let scale = WorldScale {
            doppler: 0.0,
            ..WorldScale::default()
        };
        let pos = Vec3::new(5.0, 0.0, 0.0);
        assert_eq!(doppler_pitch(pos, Vec3::new(100.0, 0.0, 0.0), &scale), 1.0);
    }

    #[test]
    fn right_handed_space_flips_z() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(to_listener_space(v, Handedness::LeftHanded), v);
        assert_eq!(
            to_listener_space(v, Handedness::RightHanded),
            Vec3::new(1.0, 2.0, -3.0)
        );
    }

    #[test]
    fn ears_straddle_the_origin() {
        let (l, r) = ears(0.2);
        assert_eq!(l, [-0.1, 0.0, 0.0]);
        assert_eq!(r, [0.1, 0.0, 0.0]);
    }
}
