use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/orbiter/config.toml` or `~/.config/orbiter/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ORBITER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub orbit: OrbitSettings,
    pub engine: EngineSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory listed for tracks. Overridden by the first CLI argument.
    pub dir: PathBuf,
    /// File extension treated as a track (case-insensitive, dot optional).
    pub extension: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Music"),
            extension: "mp3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Distance of the source from the listener, in world units.
    pub radius: f32,
    /// Angle advanced per tick, in radians.
    pub speed: f32,
    /// Control loop period (milliseconds).
    pub tick_ms: u64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: 0.05,
            tick_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Maximum number of simultaneously live channels.
    pub max_channels: usize,
    pub handedness: Handedness,
    pub doppler_scale: f32,
    /// World units per meter.
    pub distance_factor: f32,
    pub rolloff_scale: f32,
    /// Distance at which attenuation starts.
    pub min_distance: f32,
    /// Distance beyond which the source gets no quieter.
    pub max_distance: f32,
    /// Distance between the listener's ears, in world units.
    pub ear_spacing: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_channels: 32,
            handedness: Handedness::RightHanded,
            doppler_scale: 1.0,
            distance_factor: 1.0,
            rolloff_scale: 1.0,
            min_distance: 1.0,
            max_distance: 10000.0,
            ear_spacing: 0.2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handedness {
    #[serde(alias = "left_handed", alias = "left")]
    LeftHanded,
    #[serde(alias = "right_handed", alias = "right")]
    RightHanded,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Clear the terminal before drawing the track menu.
    pub clear_screen: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { clear_screen: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Set to false to skip log file setup entirely.
    pub enabled: bool,
    /// Directory that receives the daily log files.
    pub dir: PathBuf,
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(".logs"),
            level: "orbiter=info,warn".to_string(),
        }
    }
}
