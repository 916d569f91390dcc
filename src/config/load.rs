use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `ORBITER__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ORBITER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.library.extension.trim().trim_start_matches('.').is_empty() {
            return Err("library.extension must not be empty".to_string());
        }
        if !(self.orbit.radius.is_finite() && self.orbit.radius > 0.0) {
            return Err("orbit.radius must be > 0".to_string());
        }
        if !self.orbit.speed.is_finite() {
            return Err("orbit.speed must be a finite number".to_string());
        }
        if self.engine.max_channels == 0 {
            return Err("engine.max_channels must be >= 1".to_string());
        }
        let e = &self.engine;
        if !(e.min_distance.is_finite() && e.min_distance > 0.0) {
            return Err("engine.min_distance must be > 0".to_string());
        }
        if !(e.max_distance.is_finite() && e.max_distance >= e.min_distance) {
            return Err("engine.max_distance must be >= engine.min_distance".to_string());
        }
        if !(e.distance_factor.is_finite() && e.distance_factor > 0.0) {
            return Err("engine.distance_factor must be > 0".to_string());
        }
        if !(e.doppler_scale.is_finite() && e.doppler_scale >= 0.0) {
            return Err("engine.doppler_scale must be >= 0".to_string());
        }
        if !(e.rolloff_scale.is_finite() && e.rolloff_scale >= 0.0) {
            return Err("engine.rolloff_scale must be >= 0".to_string());
        }
        if !(e.ear_spacing.is_finite() && e.ear_spacing > 0.0) {
            return Err("engine.ear_spacing must be > 0".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `ORBITER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ORBITER_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/orbiter/config.toml`
/// or `~/.config/orbiter/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("orbiter").join("config.toml"))
}
