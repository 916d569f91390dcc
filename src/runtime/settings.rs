use std::ffi::OsString;
use std::path::PathBuf;

use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("orbiter: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("orbiter: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// The first positional argument, when present, replaces the music directory.
pub fn apply_args<I>(settings: &mut config::Settings, args: I)
where
    I: IntoIterator<Item = OsString>,
{
    if let Some(dir) = args.into_iter().nth(1) {
        settings.library.dir = PathBuf::from(dir);
    }
}
