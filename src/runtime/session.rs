use std::io::{BufRead, Write};

use crate::audio::{AudioEngine, InitFlags};
use crate::config::Settings;
use crate::error::{AppError, EngineCall};
use crate::input::KeySource;
use crate::library;
use crate::menu::{self, Selection};
use crate::player::{OrbitPlayer, PlayerOutcome};

/// Why the session loop ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// `Q` at the menu.
    Quit,
    /// Escape during playback.
    Exit,
    /// The music directory had no tracks.
    NoTracks,
}

impl SessionEnd {
    pub fn exit_code(self) -> i32 {
        match self {
            SessionEnd::Quit | SessionEnd::Exit => 0,
            SessionEnd::NoTracks => 1,
        }
    }
}

/// Everything one run of the program talks to.
pub struct Session<'a, E, K, R, W> {
    pub settings: &'a Settings,
    pub engine: &'a mut E,
    pub keys: &'a mut K,
    pub input: &'a mut R,
    pub out: &'a mut W,
}

impl<E, K, R, W> Session<'_, E, K, R, W>
where
    E: AudioEngine,
    K: KeySource,
    R: BufRead,
    W: Write,
{
    /// Initialize the engine, loop list → select → play, then close the engine.
    pub fn run(&mut self) -> Result<SessionEnd, AppError> {
        let engine_settings = &self.settings.engine;
        self.engine
            .init(
                engine_settings.max_channels,
                InitFlags {
                    handedness: engine_settings.handedness,
                },
            )
            .call("init")?;
        self.engine
            .set_3d_settings(
                engine_settings.doppler_scale,
                engine_settings.distance_factor,
                engine_settings.rolloff_scale,
            )
            .call("set_3d_settings")?;

        let end = self.run_loop()?;

        self.engine.close().call("close")?;
        tracing::info!(?end, "session finished");
        Ok(end)
    }

    fn run_loop(&mut self) -> Result<SessionEnd, AppError> {
        let player = OrbitPlayer::new(self.settings);
        let library = &self.settings.library;

        loop {
            let tracks = library::scan(&library.dir, library);
            if tracks.is_empty() {
                tracing::warn!(dir = %library.dir.display(), "no tracks found");
                let ext = library.extension.trim().trim_start_matches('.');
                eprintln!(
                    "No {} files found in {}",
                    ext.to_ascii_uppercase(),
                    library.dir.display()
                );
                write!(self.out, "Press any key to exit...")?;
                self.out.flush()?;
                self.keys.wait_for_any_key()?;
                writeln!(self.out)?;
                return Ok(SessionEnd::NoTracks);
            }

            let track = match menu::select_track(&tracks, self.input, self.out, &self.settings.ui)? {
                Selection::Quit => return Ok(SessionEnd::Quit),
                Selection::Track(track) => track,
            };
            tracing::info!(track = %track.path.display(), "track selected");

            match player.play(self.engine, track, self.keys, self.out)? {
                PlayerOutcome::Stopped => continue,
                PlayerOutcome::Exit => return Ok(SessionEnd::Exit),
            }
        }
    }
}
