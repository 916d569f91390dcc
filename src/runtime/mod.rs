use std::env;
use std::io;

use crate::audio::RodioEngine;
use crate::input::TerminalKeys;

mod logging;
mod session;
mod settings;

use session::Session;

/// Exit status used when the audio engine fails.
pub const FATAL_EXIT_CODE: i32 = -1;

/// Run the program and return its exit status.
///
/// Every path ends here: the log guard and the engine are dropped before the
/// caller exits the process.
pub fn run() -> i32 {
    let mut settings = settings::load_settings();
    settings::apply_args(&mut settings, env::args_os());

    let _log_guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("orbiter: logging disabled: {e}");
            None
        }
    };
    tracing::info!(dir = %settings.library.dir.display(), "starting");

    let mut engine = RodioEngine::new(&settings.engine);
    let mut keys = TerminalKeys::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = Session {
        settings: &settings,
        engine: &mut engine,
        keys: &mut keys,
        input: &mut input,
        out: &mut out,
    }
    .run();

    match result {
        Ok(end) => end.exit_code(),
        Err(e) => {
            // Raw mode must be off before the message reaches the terminal.
            drop(keys);
            tracing::error!(error = %e, "fatal error");
            eprintln!("{e}");
            FATAL_EXIT_CODE
        }
    }
}
