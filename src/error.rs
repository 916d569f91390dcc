use std::io;

use thiserror::Error;

use crate::audio::EngineError;

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum AppError {
    /// An audio engine call failed. `call` names the engine operation.
    #[error("audio engine error ({call}): {source}")]
    Engine {
        call: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("terminal I/O error: {0}")]
    Terminal(#[from] io::Error),
}

/// Attach the failing engine call to an engine result.
pub trait EngineCall<T> {
    fn call(self, call: &'static str) -> Result<T, AppError>;
}

impl<T> EngineCall<T> for Result<T, EngineError> {
    fn call(self, call: &'static str) -> Result<T, AppError> {
        self.map_err(|source| AppError::Engine { call, source })
    }
}
