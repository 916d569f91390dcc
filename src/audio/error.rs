use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an [`AudioEngine`](super::AudioEngine) call.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device available: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("engine is not initialized")]
    NotInitialized,

    #[error("engine is already initialized")]
    AlreadyInitialized,

    #[error("invalid {0} handle")]
    InvalidHandle(&'static str),

    #[error("all {0} channels are in use")]
    ChannelLimit(usize),

    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
