//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the lister, the orbit, the
//! audio engine and logging, plus helpers to load them from disk and env.

mod load;
mod schema;

pub use schema::*;
