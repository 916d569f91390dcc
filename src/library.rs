//! Track discovery.
//!
//! `scan` lists the playable files of a single directory; the resulting
//! `Vec<Track>` is the catalog shown by the menu. It is rebuilt every time the
//! session loops, so files added or removed on disk show up on the next menu.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
