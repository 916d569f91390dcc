//! Keyboard input during playback.
//!
//! The player polls a `KeySource` once per tick without blocking. The
//! terminal implementation switches the console into raw mode while a track
//! plays so single key presses arrive without waiting for Enter.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Keys the player reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerKey {
    /// Space: stop the track and go back to the menu.
    Stop,
    /// Escape: stop the track and leave the program.
    Exit,
}

pub fn map_key(code: KeyCode) -> Option<PlayerKey> {
    match code {
        KeyCode::Char(' ') => Some(PlayerKey::Stop),
        KeyCode::Esc => Some(PlayerKey::Exit),
        _ => None,
    }
}

pub trait KeySource {
    /// Called before the first poll of a track.
    fn attach(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Called once the track has stopped.
    fn detach(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Consume at most one pending key press. Never blocks.
    fn poll_key(&mut self) -> io::Result<Option<PlayerKey>>;

    /// Block until any key is pressed.
    fn wait_for_any_key(&mut self) -> io::Result<()>;
}

/// Key source reading the controlling terminal through crossterm.
#[derive(Default)]
pub struct TerminalKeys {
    raw: bool,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeySource for TerminalKeys {
    fn attach(&mut self) -> io::Result<()> {
        if !self.raw {
            enable_raw_mode()?;
            self.raw = true;
        }
        Ok(())
    }

    fn detach(&mut self) -> io::Result<()> {
        if self.raw {
            disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    fn poll_key(&mut self) -> io::Result<Option<PlayerKey>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key.code)),
            _ => Ok(None),
        }
    }

    fn wait_for_any_key(&mut self) -> io::Result<()> {
        let was_raw = self.raw;
        self.attach()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
        if !was_raw {
            self.detach()?;
        }
        Ok(())
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if self.raw {
            let _ = disable_raw_mode();
        }
    }
}
