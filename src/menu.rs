//! Numbered track menu.
//!
//! Draws the catalog as `[i] name` lines and reads the user's choice line by
//! line until it gets either a track number in range or `Q`.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::config::UiSettings;
use crate::library::Track;

/// Result of one menu interaction.
#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a> {
    Track(&'a Track),
    Quit,
}

/// A single parsed line of menu input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Choice {
    Quit,
    /// Zero-based index into the catalog.
    Track(usize),
    Invalid,
}

/// Interpret one line of input against a catalog of `count` tracks.
pub fn parse_choice(line: &str, count: usize) -> Choice {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Track(n - 1),
        _ => Choice::Invalid,
    }
}

pub fn render_menu<W: Write>(out: &mut W, tracks: &[Track], ui: &UiSettings) -> io::Result<()> {
    if ui.clear_screen {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }

    writeln!(out, "Available tracks:")?;
    for (i, track) in tracks.iter().enumerate() {
        writeln!(out, "[{}] {}", i + 1, track.file_name)?;
    }
    writeln!(out)?;
    writeln!(out, "[Q] Quit")?;
    Ok(())
}

/// Show the menu and block until the user picks a track or quits.
///
/// Invalid input re-prompts. End of input counts as quitting. Callers should
/// not pass an empty catalog.
pub fn select_track<'a, R, W>(
    tracks: &'a [Track],
    input: &mut R,
    out: &mut W,
    ui: &UiSettings,
) -> io::Result<Selection<'a>>
where
    R: BufRead,
    W: Write,
{
    render_menu(out, tracks, ui)?;

    let mut line = String::new();
    loop {
        write!(out, "Select track (1-{}) or Q to quit: ", tracks.len())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("input closed at the track prompt");
            return Ok(Selection::Quit);
        }

        match parse_choice(&line, tracks.len()) {
            Choice::Quit => return Ok(Selection::Quit),
            Choice::Track(i) => return Ok(Selection::Track(&tracks[i])),
            Choice::Invalid => tracing::trace!(input = line.trim(), "invalid menu input"),
        }
    }
}
