//! Proportional size bars for a directory's immediate entries
//!
//! Two passes, no recursion: the first finds the widest name and the
//! largest size among the surviving entries, the second scales each
//! entry's bar against that maximum.

use std::path::Path;

use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use terminal_size::{Width, terminal_size};

use crate::classify::{self, classify};
use crate::compare;
use crate::error::Result;
use crate::sort::{format_size, list_entries};

/// Columns reserved for spacing and the size suffix.
const GUTTER: usize = 16;
/// Width assumed when the terminal cannot be queried.
const FALLBACK_WIDTH: usize = 80;

pub struct SizeBars {
    show_hidden: bool,
}

impl SizeBars {
    pub fn new(show_hidden: bool) -> Self {
        Self { show_hidden }
    }

    /// Colored rendering to stdout at the current terminal width.
    pub fn print(&self, dir: &Path, use_color: bool) -> Result<()> {
        let width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(FALLBACK_WIDTH);
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.render(dir, width, &mut stdout)
    }

    /// Plain-text rendering at a fixed width.
    pub fn format(&self, dir: &Path, width: usize) -> Result<String> {
        let mut buffer = Buffer::no_color();
        self.render(dir, width, &mut buffer)?;
        Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
    }

    fn render<W: WriteColor>(&self, dir: &Path, width: usize, out: &mut W) -> Result<()> {
        let mut names = list_entries(dir)?;
        names.sort();
        let names: Vec<String> = names
            .into_iter()
            .filter(|name| self.show_hidden || !classify::is_hidden(name))
            .collect();

        let mut max_size = 0u64;
        let mut name_width = 0usize;
        for name in &names {
            max_size = max_size.max(compare::entry_size(&dir.join(name)));
            name_width = name_width.max(name.chars().count());
        }

        writeln!(out, "Size of directories and files in current directory:")?;

        let available = width.saturating_sub(name_width + GUTTER);
        for name in &names {
            let path = dir.join(name);
            let size = compare::entry_size(&path);
            // A directory of nothing but empty files must not divide by
            // zero; every bar is simply empty.
            let bar_len = if max_size == 0 {
                0
            } else {
                (size as f64 / max_size as f64 * available as f64) as usize
            };

            out.set_color(&classify(&path).color_spec())?;
            write!(out, "{:<name_width$}", name)?;
            out.reset()?;
            write!(out, " ")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_intense(true))?;
            write!(out, "{}", "=".repeat(bar_len))?;
            out.reset()?;
            writeln!(out, " {}", format_size(size))?;
        }
        Ok(())
    }
}
