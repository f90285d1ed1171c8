//! Stable merge sort and the sorted-listing view

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Local};
use termcolor::{Buffer, ColorChoice, StandardStream, WriteColor};

use crate::classify::{self, classify};
use crate::compare::{self, Criterion, Order, compare_entries};
use crate::error::{Error, Result};

/// Columns between the name column and the metadata suffix.
const GUTTER: usize = 4;

/// Stable merge sort: explicit midpoint split, recursive halves, linear
/// merge.
///
/// Elements comparing `Equal` keep their input order, which is the whole
/// reason this exists instead of an unstable platform sort.
pub fn merge_sort<T, F>(mut items: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);
    merge(left, right, cmp)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    let mut next_left = left.next();
    let mut next_right = right.next();

    loop {
        match (next_left.take(), next_right.take()) {
            (Some(l), Some(r)) => {
                // The left element wins ties to keep the sort stable.
                if cmp(&l, &r) != Ordering::Greater {
                    merged.push(l);
                    next_left = left.next();
                    next_right = Some(r);
                } else {
                    merged.push(r);
                    next_left = Some(l);
                    next_right = right.next();
                }
            }
            (Some(l), None) => {
                merged.push(l);
                merged.extend(left);
                break;
            }
            (None, Some(r)) => {
                merged.push(r);
                merged.extend(right);
                break;
            }
            (None, None) => break,
        }
    }
    merged
}

/// Immediate entries of `dir` as basenames, excluding `.` and `..`.
///
/// A directory that cannot be listed is fatal for the calling view.
pub fn list_entries(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::access(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::access(dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Human-readable size: exact bytes under 1 KB, otherwise two decimals with
/// the largest fitting unit up to GB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// `YYYY-MM-DD HH:MM:SS` in local time, degrading to the epoch when the
/// entry cannot be stat'ed.
fn format_mtime(path: &Path) -> String {
    let mtime = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .unwrap_or(UNIX_EPOCH);
    let local: DateTime<Local> = mtime.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Renders a directory's immediate entries sorted by one criterion.
///
/// All entries participate in the sort; hidden ones are dropped at render
/// time, so the name column is sized by the surviving entries only.
pub struct SortedListing {
    criterion: Criterion,
    order: Order,
    show_hidden: bool,
}

impl SortedListing {
    pub fn new(criterion: Criterion, order: Order, show_hidden: bool) -> Self {
        Self {
            criterion,
            order,
            show_hidden,
        }
    }

    /// Plain-text rendering.
    pub fn format(&self, dir: &Path) -> Result<String> {
        let mut buffer = Buffer::no_color();
        self.render(dir, &mut buffer)?;
        Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
    }

    /// Colored rendering to stdout.
    pub fn print(&self, dir: &Path, use_color: bool) -> Result<()> {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.render(dir, &mut stdout)
    }

    fn render<W: WriteColor>(&self, dir: &Path, out: &mut W) -> Result<()> {
        let names = list_entries(dir)?;
        let sorted = merge_sort(names, &|a: &String, b: &String| {
            compare_entries(dir, a, b, self.criterion, self.order)
        });

        let survivors: Vec<String> = sorted
            .into_iter()
            .filter(|name| self.show_hidden || !classify::is_hidden(name))
            .collect();
        let name_width = survivors
            .iter()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);

        for name in &survivors {
            let path = dir.join(name);
            out.set_color(&classify(&path).color_spec())?;
            write!(out, "{}", name)?;
            out.reset()?;

            match self.criterion {
                Criterion::Name => writeln!(out)?,
                Criterion::Size => {
                    let pad = name_width + GUTTER - name.chars().count();
                    writeln!(out, "{:pad$}{}", "", format_size(compare::entry_size(&path)))?;
                }
                Criterion::Mtime => {
                    let pad = name_width + GUTTER - name.chars().count();
                    writeln!(out, "{:pad$}{}", "", format_mtime(&path))?;
                }
            }
        }
        Ok(())
    }
}
