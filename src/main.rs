//! CLI entry point for dirlens

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser, ValueEnum};
use dirlens::{
    Criterion, Order, Result, SizeBars, SortedListing, TreePrinter, print_json, print_slide,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

/// Sort criterion for the --sort view
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
    /// Case-insensitive name order
    Name,
    /// Size in bytes
    Size,
    /// Last modification time
    Date,
}

impl From<SortKey> for Criterion {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => Criterion::Name,
            SortKey::Size => Criterion::Size,
            SortKey::Date => Criterion::Mtime,
        }
    }
}

/// Sort direction for the --sort view
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SortOrder {
    /// Smallest (or first) entries first
    #[default]
    Asc,
    /// Largest (or last) entries first
    Desc,
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Ascending,
            SortOrder::Desc => Order::Descending,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirlens")]
#[command(about = "Directory inspection: tree view, size bars, and sorted listings")]
#[command(version)]
#[command(group = ArgGroup::new("view").args(["tree", "size", "sort", "slide"]))]
struct Args {
    /// Directory to inspect (a file, for --slide)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Recursive tree with directory and file totals (the default view)
    #[arg(short = 't', long)]
    tree: bool,

    /// Proportional size bars over the immediate entries
    #[arg(short = 's', long)]
    size: bool,

    /// Immediate entries sorted by the given criterion
    #[arg(long, value_name = "CRITERION")]
    sort: Option<SortKey>,

    /// Print the file one character at a time, optionally scaled by SPEED
    #[arg(
        long,
        value_name = "SPEED",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "1"
    )]
    slide: Option<f32>,

    /// Direction for --sort
    #[arg(short = 'o', long, value_name = "ORDER", default_value = "asc")]
    order: SortOrder,

    /// Show hidden entries (names starting with '.')
    #[arg(short = 'a', long)]
    all: bool,

    /// Print the tree as JSON instead of text
    #[arg(long, conflicts_with_all = ["size", "sort", "slide"])]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    let root = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.path)
    };

    if let Err(e) = run(&args, &root) {
        eprintln!("dirlens: {}", e);
        process::exit(e.exit_code());
    }
}

fn run(args: &Args, root: &Path) -> Result<()> {
    let use_color = should_use_color(args.color);

    if let Some(speed) = args.slide {
        print_slide(root, speed)
    } else if args.size {
        SizeBars::new(args.all).print(root, use_color)
    } else if let Some(key) = args.sort {
        SortedListing::new(key.into(), args.order.into(), args.all).print(root, use_color)
    } else if args.json {
        let tree = TreePrinter::new(args.all).build(root)?;
        print_json(&tree)?;
        Ok(())
    } else {
        TreePrinter::new(args.all).print(root, use_color)?;
        Ok(())
    }
}
