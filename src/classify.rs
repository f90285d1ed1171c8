//! Filesystem entry classification and the color table derived from it

use std::fs;
use std::path::Path;

use termcolor::{Color, ColorSpec};

/// What kind of entry a path points at, for display purposes.
///
/// Classification is ordered: a directory is always `Folder` even when its
/// executable bit is set, an executable regular file beats `File`, and
/// anything else (sockets, devices, broken symlinks, failed stats) is
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Executable,
    File,
    Other,
}

/// An entry's kind combined with its lexical hidden status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryClass {
    pub kind: EntryKind,
    pub hidden: bool,
}

impl EntryClass {
    /// One of eight display colors: kind crossed with hidden status.
    ///
    /// Hidden entries use a dimmed variant of their kind's color.
    pub fn color_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self.kind {
            EntryKind::Folder => spec.set_fg(Some(Color::Yellow)).set_intense(true),
            EntryKind::Executable => spec.set_fg(Some(Color::Red)).set_intense(true),
            EntryKind::File => spec.set_fg(Some(Color::Blue)).set_intense(true),
            EntryKind::Other => spec.set_fg(Some(Color::White)),
        };
        if self.hidden {
            spec.set_dimmed(true);
        }
        spec
    }
}

/// An entry is hidden when its basename starts with a dot.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Classify a path by filesystem query.
///
/// Stat failures are soft: the entry reports as `Other` rather than
/// propagating an error.
pub fn classify(path: &Path) -> EntryClass {
    let hidden = path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false);

    let kind = match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => EntryKind::Folder,
        Ok(meta) if is_executable(&meta) => EntryKind::Executable,
        Ok(meta) if meta.is_file() => EntryKind::File,
        _ => EntryKind::Other,
    };

    EntryClass { kind, hidden }
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_classify_directory() {
        let dir = TempDir::new().unwrap();
        let class = classify(dir.path());
        assert_eq!(class.kind, EntryKind::Folder);
        assert!(!class.hidden);
    }

    #[test]
    fn test_classify_regular_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        File::create(&path).unwrap();
        assert_eq!(classify(&path).kind, EntryKind::File);
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.sh");
        File::create(&path).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();

        assert_eq!(classify(&path).kind, EntryKind::Executable);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_beats_executable_bit() {
        // Directories carry the executable bit on Unix but must classify
        // as folders.
        let dir = TempDir::new().unwrap();
        assert_eq!(classify(dir.path()).kind, EntryKind::Folder);
    }

    #[test]
    fn test_stat_failure_is_other() {
        let dir = TempDir::new().unwrap();
        let class = classify(&dir.path().join("does-not-exist"));
        assert_eq!(class.kind, EntryKind::Other);
    }

    #[test]
    fn test_hidden_detection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        File::create(&path).unwrap();

        let class = classify(&path);
        assert!(class.hidden);
        assert_eq!(class.kind, EntryKind::File);

        assert!(is_hidden(".git"));
        assert!(!is_hidden("readme.md"));
    }

    #[test]
    fn test_hidden_colors_are_dimmed_variants() {
        let plain = EntryClass {
            kind: EntryKind::Folder,
            hidden: false,
        };
        let hidden = EntryClass {
            kind: EntryKind::Folder,
            hidden: true,
        };
        assert_ne!(plain.color_spec(), hidden.color_spec());
        assert_eq!(plain.color_spec().fg(), hidden.color_spec().fg());
    }
}
