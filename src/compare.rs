//! Pure orderings over directory entries
//!
//! Each criterion produces a total order over two basenames of the same
//! directory. Equal keys compare `Equal` so a stable sort falls back to
//! input order.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Sort key for the sorted-listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Case-insensitive name comparison.
    Name,
    /// Byte length.
    Size,
    /// Last modification time, at second granularity.
    Mtime,
}

/// Sort direction.
///
/// Descending flips the sense of the key comparison rather than reversing
/// the sorted sequence, so ties keep input order in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }
}

/// Case-insensitive lexicographic comparison, folding one character at a
/// time.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Size in bytes, degrading to zero when the entry cannot be stat'ed.
pub(crate) fn entry_size(path: &Path) -> u64 {
    fs::metadata(path).map(|meta| meta.len()).unwrap_or(0)
}

/// Modification time in whole seconds since the epoch. Stat failures and
/// pre-epoch times both degrade to zero.
pub(crate) fn entry_mtime(path: &Path) -> u64 {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}

/// Compare two entries of `dir` under the given criterion and direction.
///
/// Size and mtime are fetched from the filesystem at call time; there is no
/// snapshot shared with later rendering.
pub fn compare_entries(
    dir: &Path,
    a: &str,
    b: &str,
    criterion: Criterion,
    order: Order,
) -> Ordering {
    let key = match criterion {
        Criterion::Name => compare_names(a, b),
        Criterion::Size => entry_size(&dir.join(a)).cmp(&entry_size(&dir.join(b))),
        Criterion::Mtime => entry_mtime(&dir.join(a)).cmp(&entry_mtime(&dir.join(b))),
    };
    order.apply(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compare_names_case_insensitive() {
        assert_eq!(compare_names("apple", "BANANA"), Ordering::Less);
        assert_eq!(compare_names("Cherry", "banana"), Ordering::Greater);
        assert_eq!(compare_names("readme", "README"), Ordering::Equal);
    }

    #[test]
    fn test_compare_names_prefix_is_less() {
        assert_eq!(compare_names("a", "ab"), Ordering::Less);
        assert_eq!(compare_names("ab", "a"), Ordering::Greater);
    }

    #[test]
    fn test_descending_flips_sense_not_ties() {
        // Ties must stay Equal in both directions so a stable sort keeps
        // input order; only real differences flip.
        assert_eq!(
            Order::Descending.apply(compare_names("a", "b")),
            Ordering::Greater
        );
        assert_eq!(
            Order::Descending.apply(compare_names("a", "A")),
            Ordering::Equal
        );
        assert_eq!(
            Order::Ascending.apply(compare_names("a", "A")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_entries_by_size() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("small"), "x").unwrap();
        fs::write(dir.path().join("large"), "xxxxxxxxxx").unwrap();

        assert_eq!(
            compare_entries(
                dir.path(),
                "small",
                "large",
                Criterion::Size,
                Order::Ascending
            ),
            Ordering::Less
        );
        assert_eq!(
            compare_entries(
                dir.path(),
                "small",
                "large",
                Criterion::Size,
                Order::Descending
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn test_stat_failure_degrades_to_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(entry_size(&dir.path().join("missing")), 0);
        assert_eq!(entry_mtime(&dir.path().join("missing")), 0);
    }
}
