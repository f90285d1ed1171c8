//! dirlens - directory inspection: tree view, size bars, and sorted listings

pub mod bars;
pub mod classify;
pub mod compare;
pub mod error;
pub mod slide;
pub mod sort;
pub mod tree;

pub use bars::SizeBars;
pub use classify::{EntryClass, EntryKind, classify};
pub use compare::{Criterion, Order, compare_names};
pub use error::{Error, Result};
pub use slide::{BoundedQueue, print_slide};
pub use sort::{SortedListing, format_size, merge_sort};
pub use tree::{TreeNode, TreePrinter, count_directories, count_files, print_json};
