//! Recursive tree construction, printing, and counting
//!
//! The tree prints in pre-order while it is built: each entry's line goes
//! out before its children are explored, and the finished tree is then
//! walked twice more for the directory and file totals.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use termcolor::{Buffer, ColorChoice, NoColor, StandardStream, WriteColor};

use crate::classify::{self, EntryClass, EntryKind, classify};
use crate::error::Result;
use crate::sort::list_entries;

const MID_CONNECTOR: &str = "├── ";
const LAST_CONNECTOR: &str = "└── ";
const CONTINUE_PREFIX: &str = "│   ";
const BLANK_PREFIX: &str = "    ";

/// One filesystem entry in a built tree.
///
/// Nodes own their children outright; a file node never has any. The root
/// node is synthesized for the starting path and is not itself counted.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub path: PathBuf,
    pub is_file: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, is_file: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_file,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Directories strictly below `node`; the node itself is never counted.
pub fn count_directories(node: &TreeNode) -> usize {
    node.children
        .iter()
        .filter(|child| !child.is_file)
        .map(|child| 1 + count_directories(child))
        .sum()
}

/// Files strictly below `node`.
pub fn count_files(node: &TreeNode) -> usize {
    node.children
        .iter()
        .map(|child| {
            if child.is_file {
                1
            } else {
                count_files(child)
            }
        })
        .sum()
}

/// Print a built tree as pretty-printed JSON to stdout.
pub fn print_json(node: &TreeNode) -> io::Result<()> {
    let json =
        serde_json::to_string_pretty(node).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

/// Walks a directory, printing each entry as it is attached to the tree.
pub struct TreePrinter {
    show_hidden: bool,
}

impl TreePrinter {
    pub fn new(show_hidden: bool) -> Self {
        Self { show_hidden }
    }

    /// Colored rendering to stdout. Returns the built tree.
    pub fn print(&self, root: &Path, use_color: bool) -> Result<TreeNode> {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.render(root, &mut stdout)
    }

    /// Plain-text rendering; returns the built tree and its printed form.
    pub fn format(&self, root: &Path) -> Result<(TreeNode, String)> {
        let mut buffer = Buffer::no_color();
        let tree = self.render(root, &mut buffer)?;
        Ok((tree, String::from_utf8_lossy(buffer.as_slice()).into_owned()))
    }

    /// Build the tree without printing anything (used for JSON output).
    pub fn build(&self, root: &Path) -> Result<TreeNode> {
        let mut sink = NoColor::new(io::sink());
        self.render(root, &mut sink)
    }

    fn render<W: WriteColor>(&self, root: &Path, out: &mut W) -> Result<TreeNode> {
        // The invoked root must be listable; failures deeper down only cost
        // their own subtree.
        let entries = list_entries(root)?;

        let root_class = EntryClass {
            kind: EntryKind::Folder,
            hidden: false,
        };
        out.set_color(&root_class.color_spec())?;
        write!(out, "{}", root.display())?;
        out.reset()?;
        writeln!(out)?;

        let mut tree = TreeNode::new(root, root.to_string_lossy(), false);
        self.walk(root, entries, &mut tree, "", out)?;

        writeln!(out)?;
        writeln!(
            out,
            "{} directories, {} files",
            count_directories(&tree),
            count_files(&tree)
        )?;
        Ok(tree)
    }

    fn walk<W: WriteColor>(
        &self,
        dir: &Path,
        mut entries: Vec<String>,
        parent: &mut TreeNode,
        prefix: &str,
        out: &mut W,
    ) -> Result<()> {
        // Case-sensitive name order, unlike the sorted-listing view.
        entries.sort();
        let visible: Vec<String> = entries
            .into_iter()
            .filter(|name| self.show_hidden || !classify::is_hidden(name))
            .collect();
        let count = visible.len();

        for (index, name) in visible.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let path = dir.join(&name);
            // Anything that cannot be confirmed as a directory stays a
            // leaf; a failed stat must not abort the traversal.
            let is_dir = path.is_dir();

            let connector = if is_last { LAST_CONNECTOR } else { MID_CONNECTOR };
            write!(out, "{}{}", prefix, connector)?;
            out.set_color(&classify(&path).color_spec())?;
            write!(out, "{}", name)?;
            out.reset()?;
            writeln!(out)?;

            let mut node = TreeNode::new(&path, &name, !is_dir);
            if is_dir {
                let extension = if is_last { BLANK_PREFIX } else { CONTINUE_PREFIX };
                let child_prefix = format!("{}{}", prefix, extension);
                match list_entries(&path) {
                    Ok(child_entries) => {
                        self.walk(&path, child_entries, &mut node, &child_prefix, out)?;
                    }
                    // A subdirectory that cannot be listed costs only its
                    // own subtree; sibling traversal continues.
                    Err(e) => eprintln!("dirlens: {}", e),
                }
            }
            parent.children.push(node);
        }
        Ok(())
    }
}
