use std::path::PathBuf;

/// A file-system node discovered by the walker and handed to the strategy.
///
/// The strategy itself never looks inside an entry; filters and notifiers
/// registered on [`VisitBuilder`](crate::VisitBuilder) do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// The final path component, lossily converted to UTF-8.
    pub name: String,

    /// What kind of node this is.
    pub kind: EntryKind,

    /// Depth below the walk root. Direct children of the root are at 1.
    pub depth: usize,
}

impl Entry {
    /// `true` if this entry is a directory, i.e. skipping it prunes a subtree.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// The kind of a discovered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link that was not followed.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub(crate) fn from_file_type(ft: std::fs::FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        }
    }
}
