use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking a directory tree.
///
/// The decision strategy itself never fails; these only come from the walk
/// that feeds it.
#[derive(Error, Debug)]
pub enum VisitError {
    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("symlink loop at {}", .0.display())]
    SymlinkLoop(PathBuf),

    #[error("IO error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),

    // Config
    #[error("cannot walk root {}", .path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid thread count: {0}")]
    InvalidThreadCount(usize),
}

impl VisitError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. }
            | Self::InvalidRoot { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the walk keeps going after this error.
    ///
    /// Recoverable errors are logged and, with `.collect_errors(true)`,
    /// surfaced in [`VisitSummary::errors`](crate::VisitSummary::errors).
    /// The rest are returned from [`VisitBuilder::run`](crate::VisitBuilder::run).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_) | Self::SymlinkLoop(_) | Self::Io { .. } | Self::Walk(_)
        )
    }
}

/// Map an `ignore` walk error onto [`VisitError`].
pub(crate) fn from_ignore(e: ignore::Error) -> VisitError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    VisitError::PermissionDenied(path)
                } else {
                    VisitError::Io { path, source: io_err }
                }
            }
            other => VisitError::Walk(other.to_string()),
        },
        ignore::Error::WithDepth { err, .. } => from_ignore(*err),
        ignore::Error::Loop { child, .. } => VisitError::SymlinkLoop(child),
        ignore::Error::Io(io_err) => VisitError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => VisitError::Walk(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_maps_to_symlink_loop() {
        let err = from_ignore(ignore::Error::Loop {
            ancestor: PathBuf::from("/a"),
            child:    PathBuf::from("/a/b/link"),
        });
        assert!(matches!(err, VisitError::SymlinkLoop(ref p) if p == &PathBuf::from("/a/b/link")));
        assert!(err.is_recoverable());
    }

    #[test]
    fn permission_denied_keeps_path() {
        let err = from_ignore(ignore::Error::WithPath {
            path: PathBuf::from("/locked"),
            err:  Box::new(ignore::Error::Io(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            ))),
        });
        assert!(matches!(err, VisitError::PermissionDenied(_)));
        assert_eq!(err.path(), Some(&PathBuf::from("/locked")));
    }

    #[test]
    fn config_errors_are_fatal() {
        let err = VisitError::InvalidThreadCount(0);
        assert!(!err.is_recoverable());
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "invalid thread count: 0");
    }

    #[test]
    fn invalid_root_is_fatal() {
        let err = VisitError::InvalidRoot {
            path:   PathBuf::from("/etc/passwd/child"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.path(), Some(&PathBuf::from("/etc/passwd/child")));
    }

    #[test]
    fn missing_root_is_fatal() {
        assert!(!VisitError::NotFound(PathBuf::from("/nope")).is_recoverable());
    }
}
