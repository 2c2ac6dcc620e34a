use std::time::Duration;

use crate::error::VisitError;

/// The outcome of a completed walk.
///
/// Counts are taken after the strategy ran for each entry. Under a parallel
/// walk a few entries may still be processed after a `StopSearch` before
/// every worker observes the quit.
#[derive(Debug)]
pub struct VisitSummary {
    /// Entries handed to the strategy (the root itself is excluded).
    pub found: usize,

    /// Entries accepted by the filter. Always 0 without a filter.
    pub filtered: usize,

    /// Entries for which the strategy returned `SkipElement`.
    pub skipped: usize,

    /// Whether any entry returned `StopSearch`.
    pub stopped: bool,

    /// Regular files encountered.
    pub files: usize,

    /// Directories encountered, excluding the root.
    pub dirs: usize,

    /// Wall-clock time of the walk.
    pub duration: Duration,

    /// Recoverable errors hit during the walk.
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<VisitError>,
}
