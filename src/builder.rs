use std::path::PathBuf;
use std::sync::Arc;

use crate::directive::Directive;
use crate::engine::{run, EngineOptions, EntryFilter, EntryNotifier, WalkConfig};
use crate::entry::Entry;
use crate::error::VisitError;
use crate::results::VisitSummary;

// ---------------------------------------------------------------------------
// VisitBuilder
// ---------------------------------------------------------------------------

/// Configures a directory walk driven by the processing strategy.
///
/// Created via [`fsvisit::visit()`](crate::visit). Register a filter and
/// observers with chained methods, then call [`run()`](VisitBuilder::run).
///
/// Observers run concurrently on walker threads, so they must be
/// `Send + Sync`; keep shared counters in atomics.
///
/// # Example
///
/// ```rust,ignore
/// let summary = fsvisit::visit("/var/log")
///     .filter(|e| e.name.ends_with(".gz"))
///     .on_found(|e| if e.name == "journal" { Directive::SkipElement } else { Directive::ContinueSearch })
///     .on_filtered_found(|e| { println!("{}", e.path.display()); Directive::ContinueSearch })
///     .threads(4)
///     .run()?;
/// ```
pub struct VisitBuilder {
    root:           PathBuf,
    filter:         Option<EntryFilter>,
    found:          Option<EntryNotifier>,
    filtered_found: Option<EntryNotifier>,
    threads:        usize,
    max_depth:      Option<usize>,
    follow_links:   bool,
    collect_errors: bool,
}

impl VisitBuilder {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:           root.into(),
            filter:         None,
            found:          None,
            filtered_found: None,
            threads:        num_cpus(),
            max_depth:      None,
            follow_links:   false,
            collect_errors: false,
        }
    }

    // ── Strategy ──────────────────────────────────────────────────────────

    /// Only entries accepted by `f` are passed to the filtered-found observer.
    pub fn filter(mut self, f: impl Fn(&Entry) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(f));
        self
    }

    /// Observer called for every entry below the root.
    pub fn on_found(mut self, n: impl Fn(&Entry) -> Directive + Send + Sync + 'static) -> Self {
        self.found = Some(Arc::new(n));
        self
    }

    /// Observer called for entries accepted by the filter.
    ///
    /// Has no effect unless a filter is set.
    pub fn on_filtered_found(
        mut self,
        n: impl Fn(&Entry) -> Directive + Send + Sync + 'static,
    ) -> Self {
        self.filtered_found = Some(Arc::new(n));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Number of walker threads. Defaults to the number of logical CPU cores.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Maximum depth below the root. `1` means direct children only.
    /// Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    /// Follow symbolic links into directories. Off by default; when on,
    /// loops are reported as [`VisitError::SymlinkLoop`].
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Collect recoverable errors into [`VisitSummary::errors`].
    ///
    /// Disabled by default. Errors are logged either way.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Walk the tree and return a summary once it completes or is stopped.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the thread count is zero or the root cannot be
    /// accessed. Errors below the root do not abort the walk.
    pub fn run(self) -> Result<VisitSummary, VisitError> {
        if self.threads == 0 {
            return Err(VisitError::InvalidThreadCount(0));
        }

        // Root failures are fatal
        if let Err(e) = std::fs::metadata(&self.root) {
            return Err(match e.kind() {
                std::io::ErrorKind::NotFound => VisitError::NotFound(self.root),
                _ => VisitError::InvalidRoot { path: self.root, source: e },
            });
        }

        let opts = EngineOptions {
            config: WalkConfig {
                threads:      self.threads,
                max_depth:    self.max_depth,
                follow_links: self.follow_links,
            },
            filter:         self.filter,
            found:          self.found,
            filtered_found: self.filtered_found,
            collect_errors: self.collect_errors,
        };

        Ok(run(&self.root, opts))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the logical CPU count, with a safe fallback.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
