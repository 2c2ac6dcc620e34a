use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use ignore::{DirEntry, WalkBuilder, WalkState};
use tracing::{debug, warn};

use crate::directive::Directive;
use crate::entry::{Entry, EntryKind};
use crate::error::{from_ignore, VisitError};
use crate::results::VisitSummary;
use crate::strategy::process_item_found;
use crate::traits::{DirectInvoker, Filter, Notifier};

/// Shared filter predicate over walked entries.
pub type EntryFilter = Arc<dyn Fn(&Entry) -> bool + Send + Sync>;

/// Shared found / filtered-found observer over walked entries.
pub type EntryNotifier = Arc<dyn Fn(&Entry) -> Directive + Send + Sync>;

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to the engine.
pub(crate) struct WalkConfig {
    pub threads:      usize,
    pub max_depth:    Option<usize>,
    pub follow_links: bool,
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub config:         WalkConfig,
    pub filter:         Option<EntryFilter>,
    pub found:          Option<EntryNotifier>,
    pub filtered_found: Option<EntryNotifier>,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Walk `root` in parallel, running the processing strategy on every entry
/// below it and translating each directive into a [`WalkState`].
///
/// Called by `VisitBuilder::run()` after validating inputs.
pub(crate) fn run(root: &Path, opts: EngineOptions) -> VisitSummary {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(opts.config.follow_links)
        .threads(opts.config.threads)
        .max_depth(opts.config.max_depth);

    let walker = builder.build_parallel();

    // Shared state across threads
    let found    = Arc::new(AtomicUsize::new(0));
    let filtered = Arc::new(AtomicUsize::new(0));
    let skipped  = Arc::new(AtomicUsize::new(0));
    let files    = Arc::new(AtomicUsize::new(0));
    let dirs     = Arc::new(AtomicUsize::new(0));
    let stopped  = Arc::new(AtomicBool::new(false));
    let errors   = Arc::new(Mutex::new(Vec::<VisitError>::new()));

    debug!(root = %root.display(), threads = opts.config.threads, "walk started");
    let start = Instant::now();

    walker.run(|| {
        let filter_fn      = opts.filter.clone();
        let found_fn       = opts.found.clone();
        let filtered_fn    = opts.filtered_found.clone();
        let found          = Arc::clone(&found);
        let filtered       = Arc::clone(&filtered);
        let skipped        = Arc::clone(&skipped);
        let files          = Arc::clone(&files);
        let dirs           = Arc::clone(&dirs);
        let stopped        = Arc::clone(&stopped);
        let errors         = Arc::clone(&errors);
        let collect_errors = opts.collect_errors;

        Box::new(move |res: Result<DirEntry, ignore::Error>| -> WalkState {
            let dent = match res {
                Ok(d) => d,
                Err(e) => {
                    let err = from_ignore(e);
                    warn!(error = %err, "skipping unreadable entry");
                    if collect_errors {
                        if let Ok(mut errs) = errors.lock() {
                            errs.push(err);
                        }
                    }
                    return WalkState::Continue;
                }
            };

            // The root is where the walk starts, not something it found
            if dent.depth() == 0 {
                return WalkState::Continue;
            }

            let Some(ft) = dent.file_type() else {
                return WalkState::Continue;
            };

            if ft.is_dir() {
                dirs.fetch_add(1, Ordering::Relaxed);
            } else if ft.is_file() {
                files.fetch_add(1, Ordering::Relaxed);
            }

            let entry = to_entry(&dent, ft);
            found.fetch_add(1, Ordering::Relaxed);

            // Count filter hits on the way through
            let counting_filter = filter_fn.as_deref().map(|f| {
                let filtered = &filtered;
                move |e: &Entry| {
                    let passed = f(e);
                    if passed {
                        filtered.fetch_add(1, Ordering::Relaxed);
                    }
                    passed
                }
            });
            let mut on_found    = found_fn.as_deref();
            let mut on_filtered = filtered_fn.as_deref();

            let directive = process_item_found(
                &entry,
                counting_filter.as_ref().map(|f| f as &dyn Filter<Entry>),
                on_found.as_mut().map(|n| n as &mut dyn Notifier<Entry>),
                on_filtered.as_mut().map(|n| n as &mut dyn Notifier<Entry>),
                &mut DirectInvoker,
            );

            if directive.is_skip() {
                skipped.fetch_add(1, Ordering::Relaxed);
            } else if directive.is_stop() && !stopped.swap(true, Ordering::Relaxed) {
                debug!(path = %entry.path.display(), "stop requested");
            }

            directive.into()
        })
    });

    let duration = start.elapsed();

    let summary = VisitSummary {
        found:    found.load(Ordering::Relaxed),
        filtered: filtered.load(Ordering::Relaxed),
        skipped:  skipped.load(Ordering::Relaxed),
        stopped:  stopped.load(Ordering::Relaxed),
        files:    files.load(Ordering::Relaxed),
        dirs:     dirs.load(Ordering::Relaxed),
        duration,
        errors:   Arc::try_unwrap(errors)
            .map(|m| m.into_inner().unwrap_or_default())
            .unwrap_or_default(),
    };

    debug!(
        found = summary.found,
        filtered = summary.filtered,
        skipped = summary.skipped,
        stopped = summary.stopped,
        elapsed_ms = summary.duration.as_millis() as u64,
        "walk finished"
    );

    summary
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_entry(dent: &DirEntry, ft: std::fs::FileType) -> Entry {
    Entry {
        path:  PathBuf::from(dent.path()),
        name:  dent.file_name().to_string_lossy().into_owned(),
        kind:  EntryKind::from_file_type(ft),
        depth: dent.depth(),
    }
}
