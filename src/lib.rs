//! # fsvisit
//!
//! Per-entry decision logic for file-system traversal.
//!
//! For each discovered entry the processing strategy notifies a "found"
//! observer, optionally runs a filter and notifies a "filtered found"
//! observer, and folds what both observers asked for into one
//! [`Directive`]: continue, skip this entry's subtree, or stop the walk.
//!
//! The strategy is generic over the entry type and does no I/O. A parallel
//! directory walker built on [`ignore`] is included as [`visit()`] for the
//! common case.
//!
//! # The strategy on its own
//!
//! ```rust
//! use fsvisit::{Directive, ProcessingStrategy};
//!
//! let mut strategy = ProcessingStrategy::<str>::new()
//!     .on_found(|name| {
//!         if name == "node_modules" { Directive::SkipElement } else { Directive::ContinueSearch }
//!     })
//!     .filter(|name| name.ends_with(".rs"))
//!     .on_filtered_found(|name| {
//!         if name == "main.rs" { Directive::StopSearch } else { Directive::ContinueSearch }
//!     });
//!
//! assert_eq!(strategy.process_item_found("node_modules"), Directive::SkipElement);
//! assert_eq!(strategy.process_item_found("lib.rs"), Directive::ContinueSearch);
//! assert_eq!(strategy.process_item_found("main.rs"), Directive::StopSearch);
//! ```
//!
//! # Walking a directory
//!
//! ```rust,no_run
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use fsvisit::Directive;
//!
//! let logs = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&logs);
//!
//! let summary = fsvisit::visit("/var/log")
//!     .filter(|e| e.name.ends_with(".log"))
//!     .on_filtered_found(move |_| {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!         Directive::ContinueSearch
//!     })
//!     .run()
//!     .unwrap();
//!
//! println!("{} log files out of {} entries", logs.load(Ordering::Relaxed), summary.found);
//! ```

#![forbid(unsafe_code)]

mod builder;
mod directive;
mod engine;
mod entry;
mod error;
mod results;
mod strategy;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::VisitBuilder;
pub use directive::Directive;
pub use engine::{EntryFilter, EntryNotifier};
pub use entry::{Entry, EntryKind};
pub use error::VisitError;
pub use results::VisitSummary;
pub use strategy::{process_item_found, ProcessingStrategy};
pub use traits::{DirectInvoker, Filter, Invoker, Notifier, Stage};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a [`VisitBuilder`] that walks everything below `root`.
pub fn visit(root: impl Into<std::path::PathBuf>) -> VisitBuilder {
    VisitBuilder::new(root)
}
