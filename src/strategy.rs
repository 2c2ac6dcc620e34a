use std::fmt;

use tracing::{debug, trace};

use crate::directive::Directive;
use crate::traits::{DirectInvoker, Filter, Invoker, Notifier, Stage};

// ---------------------------------------------------------------------------
// process_item_found()
// ---------------------------------------------------------------------------

/// Decide what the traversal should do with one discovered entry.
///
/// Runs two sequential stages:
///
/// 1. `found` is dispatched through `invoker`, always.
/// 2. If a `filter` is given and accepts the entry, `filtered_found` is
///    dispatched through `invoker`, starting again from
///    [`Directive::ContinueSearch`].
///
/// The result is the more severe of the two stage directives. Without a
/// filter, or when the filter rejects the entry, the second stage never runs
/// and the stage-1 directive is returned as is. Absent notifiers count as
/// returning `ContinueSearch`.
///
/// Filter and notifier panics are not caught.
///
/// # Example
///
/// ```rust
/// use fsvisit::{process_item_found, DirectInvoker, Directive};
///
/// let mut found = 0;
/// let mut on_found = |_: &str| { found += 1; Directive::ContinueSearch };
/// let mut on_filtered = |_: &str| Directive::StopSearch;
/// let only_logs = |name: &str| name.ends_with(".log");
///
/// let d = process_item_found(
///     "app.log",
///     Some(&only_logs),
///     Some(&mut on_found),
///     Some(&mut on_filtered),
///     &mut DirectInvoker,
/// );
///
/// assert_eq!(d, Directive::StopSearch);
/// assert_eq!(found, 1);
/// ```
pub fn process_item_found<E: ?Sized>(
    entry: &E,
    filter: Option<&(dyn Filter<E> + '_)>,
    found: Option<&mut (dyn Notifier<E> + '_)>,
    filtered_found: Option<&mut (dyn Notifier<E> + '_)>,
    invoker: &mut (dyn Invoker<E> + '_),
) -> Directive {
    let found_directive = invoker.invoke(Stage::Found, found, entry);
    trace!(stage = %Stage::Found, directive = %found_directive, "stage complete");

    let Some(filter) = filter else {
        return found_directive;
    };

    if !filter.matches(entry) {
        trace!(directive = %found_directive, "filter rejected entry");
        return found_directive;
    }

    let filtered_directive = invoker.invoke(Stage::FilteredFound, filtered_found, entry);
    trace!(stage = %Stage::FilteredFound, directive = %filtered_directive, "stage complete");

    let directive = found_directive.escalate(filtered_directive);
    if directive > found_directive {
        debug!(from = %found_directive, to = %directive, "filtered stage escalated directive");
    }
    directive
}

// ---------------------------------------------------------------------------
// ProcessingStrategy
// ---------------------------------------------------------------------------

/// A reusable bundle of optional collaborators for [`process_item_found`].
///
/// Holds the filter and both notifiers so a traversal loop can call
/// [`process_item_found`](ProcessingStrategy::process_item_found) once per
/// entry. Nothing is carried from one call to the next.
///
/// # Example
///
/// ```rust
/// use fsvisit::{Directive, ProcessingStrategy};
///
/// let mut strategy = ProcessingStrategy::<str>::new()
///     .filter(|name| name.starts_with('.'))
///     .on_filtered_found(|_| Directive::SkipElement);
///
/// assert_eq!(strategy.process_item_found(".git"), Directive::SkipElement);
/// assert_eq!(strategy.process_item_found("src"), Directive::ContinueSearch);
/// ```
pub struct ProcessingStrategy<'a, E: ?Sized> {
    filter:         Option<Box<dyn Filter<E> + 'a>>,
    found:          Option<Box<dyn Notifier<E> + 'a>>,
    filtered_found: Option<Box<dyn Notifier<E> + 'a>>,
}

impl<E: ?Sized> Default for ProcessingStrategy<'_, E> {
    fn default() -> Self {
        Self {
            filter:         None,
            found:          None,
            filtered_found: None,
        }
    }
}

impl<E: ?Sized> fmt::Debug for ProcessingStrategy<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessingStrategy")
            .field("filter", &self.filter.as_ref().map(|_| "..."))
            .field("found", &self.found.as_ref().map(|_| "..."))
            .field("filtered_found", &self.filtered_found.as_ref().map(|_| "..."))
            .finish()
    }
}

impl<'a, E: ?Sized> ProcessingStrategy<'a, E> {
    /// A strategy with no filter and no notifiers. Every entry continues.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Filter ────────────────────────────────────────────────────────────

    /// Only entries accepted by `f` reach the filtered-found stage.
    pub fn filter(self, f: impl Fn(&E) -> bool + 'a) -> Self {
        self.with_filter(f)
    }

    /// Like [`filter`](Self::filter), for any [`Filter`] implementation.
    pub fn with_filter(mut self, f: impl Filter<E> + 'a) -> Self {
        self.filter = Some(Box::new(f));
        self
    }

    // ── Notifiers ─────────────────────────────────────────────────────────

    /// Called for every entry.
    pub fn on_found(self, n: impl FnMut(&E) -> Directive + 'a) -> Self {
        self.with_found(n)
    }

    /// Like [`on_found`](Self::on_found), for any [`Notifier`] implementation.
    pub fn with_found(mut self, n: impl Notifier<E> + 'a) -> Self {
        self.found = Some(Box::new(n));
        self
    }

    /// Called for entries accepted by the filter. Never called without one.
    pub fn on_filtered_found(self, n: impl FnMut(&E) -> Directive + 'a) -> Self {
        self.with_filtered_found(n)
    }

    /// Like [`on_filtered_found`](Self::on_filtered_found), for any
    /// [`Notifier`] implementation.
    pub fn with_filtered_found(mut self, n: impl Notifier<E> + 'a) -> Self {
        self.filtered_found = Some(Box::new(n));
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Process one entry, calling notifiers directly.
    pub fn process_item_found(&mut self, entry: &E) -> Directive {
        self.process_item_found_with(entry, &mut DirectInvoker)
    }

    /// Process one entry, dispatching notifiers through `invoker`.
    pub fn process_item_found_with<I>(&mut self, entry: &E, invoker: &mut I) -> Directive
    where
        I: Invoker<E>,
    {
        process_item_found(
            entry,
            self.filter.as_deref(),
            self.found.as_deref_mut(),
            self.filtered_found.as_deref_mut(),
            invoker,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    // The entry is opaque to the strategy; a unit struct is enough.
    struct Item;

    fn count(counter: &Cell<usize>) -> impl FnMut(&Item) -> Directive + '_ {
        move |_| {
            counter.set(counter.get() + 1);
            Directive::ContinueSearch
        }
    }

    #[test]
    fn item_found_call() {
        let calls = Cell::new(0);
        let d = ProcessingStrategy::<Item>::new()
            .on_found(count(&calls))
            .process_item_found(&Item);

        assert_eq!(calls.get(), 1);
        assert_eq!(d, Directive::ContinueSearch);
    }

    #[test]
    fn filtered_item_found_call() {
        let calls = Cell::new(0);
        ProcessingStrategy::<Item>::new()
            .filter(|_| true)
            .on_found(count(&calls))
            .on_filtered_found(count(&calls))
            .process_item_found(&Item);

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn item_not_passing_filter() {
        let calls = Cell::new(0);
        let filtered = Cell::new(0);
        let d = ProcessingStrategy::<Item>::new()
            .filter(|_| false)
            .on_found(count(&calls))
            .on_filtered_found(count(&filtered))
            .process_item_found(&Item);

        assert_eq!(calls.get(), 1);
        assert_eq!(filtered.get(), 0);
        assert_eq!(d, Directive::ContinueSearch);
    }

    #[test]
    fn no_filter_never_runs_filtered_stage() {
        let filtered = Cell::new(0);
        let d = ProcessingStrategy::<Item>::new()
            .on_found(|_: &Item| Directive::ContinueSearch)
            .on_filtered_found(|_| {
                filtered.set(filtered.get() + 1);
                Directive::StopSearch
            })
            .process_item_found(&Item);

        assert_eq!(filtered.get(), 0);
        assert_eq!(d, Directive::ContinueSearch);
    }

    #[test]
    fn no_notifiers_continue() {
        let mut strategy = ProcessingStrategy::<Item>::new().filter(|_| true);
        assert_eq!(strategy.process_item_found(&Item), Directive::ContinueSearch);
    }

    #[test]
    fn found_skip_survives_filtered_continue() {
        let filtered = Cell::new(0);
        let d = ProcessingStrategy::<Item>::new()
            .filter(|_| true)
            .on_found(|_| Directive::SkipElement)
            .on_filtered_found(count(&filtered))
            .process_item_found(&Item);

        assert_eq!(d, Directive::SkipElement);
        assert_eq!(filtered.get(), 1);
    }

    #[test]
    fn filtered_skip_is_returned() {
        let calls = Cell::new(0);
        let d = ProcessingStrategy::<Item>::new()
            .filter(|_| true)
            .on_found(count(&calls))
            .on_filtered_found(|_| Directive::SkipElement)
            .process_item_found(&Item);

        assert_eq!(d, Directive::SkipElement);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn filtered_stop_is_returned() {
        let calls = Cell::new(0);
        let d = ProcessingStrategy::<Item>::new()
            .filter(|_| true)
            .on_found(count(&calls))
            .on_filtered_found(|_| Directive::StopSearch)
            .process_item_found(&Item);

        assert_eq!(d, Directive::StopSearch);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn found_stop_is_not_downgraded() {
        let d = ProcessingStrategy::<Item>::new()
            .filter(|_| true)
            .on_found(|_| Directive::StopSearch)
            .on_filtered_found(|_| Directive::SkipElement)
            .process_item_found(&Item);

        assert_eq!(d, Directive::StopSearch);
    }

    #[test]
    fn repeated_calls_are_independent() {
        let mut strategy = ProcessingStrategy::<Item>::new()
            .filter(|_| true)
            .on_filtered_found(|_| Directive::SkipElement);

        let first = strategy.process_item_found(&Item);
        let second = strategy.process_item_found(&Item);
        assert_eq!(first, Directive::SkipElement);
        assert_eq!(first, second);
    }

    #[test]
    fn free_function_with_absent_inputs() {
        let d = process_item_found::<Item>(&Item, None, None, None, &mut DirectInvoker);
        assert_eq!(d, Directive::ContinueSearch);
    }

    #[test]
    #[should_panic(expected = "filter exploded")]
    fn filter_panic_propagates() {
        ProcessingStrategy::<Item>::new()
            .filter(|_: &Item| panic!("filter exploded"))
            .process_item_found(&Item);
    }

    #[test]
    #[should_panic(expected = "found observer exploded")]
    fn found_panic_propagates() {
        ProcessingStrategy::<Item>::new()
            .on_found(|_: &Item| panic!("found observer exploded"))
            .process_item_found(&Item);
    }

    #[test]
    #[should_panic(expected = "filtered observer exploded")]
    fn filtered_found_panic_propagates() {
        ProcessingStrategy::<Item>::new()
            .filter(|_| true)
            .on_filtered_found(|_: &Item| panic!("filtered observer exploded"))
            .process_item_found(&Item);
    }
}
