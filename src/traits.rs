use std::fmt;

use crate::directive::Directive;

/// Decides whether an entry is also reported to the filtered-found stage.
///
/// Implemented for every `Fn(&E) -> bool`, so a plain closure works:
///
/// ```rust
/// use fsvisit::Filter;
///
/// let txt = |name: &str| name.ends_with(".txt");
/// assert!(txt.matches("notes.txt"));
/// assert!(!txt.matches("notes.md"));
/// ```
///
/// A panicking filter is not caught; the panic reaches the caller.
pub trait Filter<E: ?Sized> {
    /// Returns `true` if the entry passes the filter.
    fn matches(&self, entry: &E) -> bool;
}

impl<E: ?Sized, F> Filter<E> for F
where
    F: Fn(&E) -> bool,
{
    fn matches(&self, entry: &E) -> bool {
        self(entry)
    }
}

/// An observer notified when an entry is found.
///
/// Instead of mutating a shared argument record, a notifier answers with the
/// [`Directive`] it wants. A notifier with nothing to say returns
/// [`Directive::ContinueSearch`].
///
/// ```rust
/// use fsvisit::{Directive, Notifier};
///
/// let mut skip_target = |name: &str| {
///     if name == "target" { Directive::SkipElement } else { Directive::ContinueSearch }
/// };
/// assert_eq!(skip_target.notify("target"), Directive::SkipElement);
/// assert_eq!(skip_target.notify("src"), Directive::ContinueSearch);
/// ```
pub trait Notifier<E: ?Sized> {
    /// Observe the entry and return the requested directive.
    fn notify(&mut self, entry: &E) -> Directive;
}

impl<E: ?Sized, F> Notifier<E> for F
where
    F: FnMut(&E) -> Directive,
{
    fn notify(&mut self, entry: &E) -> Directive {
        self(entry)
    }
}

/// The notification phase being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Unconditional "item found" notification.
    Found,

    /// "Filtered item found" notification, only after the filter passed.
    FilteredFound,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Found         => f.write_str("found"),
            Stage::FilteredFound => f.write_str("filtered_found"),
        }
    }
}

/// Dispatches a possibly-absent notifier.
///
/// [`DirectInvoker`] is what the strategy uses by default. Substitute your own
/// to observe or reroute dispatch, e.g. to record stage order in tests.
/// An absent notifier must behave like one that returns
/// [`Directive::ContinueSearch`].
pub trait Invoker<E: ?Sized> {
    /// Fire `notifier` for `entry` if present and return its directive.
    fn invoke(
        &mut self,
        stage: Stage,
        notifier: Option<&mut (dyn Notifier<E> + '_)>,
        entry: &E,
    ) -> Directive;
}

/// Calls the notifier in place, or does nothing when it is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectInvoker;

impl<E: ?Sized> Invoker<E> for DirectInvoker {
    fn invoke(
        &mut self,
        _stage: Stage,
        notifier: Option<&mut (dyn Notifier<E> + '_)>,
        entry: &E,
    ) -> Directive {
        match notifier {
            Some(n) => n.notify(entry),
            None    => Directive::ContinueSearch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_invoker_without_notifier_continues() {
        let d = Invoker::<str>::invoke(&mut DirectInvoker, Stage::Found, None, "a");
        assert_eq!(d, Directive::ContinueSearch);
    }

    #[test]
    fn direct_invoker_returns_notifier_directive() {
        let mut calls = 0;
        let mut stop = |_: &str| {
            calls += 1;
            Directive::StopSearch
        };
        let d = Invoker::<str>::invoke(&mut DirectInvoker, Stage::FilteredFound, Some(&mut stop), "a");
        assert_eq!(d, Directive::StopSearch);
        assert_eq!(calls, 1);
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Found.to_string(), "found");
        assert_eq!(Stage::FilteredFound.to_string(), "filtered_found");
    }
}
