use std::fmt;

use ignore::WalkState;

/// What the traversal should do after an entry has been processed.
///
/// Variants are declared in severity order, so the derived [`Ord`] is the
/// severity order: `ContinueSearch < SkipElement < StopSearch`. Combining two
/// directives always keeps the more severe one, see [`Directive::escalate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Directive {
    /// Keep walking. The starting value of every notification stage.
    #[default]
    ContinueSearch,

    /// Do not descend into this entry. The walk continues elsewhere.
    SkipElement,

    /// Terminate the whole traversal.
    StopSearch,
}

impl Directive {
    /// Combine with another stage's outcome, keeping the more severe one.
    #[must_use]
    pub fn escalate(self, other: Directive) -> Directive {
        self.max(other)
    }

    /// `true` for [`Directive::StopSearch`].
    pub fn is_stop(self) -> bool {
        self == Directive::StopSearch
    }

    /// `true` for [`Directive::SkipElement`].
    pub fn is_skip(self) -> bool {
        self == Directive::SkipElement
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Directive::ContinueSearch => "continue",
            Directive::SkipElement    => "skip",
            Directive::StopSearch     => "stop",
        };
        f.write_str(s)
    }
}

/// Lets a strategy result be returned straight from an `ignore` visitor.
impl From<Directive> for WalkState {
    fn from(d: Directive) -> Self {
        match d {
            Directive::ContinueSearch => WalkState::Continue,
            Directive::SkipElement    => WalkState::Skip,
            Directive::StopSearch     => WalkState::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_continue() {
        assert_eq!(Directive::default(), Directive::ContinueSearch);
    }

    #[test]
    fn escalate_keeps_more_severe() {
        use Directive::*;

        assert_eq!(ContinueSearch.escalate(SkipElement), SkipElement);
        assert_eq!(SkipElement.escalate(ContinueSearch), SkipElement);
        assert_eq!(StopSearch.escalate(SkipElement), StopSearch);
        assert_eq!(SkipElement.escalate(StopSearch), StopSearch);
        assert_eq!(ContinueSearch.escalate(ContinueSearch), ContinueSearch);
    }

    #[test]
    fn maps_to_walk_state() {
        assert!(matches!(WalkState::from(Directive::ContinueSearch), WalkState::Continue));
        assert!(matches!(WalkState::from(Directive::SkipElement), WalkState::Skip));
        assert!(matches!(WalkState::from(Directive::StopSearch), WalkState::Quit));
    }

    #[test]
    fn predicates() {
        assert!(Directive::StopSearch.is_stop());
        assert!(!Directive::SkipElement.is_stop());
        assert!(Directive::SkipElement.is_skip());
        assert!(!Directive::ContinueSearch.is_skip());
    }
}
