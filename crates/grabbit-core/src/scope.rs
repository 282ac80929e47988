#![forbid(unsafe_code)]

//! Scope tags and drop-eligibility matching.
//!
//! A scope describes which drags and drop targets may interact: a dragged
//! item offers a scope, a target accepts one, and a drop is eligible when
//! the two match. Hosts usually configure scopes as comma-separated tag
//! strings (`"set-1,set-2"`).
//!
//! # Conventions
//!
//! - An *absent* scope ([`Scope::Any`]) is the wildcard: it matches
//!   anything. This is what an unconfigured single-set host gets, where
//!   every item must interact with every other.
//! - An *explicitly empty* tag set matches nothing, on either side, even
//!   against the wildcard. Malformed input (only separators/whitespace)
//!   normalizes to the empty set, so configuration mistakes fail closed
//!   instead of erroring.
//! - Two tag sets match when their intersection is non-empty.
//!
//! Matching is cheap and must be re-evaluated at every drag-enter and again
//! at drop time; a scope edited mid-gesture takes effect at the next check.

use std::fmt;

/// A normalized drop-eligibility scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Wildcard: matches any non-empty scope and the wildcard itself.
    Any,

    /// A sorted, deduplicated set of tags. Empty matches nothing.
    Tags(Vec<String>),
}

impl Default for Scope {
    fn default() -> Self {
        Self::Any
    }
}

impl Scope {
    /// Parse a host-supplied scope attribute.
    ///
    /// `None` is the wildcard. `Some` input is split on commas, trimmed,
    /// deduplicated, and sorted; input that yields no tags becomes the
    /// empty set.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Scope::Any,
            Some(s) => Self::from_tags(s.split(',')),
        }
    }

    /// Build a scope from an iterator of tags, normalizing as [`parse`]
    /// does.
    ///
    /// [`parse`]: Scope::parse
    #[must_use]
    pub fn from_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut normalized: Vec<String> = tags
            .into_iter()
            .filter_map(|t| {
                let t = t.as_ref().trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t.to_string())
                }
            })
            .collect();
        normalized.sort_unstable();
        normalized.dedup();
        Scope::Tags(normalized)
    }

    /// Whether this is the wildcard scope.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Scope::Any)
    }

    /// Whether this scope can never match anything.
    #[must_use]
    pub fn matches_nothing(&self) -> bool {
        matches!(self, Scope::Tags(tags) if tags.is_empty())
    }

    /// Whether a drag with scope `self` is eligible against a target
    /// accepting `other`.
    ///
    /// The empty set absorbs: it matches nothing even against the
    /// wildcard. Otherwise a wildcard on either side matches, and two tag
    /// sets match when they share at least one tag.
    #[must_use]
    pub fn matches(&self, other: &Scope) -> bool {
        if self.matches_nothing() || other.matches_nothing() {
            return false;
        }
        match (self, other) {
            (Scope::Any, _) | (_, Scope::Any) => true,
            (Scope::Tags(a), Scope::Tags(b)) => intersects_sorted(a, b),
        }
    }
}

/// Intersection test over two sorted, deduplicated slices.
fn intersects_sorted(a: &[String], b: &[String]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].as_str().cmp(b[j].as_str()) {
            std::cmp::Ordering::Equal => return true,
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    false
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Any => f.write_str("*"),
            Scope::Tags(tags) => f.write_str(&tags.join(",")),
        }
    }
}
