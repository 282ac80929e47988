#![forbid(unsafe_code)]

//! Drag-and-drop error model.
//!
//! # Design Principles
//!
//! 1. **Silence over noise** — most misuse is expected during teardown
//!    races and is absorbed where it happens: an out-of-phase signal is
//!    swallowed, a stale item reference no-ops, an unsatisfiable scope
//!    simply matches nothing. None of those surface here.
//! 2. **Err means corruption** — the `Err` channel is reserved for states
//!    that cannot be reconciled by ignoring them: a second concurrent
//!    session, an item found in two sets, registration misuse. Callers
//!    must not discard these.
//! 3. **Observability** — errors carry the keys involved so tracing spans
//!    and log lines can name the offenders without stringly context.

use std::fmt;

use grabbit_core::item::{ItemKey, SetId};
use grabbit_core::session::SessionError;

use crate::transfer::TransferError;

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error for manager APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragDropError {
    /// Session slot violation (a drag was already active).
    Session(SessionError),
    /// Cross-set transfer found membership corrupted.
    Transfer(TransferError),
    /// Item registered twice.
    DuplicateItem { item: ItemKey, set: SetId },
    /// Set registered twice.
    DuplicateSet { set: SetId },
    /// Item registered against a set the manager does not know.
    UnknownSet { set: SetId },
}

/// Standard result type for manager APIs.
pub type Result<T> = std::result::Result<T, DragDropError>;

impl DragDropError {
    /// Error type label for metrics and tracing.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::Transfer(_) => "transfer",
            Self::DuplicateItem { .. } => "duplicate_item",
            Self::DuplicateSet { .. } => "duplicate_set",
            Self::UnknownSet { .. } => "unknown_set",
        }
    }

    /// Whether the error indicates corrupted interaction state, as opposed
    /// to registration misuse caught before any mutation.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Session(_) | Self::Transfer(_))
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for DragDropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::DuplicateItem { item, set } => {
                write!(f, "item {item:?} already registered in set {set:?}")
            }
            Self::DuplicateSet { set } => write!(f, "set {set:?} already registered"),
            Self::UnknownSet { set } => write!(f, "set {set:?} is not registered"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for DragDropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Transfer(err) => Some(err),
            _ => None,
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<SessionError> for DragDropError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<TransferError> for DragDropError {
    fn from(err: TransferError) -> Self {
        Self::Transfer(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn session_error_wraps_and_chains() {
        let err: DragDropError = SessionError::AlreadyActive {
            active: ItemKey(1),
            requested: ItemKey(2),
        }
        .into();
        assert!(matches!(err, DragDropError::Session(_)));
        assert!(err.source().is_some());
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn transfer_error_wraps_and_chains() {
        let err: DragDropError = TransferError::Duplicate {
            item: ItemKey(7),
            set: SetId(2),
        }
        .into();
        assert!(matches!(err, DragDropError::Transfer(_)));
        assert!(err.source().is_some());
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn registration_errors_have_no_source() {
        let err = DragDropError::UnknownSet { set: SetId(9) };
        assert!(err.source().is_none());
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn display_names_the_offenders() {
        let msg = DragDropError::DuplicateItem {
            item: ItemKey(3),
            set: SetId(1),
        }
        .to_string();
        assert!(msg.contains("ItemKey(3)"));
        assert!(msg.contains("SetId(1)"));

        let msg = DragDropError::DuplicateSet { set: SetId(4) }.to_string();
        assert!(msg.contains("SetId(4)"));
    }

    #[test]
    fn error_type_labels() {
        let cases: Vec<(DragDropError, &str)> = vec![
            (
                SessionError::AlreadyActive {
                    active: ItemKey(1),
                    requested: ItemKey(2),
                }
                .into(),
                "session",
            ),
            (
                TransferError::Orphaned {
                    item: ItemKey(1),
                    expected: SetId(1),
                }
                .into(),
                "transfer",
            ),
            (
                DragDropError::DuplicateItem {
                    item: ItemKey(1),
                    set: SetId(1),
                },
                "duplicate_item",
            ),
            (DragDropError::DuplicateSet { set: SetId(1) }, "duplicate_set"),
            (DragDropError::UnknownSet { set: SetId(1) }, "unknown_set"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.error_type(), expected);
        }
    }

    #[test]
    fn question_mark_propagation() {
        fn acquire() -> std::result::Result<(), SessionError> {
            Err(SessionError::AlreadyActive {
                active: ItemKey(1),
                requested: ItemKey(2),
            })
        }
        fn acquire_twice() -> Result<()> {
            acquire()?;
            Ok(())
        }
        assert_eq!(acquire_twice().unwrap_err().error_type(), "session");
    }
}
