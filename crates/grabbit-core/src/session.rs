#![forbid(unsafe_code)]

//! Drag session state and the single-session arena.
//!
//! A [`DragSession`] exists from the moment a drag starts until its
//! `DragEnd`, and owns everything the gesture accumulates: the dragged key,
//! its resolved scope, the source set (which changes on cross-set
//! transfer), the last meaningful drop target, outcome flags, and lazy
//! per-set order snapshots used for revert.
//!
//! [`SessionSlot`] is an arena of exactly one session. Acquiring an
//! occupied slot is a fatal invariant violation (two concurrent drags can
//! only mean lost bookkeeping) and surfaces as [`SessionError`]; it is
//! never silently ignored. Releasing an empty slot is the idempotent end
//! path and simply returns `None`.
//!
//! # Invariants
//!
//! - At most one session exists at a time.
//! - A real drop target is never overwritten by the self-over noise that
//!   follows a live reorder: a target equal to the dragged item is
//!   recorded only while nothing has been recorded yet.
//! - A set's order snapshot is captured at most once per session, the
//!   first time the session touches it.

use std::fmt;

use ahash::AHashMap;

use crate::geometry::Point;
use crate::item::{ItemKey, SetId};
use crate::scope::Scope;

/// State of one active drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The dragged item.
    pub dragged: ItemKey,

    /// Scope offered by the drag, resolved once at drag start.
    pub drag_scope: Scope,

    /// Set the gesture started in. Never changes; its revert policy
    /// governs the session.
    pub origin_set: SetId,

    /// Set currently owning the dragged item. Updated on transfer.
    pub source_set: SetId,

    /// Last meaningful drop target (see [`note_target`]).
    ///
    /// [`note_target`]: DragSession::note_target
    pub last_drop_target: Option<ItemKey>,

    /// Whether a drop landed on a target.
    pub drop_succeeded: bool,

    /// Whether the gesture was explicitly cancelled.
    pub cancelled: bool,

    /// Latest drag position, page-relative.
    pub page: Point,

    /// Latest drag position relative to the dragged element.
    pub offset: Point,

    snapshots: AHashMap<SetId, Vec<ItemKey>>,
}

impl DragSession {
    /// Open a session for `dragged` starting in `origin_set`.
    #[must_use]
    pub fn new(dragged: ItemKey, drag_scope: Scope, origin_set: SetId) -> Self {
        Self {
            dragged,
            drag_scope,
            origin_set,
            source_set: origin_set,
            last_drop_target: None,
            drop_succeeded: false,
            cancelled: false,
            page: Point::ZERO,
            offset: Point::ZERO,
            snapshots: AHashMap::new(),
        }
    }

    /// Record a drag-over target.
    ///
    /// A target other than the dragged item always wins. The dragged item
    /// over itself is recorded only when nothing has been recorded yet, so
    /// a pick-up-and-drop-in-place still reports a target while the
    /// self-over events that follow a reorder never clobber the real one.
    pub fn note_target(&mut self, target: ItemKey) {
        if target != self.dragged || self.last_drop_target.is_none() {
            self.last_drop_target = Some(target);
        }
    }

    /// Capture a set's order for revert. First capture per set wins.
    pub fn snapshot_order(&mut self, set: SetId, order: &[ItemKey]) {
        self.snapshots
            .entry(set)
            .or_insert_with(|| order.to_vec());
    }

    /// Whether a snapshot for `set` has been captured.
    #[must_use]
    pub fn has_snapshot(&self, set: SetId) -> bool {
        self.snapshots.contains_key(&set)
    }

    /// Drain the captured snapshots (used by revert).
    pub fn take_snapshots(&mut self) -> AHashMap<SetId, Vec<ItemKey>> {
        std::mem::take(&mut self.snapshots)
    }
}

// ---------------------------------------------------------------------------
// Session slot
// ---------------------------------------------------------------------------

/// Arena holding at most one active session.
#[derive(Debug, Default)]
pub struct SessionSlot {
    active: Option<DragSession>,
}

impl SessionSlot {
    /// Empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new session.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyActive`] if a session is in flight; the slot
    /// is left untouched.
    pub fn acquire(&mut self, session: DragSession) -> Result<(), SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::AlreadyActive {
                active: active.dragged,
                requested: session.dragged,
            });
        }
        self.active = Some(session);
        Ok(())
    }

    /// The active session, if any.
    #[must_use]
    pub fn get(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    /// Mutable access to the active session.
    pub fn get_mut(&mut self) -> Option<&mut DragSession> {
        self.active.as_mut()
    }

    /// Close and return the active session. Idempotent: an empty slot
    /// returns `None`.
    pub fn release(&mut self) -> Option<DragSession> {
        self.active.take()
    }

    /// Whether a session is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Key of the item being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<ItemKey> {
        self.active.as_ref().map(|s| s.dragged)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal session-lifecycle violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A second drag tried to start while one was in flight.
    AlreadyActive {
        /// Item of the in-flight session.
        active: ItemKey,
        /// Item that tried to start a new session.
        requested: ItemKey,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyActive { active, requested } => write!(
                f,
                "drag session already active for item {} (requested by item {})",
                active.0, requested.0
            ),
        }
    }
}

impl std::error::Error for SessionError {}
