#![forbid(unsafe_code)]

//! Grabbit public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! A complete pointer reorder, headless:
//!
//! ```
//! use grabbit::prelude::*;
//! use grabbit::{InputEvent, Point};
//!
//! let mut mgr = DragManager::new();
//! mgr.add_set(ItemSet::new(SetId(1)))?;
//! for id in [1, 2, 3] {
//!     mgr.register_item(ItemKey(id), SetId(1), ItemConfig::new())?;
//! }
//!
//! let mut host = NullHost;
//! mgr.dispatch(&InputEvent::PointerDown { item: ItemKey(1), part: None }, &mut host)?;
//! mgr.dispatch(
//!     &InputEvent::DragStarted { item: ItemKey(1), page: Point::ZERO, offset: Point::ZERO },
//!     &mut host,
//! )?;
//! mgr.dispatch(&InputEvent::DragEntered { item: ItemKey(3) }, &mut host)?;
//! mgr.dispatch(
//!     &InputEvent::DraggedOver { item: ItemKey(3), page: Point::ZERO, offset: Point::ZERO },
//!     &mut host,
//! )?;
//! mgr.dispatch(&InputEvent::Dropped { item: ItemKey(3) }, &mut host)?;
//! mgr.dispatch(&InputEvent::DragEnded { item: ItemKey(1) }, &mut host)?;
//! mgr.flush_deferred(&mut host);
//!
//! let order: Vec<u64> = mgr.order_of(SetId(1)).unwrap().iter().map(|k| k.0).collect();
//! assert_eq!(order, [2, 3, 1]);
//! # Ok::<(), grabbit::DragDropError>(())
//! ```

// --- Interaction re-exports ------------------------------------------------

pub use grabbit_core::event::{
    InputEvent, InputModality, KeyCode, KeyEvent, KeyEventKind, Modifiers,
};
pub use grabbit_core::geometry::{Direction, Point, Rect, Size};
pub use grabbit_core::item::{
    Capabilities, DropEffect, InteractionFlags, ItemConfig, ItemKey, SetId,
};
pub use grabbit_core::lifecycle::{GestureEvent, GesturePhase};
pub use grabbit_core::modality::KeyboardBindings;
pub use grabbit_core::scope::Scope;
pub use grabbit_core::session::{DragSession, SessionError};

// --- Orchestration re-exports ----------------------------------------------

pub use grabbit_sets::{
    AnimationTicket, Animator, DragDropError, DragDropHooks, DragDropHost, DragManager,
    DragStartData, DropReport, GeometryProvider, GhostHost, ItemMove, ItemSet, NullHost,
    OrderChange, ReorderStrategy, ResolvedMove, Result, RevertPolicy, SetConfig, TransferError,
    TransferOutcome, plan_moves, resolve_moves,
};

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragDropError, DragDropHost, DragManager, DropReport, GesturePhase, ItemConfig, ItemKey,
        ItemSet, NullHost, Result, Scope, SetConfig, SetId,
    };

    pub use crate::{core, sets};
}

pub use grabbit_core as core;
pub use grabbit_sets as sets;
