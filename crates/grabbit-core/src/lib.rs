#![forbid(unsafe_code)]

//! Core: gesture lifecycle, scopes, sessions, and modality adapters.
//!
//! # Role in grabbit
//! `grabbit-core` is the interaction layer. It owns the canonical gesture
//! event order, the per-item state machines that enforce it, the scope
//! matching rules that decide which targets a drag may land on, and the
//! adapters that translate pointer, touch, and keyboard input into one
//! modality-blind signal stream.
//!
//! # Primary responsibilities
//! - **ItemGesture**: per-item machine emitting `Grab` through `DragEnd`
//!   in canonical order, exactly one terminal per gesture.
//! - **Scope**: comma-list/wildcard matching between drag and drop sides.
//! - **DragSession / SessionSlot**: per-drag state and the single active
//!   session invariant.
//! - **Modality adapters**: native pointer mapping plus synthesized touch
//!   and keyboard drag streams.
//! - **DeferQueue**: host-driven two-tier deferral for state that must not
//!   flip mid-event.
//!
//! # How it fits in the system
//! Set orchestration (`grabbit-sets`) consumes the canonical events this
//! crate emits and applies reorder strategies, revert policies, and
//! cross-set transfer on top. Hosts feed routed [`InputEvent`]s in and
//! drain the deferred queue at their render boundary; nothing in this
//! crate touches a real view tree.

pub mod defer;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod item;
pub mod lifecycle;
pub mod logging;
pub mod modality;
pub mod scope;
pub mod session;

pub use defer::{DeferPhase, DeferQueue, DeferredAction};
pub use event::{InputEvent, InputModality, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use geometry::{Direction, Point, Rect, Size};
pub use gesture::{GestureSignal, ItemGesture, Retarget, TargetTracker};
pub use item::{Capabilities, DropEffect, InteractionFlags, ItemConfig, ItemKey, SetId};
pub use lifecycle::{GestureEvent, GesturePhase};
pub use modality::{
    AdapterContext, AdapterEffects, KeyAction, KeyboardAdapter, KeyboardBindings, Modality,
    PointerAdapter, RoutedSignal, TouchAdapter,
};
pub use scope::Scope;
pub use session::{DragSession, SessionError, SessionSlot};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
