#![forbid(unsafe_code)]

//! Modality adapters.
//!
//! Each adapter turns one physical input stream into routed
//! [`GestureSignal`]s for the per-item machines. The pointer adapter is a
//! thin mapping because the platform already runs a native drag stream;
//! touch and keyboard own real state because they synthesize that stream
//! themselves: hit-testing or directional resolution picks the target, a
//! [`TargetTracker`] converts target changes into leave/enter pairs, and
//! an over is emitted for the current target on every step.
//!
//! Adapters are scope-blind. The orchestrator filters target-side signals
//! against the active drag scope before routing, so the same adapter code
//! serves every scope configuration.
//!
//! # Invariants
//!
//! - Target-side signals always carry the dragged key, taken from the
//!   active session; a target-side platform event with no session in
//!   flight is dropped as stale.
//! - The synthesized streams preserve canonical order per step: movement
//!   first, then leave, enter, over.
//! - An adapter never starts a drag while another session is active.

use crate::event::{InputEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use crate::geometry::{Direction, Point, Rect};
use crate::gesture::{GestureSignal, TargetTracker};
use crate::item::ItemKey;
use crate::lifecycle::GesturePhase;

// ---------------------------------------------------------------------------
// Adapter seam
// ---------------------------------------------------------------------------

/// What an adapter may ask of the orchestrator while translating.
pub trait AdapterContext {
    /// Topmost registered item whose rectangle contains `page`, if any.
    fn hit_test(&self, page: Point) -> Option<ItemKey>;

    /// Current rectangle of an item.
    fn item_rect(&self, item: ItemKey) -> Option<Rect>;

    /// Nearest drop target in `direction` from `from`, honoring the
    /// active drag scope.
    fn resolve_drop_target(&self, from: ItemKey, direction: Direction) -> Option<ItemKey>;

    /// Nearest registered item in `direction` from `from`, ignoring
    /// scopes. Used for focus movement hints outside a drag.
    fn resolve_neighbor(&self, from: ItemKey, direction: Direction) -> Option<ItemKey>;

    /// Observable phase of an item's machine.
    fn phase(&self, item: ItemKey) -> GesturePhase;

    /// The dragged item of the active session, if one is in flight.
    fn active_drag(&self) -> Option<ItemKey>;
}

/// A gesture signal addressed to one item's machine.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedSignal {
    /// The machine to feed.
    pub item: ItemKey,
    /// The signal to feed it.
    pub signal: GestureSignal,
}

/// Everything one input event translated into.
#[derive(Debug, Default, PartialEq)]
pub struct AdapterEffects {
    /// Signals to feed, in order.
    pub signals: Vec<RoutedSignal>,
    /// Item the host should move focus to, if the adapter suggests one.
    pub focus_request: Option<ItemKey>,
}

impl AdapterEffects {
    /// No effects.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    fn push(&mut self, item: ItemKey, signal: GestureSignal) {
        self.signals.push(RoutedSignal { item, signal });
    }
}

/// A physical input stream translator.
pub trait Modality {
    /// Translate one routed input event.
    fn translate(&mut self, event: &InputEvent, ctx: &dyn AdapterContext) -> AdapterEffects;

    /// Drop all internal state without emitting anything.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Pointer
// ---------------------------------------------------------------------------

/// Mouse/pen adapter over a platform-native drag stream.
///
/// Stateless: the platform decides when a drag starts and delivers
/// per-target enter/over/leave/drop, so every event maps to at most one
/// signal.
#[derive(Debug, Default)]
pub struct PointerAdapter;

impl PointerAdapter {
    /// New pointer adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Modality for PointerAdapter {
    fn translate(&mut self, event: &InputEvent, ctx: &dyn AdapterContext) -> AdapterEffects {
        let mut effects = AdapterEffects::none();
        match event {
            InputEvent::PointerEnter { item } => effects.push(*item, GestureSignal::HoverIn),
            InputEvent::PointerLeave { item } => effects.push(*item, GestureSignal::HoverOut),
            InputEvent::PointerDown { item, part } => {
                effects.push(*item, GestureSignal::Press { part: part.clone() });
            }
            InputEvent::PointerUp { item } => effects.push(*item, GestureSignal::Release),
            InputEvent::DragStarted { item, page, offset } => {
                if ctx.active_drag().is_none() {
                    effects.push(
                        *item,
                        GestureSignal::BeginDrag {
                            page: *page,
                            offset: *offset,
                        },
                    );
                }
            }
            InputEvent::DragMoved { item, page, offset } => {
                effects.push(
                    *item,
                    GestureSignal::Move {
                        page: *page,
                        offset: *offset,
                    },
                );
            }
            InputEvent::DragEnded { item } => effects.push(*item, GestureSignal::EndDrag),
            InputEvent::DragEntered { item } => {
                if let Some(dragged) = ctx.active_drag() {
                    effects.push(*item, GestureSignal::DropEnter { dragged });
                }
            }
            InputEvent::DraggedOver { item, page, offset } => {
                if let Some(dragged) = ctx.active_drag() {
                    effects.push(
                        *item,
                        GestureSignal::DropOver {
                            dragged,
                            page: *page,
                            offset: *offset,
                        },
                    );
                }
            }
            InputEvent::DragLeft { item } => {
                if let Some(dragged) = ctx.active_drag() {
                    effects.push(*item, GestureSignal::DropLeave { dragged });
                }
            }
            InputEvent::Dropped { item } => {
                if let Some(dragged) = ctx.active_drag() {
                    effects.push(*item, GestureSignal::DropCommit { dragged });
                }
            }
            _ => {}
        }
        effects
    }

    fn reset(&mut self) {}
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// In-flight touch sequence.
#[derive(Debug)]
struct TouchSequence {
    item: ItemKey,
    dragging: bool,
    tracker: TargetTracker,
}

/// Touch adapter.
///
/// A touch start presses the item; the first move starts the drag and
/// every move hit-tests the point to drive target changes. Lifting the
/// finger drops on the tracked target; a platform touch cancel cancels
/// the gesture.
#[derive(Debug, Default)]
pub struct TouchAdapter {
    active: Option<TouchSequence>,
}

impl TouchAdapter {
    /// New touch adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn on_move(
        &mut self,
        item: ItemKey,
        page: Point,
        offset: Point,
        ctx: &dyn AdapterContext,
    ) -> AdapterEffects {
        let mut effects = AdapterEffects::none();
        let Some(seq) = self.active.as_mut().filter(|s| s.item == item) else {
            return effects;
        };

        if !seq.dragging {
            if ctx.active_drag().is_some() {
                // Another session won the race; unwind the press.
                effects.push(item, GestureSignal::Release);
                effects.push(item, GestureSignal::HoverOut);
                self.active = None;
                return effects;
            }
            seq.dragging = true;
            effects.push(item, GestureSignal::BeginDrag { page, offset });
        } else {
            effects.push(item, GestureSignal::Move { page, offset });
        }

        let candidate = ctx.hit_test(page);
        let change = seq.tracker.retarget(candidate);
        if let Some(old) = change.left {
            effects.push(old, GestureSignal::DropLeave { dragged: item });
        }
        if let Some(new) = change.entered {
            effects.push(new, GestureSignal::DropEnter { dragged: item });
        }
        if let Some(current) = seq.tracker.current() {
            effects.push(
                current,
                GestureSignal::DropOver {
                    dragged: item,
                    page,
                    offset,
                },
            );
        }
        effects
    }

    fn on_end(&mut self, item: ItemKey, cancelled: bool) -> AdapterEffects {
        let mut effects = AdapterEffects::none();
        let Some(seq) = self.active.take_if(|s| s.item == item) else {
            return effects;
        };

        if !seq.dragging {
            // Tap: press and release without ever dragging.
            effects.push(item, GestureSignal::Release);
            effects.push(item, GestureSignal::HoverOut);
            return effects;
        }

        if cancelled {
            effects.push(item, GestureSignal::CancelDrag);
        } else {
            if let Some(target) = seq.tracker.current() {
                effects.push(target, GestureSignal::DropCommit { dragged: item });
            }
            effects.push(item, GestureSignal::EndDrag);
        }
        // The finger lifted, so nothing is hovered any more.
        effects.push(item, GestureSignal::HoverOut);
        effects
    }
}

impl Modality for TouchAdapter {
    fn translate(&mut self, event: &InputEvent, ctx: &dyn AdapterContext) -> AdapterEffects {
        match event {
            InputEvent::TouchStart { item, part, .. } => {
                if ctx.active_drag().is_some() || self.active.is_some() {
                    return AdapterEffects::none();
                }
                self.active = Some(TouchSequence {
                    item: *item,
                    dragging: false,
                    tracker: TargetTracker::new(),
                });
                let mut effects = AdapterEffects::none();
                effects.push(*item, GestureSignal::HoverIn);
                effects.push(*item, GestureSignal::Press { part: part.clone() });
                effects
            }
            InputEvent::TouchMove { item, page, offset } => {
                self.on_move(*item, *page, *offset, ctx)
            }
            InputEvent::TouchEnd { item } => self.on_end(*item, false),
            InputEvent::TouchCancel { item } => self.on_end(*item, true),
            _ => AdapterEffects::none(),
        }
    }

    fn reset(&mut self) {
        self.active = None;
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Abstract keyboard action a key event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Grab the focused item, or commit the drag if one is in flight.
    Activate,
    /// Cancel the drag, or release an un-dragged grab.
    Cancel,
    /// Step the grab/drag/focus in a direction.
    Step(Direction),
}

/// Key-to-action table.
#[derive(Debug, Clone)]
pub struct KeyboardBindings {
    activate: Vec<KeyCode>,
    cancel: Vec<KeyCode>,
    steps: Vec<(KeyCode, Direction)>,
}

impl Default for KeyboardBindings {
    fn default() -> Self {
        Self {
            activate: vec![KeyCode::Char(' '), KeyCode::Enter],
            cancel: vec![KeyCode::Escape],
            steps: vec![
                (KeyCode::Up, Direction::Up),
                (KeyCode::Down, Direction::Down),
                (KeyCode::Left, Direction::Left),
                (KeyCode::Right, Direction::Right),
                (KeyCode::Char('k'), Direction::Up),
                (KeyCode::Char('j'), Direction::Down),
                (KeyCode::Char('h'), Direction::Left),
                (KeyCode::Char('l'), Direction::Right),
            ],
        }
    }
}

impl KeyboardBindings {
    /// Default bindings: Space/Enter activate, Escape cancels, arrows and
    /// `hjkl` step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table; every binding must be added explicitly.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            activate: Vec::new(),
            cancel: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Add an activate key.
    #[must_use]
    pub fn with_activate(mut self, code: KeyCode) -> Self {
        self.activate.push(code);
        self
    }

    /// Add a cancel key.
    #[must_use]
    pub fn with_cancel(mut self, code: KeyCode) -> Self {
        self.cancel.push(code);
        self
    }

    /// Add a directional step key.
    #[must_use]
    pub fn with_step(mut self, code: KeyCode, direction: Direction) -> Self {
        self.steps.push((code, direction));
        self
    }

    /// The action `key` maps to, if any.
    ///
    /// Key releases never map; repeats map only to steps, so a held
    /// activate key cannot oscillate the grab latch. Events with a
    /// non-shift modifier held are left to the host.
    #[must_use]
    pub fn action(&self, key: &KeyEvent) -> Option<KeyAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
        {
            return None;
        }
        if let Some((_, direction)) = self.steps.iter().find(|(code, _)| *code == key.code) {
            return Some(KeyAction::Step(*direction));
        }
        if key.kind == KeyEventKind::Repeat {
            return None;
        }
        if self.activate.contains(&key.code) {
            return Some(KeyAction::Activate);
        }
        if self.cancel.contains(&key.code) {
            return Some(KeyAction::Cancel);
        }
        None
    }
}

/// Keyboard drag in flight, owned by the adapter that synthesized it.
#[derive(Debug)]
struct KeySequence {
    item: ItemKey,
    tracker: TargetTracker,
}

/// Keyboard adapter.
///
/// Activate on a focused item latches the grab; the first step after a
/// grab starts the drag at the item's center and each step resolves the
/// nearest scope-compatible target in that direction, moving the
/// synthesized drag to the target's center. Activate while dragging
/// commits on the current target (or ends the drag uncommitted when there
/// is none); cancel and focus loss cancel the drag.
///
/// Steps without a grab produce a focus movement hint instead of touching
/// any machine.
#[derive(Debug, Default)]
pub struct KeyboardAdapter {
    bindings: KeyboardBindings,
    active: Option<KeySequence>,
}

impl KeyboardAdapter {
    /// New adapter with default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// New adapter with explicit bindings.
    #[must_use]
    pub fn with_bindings(bindings: KeyboardBindings) -> Self {
        Self {
            bindings,
            active: None,
        }
    }

    /// The current binding table.
    #[must_use]
    pub fn bindings(&self) -> &KeyboardBindings {
        &self.bindings
    }

    fn center_of(ctx: &dyn AdapterContext, item: ItemKey) -> Point {
        ctx.item_rect(item).map_or(Point::ZERO, |rect| rect.center())
    }

    fn on_activate(&mut self, item: ItemKey, ctx: &dyn AdapterContext) -> AdapterEffects {
        let mut effects = AdapterEffects::none();
        if let Some(seq) = self.active.take_if(|s| s.item == item) {
            if let Some(target) = seq.tracker.current() {
                effects.push(target, GestureSignal::DropCommit { dragged: item });
            }
            effects.push(item, GestureSignal::EndDrag);
            return effects;
        }
        if ctx.active_drag().is_some() {
            return effects;
        }
        effects.push(item, GestureSignal::GrabToggle);
        effects
    }

    fn on_cancel(&mut self, item: ItemKey, ctx: &dyn AdapterContext) -> AdapterEffects {
        let mut effects = AdapterEffects::none();
        if let Some(dragged) = ctx.active_drag() {
            // Cancels any session, not just a keyboard-owned one.
            self.active.take_if(|s| s.item == dragged);
            effects.push(dragged, GestureSignal::CancelDrag);
            return effects;
        }
        if ctx.phase(item) == GesturePhase::Grabbed {
            effects.push(item, GestureSignal::GrabToggle);
        }
        effects
    }

    fn on_step(
        &mut self,
        item: ItemKey,
        direction: Direction,
        ctx: &dyn AdapterContext,
    ) -> AdapterEffects {
        let mut effects = AdapterEffects::none();

        if self.active.as_ref().is_none_or(|s| s.item != item) {
            if ctx.active_drag().is_some() {
                return effects;
            }
            if ctx.phase(item) != GesturePhase::Grabbed {
                // Plain focus navigation.
                effects.focus_request = ctx.resolve_neighbor(item, direction);
                return effects;
            }
            // First step after a grab starts the drag at the item center.
            effects.push(
                item,
                GestureSignal::BeginDrag {
                    page: Self::center_of(ctx, item),
                    offset: Point::ZERO,
                },
            );
            self.active = Some(KeySequence {
                item,
                tracker: TargetTracker::new(),
            });
        }

        let Some(seq) = self.active.as_mut().filter(|s| s.item == item) else {
            return effects;
        };
        let from = seq.tracker.current().unwrap_or(item);
        let Some(next) = ctx.resolve_drop_target(from, direction) else {
            return effects;
        };
        let page = Self::center_of(ctx, next);

        effects.push(
            item,
            GestureSignal::Move {
                page,
                offset: Point::ZERO,
            },
        );
        let change = seq.tracker.retarget(Some(next));
        if let Some(old) = change.left {
            effects.push(old, GestureSignal::DropLeave { dragged: item });
        }
        if let Some(new) = change.entered {
            effects.push(new, GestureSignal::DropEnter { dragged: item });
        }
        effects.push(
            next,
            GestureSignal::DropOver {
                dragged: item,
                page,
                offset: Point::ZERO,
            },
        );
        effects
    }
}

impl Modality for KeyboardAdapter {
    fn translate(&mut self, event: &InputEvent, ctx: &dyn AdapterContext) -> AdapterEffects {
        match event {
            InputEvent::FocusIn { item } => {
                let mut effects = AdapterEffects::none();
                effects.push(*item, GestureSignal::FocusGained);
                effects
            }
            InputEvent::FocusOut { item } => {
                let mut effects = AdapterEffects::none();
                if self.active.take_if(|s| s.item == *item).is_some() {
                    effects.push(*item, GestureSignal::CancelDrag);
                }
                effects.push(*item, GestureSignal::FocusLost);
                effects
            }
            InputEvent::Key { item, key } => match self.bindings.action(key) {
                Some(KeyAction::Activate) => self.on_activate(*item, ctx),
                Some(KeyAction::Cancel) => self.on_cancel(*item, ctx),
                Some(KeyAction::Step(direction)) => self.on_step(*item, direction, ctx),
                None => AdapterEffects::none(),
            },
            _ => AdapterEffects::none(),
        }
    }

    fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Canned context: items laid out in a row of 10x10 cells.
    struct RowContext {
        rects: Vec<(ItemKey, Rect)>,
        phases: HashMap<ItemKey, GesturePhase>,
        active: Option<ItemKey>,
    }

    impl RowContext {
        fn new(keys: &[u64]) -> Self {
            let rects = keys
                .iter()
                .enumerate()
                .map(|(i, k)| (ItemKey(*k), Rect::new(i as f32 * 10.0, 0.0, 10.0, 10.0)))
                .collect();
            Self {
                rects,
                phases: HashMap::new(),
                active: None,
            }
        }

        fn with_phase(mut self, key: u64, phase: GesturePhase) -> Self {
            self.phases.insert(ItemKey(key), phase);
            self
        }

        fn with_active(mut self, key: u64) -> Self {
            self.active = Some(ItemKey(key));
            self
        }
    }

    impl AdapterContext for RowContext {
        fn hit_test(&self, page: Point) -> Option<ItemKey> {
            self.rects
                .iter()
                .find(|(_, rect)| rect.contains(page))
                .map(|(key, _)| *key)
        }

        fn item_rect(&self, item: ItemKey) -> Option<Rect> {
            self.rects
                .iter()
                .find(|(key, _)| *key == item)
                .map(|(_, rect)| *rect)
        }

        fn resolve_drop_target(&self, from: ItemKey, direction: Direction) -> Option<ItemKey> {
            self.resolve_neighbor(from, direction)
        }

        fn resolve_neighbor(&self, from: ItemKey, direction: Direction) -> Option<ItemKey> {
            let idx = self.rects.iter().position(|(key, _)| *key == from)?;
            let next = match direction {
                Direction::Right => idx + 1,
                Direction::Left => idx.checked_sub(1)?,
                _ => return None,
            };
            self.rects.get(next).map(|(key, _)| *key)
        }

        fn phase(&self, item: ItemKey) -> GesturePhase {
            self.phases.get(&item).copied().unwrap_or(GesturePhase::Idle)
        }

        fn active_drag(&self) -> Option<ItemKey> {
            self.active
        }
    }

    fn signals(effects: &AdapterEffects) -> Vec<(ItemKey, &GestureSignal)> {
        effects
            .signals
            .iter()
            .map(|routed| (routed.item, &routed.signal))
            .collect()
    }

    // --- pointer tests ---

    #[test]
    fn pointer_maps_press_and_hover() {
        let ctx = RowContext::new(&[1]);
        let mut adapter = PointerAdapter::new();

        let effects = adapter.translate(&InputEvent::PointerEnter { item: ItemKey(1) }, &ctx);
        assert_eq!(
            effects.signals,
            vec![RoutedSignal {
                item: ItemKey(1),
                signal: GestureSignal::HoverIn
            }]
        );

        let effects = adapter.translate(
            &InputEvent::PointerDown {
                item: ItemKey(1),
                part: Some("grip".into()),
            },
            &ctx,
        );
        assert_eq!(
            effects.signals,
            vec![RoutedSignal {
                item: ItemKey(1),
                signal: GestureSignal::Press {
                    part: Some("grip".into())
                }
            }]
        );
    }

    #[test]
    fn pointer_target_side_requires_session() {
        let mut adapter = PointerAdapter::new();
        let idle = RowContext::new(&[1, 2]);
        let effects = adapter.translate(&InputEvent::DragEntered { item: ItemKey(2) }, &idle);
        assert!(effects.signals.is_empty());

        let dragging = RowContext::new(&[1, 2]).with_active(1);
        let effects = adapter.translate(&InputEvent::DragEntered { item: ItemKey(2) }, &dragging);
        assert_eq!(
            effects.signals,
            vec![RoutedSignal {
                item: ItemKey(2),
                signal: GestureSignal::DropEnter {
                    dragged: ItemKey(1)
                }
            }]
        );
    }

    #[test]
    fn pointer_ignores_native_start_during_foreign_session() {
        let ctx = RowContext::new(&[1, 2]).with_active(2);
        let mut adapter = PointerAdapter::new();
        let effects = adapter.translate(
            &InputEvent::DragStarted {
                item: ItemKey(1),
                page: Point::ZERO,
                offset: Point::ZERO,
            },
            &ctx,
        );
        assert!(effects.signals.is_empty());
    }

    // --- touch tests ---

    #[test]
    fn touch_tap_presses_and_releases() {
        let ctx = RowContext::new(&[1]);
        let mut adapter = TouchAdapter::new();

        let effects = adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );
        assert_eq!(
            signals(&effects),
            vec![
                (ItemKey(1), &GestureSignal::HoverIn),
                (ItemKey(1), &GestureSignal::Press { part: None }),
            ]
        );

        let effects = adapter.translate(&InputEvent::TouchEnd { item: ItemKey(1) }, &ctx);
        assert_eq!(
            signals(&effects),
            vec![
                (ItemKey(1), &GestureSignal::Release),
                (ItemKey(1), &GestureSignal::HoverOut),
            ]
        );
    }

    #[test]
    fn touch_first_move_begins_and_targets() {
        let ctx = RowContext::new(&[1, 2, 3]);
        let mut adapter = TouchAdapter::new();
        adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );

        // Move into item 2's cell.
        let page = Point::new(15.0, 5.0);
        let effects = adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(1),
                page,
                offset: Point::ZERO,
            },
            &ctx,
        );
        let got = signals(&effects);
        assert_eq!(got.len(), 3);
        assert!(matches!(got[0], (ItemKey(1), GestureSignal::BeginDrag { .. })));
        assert_eq!(
            got[1],
            (
                ItemKey(2),
                &GestureSignal::DropEnter {
                    dragged: ItemKey(1)
                }
            )
        );
        assert!(matches!(got[2], (ItemKey(2), GestureSignal::DropOver { .. })));
    }

    #[test]
    fn touch_retarget_emits_leave_enter_over() {
        let ctx = RowContext::new(&[1, 2, 3]);
        let mut adapter = TouchAdapter::new();
        adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );
        adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(1),
                page: Point::new(15.0, 5.0),
                offset: Point::ZERO,
            },
            &ctx,
        );

        // Same target again: movement plus over only.
        let effects = adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(1),
                page: Point::new(17.0, 5.0),
                offset: Point::ZERO,
            },
            &ctx,
        );
        let got = signals(&effects);
        assert_eq!(got.len(), 2);
        assert!(matches!(got[0], (ItemKey(1), GestureSignal::Move { .. })));
        assert!(matches!(got[1], (ItemKey(2), GestureSignal::DropOver { .. })));

        // New target: leave 2, enter 3, over 3.
        let effects = adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(1),
                page: Point::new(25.0, 5.0),
                offset: Point::ZERO,
            },
            &ctx,
        );
        let got = signals(&effects);
        assert_eq!(got.len(), 4);
        assert!(matches!(got[0], (ItemKey(1), GestureSignal::Move { .. })));
        assert_eq!(
            got[1],
            (
                ItemKey(2),
                &GestureSignal::DropLeave {
                    dragged: ItemKey(1)
                }
            )
        );
        assert_eq!(
            got[2],
            (
                ItemKey(3),
                &GestureSignal::DropEnter {
                    dragged: ItemKey(1)
                }
            )
        );
        assert!(matches!(got[3], (ItemKey(3), GestureSignal::DropOver { .. })));
    }

    #[test]
    fn touch_end_commits_on_tracked_target() {
        let ctx = RowContext::new(&[1, 2]);
        let mut adapter = TouchAdapter::new();
        adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );
        adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(1),
                page: Point::new(15.0, 5.0),
                offset: Point::ZERO,
            },
            &ctx,
        );

        let effects = adapter.translate(&InputEvent::TouchEnd { item: ItemKey(1) }, &ctx);
        assert_eq!(
            signals(&effects),
            vec![
                (
                    ItemKey(2),
                    &GestureSignal::DropCommit {
                        dragged: ItemKey(1)
                    }
                ),
                (ItemKey(1), &GestureSignal::EndDrag),
                (ItemKey(1), &GestureSignal::HoverOut),
            ]
        );
    }

    #[test]
    fn touch_end_off_target_ends_without_commit() {
        let ctx = RowContext::new(&[1, 2]);
        let mut adapter = TouchAdapter::new();
        adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );
        // Off every cell.
        adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(1),
                page: Point::new(100.0, 100.0),
                offset: Point::ZERO,
            },
            &ctx,
        );

        let effects = adapter.translate(&InputEvent::TouchEnd { item: ItemKey(1) }, &ctx);
        assert_eq!(
            signals(&effects),
            vec![
                (ItemKey(1), &GestureSignal::EndDrag),
                (ItemKey(1), &GestureSignal::HoverOut),
            ]
        );
    }

    #[test]
    fn touch_cancel_cancels_drag() {
        let ctx = RowContext::new(&[1, 2]);
        let mut adapter = TouchAdapter::new();
        adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );
        adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(1),
                page: Point::new(15.0, 5.0),
                offset: Point::ZERO,
            },
            &ctx,
        );

        let effects = adapter.translate(&InputEvent::TouchCancel { item: ItemKey(1) }, &ctx);
        assert_eq!(
            signals(&effects),
            vec![
                (ItemKey(1), &GestureSignal::CancelDrag),
                (ItemKey(1), &GestureSignal::HoverOut),
            ]
        );
    }

    #[test]
    fn touch_ignores_foreign_item_moves() {
        let ctx = RowContext::new(&[1, 2]);
        let mut adapter = TouchAdapter::new();
        adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );
        let effects = adapter.translate(
            &InputEvent::TouchMove {
                item: ItemKey(2),
                page: Point::new(15.0, 5.0),
                offset: Point::ZERO,
            },
            &ctx,
        );
        assert!(effects.signals.is_empty());
    }

    #[test]
    fn touch_start_ignored_during_foreign_session() {
        let ctx = RowContext::new(&[1, 2]).with_active(2);
        let mut adapter = TouchAdapter::new();
        let effects = adapter.translate(
            &InputEvent::TouchStart {
                item: ItemKey(1),
                part: None,
                page: Point::new(5.0, 5.0),
            },
            &ctx,
        );
        assert!(effects.signals.is_empty());
    }

    // --- keyboard binding tests ---

    #[test]
    fn default_bindings_cover_space_enter_escape_arrows() {
        let bindings = KeyboardBindings::new();
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Char(' '))),
            Some(KeyAction::Activate)
        );
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Enter)),
            Some(KeyAction::Activate)
        );
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Escape)),
            Some(KeyAction::Cancel)
        );
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Down)),
            Some(KeyAction::Step(Direction::Down))
        );
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Char('l'))),
            Some(KeyAction::Step(Direction::Right))
        );
        assert_eq!(bindings.action(&KeyEvent::new(KeyCode::Tab)), None);
    }

    #[test]
    fn bindings_ignore_releases_and_chords() {
        let bindings = KeyboardBindings::new();
        let released = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert_eq!(bindings.action(&released), None);

        let chorded = KeyEvent::new(KeyCode::Down).with_modifiers(Modifiers::CTRL);
        assert_eq!(bindings.action(&chorded), None);

        // Held steps keep stepping; held activate does not oscillate.
        let repeat_step = KeyEvent::new(KeyCode::Down).with_kind(KeyEventKind::Repeat);
        assert_eq!(bindings.action(&repeat_step), Some(KeyAction::Step(Direction::Down)));
        let repeat_activate = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Repeat);
        assert_eq!(bindings.action(&repeat_activate), None);
    }

    #[test]
    fn custom_bindings_extend_the_table() {
        let bindings = KeyboardBindings::empty()
            .with_activate(KeyCode::Char('g'))
            .with_step(KeyCode::Tab, Direction::Right);
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Char('g'))),
            Some(KeyAction::Activate)
        );
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Tab)),
            Some(KeyAction::Step(Direction::Right))
        );
        assert_eq!(bindings.action(&KeyEvent::new(KeyCode::Enter)), None);
    }

    // --- keyboard adapter tests ---

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn keyboard_focus_and_activate_grab() {
        let ctx = RowContext::new(&[1, 2]);
        let mut adapter = KeyboardAdapter::new();

        let effects = adapter.translate(&InputEvent::FocusIn { item: ItemKey(1) }, &ctx);
        assert_eq!(
            signals(&effects),
            vec![(ItemKey(1), &GestureSignal::FocusGained)]
        );

        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Char(' ')),
            },
            &ctx,
        );
        assert_eq!(
            signals(&effects),
            vec![(ItemKey(1), &GestureSignal::GrabToggle)]
        );
    }

    #[test]
    fn keyboard_step_without_grab_is_focus_hint() {
        let ctx = RowContext::new(&[1, 2]);
        let mut adapter = KeyboardAdapter::new();
        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Right),
            },
            &ctx,
        );
        assert!(effects.signals.is_empty());
        assert_eq!(effects.focus_request, Some(ItemKey(2)));
    }

    #[test]
    fn keyboard_first_step_begins_drag_and_targets() {
        let ctx = RowContext::new(&[1, 2, 3]).with_phase(1, GesturePhase::Grabbed);
        let mut adapter = KeyboardAdapter::new();

        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Right),
            },
            &ctx,
        );
        let got = signals(&effects);
        assert_eq!(got.len(), 4);
        assert_eq!(
            got[0],
            (
                ItemKey(1),
                &GestureSignal::BeginDrag {
                    page: Point::new(5.0, 5.0),
                    offset: Point::ZERO,
                }
            )
        );
        // Drag steps to item 2's center.
        assert_eq!(
            got[1],
            (
                ItemKey(1),
                &GestureSignal::Move {
                    page: Point::new(15.0, 5.0),
                    offset: Point::ZERO,
                }
            )
        );
        assert_eq!(
            got[2],
            (
                ItemKey(2),
                &GestureSignal::DropEnter {
                    dragged: ItemKey(1)
                }
            )
        );
        assert!(matches!(got[3], (ItemKey(2), GestureSignal::DropOver { .. })));
    }

    #[test]
    fn keyboard_second_step_retargets() {
        let ctx = RowContext::new(&[1, 2, 3]).with_phase(1, GesturePhase::Grabbed);
        let mut adapter = KeyboardAdapter::new();
        adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Right),
            },
            &ctx,
        );

        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Right),
            },
            &ctx,
        );
        let got = signals(&effects);
        assert_eq!(got.len(), 4);
        assert!(matches!(got[0], (ItemKey(1), GestureSignal::Move { .. })));
        assert_eq!(
            got[1],
            (
                ItemKey(2),
                &GestureSignal::DropLeave {
                    dragged: ItemKey(1)
                }
            )
        );
        assert_eq!(
            got[2],
            (
                ItemKey(3),
                &GestureSignal::DropEnter {
                    dragged: ItemKey(1)
                }
            )
        );
        assert!(matches!(got[3], (ItemKey(3), GestureSignal::DropOver { .. })));
    }

    #[test]
    fn keyboard_step_into_dead_end_is_quiet() {
        let ctx = RowContext::new(&[1, 2]).with_phase(1, GesturePhase::Grabbed);
        let mut adapter = KeyboardAdapter::new();
        // Left of the first item there is nothing; the drag still begins.
        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Left),
            },
            &ctx,
        );
        assert_eq!(
            signals(&effects),
            vec![(
                ItemKey(1),
                &GestureSignal::BeginDrag {
                    page: Point::new(5.0, 5.0),
                    offset: Point::ZERO,
                }
            )]
        );
    }

    #[test]
    fn keyboard_activate_commits_on_tracked_target() {
        let ctx = RowContext::new(&[1, 2]).with_phase(1, GesturePhase::Grabbed);
        let mut adapter = KeyboardAdapter::new();
        adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Right),
            },
            &ctx,
        );

        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Enter),
            },
            &ctx,
        );
        assert_eq!(
            signals(&effects),
            vec![
                (
                    ItemKey(2),
                    &GestureSignal::DropCommit {
                        dragged: ItemKey(1)
                    }
                ),
                (ItemKey(1), &GestureSignal::EndDrag),
            ]
        );
    }

    #[test]
    fn keyboard_escape_cancels_any_session() {
        let ctx = RowContext::new(&[1, 2]).with_active(2);
        let mut adapter = KeyboardAdapter::new();
        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Escape),
            },
            &ctx,
        );
        assert_eq!(
            signals(&effects),
            vec![(ItemKey(2), &GestureSignal::CancelDrag)]
        );
    }

    #[test]
    fn keyboard_escape_releases_undragged_grab() {
        let ctx = RowContext::new(&[1]).with_phase(1, GesturePhase::Grabbed);
        let mut adapter = KeyboardAdapter::new();
        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Escape),
            },
            &ctx,
        );
        assert_eq!(
            signals(&effects),
            vec![(ItemKey(1), &GestureSignal::GrabToggle)]
        );
    }

    #[test]
    fn keyboard_focus_out_cancels_its_own_drag() {
        let ctx = RowContext::new(&[1, 2]).with_phase(1, GesturePhase::Grabbed);
        let mut adapter = KeyboardAdapter::new();
        adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Right),
            },
            &ctx,
        );

        let effects = adapter.translate(&InputEvent::FocusOut { item: ItemKey(1) }, &ctx);
        assert_eq!(
            signals(&effects),
            vec![
                (ItemKey(1), &GestureSignal::CancelDrag),
                (ItemKey(1), &GestureSignal::FocusLost),
            ]
        );
    }

    #[test]
    fn keyboard_activate_ignored_during_foreign_session() {
        let ctx = RowContext::new(&[1, 2]).with_active(2);
        let mut adapter = KeyboardAdapter::new();
        let effects = adapter.translate(
            &InputEvent::Key {
                item: ItemKey(1),
                key: key(KeyCode::Enter),
            },
            &ctx,
        );
        assert!(effects.signals.is_empty());
    }
}
