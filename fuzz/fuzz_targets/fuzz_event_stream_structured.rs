#![no_main]

use arbitrary::Arbitrary;
use grabbit_core::event::{InputEvent, KeyCode, KeyEvent};
use grabbit_core::geometry::{Point, Rect};
use grabbit_core::item::{ItemConfig, ItemKey, SetId};
use grabbit_core::scope::Scope;
use grabbit_sets::{
    Animator, DragDropHooks, DragManager, GeometryProvider, GhostHost, ItemSet, ReorderStrategy,
    SetConfig,
};
use libfuzzer_sys::fuzz_target;

/// One interaction step, decoded structurally instead of from raw bytes.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    Down(u8),
    Up(u8),
    Start(u8),
    Move(u8),
    Enter(u8),
    Over(u8),
    Leave(u8),
    Drop(u8),
    End(u8),
    TouchStart(u8),
    TouchMove(u8),
    TouchEnd(u8),
    TouchCancel(u8),
    FocusIn(u8),
    FocusOut(u8),
    Grab(u8),
    Commit(u8),
    Cancel(u8),
    Step(u8, u8),
    Flush,
}

struct GridHost;

impl GeometryProvider for GridHost {
    fn rect_of(&self, item: ItemKey) -> Option<Rect> {
        Some(Rect::new(item.0 as f32 * 20.0, 0.0, 10.0, 10.0))
    }
}

impl GhostHost for GridHost {}
impl Animator for GridHost {}
impl DragDropHooks for GridHost {}

fn key(raw: u8) -> ItemKey {
    ItemKey(u64::from(raw % 8) + 1)
}

fn at(item: ItemKey) -> Point {
    Point::new(item.0 as f32 * 20.0 + 5.0, 5.0)
}

fn to_event(op: Op) -> Option<InputEvent> {
    let event = match op {
        Op::Down(raw) => InputEvent::PointerDown {
            item: key(raw),
            part: None,
        },
        Op::Up(raw) => InputEvent::PointerUp { item: key(raw) },
        Op::Start(raw) => InputEvent::DragStarted {
            item: key(raw),
            page: at(key(raw)),
            offset: Point::ZERO,
        },
        Op::Move(raw) => InputEvent::DragMoved {
            item: key(raw),
            page: at(key(raw)),
            offset: Point::ZERO,
        },
        Op::Enter(raw) => InputEvent::DragEntered { item: key(raw) },
        Op::Over(raw) => InputEvent::DraggedOver {
            item: key(raw),
            page: at(key(raw)),
            offset: Point::ZERO,
        },
        Op::Leave(raw) => InputEvent::DragLeft { item: key(raw) },
        Op::Drop(raw) => InputEvent::Dropped { item: key(raw) },
        Op::End(raw) => InputEvent::DragEnded { item: key(raw) },
        Op::TouchStart(raw) => InputEvent::TouchStart {
            item: key(raw),
            part: None,
            page: at(key(raw)),
        },
        Op::TouchMove(raw) => InputEvent::TouchMove {
            item: key(raw),
            page: at(key(raw)),
            offset: Point::ZERO,
        },
        Op::TouchEnd(raw) => InputEvent::TouchEnd { item: key(raw) },
        Op::TouchCancel(raw) => InputEvent::TouchCancel { item: key(raw) },
        Op::FocusIn(raw) => InputEvent::FocusIn { item: key(raw) },
        Op::FocusOut(raw) => InputEvent::FocusOut { item: key(raw) },
        Op::Grab(raw) => InputEvent::Key {
            item: key(raw),
            key: KeyEvent::new(KeyCode::Char(' ')),
        },
        Op::Commit(raw) => InputEvent::Key {
            item: key(raw),
            key: KeyEvent::new(KeyCode::Enter),
        },
        Op::Cancel(raw) => InputEvent::Key {
            item: key(raw),
            key: KeyEvent::new(KeyCode::Escape),
        },
        Op::Step(raw, dir) => {
            let code = match dir % 4 {
                0 => KeyCode::Right,
                1 => KeyCode::Left,
                2 => KeyCode::Up,
                _ => KeyCode::Down,
            };
            InputEvent::Key {
                item: key(raw),
                key: KeyEvent::new(code),
            }
        }
        Op::Flush => return None,
    };
    Some(event)
}

/// Scoped pair: `[1, 2, 3]` drags as "cards" and accepts only "cards";
/// `[4, 5, 6]` drags as "tray" but accepts both. Item 6 overrides its
/// drag scope to "cards" so it can enter the first set. Ids 7 and 8
/// stay unregistered.
fn scoped_manager() -> DragManager {
    let mut mgr = DragManager::new();
    let mut cards = ItemSet::with_config(
        SetId(1),
        SetConfig::new()
            .with_drag_scope(Scope::parse(Some("cards")))
            .with_drop_scope(Scope::parse(Some("cards"))),
    );
    let mut tray = ItemSet::with_config(
        SetId(2),
        SetConfig::new()
            .with_strategy(ReorderStrategy::Swap)
            .with_drag_scope(Scope::parse(Some("tray")))
            .with_drop_scope(Scope::parse(Some("cards,tray"))),
    );
    for id in 1..=3u64 {
        cards.push(ItemKey(id));
    }
    for id in 4..=6u64 {
        tray.push(ItemKey(id));
    }
    mgr.add_set(cards).expect("set 1 registers");
    mgr.add_set(tray).expect("set 2 registers");
    for id in 1..=5u64 {
        let set = if id <= 3 { SetId(1) } else { SetId(2) };
        mgr.register_item(ItemKey(id), set, ItemConfig::new())
            .expect("item registers");
    }
    mgr.register_item(
        ItemKey(6),
        SetId(2),
        ItemConfig::new().with_drag_scope(Scope::parse(Some("cards"))),
    )
    .expect("item registers");
    mgr
}

fuzz_target!(|ops: Vec<Op>| {
    let mut mgr = scoped_manager();
    let mut host = GridHost;

    for op in ops.iter().take(512) {
        match to_event(*op) {
            Some(event) => {
                mgr.dispatch(&event, &mut host)
                    .expect("dispatch must absorb arbitrary event soups");
            }
            None => mgr.flush_deferred(&mut host),
        }
    }

    mgr.flush_deferred(&mut host);

    // Post-conditions that must always hold:
    assert!(!mgr.has_deferred_work(), "flush left deferred work behind");

    let one = mgr.order_of(SetId(1)).expect("set 1 exists").to_vec();
    let two = mgr.order_of(SetId(2)).expect("set 2 exists").to_vec();
    let mut all: Vec<u64> = one.iter().chain(&two).map(|k| k.0).collect();
    all.sort_unstable();
    assert_eq!(all, vec![1, 2, 3, 4, 5, 6], "items were lost or duplicated");

    // Tray drags other than the overridden item 6 can never enter the
    // cards set.
    for member in &one {
        assert!(
            member.0 <= 3 || member.0 == 6,
            "scope-ineligible item crossed into the cards set"
        );
    }

    for id in 1..=6u64 {
        let key = ItemKey(id);
        let in_one = one.contains(&key);
        let in_two = two.contains(&key);
        assert!(in_one != in_two, "item must live in exactly one set");
        let expected = if in_one { SetId(1) } else { SetId(2) };
        assert_eq!(mgr.set_of(key), Some(expected), "membership map out of sync");
    }

    if let Some(active) = mgr.active_drag() {
        assert!(mgr.set_of(active).is_some(), "active drag must be registered");
    }
});
