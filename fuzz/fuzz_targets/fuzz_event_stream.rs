#![no_main]

use grabbit_core::event::{InputEvent, KeyCode, KeyEvent};
use grabbit_core::geometry::{Point, Rect};
use grabbit_core::item::{ItemConfig, ItemKey, SetId};
use grabbit_sets::{
    Animator, DragDropHooks, DragManager, GeometryProvider, GhostHost, ItemSet, ReorderStrategy,
    SetConfig,
};
use libfuzzer_sys::fuzz_target;

/// Host that lays every item on one row, 20 units apart.
struct GridHost;

impl GeometryProvider for GridHost {
    fn rect_of(&self, item: ItemKey) -> Option<Rect> {
        Some(Rect::new(item.0 as f32 * 20.0, 0.0, 10.0, 10.0))
    }
}

impl GhostHost for GridHost {}
impl Animator for GridHost {}
impl DragDropHooks for GridHost {}

/// Two wildcard-scoped sets: `[1, 2, 3]` reorders by insertion and
/// `[4, 5, 6]` by swap. Ids 7 and 8 stay unregistered.
fn soup_manager() -> DragManager {
    let mut mgr = DragManager::new();
    let mut one = ItemSet::with_config(SetId(1), SetConfig::new());
    let mut two = ItemSet::with_config(
        SetId(2),
        SetConfig::new().with_strategy(ReorderStrategy::Swap),
    );
    for id in 1..=3u64 {
        one.push(ItemKey(id));
    }
    for id in 4..=6u64 {
        two.push(ItemKey(id));
    }
    mgr.add_set(one).expect("set 1 registers");
    mgr.add_set(two).expect("set 2 registers");
    for id in 1..=6u64 {
        let set = if id <= 3 { SetId(1) } else { SetId(2) };
        mgr.register_item(ItemKey(id), set, ItemConfig::new())
            .expect("item registers");
    }
    mgr
}

fuzz_target!(|data: &[u8]| {
    let mut mgr = soup_manager();
    let mut host = GridHost;

    // Two bytes per step: an opcode and an item id (1..=8; 7 and 8 are
    // never registered).
    for chunk in data.chunks_exact(2).take(512) {
        let id = u64::from(chunk[1] % 8) + 1;
        let item = ItemKey(id);
        let at = Point::new(id as f32 * 20.0 + 5.0, 5.0);
        let event = match chunk[0] % 21 {
            0 => InputEvent::PointerDown { item, part: None },
            1 => InputEvent::PointerUp { item },
            2 => InputEvent::DragStarted {
                item,
                page: at,
                offset: Point::ZERO,
            },
            3 => InputEvent::DragMoved {
                item,
                page: at,
                offset: Point::ZERO,
            },
            4 => InputEvent::DragEnded { item },
            5 => InputEvent::DragEntered { item },
            6 => InputEvent::DraggedOver {
                item,
                page: at,
                offset: Point::ZERO,
            },
            7 => InputEvent::DragLeft { item },
            8 => InputEvent::Dropped { item },
            9 => InputEvent::TouchStart {
                item,
                part: None,
                page: at,
            },
            10 => InputEvent::TouchMove {
                item,
                page: at,
                offset: Point::ZERO,
            },
            11 => InputEvent::TouchEnd { item },
            12 => InputEvent::TouchCancel { item },
            13 => InputEvent::FocusIn { item },
            14 => InputEvent::FocusOut { item },
            15 => InputEvent::Key {
                item,
                key: KeyEvent::new(KeyCode::Char(' ')),
            },
            16 => InputEvent::Key {
                item,
                key: KeyEvent::new(KeyCode::Enter),
            },
            17 => InputEvent::Key {
                item,
                key: KeyEvent::new(KeyCode::Escape),
            },
            18 => InputEvent::Key {
                item,
                key: KeyEvent::new(KeyCode::Right),
            },
            19 => InputEvent::Key {
                item,
                key: KeyEvent::new(KeyCode::Left),
            },
            _ => {
                mgr.flush_deferred(&mut host);
                continue;
            }
        };
        mgr.dispatch(&event, &mut host)
            .expect("dispatch must absorb arbitrary event soups");
    }

    mgr.flush_deferred(&mut host);

    // Post-conditions that must always hold:
    assert!(!mgr.has_deferred_work(), "flush left deferred work behind");

    let one = mgr.order_of(SetId(1)).expect("set 1 exists").to_vec();
    let two = mgr.order_of(SetId(2)).expect("set 2 exists").to_vec();
    let mut all: Vec<u64> = one.iter().chain(&two).map(|k| k.0).collect();
    all.sort_unstable();
    assert_eq!(all, vec![1, 2, 3, 4, 5, 6], "items were lost or duplicated");

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
