//! Property-based invariant tests for the paginator.
//!
//! 1. The page always starts inside the collection (or is 0 when empty),
//!    whatever mix of navigation and external length changes happened.
//! 2. `next_page` then `prev_page` is the identity when `next_page` moved,
//!    and both are no-ops otherwise.
//! 3. The visible slice has `min(per_page, len - page * per_page)` items and
//!    matches the collection at that offset.
//! 4. Display bounds agree with the visible slice.

use pagedo_core::{Observable, Paginator, TodoItem, TodoList, corrected_page};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    Push(usize),
    Truncate(usize),
    RemoveAt(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Next),
        2 => Just(Op::Prev),
        2 => (1usize..=12).prop_map(Op::Push),
        2 => (0usize..=80).prop_map(Op::Truncate),
        2 => (0usize..=80).prop_map(Op::RemoveAt),
        1 => Just(Op::Clear),
    ]
}

fn apply(items: &Observable<Vec<u32>>, pager: &Paginator<u32>, op: &Op, next_value: &mut u32) {
    match op {
        Op::Next => {
            pager.next_page();
        }
        Op::Prev => {
            pager.prev_page();
        }
        Op::Push(count) => {
            items.update(|v| {
                for _ in 0..*count {
                    *next_value += 1;
                    v.push(*next_value);
                }
            });
        }
        Op::Truncate(len) => {
            items.update(|v| v.truncate(*len));
        }
        Op::RemoveAt(index) => {
            items.update(|v| {
                if *index < v.len() {
                    v.remove(*index);
                }
            });
        }
        Op::Clear => items.set(Vec::new()),
    }
}

fn assert_invariants(items: &Observable<Vec<u32>>, pager: &Paginator<u32>, per_page: usize) {
    let len = items.with(Vec::len);
    let page = pager.page_number();

    if len == 0 {
        assert_eq!(page, 0, "empty collection must sit on page 0");
    } else {
        assert!(page * per_page < len, "page {page} starts past len {len}");
    }

    let expected_len = per_page.min(len.saturating_sub(page * per_page));
    let shown = pager.paginated_items();
    assert_eq!(shown.len(), expected_len);

    let expected: Vec<u32> = items.with(|v| v.iter().skip(page * per_page).take(per_page).copied().collect());
    assert_eq!(shown, expected);

    assert_eq!(pager.prev_page_possible(), page > 0);
    assert_eq!(pager.next_page_possible(), (page + 1) * per_page < len);
    assert_eq!(pager.last_display_item_number(), page * per_page + shown.len());
    if len == 0 {
        assert_eq!(pager.first_display_item_number(), 0);
    } else {
        assert_eq!(pager.first_display_item_number(), page * per_page + 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 3 + 4. Invariants hold after every operation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invariants_hold_across_op_sequences(
        initial in 0u32..=60,
        per_page in 1usize..=9,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let items = Observable::new((1..=initial).collect::<Vec<u32>>());
        let pager = Paginator::with_page_size(&items, per_page);
        let mut next_value = initial;

        assert_invariants(&items, &pager, per_page);
        for op in &ops {
            apply(&items, &pager, op, &mut next_value);
            assert_invariants(&items, &pager, per_page);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. next then prev restores the page
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_then_prev_round_trips(
        len in 0u32..=60,
        per_page in 1usize..=9,
        steps in 0usize..=12,
    ) {
        let items = Observable::new((1..=len).collect::<Vec<u32>>());
        let pager = Paginator::with_page_size(&items, per_page);
        for _ in 0..steps {
            pager.next_page();
        }

        let before = pager.page_number();
        let moved = pager.next_page();
        if moved {
            prop_assert_eq!(pager.page_number(), before + 1);
            prop_assert!(pager.prev_page());
            prop_assert_eq!(pager.page_number(), before);
        } else {
            prop_assert_eq!(pager.page_number(), before);
        }
    }

    #[test]
    fn corrected_page_is_always_in_range(
        len in 0usize..=500,
        per_page in 1usize..=50,
        page in 0usize..=200,
    ) {
        let fixed = corrected_page(len, per_page, page);
        if len == 0 {
            prop_assert_eq!(fixed, 0);
        } else {
            prop_assert!(fixed * per_page < len);
        }
        if page * per_page < len {
            prop_assert_eq!(fixed, page);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Scenario walk-through over a todo list
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn todo_list_scenario() {
    let list = TodoList::new();
    for i in 1..=52 {
        list.add_item(TodoItem::new(format!("task {i}")));
    }
    let pager = Paginator::with_page_size(list.items(), 5);

    assert_eq!(pager.page_number(), 0);
    assert_eq!(pager.paginated_items().len(), 5);
    assert_eq!(pager.first_display_item_number(), 1);
    assert_eq!(pager.last_display_item_number(), 5);
    assert!(pager.next_page_possible());
    assert!(!pager.prev_page_possible());

    for _ in 0..10 {
        pager.next_page();
    }
    assert_eq!(pager.page_number(), 10);
    let labels: Vec<String> = pager
        .paginated_items()
        .iter()
        .map(|item| item.label().to_string())
        .collect();
    assert_eq!(labels, vec!["task 51", "task 52"]);
    assert!(!pager.next_page_possible());

    // Mark five items done and clear them: 47 remain.
    let ids: Vec<_> = list.items().with(|items| items.iter().take(5).map(TodoItem::id).collect());
    for id in ids {
        list.switch_done(id);
    }
    assert_eq!(list.clear_done(), 5);
    assert_eq!(pager.page_number(), 9);
    assert_eq!(pager.last_display_item_number(), 47);

    let ids: Vec<_> = list.items().with(|items| items.iter().map(TodoItem::id).collect());
    for id in ids {
        list.switch_done(id);
    }
    list.clear_done();
    assert_eq!(pager.page_number(), 0);
    assert!(pager.paginated_items().is_empty());
    assert_eq!(pager.first_display_item_number(), 0);
    assert!(!pager.prev_page_possible());
    assert!(!pager.next_page_possible());
}
