use picklist::{Item, Items, ItemsData, ItemsError, ItemsEvent, LabelRenderer};
use tuidom::{Document, Element, InputType, Keybinds, NodeId, Rect, ScrollOffset};

/// A mounted list of `count` one-row items in a 20x5 container.
fn mounted_list(count: usize) -> (Document, NodeId, Items) {
    let mut doc = Document::new(80, 24);
    let container = doc
        .append(doc.root(), Element::div().bounds(Rect::new(0, 0, 20, 5)))
        .unwrap();
    let data = ItemsData::new((0..count).map(|i| Item::labeled(format!("item {i}"))).collect());
    let items = Items::new(data);
    items.render(&mut doc, container, &LabelRenderer).unwrap();
    items.mount(&mut doc, &mut Keybinds::new()).unwrap();
    (doc, container, items)
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_focus_next_wraps() {
    let (mut doc, _, items) = mounted_list(3);

    assert_eq!(items.focus_index(), None);
    let visited: Vec<_> = (0..4)
        .map(|_| items.focus_next(&mut doc, false).unwrap())
        .collect();
    assert_eq!(visited, vec![Some(0), Some(1), Some(2), Some(0)]);
}

#[test]
fn test_focus_previous_wraps() {
    let (mut doc, _, items) = mounted_list(3);

    let visited: Vec<_> = (0..4)
        .map(|_| items.focus_previous(&mut doc, false).unwrap())
        .collect();
    assert_eq!(visited, vec![Some(2), Some(1), Some(0), Some(2)]);
}

#[test]
fn test_single_item_stays_focused() {
    let (mut doc, _, items) = mounted_list(1);

    assert_eq!(items.focus_next(&mut doc, false), Ok(Some(0)));
    assert_eq!(items.focus_next(&mut doc, false), Ok(Some(0)));
    assert_eq!(items.focus_previous(&mut doc, false), Ok(Some(0)));
}

#[test]
fn test_empty_list_does_nothing() {
    let (mut doc, _, items) = mounted_list(0);

    assert_eq!(items.focus_next(&mut doc, false), Ok(None));
    assert_eq!(items.focus_previous(&mut doc, false), Ok(None));
    assert_eq!(items.focus_index(), None);
    assert!(items.take_events().is_empty());
    assert_eq!(doc.pending_deferred(), 0);
}

#[test]
fn test_focus_to_index_out_of_bounds() {
    let (mut doc, _, items) = mounted_list(3);

    assert_eq!(
        items.focus_to_index(&mut doc, 3, false),
        Err(ItemsError::IndexOutOfBounds { index: 3, len: 3 })
    );
    assert_eq!(items.focus_index(), None, "state untouched");
}

#[test]
fn test_focus_moves_native_focus() {
    let (mut doc, _, items) = mounted_list(3);

    items.focus_to_index(&mut doc, 1, false).unwrap();
    assert_eq!(doc.active_element(), items.element_at(1));

    items.focus_next(&mut doc, false).unwrap();
    assert_eq!(doc.active_element(), items.element_at(2));
}

#[test]
fn test_focus_changes_are_reported_once() {
    let (mut doc, _, items) = mounted_list(3);

    items.focus_next(&mut doc, false).unwrap();
    items.focus_next(&mut doc, false).unwrap();
    items.focus_to_index(&mut doc, 1, false).unwrap();

    assert_eq!(
        items.take_events(),
        vec![
            ItemsEvent::FocusChanged { previous: None, current: Some(0) },
            ItemsEvent::FocusChanged { previous: Some(0), current: Some(1) },
        ]
    );
}

#[test]
fn test_focus_before_render_updates_index_only() {
    let mut doc = Document::new(80, 24);
    let items = Items::new(ItemsData::new(vec![Item::labeled("a"), Item::labeled("b")]));

    assert_eq!(items.focus_next(&mut doc, false), Ok(Some(0)));
    assert_eq!(doc.active_element(), None);
    assert_eq!(doc.pending_deferred(), 0);
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_keyboard_focus_centers_item() {
    let (mut doc, container, items) = mounted_list(20);

    items.focus_to_index(&mut doc, 10, false).unwrap();
    assert_eq!(
        doc.scroll_offset(container),
        Some(ScrollOffset::new(0, 6)),
        "native focus reveals the item"
    );

    assert_eq!(doc.run_deferred(), 1);
    assert_eq!(doc.scroll_offset(container), Some(ScrollOffset::new(0, 8)));
}

#[test]
fn test_pointer_focus_keeps_viewport() {
    let (mut doc, container, items) = mounted_list(20);
    doc.set_scroll_offset(container, 0, 2).unwrap();

    items.focus_to_index(&mut doc, 10, true).unwrap();
    doc.run_deferred();

    assert_eq!(items.focus_index(), Some(10));
    assert_eq!(doc.active_element(), items.element_at(10));
    assert_eq!(doc.scroll_offset(container), Some(ScrollOffset::new(0, 2)));
}

#[test]
fn test_keyboard_focus_at_end_clamps() {
    let (mut doc, container, items) = mounted_list(20);

    items.focus_previous(&mut doc, false).unwrap();
    doc.run_deferred();

    assert_eq!(items.focus_index(), Some(19));
    assert_eq!(doc.scroll_offset(container), Some(ScrollOffset::new(0, 15)));
}

// ============================================================================
// Native Focus Sync
// ============================================================================

#[test]
fn test_native_focus_on_wrapper_syncs_index() {
    let (mut doc, _, items) = mounted_list(5);

    doc.focus(items.element_at(2).unwrap()).unwrap();
    assert_eq!(items.focus_index(), Some(2));
}

#[test]
fn test_native_focus_elsewhere_clears_index() {
    let (mut doc, _, items) = mounted_list(5);
    let button = doc.append(doc.root(), Element::button("ok")).unwrap();

    items.focus_to_index(&mut doc, 3, false).unwrap();
    doc.focus(button).unwrap();

    assert_eq!(items.focus_index(), None);
}

#[test]
fn test_other_list_wrapper_leaves_index_alone() {
    let (mut doc, _, first) = mounted_list(3);
    let other_container = doc
        .append(doc.root(), Element::div().bounds(Rect::new(30, 0, 20, 5)))
        .unwrap();
    let second = Items::new(ItemsData::new(vec![Item::labeled("x"), Item::labeled("y")]));
    second.render(&mut doc, other_container, &LabelRenderer).unwrap();
    second.mount(&mut doc, &mut Keybinds::new()).unwrap();

    first.focus_to_index(&mut doc, 1, false).unwrap();
    doc.focus(second.element_at(0).unwrap()).unwrap();

    assert_eq!(first.focus_index(), Some(1), "still a list item");
    assert_eq!(second.focus_index(), Some(0));
}

#[test]
fn test_typing_keeps_native_focus() {
    let (mut doc, container, items) = mounted_list(20);
    let input = doc.append(doc.root(), Element::input(InputType::Text)).unwrap();
    doc.focus(input).unwrap();

    items.focus_to_index(&mut doc, 10, false).unwrap();
    assert_eq!(items.focus_index(), Some(10));
    assert_eq!(doc.active_element(), Some(input));
    assert_eq!(doc.pending_deferred(), 1, "scroll handling still scheduled");

    doc.run_deferred();
    assert_eq!(doc.active_element(), Some(input));
    assert_eq!(doc.scroll_offset(container), Some(ScrollOffset::new(0, 8)));
}

#[test]
fn test_typing_blocks_wrap_around_native_focus() {
    let (mut doc, _, items) = mounted_list(3);
    let input = doc.append(doc.root(), Element::input(InputType::Search)).unwrap();
    doc.focus(input).unwrap();

    assert_eq!(items.focus_next(&mut doc, false), Ok(Some(0)));
    assert_eq!(doc.active_element(), Some(input));
    assert_eq!(items.focus_index(), Some(0));
}

// ============================================================================
// Stale Wrappers
// ============================================================================

#[test]
fn test_focus_on_removed_wrapper_moves_index_only() {
    let (mut doc, _, items) = mounted_list(3);
    doc.remove(items.element_at(1).unwrap()).unwrap();

    assert_eq!(items.focus_to_index(&mut doc, 1, false), Ok(()));
    assert_eq!(items.focus_index(), Some(1));
    assert_eq!(doc.active_element(), None);

    doc.run_deferred();
    assert_eq!(items.focus_next(&mut doc, false), Ok(Some(2)));
    assert_eq!(doc.active_element(), items.element_at(2));
}

#[test]
fn test_focus_on_unfocusable_wrapper_moves_index_only() {
    let (mut doc, _, items) = mounted_list(3);
    let wrapper = items.element_at(0).unwrap();
    doc.node_mut(wrapper).unwrap().set_tabindex(None);

    assert_eq!(items.focus_next(&mut doc, false), Ok(Some(0)));
    assert_eq!(items.focus_index(), Some(0));
    assert_eq!(doc.active_element(), None);
}
