use std::sync::{Arc, Mutex};

use picklist::{Item, Items, ItemsData, ItemsEvent, LabelRenderer};
use tuidom::{Document, Element, Event, MouseButton, NodeId, Rect, ScrollOffset};

fn rendered_list(items: Vec<Item>) -> (Document, NodeId, Items) {
    let mut doc = Document::new(80, 24);
    let container = doc
        .append(doc.root(), Element::div().bounds(Rect::new(0, 0, 20, 5)))
        .unwrap();
    let list = Items::new(ItemsData::new(items));
    list.render(&mut doc, container, &LabelRenderer).unwrap();
    (doc, container, list)
}

fn recording(log: &Arc<Mutex<Vec<String>>>, label: &str) -> Item {
    let log = Arc::clone(log);
    Item::labeled(label).on_select(move |item| {
        log.lock().unwrap().push(item.label().unwrap_or_default().to_string());
    })
}

// ============================================================================
// Select
// ============================================================================

#[test]
fn test_select_without_focus_does_nothing() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (_, _, list) = rendered_list(vec![recording(&log, "a")]);

    assert_eq!(list.select(), None);
    assert!(log.lock().unwrap().is_empty());
    assert!(list.take_events().is_empty());
}

#[test]
fn test_select_runs_callback_and_reports() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (mut doc, _, list) = rendered_list(vec![recording(&log, "a"), recording(&log, "b")]);

    list.focus_to_index(&mut doc, 1, false).unwrap();
    list.take_events();

    let chosen = list.select().unwrap();
    assert_eq!(chosen.label(), Some("b"));
    assert_eq!(*log.lock().unwrap(), vec!["b".to_string()]);
    assert_eq!(list.take_events(), vec![ItemsEvent::Selected(chosen)]);
}

#[test]
fn test_select_item_without_callback_still_reports() {
    let (mut doc, _, list) = rendered_list(vec![Item::labeled("plain")]);

    list.focus_next(&mut doc, false).unwrap();
    list.take_events();

    assert!(list.select().is_some());
    assert!(matches!(list.take_events().as_slice(), [ItemsEvent::Selected(_)]));
}

#[test]
fn test_select_index_keeps_focus() {
    let (mut doc, _, list) = rendered_list(vec![Item::labeled("a"), Item::labeled("b")]);

    list.focus_to_index(&mut doc, 0, false).unwrap();
    let chosen = list.select_index(1).unwrap();

    assert_eq!(chosen.label(), Some("b"));
    assert_eq!(list.focus_index(), Some(0));
    assert_eq!(list.select_index(2), None);
}

#[test]
fn test_callback_can_read_the_list() {
    let data = ItemsData::new(Vec::new());
    let seen = Arc::new(Mutex::new(None));
    let item = {
        let data = data.clone();
        let seen = Arc::clone(&seen);
        Item::labeled("a").on_select(move |_| {
            *seen.lock().unwrap() = Some(data.len());
        })
    };
    data.update(|items| items.push(item));
    let list = Items::new(data);

    list.select_index(0).unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(1));
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_click_inside_wrapper_selects() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (mut doc, _, list) = rendered_list(vec![recording(&log, "a"), recording(&log, "b")]);
    let label = doc.node(list.element_at(1).unwrap()).unwrap().children()[0];

    let click = Event::Click {
        target: label,
        button: MouseButton::Left,
    };
    assert_eq!(list.handle_event(&mut doc, &click), Ok(true));
    assert_eq!(*log.lock().unwrap(), vec!["b".to_string()]);
    assert_eq!(list.focus_index(), None, "click does not move focus");

    let events = list.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], ItemsEvent::Selected(item) if item.label() == Some("b")));
}

#[test]
fn test_click_ignored_outside_or_with_other_button() {
    let (mut doc, container, list) = rendered_list(vec![Item::labeled("a")]);
    let wrapper = list.element_at(0).unwrap();

    let right = Event::Click {
        target: wrapper,
        button: MouseButton::Right,
    };
    let outside = Event::Click {
        target: container,
        button: MouseButton::Left,
    };
    assert_eq!(list.handle_event(&mut doc, &right), Ok(false));
    assert_eq!(list.handle_event(&mut doc, &outside), Ok(false));
    assert!(list.take_events().is_empty());
}

#[test]
fn test_hover_focuses_without_scrolling() {
    let labels = (0..20).map(|i| Item::labeled(format!("{i}"))).collect();
    let (mut doc, container, list) = rendered_list(labels);
    let label = doc.node(list.element_at(3).unwrap()).unwrap().children()[0];

    let mut handled = 0;
    for event in doc.hover(Some(label)) {
        if list.handle_event(&mut doc, &event).unwrap() {
            handled += 1;
        }
    }
    doc.run_deferred();

    assert_eq!(handled, 1, "only the wrapper enter counts");
    assert_eq!(list.focus_index(), Some(3));
    assert_eq!(doc.active_element(), list.element_at(3));
    assert_eq!(doc.scroll_offset(container), Some(ScrollOffset::new(0, 0)));
}
