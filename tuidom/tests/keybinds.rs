use std::sync::{Arc, Mutex};

use tuidom::{
    BindOptions, BindingOwner, Document, Element, Event, InputType, Key, KeyCombo, KeyParseError,
    Keybinds, Modifiers,
};

fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn(&mut Document) + Send + Sync>) {
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::default();
    let sink = log.clone();
    let make = move |name: &'static str| {
        let sink = sink.clone();
        Box::new(move |_: &mut Document| sink.lock().unwrap().push(name))
            as Box<dyn Fn(&mut Document) + Send + Sync>
    };
    (log, make)
}

const ALWAYS: BindOptions = BindOptions {
    input: true,
    prevent: true,
    stop: false,
};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_named_keys() {
    assert_eq!("up".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Up)));
    assert_eq!("Down".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Down)));
    assert_eq!("enter".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Enter)));
    assert_eq!("space".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Space)));
    assert_eq!("f5".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::F(5))));
    assert_eq!("j".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Char('j'))));
    assert_eq!("+".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Char('+'))));
}

#[test]
fn test_parse_modifiers() {
    assert_eq!("ctrl+n".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Char('n')).ctrl()));
    assert_eq!(
        "ctrl+shift+tab".parse::<KeyCombo>(),
        Ok(KeyCombo::key(Key::Tab).ctrl().shift())
    );
    assert_eq!("alt++".parse::<KeyCombo>(), Ok(KeyCombo::key(Key::Char('+')).alt()));
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<KeyCombo>(), Err(KeyParseError::Empty));
    assert_eq!(
        "hyper+x".parse::<KeyCombo>(),
        Err(KeyParseError::UnknownModifier("hyper".into()))
    );
    assert_eq!(
        "upp".parse::<KeyCombo>(),
        Err(KeyParseError::UnknownKey("upp".into()))
    );
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dispatch_newest_first_until_stop() {
    let mut doc = Document::new(10, 10);
    let mut binds = Keybinds::new();
    let (log, make) = recorder();
    let down = KeyCombo::key(Key::Down);

    binds.bind(down, BindingOwner::new(), ALWAYS, make("old"));
    binds.bind(down, BindingOwner::new(), ALWAYS, make("new"));

    let outcome = binds.dispatch(&down, &mut doc);
    assert_eq!(outcome.handled, 2);
    assert!(outcome.prevent_default);
    assert!(!outcome.stop_propagation);
    assert_eq!(*log.lock().unwrap(), vec!["new", "old"]);

    binds.bind(
        down,
        BindingOwner::new(),
        BindOptions {
            stop: true,
            ..ALWAYS
        },
        make("stopper"),
    );
    log.lock().unwrap().clear();
    let outcome = binds.dispatch(&down, &mut doc);
    assert_eq!(outcome.handled, 1);
    assert!(outcome.stop_propagation);
    assert_eq!(*log.lock().unwrap(), vec!["stopper"]);
}

#[test]
fn test_dispatch_respects_text_input() {
    let mut doc = Document::new(10, 10);
    let input = doc
        .append(doc.root(), Element::input(InputType::Search))
        .unwrap();
    let mut binds = Keybinds::new();
    let (log, make) = recorder();
    let owner = BindingOwner::new();

    binds.bind(KeyCombo::key(Key::Enter), owner, ALWAYS, make("enter"));
    binds.bind(
        KeyCombo::key(Key::Space),
        owner,
        BindOptions {
            input: false,
            ..ALWAYS
        },
        make("space"),
    );

    doc.focus(input).unwrap();
    binds.dispatch(&KeyCombo::key(Key::Enter), &mut doc);
    let outcome = binds.dispatch(&KeyCombo::key(Key::Space), &mut doc);
    assert_eq!(outcome.handled, 0, "space is left to the text field");

    doc.blur();
    binds.dispatch(&KeyCombo::key(Key::Space), &mut doc);
    assert_eq!(*log.lock().unwrap(), vec!["enter", "space"]);
}

#[test]
fn test_unbind_owner() {
    let mut doc = Document::new(10, 10);
    let mut binds = Keybinds::new();
    let (log, make) = recorder();
    let widget = BindingOwner::new();
    let other = BindingOwner::new();

    binds.bind(KeyCombo::key(Key::Up), widget, ALWAYS, make("widget-up"));
    binds.bind(KeyCombo::key(Key::Down), widget, ALWAYS, make("widget-down"));
    binds.bind(KeyCombo::key(Key::Up), other, ALWAYS, make("other-up"));

    assert_eq!(binds.unbind_owner(widget), 2);
    assert_eq!(binds.unbind_owner(widget), 0);
    assert_eq!(binds.len(), 1);
    assert!(!binds.is_bound(&KeyCombo::key(Key::Down)));

    binds.dispatch(&KeyCombo::key(Key::Up), &mut doc);
    assert_eq!(*log.lock().unwrap(), vec!["other-up"]);
}

#[test]
fn test_dispatch_event_ignores_non_keys() {
    let mut doc = Document::new(10, 10);
    let mut binds = Keybinds::new();
    let (log, make) = recorder();
    binds.bind(KeyCombo::key(Key::Up), BindingOwner::new(), ALWAYS, make("up"));

    let key = Event::Key {
        key: Key::Up,
        modifiers: Modifiers::NONE,
    };
    assert_eq!(binds.dispatch_event(&key, &mut doc).handled, 1);

    let hover = Event::MouseEnter { target: doc.root() };
    assert_eq!(binds.dispatch_event(&hover, &mut doc).handled, 0);
    assert_eq!(log.lock().unwrap().len(), 1);
}
