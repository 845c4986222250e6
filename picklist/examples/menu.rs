//! Interactive menu: arrows or the mouse move focus, Enter/Space/click
//! select, q or Esc quits. Logs go to `menu.log`.

use std::fs::File;
use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEventKind,
    MouseButton as CrosstermButton, MouseEventKind,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use picklist::{Item, Items, ItemsData, ItemsEvent, LabelRenderer};
use simplelog::{Config, LevelFilter, WriteLogger};
use tuidom::{Document, Element, Event, Keybinds, MouseButton, NodeId, Rect};

const LIST: Rect = Rect {
    x: 2,
    y: 2,
    width: 30,
    height: 8,
};

fn main() -> io::Result<()> {
    let log_file = File::create("menu.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let (width, height) = terminal::size()?;
    let mut doc = Document::new(width, height);
    let container = doc
        .append(doc.root(), Element::div().bounds(LIST))
        .expect("root exists");

    let data = ItemsData::new(
        (1..=30)
            .map(|i| {
                Item::labeled(format!("Entry {i}"))
                    .on_select(|item| log::info!("[menu] chose {:?}", item.label()))
            })
            .collect(),
    );
    let items = Items::new(data);
    let mut keybinds = Keybinds::new();
    items
        .render(&mut doc, container, &LabelRenderer)
        .expect("container exists");
    items
        .mount(&mut doc, &mut keybinds)
        .expect("default key map parses");

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
    let result = run(&mut doc, container, &items, &keybinds);
    execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    items.unmount(&mut doc, &mut keybinds);
    result
}

fn run(doc: &mut Document, container: NodeId, items: &Items, keybinds: &Keybinds) -> io::Result<()> {
    let mut status = String::from("arrows/mouse to move, enter/space/click to choose, q to quit");

    loop {
        doc.run_deferred();
        for event in items.take_events() {
            if let ItemsEvent::Selected(item) = event {
                status = format!("selected {}", item.label().unwrap_or(&item.id));
            }
        }
        if let Err(err) = items.render(doc, container, &LabelRenderer) {
            log::warn!("[menu] render failed: {}", err);
        }
        draw(doc, container, items, &status)?;

        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
                keybinds.dispatch_event(&Event::from(key), doc);
            }
            CrosstermEvent::Mouse(mouse) => {
                let target = hit(doc, container, items, mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Moved => {
                        for event in doc.hover(target) {
                            dispatch(doc, items, &event);
                        }
                    }
                    MouseEventKind::Down(CrosstermButton::Left) => {
                        if let Some(target) = target {
                            let click = Event::Click {
                                target,
                                button: MouseButton::Left,
                            };
                            dispatch(doc, items, &click);
                        }
                    }
                    MouseEventKind::ScrollDown => {
                        let _ = doc.scroll_by(container, 0, 1);
                    }
                    MouseEventKind::ScrollUp => {
                        let _ = doc.scroll_by(container, 0, -1);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn dispatch(doc: &mut Document, items: &Items, event: &Event) {
    if let Err(err) = items.handle_event(doc, event) {
        log::warn!("[menu] {:?} failed: {}", event, err);
    }
}

/// Deepest node of the list under a screen cell.
fn hit(doc: &Document, container: NodeId, items: &Items, col: u16, row: u16) -> Option<NodeId> {
    let inside = col >= LIST.x && col < LIST.right() && row >= LIST.y && row < LIST.bottom();
    if !inside {
        return None;
    }
    let scroll = doc.scroll_offset(container)?;
    let y = row - LIST.y + scroll.y;
    let wrapper = items
        .element_refs()
        .into_iter()
        .find(|id| doc.node(*id).is_some_and(|n| y >= n.bounds().y && y < n.bounds().bottom()))?;
    let label = doc.node(wrapper)?.children().first().copied();
    label.or(Some(wrapper))
}

fn draw(doc: &Document, container: NodeId, items: &Items, status: &str) -> io::Result<()> {
    let mut out = io::stdout();
    queue!(out, Clear(ClearType::All))?;

    let scroll = doc.scroll_offset(container).unwrap_or_default();
    for wrapper in items.element_refs() {
        let Some(node) = doc.node(wrapper) else {
            continue;
        };
        let bounds = node.bounds();
        let Some(row) = bounds.y.checked_sub(scroll.y).filter(|r| *r < LIST.height) else {
            continue;
        };
        let focused = node.has_class(&items.config().focused_class);
        let marker = if doc.active_element() == Some(wrapper) { '>' } else { ' ' };
        let text = format!("{} {:<width$}", marker, doc.text_content(wrapper), width = usize::from(LIST.width - 2));

        queue!(out, MoveTo(LIST.x, LIST.y + row))?;
        if focused {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset))?;
    }

    queue!(out, MoveTo(LIST.x, LIST.bottom() + 1), Print(status))?;
    out.flush()
}
