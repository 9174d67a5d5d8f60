#![forbid(unsafe_code)]

//! End-to-end pointer interaction with the draggable list panel.
//!
//! Each test renders a panel, replays pointer events through
//! `DraggableList::handle_pointer`, and checks the notifications delivered
//! to the callbacks along with the panel's new position.

use droplist_core::event::PointerEvent;
use droplist_core::geometry::{Offset, Point, Rect};
use droplist_core::gesture::GestureConfig;
use droplist_render::drawing::BorderType;
use droplist_render::frame::{Frame, HitId};
use droplist_widgets::{
    Callbacks, DraggableList, DraggableListState, GroupBy, Item, ListRecord, PanelStyle,
    StatefulWidget,
};

#[derive(Debug, Default)]
struct Log {
    taps: Vec<(String, usize)>,
    drops: Vec<Point>,
}

fn replay<T: ListRecord>(
    list: &DraggableList<'_, T>,
    state: &mut DraggableListState,
    events: &[PointerEvent],
    title_of: impl Fn(&T) -> String,
) -> Log {
    let mut log = Log::default();
    let mut frame = Frame::with_hit_grid(40, 20);
    for event in events {
        frame.clear();
        list.render(Rect::from_size(40, 20), &mut frame, state);
        let mut taps = Vec::new();
        let mut drops = Vec::new();
        let mut callbacks = Callbacks::new()
            .on_tap(|item: &T, index| taps.push((title_of(item), index)))
            .on_drop(|pos| drops.push(pos));
        list.handle_pointer(state, event, &frame, &mut callbacks);
        drop(callbacks);
        log.taps.extend(taps);
        log.drops.extend(drops);
    }
    log
}

fn item_title(item: &Item) -> String {
    item.title.clone().unwrap_or_default()
}

fn sample() -> Vec<Item> {
    vec![
        Item::new("Apples").with_field("category", "Fruit"),
        Item::new("Carrots").with_field("category", "Veg"),
        Item::new("Pears").with_field("category", "Fruit"),
    ]
}

fn style() -> PanelStyle {
    PanelStyle::default().border(BorderType::Ascii).width(16)
}

#[test]
fn grouped_tap_reports_group_local_index() {
    let items = sample();
    let rule = GroupBy::field("category");
    let list = DraggableList::new(&items).group_by(&rule).style(style());
    let mut state = DraggableListState::default();
    // Rows: 0 border, 1 "Fruit", 2-3 Apples, 4-5 Pears, 6 "Veg", 7-8 Carrots.
    let log = replay(
        &list,
        &mut state,
        &[PointerEvent::down(3.0, 4.0), PointerEvent::up(3.0, 4.0)],
        item_title,
    );
    assert_eq!(log.taps, vec![("Pears".to_string(), 1)]);
    assert_eq!(log.drops, vec![Point::new(3.0, 4.0)]);
}

#[test]
fn drag_reports_drop_without_tap_and_moves_panel() {
    let items = sample();
    let list = DraggableList::new(&items).style(style());
    let mut state = DraggableListState::default();
    let log = replay(
        &list,
        &mut state,
        &[
            PointerEvent::down(10.0, 1.0),
            PointerEvent::moved(13.0, 1.0),
            PointerEvent::moved(16.0, 3.0),
            PointerEvent::up(16.0, 3.0),
        ],
        item_title,
    );
    assert!(log.taps.is_empty());
    assert_eq!(log.drops, vec![Point::new(16.0, 3.0)]);
    assert_eq!(state.translation(), Offset::new(6.0, 2.0));

    let mut frame = Frame::with_hit_grid(40, 20);
    list.render(Rect::from_size(40, 20), &mut frame, &mut state);
    assert_eq!(frame.buffer.row_text(2).trim(), "+--------------+");
    assert!(frame.buffer.row_text(3).contains("|Apples"));
}

#[test]
fn small_wobble_still_taps() {
    let items = sample();
    let list = DraggableList::new(&items).style(style());
    let mut state = DraggableListState::default();
    let log = replay(
        &list,
        &mut state,
        &[
            PointerEvent::down(4.0, 3.0),
            PointerEvent::moved(8.0, 4.0),
            PointerEvent::moved(9.0, 4.0),
            PointerEvent::up(9.0, 4.0),
        ],
        item_title,
    );
    assert_eq!(log.taps, vec![("Carrots".to_string(), 1)]);
    assert_eq!(state.translation(), Offset::ZERO);
}

#[test]
fn tap_follows_pressed_record_across_group_header() {
    let items = sample();
    let rule = GroupBy::field("category");
    let list = DraggableList::new(&items).group_by(&rule).style(style());
    let mut state = DraggableListState::default();
    // Pressed on Pears, released over the "Veg" header.
    let log = replay(
        &list,
        &mut state,
        &[
            PointerEvent::down(3.0, 5.0),
            PointerEvent::moved(4.0, 6.0),
            PointerEvent::up(4.0, 6.0),
        ],
        item_title,
    );
    assert_eq!(log.taps, vec![("Pears".to_string(), 1)]);
    assert_eq!(log.drops, vec![Point::new(4.0, 6.0)]);
}

#[test]
fn second_gesture_accumulates_translation() {
    let items = sample();
    let list = DraggableList::new(&items).style(style());
    let mut state = DraggableListState::default();
    replay(
        &list,
        &mut state,
        &[
            PointerEvent::down(2.0, 1.0),
            PointerEvent::moved(10.0, 1.0),
            PointerEvent::up(10.0, 1.0),
        ],
        item_title,
    );
    assert_eq!(state.translation(), Offset::new(8.0, 0.0));
    let log = replay(
        &list,
        &mut state,
        &[
            PointerEvent::down(12.0, 2.0),
            PointerEvent::moved(12.0, 9.0),
            PointerEvent::up(12.0, 9.0),
        ],
        item_title,
    );
    assert_eq!(log.drops.len(), 1);
    assert_eq!(state.translation(), Offset::new(8.0, 7.0));
}

#[test]
fn custom_threshold_changes_drag_sensitivity() {
    let items = sample();
    let list = DraggableList::new(&items).style(style());
    let mut state = DraggableListState::new(GestureConfig::new(1.0).expect("valid"));
    let log = replay(
        &list,
        &mut state,
        &[
            PointerEvent::down(4.0, 1.0),
            PointerEvent::moved(6.0, 1.0),
            PointerEvent::up(6.0, 1.0),
        ],
        item_title,
    );
    assert!(log.taps.is_empty());
    assert_eq!(state.translation(), Offset::new(2.0, 0.0));
}

#[test]
fn panels_with_distinct_ids_ignore_each_other() {
    let left_items = vec![Item::new("Left")];
    let right_items = vec![Item::new("Right")];
    let left = DraggableList::new(&left_items)
        .style(style())
        .hit_id(HitId::new(1));
    let right = DraggableList::new(&right_items)
        .style(style())
        .hit_id(HitId::new(2));
    let mut left_state = DraggableListState::default();
    let mut right_state = DraggableListState::default();

    let mut frame = Frame::with_hit_grid(40, 10);
    left.render(Rect::new(0, 0, 20, 10), &mut frame, &mut left_state);
    right.render(Rect::new(20, 0, 20, 10), &mut frame, &mut right_state);

    let down = PointerEvent::down(22.0, 1.0);
    let a = left.handle_pointer(&mut left_state, &down, &frame, &mut ());
    let b = right.handle_pointer(&mut right_state, &down, &frame, &mut ());
    assert!(a.transition.is_none());
    assert!(b.transition.is_some());
}

struct Contact {
    name: &'static str,
    email: &'static str,
    team: &'static str,
}

impl ListRecord for Contact {
    fn title(&self) -> Option<&str> {
        Some(self.name)
    }

    fn subtitle(&self) -> Option<&str> {
        Some(self.email)
    }

    fn field(&self, name: &str) -> Option<String> {
        (name == "team").then(|| self.team.to_string())
    }
}

#[test]
fn custom_record_type_taps_with_original_value() {
    let contacts = [
        Contact {
            name: "Ada",
            email: "ada@example.com",
            team: "Core",
        },
        Contact {
            name: "Lin",
            email: "lin@example.com",
            team: "Docs",
        },
    ];
    let rule = GroupBy::func(|c: &Contact| c.team.to_uppercase());
    let list = DraggableList::new(&contacts)
        .group_by(&rule)
        .style(style().width(24));
    let mut state = DraggableListState::default();
    // Rows: 0 border, 1 "CORE", 2-3 Ada, 4 "DOCS", 5-6 Lin.
    let log = replay(
        &list,
        &mut state,
        &[PointerEvent::down(2.0, 6.0), PointerEvent::up(2.0, 6.0)],
        |c: &Contact| c.email.to_string(),
    );
    assert_eq!(log.taps, vec![("lin@example.com".to_string(), 0)]);
}
