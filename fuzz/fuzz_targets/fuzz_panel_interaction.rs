#![no_main]

use arbitrary::Arbitrary;
use droplist_core::event::{PointerEvent, PointerPhase};
use droplist_core::geometry::{Point, Rect};
use droplist_render::frame::Frame;
use droplist_widgets::{DraggableList, DraggableListState, GroupBy, Item, StatefulWidget};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Record {
    title: Option<String>,
    subtitle: Option<String>,
    id: Option<u8>,
    category: Option<String>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    width: u8,
    height: u8,
    grouped: bool,
    records: Vec<Record>,
    events: Vec<(u8, f32, f32)>,
}

fuzz_target!(|input: Input| {
    let width = u16::from(input.width % 96) + 1;
    let height = u16::from(input.height % 48) + 1;
    let items: Vec<Item> = input
        .records
        .into_iter()
        .take(64)
        .map(|r| {
            let mut item = Item::default();
            item.title = r.title;
            item.subtitle = r.subtitle;
            if let Some(id) = r.id {
                item = item.with_id(id);
            }
            if let Some(category) = r.category {
                item = item.with_field("category", category);
            }
            item
        })
        .collect();

    let rule = GroupBy::field("category");
    let mut list = DraggableList::new(&items);
    if input.grouped {
        list = list.group_by(&rule);
    }
    let area = Rect::from_size(width, height);
    let mut frame = Frame::with_hit_grid(width, height);
    let mut state = DraggableListState::default();
    list.render(area, &mut frame, &mut state);

    for (phase, x, y) in input.events.into_iter().take(256) {
        let phase = match phase % 4 {
            0 => PointerPhase::Down,
            1 => PointerPhase::Move,
            2 => PointerPhase::Up,
            _ => PointerPhase::Cancel,
        };
        let event = PointerEvent::new(0, phase, Point::new(x, y));
        let outcome = list.handle_pointer(&mut state, &event, &frame, &mut ());
        if let Some(tap) = outcome.tap {
            assert!(tap.item_index < items.len(), "tap outside the record list");
            assert!(outcome.drop.is_some(), "tap without a drop");
        }
        let t = state.translation();
        assert!(t.x.is_finite() && t.y.is_finite(), "translation went non-finite");
        frame.clear();
        list.render(area, &mut frame, &mut state);
    }
});
