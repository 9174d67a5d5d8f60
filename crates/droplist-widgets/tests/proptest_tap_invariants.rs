//! Property-based tests for taps and rendering under pointer input.
//!
//! 1. A gesture that never crosses the threshold taps exactly the record it
//!    pressed, once, and drops once, wherever the pointer wanders
//! 2. Any finite pointer stream, however far it throws the panel, renders
//!    without panicking and keeps the translation finite

use droplist_core::event::{PointerEvent, PointerPhase};
use droplist_core::geometry::{Point, Rect};
use droplist_render::drawing::BorderType;
use droplist_render::frame::Frame;
use droplist_widgets::{
    Callbacks, DraggableList, DraggableListState, Item, PanelStyle, StatefulWidget,
};
use proptest::prelude::*;

const PANEL_WIDTH: u16 = 20;

fn records(n: usize) -> Vec<Item> {
    (0..n).map(|i| Item::new(format!("r{i}")).with_subtitle("sub")).collect()
}

fn style() -> PanelStyle {
    PanelStyle::default().border(BorderType::Ascii).width(PANEL_WIDTH)
}

/// Offsets up to and including the 5-unit threshold on both axes.
fn wobble() -> impl Strategy<Value = (f32, f32)> {
    ((-10i32..=10), (-10i32..=10)).prop_map(|(x, y)| (x as f32 / 2.0, y as f32 / 2.0))
}

fn finite() -> impl Strategy<Value = f32> {
    prop_oneof![
        2 => (-60i32..60).prop_map(|v| v as f32),
        1 => any::<f32>().prop_filter("finite", |v| v.is_finite()),
        1 => prop_oneof![Just(f32::MAX), Just(f32::MIN), Just(1e10), Just(-1e10)],
    ]
}

fn phase() -> impl Strategy<Value = PointerPhase> {
    prop_oneof![
        Just(PointerPhase::Down),
        Just(PointerPhase::Move),
        Just(PointerPhase::Move),
        Just(PointerPhase::Up),
        Just(PointerPhase::Cancel),
    ]
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Sub-threshold gestures tap the pressed record
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sub_threshold_gesture_taps_pressed_record(
        (n, pressed) in (1usize..10).prop_flat_map(|n| (Just(n), 0..n)),
        line in 0i32..2,
        px in 1i32..(i32::from(PANEL_WIDTH) - 1),
        moves in prop::collection::vec(wobble(), 0..12),
        release in wobble(),
    ) {
        let items = records(n);
        let list = DraggableList::new(&items).style(style());
        let mut state = DraggableListState::default();
        let height = list.size(PANEL_WIDTH).1 + 2;
        let mut frame = Frame::with_hit_grid(PANEL_WIDTH + 10, height);
        list.render(frame.bounds(), &mut frame, &mut state);

        // Row 0 is the top border; each record takes two rows.
        let (ox, oy) = (px as f32 + 0.5, (1 + 2 * pressed as i32 + line) as f32 + 0.5);
        let mut events = vec![PointerEvent::down(ox, oy)];
        events.extend(moves.iter().map(|(dx, dy)| PointerEvent::moved(ox + dx, oy + dy)));
        events.push(PointerEvent::up(ox + release.0, oy + release.1));

        let mut taps = Vec::new();
        let mut drops = Vec::new();
        {
            let mut callbacks = Callbacks::new()
                .on_tap(|item: &Item, index| taps.push((item.title.clone(), index)))
                .on_drop(|pos| drops.push(pos));
            for event in &events {
                list.handle_pointer(&mut state, event, &frame, &mut callbacks);
                prop_assert!(!state.is_dragging());
            }
        }

        prop_assert_eq!(taps, vec![(Some(format!("r{pressed}")), pressed)]);
        prop_assert_eq!(drops, vec![Point::new(ox + release.0, oy + release.1)]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Far-flung drags render safely
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn far_drags_render_without_panicking(
        events in prop::collection::vec((phase(), finite(), finite()), 0..40),
    ) {
        let items = records(3);
        let list = DraggableList::new(&items).style(style());
        let mut state = DraggableListState::default();
        let area = Rect::from_size(32, 12);
        let mut frame = Frame::with_hit_grid(32, 12);
        list.render(area, &mut frame, &mut state);

        // Start on the panel so the stream has something to drag.
        let stream = std::iter::once(PointerEvent::down(2.0, 1.0)).chain(
            events
                .into_iter()
                .map(|(phase, x, y)| PointerEvent::new(0, phase, Point::new(x, y))),
        );
        for event in stream {
            let outcome = list.handle_pointer(&mut state, &event, &frame, &mut ());
            if let Some(tap) = outcome.tap {
                prop_assert!(tap.item_index < items.len());
                prop_assert!(outcome.drop.is_some());
            }
            let t = state.translation();
            prop_assert!(t.x.is_finite() && t.y.is_finite());
            frame.clear();
            list.render(area, &mut frame, &mut state);
        }
    }
}
