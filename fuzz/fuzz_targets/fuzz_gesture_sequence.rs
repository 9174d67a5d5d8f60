#![no_main]

use arbitrary::Arbitrary;
use droplist_core::event::{PointerEvent, PointerPhase};
use droplist_core::geometry::Point;
use droplist_core::gesture::{DragController, GestureConfig, GestureEffect};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Sample {
    pointer: u8,
    phase: u8,
    x: f32,
    y: f32,
}

#[derive(Debug, Arbitrary)]
struct Input {
    threshold: u8,
    samples: Vec<Sample>,
}

fuzz_target!(|input: Input| {
    let config = GestureConfig::new(f32::from(input.threshold % 32)).expect("valid threshold");
    let mut ctl = DragController::new(config);
    let mut downs = 0usize;
    let mut releases = 0usize;

    for sample in input.samples.iter().take(512) {
        let phase = match sample.phase % 4 {
            0 => PointerPhase::Down,
            1 => PointerPhase::Move,
            2 => PointerPhase::Up,
            _ => PointerPhase::Cancel,
        };
        let event = PointerEvent::new(
            u32::from(sample.pointer % 3),
            phase,
            Point::new(sample.x, sample.y),
        );
        let transition = ctl.apply(&event);
        match transition.effect {
            GestureEffect::Armed { .. } => downs += 1,
            GestureEffect::Released { position, .. } => {
                releases += 1;
                assert_eq!(position, event.position, "drop must carry release coords");
            }
            _ => {}
        }
        let t = ctl.translation();
        assert!(t.x.is_finite() && t.y.is_finite(), "translation went non-finite");
        // At most one release per armed gesture.
        assert!(releases <= downs, "release without a press");
    }
});
