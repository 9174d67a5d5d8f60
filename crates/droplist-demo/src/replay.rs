//! Scripted pointer replay against a draggable list panel.
//!
//! A [`Scenario`] bundles the records, the panel options and a pointer
//! script. [`run`] feeds the script through the widget one event at a time,
//! re-rendering after every event so each hit test sees the panel where the
//! previous event left it.

use std::fmt;
use std::fs;
use std::path::Path;

use droplist_core::event::PointerEvent;
use droplist_core::geometry::{Offset, Point, Rect};
use droplist_core::gesture::{GestureConfig, GestureTransition};
use droplist_render::frame::Frame;
use droplist_widgets::{
    Callbacks, DraggableList, DraggableListState, GroupBy, Item, PanelStyle, StatefulWidget,
};
use serde::de::DeserializeOwned;

use crate::error::{DemoError, Result};

const SAMPLE_ITEMS: &str = include_str!("../data/items.json");
const SAMPLE_SCRIPT: &str = include_str!("../data/script.json");

/// Built-in sample records.
pub fn sample_items() -> Result<Vec<Item>> {
    Ok(serde_json::from_str(SAMPLE_ITEMS)?)
}

/// Built-in script: a tap on the first record, then a drag.
pub fn sample_script() -> Result<Vec<PointerEvent>> {
    Ok(serde_json::from_str(SAMPLE_SCRIPT)?)
}

/// Read a JSON array of records.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    load_json(path)
}

/// Read a JSON array of pointer events.
pub fn load_script(path: &Path) -> Result<Vec<PointerEvent>> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| DemoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Everything one replay needs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub items: Vec<Item>,
    pub script: Vec<PointerEvent>,
    pub group_by: Option<String>,
    pub title: Option<String>,
    pub config: GestureConfig,
    /// Frame size in cells.
    pub width: u16,
    pub height: u16,
    pub panel_width: Option<u16>,
}

/// A callback the panel fired.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Tap { index: usize, title: String },
    Drop { position: Point },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tap { index, title } => write!(f, "tap {index} {title}"),
            Self::Drop { position } => write!(f, "drop {} {}", position.x, position.y),
        }
    }
}

/// What a replay produced.
#[derive(Debug, Clone, Default)]
pub struct Replay {
    pub notifications: Vec<Notification>,
    /// Gesture transitions, noops excluded.
    pub transitions: Vec<GestureTransition>,
    /// Frame text after each event. The last entry is the final frame.
    pub frames: Vec<String>,
    pub translation: Offset,
}

impl Replay {
    /// The frame after the last event.
    #[must_use]
    pub fn final_frame(&self) -> &str {
        self.frames.last().map_or("", String::as_str)
    }
}

/// Replay `scenario.script` against a freshly rendered panel.
pub fn run(scenario: &Scenario) -> Result<Replay> {
    if scenario.width == 0 || scenario.height == 0 {
        return Err(DemoError::invalid("frame width and height must be > 0"));
    }

    let rule = scenario
        .group_by
        .as_deref()
        .map(|field| GroupBy::<Item>::field(field));
    let mut style = PanelStyle::default();
    if let Some(width) = scenario.panel_width {
        style = style.width(width);
    }
    let mut list = DraggableList::new(&scenario.items).style(style);
    if let Some(title) = scenario.title.as_deref() {
        list = list.title(title);
    }
    if let Some(rule) = rule.as_ref() {
        list = list.group_by(rule);
    }

    tracing::info!(
        message = "replay.start",
        items = scenario.items.len(),
        events = scenario.script.len(),
        grouped = rule.is_some()
    );

    let area = Rect::from_size(scenario.width, scenario.height);
    let mut frame = Frame::with_hit_grid(scenario.width, scenario.height);
    let mut state = DraggableListState::new(scenario.config);
    list.render(area, &mut frame, &mut state);

    let mut replay = Replay::default();
    for event in &scenario.script {
        let mut taps = Vec::new();
        let mut drops = Vec::new();
        let mut callbacks = Callbacks::new()
            .on_tap(|item: &Item, index| {
                taps.push(Notification::Tap {
                    index,
                    title: item.title.clone().unwrap_or_default(),
                });
            })
            .on_drop(|position| drops.push(Notification::Drop { position }));
        let outcome = list.handle_pointer(&mut state, event, &frame, &mut callbacks);
        drop(callbacks);

        if let Some(transition) = outcome.transition
            && !transition.effect.is_noop()
        {
            replay.transitions.push(transition);
        }
        // Tap fires before drop within one release.
        replay.notifications.extend(taps);
        replay.notifications.extend(drops);

        frame.clear();
        list.render(area, &mut frame, &mut state);
        replay.frames.push(frame.buffer.to_text());
    }
    if replay.frames.is_empty() {
        replay.frames.push(frame.buffer.to_text());
    }
    replay.translation = state.translation();

    tracing::info!(
        message = "replay.finish",
        notifications = replay.notifications.len(),
        transitions = replay.transitions.len(),
        dx = replay.translation.x,
        dy = replay.translation.y
    );
    Ok(replay)
}
