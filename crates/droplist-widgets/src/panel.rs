#![forbid(unsafe_code)]

//! Draggable list panel.
//!
//! The whole panel moves as one block under the pointer. Records are drawn
//! as a title line and a subtitle line, optionally under group headers.
//!
//! # Pointer handling
//!
//! Feed every pointer event to [`DraggableList::handle_pointer`] together
//! with the frame the panel was last rendered into. The panel:
//!
//! - starts a gesture only for a touch-down that lands on the panel;
//! - follows the pointer once the gesture crosses the drag threshold;
//! - reports a **tap** on the pressed row when a gesture releases without
//!   having dragged, wherever the release lands;
//! - reports a **drop** with the release position for every completed
//!   gesture, drag or tap.
//!
//! # Hit data convention
//!
//! Each visible record registers `HitRegion::Content` with
//! `data = (local_index << 32) | item_index`, where `item_index` is the
//! position in the caller's slice and `local_index` is the position within
//! the flat list or within the record's group. The rest of the panel
//! registers `HitRegion::Handle` with `data = 0`.

use droplist_core::event::{PointerEvent, PointerPhase};
use droplist_core::geometry::{Offset, Point, Rect};
use droplist_core::gesture::{
    DragController, DragState, GestureConfig, GestureEffect, GestureTransition,
};
use droplist_render::drawing::Draw;
use droplist_render::frame::{Frame, HitData, HitId, HitRegion};

use crate::StatefulWidget;
use crate::grouping::{GroupBy, ListView, NormalizedItem};
use crate::item::ListRecord;
use crate::style::{PanelStyle, ResolvedStyle};

/// Hit ID used when the caller does not pick one.
pub const DEFAULT_HIT_ID: HitId = HitId::new(0x4450);

/// Lines drawn per record (title, subtitle).
const ROWS_PER_ITEM: usize = 2;

// ---------------------------------------------------------------------------
// Tap targets
// ---------------------------------------------------------------------------

/// A record addressed by a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TapTarget {
    /// Position in the caller's slice.
    pub item_index: usize,
    /// Position within the flat list or within the record's group.
    pub index: usize,
}

impl TapTarget {
    fn encode(self) -> HitData {
        let item = u32::try_from(self.item_index).unwrap_or(u32::MAX);
        let local = u32::try_from(self.index).unwrap_or(u32::MAX);
        (u64::from(local) << 32) | u64::from(item)
    }

    fn decode(data: HitData) -> Self {
        Self {
            item_index: (data & 0xFFFF_FFFF) as usize,
            index: (data >> 32) as usize,
        }
    }
}

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

/// Receivers for panel notifications.
pub trait ListCallbacks<T> {
    /// A record was tapped. `item` is the caller's original record.
    fn on_tap(&mut self, _item: &T, _index: usize) {}

    /// A gesture completed at the given absolute position.
    fn on_drop(&mut self, _position: Point) {}
}

impl<T> ListCallbacks<T> for () {}

type TapFn<'c, T> = Box<dyn FnMut(&T, usize) + 'c>;
type DropFn<'c> = Box<dyn FnMut(Point) + 'c>;

/// Closure-backed [`ListCallbacks`]; both callbacks are optional.
pub struct Callbacks<'c, T> {
    on_tap: Option<TapFn<'c, T>>,
    on_drop: Option<DropFn<'c>>,
}

impl<T> Default for Callbacks<'_, T> {
    fn default() -> Self {
        Self {
            on_tap: None,
            on_drop: None,
        }
    }
}

impl<'c, T> Callbacks<'c, T> {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tap callback.
    #[must_use]
    pub fn on_tap(mut self, f: impl FnMut(&T, usize) + 'c) -> Self {
        self.on_tap = Some(Box::new(f));
        self
    }

    /// Set the drop callback.
    #[must_use]
    pub fn on_drop(mut self, f: impl FnMut(Point) + 'c) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }
}

impl<T> ListCallbacks<T> for Callbacks<'_, T> {
    fn on_tap(&mut self, item: &T, index: usize) {
        if let Some(f) = self.on_tap.as_mut() {
            f(item, index);
        }
    }

    fn on_drop(&mut self, position: Point) {
        if let Some(f) = self.on_drop.as_mut() {
            f(position);
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What one pointer event produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelOutcome {
    /// The gesture step, or `None` if the event was not for this panel.
    pub transition: Option<GestureTransition>,
    pub tap: Option<TapTarget>,
    pub drop: Option<Point>,
}

/// Per-instance interaction state: the drag controller and the row pressed
/// at touch-down.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraggableListState {
    controller: DragController,
    pressed: Option<TapTarget>,
}

impl DraggableListState {
    /// Idle state with the given gesture config.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            controller: DragController::new(config),
            pressed: None,
        }
    }

    /// Renderer-facing drag snapshot.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.controller.drag_state()
    }

    /// The live translation.
    #[must_use]
    pub fn translation(&self) -> Offset {
        self.controller.translation()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// The underlying gesture controller.
    #[must_use]
    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Move the panel back to where it was first rendered, abandoning any
    /// active gesture.
    pub fn reset_position(&mut self) {
        self.controller.reset();
        self.pressed = None;
    }

    /// Abandon the active gesture as if the host cancelled it.
    pub fn cancel(&mut self) -> Option<GestureTransition> {
        self.pressed = None;
        self.controller.force_cancel()
    }

    /// Apply one pointer event.
    ///
    /// `hit` is the hit-test result for the event position in the last
    /// rendered frame; `expected_id` is the hit ID the panel rendered with.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
        expected_id: HitId,
    ) -> PanelOutcome {
        let ours = hit.filter(|(id, _, _)| *id == expected_id);
        let row = ours.and_then(|(_, region, data)| {
            (region == HitRegion::Content).then(|| TapTarget::decode(data))
        });

        if event.phase == PointerPhase::Down
            && ours.is_none()
            && !self.controller.state().is_active()
        {
            return PanelOutcome::default();
        }

        let transition = self.controller.apply(event);
        let mut outcome = PanelOutcome {
            transition: Some(transition),
            ..PanelOutcome::default()
        };

        match transition.effect {
            GestureEffect::Armed { .. } => self.pressed = row,
            GestureEffect::Released {
                position, was_drag, ..
            } => {
                let pressed = self.pressed.take();
                // A release out of Dragging never taps.
                if !was_drag {
                    outcome.tap = pressed;
                }
                outcome.drop = Some(position);
            }
            GestureEffect::Canceled { .. } => self.pressed = None,
            GestureEffect::DragStarted { .. }
            | GestureEffect::DragMoved { .. }
            | GestureEffect::Noop { .. } => {}
        }
        outcome
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A bordered, draggable panel listing caller records.
///
/// ```
/// use droplist_core::event::PointerEvent;
/// use droplist_core::geometry::Rect;
/// use droplist_render::frame::Frame;
/// use droplist_widgets::{Callbacks, DraggableList, DraggableListState, Item, StatefulWidget};
///
/// let items = vec![Item::new("Apples").with_subtitle("3 kg")];
/// let list = DraggableList::new(&items).title("Groceries");
/// let mut state = DraggableListState::default();
/// let mut frame = Frame::with_hit_grid(30, 8);
/// list.render(Rect::from_size(30, 8), &mut frame, &mut state);
///
/// let mut tapped = Vec::new();
/// let mut callbacks = Callbacks::new().on_tap(|item: &Item, index| {
///     tapped.push((item.title.clone(), index));
/// });
/// list.handle_pointer(&mut state, &PointerEvent::down(3.0, 1.0), &frame, &mut callbacks);
/// list.handle_pointer(&mut state, &PointerEvent::up(3.0, 1.0), &frame, &mut callbacks);
/// drop(callbacks);
/// assert_eq!(tapped, vec![(Some("Apples".to_string()), 0)]);
/// ```
#[derive(Debug)]
pub struct DraggableList<'a, T> {
    items: &'a [T],
    title: Option<&'a str>,
    group_by: Option<&'a GroupBy<T>>,
    style: PanelStyle,
    hit_id: HitId,
}

impl<T> Clone for DraggableList<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            title: self.title,
            group_by: self.group_by,
            style: self.style,
            hit_id: self.hit_id,
        }
    }
}

impl<'a, T: ListRecord> DraggableList<'a, T> {
    /// Create a panel over `items`.
    #[must_use]
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            title: None,
            group_by: None,
            style: PanelStyle::default(),
            hit_id: DEFAULT_HIT_ID,
        }
    }

    /// Header text drawn in the top border.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Group records under headers.
    #[must_use]
    pub fn group_by(mut self, rule: &'a GroupBy<T>) -> Self {
        self.group_by = Some(rule);
        self
    }

    /// Style override merged on top of the default panel look.
    #[must_use]
    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Hit ID for pointer routing.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }

    /// The hit ID this panel registers.
    #[must_use]
    pub fn id(&self) -> HitId {
        self.hit_id
    }

    /// The derived view for this pass.
    #[must_use]
    pub fn view(&self) -> ListView<'a, T> {
        ListView::build(self.items, self.group_by)
    }

    /// Panel size in cells when rendered into an area `area_width` wide.
    #[must_use]
    pub fn size(&self, area_width: u16) -> (u16, u16) {
        let style = self.resolved_style();
        let width = style.width.unwrap_or(area_width);
        (width, self.height(&self.view(), &style))
    }

    /// Route one pointer event: hit-test it against `frame`, update `state`,
    /// and deliver notifications to `callbacks` (tap before drop).
    pub fn handle_pointer(
        &self,
        state: &mut DraggableListState,
        event: &PointerEvent,
        frame: &Frame,
        callbacks: &mut impl ListCallbacks<T>,
    ) -> PanelOutcome {
        let hit = frame.hit_test_point(event.position.x, event.position.y);
        let outcome = state.handle_pointer(event, hit, self.hit_id);
        self.dispatch(&outcome, callbacks);
        outcome
    }

    /// Deliver an outcome's notifications.
    pub fn dispatch(&self, outcome: &PanelOutcome, callbacks: &mut impl ListCallbacks<T>) {
        if let Some(target) = outcome.tap
            && let Some(item) = self.items.get(target.item_index)
        {
            tracing::debug!(
                message = "list.tap",
                item_index = target.item_index,
                index = target.index
            );
            callbacks.on_tap(item, target.index);
        }
        if let Some(position) = outcome.drop {
            tracing::debug!(message = "list.drop", x = position.x, y = position.y);
            callbacks.on_drop(position);
        }
    }

    fn resolved_style(&self) -> ResolvedStyle {
        PanelStyle::default_panel().merge(&self.style).resolve()
    }

    fn border_width(&self, style: &ResolvedStyle) -> u16 {
        u16::from(style.show_border)
    }

    fn title_rows(&self, style: &ResolvedStyle) -> usize {
        usize::from(!style.show_border && self.title.is_some())
    }

    fn height(&self, view: &ListView<'_, T>, style: &ResolvedStyle) -> u16 {
        let content = match view {
            ListView::Flat(items) => items.len() * ROWS_PER_ITEM,
            ListView::Grouped(groups) => groups
                .iter()
                .map(|g| 1 + g.items.len() * ROWS_PER_ITEM)
                .sum(),
        };
        let total = content
            + self.title_rows(style)
            + 2 * usize::from(self.border_width(style));
        u16::try_from(total).unwrap_or(u16::MAX)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_item(
        &self,
        frame: &mut Frame,
        entry: &NormalizedItem<'_, T>,
        local_index: usize,
        x: i32,
        y: i32,
        width: u16,
        clip: Rect,
        style: &ResolvedStyle,
    ) {
        let title = entry.item.title().unwrap_or("");
        let subtitle = entry.item.subtitle().unwrap_or("");
        frame.buffer.draw_str(x, y, title, style.title, clip);
        frame.buffer.draw_str(x, y + 1, subtitle, style.subtitle, clip);
        if let Some(rect) = Rect::clip_signed(x, y, width, ROWS_PER_ITEM as u16, clip) {
            let target = TapTarget {
                item_index: entry.index,
                index: local_index,
            };
            frame.register_hit(rect, self.hit_id, HitRegion::Content, target.encode());
        }
    }
}

impl<T: ListRecord> StatefulWidget for DraggableList<'_, T> {
    type State = DraggableListState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        let area = area.intersection(&frame.bounds());
        if area.is_empty() {
            return;
        }

        let style = self.resolved_style();
        let view = self.view();
        let drag = state.drag_state();
        let _span = tracing::trace_span!(
            "draggable_list.render",
            items = view.len(),
            grouped = view.is_grouped(),
            dragging = drag.is_dragging
        )
        .entered();

        let width = style.width.unwrap_or(area.width);
        let height = self.height(&view, &style);
        let border = self.border_width(&style);

        // Past these bounds the panel is fully off-screen either way, and
        // row arithmetic below stays far from i32 limits.
        let (dx, dy) = drag.translation.to_cells();
        let x = i32::from(area.x)
            .saturating_add(dx)
            .clamp(i32::from(area.x) - i32::from(width), i32::from(area.right()));
        let y = i32::from(area.y)
            .saturating_add(dy)
            .clamp(i32::from(area.y) - i32::from(height), i32::from(area.bottom()));

        let Some(visible) = Rect::clip_signed(x, y, width, height, area) else {
            return;
        };
        frame.buffer.fill(visible, style.surface);
        frame.register_hit(visible, self.hit_id, HitRegion::Handle, 0);

        if style.show_border {
            let chrome = if drag.is_dragging {
                style.dragging
            } else {
                style.header
            };
            frame.buffer.draw_border(
                x,
                y,
                width,
                height,
                style.border.chars(),
                chrome,
                area,
            );
        }

        let inner_x = x + i32::from(border);
        let inner_width = width.saturating_sub(2 * border);
        let mut row = y + i32::from(border);

        if let Some(title) = self.title {
            if style.show_border {
                // Title sits in the top border, one cell in from the corner.
                if let Some(clip) = Rect::clip_signed(inner_x, y, inner_width, 1, visible) {
                    frame
                        .buffer
                        .draw_str(inner_x + 1, y, &format!(" {title} "), style.header, clip);
                }
            } else {
                frame.buffer.draw_str(inner_x, row, title, style.header, visible);
                row += 1;
            }
        }

        let content_height = height.saturating_sub(2 * border);
        let Some(content) =
            Rect::clip_signed(inner_x, y + i32::from(border), inner_width, content_height, visible)
        else {
            return;
        };

        match &view {
            ListView::Flat(items) => {
                for (local, entry) in items.iter().enumerate() {
                    self.draw_item(frame, entry, local, inner_x, row, inner_width, content, &style);
                    row += ROWS_PER_ITEM as i32;
                }
            }
            ListView::Grouped(groups) => {
                for group in groups {
                    frame
                        .buffer
                        .draw_str(inner_x, row, &group.key, style.group_header, content);
                    row += 1;
                    for (local, entry) in group.items.iter().enumerate() {
                        self.draw_item(
                            frame,
                            entry,
                            local,
                            inner_x,
                            row,
                            inner_width,
                            content,
                            &style,
                        );
                        row += ROWS_PER_ITEM as i32;
                    }
                }
            }
        }
    }
}
