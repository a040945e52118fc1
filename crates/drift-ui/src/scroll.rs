//! # Scroll viewer
//!
//! [`ScrollViewer`] shows one content element through a fixed viewport and
//! moves it with drag and flick gestures. Each axis gets its own
//! [`GestureInertia`], created the first time a gesture needs it; its value
//! is the content's offset on that axis, always in `[-(content - viewport), 0]`
//! once settled.
//!
//! A gesture drives one axis at a time: whichever axis moved more, with ties
//! going to the axis the previous gesture used. The other axis still gets a
//! neutral update so a release settles it too.
//!
//! Drawing goes through a clip buffer sized to the viewport. With
//! `cache_panning` set, frames drawn while a pan is in progress reuse the last
//! buffer shifted by the distance moved since the offset last settled.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use bitflags::bitflags;
use drift_core::*;

use crate::element::{
    Element, ElementBase, ElementRef, WeakElementRef, element_ref, same_element,
};
use crate::inertia::GestureInertia;

/// Height of the edge shadows.
const SHADOW_HEIGHT: f32 = 15.0;
/// Scrollbar never shrinks below this.
const MIN_BAR_LENGTH: f32 = 20.0;
pub const SCROLLBAR_TRACK_IMAGE: &str = "verticalscrollbar.png";
pub const TOP_SHADOW_IMAGE: &str = "top.png";
pub const BOTTOM_SHADOW_IMAGE: &str = "bottom.png";

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ScrollAxes: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL = 1 << 1;
    }
}

impl Default for ScrollAxes {
    fn default() -> Self {
        ScrollAxes::all()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    fn flag(self) -> ScrollAxes {
        match self {
            Axis::Horizontal => ScrollAxes::HORIZONTAL,
            Axis::Vertical => ScrollAxes::VERTICAL,
        }
    }

    fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::Horizontal => v.x = value,
            Axis::Vertical => v.y = value,
        }
    }

    fn extent(self, s: Size) -> f32 {
        match self {
            Axis::Horizontal => s.width,
            Axis::Vertical => s.height,
        }
    }
}

/// Scrollbar placement in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollbarGeometry {
    pub track: Rect,
    pub bar: Rect,
}

/// State shared with the inertia callbacks.
#[derive(Default)]
struct PanState {
    in_progress: Cell<bool>,
    /// Offset as of the last change made outside a pan.
    settled: Cell<Vec2>,
}

/// Writes offsets into the content. Held by the inertia callbacks, so it
/// only keeps weak links to the tree.
#[derive(Clone)]
struct OffsetSink {
    content: WeakElementRef,
    pan: Rc<PanState>,
    updated: UpdateSignal,
}

impl OffsetSink {
    fn apply(&self, axis: Axis, value: f32) {
        let Some(content) = self.content.upgrade() else {
            return;
        };
        let Ok(mut c) = content.try_borrow_mut() else {
            log::warn!("scroll offset dropped: content is busy");
            return;
        };
        let mut location = c.base().location();
        axis.set(&mut location, value);
        c.base_mut().set_location(location);
        drop(c);

        if !self.pan.in_progress.get() {
            let mut settled = self.pan.settled.get();
            axis.set(&mut settled, value);
            self.pan.settled.set(settled);
        }
        self.updated.notify();
    }
}

pub struct ScrollViewer {
    base: ElementBase,
    content: Option<ElementRef>,
    horizontal: Option<GestureInertia>,
    vertical: Option<GestureInertia>,
    axes: ScrollAxes,
    last_axis: Axis,
    pan: Rc<PanState>,
    cache: Option<Bitmap>,
    /// Reuse the last frame while a pan is in progress.
    pub cache_panning: bool,
    /// Read when the horizontal inertia is created.
    pub trim_horizontal_panning: bool,
    /// Read when the vertical inertia is created.
    pub trim_vertical_panning: bool,
    pub show_scrollbars: bool,
    pub scrollbar_color: Color,
    pub scrollbar_width: f32,
    pub draw_shadows: bool,
}

impl ScrollViewer {
    pub fn new(bounds: Rect) -> Rc<RefCell<ScrollViewer>> {
        element_ref(|weak: &Weak<RefCell<ScrollViewer>>| {
            let mut base = ElementBase::new(weak.clone()).with_bounds(bounds);
            base.entrance_animation = Some(ForwardingAnimation::handle({
                let weak = weak.clone();
                move || content_animation(&weak, |e| e.entrance_animation())
            }));
            base.exit_animation = Some(ForwardingAnimation::handle({
                let weak = weak.clone();
                move || content_animation(&weak, |e| e.exit_animation())
            }));
            ScrollViewer {
                base,
                content: None,
                horizontal: None,
                vertical: None,
                axes: ScrollAxes::default(),
                last_axis: Axis::Vertical,
                pan: Rc::new(PanState::default()),
                cache: None,
                cache_panning: false,
                trim_horizontal_panning: false,
                trim_vertical_panning: false,
                show_scrollbars: false,
                scrollbar_color: Color::WHITE,
                scrollbar_width: 5.0,
                draw_shadows: false,
            }
        })
    }

    pub fn content(&self) -> Option<ElementRef> {
        self.content.clone()
    }

    /// Replaces the content. The previous content is unlinked, and both
    /// inertias are dropped so the next gesture measures the new content.
    pub fn set_content(&mut self, content: &ElementRef) -> Result<(), TreeError> {
        if let Some(old) = &self.content
            && same_element(old, content)
        {
            return Ok(());
        }
        self.base.adopt(content)?;
        if let Some(old) = self.content.take() {
            if let Some(i) = self.base.index_of(&old) {
                self.base.children_mut().remove(i);
            }
            ElementBase::release(&old);
        }
        self.base.children_mut().push(content.clone());
        self.content = Some(content.clone());

        self.drop_inertia(Axis::Horizontal);
        self.drop_inertia(Axis::Vertical);
        self.cache = None;
        self.pan.in_progress.set(false);
        self.pan.settled.set(self.offset());
        self.base.request_update();
        Ok(())
    }

    pub fn axes(&self) -> ScrollAxes {
        self.axes
    }

    pub fn set_axes(&mut self, axes: ScrollAxes) {
        self.axes = axes;
    }

    pub fn horizontal_scroll(&self) -> bool {
        self.axes.contains(ScrollAxes::HORIZONTAL)
    }

    pub fn set_horizontal_scroll(&mut self, enabled: bool) {
        self.axes.set(ScrollAxes::HORIZONTAL, enabled);
    }

    pub fn vertical_scroll(&self) -> bool {
        self.axes.contains(ScrollAxes::VERTICAL)
    }

    pub fn set_vertical_scroll(&mut self, enabled: bool) {
        self.axes.set(ScrollAxes::VERTICAL, enabled);
    }

    /// Axis that won the last gesture; breaks ties for the next one.
    pub fn last_gesture_axis(&self) -> Axis {
        self.last_axis
    }

    pub fn is_panning(&self) -> bool {
        self.pan.in_progress.get()
    }

    pub fn horizontal_offset(&self) -> f32 {
        self.offset().x
    }

    pub fn vertical_offset(&self) -> f32 {
        self.offset().y
    }

    pub fn set_horizontal_offset(&mut self, value: f32) {
        self.set_offset(Axis::Horizontal, value);
    }

    pub fn set_vertical_offset(&mut self, value: f32) {
        self.set_offset(Axis::Vertical, value);
    }

    /// Track and thumb for the current vertical offset.
    pub fn scrollbar_geometry(&self) -> ScrollbarGeometry {
        let size = self.base.size();
        let content_height = self.content_size().height;
        let (length, begin) = if content_height == 0.0 {
            (0.0, 0.0)
        } else {
            (
                (size.height * size.height / content_height).max(MIN_BAR_LENGTH),
                size.height * -self.vertical_offset() / content_height,
            )
        };
        let x = size.width - self.scrollbar_width;
        ScrollbarGeometry {
            track: Rect::new(x, 0.0, self.scrollbar_width, size.height),
            bar: Rect::new(x, begin, self.scrollbar_width, length),
        }
    }

    /// Stops both inertias and frees the cached frame. Gestures after this
    /// start from scratch.
    pub fn teardown(&mut self) {
        self.drop_inertia(Axis::Horizontal);
        self.drop_inertia(Axis::Vertical);
        self.cache = None;
        self.pan.in_progress.set(false);
    }

    fn offset(&self) -> Vec2 {
        self.content
            .as_ref()
            .and_then(|c| c.try_borrow().ok().map(|c| c.base().location()))
            .unwrap_or(Vec2::ZERO)
    }

    fn content_size(&self) -> Size {
        self.content
            .as_ref()
            .and_then(|c| c.try_borrow().ok().map(|c| c.base().size()))
            .unwrap_or_default()
    }

    fn set_offset(&mut self, axis: Axis, value: f32) {
        let Some(content) = self.content.clone() else {
            log::warn!("scroll offset set without content");
            return;
        };
        // The inertia would resume from a stale value; it is rebuilt lazily.
        self.drop_inertia(axis);
        self.sink(&content).apply(axis, value);
    }

    fn sink(&self, content: &ElementRef) -> OffsetSink {
        OffsetSink {
            content: Rc::downgrade(content),
            pan: self.pan.clone(),
            updated: self.base.updated().clone(),
        }
    }

    fn inertia_mut(&mut self, axis: Axis) -> Option<&mut GestureInertia> {
        match axis {
            Axis::Horizontal => self.horizontal.as_mut(),
            Axis::Vertical => self.vertical.as_mut(),
        }
    }

    fn drop_inertia(&mut self, axis: Axis) {
        let slot = match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        };
        if let Some(mut inertia) = slot.take() {
            inertia.dispose();
        }
    }

    /// Creates the inertia of each enabled axis that has room to move, and
    /// refreshes the bounds of existing ones in case either size changed.
    fn ensure_inertia(&mut self) {
        let Some(content) = self.content.clone() else {
            return;
        };
        let content_size = self.content_size();
        let size = self.base.size();
        let offset = self.offset();

        for axis in [Axis::Horizontal, Axis::Vertical] {
            if !self.axes.contains(axis.flag()) {
                continue;
            }
            let (content_extent, extent) = (axis.extent(content_size), axis.extent(size));
            let min = -(content_extent - extent).max(0.0);
            if let Some(inertia) = self.inertia_mut(axis) {
                if inertia.min() != min {
                    inertia.set_bounds(min, 0.0);
                }
                continue;
            }
            if content_extent <= 0.0 || extent <= 0.0 {
                continue;
            }
            let trim = match axis {
                Axis::Horizontal => self.trim_horizontal_panning,
                Axis::Vertical => self.trim_vertical_panning,
            };
            let sink = self.sink(&content);
            let inertia = GestureInertia::new(move |v| sink.apply(axis, v))
                .with_bounds(min, 0.0)
                .with_trim(trim)
                .with_value(axis.of(offset));
            log::debug!("scroll viewer: {axis:?} inertia over [{min}, 0]");
            match axis {
                Axis::Horizontal => self.horizontal = Some(inertia),
                Axis::Vertical => self.vertical = Some(inertia),
            }
        }
    }

    fn resolve_axis(&mut self, from: Vec2, to: Vec2) -> Axis {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        let axis = if dx > dy {
            Axis::Horizontal
        } else if dy > dx {
            Axis::Vertical
        } else {
            self.last_axis
        };
        self.last_axis = axis;
        axis
    }

    /// Neutral update for the axis the gesture is not driving.
    fn settle_other(&mut self, axis: Axis, done: bool) {
        let other = axis.other();
        if self.axes.contains(other.flag())
            && let Some(inertia) = self.inertia_mut(other)
        {
            inertia.pan(0.0, 0.0, done);
        }
    }

    fn draw_scrollbar(ctx: &mut dyn DrawingContext, geometry: ScrollbarGeometry, color: Color) {
        ctx.draw_alpha_image(SCROLLBAR_TRACK_IMAGE, geometry.track);
        ctx.fill_rectangle(geometry.bar, color);
    }
}

fn content_animation(
    viewer: &Weak<RefCell<ScrollViewer>>,
    pick: fn(&dyn Element) -> Option<AnimationHandle>,
) -> Option<AnimationHandle> {
    let viewer = viewer.upgrade()?;
    let content = viewer.try_borrow().ok()?.content()?;
    let content = content.try_borrow().ok()?;
    pick(&*content)
}

impl Element for ScrollViewer {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn pan(&mut self, from: Vec2, to: &mut Vec2, done: bool, _start: Vec2) -> bool {
        if self.content.is_none() {
            log::warn!("scroll viewer panned without content");
            return false;
        }
        let axis = self.resolve_axis(from, *to);
        self.pan.in_progress.set(!done);
        self.settle_other(axis, done);
        if !self.axes.contains(axis.flag()) {
            return false;
        }

        self.ensure_inertia();
        let (a, b) = (axis.of(from), axis.of(*to));
        if let Some(inertia) = self.inertia_mut(axis) {
            inertia.pan(a, b, done);
        }
        axis.set(to, a);
        true
    }

    fn flick(&mut self, from: Vec2, to: &mut Vec2, elapsed_ms: u32, _start: Vec2) -> bool {
        if self.content.is_none() {
            log::warn!("scroll viewer flicked without content");
            return false;
        }
        self.pan.in_progress.set(false);
        let axis = self.resolve_axis(from, *to);
        self.settle_other(axis, true);
        if !self.axes.contains(axis.flag()) {
            return false;
        }

        self.ensure_inertia();
        let (a, b) = (axis.of(from), axis.of(*to));
        if let Some(inertia) = self.inertia_mut(axis) {
            inertia.flick(a, b, elapsed_ms);
        }
        axis.set(to, a);
        true
    }

    fn pressed(&mut self, point: Vec2) -> Option<ElementRef> {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if self.axes.contains(axis.flag())
                && let Some(inertia) = self.inertia_mut(axis)
            {
                inertia.pressed();
            }
        }
        self.base.hit_test(point)
    }

    fn tick(&mut self, dt: Duration) -> bool {
        let mut running = false;
        if let Some(inertia) = &mut self.horizontal {
            running |= inertia.tick(dt);
        }
        if let Some(inertia) = &mut self.vertical {
            running |= inertia.tick(dt);
        }
        running | self.base.tick_children(dt)
    }

    fn draw(&mut self, ctx: &mut dyn DrawingContext) {
        let Some(content) = self.content.clone() else {
            log::warn!("scroll viewer drawn without content");
            return;
        };
        let size = self.base.size();
        let offset = self.offset();

        let panning = self.cache_panning && self.pan.in_progress.get();
        if panning && let Some(frame) = &self.cache {
            let shift = offset - self.pan.settled.get();
            log::trace!("scroll viewer: cached frame shifted by {shift:?}");
            ctx.draw_bitmap(frame, shift);
        } else {
            let scrollbar = self.show_scrollbars.then(|| self.scrollbar_geometry());
            let color = self.scrollbar_color;
            let frame = ctx.with_clip_buffer(
                Rect::from_origin_size(Vec2::ZERO, size),
                self.cache.take(),
                &mut |buffer: &mut dyn DrawingContext| {
                    if let Ok(mut c) = content.try_borrow_mut() {
                        let transformation = c.base().transformation;
                        let mut child = buffer.create_child(offset, transformation);
                        c.draw(&mut *child);
                    } else {
                        log::warn!("scroll viewer skipped busy content");
                    }
                    if let Some(geometry) = scrollbar {
                        Self::draw_scrollbar(buffer, geometry, color);
                    }
                },
            );
            self.cache = Some(frame);
        }

        if self.draw_shadows {
            let content_height = self.content_size().height;
            if offset.y < 0.0 {
                ctx.draw_alpha_image(
                    TOP_SHADOW_IMAGE,
                    Rect::new(0.0, 0.0, size.width, SHADOW_HEIGHT),
                );
            }
            if offset.y > (size.height - content_height).min(0.0) {
                ctx.draw_alpha_image(
                    BOTTOM_SHADOW_IMAGE,
                    Rect::new(0.0, size.height - SHADOW_HEIGHT, size.width, SHADOW_HEIGHT),
                );
            }
        }
    }
}

impl Drop for ScrollViewer {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ScrollViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollViewer")
            .field("bounds", &self.base.bounds())
            .field("axes", &self.axes)
            .field("horizontal", &self.horizontal)
            .field("vertical", &self.vertical)
            .field("panning", &self.pan.in_progress.get())
            .finish_non_exhaustive()
    }
}
