//! Drawing-surface contract.
//!
//! Elements never talk to a rasterizer directly. They draw through a
//! [`DrawingContext`] that already carries their accumulated transform and
//! clip; containers derive a child context per child. A backend implements
//! the trait (see [`crate::scene::SceneContext`] for the display-list one)
//! and renders frames through [`RenderBackend`].

use crate::geometry::{Rect, Transformation, Vec2};
use crate::scaling::ScaleConfig;
use crate::scene::{Scene, SceneNode};
use crate::Color;

/// Offscreen frame sized in physical pixels. For a display-list surface the
/// "pixels" are the recorded nodes, in bitmap-local coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    nodes: Vec<SceneNode>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<SceneNode> {
        &mut self.nodes
    }
}

pub trait DrawingContext {
    /// Scale configuration the surface was created with.
    fn scale(&self) -> &ScaleConfig;

    /// Part of this context's local space that can still show up on screen.
    fn visible_rect(&self) -> Rect;

    /// Context for a child placed at `offset` in local coordinates, scaled
    /// about its own center as `transformation` says. Shares this context's
    /// clip.
    fn create_child(
        &mut self,
        offset: Vec2,
        transformation: Transformation,
    ) -> Box<dyn DrawingContext + '_>;

    fn fill_rectangle(&mut self, rect: Rect, color: Color);

    fn draw_image(&mut self, name: &str, rect: Rect);

    fn draw_alpha_image(&mut self, name: &str, rect: Rect);

    /// Renders `draw` into an offscreen buffer covering `rect` (local
    /// coordinates; the buffer's origin is `rect`'s), composites it back at
    /// `rect`, and hands the buffer out so the caller can reuse or cache it.
    /// `reusable` is recycled when its pixel size still matches.
    fn with_clip_buffer(
        &mut self,
        rect: Rect,
        reusable: Option<Bitmap>,
        draw: &mut dyn FnMut(&mut dyn DrawingContext),
    ) -> Bitmap;

    /// Blits a previously captured buffer with its origin at `at`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, at: Vec2);
}

#[derive(Clone, Copy)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
}

pub trait RenderBackend {
    fn configure_surface(&mut self, width: u32, height: u32);
    fn frame(&mut self, scene: &Scene, cfg: FrameConfig);
}
