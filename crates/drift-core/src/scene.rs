use crate::geometry::{Rect, Transform, Transformation, Vec2};
use crate::render_api::{Bitmap, DrawingContext};
use crate::scaling::ScaleConfig;
use crate::Color;

/// Renderable scene, in physical pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
    },
    Image {
        rect: Rect,
        name: String,
        alpha: bool,
        clip: Rect,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

impl SceneNode {
    pub fn translated(&self, d: Vec2) -> SceneNode {
        match self {
            SceneNode::Rect { rect, color } => SceneNode::Rect {
                rect: rect.translate(d),
                color: *color,
            },
            SceneNode::Image {
                rect,
                name,
                alpha,
                clip,
            } => SceneNode::Image {
                rect: rect.translate(d),
                name: name.clone(),
                alpha: *alpha,
                clip: clip.translate(d),
            },
            SceneNode::PushClip { rect } => SceneNode::PushClip {
                rect: rect.translate(d),
            },
            SceneNode::PopClip => SceneNode::PopClip,
        }
    }

    fn mirrored(&self, width: f32, height: f32, horizontal: bool, vertical: bool) -> SceneNode {
        let flip = |r: &Rect| Rect {
            x: if horizontal { width - r.right() } else { r.x },
            y: if vertical { height - r.bottom() } else { r.y },
            ..*r
        };
        match self {
            SceneNode::Rect { rect, color } => SceneNode::Rect {
                rect: flip(rect),
                color: *color,
            },
            SceneNode::Image {
                rect,
                name,
                alpha,
                clip,
            } => SceneNode::Image {
                rect: flip(rect),
                name: name.clone(),
                alpha: *alpha,
                clip: flip(clip),
            },
            SceneNode::PushClip { rect } => SceneNode::PushClip { rect: flip(rect) },
            SceneNode::PopClip => SceneNode::PopClip,
        }
    }
}

impl Scene {
    /// Applies the configuration's mirroring flags for a surface of the given
    /// pixel size.
    pub fn mirror(&mut self, scale: &ScaleConfig, width: f32, height: f32) {
        if !scale.mirror_horizontal && !scale.mirror_vertical {
            return;
        }
        for n in &mut self.nodes {
            *n = n.mirrored(width, height, scale.mirror_horizontal, scale.mirror_vertical);
        }
    }
}

/// [`DrawingContext`] that records a display list.
///
/// Coordinates handed to it are logical and local; it records physical
/// pixels, clipped to the surface (or clip buffer) it was created for.
pub struct SceneContext<'a> {
    out: &'a mut Vec<SceneNode>,
    transform: Transform,
    clip: Rect,
    scale: ScaleConfig,
}

impl<'a> SceneContext<'a> {
    /// Root context for a surface of `width` x `height` physical pixels.
    pub fn new(out: &'a mut Vec<SceneNode>, scale: ScaleConfig, width: u32, height: u32) -> Self {
        let f = scale.factor() as f32;
        Self {
            out,
            transform: Transform::scale(f, f),
            clip: Rect::new(0.0, 0.0, width as f32, height as f32),
            scale,
        }
    }

    fn push_image(&mut self, name: &str, rect: Rect, alpha: bool) {
        let rect = self.transform.apply_to_rect(rect);
        if !rect.intersects(&self.clip) {
            return;
        }
        self.out.push(SceneNode::Image {
            rect,
            name: name.to_string(),
            alpha,
            clip: self.clip,
        });
    }
}

impl DrawingContext for SceneContext<'_> {
    fn scale(&self) -> &ScaleConfig {
        &self.scale
    }

    fn visible_rect(&self) -> Rect {
        self.transform.unapply_to_rect(self.clip)
    }

    fn create_child(
        &mut self,
        offset: Vec2,
        transformation: Transformation,
    ) -> Box<dyn DrawingContext + '_> {
        let local = Transform::for_child(offset, transformation);
        Box::new(SceneContext {
            out: &mut *self.out,
            transform: self.transform.combine(&local),
            clip: self.clip,
            scale: self.scale,
        })
    }

    fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        let rect = self.transform.apply_to_rect(rect).intersection(&self.clip);
        if rect.is_empty() {
            return;
        }
        self.out.push(SceneNode::Rect { rect, color });
    }

    fn draw_image(&mut self, name: &str, rect: Rect) {
        self.push_image(name, rect, false);
    }

    fn draw_alpha_image(&mut self, name: &str, rect: Rect) {
        self.push_image(name, rect, true);
    }

    fn with_clip_buffer(
        &mut self,
        rect: Rect,
        reusable: Option<Bitmap>,
        draw: &mut dyn FnMut(&mut dyn DrawingContext),
    ) -> Bitmap {
        let (w, h) = self.scale.size_to_pixels(rect.size());
        let mut bitmap = match reusable {
            Some(b) if b.width == w && b.height == h => b,
            _ => {
                log::trace!("allocating {w}x{h} clip buffer");
                Bitmap::new(w, h)
            }
        };
        bitmap.clear();
        {
            let f = self.scale.factor() as f32;
            let mut inner = SceneContext {
                out: bitmap.nodes_mut(),
                transform: Transform::scale(f, f),
                clip: Rect::new(0.0, 0.0, w as f32, h as f32),
                scale: self.scale,
            };
            draw(&mut inner);
        }
        self.draw_bitmap(&bitmap, rect.origin());
        bitmap
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, at: Vec2) {
        let origin = self.transform.apply_to_point(at);
        let area = Rect::new(origin.x, origin.y, bitmap.width as f32, bitmap.height as f32)
            .intersection(&self.clip);
        if area.is_empty() {
            return;
        }
        self.out.push(SceneNode::PushClip { rect: area });
        self.out
            .extend(bitmap.nodes().iter().map(|n| n.translated(origin)));
        self.out.push(SceneNode::PopClip);
    }
}
