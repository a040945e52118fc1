#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x - o.x, self.y - o.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Strict overlap: rects that only share an edge do not intersect, and an
    /// empty rect intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r <= x || b <= y {
            return Rect::new(x, y, 0.0, 0.0);
        }
        Rect::new(x, y, r - x, b - y)
    }

    pub fn translate(&self, d: Vec2) -> Rect {
        Rect::new(self.x + d.x, self.y + d.y, self.w, self.h)
    }
}

/// Per-element transformation: uniform scale about `center`, in the
/// element's own coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    pub scaling: f32,
    pub center: Vec2,
}

impl Default for Transformation {
    fn default() -> Self {
        Self {
            scaling: 1.0,
            center: Vec2::ZERO,
        }
    }
}

impl Transformation {
    pub fn scaled(scaling: f32, center: Vec2) -> Self {
        Self { scaling, center }
    }
}

/// Scale followed by translation. Enough to express nested element offsets
/// and the per-element scaling a drawing context accumulates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            scale_x: sx,
            scale_y: sy,
            ..Self::identity()
        }
    }

    /// Maps a child's local space into its parent's: move by `offset`, then
    /// scale about `t.center`.
    pub fn for_child(offset: Vec2, t: Transformation) -> Self {
        let s = t.scaling;
        Self {
            translate_x: offset.x + t.center.x * (1.0 - s),
            translate_y: offset.y + t.center.y * (1.0 - s),
            scale_x: s,
            scale_y: s,
        }
    }

    pub fn apply_to_point(&self, p: Vec2) -> Vec2 {
        Vec2 {
            x: p.x * self.scale_x + self.translate_x,
            y: p.y * self.scale_y + self.translate_y,
        }
    }

    pub fn apply_to_rect(&self, r: Rect) -> Rect {
        let p = self.apply_to_point(Vec2 { x: r.x, y: r.y });
        Rect {
            x: p.x,
            y: p.y,
            w: r.w * self.scale_x,
            h: r.h * self.scale_y,
        }
    }

    pub fn unapply_to_point(&self, p: Vec2) -> Vec2 {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return Vec2::ZERO;
        }
        Vec2 {
            x: (p.x - self.translate_x) / self.scale_x,
            y: (p.y - self.translate_y) / self.scale_y,
        }
    }

    /// Inverse mapping. A zero scale collapses everything to an empty rect.
    pub fn unapply_to_rect(&self, r: Rect) -> Rect {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return Rect::default();
        }
        Rect {
            x: (r.x - self.translate_x) / self.scale_x,
            y: (r.y - self.translate_y) / self.scale_y,
            w: r.w / self.scale_x,
            h: r.h / self.scale_y,
        }
    }

    /// `self ∘ inner`: apply `inner` first, then `self`.
    pub fn combine(&self, inner: &Transform) -> Transform {
        Transform {
            translate_x: inner.translate_x * self.scale_x + self.translate_x,
            translate_y: inner.translate_y * self.scale_y + self.translate_y,
            scale_x: self.scale_x * inner.scale_x,
            scale_y: self.scale_y * inner.scale_y,
        }
    }
}
