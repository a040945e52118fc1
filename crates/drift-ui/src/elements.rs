//! Leaf elements.

use std::cell::RefCell;
use std::rc::Rc;

use drift_core::*;

use crate::element::{Element, ElementBase, element_ref};

/// Solid rectangle filling its bounds.
pub struct ColorBox {
    base: ElementBase,
    color: Color,
}

impl ColorBox {
    pub fn new(bounds: Rect, color: Color) -> Rc<RefCell<ColorBox>> {
        element_ref(|this| ColorBox {
            base: ElementBase::new(this.clone()).with_bounds(bounds),
            color,
        })
    }

    pub fn with_id(bounds: Rect, color: Color, id: &str) -> Rc<RefCell<ColorBox>> {
        element_ref(|this| ColorBox {
            base: ElementBase::new(this.clone()).with_bounds(bounds).with_id(id),
            color,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.base.request_update();
        }
    }
}

impl Element for ColorBox {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&mut self, ctx: &mut dyn DrawingContext) {
        ctx.fill_rectangle(Rect::from_origin_size(Vec2::ZERO, self.base.size()), self.color);
    }
}

/// Named image stretched over its bounds.
pub struct ImageBox {
    base: ElementBase,
    name: String,
    alpha: bool,
}

impl ImageBox {
    pub fn new(bounds: Rect, name: impl Into<String>) -> Rc<RefCell<ImageBox>> {
        let name = name.into();
        element_ref(|this| ImageBox {
            base: ElementBase::new(this.clone()).with_bounds(bounds),
            name,
            alpha: false,
        })
    }

    /// Blends the image using its own alpha channel.
    pub fn with_alpha(bounds: Rect, name: impl Into<String>) -> Rc<RefCell<ImageBox>> {
        let name = name.into();
        element_ref(|this| ImageBox {
            base: ElementBase::new(this.clone()).with_bounds(bounds),
            name,
            alpha: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Element for ImageBox {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&mut self, ctx: &mut dyn DrawingContext) {
        let rect = Rect::from_origin_size(Vec2::ZERO, self.base.size());
        if self.alpha {
            ctx.draw_alpha_image(&self.name, rect);
        } else {
            ctx.draw_image(&self.name, rect);
        }
    }
}
