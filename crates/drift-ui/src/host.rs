//! # Host integration
//!
//! [`UiHost`] is what a windowing loop talks to. It owns the root element,
//! routes pointer events, pushes frame time into the tree and records frames
//! as [`Scene`]s:
//!
//! ```text
//! event loop ── handle_pointer ──▶ GestureRouter ──▶ pressed / pan / flick
//!            ── tick(dt) ─────────▶ root.tick ──▶ inertia, running animations
//!            ── needs_redraw? ───▶ render(w, h) ──▶ Scene ──▶ RenderBackend
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use drift_core::*;

use crate::element::ElementRef;
use crate::gestures::GestureRouter;

pub struct UiHost {
    root: ElementRef,
    router: GestureRouter,
    scale: ScaleConfig,
    pub clear_color: Color,
    dirty: Rc<Cell<bool>>,
    animations: Vec<AnimationHandle>,
}

impl UiHost {
    pub fn new(root: ElementRef, scale: ScaleConfig) -> Self {
        let dirty = Rc::new(Cell::new(true));
        {
            let dirty = dirty.clone();
            root.borrow()
                .base()
                .updated()
                .attach(Rc::new(move || dirty.set(true)));
        }
        Self {
            root,
            router: GestureRouter::new(),
            scale,
            clear_color: Color::BLACK,
            dirty,
            animations: Vec::new(),
        }
    }

    pub fn root(&self) -> &ElementRef {
        &self.root
    }

    pub fn scale(&self) -> &ScaleConfig {
        &self.scale
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        self.router.handle(&self.root, event)
    }

    /// Starts `animation` and advances it on every [`UiHost::tick`] until it
    /// stops.
    pub fn play(&mut self, animation: AnimationHandle) {
        animation.start();
        self.animations.push(animation);
        self.dirty.set(true);
    }

    /// Advances the tree by `dt`. True while anything still moves, in which
    /// case the host should keep ticking.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut running = match self.root.try_borrow_mut() {
            Ok(mut root) => root.tick(dt),
            Err(_) => {
                log::warn!("tick skipped: root is busy");
                true
            }
        };
        if !self.animations.is_empty() {
            self.animations.retain(|a| a.advance(dt));
            self.dirty.set(true);
            running |= !self.animations.is_empty();
        }
        running
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty.get()
    }

    /// Draws the tree into `ctx` and clears the redraw flag.
    pub fn draw(&mut self, ctx: &mut dyn DrawingContext) {
        match self.root.try_borrow_mut() {
            Ok(mut root) => {
                let location = root.base().location();
                let transformation = root.base().transformation;
                let mut child = ctx.create_child(location, transformation);
                root.draw(&mut *child);
            }
            Err(_) => log::warn!("draw skipped: root is busy"),
        }
        self.dirty.set(false);
    }

    /// Records a frame for a surface of `width` x `height` physical pixels.
    pub fn render(&mut self, width: u32, height: u32) -> Scene {
        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, self.scale, width, height);
        self.draw(&mut ctx);
        self.finish(nodes, width, height)
    }

    /// Wraps recorded nodes into a scene, applying the mirroring flags.
    pub fn finish(&self, nodes: Vec<SceneNode>, width: u32, height: u32) -> Scene {
        let mut scene = Scene {
            clear_color: self.clear_color,
            nodes,
        };
        scene.mirror(&self.scale, width as f32, height as f32);
        log::trace!("rendered {} nodes at {width}x{height}", scene.nodes.len());
        scene
    }
}

impl Drop for UiHost {
    fn drop(&mut self) {
        if let Ok(root) = self.root.try_borrow() {
            root.base().updated().detach();
        }
    }
}
