//! # Element tree
//!
//! Every node is an `Rc<RefCell<dyn Element>>`. Containers own their children
//! strongly; children point back at their parent weakly, so dropping a
//! subtree's owner drops the subtree.
//!
//! Elements are built through [`element_ref`], which hands the constructor a
//! weak reference to the node being created. The node keeps it so hit testing
//! can return the node itself and so forwarding animations can look at the
//! node's live children when they start.
//!
//! An element never schedules a redraw. It raises its [`UpdateSignal`]; the
//! container it lives in installed a handler there that raises the
//! container's own signal, and so on up to whatever the host attached to the
//! root.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use drift_core::*;

pub type ElementRef = Rc<RefCell<dyn Element>>;
pub type WeakElementRef = Weak<RefCell<dyn Element>>;

/// Builds an element whose base knows its own reference.
pub fn element_ref<E: Element>(build: impl FnOnce(&Weak<RefCell<E>>) -> E) -> Rc<RefCell<E>> {
    Rc::new_cyclic(|weak| RefCell::new(build(weak)))
}

/// Identity comparison that ignores vtable pointers.
pub fn same_element(a: &ElementRef, b: &ElementRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

pub trait Element: 'static {
    fn base(&self) -> &ElementBase;
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Paints this element through `ctx`, whose origin is the element's
    /// top-left corner.
    fn draw(&mut self, ctx: &mut dyn DrawingContext);

    /// Pointer moved from `from` to `to` during a drag; `done` on release.
    /// A handler that consumes an axis resets that component of `to` to
    /// `from`'s.
    fn pan(&mut self, from: Vec2, to: &mut Vec2, done: bool, start: Vec2) -> bool {
        let _ = (from, to, done, start);
        false
    }

    /// Fast release covering `from` → `to` in `elapsed_ms`.
    fn flick(&mut self, from: Vec2, to: &mut Vec2, elapsed_ms: u32, start: Vec2) -> bool {
        let _ = (from, to, elapsed_ms, start);
        false
    }

    /// Deepest element under `point` (local coordinates) that should receive
    /// the gesture that starts here.
    fn pressed(&mut self, point: Vec2) -> Option<ElementRef> {
        self.base().hit_test(point)
    }

    /// Pushes time into inertia and other time-driven state; true while
    /// something in this subtree is still moving.
    fn tick(&mut self, dt: Duration) -> bool {
        self.base().tick_children(dt)
    }

    fn entrance_animation(&self) -> Option<AnimationHandle> {
        self.base().entrance_animation.clone()
    }

    fn exit_animation(&self) -> Option<AnimationHandle> {
        self.base().exit_animation.clone()
    }

    fn bounds(&self) -> Rect {
        self.base().bounds()
    }
}

pub struct ElementBase {
    pub id: Option<String>,
    location: Vec2,
    size: Size,
    pub transformation: Transformation,
    this: WeakElementRef,
    parent: Option<WeakElementRef>,
    children: Vec<ElementRef>,
    updated: UpdateSignal,
    pub entrance_animation: Option<AnimationHandle>,
    pub exit_animation: Option<AnimationHandle>,
}

impl ElementBase {
    pub fn new(this: WeakElementRef) -> Self {
        Self {
            id: None,
            location: Vec2::ZERO,
            size: Size::default(),
            transformation: Transformation::default(),
            this,
            parent: None,
            children: Vec::new(),
            updated: UpdateSignal::new(),
            entrance_animation: None,
            exit_animation: None,
        }
    }

    pub fn with_bounds(mut self, rect: Rect) -> Self {
        self.location = rect.origin();
        self.size = rect.size();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn location(&self) -> Vec2 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec2) {
        self.location = location;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.location, self.size)
    }

    pub fn this(&self) -> Option<ElementRef> {
        self.this.upgrade()
    }

    pub fn weak_this(&self) -> WeakElementRef {
        self.this.clone()
    }

    pub fn parent(&self) -> Option<ElementRef> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn children(&self) -> &[ElementRef] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<ElementRef> {
        &mut self.children
    }

    pub fn contains_child(&self, e: &ElementRef) -> bool {
        self.children.iter().any(|c| same_element(c, e))
    }

    pub fn index_of(&self, e: &ElementRef) -> Option<usize> {
        self.children.iter().position(|c| same_element(c, e))
    }

    /// The signal this element raises when it needs repainting.
    pub fn updated(&self) -> &UpdateSignal {
        &self.updated
    }

    pub fn request_update(&self) {
        self.updated.notify();
    }

    /// Topmost child (last in draw order) containing `point`, recursively;
    /// otherwise this element.
    pub fn hit_test(&self, point: Vec2) -> Option<ElementRef> {
        for child in self.children.iter().rev() {
            let Ok(mut c) = child.try_borrow_mut() else {
                log::warn!("hit test skipped a busy element");
                continue;
            };
            if !c.bounds().contains(point) {
                continue;
            }
            let local = Transform::for_child(c.base().location, c.base().transformation)
                .unapply_to_point(point);
            return c.pressed(local).or_else(|| Some(child.clone()));
        }
        self.this()
    }

    pub fn tick_children(&self, dt: Duration) -> bool {
        let mut running = false;
        for child in &self.children {
            running |= child.borrow_mut().tick(dt);
        }
        running
    }

    /// Links `child` under this element: parent pointer plus this element's
    /// redraw forwarder in the child's single update slot.
    ///
    /// Fails if the child is still listed by another live container.
    pub(crate) fn adopt(&self, child: &ElementRef) -> Result<(), TreeError> {
        let mut c = child.try_borrow_mut().map_err(|_| TreeError::Busy)?;
        let me = self.this();
        if let Some(parent) = c.base().parent()
            && !me.as_ref().is_some_and(|m| same_element(m, &parent))
        {
            let still_listed = parent
                .try_borrow()
                .map_err(|_| TreeError::Busy)?
                .base()
                .contains_child(child);
            if still_listed {
                return Err(TreeError::AlreadyAttached);
            }
        }
        let base = c.base_mut();
        base.parent = Some(self.this.clone());
        base.updated.attach(self.updated.forwarder());
        Ok(())
    }

    /// Clears the parent pointer and the update slot.
    pub(crate) fn release(child: &ElementRef) {
        match child.try_borrow_mut() {
            Ok(mut c) => {
                let base = c.base_mut();
                base.parent = None;
                base.updated.detach();
            }
            Err(_) => log::warn!("released a busy element; its links were left in place"),
        }
    }
}
