use std::cell::RefCell;
use std::rc::Rc;

use drift_core::*;

use crate::element::{Element, ElementBase, ElementRef, WeakElementRef, element_ref};

/// Container that composes an ordered list of children.
///
/// Its size is the running union of its children's bounds. Adding a child
/// can only grow it; removing one leaves it as is (call
/// [`Canvas::shrink_to_children`] to recompute).
pub struct Canvas {
    base: ElementBase,
}

impl Canvas {
    pub fn new() -> Rc<RefCell<Canvas>> {
        element_ref(|weak| {
            let this: WeakElementRef = weak.clone();
            let mut base = ElementBase::new(this.clone());
            base.entrance_animation = Some(ForwardingAnimation::handle({
                let this = this.clone();
                move || children_group(&this, |e| e.entrance_animation())
            }));
            base.exit_animation = Some(ForwardingAnimation::handle(move || {
                children_group(&this, |e| e.exit_animation())
            }));
            Canvas { base }
        })
    }

    /// Appends `e`. Adding an element that is already a child does nothing.
    pub fn add_element(&mut self, e: &ElementRef) -> Result<(), TreeError> {
        if self.base.contains_child(e) {
            return Ok(());
        }
        self.base.adopt(e)?;
        self.base.children_mut().push(e.clone());
        self.grow_to(e);
        Ok(())
    }

    /// Inserts `e` right after `sibling`, or at the end when `sibling` is not
    /// a child.
    pub fn add_element_after(
        &mut self,
        e: &ElementRef,
        sibling: &ElementRef,
    ) -> Result<(), TreeError> {
        if self.base.contains_child(e) {
            return Ok(());
        }
        self.base.adopt(e)?;
        let index = match self.base.index_of(sibling) {
            Some(i) => i + 1,
            None => self.base.children().len(),
        };
        self.base.children_mut().insert(index, e.clone());
        self.grow_to(e);
        Ok(())
    }

    /// Detaches `e`. Returns false if it was not a child. The canvas keeps
    /// its size.
    pub fn remove_element(&mut self, e: &ElementRef) -> bool {
        let Some(index) = self.base.index_of(e) else {
            return false;
        };
        let removed = self.base.children_mut().remove(index);
        ElementBase::release(&removed);
        true
    }

    /// First child with the given id, in insertion order.
    pub fn child(&self, id: &str) -> Option<ElementRef> {
        self.base
            .children()
            .iter()
            .find(|c| c.try_borrow().is_ok_and(|c| c.base().id.as_deref() == Some(id)))
            .cloned()
    }

    /// Drops every child from the list. Children keep their parent and update
    /// links; they can still be added to another container afterwards.
    pub fn clear(&mut self) {
        self.base.children_mut().clear();
    }

    /// Recomputes the size as the union of the current children's bounds.
    pub fn shrink_to_children(&mut self) {
        let mut size = Size::default();
        for c in self.base.children() {
            let b = c.borrow().bounds();
            size.width = size.width.max(b.right());
            size.height = size.height.max(b.bottom());
        }
        self.base.set_size(size);
    }

    fn grow_to(&mut self, e: &ElementRef) {
        let b = e.borrow().bounds();
        let size = self.base.size();
        self.base.set_size(Size::new(
            size.width.max(b.right()),
            size.height.max(b.bottom()),
        ));
    }
}

/// Joint group of the live children's animations, built when the forwarding
/// animation starts.
fn children_group(
    this: &WeakElementRef,
    pick: fn(&dyn Element) -> Option<AnimationHandle>,
) -> Option<AnimationHandle> {
    let node = this.upgrade()?;
    let node = node.try_borrow().ok()?;
    let members: Vec<AnimationHandle> = node
        .base()
        .children()
        .iter()
        .filter_map(|c| c.try_borrow().ok().and_then(|c| pick(&*c)))
        .collect();
    Some(Rc::new(AnimationGroup::new(members)))
}

impl Element for Canvas {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&mut self, ctx: &mut dyn DrawingContext) {
        let visible_rect = ctx.visible_rect();
        let visible: Vec<ElementRef> = self
            .base
            .children()
            .iter()
            .filter(|c| c.borrow().bounds().intersects(&visible_rect))
            .cloned()
            .collect();
        log::trace!(
            "canvas draw: {} of {} children visible",
            visible.len(),
            self.base.children().len()
        );

        for child in visible {
            let mut child = child.borrow_mut();
            let location = child.base().location();
            let transformation = child.base().transformation;
            let mut child_ctx = ctx.create_child(location, transformation);
            child.draw(&mut *child_ctx);
        }
    }
}
