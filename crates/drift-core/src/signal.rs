use std::cell::RefCell;
use std::rc::Rc;

pub type Callback = Rc<dyn Fn()>;

/// Single-slot "update requested" signal.
///
/// An element owns one of these; whoever owns the element (its container, or
/// the host for the root) installs a handler on attach and clears it on
/// detach. Installing replaces the previous handler, it never chains.
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct UpdateSignal(Rc<RefCell<Option<Callback>>>);

impl UpdateSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, handler: Callback) {
        *self.0.borrow_mut() = Some(handler);
    }

    pub fn detach(&self) {
        self.0.borrow_mut().take();
    }

    pub fn is_attached(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// Invokes the installed handler, if any. The slot is not borrowed while
    /// the handler runs, so a handler may re-attach or detach.
    pub fn notify(&self) {
        let handler = self.0.borrow().clone();
        if let Some(h) = handler {
            h();
        }
    }

    /// A handler that forwards into this signal; what a container installs
    /// on its children.
    pub fn forwarder(&self) -> Callback {
        let this = self.clone();
        Rc::new(move || this.notify())
    }
}

impl std::fmt::Debug for UpdateSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateSignal")
            .field("attached", &self.is_attached())
            .finish()
    }
}
