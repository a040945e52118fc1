//! Element tree, canvas container and inertial scroll viewer.
//!
//! ```rust
//! use drift_core::*;
//! use drift_ui::*;
//!
//! let list = Canvas::new();
//! for i in 0..20 {
//!     let row = ColorBox::new(Rect::new(0.0, i as f32 * 40.0, 200.0, 40.0), Color::WHITE);
//!     list.borrow_mut().add_element(&(row as ElementRef)).unwrap();
//! }
//! assert_eq!(list.borrow().base().size(), Size::new(200.0, 800.0));
//!
//! let viewer = ScrollViewer::new(Rect::new(0.0, 0.0, 200.0, 300.0));
//! viewer.borrow_mut().set_content(&(list as ElementRef)).unwrap();
//!
//! let mut to = Vec2::new(0.0, -60.0);
//! assert!(viewer.borrow_mut().pan(Vec2::ZERO, &mut to, false, Vec2::ZERO));
//! assert_eq!(viewer.borrow().vertical_offset(), -60.0);
//! ```

pub mod canvas;
pub mod element;
pub mod elements;
pub mod gestures;
pub mod host;
pub mod inertia;
pub mod scroll;

mod tests;

pub use canvas::Canvas;
pub use element::{Element, ElementBase, ElementRef, WeakElementRef, element_ref, same_element};
pub use elements::{ColorBox, ImageBox};
pub use gestures::GestureRouter;
pub use host::UiHost;
pub use inertia::{Flight, GestureInertia};
pub use scroll::{Axis, ScrollAxes, ScrollViewer, ScrollbarGeometry};
