//! # Drift core
//!
//! Shared vocabulary for the Drift element tree:
//!
//! - [`geometry`]: `Vec2`, `Size`, `Rect`, and the `Transform` a drawing
//!   context accumulates while descending the tree.
//! - [`scaling`]: `ScaleConfig`, the immutable logical→physical mapping, and
//!   the `ScaleRegistry` that establishes it once at startup.
//! - [`render_api`]: the `DrawingContext` contract elements draw through.
//! - [`scene`]: a display-list implementation of that contract.
//! - [`signal`]: the single-slot `UpdateSignal` elements raise when they
//!   need a redraw.
//! - [`animation`]: the opaque animation capability (groups, forwarders,
//!   tweens).
//!
//! ```rust
//! use drift_core::*;
//!
//! let mut nodes = Vec::new();
//! let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 100);
//! {
//!     let mut child = ctx.create_child(Vec2::new(10.0, 10.0), Transformation::default());
//!     child.fill_rectangle(Rect::new(0.0, 0.0, 20.0, 20.0), Color::WHITE);
//! }
//! assert_eq!(
//!     nodes,
//!     vec![SceneNode::Rect { rect: Rect::new(10.0, 10.0, 20.0, 20.0), color: Color::WHITE }]
//! );
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod prelude;
pub mod render_api;
pub mod scaling;
pub mod scene;
pub mod signal;
mod tests;

pub use color::*;
pub use geometry::*;
pub use prelude::*;
pub use render_api::*;
pub use scene::*;
pub use signal::*;
