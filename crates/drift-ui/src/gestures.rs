//! # Gesture routing
//!
//! [`GestureRouter`] turns raw pointer events into the element hooks:
//!
//! - down: `pressed` on the root picks the target for the whole gesture;
//! - move: `pan` on the target, then on each ancestor while motion is left;
//! - up: `flick` when the release came quickly after a real movement,
//!   otherwise a final `pan` with `done` set;
//! - cancel: a final `pan` at the last known position.
//!
//! A handler that consumes an axis resets that component of `to`, so the
//! ancestors above it only see what is left. The final `pan` goes to every
//! element in the chain so each can settle.
//!
//! Positions handed to the hooks are root coordinates; elements use the
//! deltas between them.

use std::time::Duration;

use drift_core::*;
use smallvec::SmallVec;

use crate::element::{ElementRef, WeakElementRef};

/// Releases within this long after the press count as flicks.
const FLICK_WINDOW: Duration = Duration::from_millis(300);
/// Movement below this is not a flick.
const TAP_SLOP: f32 = 10.0;

type Chain = SmallVec<[ElementRef; 8]>;

#[derive(Default)]
pub struct GestureRouter {
    target: Option<WeakElementRef>,
    start: Vec2,
    start_time: Duration,
    last: Vec2,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a press is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.target.is_some()
    }

    /// Feeds one pointer event. Returns true if an element handled it.
    pub fn handle(&mut self, root: &ElementRef, event: &PointerEvent) -> bool {
        match event.event {
            PointerEventKind::Down => self.down(root, event),
            PointerEventKind::Move => {
                let Some(chain) = self.chain() else {
                    return false;
                };
                let from = self.last;
                self.last = event.position;
                self.pan(&chain, from, event.position, false)
            }
            PointerEventKind::Up => {
                let Some(chain) = self.chain() else {
                    return false;
                };
                let elapsed = event.time.saturating_sub(self.start_time);
                let distance = {
                    let d = event.position - self.start;
                    (d.x * d.x + d.y * d.y).sqrt()
                };
                let handled = if elapsed < FLICK_WINDOW && distance > TAP_SLOP {
                    let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
                    log::debug!("flick over {distance:.1} units in {ms} ms");
                    self.flick(&chain, event.position, ms)
                } else {
                    let from = self.last;
                    self.pan(&chain, from, event.position, true)
                };
                self.target = None;
                handled
            }
            PointerEventKind::Cancel => {
                let Some(chain) = self.chain() else {
                    return false;
                };
                let last = self.last;
                let handled = self.pan(&chain, last, last, true);
                self.target = None;
                handled
            }
        }
    }

    fn down(&mut self, root: &ElementRef, event: &PointerEvent) -> bool {
        let target = {
            let Ok(mut r) = root.try_borrow_mut() else {
                log::warn!("pointer down dropped: root is busy");
                return false;
            };
            let local = Transform::for_child(r.base().location(), r.base().transformation)
                .unapply_to_point(event.position);
            r.pressed(local)
        };
        self.start = event.position;
        self.start_time = event.time;
        self.last = event.position;
        self.target = target.as_ref().map(std::rc::Rc::downgrade);
        self.target.is_some()
    }

    /// Target followed by its ancestors, innermost first.
    fn chain(&self) -> Option<Chain> {
        let mut chain = Chain::new();
        let mut next = self.target.as_ref()?.upgrade();
        while let Some(e) = next {
            next = e.try_borrow().ok().and_then(|b| b.base().parent());
            chain.push(e);
        }
        (!chain.is_empty()).then_some(chain)
    }

    fn pan(&self, chain: &Chain, from: Vec2, to: Vec2, done: bool) -> bool {
        let mut to = to;
        let mut handled = false;
        for e in chain {
            if !done && to == from {
                break;
            }
            let Ok(mut e) = e.try_borrow_mut() else {
                log::warn!("pan skipped a busy element");
                continue;
            };
            handled |= e.pan(from, &mut to, done, self.start);
        }
        handled
    }

    fn flick(&self, chain: &Chain, to: Vec2, elapsed_ms: u32) -> bool {
        let from = self.start;
        let mut to = to;
        let mut handled = false;
        for e in chain {
            if to == from {
                break;
            }
            let Ok(mut e) = e.try_borrow_mut() else {
                log::warn!("flick skipped a busy element");
                continue;
            };
            handled |= e.flick(from, &mut to, elapsed_ms, self.start);
        }
        handled
    }
}
