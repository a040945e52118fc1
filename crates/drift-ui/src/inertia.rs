//! # Gesture inertia
//!
//! [`GestureInertia`] is a bounded scalar driven by drag and flick input.
//! It does not own a timer: the host pushes time in through
//! [`GestureInertia::tick`], once per frame while anything is in flight.
//!
//! ```text
//! idle ──pan(!done)──▶ dragging ──pan(done), no velocity──▶ idle
//!                          │
//!                          └──pan(done) with velocity──▶ decaying ──settled──▶ idle
//! idle/dragging ──flick──▶ decaying
//! decaying ──pressed──▶ idle
//! ```
//!
//! Velocities are kept in units per frame at a 60 Hz reference; ticks with a
//! longer `dt` count as several frames.
//!
//! With `trim` set the value never leaves `[min, max]`. Without it a drag can
//! pull past the range with resistance, and decay springs it back.

use std::time::Duration;

const FRAME_RATE: f32 = 60.0;
/// Velocity kept per frame while decaying.
const FRICTION: f32 = 0.95;
/// Below this (units/frame) decay stops.
const MIN_VELOCITY: f32 = 0.05;
/// A released drag whose last sample moved more than this keeps going.
const RESIDUAL_VELOCITY: f32 = 0.25;
/// Share of a drag applied while past the range.
const OVERSCROLL_RESISTANCE: f32 = 0.5;
/// Velocity kept per frame while past the range.
const OVERSCROLL_DAMPING: f32 = 0.5;
/// Share of the overshoot recovered per frame when springing back.
const SPRING_BACK: f32 = 0.25;
/// Distance to a bound considered settled.
const SNAP_DISTANCE: f32 = 0.5;
/// 8000 units/s.
const MAX_FLICK_VELOCITY: f32 = 8_000.0 / FRAME_RATE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    Idle,
    Dragging,
    Decaying,
}

pub struct GestureInertia {
    value: f32,
    min: f32,
    max: f32,
    trim: bool,
    flight: Flight,
    velocity: f32,
    on_change: Option<Box<dyn FnMut(f32)>>,
    disposed: bool,
}

impl GestureInertia {
    /// `on_change` runs synchronously on every value change.
    pub fn new(on_change: impl FnMut(f32) + 'static) -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 0.0,
            trim: false,
            flight: Flight::Idle,
            velocity: 0.0,
            on_change: Some(Box::new(on_change)),
            disposed: false,
        }
    }

    pub fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.min = min.min(max);
        self.max = max.max(min);
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Starting value; no callback.
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn trim(&self) -> bool {
        self.trim
    }

    pub fn flight(&self) -> Flight {
        self.flight
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn set_bounds(&mut self, min: f32, max: f32) {
        self.min = min.min(max);
        self.max = max.max(min);
        if self.trim || self.flight == Flight::Idle {
            self.set_value(self.clamped(self.value));
        }
    }

    /// Live drag by `to - from`. A zero delta leaves a decay in flight alone,
    /// so an axis fed a neutral update keeps decaying; during a drag it means
    /// the finger held still and drops the residual velocity.
    pub fn pan(&mut self, from: f32, to: f32, done: bool) {
        if self.disposed {
            return;
        }
        let delta = to - from;
        if delta != 0.0 {
            self.flight = Flight::Dragging;
            self.velocity = delta;
            self.drag(delta);
        } else if self.flight == Flight::Dragging {
            self.velocity = 0.0;
        }
        if !done {
            return;
        }

        match self.flight {
            Flight::Dragging if self.velocity.abs() > RESIDUAL_VELOCITY => {
                self.flight = Flight::Decaying;
            }
            Flight::Decaying => {}
            _ => self.settle(),
        }
    }

    /// Starts decaying at the average velocity of the flick.
    pub fn flick(&mut self, from: f32, to: f32, elapsed_ms: u32) {
        if self.disposed {
            return;
        }
        let ms = elapsed_ms.max(1) as f32;
        let per_frame = (to - from) / ms * 1000.0 / FRAME_RATE;
        self.velocity = per_frame.clamp(-MAX_FLICK_VELOCITY, MAX_FLICK_VELOCITY);
        self.flight = Flight::Decaying;
        log::trace!("flick: velocity {:.2}/frame", self.velocity);
    }

    /// A new touch: stops any decay in flight where it is.
    pub fn pressed(&mut self) {
        if self.flight == Flight::Decaying {
            self.flight = Flight::Idle;
            self.velocity = 0.0;
        }
    }

    /// Advances decay by `dt`; true while still in flight.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.disposed || self.flight != Flight::Decaying {
            return false;
        }
        let frames = dt.as_secs_f32() * FRAME_RATE;
        if frames <= 0.0 {
            return true;
        }

        // Distance covered by `frames` whole frames of geometric decay, so a
        // long tick lands where the same time in short ticks would.
        let kept = FRICTION.powf(frames);
        let mut next = self.value + self.velocity * (1.0 - kept) / (1.0 - FRICTION);
        self.velocity *= kept;

        if self.trim {
            let clamped = self.clamped(next);
            if clamped != next {
                self.velocity = 0.0;
                next = clamped;
            }
        } else if next < self.min || next > self.max {
            let bound = self.clamped(next);
            self.velocity *= OVERSCROLL_DAMPING.powf(frames);
            let recovered = 1.0 - (1.0 - SPRING_BACK).powf(frames);
            next += (bound - next) * recovered;
            if (bound - next).abs() < SNAP_DISTANCE && self.velocity.abs() < MIN_VELOCITY {
                next = bound;
            }
        }

        if self.velocity.abs() < MIN_VELOCITY {
            self.velocity = 0.0;
        }
        self.set_value(next);

        if self.velocity == 0.0 && self.in_range(self.value) {
            self.flight = Flight::Idle;
        }
        self.flight == Flight::Decaying
    }

    /// Drops the callback and stops all motion. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.on_change = None;
        self.flight = Flight::Idle;
        self.velocity = 0.0;
    }

    fn drag(&mut self, delta: f32) {
        let next = self.value + delta;
        let next = if self.trim {
            self.clamped(next)
        } else if !self.in_range(next) || !self.in_range(self.value) {
            self.value + delta * OVERSCROLL_RESISTANCE
        } else {
            next
        };
        self.set_value(next);
    }

    /// Released without velocity: back into range at once.
    fn settle(&mut self) {
        self.flight = Flight::Idle;
        self.velocity = 0.0;
        self.set_value(self.clamped(self.value));
    }

    fn clamped(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }

    fn in_range(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn set_value(&mut self, v: f32) {
        if v == self.value {
            return;
        }
        self.value = v;
        if let Some(cb) = self.on_change.as_mut() {
            cb(v);
        }
    }
}

impl std::fmt::Debug for GestureInertia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureInertia")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("trim", &self.trim)
            .field("flight", &self.flight)
            .field("velocity", &self.velocity)
            .field("disposed", &self.disposed)
            .finish()
    }
}
