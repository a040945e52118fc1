//! # Animation capability
//!
//! Elements carry optional entrance/exit animations as opaque
//! [`AnimationHandle`]s. The tree never looks inside one; it only starts
//! them, groups them, and forwards to them. Time is pushed in by the host
//! through [`Animation::advance`], the same way inertia decay is ticked.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    pub fn fast() -> Self {
        Self::tween(Duration::from_millis(150), Easing::EaseOut)
    }

    pub fn slow() -> Self {
        Self::tween(Duration::from_millis(600), Easing::EaseInOut)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Value that transitions towards a target as time is pushed into it.
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    elapsed: Option<Duration>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            elapsed: None,
        }
    }

    pub fn set_target(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        self.elapsed = Some(Duration::ZERO);
    }

    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.start = value.clone();
        self.target = value;
        self.elapsed = None;
    }

    /// Returns true while still animating.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(elapsed) = self.elapsed else {
            return false;
        };
        let elapsed = elapsed + dt;
        self.elapsed = Some(elapsed);

        if elapsed < self.spec.delay {
            return true;
        }
        let animation_time = elapsed - self.spec.delay;
        if animation_time >= self.spec.duration {
            self.current = self.target.clone();
            self.elapsed = None;
            return false;
        }

        let t = animation_time.as_secs_f32() / self.spec.duration.as_secs_f32();
        let eased_t = self.spec.easing.interpolate(t);
        self.current = self.start.interpolate(&self.target, eased_t);
        true
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn is_animating(&self) -> bool {
        self.elapsed.is_some()
    }
}

pub trait Animation {
    fn start(&self);
    fn stop(&self);
    fn is_running(&self) -> bool;
    /// Pushes time into the animation; returns true while it is running.
    fn advance(&self, dt: Duration) -> bool;
}

pub type AnimationHandle = Rc<dyn Animation>;

/// Runs its members jointly: all start together, and the group runs until
/// the last member finishes.
#[derive(Default)]
pub struct AnimationGroup {
    members: Vec<AnimationHandle>,
}

impl AnimationGroup {
    pub fn new(members: impl IntoIterator<Item = AnimationHandle>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Animation for AnimationGroup {
    fn start(&self) {
        for m in &self.members {
            m.start();
        }
    }

    fn stop(&self) {
        for m in &self.members {
            m.stop();
        }
    }

    fn is_running(&self) -> bool {
        self.members.iter().any(|m| m.is_running())
    }

    fn advance(&self, dt: Duration) -> bool {
        let mut running = false;
        for m in &self.members {
            if m.is_running() {
                running |= m.advance(dt);
            }
        }
        running
    }
}

/// Builds the animation it stands for when started, so it always reflects
/// the state of whatever produced it at that moment.
pub struct ForwardingAnimation {
    factory: Box<dyn Fn() -> Option<AnimationHandle>>,
    current: RefCell<Option<AnimationHandle>>,
}

impl ForwardingAnimation {
    pub fn new(factory: impl Fn() -> Option<AnimationHandle> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            current: RefCell::new(None),
        }
    }

    pub fn handle(factory: impl Fn() -> Option<AnimationHandle> + 'static) -> AnimationHandle {
        Rc::new(Self::new(factory))
    }

    fn current(&self) -> Option<AnimationHandle> {
        self.current.borrow().clone()
    }
}

impl Animation for ForwardingAnimation {
    fn start(&self) {
        let built = (self.factory)();
        *self.current.borrow_mut() = built.clone();
        if let Some(a) = built {
            a.start();
        }
    }

    fn stop(&self) {
        if let Some(a) = self.current() {
            a.stop();
        }
    }

    fn is_running(&self) -> bool {
        self.current().is_some_and(|a| a.is_running())
    }

    fn advance(&self, dt: Duration) -> bool {
        self.current().is_some_and(|a| a.advance(dt))
    }
}

/// Scalar tween reporting every value through a callback.
pub struct Tween {
    from: f32,
    to: f32,
    value: RefCell<AnimatedValue<f32>>,
    on_value: Box<dyn Fn(f32)>,
}

impl Tween {
    pub fn new(from: f32, to: f32, spec: AnimationSpec, on_value: impl Fn(f32) + 'static) -> Self {
        Self {
            from,
            to,
            value: RefCell::new(AnimatedValue::new(from, spec)),
            on_value: Box::new(on_value),
        }
    }

    pub fn handle(
        from: f32,
        to: f32,
        spec: AnimationSpec,
        on_value: impl Fn(f32) + 'static,
    ) -> AnimationHandle {
        Rc::new(Self::new(from, to, spec, on_value))
    }
}

impl Animation for Tween {
    fn start(&self) {
        {
            let mut v = self.value.borrow_mut();
            v.snap_to(self.from);
            v.set_target(self.to);
        }
        (self.on_value)(self.from);
    }

    fn stop(&self) {
        let mut v = self.value.borrow_mut();
        let at = *v.get();
        v.snap_to(at);
    }

    fn is_running(&self) -> bool {
        self.value.borrow().is_animating()
    }

    fn advance(&self, dt: Duration) -> bool {
        let (running, current) = {
            let mut v = self.value.borrow_mut();
            let running = v.advance(dt);
            (running, *v.get())
        };
        (self.on_value)(current);
        running
    }
}
