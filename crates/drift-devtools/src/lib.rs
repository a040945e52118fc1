//! Frame probe and HUD.
//!
//! [`FrameProbe`] sits between an element tree and the real drawing context
//! and counts what gets drawn; [`Hud`] keeps a smoothed frame rate and paints
//! a small meter into the scene.

use std::cell::Cell;
use std::rc::Rc;

use drift_core::*;
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawMetrics {
    pub fills: usize,
    pub images: usize,
    pub children: usize,
    pub clip_buffers: usize,
    pub bitmaps: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameReport {
    pub metrics: DrawMetrics,
    pub draw_time: Duration,
}

enum Inner<'a> {
    Borrowed(&'a mut dyn DrawingContext),
    Owned(Box<dyn DrawingContext + 'a>),
}

/// Counting wrapper around a [`DrawingContext`]. Child contexts and clip
/// buffers it hands out are wrapped too and share the same counters.
pub struct FrameProbe<'a> {
    inner: Inner<'a>,
    metrics: Rc<Cell<DrawMetrics>>,
}

impl<'a> FrameProbe<'a> {
    pub fn new(inner: &'a mut dyn DrawingContext) -> Self {
        Self {
            inner: Inner::Borrowed(inner),
            metrics: Rc::default(),
        }
    }

    /// Runs `draw` against a probe over `ctx` and reports what it did.
    pub fn measure(
        ctx: &mut dyn DrawingContext,
        draw: impl FnOnce(&mut dyn DrawingContext),
    ) -> FrameReport {
        let mut probe = FrameProbe::new(ctx);
        let started = Instant::now();
        draw(&mut probe);
        let report = FrameReport {
            metrics: probe.metrics(),
            draw_time: started.elapsed(),
        };
        log::trace!("frame probe: {report:?}");
        report
    }

    pub fn metrics(&self) -> DrawMetrics {
        self.metrics.get()
    }

    fn ctx(&mut self) -> &mut dyn DrawingContext {
        match &mut self.inner {
            Inner::Borrowed(c) => &mut **c,
            Inner::Owned(c) => &mut **c,
        }
    }

    fn bump(&self, f: impl FnOnce(&mut DrawMetrics)) {
        let mut m = self.metrics.get();
        f(&mut m);
        self.metrics.set(m);
    }
}

impl DrawingContext for FrameProbe<'_> {
    fn scale(&self) -> &ScaleConfig {
        match &self.inner {
            Inner::Borrowed(c) => c.scale(),
            Inner::Owned(c) => c.scale(),
        }
    }

    fn visible_rect(&self) -> Rect {
        match &self.inner {
            Inner::Borrowed(c) => c.visible_rect(),
            Inner::Owned(c) => c.visible_rect(),
        }
    }

    fn create_child(
        &mut self,
        offset: Vec2,
        transformation: Transformation,
    ) -> Box<dyn DrawingContext + '_> {
        self.bump(|m| m.children += 1);
        let metrics = self.metrics.clone();
        let child = self.ctx().create_child(offset, transformation);
        Box::new(FrameProbe {
            inner: Inner::Owned(child),
            metrics,
        })
    }

    fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        self.bump(|m| m.fills += 1);
        self.ctx().fill_rectangle(rect, color);
    }

    fn draw_image(&mut self, name: &str, rect: Rect) {
        self.bump(|m| m.images += 1);
        self.ctx().draw_image(name, rect);
    }

    fn draw_alpha_image(&mut self, name: &str, rect: Rect) {
        self.bump(|m| m.images += 1);
        self.ctx().draw_alpha_image(name, rect);
    }

    fn with_clip_buffer(
        &mut self,
        rect: Rect,
        reusable: Option<Bitmap>,
        draw: &mut dyn FnMut(&mut dyn DrawingContext),
    ) -> Bitmap {
        self.bump(|m| m.clip_buffers += 1);
        let metrics = self.metrics.clone();
        self.ctx()
            .with_clip_buffer(rect, reusable, &mut |buffer: &mut dyn DrawingContext| {
                let mut probe = FrameProbe {
                    inner: Inner::Borrowed(buffer),
                    metrics: metrics.clone(),
                };
                draw(&mut probe);
            })
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, at: Vec2) {
        self.bump(|m| m.bitmaps += 1);
        self.ctx().draw_bitmap(bitmap, at);
    }
}

/// Width of the fps meter at 60 fps, in physical pixels.
const METER_WIDTH: f32 = 120.0;
const METER_HEIGHT: f32 = 4.0;

pub struct Hud {
    pub enabled: bool,
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
    pub report: Option<FrameReport>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            enabled: false,
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
            report: None,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps_smooth
    }

    pub fn frame(&mut self) {
        self.frame_at(Instant::now());
    }

    /// Counts a frame presented at `now`.
    pub fn frame_at(&mut self, now: Instant) {
        self.frame_count += 1;
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = now.saturating_duration_since(prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("frame: {}", self.frame_count),
            format!("fps: {:.1}", self.fps_smooth),
        ];
        if let Some(r) = &self.report {
            parts.push(format!(
                "draw: {:.2} ms",
                r.draw_time.as_secs_f64() * 1000.0
            ));
            parts.push(format!(
                "fills: {}, images: {}, buffers: {}",
                r.metrics.fills, r.metrics.images, r.metrics.clip_buffers
            ));
        }
        parts.join("  |  ")
    }

    /// Appends the fps meter to `scene` when enabled.
    pub fn overlay(&mut self, scene: &mut Scene) {
        if !self.enabled {
            return;
        }
        let share = (self.fps_smooth / 60.0).clamp(0.0, 1.0);
        let color = if share >= 0.9 {
            Color::from_hex("#44CC66")
        } else {
            Color::from_hex("#DD4444")
        };
        scene.nodes.push(SceneNode::Rect {
            rect: Rect::new(8.0, 8.0, METER_WIDTH, METER_HEIGHT),
            color: Color::from_hex("#333333"),
        });
        scene.nodes.push(SceneNode::Rect {
            rect: Rect::new(8.0, 8.0, METER_WIDTH * share, METER_HEIGHT),
            color,
        });
        log::debug!("{}", self.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_counts_nested_draws() {
        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 100);
        let report = FrameProbe::measure(&mut ctx, |c| {
            c.fill_rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
            {
                let mut child = c.create_child(Vec2::new(5.0, 5.0), Transformation::default());
                child.draw_image("a.png", Rect::new(0.0, 0.0, 4.0, 4.0));
            }
            let mut fill = |b: &mut dyn DrawingContext| {
                b.fill_rectangle(Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLACK);
            };
            c.with_clip_buffer(Rect::new(0.0, 0.0, 50.0, 50.0), None, &mut fill);
        });
        assert_eq!(
            report.metrics,
            DrawMetrics {
                fills: 2,
                images: 1,
                children: 1,
                clip_buffers: 1,
                bitmaps: 0,
            }
        );
        // Drawing still reaches the wrapped context.
        assert_eq!(nodes.len(), 5);
    }

    #[test]
    fn test_hud_smooths_fps() {
        let mut hud = Hud::new();
        let t0 = Instant::now();
        hud.frame_at(t0);
        hud.frame_at(t0 + Duration::from_millis(20));
        assert!((hud.fps() - 50.0).abs() < 0.5);
        hud.frame_at(t0 + Duration::from_millis(30));
        // 0.8 * 50 + 0.2 * 100
        assert!((hud.fps() - 60.0).abs() < 0.5);
        assert_eq!(hud.frame_count(), 3);
    }

    #[test]
    fn test_hud_overlay_only_when_enabled() {
        let mut hud = Hud::new();
        let mut scene = Scene::default();
        hud.overlay(&mut scene);
        assert!(scene.nodes.is_empty());

        hud.toggle();
        hud.overlay(&mut scene);
        assert_eq!(scene.nodes.len(), 2);
    }
}
