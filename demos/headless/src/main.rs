//! Builds a scrolling list, plays a drag and a flick through the host, and
//! logs every frame a backend would present.
//!
//! `RUST_LOG=debug cargo run -p headless`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use drift_core::*;
use drift_devtools::{FrameProbe, Hud};
use drift_ui::*;

const SURFACE: (u32, u32) = (480, 800);
const FRAME: Duration = Duration::from_micros(16_667);

/// Backend that only reports what it was handed.
#[derive(Default)]
struct LogBackend {
    size: (u32, u32),
    frames: u64,
}

impl RenderBackend for LogBackend {
    fn configure_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
    }

    fn frame(&mut self, scene: &Scene, cfg: FrameConfig) {
        if self.size == (0, 0) {
            return;
        }
        self.frames += 1;
        let images = scene
            .nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Image { .. }))
            .count();
        log::info!(
            "frame {}: {} nodes ({} images) at {}x{}",
            self.frames,
            scene.nodes.len(),
            images,
            cfg.width,
            cfg.height
        );
    }
}

fn fade_in(row: &Rc<RefCell<ColorBox>>) -> AnimationHandle {
    let row = Rc::downgrade(row);
    Tween::handle(0.0, 255.0, AnimationSpec::default(), move |alpha| {
        if let Some(row) = row.upgrade()
            && let Ok(mut r) = row.try_borrow_mut()
        {
            let color = r.color().with_alpha(alpha.round() as u8);
            r.set_color(color);
        }
    })
}

fn build_list() -> anyhow::Result<Rc<RefCell<Canvas>>> {
    let list = Canvas::new();
    for i in 0..60 {
        let shade = if i % 2 == 0 { 0x30 } else { 0x50 };
        let row = ColorBox::new(
            Rect::new(0.0, i as f32 * 48.0, 240.0, 48.0),
            Color::from_rgb(shade, shade, shade + 0x20),
        );
        if i < 8 {
            row.borrow_mut().base_mut().entrance_animation = Some(fade_in(&row));
        }
        list.borrow_mut().add_element(&(row as ElementRef))?;
        if i % 10 == 0 {
            let icon = ImageBox::with_alpha(
                Rect::new(8.0, i as f32 * 48.0 + 8.0, 32.0, 32.0),
                "icon.png",
            );
            list.borrow_mut().add_element(&(icon as ElementRef))?;
        }
    }
    Ok(list)
}

struct Demo {
    host: UiHost,
    backend: LogBackend,
    hud: Hud,
    clock: Duration,
}

impl Demo {
    fn present(&mut self) {
        let (w, h) = SURFACE;
        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, *self.host.scale(), w, h);
        let report = FrameProbe::measure(&mut ctx, |c| self.host.draw(c));
        let mut scene = self.host.finish(nodes, w, h);

        self.hud.report = Some(report);
        self.hud.frame();
        self.hud.overlay(&mut scene);
        self.backend.frame(&scene, FrameConfig { width: w, height: h });
    }

    fn pointer(&mut self, event: PointerEventKind, x: f32, y: f32, after: Duration) {
        self.clock += after;
        let e = PointerEvent::touch(event, Vec2::new(x, y), self.clock);
        if !self.host.handle_pointer(&e) {
            log::debug!("{event:?} at ({x}, {y}) not handled");
        }
        if self.host.needs_redraw() {
            self.present();
        }
    }

    /// Ticks until everything settles.
    fn run_until_idle(&mut self) {
        let mut frames = 0;
        while self.host.tick(FRAME) {
            self.clock += FRAME;
            if self.host.needs_redraw() {
                self.present();
            }
            frames += 1;
            if frames > 10_000 {
                log::warn!("still moving after {frames} frames, giving up");
                break;
            }
        }
        log::info!("settled after {frames} frames");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut registry = ScaleRegistry::default();
    registry.set_device_dpi(192.0)?;
    registry.set_design_dpi(96)?;
    let scale = registry.config()?;

    let list = build_list()?;
    let viewer = ScrollViewer::new(Rect::new(0.0, 0.0, 240.0, 400.0));
    {
        let mut v = viewer.borrow_mut();
        v.set_content(&(list.clone() as ElementRef))?;
        v.set_horizontal_scroll(false);
        v.show_scrollbars = true;
        v.draw_shadows = true;
        v.cache_panning = true;
    }

    let root = Canvas::new();
    root.borrow_mut().add_element(&(viewer.clone() as ElementRef))?;

    let mut backend = LogBackend::default();
    backend.configure_surface(SURFACE.0, SURFACE.1);
    let mut hud = Hud::new();
    hud.enabled = true;

    let mut demo = Demo {
        host: UiHost::new(root, scale),
        backend,
        hud,
        clock: Duration::ZERO,
    };
    let entrance = viewer.borrow().entrance_animation();
    if let Some(entrance) = entrance {
        demo.host.play(entrance);
    }
    demo.present();
    demo.run_until_idle();

    log::info!("slow drag up by 120 units");
    demo.pointer(PointerEventKind::Down, 100.0, 300.0, Duration::ZERO);
    for step in 1..=6 {
        demo.pointer(PointerEventKind::Move, 100.0, 300.0 - step as f32 * 20.0, FRAME * 3);
    }
    demo.pointer(PointerEventKind::Up, 100.0, 180.0, Duration::from_millis(400));
    demo.run_until_idle();
    log::info!("offset after drag: {}", viewer.borrow().vertical_offset());

    log::info!("flick up");
    demo.pointer(PointerEventKind::Down, 100.0, 350.0, Duration::from_millis(500));
    demo.pointer(PointerEventKind::Move, 100.0, 250.0, Duration::from_millis(40));
    demo.pointer(PointerEventKind::Up, 100.0, 150.0, Duration::from_millis(40));
    demo.run_until_idle();
    log::info!("offset after flick: {}", viewer.borrow().vertical_offset());

    log::info!("{}", demo.hud.summary());
    viewer.borrow_mut().teardown();
    Ok(())
}
