#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::error::ConfigError;
    use crate::scaling::*;
    use crate::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn test_update_signal_single_slot() {
        let sig = UpdateSignal::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let f = first.clone();
        sig.attach(Rc::new(move || f.set(f.get() + 1)));
        let s = second.clone();
        sig.attach(Rc::new(move || s.set(s.get() + 1)));

        sig.notify();
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);

        sig.detach();
        sig.notify();
        assert_eq!(second.get(), 1);
        assert!(!sig.is_attached());
    }

    #[test]
    fn test_update_signal_forwarder_chains_upwards() {
        let parent = UpdateSignal::new();
        let child = UpdateSignal::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        parent.attach(Rc::new(move || h.set(h.get() + 1)));
        child.attach(parent.forwarder());

        child.notify();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_rect_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(2.0, 2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_transform_for_child_scales_about_center() {
        let t = Transform::for_child(
            Vec2::new(100.0, 0.0),
            Transformation::scaled(0.5, Vec2::new(20.0, 20.0)),
        );
        // The center is a fixed point of the scaling.
        assert_eq!(
            t.apply_to_point(Vec2::new(20.0, 20.0)),
            Vec2::new(120.0, 20.0)
        );
        let r = t.apply_to_rect(Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(r, Rect::new(110.0, 10.0, 20.0, 20.0));
        assert_eq!(t.unapply_to_rect(r), Rect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_scale_registry_requires_initialization() {
        let reg = ScaleRegistry::default();
        assert_eq!(reg.config(), Err(ConfigError::NotInitialized));
        assert!(!reg.is_initialized());
    }

    #[test]
    fn test_scale_registry_device_dpi_set_once() {
        let mut reg = ScaleRegistry::default();
        reg.set_device_dpi(192.0).unwrap();
        assert_eq!(reg.set_device_dpi(96.0), Err(ConfigError::AlreadySet(192.0)));

        // Design dpi defaults to the device dpi.
        let cfg = reg.config().unwrap();
        assert_eq!(cfg.factor(), 1.0);

        reg.set_design_dpi(96).unwrap();
        let cfg = reg.config().unwrap();
        assert_eq!(cfg.factor(), 2.0);
        assert_eq!(cfg.scale_to_logic(50.0), 25.0);
        assert_eq!(cfg.points_to_pixels(10.0), 38.4);
    }

    #[test]
    fn test_scale_config_rejects_non_positive_dpi() {
        assert_eq!(
            ScaleConfig::new(0.0, 96.0),
            Err(ConfigError::NonPositiveDpi(0.0))
        );
        let mut reg = ScaleRegistry::default();
        assert!(reg.set_device_dpi(-1.0).is_err());
        assert!(reg.set_design_dpi(0).is_err());
        // A rejected value does not count as established.
        assert!(reg.set_device_dpi(96.0).is_ok());
    }

    #[test]
    fn test_scene_context_clips_to_surface() {
        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 50, 50);
        ctx.fill_rectangle(Rect::new(40.0, 40.0, 20.0, 20.0), Color::BLACK);
        ctx.fill_rectangle(Rect::new(60.0, 0.0, 5.0, 5.0), Color::BLACK);
        assert_eq!(
            nodes,
            vec![SceneNode::Rect {
                rect: Rect::new(40.0, 40.0, 10.0, 10.0),
                color: Color::BLACK
            }]
        );
    }

    #[test]
    fn test_scene_context_child_visible_rect_is_local() {
        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 80);
        let child = ctx.create_child(Vec2::new(30.0, -20.0), Transformation::default());
        assert_eq!(child.visible_rect(), Rect::new(-30.0, 20.0, 100.0, 80.0));
    }

    #[test]
    fn test_scene_context_records_physical_pixels() {
        let scale = ScaleConfig::new(192.0, 96.0).unwrap();
        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, scale, 200, 200);
        ctx.draw_alpha_image("top.png", Rect::new(0.0, 0.0, 50.0, 15.0));
        assert_eq!(
            nodes,
            vec![SceneNode::Image {
                rect: Rect::new(0.0, 0.0, 100.0, 30.0),
                name: "top.png".into(),
                alpha: true,
                clip: Rect::new(0.0, 0.0, 200.0, 200.0),
            }]
        );
    }

    #[test]
    fn test_clip_buffer_is_reused_when_size_matches() {
        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 100);
        let area = Rect::new(10.0, 10.0, 40.0, 30.0);
        let mut draw = |c: &mut dyn DrawingContext| {
            c.fill_rectangle(Rect::new(0.0, 0.0, 100.0, 5.0), Color::WHITE);
        };
        let first = ctx.with_clip_buffer(area, None, &mut draw);
        assert_eq!((first.width, first.height), (40, 30));
        // Content is clipped to the buffer.
        assert_eq!(
            first.nodes(),
            &[SceneNode::Rect {
                rect: Rect::new(0.0, 0.0, 40.0, 5.0),
                color: Color::WHITE
            }]
        );
        let second = ctx.with_clip_buffer(area, Some(first), &mut draw);
        assert_eq!(second.nodes().len(), 1);

        insta::assert_debug_snapshot!(nodes.len(), @"6");
    }

    #[test]
    fn test_scene_mirroring() {
        let scale = ScaleConfig::identity().with_mirroring(true, false);
        let mut scene = Scene {
            clear_color: Color::BLACK,
            nodes: vec![SceneNode::Rect {
                rect: Rect::new(0.0, 10.0, 20.0, 5.0),
                color: Color::WHITE,
            }],
        };
        scene.mirror(&scale, 100.0, 100.0);
        assert_eq!(
            scene.nodes[0],
            SceneNode::Rect {
                rect: Rect::new(80.0, 10.0, 20.0, 5.0),
                color: Color::WHITE
            }
        );
    }

    #[test]
    fn test_animated_value_advances_deterministically() {
        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);
        assert!(a.advance(Duration::from_millis(250)));
        assert!((*a.get() - 2.5).abs() < 0.01);

        assert!(!a.advance(Duration::from_millis(750)));
        assert!((*a.get() - 10.0).abs() < 0.001);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_group_runs_until_last_member_finishes() {
        let short = Tween::handle(0.0, 1.0, AnimationSpec::fast(), |_| {});
        let long = Tween::handle(0.0, 1.0, AnimationSpec::slow(), |_| {});
        let group = AnimationGroup::new([short.clone(), long.clone()]);

        group.start();
        assert!(group.is_running());
        assert!(group.advance(Duration::from_millis(200)));
        assert!(!short.is_running());
        assert!(long.is_running());
        assert!(!group.advance(Duration::from_millis(400)));
        assert!(!group.is_running());
    }

    #[test]
    fn test_forwarding_animation_builds_at_start() {
        let live: Rc<RefCell<Vec<AnimationHandle>>> = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::new(Cell::new(0.0f32));

        let fwd = {
            let live = live.clone();
            ForwardingAnimation::new(move || {
                Some(Rc::new(AnimationGroup::new(live.borrow().iter().cloned())) as AnimationHandle)
            })
        };

        // Added after the forwarder was built; still picked up.
        let s = seen.clone();
        live.borrow_mut().push(Tween::handle(
            0.0,
            4.0,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
            move |v| s.set(v),
        ));

        assert!(!fwd.is_running());
        fwd.start();
        assert!(fwd.is_running());
        fwd.advance(Duration::from_millis(100));
        assert_eq!(seen.get(), 4.0);
        assert!(!fwd.is_running());
    }
}
