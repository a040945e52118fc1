#[cfg(test)]
mod tests {
    use crate::*;
    use drift_core::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_micros(16_667);

    /// Leaf that logs its draws.
    struct Probe {
        base: ElementBase,
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Element for Probe {
        fn base(&self) -> &ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ElementBase {
            &mut self.base
        }

        fn draw(&mut self, _ctx: &mut dyn DrawingContext) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn probe(bounds: Rect, name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> ElementRef {
        element_ref(|this| Probe {
            base: ElementBase::new(this.clone()).with_bounds(bounds),
            name,
            log: log.clone(),
        })
    }

    fn color_box(bounds: Rect) -> ElementRef {
        ColorBox::new(bounds, Color::WHITE)
    }

    fn viewer_over(content: Size) -> (Rc<RefCell<ScrollViewer>>, ElementRef) {
        let viewer = ScrollViewer::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let content = color_box(Rect::from_origin_size(Vec2::ZERO, content));
        viewer.borrow_mut().set_content(&content).unwrap();
        (viewer, content)
    }

    fn settle(viewer: &Rc<RefCell<ScrollViewer>>) {
        for _ in 0..2000 {
            if !viewer.borrow_mut().tick(FRAME) {
                return;
            }
        }
        panic!("viewer never settled");
    }

    fn summary(nodes: &[SceneNode]) -> String {
        nodes
            .iter()
            .map(|n| match n {
                SceneNode::Rect { rect, .. } => {
                    format!("rect {} {} {} {}", rect.x, rect.y, rect.w, rect.h)
                }
                SceneNode::Image { rect, name, .. } => {
                    format!("image {name} {} {} {} {}", rect.x, rect.y, rect.w, rect.h)
                }
                SceneNode::PushClip { rect } => {
                    format!("clip {} {} {} {}", rect.x, rect.y, rect.w, rect.h)
                }
                SceneNode::PopClip => "unclip".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    #[test]
    fn test_canvas_size_is_running_max_and_never_shrinks() {
        let canvas = Canvas::new();
        let big = color_box(Rect::new(100.0, 10.0, 20.0, 100.0));
        let mut c = canvas.borrow_mut();

        c.add_element(&color_box(Rect::new(0.0, 0.0, 50.0, 50.0))).unwrap();
        assert_eq!(c.base().size(), Size::new(50.0, 50.0));
        c.add_element(&big).unwrap();
        assert_eq!(c.base().size(), Size::new(120.0, 110.0));
        c.add_element(&color_box(Rect::new(0.0, 0.0, 10.0, 10.0))).unwrap();
        assert_eq!(c.base().size(), Size::new(120.0, 110.0));

        assert!(c.remove_element(&big));
        assert_eq!(c.base().size(), Size::new(120.0, 110.0));
        c.shrink_to_children();
        assert_eq!(c.base().size(), Size::new(50.0, 50.0));
    }

    #[test]
    fn test_canvas_add_is_idempotent() {
        let canvas = Canvas::new();
        let e = color_box(Rect::new(0.0, 0.0, 10.0, 10.0));
        canvas.borrow_mut().add_element(&e).unwrap();
        canvas.borrow_mut().add_element(&e).unwrap();
        assert_eq!(canvas.borrow().base().children().len(), 1);

        let parent = e.borrow().base().parent().unwrap();
        assert!(same_element(&parent, &(canvas.clone() as ElementRef)));
    }

    #[test]
    fn test_canvas_add_after_sibling() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (a, b, c, stray) = (
            probe(r, "a", &log),
            probe(r, "b", &log),
            probe(r, "c", &log),
            probe(r, "stray", &log),
        );
        let canvas = Canvas::new();
        {
            let mut canvas = canvas.borrow_mut();
            canvas.add_element(&a).unwrap();
            canvas.add_element(&b).unwrap();
            canvas.add_element_after(&c, &a).unwrap();
            canvas.add_element_after(&stray, &color_box(r)).unwrap();
        }

        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 100);
        canvas.borrow_mut().draw(&mut ctx);
        assert_eq!(*log.borrow(), vec!["a", "c", "b", "stray"]);
    }

    #[test]
    fn test_canvas_child_by_id() {
        let canvas = Canvas::new();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let first: ElementRef = ColorBox::with_id(r, Color::WHITE, "row");
        let second: ElementRef = ColorBox::with_id(r, Color::BLACK, "row");
        canvas.borrow_mut().add_element(&first).unwrap();
        canvas.borrow_mut().add_element(&second).unwrap();

        let found = canvas.borrow().child("row").unwrap();
        assert!(same_element(&found, &first));
        assert!(canvas.borrow().child("missing").is_none());
    }

    #[test]
    fn test_canvas_culls_children_outside_visible_rect() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let canvas = Canvas::new();
        for (i, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
            let e = probe(Rect::new(i as f32 * 100.0, 0.0, 100.0, 100.0), name, &log);
            canvas.borrow_mut().add_element(&e).unwrap();
        }

        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 150, 100);
        {
            let mut child = ctx.create_child(Vec2::new(-120.0, 0.0), Transformation::default());
            assert_eq!(child.visible_rect(), Rect::new(120.0, 0.0, 150.0, 100.0));
            canvas.borrow_mut().draw(&mut *child);
        }
        assert_eq!(*log.borrow(), vec!["b", "c"]);
    }

    #[test]
    fn test_canvas_skips_zero_size_children() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let canvas = Canvas::new();
        canvas
            .borrow_mut()
            .add_element(&probe(Rect::new(10.0, 10.0, 0.0, 0.0), "empty", &log))
            .unwrap();
        canvas
            .borrow_mut()
            .add_element(&probe(Rect::new(10.0, 10.0, 5.0, 5.0), "dot", &log))
            .unwrap();

        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 100);
        canvas.borrow_mut().draw(&mut ctx);
        assert_eq!(*log.borrow(), vec!["dot"]);
    }

    #[test]
    fn test_element_cannot_join_two_containers() {
        let a = Canvas::new();
        let b = Canvas::new();
        let e = color_box(Rect::new(0.0, 0.0, 10.0, 10.0));
        a.borrow_mut().add_element(&e).unwrap();
        assert_eq!(
            b.borrow_mut().add_element(&e),
            Err(TreeError::AlreadyAttached)
        );

        assert!(a.borrow_mut().remove_element(&e));
        assert!(e.borrow().base().parent().is_none());
        b.borrow_mut().add_element(&e).unwrap();
    }

    #[test]
    fn test_updates_bubble_to_host() {
        let root = Canvas::new();
        let leaf = ColorBox::new(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        let inner = Canvas::new();
        inner.borrow_mut().add_element(&(leaf.clone() as ElementRef)).unwrap();
        root.borrow_mut().add_element(&(inner.clone() as ElementRef)).unwrap();

        let mut host = UiHost::new(root, ScaleConfig::identity());
        assert!(host.needs_redraw());
        host.render(100, 100);
        assert!(!host.needs_redraw());

        leaf.borrow_mut().set_color(Color::BLACK);
        assert!(host.needs_redraw());
    }

    #[test]
    fn test_pan_resolves_dominant_axis() {
        let (viewer, _content) = viewer_over(Size::new(500.0, 500.0));
        let mut to = Vec2::new(10.0, 2.0);
        assert!(viewer.borrow_mut().pan(Vec2::ZERO, &mut to, false, Vec2::ZERO));
        assert_eq!(to, Vec2::new(0.0, 2.0));
        assert_eq!(viewer.borrow().last_gesture_axis(), Axis::Horizontal);
    }

    #[test]
    fn test_pan_ties_follow_previous_axis() {
        let (viewer, _content) = viewer_over(Size::new(500.0, 500.0));
        let mut v = viewer.borrow_mut();

        let mut to = Vec2::new(-10.0, -2.0);
        v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO);
        let mut to = Vec2::new(-3.0, -3.0);
        v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO);
        assert_eq!(v.last_gesture_axis(), Axis::Horizontal);
        assert_eq!(to, Vec2::new(0.0, -3.0));

        let mut to = Vec2::new(0.0, -5.0);
        v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO);
        let mut to = Vec2::new(-4.0, -4.0);
        v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO);
        assert_eq!(v.last_gesture_axis(), Axis::Vertical);
        assert_eq!(to, Vec2::new(-4.0, 0.0));
    }

    #[test]
    fn test_disabled_axis_is_not_consumed() {
        let (viewer, _content) = viewer_over(Size::new(500.0, 500.0));
        let mut v = viewer.borrow_mut();
        v.set_horizontal_scroll(false);

        let mut to = Vec2::new(-10.0, 2.0);
        assert!(!v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO));
        assert_eq!(to, Vec2::new(-10.0, 2.0));
        assert_eq!(v.horizontal_offset(), 0.0);
        // Still a pan for cached drawing, even if nothing moved.
        assert!(v.is_panning());

        let mut to = Vec2::new(-10.0, 2.0);
        assert!(!v.flick(Vec2::ZERO, &mut to, 40, Vec2::ZERO));
        assert_eq!(v.horizontal_offset(), 0.0);
        assert!(!v.is_panning());
    }

    #[test]
    fn test_disabled_axis_release_settles_other_axis() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 2000.0));
        let mut v = viewer.borrow_mut();
        v.set_horizontal_scroll(false);

        let mut to = Vec2::new(0.0, -30.0);
        assert!(v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO));
        assert_eq!(v.vertical_offset(), -30.0);

        // The release resolves to the disabled axis; the vertical drag still ends.
        let mut to = Vec2::new(-20.0, -30.0);
        assert!(!v.pan(Vec2::new(0.0, -30.0), &mut to, true, Vec2::ZERO));
        assert!(!v.is_panning());
        assert!(!v.tick(FRAME));
        assert_eq!(v.vertical_offset(), -30.0);
    }

    #[test]
    fn test_disabled_axis_release_keeps_other_axis_decaying() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 2000.0));
        let mut v = viewer.borrow_mut();
        v.set_horizontal_scroll(false);

        let mut to = Vec2::new(0.0, -200.0);
        assert!(v.flick(Vec2::ZERO, &mut to, 100, Vec2::ZERO));
        assert!(v.tick(FRAME));
        let offset = v.vertical_offset();

        let mut to = Vec2::new(-20.0, 0.0);
        assert!(!v.pan(Vec2::ZERO, &mut to, true, Vec2::ZERO));
        assert!(v.tick(FRAME));
        assert!(v.vertical_offset() < offset);
    }

    #[test]
    fn test_offset_set_mid_pan_keeps_settled_frame() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 300.0));
        viewer.borrow_mut().cache_panning = true;
        let draw = |nodes: &mut Vec<SceneNode>| {
            let mut ctx = SceneContext::new(nodes, ScaleConfig::identity(), 100, 100);
            viewer.borrow_mut().draw(&mut ctx);
        };
        draw(&mut Vec::new());

        let mut to = Vec2::new(0.0, -30.0);
        viewer
            .borrow_mut()
            .pan(Vec2::ZERO, &mut to, false, Vec2::ZERO);
        viewer.borrow_mut().set_vertical_offset(-50.0);
        assert!(viewer.borrow().is_panning());

        // The cached frame was taken at 0, so it shifts by the whole -50.
        let mut nodes = Vec::new();
        draw(&mut nodes);
        assert_eq!(summary(&nodes), "clip 0 0 100 50 | rect 0 -50 100 100 | unclip");
    }

    #[test]
    fn test_scrollbar_geometry() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 500.0));
        viewer.borrow_mut().set_vertical_offset(-50.0);
        let g = viewer.borrow().scrollbar_geometry();
        assert_eq!(g.bar, Rect::new(95.0, 10.0, 5.0, 20.0));
        assert_eq!(g.track, Rect::new(95.0, 0.0, 5.0, 100.0));
    }

    #[test]
    fn test_scrollbar_with_empty_content() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 0.0));
        let g = viewer.borrow().scrollbar_geometry();
        assert_eq!((g.bar.y, g.bar.h), (0.0, 0.0));
    }

    #[test]
    fn test_trimmed_offsets_stay_in_range() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 500.0));
        viewer.borrow_mut().trim_vertical_panning = true;

        {
            let mut v = viewer.borrow_mut();
            let mut to = Vec2::new(0.0, 100.0);
            assert!(v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO));
            assert_eq!(v.vertical_offset(), 0.0);

            let mut to = Vec2::new(0.0, -900.0);
            v.pan(Vec2::new(0.0, 100.0), &mut to, false, Vec2::ZERO);
            assert_eq!(v.vertical_offset(), -400.0);

            let mut to = Vec2::new(0.0, -900.0);
            v.pan(Vec2::new(0.0, -900.0), &mut to, true, Vec2::ZERO);
        }
        settle(&viewer);
        assert_eq!(viewer.borrow().vertical_offset(), -400.0);

        let mut to = Vec2::new(0.0, 400.0);
        viewer
            .borrow_mut()
            .flick(Vec2::ZERO, &mut to, 50, Vec2::ZERO);
        let mut v = viewer.borrow_mut();
        for _ in 0..2000 {
            let running = v.tick(FRAME);
            let offset = v.vertical_offset();
            assert!((-400.0..=0.0).contains(&offset), "offset {offset} escaped");
            if !running {
                break;
            }
        }
        assert_eq!(v.vertical_offset(), 0.0);
    }

    #[test]
    fn test_untrimmed_flick_springs_back_into_range() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 300.0));
        let mut to = Vec2::new(0.0, -400.0);
        viewer
            .borrow_mut()
            .flick(Vec2::ZERO, &mut to, 40, Vec2::ZERO);
        assert_eq!(to, Vec2::ZERO);
        settle(&viewer);
        let offset = viewer.borrow().vertical_offset();
        assert!((-200.0..=0.0).contains(&offset), "offset {offset}");
    }

    #[test]
    fn test_press_stops_decay() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 2000.0));
        let mut v = viewer.borrow_mut();
        let mut to = Vec2::new(0.0, -200.0);
        v.flick(Vec2::ZERO, &mut to, 100, Vec2::ZERO);
        assert!(v.tick(FRAME));
        let offset = v.vertical_offset();
        assert!(offset < 0.0);

        let hit = v.pressed(Vec2::new(10.0, 10.0));
        assert!(hit.is_some());
        assert!(!v.tick(FRAME));
        assert_eq!(v.vertical_offset(), offset);
    }

    #[test]
    fn test_teardown_twice_is_harmless() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 500.0));
        let mut v = viewer.borrow_mut();
        let mut to = Vec2::new(0.0, -200.0);
        v.flick(Vec2::ZERO, &mut to, 100, Vec2::ZERO);
        v.teardown();
        v.teardown();
        assert!(!v.tick(FRAME));
        assert_eq!(v.vertical_offset(), 0.0);
    }

    #[test]
    fn test_viewer_without_content_does_nothing() {
        let viewer = ScrollViewer::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut v = viewer.borrow_mut();
        assert!(v.content().is_none());

        let mut to = Vec2::new(0.0, -20.0);
        assert!(!v.pan(Vec2::ZERO, &mut to, false, Vec2::ZERO));
        assert!(!v.flick(Vec2::ZERO, &mut to, 20, Vec2::ZERO));

        let mut nodes = Vec::new();
        let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 100);
        v.draw(&mut ctx);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_set_content_replaces_previous() {
        let (viewer, old) = viewer_over(Size::new(100.0, 500.0));
        let new = color_box(Rect::new(0.0, 0.0, 100.0, 800.0));
        viewer.borrow_mut().set_content(&new).unwrap();

        let v = viewer.borrow();
        assert!(old.borrow().base().parent().is_none());
        assert_eq!(v.base().children().len(), 1);
        assert!(same_element(&v.content().unwrap(), &new));
    }

    #[test]
    fn test_cached_panning_shifts_last_frame() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 300.0));
        viewer.borrow_mut().cache_panning = true;

        let mut first = Vec::new();
        {
            let mut ctx = SceneContext::new(&mut first, ScaleConfig::identity(), 100, 100);
            viewer.borrow_mut().draw(&mut ctx);
        }
        assert_eq!(summary(&first), "clip 0 0 100 100 | rect 0 0 100 100 | unclip");

        let mut to = Vec2::new(0.0, -30.0);
        viewer
            .borrow_mut()
            .pan(Vec2::ZERO, &mut to, false, Vec2::ZERO);
        assert_eq!(viewer.borrow().vertical_offset(), -30.0);

        let mut second = Vec::new();
        {
            let mut ctx = SceneContext::new(&mut second, ScaleConfig::identity(), 100, 100);
            viewer.borrow_mut().draw(&mut ctx);
        }
        assert_eq!(summary(&second), "clip 0 0 100 70 | rect 0 -30 100 100 | unclip");
    }

    #[test]
    fn test_viewer_draws_scrollbar_and_shadows() {
        let (viewer, _content) = viewer_over(Size::new(100.0, 500.0));
        {
            let mut v = viewer.borrow_mut();
            v.show_scrollbars = true;
            v.draw_shadows = true;
            v.set_vertical_offset(-50.0);
        }

        let mut nodes = Vec::new();
        {
            let mut ctx = SceneContext::new(&mut nodes, ScaleConfig::identity(), 100, 100);
            viewer.borrow_mut().draw(&mut ctx);
        }
        insta::assert_snapshot!(
            summary(&nodes),
            @"clip 0 0 100 100 | rect 0 0 100 100 | image verticalscrollbar.png 95 0 5 100 | rect 95 10 5 20 | unclip | image top.png 0 0 100 15 | image bottom.png 0 85 100 15"
        );
        assert!(
            nodes
                .iter()
                .filter(|n| matches!(n, SceneNode::Image { .. }))
                .all(|n| matches!(n, SceneNode::Image { alpha: true, .. }))
        );
    }

    #[test]
    fn test_entrance_animation_reaches_content_children() {
        let seen = Rc::new(Cell::new(0.0f32));
        let leaf = color_box(Rect::new(0.0, 0.0, 10.0, 10.0));
        {
            let seen = seen.clone();
            leaf.borrow_mut().base_mut().entrance_animation = Some(Tween::handle(
                0.0,
                1.0,
                AnimationSpec::fast(),
                move |v| seen.set(v),
            ));
        }
        let list = Canvas::new();
        let viewer = ScrollViewer::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        viewer
            .borrow_mut()
            .set_content(&(list.clone() as ElementRef))
            .unwrap();
        // Added after the viewer's animation was built.
        list.borrow_mut().add_element(&leaf).unwrap();

        let entrance = viewer.borrow().entrance_animation().unwrap();
        entrance.start();
        assert!(entrance.is_running());
        assert!(!entrance.advance(Duration::from_millis(200)));
        assert_eq!(seen.get(), 1.0);
    }

    fn gesture_tree() -> (UiHost, Rc<RefCell<ScrollViewer>>) {
        let list = Canvas::new();
        for i in 0..10 {
            let row = color_box(Rect::new(0.0, i as f32 * 50.0, 100.0, 50.0));
            list.borrow_mut().add_element(&row).unwrap();
        }
        let viewer = ScrollViewer::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        viewer
            .borrow_mut()
            .set_content(&(list as ElementRef))
            .unwrap();
        let root = Canvas::new();
        root.borrow_mut()
            .add_element(&(viewer.clone() as ElementRef))
            .unwrap();
        (UiHost::new(root, ScaleConfig::identity()), viewer)
    }

    fn touch(event: PointerEventKind, x: f32, y: f32, ms: u64) -> PointerEvent {
        PointerEvent::touch(event, Vec2::new(x, y), Duration::from_millis(ms))
    }

    #[test]
    fn test_router_release_after_hold_stops_dead() {
        let (mut host, viewer) = gesture_tree();
        assert!(host.handle_pointer(&touch(PointerEventKind::Down, 50.0, 50.0, 0)));
        assert!(host.handle_pointer(&touch(PointerEventKind::Move, 50.0, 30.0, 50)));
        assert!(host.handle_pointer(&touch(PointerEventKind::Move, 50.0, 10.0, 100)));
        assert_eq!(viewer.borrow().vertical_offset(), -40.0);
        assert!(viewer.borrow().is_panning());

        assert!(host.handle_pointer(&touch(PointerEventKind::Up, 50.0, 10.0, 1000)));
        assert!(!viewer.borrow().is_panning());
        assert!(!host.tick(FRAME));
        assert_eq!(viewer.borrow().vertical_offset(), -40.0);
    }

    #[test]
    fn test_router_slow_release_while_moving_keeps_momentum() {
        let (mut host, viewer) = gesture_tree();
        host.handle_pointer(&touch(PointerEventKind::Down, 50.0, 50.0, 0));
        host.handle_pointer(&touch(PointerEventKind::Move, 50.0, 30.0, 200));
        assert!(host.handle_pointer(&touch(PointerEventKind::Up, 50.0, 20.0, 400)));
        assert_eq!(viewer.borrow().vertical_offset(), -30.0);

        assert!(host.tick(FRAME));
        assert!(viewer.borrow().vertical_offset() < -30.0);
    }

    #[test]
    fn test_router_quick_release_flicks() {
        let (mut host, viewer) = gesture_tree();
        host.handle_pointer(&touch(PointerEventKind::Down, 50.0, 90.0, 0));
        host.handle_pointer(&touch(PointerEventKind::Move, 50.0, 60.0, 50));
        assert!(host.handle_pointer(&touch(PointerEventKind::Up, 50.0, 40.0, 100)));

        let mut frames = 0;
        while host.tick(FRAME) {
            frames += 1;
            assert!(frames < 2000, "flick never settled");
        }
        let offset = viewer.borrow().vertical_offset();
        assert!(offset < -30.0);
        assert!((-400.0..=0.0).contains(&offset));
    }

    #[test]
    fn test_router_ignores_moves_without_press() {
        let (mut host, viewer) = gesture_tree();
        assert!(!host.handle_pointer(&touch(PointerEventKind::Move, 50.0, 10.0, 0)));
        assert_eq!(viewer.borrow().vertical_offset(), 0.0);
    }

    #[test]
    fn test_host_renders_physical_pixels() {
        let root = Canvas::new();
        root.borrow_mut()
            .add_element(&color_box(Rect::new(0.0, 0.0, 50.0, 20.0)))
            .unwrap();
        root.borrow_mut()
            .add_element(&(ColorBox::new(Rect::new(0.0, 20.0, 50.0, 20.0), Color::BLACK) as ElementRef))
            .unwrap();
        let scale = ScaleConfig::new(192.0, 96.0).unwrap();
        let mut host = UiHost::new(root, scale);

        let scene = host.render(200, 200);
        insta::assert_snapshot!(summary(&scene.nodes), @"rect 0 0 100 40 | rect 0 40 100 40");
    }
}
