//! End-to-end positioning scenarios.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anchorage_core::config::PositioningConfig;
use anchorage_core::fit::score;
use anchorage_core::geometry::{Point, Rect, Size};
use anchorage_core::host::{Callback, Direction, MeasuredElement, ScrollNotifier, Subscription, ViewportProvider};
use anchorage_core::preference::{presets, HorizontalAlign as X, PositionPreference, VerticalAlign as Y};
use anchorage_core::push::push_onto_screen;
use anchorage_core::request::RepositionRequest;
use anchorage_core::resolve::{place, ResolveInput};
use anchorage_core::session::{create_session, Host, SessionState};
use anchorage_core::style::StyleEmitter;
use nalgebra::Vector2;

/// Viewport whose size can change, with listeners the test can fire.
#[derive(Default)]
struct TestViewport {
    rect: Cell<Rect>,
    listeners: Rc<RefCell<Vec<Callback>>>,
}

impl TestViewport {
    fn new(rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(rect),
            listeners: Rc::default(),
        })
    }

    fn resize(&self, rect: Rect) {
        self.rect.set(rect);
        let listeners: Vec<Callback> = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ViewportProvider for TestViewport {
    fn viewport_rect(&self, margin: f64) -> Rect {
        self.rect.get().inset(margin)
    }

    fn on_change(&self, callback: Callback) -> Subscription {
        self.listeners.borrow_mut().push(callback.clone());
        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|l| !Rc::ptr_eq(l, &callback));
            }
        })
    }
}

impl ScrollNotifier for TestViewport {
    fn on_scroll(&self, callback: Callback) -> Subscription {
        self.on_change(callback)
    }
}

fn below() -> PositionPreference {
    PositionPreference::new(X::Start, Y::Bottom, X::Start, Y::Top)
}

fn above() -> PositionPreference {
    PositionPreference::new(X::Start, Y::Top, X::Start, Y::Bottom)
}

fn input<'a>(
    origin: Rect,
    overlay: Size,
    viewport: Rect,
    preferences: &'a [PositionPreference],
    direction: Direction,
) -> ResolveInput<'a> {
    ResolveInput {
        origin,
        overlay: Rect::from_point_size(Point::origin(), overlay),
        viewport,
        boundary: viewport,
        preferences,
        default_offset: Vector2::zeros(),
        direction,
        can_push: true,
    }
}

#[test]
fn test_scenario_a_first_preference_fits() {
    let origin = Rect::new(100.0, 100.0, 50.0, 20.0);
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let prefs = vec![below(), above()];
    let placement = place(&input(origin, Size::new(200.0, 100.0), viewport, &prefs, Direction::Ltr));

    assert_eq!(placement.index, Some(0));
    assert_eq!(placement.overlay_point, Point::new(100.0, 120.0));
    assert!(!placement.pushed);
    assert!(score(placement.overlay_point, placement.overlay_size, &viewport).is_completely_within_viewport);
}

#[test]
fn test_scenario_b_nothing_fits_so_best_candidate_is_pushed() {
    let origin = Rect::new(100.0, 100.0, 50.0, 20.0);
    let viewport = Rect::new(0.0, 0.0, 800.0, 130.0);
    // The gap above keeps the "above" candidate from touching the top edge exactly.
    let prefs = vec![below(), above().with_offset_y(-8.0)];
    let placement = place(&input(origin, Size::new(200.0, 100.0), viewport, &prefs, Direction::Ltr));

    // Below shows 10px of height, above shows 92px.
    assert_eq!(placement.index, Some(1));
    assert!(placement.pushed);
    assert!(placement.overlay_point.y >= 0.0 && placement.overlay_point.y <= 30.0);
    assert_eq!(placement.overlay_point.y, 0.0);
}

#[test]
fn test_scenario_c_reapply_keeps_preference_and_origin_point() {
    let viewport = TestViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let mut session = create_session(
        vec![below(), above()],
        PositioningConfig::default().with_viewport_margin(0.0),
        Host::new(viewport.clone()),
    );
    let origin = MeasuredElement::new(Rect::new(100.0, 300.0, 50.0, 20.0));
    let overlay = MeasuredElement::new(Rect::new(0.0, 0.0, 200.0, 100.0));
    session.apply(origin, overlay.clone());
    let first = session.last_placement().cloned().unwrap();
    assert_eq!(first.index, Some(0));

    // Re-resolving would flip above; reapplying must not.
    overlay.set_bounds(Rect::new(100.0, 320.0, 200.0, 300.0));
    let style = session.reapply_last_position().unwrap();
    let second = session.last_placement().unwrap();

    assert_eq!(second.preference, first.preference);
    assert_eq!(second.origin_point, first.origin_point);
    assert_eq!(second.overlay_size, Size::new(200.0, 300.0));
    assert!(second.pushed);
    assert_eq!(second.overlay_point, Point::new(100.0, 300.0));
    assert_eq!(style.top.as_deref(), Some("300px"));
}

#[test]
fn test_scenario_c_reapply_without_overflow_leaves_top_anchor() {
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let mut session = create_session(
        vec![below(), above()],
        PositioningConfig::default().with_viewport_margin(0.0),
        Host::new(Rc::new(viewport)),
    );
    let overlay = MeasuredElement::new(Rect::new(0.0, 0.0, 200.0, 100.0));
    let applied = session.apply(MeasuredElement::new(Rect::new(100.0, 100.0, 50.0, 20.0)), overlay.clone());
    overlay.set_bounds(Rect::new(100.0, 120.0, 200.0, 300.0));
    let reapplied = session.reapply_last_position().unwrap();
    assert_eq!(reapplied, applied);
    assert_eq!(session.last_placement().unwrap().overlay_size.y, 300.0);
}

#[test]
fn test_scenario_d_rtl_mirrors_ltr() {
    let viewport = Rect::new(0.0, 0.0, 300.0, 600.0);
    let overlay = Size::new(200.0, 100.0);
    let prefs = vec![below()];

    let ltr = place(&input(Rect::new(0.0, 100.0, 50.0, 20.0), overlay, viewport, &prefs, Direction::Ltr));
    let rtl = place(&input(Rect::new(250.0, 100.0, 50.0, 20.0), overlay, viewport, &prefs, Direction::Rtl));

    assert_eq!(ltr.overlay_point.x, 0.0);
    assert_eq!(rtl.overlay_point.x, 300.0 - ltr.overlay_point.x - overlay.x);
    assert_eq!(rtl.overlay_point.y, ltr.overlay_point.y);

    let emitter = StyleEmitter::default();
    let ltr_style = emitter.emit(&ltr, Direction::Ltr, 0.0);
    let rtl_style = emitter.emit(&rtl, Direction::Rtl, 0.0);
    assert_eq!(ltr_style.left.as_deref(), Some("0px"));
    assert_eq!(rtl_style.right.as_deref(), Some("0px"));
    assert_eq!(rtl_style.left, None);
}

#[test]
fn test_direction_symmetry_for_mirrored_origins() {
    let viewport = Rect::new(0.0, 0.0, 300.0, 600.0);
    let overlay = Size::new(80.0, 40.0);
    let prefs_list = [
        PositionPreference::new(X::Start, Y::Bottom, X::Start, Y::Top),
        PositionPreference::new(X::Start, Y::Bottom, X::End, Y::Top),
        PositionPreference::new(X::Center, Y::Top, X::Center, Y::Bottom),
        PositionPreference::new(X::End, Y::Center, X::Start, Y::Center),
    ];
    for origin_left in [10.0, 60.0, 120.0] {
        let origin = Rect::new(origin_left, 200.0, 50.0, 20.0);
        let mirrored = Rect::new(300.0 - origin.right, 200.0, 50.0, 20.0);
        for pref in &prefs_list {
            let prefs = std::slice::from_ref(pref);
            let mut ltr_input = input(origin, overlay, viewport, prefs, Direction::Ltr);
            let mut rtl_input = input(mirrored, overlay, viewport, prefs, Direction::Rtl);
            ltr_input.can_push = false;
            rtl_input.can_push = false;
            let ltr = place(&ltr_input);
            let rtl = place(&rtl_input);
            assert_eq!(rtl.overlay_point.x, 300.0 - ltr.overlay_point.x - overlay.x);
        }
    }
}

#[test]
fn test_first_fit_priority_ignores_later_candidates() {
    let origin = Rect::new(100.0, 100.0, 50.0, 20.0);
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let prefs = vec![
        // Fails: runs off the left edge.
        PositionPreference::new(X::Start, Y::Bottom, X::End, Y::Top),
        PositionPreference::new(X::End, Y::Bottom, X::Start, Y::Top),
        below(),
    ];
    let placement = place(&input(origin, Size::new(200.0, 100.0), viewport, &prefs, Direction::Ltr));
    assert_eq!(placement.index, Some(1));
    assert_eq!(placement.preference, prefs[1]);
}

#[test]
fn test_push_result_is_contained_whenever_overlay_is_smaller() {
    let viewport = Rect::new(8.0, 8.0, 784.0, 584.0);
    for (w, h) in [(200.0, 100.0), (784.0, 584.0), (1.5, 3.25), (500.0, 10.0)] {
        let overlay = Size::new(w, h);
        for start in [Point::new(-900.0, 0.0), Point::new(700.0, 590.0), Point::new(100.0, -50.0)] {
            let pushed = push_onto_screen(start, overlay, &viewport);
            assert!(score(pushed, overlay, &viewport).is_completely_within_viewport);
        }
    }
}

#[test]
fn test_degenerate_viewport_forces_push() {
    let viewport = Rect::new(0.0, 0.0, 12.0, 12.0);
    let mut session = create_session(
        vec![below()],
        PositioningConfig::default(),
        Host::new(Rc::new(viewport)),
    );
    session.apply(
        MeasuredElement::new(Rect::new(0.0, 0.0, 4.0, 4.0)),
        MeasuredElement::new(Rect::new(0.0, 0.0, 2.0, 2.0)),
    );
    let placement = session.last_placement().unwrap();
    assert!(placement.pushed);
    assert_eq!(placement.overlay_point, Point::new(8.0, 8.0));
}

#[test]
fn test_empty_preference_list_uses_overlay_position() {
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let mut session = create_session(
        Vec::new(),
        PositioningConfig::default().with_viewport_margin(0.0),
        Host::new(Rc::new(viewport)),
    );
    let style = session.apply(
        MeasuredElement::new(Rect::new(100.0, 100.0, 50.0, 20.0)),
        MeasuredElement::new(Rect::new(50.0, 580.0, 200.0, 100.0)),
    );
    assert_eq!(style.top.as_deref(), Some("500px"));
    assert_eq!(style.left.as_deref(), Some("50px"));
    assert!(session.last_placement().unwrap().pushed);
}

#[test]
fn test_notifications_are_coalesced_and_detach_unsubscribes() {
    let viewport = TestViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let host = Host::new(viewport.clone()).with_scroll(viewport.clone());
    let mut session = create_session(
        presets::below_then_above(),
        PositioningConfig::default().with_viewport_margin(0.0),
        host,
    );
    let origin = MeasuredElement::new(Rect::new(100.0, 300.0, 50.0, 20.0));
    let overlay = MeasuredElement::new(Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(session.process_pending(), None);

    session.apply(origin, overlay);
    assert_eq!(viewport.listener_count(), 2);

    viewport.resize(Rect::new(0.0, 0.0, 800.0, 380.0));
    viewport.resize(Rect::new(0.0, 0.0, 800.0, 350.0));
    // One ViewportChanged and one Scrolled, however many notifications arrived.
    assert_eq!(session.requests().len(), 2);

    let style = session.process_pending().unwrap();
    assert!(session.requests().is_empty());
    assert_eq!(session.last_placement().unwrap().index, Some(1));
    assert_eq!(style.bottom.as_deref(), Some("50px"));
    assert_eq!(session.process_pending(), None);

    session.requests().push(RepositionRequest::ContentResized);
    assert!(session.process_pending().is_some());

    session.detach();
    assert_eq!(viewport.listener_count(), 0);
    assert_eq!(session.state(), SessionState::Detached);
    viewport.resize(Rect::new(0.0, 0.0, 800.0, 600.0));
    assert_eq!(session.process_pending(), None);
}

#[test]
fn test_panel_attributes_follow_the_selected_preference() {
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let mut session = create_session(
        vec![
            below().with_panel_attribute("class", "panel-below"),
            above().with_panel_attribute("class", "panel-above"),
        ],
        PositioningConfig::default().with_viewport_margin(0.0),
        Host::new(Rc::new(viewport)),
    );
    let style = session.apply(
        MeasuredElement::new(Rect::new(100.0, 550.0, 50.0, 20.0)),
        MeasuredElement::new(Rect::new(0.0, 0.0, 200.0, 100.0)),
    );
    assert_eq!(style.panel_attributes["class"], "panel-above");
}
