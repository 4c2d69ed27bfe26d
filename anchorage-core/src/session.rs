// SPDX-License-Identifier: MIT OR Apache-2.0

//! Positioning sessions.
//!
//! A [Session] belongs to exactly one overlay. It measures origin, overlay and
//! viewport, resolves a placement, emits the style and remembers the result so
//! the overlay can be re-emitted without switching sides when only its
//! content size changes.
//!
//! ```text
//! Unattached --apply--> Applied --detach--> Detached
//!                        |  ^                  |
//!                        +--+ apply/reapply    +--apply--> Applied
//! ```

use std::rc::Rc;

use crate::config::PositioningConfig;
use crate::error::SessionError;
use crate::geometry::Rect;
use crate::host::{
    Direction, Directionality, MeasurableElement, ScrollNotifier, Subscription, ViewportProvider,
};
use crate::preference::PositionPreference;
use crate::request::{RepositionQueue, RepositionRequest};
use crate::resolve::{place, reposition, ResolveInput, ResolvedPlacement};
use crate::scroll::ScrollableViewProperties;
use crate::style::{StyleEmitter, StyleRecord};

/// The collaborators a session measures against.
#[derive(Clone)]
pub struct Host {
    /// Source of the viewport rect and resize notifications.
    pub viewport: Rc<dyn ViewportProvider>,
    /// Source of scroll notifications, if the host has any.
    pub scroll: Option<Rc<dyn ScrollNotifier>>,
    /// Source of the text direction.
    pub direction: Rc<dyn Directionality>,
}

impl Host {
    /// A left-to-right host without scroll notifications.
    pub fn new(viewport: Rc<dyn ViewportProvider>) -> Self {
        Self {
            viewport,
            scroll: None,
            direction: Rc::new(Direction::Ltr),
        }
    }

    /// Add a scroll notifier.
    pub fn with_scroll(mut self, scroll: Rc<dyn ScrollNotifier>) -> Self {
        self.scroll = Some(scroll);
        self
    }

    /// Set the direction source.
    pub fn with_direction(mut self, direction: Rc<dyn Directionality>) -> Self {
        self.direction = direction;
        self
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Never applied.
    Unattached,
    /// A placement is cached.
    Applied,
    /// Detached; behaves like [SessionState::Unattached] until applied again.
    Detached,
}

/// Reported to listeners when the active preference or push state changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionChange {
    /// The preference now in use.
    pub preference: PositionPreference,
    /// Its index, [None] for the empty-list fallback.
    pub index: Option<usize>,
    /// Whether the overlay had to be pushed.
    pub pushed: bool,
    /// Visibility against the scroll containers.
    pub scrollable_view: ScrollableViewProperties,
}

type ChangeListener = Box<dyn Fn(&PositionChange)>;

/// Positions one overlay against one origin.
pub struct Session {
    host: Host,
    preferences: Rc<[PositionPreference]>,
    config: PositioningConfig,
    emitter: StyleEmitter,
    state: SessionState,
    origin: Option<MeasurableElement>,
    overlay: Option<MeasurableElement>,
    last_placement: Option<ResolvedPlacement>,
    last_style: Option<StyleRecord>,
    subscriptions: Vec<Subscription>,
    requests: RepositionQueue,
    change_listeners: Vec<ChangeListener>,
    last_reported: Option<(Option<usize>, bool)>,
}

/// Create a session for `preferences`, most preferred first.
pub fn create_session(
    preferences: Vec<PositionPreference>,
    config: PositioningConfig,
    host: Host,
) -> Session {
    Session::new(host, preferences, config)
}

impl Session {
    /// Create a session. Invalid configuration values are replaced by defaults.
    pub fn new(host: Host, preferences: Vec<PositionPreference>, config: PositioningConfig) -> Self {
        let config = sanitize(config);
        Self {
            host,
            preferences: preferences.into(),
            emitter: StyleEmitter::new(config.transform_origin),
            config,
            state: SessionState::Unattached,
            origin: None,
            overlay: None,
            last_placement: None,
            last_style: None,
            subscriptions: Vec::new(),
            requests: RepositionQueue::new(),
            change_listeners: Vec::new(),
            last_reported: None,
        }
    }

    /// Position `overlay` next to `origin` and return its style.
    ///
    /// If either element can't be measured this is a no-op that returns the
    /// previous style, or [StyleRecord::unresolved] if there is none.
    pub fn apply(&mut self, origin: MeasurableElement, overlay: MeasurableElement) -> StyleRecord {
        let (origin_rect, overlay_rect) = match (origin.measure(), overlay.measure()) {
            (Some(origin_rect), Some(overlay_rect)) => (origin_rect.normalized(), overlay_rect.normalized()),
            _ => {
                log::warn!("Skipping overlay positioning: origin or overlay is not measurable");
                return self.current_style();
            },
        };

        let (viewport, boundary) = self.measure_viewport();
        let direction = self.host.direction.direction();
        let locked = self
            .last_placement
            .as_ref()
            .filter(|last| self.config.lock_position && last.index.is_some());

        let placement = match locked {
            Some(last) => {
                let mut placement = place(&ResolveInput {
                    origin: origin_rect,
                    overlay: overlay_rect,
                    viewport,
                    boundary,
                    preferences: std::slice::from_ref(&last.preference),
                    default_offset: self.config.default_offset(),
                    direction,
                    can_push: self.config.can_push,
                });
                placement.index = last.index;
                placement
            },
            None => place(&ResolveInput {
                origin: origin_rect,
                overlay: overlay_rect,
                viewport,
                boundary,
                preferences: &self.preferences,
                default_offset: self.config.default_offset(),
                direction,
                can_push: self.config.can_push,
            }),
        };

        log::debug!(
            "Overlay placed with preference {:?} at ({}, {}), pushed: {}",
            placement.index,
            placement.overlay_point.x,
            placement.overlay_point.y,
            placement.pushed
        );

        self.origin = Some(origin);
        self.overlay = Some(overlay);
        self.state = SessionState::Applied;
        self.subscribe();
        self.commit(placement, origin_rect)
    }

    /// Re-emit the last placement after the overlay's size changed.
    ///
    /// Returns [None] when the session is not applied.
    pub fn reapply_last_position(&mut self) -> Option<StyleRecord> {
        self.try_reapply_last_position().ok()
    }

    /// Like [Session::reapply_last_position], reporting why nothing was done.
    ///
    /// Keeps the cached preference and origin point; only the overlay and the
    /// viewport are measured again.
    pub fn try_reapply_last_position(&mut self) -> Result<StyleRecord, SessionError> {
        let last = match (&self.last_placement, self.state) {
            (Some(last), SessionState::Applied) => last.clone(),
            (_, SessionState::Detached) => return Err(SessionError::Detached),
            _ => return Err(SessionError::NotApplied),
        };

        let Some(overlay_rect) = self.overlay.as_ref().and_then(|overlay| overlay.measure()) else {
            log::warn!("Skipping overlay reposition: overlay is not measurable");
            return Ok(self.current_style());
        };

        let (viewport, boundary) = self.measure_viewport();
        let placement = reposition(
            &last,
            overlay_rect.normalized().size(),
            &viewport,
            boundary,
            self.config.can_push,
        );
        let origin_rect = self
            .origin
            .as_ref()
            .and_then(|origin| origin.measure())
            .unwrap_or_else(|| Rect::at_point(last.origin_point));

        Ok(self.commit(placement, origin_rect))
    }

    /// Forget the last placement and stop listening for viewport and scroll changes.
    pub fn detach(&mut self) {
        if self.state == SessionState::Applied {
            log::trace!("Detaching positioning session");
        }
        self.subscriptions.clear();
        self.requests.clear();
        self.origin = None;
        self.overlay = None;
        self.last_placement = None;
        self.last_style = None;
        self.last_reported = None;
        self.state = SessionState::Detached;
    }

    /// Handle queued viewport/scroll/resize notifications.
    ///
    /// Any number of queued requests results in at most one reposition: a
    /// full `apply` if the viewport changed or something scrolled, otherwise a
    /// `reapply_last_position`. Returns the new style if anything ran.
    pub fn process_pending(&mut self) -> Option<StyleRecord> {
        let requests = self.requests.drain();
        if requests.is_empty() || self.state != SessionState::Applied {
            return None;
        }

        if requests.iter().any(|request| request.needs_resolve()) {
            let origin = self.origin.clone()?;
            let overlay = self.overlay.clone()?;
            Some(self.apply(origin, overlay))
        } else {
            self.reapply_last_position()
        }
    }

    /// Handle for queueing reposition requests, e.g. [RepositionRequest::ContentResized].
    pub fn requests(&self) -> RepositionQueue {
        self.requests.clone()
    }

    /// Register a listener for changes of the active preference.
    ///
    /// If the session is already applied, the listener is called right away
    /// with the current placement.
    pub fn on_position_change(&mut self, listener: impl Fn(&PositionChange) + 'static) {
        if let Some(placement) = &self.last_placement {
            let origin_rect = self
                .origin
                .as_ref()
                .and_then(|origin| origin.measure())
                .unwrap_or_else(|| Rect::at_point(placement.origin_point));
            listener(&self.position_change(placement, &origin_rect));
        }
        self.change_listeners.push(Box::new(listener));
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The cached placement, if applied.
    pub fn last_placement(&self) -> Option<&ResolvedPlacement> {
        self.last_placement.as_ref()
    }

    /// The style from the last successful apply or reapply.
    pub fn last_style(&self) -> Option<&StyleRecord> {
        self.last_style.as_ref()
    }

    /// The preference list.
    pub fn preferences(&self) -> &[PositionPreference] {
        &self.preferences
    }

    /// The session configuration.
    pub fn config(&self) -> &PositioningConfig {
        &self.config
    }

    /// Whether viewport/scroll subscriptions are active.
    pub fn is_listening(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    fn measure_viewport(&self) -> (Rect, Rect) {
        let viewport = self.host.viewport.viewport_rect(self.config.viewport_margin).normalized();
        let boundary = self.host.viewport.viewport_rect(0.0).normalized();
        (viewport, boundary)
    }

    fn current_style(&self) -> StyleRecord {
        self.last_style.clone().unwrap_or_else(StyleRecord::unresolved)
    }

    fn subscribe(&mut self) {
        if !self.subscriptions.is_empty() {
            return;
        }

        let queue = self.requests.clone();
        self.subscriptions.push(
            self.host
                .viewport
                .on_change(Rc::new(move || queue.push(RepositionRequest::ViewportChanged))),
        );

        if let Some(scroll) = &self.host.scroll {
            let queue = self.requests.clone();
            self.subscriptions
                .push(scroll.on_scroll(Rc::new(move || queue.push(RepositionRequest::Scrolled))));
        }
    }

    fn commit(&mut self, placement: ResolvedPlacement, origin_rect: Rect) -> StyleRecord {
        let style = self.emitter.emit(
            &placement,
            placement.direction,
            self.host.viewport.keyboard_offset(),
        );
        self.report_change(&placement, &origin_rect);
        self.last_placement = Some(placement);
        self.last_style = Some(style.clone());
        style
    }

    fn report_change(&mut self, placement: &ResolvedPlacement, origin_rect: &Rect) {
        let key = (placement.index, placement.pushed);
        if self.last_reported == Some(key) {
            return;
        }
        self.last_reported = Some(key);

        if self.change_listeners.is_empty() {
            return;
        }

        let change = self.position_change(placement, origin_rect);
        for listener in &self.change_listeners {
            listener(&change);
        }
    }

    fn position_change(&self, placement: &ResolvedPlacement, origin_rect: &Rect) -> PositionChange {
        let containers = self
            .host
            .scroll
            .as_ref()
            .map(|scroll| scroll.clipping_rects())
            .unwrap_or_default();
        let overlay_rect = Rect::from_point_size(placement.overlay_point, placement.overlay_size);
        PositionChange {
            preference: placement.preference.clone(),
            index: placement.index,
            pushed: placement.pushed,
            scrollable_view: ScrollableViewProperties::compute(origin_rect, &overlay_rect, &containers),
        }
    }
}

fn sanitize(config: PositioningConfig) -> PositioningConfig {
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("Invalid positioning config, using defaults for bad values: {}", e);
            let defaults = PositioningConfig::default();
            PositioningConfig {
                viewport_margin: if config.viewport_margin.is_finite() && config.viewport_margin >= 0.0 {
                    config.viewport_margin
                } else {
                    defaults.viewport_margin
                },
                default_offset_x: if config.default_offset_x.is_finite() {
                    config.default_offset_x
                } else {
                    defaults.default_offset_x
                },
                default_offset_y: if config.default_offset_y.is_finite() {
                    config.default_offset_y
                } else {
                    defaults.default_offset_y
                },
                ..config
            }
        },
    }
}
