//! Mouse gesture recognition for a single surface.
//!
//! [`GestureRecognizer`] turns raw down/move/up/leave/wheel notifications
//! into clicks, double clicks, drags and wheel zooms, and hands each one to
//! the registered handler for its kind.
//!
//! Nothing here reads a clock. Time arrives with each sample, and any timer
//! that came due before a notification fires before the notification is
//! handled. Hosts with their own timer facility call
//! [`advance`](GestureRecognizer::advance) at
//! [`next_deadline`](GestureRecognizer::next_deadline).

use crate::config::GestureConfig;
use crate::direction::MoveDirection;
use crate::event::{InputEvent, InputKind, PointerSample};
use crate::geometry::{Point, Size};
use crate::gesture::{DragAxis, GestureDetail, GestureEvent, GestureKind, Zoom};
use crate::handlers::GestureHandlers;
use crate::rate_limit::RateLimiter;
use crate::source::{InputSink, InputSource, SubscriptionId};
use crate::surface::Surface;
use tracing::{debug, trace, warn};

/// Press/drag phase of the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No button held.
    #[default]
    Idle,
    /// Button held, movement still under the drag threshold.
    Pressed,
    /// Button held and moved past the drag threshold.
    Dragging,
}

/// Mutable press/drag record.
#[derive(Debug, Clone, Default)]
struct GestureState {
    pressed: bool,
    /// Only set while `pressed`.
    dragging: bool,
    /// Measurement origin; moves forward after each drag emission.
    press_origin: Point,
    last_sample: Point,
    /// Surface size read at the last emission.
    surface_size: Size,
    /// Set while the surface reads as unavailable or empty.
    surface_unusable: bool,
}

/// A released press waiting to become a click.
#[derive(Debug, Clone, Copy)]
struct PendingClick {
    deadline_ms: u64,
    start: Point,
    end: Point,
}

/// Which timer to fire next.
enum Due {
    Click,
    Drag,
}

/// Mouse gesture recognizer.
#[derive(Debug)]
pub struct GestureRecognizer<S: Surface> {
    config: GestureConfig,
    handlers: GestureHandlers,
    surface: S,
    state: GestureState,
    drag_limiter: RateLimiter<PointerSample>,
    pending_click: Option<PendingClick>,
    subscription: Option<SubscriptionId>,
    destroyed: bool,
}

impl<S: Surface> GestureRecognizer<S> {
    /// Create a recognizer.
    ///
    /// A config that fails [`GestureConfig::validate`] is replaced by the
    /// defaults.
    pub fn new(config: GestureConfig, handlers: GestureHandlers, surface: S) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "invalid gesture config, using defaults");
                GestureConfig::default()
            }
        };
        Self {
            drag_limiter: RateLimiter::new(config.drag_rate_limit_ms),
            config,
            handlers,
            surface,
            state: GestureState::default(),
            pending_click: None,
            subscription: None,
            destroyed: false,
        }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Get the observed surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Surface size read at the last emission.
    pub const fn surface_size(&self) -> Size {
        self.state.surface_size
    }

    /// Current press/drag phase.
    pub const fn phase(&self) -> Phase {
        match (self.state.pressed, self.state.dragging) {
            (true, true) => Phase::Dragging,
            (true, false) => Phase::Pressed,
            (false, _) => Phase::Idle,
        }
    }

    /// Check if a button is held.
    pub const fn is_pressed(&self) -> bool {
        self.state.pressed
    }

    /// Check if a drag is in progress.
    pub const fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Check if a released press is waiting to become a click.
    pub const fn has_pending_click(&self) -> bool {
        self.pending_click.is_some()
    }

    /// Check if `destroy` has run.
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Earliest timer deadline, if any timer is armed.
    pub fn next_deadline(&self) -> Option<u64> {
        let click = self.pending_click.map(|pending| pending.deadline_ms);
        match (click, self.drag_limiter.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Subscribe to every notification kind on `source`.
    ///
    /// Returns the existing subscription if already attached, `None` once
    /// destroyed.
    pub fn attach(&mut self, source: &mut dyn InputSource) -> Option<SubscriptionId> {
        if self.destroyed {
            warn!("attach called on a destroyed gesture recognizer");
            return None;
        }
        let id = *self
            .subscription
            .get_or_insert_with(|| source.subscribe(&InputKind::ALL));
        Some(id)
    }

    /// Detach from `source`, cancel both timers and drop press state.
    ///
    /// Later notifications are ignored. Calling it again does nothing.
    pub fn destroy(&mut self, source: &mut dyn InputSource) {
        if self.destroyed {
            return;
        }
        if let Some(id) = self.subscription.take() {
            source.unsubscribe(id);
        }
        self.drag_limiter.cancel();
        self.pending_click = None;
        self.state = GestureState::default();
        self.destroyed = true;
        debug!("gesture recognizer destroyed");
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Dispatch a notification to the matching operation.
    pub fn process(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Down(sample) => self.pointer_down(sample),
            InputEvent::Move(sample) => self.pointer_move(sample),
            InputEvent::Up(sample) => self.pointer_up(sample),
            InputEvent::Leave { timestamp_ms } => self.pointer_leave(timestamp_ms),
            InputEvent::Wheel {
                x,
                y,
                timestamp_ms,
                delta_y,
            } => self.wheel(PointerSample::new(x, y, timestamp_ms), delta_y),
        }
    }

    /// Button pressed.
    pub fn pointer_down(&mut self, sample: PointerSample) {
        if self.destroyed {
            return;
        }
        self.advance(sample.timestamp_ms);

        let position = sample.position();
        self.state.pressed = true;
        self.state.dragging = false;
        self.state.press_origin = position;
        self.state.last_sample = position;

        self.emit(GestureKind::MouseDown, position, position, None);
    }

    /// Pointer moved. Ignored unless a button is held.
    pub fn pointer_move(&mut self, sample: PointerSample) {
        if self.destroyed {
            return;
        }
        self.advance(sample.timestamp_ms);
        if !self.state.pressed {
            return;
        }

        let position = sample.position();
        self.state.last_sample = position;

        if !self.state.dragging
            && position.exceeds(&self.state.press_origin, self.config.move_threshold_px)
        {
            self.state.dragging = true;
            trace!(x = position.x, y = position.y, "drag started");
        }

        if self.state.dragging {
            if let Some(sample) = self.drag_limiter.invoke(sample.timestamp_ms, sample) {
                self.on_drag(sample);
            }
        }
    }

    /// Button released. Ignored unless a button is held.
    pub fn pointer_up(&mut self, sample: PointerSample) {
        if self.destroyed {
            return;
        }
        self.advance(sample.timestamp_ms);
        if !self.state.pressed {
            return;
        }

        self.drag_limiter.cancel();
        self.state.pressed = false;

        let start = self.state.press_origin;
        let end = sample.position();
        self.state.last_sample = end;

        if self.state.dragging {
            self.state.dragging = false;
                self.emit(GestureKind::DragEnd, start, end, None);
            return;
        }

        if self.pending_click.take().is_some() {
            self.emit(GestureKind::DoubleClick, start, end, None);
        } else {
            self.pending_click = Some(PendingClick {
                deadline_ms: sample
                    .timestamp_ms
                    .saturating_add(self.config.click_delay_ms),
                start,
                end,
            });
        }
    }

    /// Pointer left the surface. Aborts a held press; a pending click survives.
    pub fn pointer_leave(&mut self, timestamp_ms: u64) {
        if self.destroyed {
            return;
        }
        self.advance(timestamp_ms);
        if !self.state.pressed {
            return;
        }

        self.drag_limiter.cancel();
        self.state.pressed = false;
        self.state.dragging = false;

        let start = self.state.press_origin;
        let end = self.state.last_sample;
        self.emit(GestureKind::MouseLeave, start, end, None);
    }

    /// Wheel scrolled. Independent of press/drag state.
    pub fn wheel(&mut self, sample: PointerSample, delta_y: f32) {
        if self.destroyed {
            return;
        }
        self.advance(sample.timestamp_ms);

        let position = sample.position();
        let zoom = Zoom::from_delta(delta_y);
        self.emit(zoom.kind(), position, position, None);
        self.emit(
            GestureKind::Wheel,
            position,
            position,
            Some(GestureDetail::Wheel { zoom }),
        );
    }

    /// Fire every timer due at or before `now_ms`, earliest first.
    pub fn advance(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        while let Some(due) = self.next_due(now_ms) {
            match due {
                Due::Click => {
                    if let Some(pending) = self.pending_click.take() {
                        self.emit(GestureKind::Click, pending.start, pending.end, None);
                    }
                }
                Due::Drag => {
                    if let Some(sample) = self.drag_limiter.poll(now_ms) {
                        self.on_drag(sample);
                    }
                }
            }
        }
    }

    fn next_due(&self, now_ms: u64) -> Option<Due> {
        let click = self
            .pending_click
            .map(|pending| pending.deadline_ms)
            .filter(|deadline| *deadline <= now_ms);
        let drag = self
            .drag_limiter
            .deadline()
            .filter(|deadline| *deadline <= now_ms);

        match (click, drag) {
            (Some(c), Some(d)) if d < c => Some(Due::Drag),
            (Some(_), _) => Some(Due::Click),
            (None, Some(_)) => Some(Due::Drag),
            (None, None) => None,
        }
    }

    // =========================================================================
    // Drag progress
    // =========================================================================

    fn on_drag(&mut self, sample: PointerSample) {
        if !self.state.dragging {
            return;
        }

        let position = sample.position();
        let offset = position - self.state.press_origin;

        let surface = self.read_surface();
        if surface.is_empty() {
            trace!("surface has no area, skipping drag ratio");
            return;
        }

        let x_ratio = drag_ratio(offset.x, surface.width);
        let y_ratio = drag_ratio(offset.y, surface.height);
        let threshold = self.config.drag_ratio_threshold_percent;
        let x_crossed = x_ratio >= threshold;
        let y_crossed = y_ratio >= threshold;
        if !x_crossed && !y_crossed {
            return;
        }

        let move_direction = MoveDirection::classify(offset);
        debug!(
            x_offset = offset.x,
            y_offset = offset.y,
            x_ratio,
            y_ratio,
            direction = %move_direction,
            "drag threshold crossed"
        );

        let start = self.state.press_origin;
        if x_crossed {
            self.emit(
                GestureKind::DragX,
                start,
                position,
                Some(GestureDetail::DragX {
                    x_offset: offset.x,
                    x_offset_ratio: x_ratio,
                    move_direction,
                    drag_type: DragAxis::X,
                }),
            );
        }
        if y_crossed {
            self.emit(
                GestureKind::DragY,
                start,
                position,
                Some(GestureDetail::DragY {
                    y_offset: offset.y,
                    y_offset_ratio: y_ratio,
                    move_direction,
                    drag_type: DragAxis::Y,
                }),
            );
        }
        self.emit(
            GestureKind::Drag,
            start,
            position,
            Some(GestureDetail::Drag {
                x_offset: offset.x,
                y_offset: offset.y,
                x_offset_ratio: x_ratio,
                y_offset_ratio: y_ratio,
                move_direction,
                drag_type: if x_crossed { DragAxis::X } else { DragAxis::Y },
            }),
        );

        // Thresholds measure displacement since the last emission.
        self.state.press_origin = position;
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Read the surface size. Warns once each time it becomes unusable.
    fn read_surface(&mut self) -> Size {
        let dimensions = self.surface.dimensions();
        let size = dimensions.unwrap_or(Size::ZERO);
        let unusable = size.is_empty();
        if unusable && !self.state.surface_unusable {
            warn!(
                available = dimensions.is_some(),
                width = size.width,
                height = size.height,
                "surface unavailable or empty, drag progress suspended"
            );
        } else if !unusable && self.state.surface_unusable {
            debug!(width = size.width, height = size.height, "surface usable again");
        }
        self.state.surface_unusable = unusable;
        self.state.surface_size = size;
        size
    }

    fn emit(&mut self, kind: GestureKind, start: Point, end: Point, detail: Option<GestureDetail>) {
        let surface = self.read_surface();
        let mut event = GestureEvent::new(kind, start, end, surface);
        if let Some(detail) = detail {
            event = event.with_detail(detail);
        }

        if self.handlers.dispatch(&event) {
            debug!(kind = %kind, "gesture dispatched");
        } else {
            trace!(kind = %kind, "no handler registered, gesture dropped");
        }
    }
}

impl<S: Surface> InputSink for GestureRecognizer<S> {
    fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    fn handle(&mut self, event: &InputEvent) {
        self.process(event);
    }
}

/// Offset as a whole percent of `dimension`.
fn drag_ratio(offset: f32, dimension: f32) -> u32 {
    (offset.abs() / dimension * 100.0).round() as u32
}
