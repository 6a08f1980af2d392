//! Mouse gesture recognition for a single interactive surface.
//!
//! This crate classifies raw pointer notifications into higher-level gestures
//! and reports them through a callback table:
//! - Press/release classification: [`GestureKind::Click`] vs
//!   [`GestureKind::DoubleClick`] vs drag
//! - Drag progress along each axis, measured as a percent of the surface size,
//!   with an optional [`RateLimiter`] in front of it
//! - Wheel zoom: [`GestureKind::ZoomIn`], [`GestureKind::ZoomOut`]
//!
//! The host element, its event wiring and any visual feedback stay outside:
//! they are reached through the [`Surface`] and [`InputSource`] traits.
//!
//! ```ignore
//! let surface = SurfaceHandle::new(Size::new(1280.0, 720.0));
//! let handlers = GestureHandlers::new()
//!     .on(GestureKind::DoubleClick, |_| player.toggle_fullscreen())
//!     .on(GestureKind::DragX, |e| player.seek_by(e.detail.clone()));
//! let mut recognizer = GestureRecognizer::new(GestureConfig::default(), handlers, surface);
//! recognizer.attach(&mut source);
//! ```

mod config;
mod direction;
mod event;
mod geometry;
mod gesture;
mod handlers;
mod rate_limit;
mod recognizer;
mod source;
mod surface;

pub use config::{ConfigError, GestureConfig};
pub use direction::MoveDirection;
pub use event::{InputEvent, InputKind, PointerSample};
pub use geometry::{Point, Size};
pub use gesture::{DragAxis, GestureDetail, GestureEvent, GestureKind, ParseKindError, Zoom};
pub use handlers::{GestureHandler, GestureHandlers};
pub use rate_limit::{RateLimiter, Throttled};
pub use recognizer::{GestureRecognizer, Phase};
pub use source::{InputSink, InputSource, ScriptedSource, SubscriptionId};
pub use surface::{Surface, SurfaceHandle};
