//! Gesture events emitted by the recognizer.

use crate::direction::MoveDirection;
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GestureKind {
    /// Button pressed
    #[serde(rename = "mousedown")]
    MouseDown,
    /// Pointer left the surface while pressed
    #[serde(rename = "mouseleave")]
    MouseLeave,
    /// Single click, reported after the double click window closed
    #[serde(rename = "click")]
    Click,
    /// Two releases inside the double click window
    #[serde(rename = "dblclick")]
    DoubleClick,
    /// Drag released
    #[serde(rename = "dragend")]
    DragEnd,
    /// Horizontal drag crossed the ratio threshold
    #[serde(rename = "dragX")]
    DragX,
    /// Vertical drag crossed the ratio threshold
    #[serde(rename = "dragY")]
    DragY,
    /// Drag crossed the ratio threshold on either axis
    #[serde(rename = "drag")]
    Drag,
    /// Wheel scrolled up
    #[serde(rename = "zoomIn")]
    ZoomIn,
    /// Wheel scrolled down
    #[serde(rename = "zoomOut")]
    ZoomOut,
    /// Any wheel scroll
    #[serde(rename = "wheel")]
    Wheel,
}

impl GestureKind {
    /// Every kind.
    pub const ALL: [Self; 11] = [
        Self::MouseDown,
        Self::MouseLeave,
        Self::Click,
        Self::DoubleClick,
        Self::DragEnd,
        Self::DragX,
        Self::DragY,
        Self::Drag,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::Wheel,
    ];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseLeave => "mouseleave",
            Self::Click => "click",
            Self::DoubleClick => "dblclick",
            Self::DragEnd => "dragend",
            Self::DragX => "dragX",
            Self::DragY => "dragY",
            Self::Drag => "drag",
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::Wheel => "wheel",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown gesture kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gesture kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for GestureKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Axis a drag event is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragAxis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

/// Wheel zoom direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zoom {
    /// Wheel scrolled up (negative delta)
    In,
    /// Wheel scrolled down
    Out,
}

impl Zoom {
    /// Zoom direction for a vertical wheel delta. Zero counts as `Out`.
    #[must_use]
    pub fn from_delta(delta_y: f32) -> Self {
        if delta_y < 0.0 {
            Self::In
        } else {
            Self::Out
        }
    }

    /// The specific gesture kind for this direction.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::In => GestureKind::ZoomIn,
            Self::Out => GestureKind::ZoomOut,
        }
    }

    /// Wire value of the `zoom` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GestureDetail {
    /// Payload of `dragX`.
    #[serde(rename_all = "camelCase")]
    DragX {
        /// Horizontal offset since the measurement origin
        x_offset: f32,
        /// Horizontal offset as a percent of surface width
        x_offset_ratio: u32,
        /// Direction of the full offset
        move_direction: MoveDirection,
        /// Always `x`
        drag_type: DragAxis,
    },
    /// Payload of `dragY`.
    #[serde(rename_all = "camelCase")]
    DragY {
        /// Vertical offset since the measurement origin
        y_offset: f32,
        /// Vertical offset as a percent of surface height
        y_offset_ratio: u32,
        /// Direction of the full offset
        move_direction: MoveDirection,
        /// Always `y`
        drag_type: DragAxis,
    },
    /// Payload of `drag`.
    #[serde(rename_all = "camelCase")]
    Drag {
        /// Horizontal offset
        x_offset: f32,
        /// Vertical offset
        y_offset: f32,
        /// Horizontal ratio
        x_offset_ratio: u32,
        /// Vertical ratio
        y_offset_ratio: u32,
        /// Direction of the offset
        move_direction: MoveDirection,
        /// `x` when the horizontal ratio crossed the threshold, else `y`
        drag_type: DragAxis,
    },
    /// Payload of `wheel`.
    Wheel {
        /// Zoom direction
        zoom: Zoom,
    },
}

/// A recognized gesture, built fresh for every emission.
///
/// Serializes to a flat object (`eventType`, `startX`, …, `playerWidth`,
/// `playerHeight`, plus detail keys) that a host can forward as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureEvent {
    /// Gesture kind
    #[serde(rename = "eventType")]
    pub kind: GestureKind,
    /// Measurement origin x
    pub start_x: f32,
    /// Measurement origin y
    pub start_y: f32,
    /// Position that produced the emission, x
    pub end_x: f32,
    /// Position that produced the emission, y
    pub end_y: f32,
    /// Surface width at emission time
    #[serde(rename = "playerWidth")]
    pub surface_width: f32,
    /// Surface height at emission time
    #[serde(rename = "playerHeight")]
    pub surface_height: f32,
    /// Kind-specific fields
    #[serde(flatten)]
    pub detail: Option<GestureDetail>,
}

impl GestureEvent {
    /// Create an event without kind-specific fields.
    #[must_use]
    pub const fn new(kind: GestureKind, start: Point, end: Point, surface: Size) -> Self {
        Self {
            kind,
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
            surface_width: surface.width,
            surface_height: surface.height,
            detail: None,
        }
    }

    /// Attach kind-specific fields.
    #[must_use]
    pub fn with_detail(mut self, detail: GestureDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Measurement origin.
    #[must_use]
    pub const fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    /// Position that produced the emission.
    #[must_use]
    pub const fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Surface size at emission time.
    #[must_use]
    pub const fn surface(&self) -> Size {
        Size::new(self.surface_width, self.surface_height)
    }

    /// Drag direction, for drag progress events.
    #[must_use]
    pub const fn move_direction(&self) -> Option<MoveDirection> {
        match &self.detail {
            Some(
                GestureDetail::DragX { move_direction, .. }
                | GestureDetail::DragY { move_direction, .. }
                | GestureDetail::Drag { move_direction, .. },
            ) => Some(*move_direction),
            _ => None,
        }
    }

    /// Axis tag, for drag progress events.
    #[must_use]
    pub const fn drag_type(&self) -> Option<DragAxis> {
        match &self.detail {
            Some(
                GestureDetail::DragX { drag_type, .. }
                | GestureDetail::DragY { drag_type, .. }
                | GestureDetail::Drag { drag_type, .. },
            ) => Some(*drag_type),
            _ => None,
        }
    }

    /// Zoom direction, for `wheel` events.
    #[must_use]
    pub const fn zoom(&self) -> Option<Zoom> {
        match &self.detail {
            Some(GestureDetail::Wheel { zoom }) => Some(*zoom),
            _ => None,
        }
    }
}
