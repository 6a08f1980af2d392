//! Raw input notifications delivered by an input source.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// A single raw pointer reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// X coordinate relative to the surface
    pub x: f32,
    /// Y coordinate relative to the surface
    pub y: f32,
    /// Timestamp in milliseconds on the host's monotonic clock
    pub timestamp_ms: u64,
}

impl PointerSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    /// Position of the sample.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Input notification kinds an input source can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Button pressed
    Down,
    /// Pointer moved
    Move,
    /// Button released
    Up,
    /// Pointer left the surface
    Leave,
    /// Wheel scrolled
    Wheel,
}

impl InputKind {
    /// Every kind, in delivery-table order.
    pub const ALL: [Self; 5] = [Self::Down, Self::Move, Self::Up, Self::Leave, Self::Wheel];
}

/// Input notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    /// Button pressed at a position
    Down(PointerSample),
    /// Pointer moved to a position
    Move(PointerSample),
    /// Button released at a position
    Up(PointerSample),
    /// Pointer left the surface
    Leave {
        /// Timestamp in milliseconds
        timestamp_ms: u64,
    },
    /// Wheel scrolled at a position
    Wheel {
        /// X coordinate
        x: f32,
        /// Y coordinate
        y: f32,
        /// Timestamp in milliseconds
        timestamp_ms: u64,
        /// Vertical delta; negative scrolls up
        delta_y: f32,
    },
}

impl InputEvent {
    /// Shorthand for a `Down` notification.
    #[must_use]
    pub const fn down(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::Down(PointerSample::new(x, y, timestamp_ms))
    }

    /// Shorthand for a `Move` notification.
    #[must_use]
    pub const fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::Move(PointerSample::new(x, y, timestamp_ms))
    }

    /// Shorthand for an `Up` notification.
    #[must_use]
    pub const fn up(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::Up(PointerSample::new(x, y, timestamp_ms))
    }

    /// Shorthand for a `Leave` notification.
    #[must_use]
    pub const fn leave(timestamp_ms: u64) -> Self {
        Self::Leave { timestamp_ms }
    }

    /// Shorthand for a `Wheel` notification.
    #[must_use]
    pub const fn wheel(x: f32, y: f32, timestamp_ms: u64, delta_y: f32) -> Self {
        Self::Wheel {
            x,
            y,
            timestamp_ms,
            delta_y,
        }
    }

    /// Get the notification kind.
    #[must_use]
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Down(_) => InputKind::Down,
            Self::Move(_) => InputKind::Move,
            Self::Up(_) => InputKind::Up,
            Self::Leave { .. } => InputKind::Leave,
            Self::Wheel { .. } => InputKind::Wheel,
        }
    }

    /// Get the timestamp of the notification.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        match self {
            Self::Down(sample) | Self::Move(sample) | Self::Up(sample) => sample.timestamp_ms,
            Self::Leave { timestamp_ms } | Self::Wheel { timestamp_ms, .. } => *timestamp_ms,
        }
    }

    /// Get the position if this is a positional notification.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Down(sample) | Self::Move(sample) | Self::Up(sample) => {
                Some(sample.position())
            }
            Self::Wheel { x, y, .. } => Some(Point::new(*x, *y)),
            Self::Leave { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_position() {
        let s = PointerSample::new(12.0, 34.0, 99);
        assert_eq!(s.position(), Point::new(12.0, 34.0));
        assert_eq!(s.timestamp_ms, 99);
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(InputEvent::down(0.0, 0.0, 0).kind(), InputKind::Down);
        assert_eq!(InputEvent::moved(0.0, 0.0, 0).kind(), InputKind::Move);
        assert_eq!(InputEvent::up(0.0, 0.0, 0).kind(), InputKind::Up);
        assert_eq!(InputEvent::leave(0).kind(), InputKind::Leave);
        assert_eq!(InputEvent::wheel(0.0, 0.0, 0, 1.0).kind(), InputKind::Wheel);
    }

    #[test]
    fn test_event_timestamp() {
        assert_eq!(InputEvent::up(1.0, 2.0, 40).timestamp_ms(), 40);
        assert_eq!(InputEvent::leave(41).timestamp_ms(), 41);
        assert_eq!(InputEvent::wheel(1.0, 2.0, 42, -3.0).timestamp_ms(), 42);
    }

    #[test]
    fn test_event_position() {
        assert_eq!(
            InputEvent::wheel(5.0, 6.0, 0, 1.0).position(),
            Some(Point::new(5.0, 6.0))
        );
        assert_eq!(InputEvent::leave(0).position(), None);
    }

    #[test]
    fn test_event_deserialize_tagged() {
        let json = r#"{"type":"wheel","x":10.0,"y":20.0,"timestamp_ms":5,"delta_y":-1.0}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, InputEvent::wheel(10.0, 20.0, 5, -1.0));

        let json = r#"{"type":"down","x":1.0,"y":2.0,"timestamp_ms":3}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, InputEvent::down(1.0, 2.0, 3));
    }
}
