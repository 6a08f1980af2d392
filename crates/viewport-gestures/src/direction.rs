//! Drag direction classification.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a drag offset, in screen coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MoveDirection {
    /// Both offsets zero
    #[default]
    #[serde(rename = "")]
    None,
    /// Negative x, negative y
    #[serde(rename = "left-up")]
    LeftUp,
    /// Negative x, positive y
    #[serde(rename = "left-down")]
    LeftDown,
    /// Positive x, negative y
    #[serde(rename = "right-up")]
    RightUp,
    /// Positive x, positive y
    #[serde(rename = "right-down")]
    RightDown,
    /// Negative x only
    #[serde(rename = "left")]
    Left,
    /// Positive x only
    #[serde(rename = "right")]
    Right,
    /// Negative y only
    #[serde(rename = "up")]
    Up,
    /// Positive y only
    #[serde(rename = "down")]
    Down,
}

impl MoveDirection {
    /// Classify an offset. Diagonals win over single axes.
    #[must_use]
    pub fn classify(offset: Point) -> Self {
        let left = offset.x < 0.0;
        let right = offset.x > 0.0;
        let up = offset.y < 0.0;
        let down = offset.y > 0.0;

        match (left, right, up, down) {
            (true, _, true, _) => Self::LeftUp,
            (true, _, _, true) => Self::LeftDown,
            (_, true, true, _) => Self::RightUp,
            (_, true, _, true) => Self::RightDown,
            (true, ..) => Self::Left,
            (_, true, ..) => Self::Right,
            (_, _, true, _) => Self::Up,
            (_, _, _, true) => Self::Down,
            _ => Self::None,
        }
    }

    /// Wire label; empty for [`MoveDirection::None`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::LeftUp => "left-up",
            Self::LeftDown => "left-down",
            Self::RightUp => "right-up",
            Self::RightDown => "right-down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Check if both axes moved.
    #[must_use]
    pub const fn is_diagonal(&self) -> bool {
        matches!(
            self,
            Self::LeftUp | Self::LeftDown | Self::RightUp | Self::RightDown
        )
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
