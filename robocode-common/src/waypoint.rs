use crate::vector2::Vector2;
use serde::{Deserialize, Serialize};

/// The agent's pose after a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Number of moves applied so far; `0` is the starting pose.
    pub step: usize,
    pub position: Vector2,
    /// Heading in radians within `[0, 2PI)`, 0 = north, clockwise.
    pub heading: f64,
    /// Path length covered since the start.
    pub travelled: f64,
    /// Whether `position` is inside the configured arena.
    pub in_arena: bool,
}
