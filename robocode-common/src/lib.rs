pub mod config;
pub mod error;
pub mod vector2;
pub mod waypoint;

// Re-export key types for easier use by dependent crates
pub use config::{AgentConfig, ArenaConfig, CourseConfig, Move, OutputConfig};
pub use error::VectorError;
pub use vector2::{normalize_angle, Vector2};
pub use waypoint::Waypoint;
