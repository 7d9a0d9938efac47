use crate::vector2::Vector2;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Inclusive bounding box the agent is expected to stay inside
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ArenaConfig {
    pub lower: Vector2,
    pub upper: Vector2,
}

impl ArenaConfig {
    /// Whether `point` lies inside the arena (edges included).
    pub fn contains(&self, point: Vector2) -> bool {
        point.is_contained(self.lower.x(), self.lower.y(), self.upper.x(), self.upper.y())
    }
}

// Starting pose of the agent
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AgentConfig {
    pub start: Vector2,
    /// Initial heading in radians, 0 = north, clockwise.
    #[serde(default)]
    pub heading: f64,
}

/// A single instruction for the agent, read from a `[[moves]]` table.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    /// Move along the current heading. Negative distances back up.
    Forward { distance: f64 },
    /// Turn clockwise by `radians` (negative turns counter-clockwise).
    Turn { radians: f64 },
    /// Face `target` and drive straight onto it.
    Goto { target: Vector2 },
    /// Orbit `pivot` clockwise by `radians`, turning the heading with it.
    Arc { pivot: Vector2, radians: f64 },
}

// Configuration for output settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    #[serde(default)]
    pub save_trajectory: bool,
    #[serde(default)]
    pub save_positions: bool,
    pub format: Option<String>, // Trajectory format, only "json" for now
}

fn default_base_filename() -> String {
    "course".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: default_base_filename(),
            save_trajectory: false,
            save_positions: false,
            format: None,
        }
    }
}

// Main course configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CourseConfig {
    pub arena: ArenaConfig,
    pub agent: AgentConfig,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default)]
    pub output: OutputConfig,
}

impl CourseConfig {
    /// Loads the course configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: CourseConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let (lower, upper) = (self.arena.lower, self.arena.upper);
        if lower.x() > upper.x() || lower.y() > upper.y() {
            anyhow::bail!("arena lower bound {} must not exceed upper bound {}.", lower, upper);
        }
        let start = self.agent.start;
        if !start.x().is_finite() || !start.y().is_finite() || !self.agent.heading.is_finite() {
            anyhow::bail!("agent start {} and heading {} must be finite.", start, self.agent.heading);
        }
        for (i, mv) in self.moves.iter().enumerate() {
            let finite = match mv {
                Move::Forward { distance } => distance.is_finite(),
                Move::Turn { radians } => radians.is_finite(),
                Move::Goto { target } => target.x().is_finite() && target.y().is_finite(),
                Move::Arc { pivot, radians } => {
                    pivot.x().is_finite() && pivot.y().is_finite() && radians.is_finite()
                }
            };
            if !finite {
                anyhow::bail!("move #{} ({:?}) has non-finite values.", i + 1, mv);
            }
        }
        Ok(())
    }
}
