use anyhow::{Context, Result};
use log::{debug, trace, warn};
use robocode_common::{normalize_angle, CourseConfig, Move, Vector2, Waypoint};

/// Drives a single agent through the configured list of moves.
///
/// Every pose is a fresh `Vector2` derived from the previous one; the runner
/// only owns the bookkeeping (current pose, move cursor and recorded waypoints).
#[derive(Debug)]
pub struct CourseRunner {
    config: CourseConfig,
    position: Vector2,
    heading: f64,
    travelled: f64,
    next_move: usize,
    recorded_waypoints: Vec<Waypoint>,
}

impl CourseRunner {
    /// Creates a runner at the configured start pose and records step 0.
    pub fn new(config: CourseConfig) -> Self {
        let position = config.agent.start;
        let heading = normalize_angle(config.agent.heading);
        if !config.arena.contains(position) {
            warn!("Agent starts outside the arena at {}.", position);
        }
        let mut runner = CourseRunner {
            config,
            position,
            heading,
            travelled: 0.0,
            next_move: 0,
            recorded_waypoints: Vec::new(),
        };
        runner.record_waypoint();
        runner
    }

    /// Applies the next move. Returns `false` once every move has been applied.
    pub fn step(&mut self) -> Result<bool> {
        let Some(mv) = self.config.moves.get(self.next_move).cloned() else {
            return Ok(false);
        };
        self.next_move += 1;
        trace!("Applying move #{}: {:?}", self.next_move, mv);

        match mv {
            Move::Forward { distance } => {
                self.position = self.position + Vector2::from_polar(distance, self.heading);
                self.travelled += distance.abs();
            }
            Move::Turn { radians } => {
                self.heading = normalize_angle(self.heading + radians);
            }
            Move::Goto { target } => {
                let offset = target - self.position;
                match offset.normalized() {
                    Ok(direction) => {
                        self.heading = direction.theta();
                        self.travelled += self.position.distance(target);
                        self.position = target;
                    }
                    Err(e) => {
                        warn!("Move #{}: already at {} ({}). Skipping.", self.next_move, target, e);
                    }
                }
            }
            Move::Arc { pivot, radians } => {
                let radius = self.position - pivot;
                // rotate() turns counter-clockwise, orbit is clockwise
                self.position = pivot + radius.rotate(-radians);
                self.travelled += radius.arc_length(radians).abs();
                self.heading = normalize_angle(self.heading + radians);
            }
        }

        if !self.config.arena.contains(self.position) {
            warn!(
                "Move #{} left the arena: {} is outside {} .. {}.",
                self.next_move, self.position, self.config.arena.lower, self.config.arena.upper
            );
        }
        self.record_waypoint();
        Ok(true)
    }

    /// Applies every remaining move.
    pub fn run(&mut self) -> Result<()> {
        while self
            .step()
            .with_context(|| format!("Course failed at move #{}", self.next_move))?
        {}
        debug!("Course finished after {} moves.", self.next_move);
        Ok(())
    }

    fn record_waypoint(&mut self) {
        let waypoint = Waypoint {
            step: self.next_move,
            position: self.position,
            heading: self.heading,
            travelled: self.travelled,
            in_arena: self.config.arena.contains(self.position),
        };
        self.recorded_waypoints.push(waypoint);
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn travelled(&self) -> f64 {
        self.travelled
    }

    pub fn total_moves(&self) -> usize {
        self.config.moves.len()
    }

    pub fn config(&self) -> &CourseConfig {
        &self.config
    }

    /// Waypoints recorded so far, starting with the initial pose.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.recorded_waypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use robocode_common::{AgentConfig, ArenaConfig, OutputConfig};
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn config_with(moves: Vec<Move>) -> CourseConfig {
        CourseConfig {
            arena: ArenaConfig {
                lower: Vector2::new(-10.0, -10.0),
                upper: Vector2::new(10.0, 10.0),
            },
            agent: AgentConfig { start: Vector2::NULL, heading: 0.0 },
            moves,
            output: OutputConfig::default(),
        }
    }

    fn assert_at(runner: &CourseRunner, x: f64, y: f64) {
        assert_abs_diff_eq!(runner.position().x(), x, epsilon = EPS);
        assert_abs_diff_eq!(runner.position().y(), y, epsilon = EPS);
    }

    #[test]
    fn test_forward_follows_heading() {
        let mut runner = CourseRunner::new(config_with(vec![
            Move::Forward { distance: 3.0 },
            Move::Turn { radians: FRAC_PI_2 },
            Move::Forward { distance: 4.0 },
        ]));
        runner.run().unwrap();
        // north 3, then east 4
        assert_at(&runner, 4.0, 3.0);
        assert_abs_diff_eq!(runner.heading(), FRAC_PI_2, epsilon = EPS);
        assert_abs_diff_eq!(runner.travelled(), 7.0, epsilon = EPS);
        assert_eq!(runner.waypoints().len(), 4);
        assert_eq!(runner.waypoints()[0].step, 0);
        assert_eq!(runner.waypoints()[3].step, 3);
    }

    #[test]
    fn test_turn_wraps_heading() {
        let mut runner = CourseRunner::new(config_with(vec![Move::Turn { radians: -FRAC_PI_2 }]));
        runner.run().unwrap();
        assert_abs_diff_eq!(runner.heading(), 3.0 * FRAC_PI_2, epsilon = EPS);
        assert_at(&runner, 0.0, 0.0);
    }

    #[test]
    fn test_goto_faces_target() {
        let mut runner = CourseRunner::new(config_with(vec![Move::Goto {
            target: Vector2::new(3.0, -4.0),
        }]));
        runner.run().unwrap();
        assert_eq!(runner.position(), Vector2::new(3.0, -4.0));
        assert_abs_diff_eq!(runner.travelled(), 5.0, epsilon = EPS);
        assert_abs_diff_eq!(runner.heading(), Vector2::new(3.0, -4.0).theta(), epsilon = EPS);
    }

    #[test]
    fn test_goto_current_position_is_skipped() {
        let mut runner = CourseRunner::new(config_with(vec![
            Move::Turn { radians: 1.0 },
            Move::Goto { target: Vector2::NULL },
        ]));
        runner.run().unwrap();
        assert_eq!(runner.position(), Vector2::NULL);
        assert_abs_diff_eq!(runner.heading(), 1.0, epsilon = EPS);
        assert_eq!(runner.travelled(), 0.0);
        assert_eq!(runner.waypoints().len(), 3);
    }

    #[test]
    fn test_arc_orbits_clockwise() {
        let mut config = config_with(vec![Move::Arc { pivot: Vector2::NULL, radians: FRAC_PI_2 }]);
        config.agent.start = Vector2::new(0.0, 2.0);
        config.agent.heading = FRAC_PI_2;
        let mut runner = CourseRunner::new(config);
        runner.run().unwrap();
        // from north of the pivot to east of it
        assert_at(&runner, 2.0, 0.0);
        assert_abs_diff_eq!(runner.heading(), PI, epsilon = EPS);
        assert_abs_diff_eq!(runner.travelled(), PI, epsilon = EPS);
    }

    #[test]
    fn test_leaving_arena_is_recorded() {
        let mut runner = CourseRunner::new(config_with(vec![
            Move::Forward { distance: 10.0 },
            Move::Forward { distance: 0.5 },
            Move::Forward { distance: -1.0 },
        ]));
        runner.run().unwrap();
        let in_arena: Vec<bool> = runner.waypoints().iter().map(|w| w.in_arena).collect();
        assert_eq!(in_arena, vec![true, true, false, true]);
        assert_abs_diff_eq!(runner.travelled(), 11.5, epsilon = EPS);
    }

    #[test]
    fn test_start_outside_arena_still_runs() {
        let mut config = config_with(vec![Move::Goto { target: Vector2::new(1.0, 1.0) }]);
        config.agent.start = Vector2::new(20.0, 0.0);
        let mut runner = CourseRunner::new(config);
        assert!(!runner.waypoints()[0].in_arena);
        runner.run().unwrap();
        assert!(runner.waypoints()[1].in_arena);
        assert_eq!(runner.waypoints()[1].step, 1);
    }

    #[test]
    fn test_step_after_last_move() {
        let mut runner = CourseRunner::new(config_with(vec![Move::Forward { distance: 1.0 }]));
        assert!(runner.step().unwrap());
        assert!(!runner.step().unwrap());
        assert_eq!(runner.waypoints().len(), 2);
    }
}
