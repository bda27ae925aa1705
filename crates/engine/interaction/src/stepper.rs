//! Fixed-timestep physics stepping

use handhold_physics::PhysicsWorld;
use serde::{Deserialize, Serialize};

/// Default simulation timestep, in seconds
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// How render ticks map onto simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// One fixed step per tick regardless of real elapsed time
    #[default]
    FixedPerTick,
    /// Fixed steps drawn from an accumulator of real elapsed time
    Accumulated,
}

/// Advances the physics world once per render tick
#[derive(Debug, Clone)]
pub struct PhysicsStepper {
    timestep: f32,
    mode: StepMode,
    max_substeps: u32,
    accumulator: f32,
}

impl PhysicsStepper {
    pub fn new(timestep: f32, mode: StepMode, max_substeps: u32) -> Self {
        Self {
            timestep,
            mode,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Step the world for one tick and return how many steps ran
    ///
    /// In accumulated mode, time beyond `max_substeps` steps is dropped so a
    /// long stall does not snowball into ever longer ticks.
    pub fn advance(&mut self, world: &mut PhysicsWorld, elapsed: f32) -> u32 {
        match self.mode {
            StepMode::FixedPerTick => {
                world.step(self.timestep);
                1
            }
            StepMode::Accumulated => {
                self.accumulator += elapsed.max(0.0);
                let mut steps = 0;
                while self.accumulator >= self.timestep && steps < self.max_substeps {
                    world.step(self.timestep);
                    self.accumulator -= self.timestep;
                    steps += 1;
                }
                if steps == self.max_substeps {
                    self.accumulator = self.accumulator.min(self.timestep);
                }
                steps
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_fixed_steps_once_per_tick() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let mut stepper = PhysicsStepper::new(DEFAULT_TIMESTEP, StepMode::FixedPerTick, 4);

        assert_eq!(stepper.advance(&mut world, 0.0), 1);
        assert_eq!(stepper.advance(&mut world, 0.5), 1);
    }

    #[test]
    fn test_accumulated_follows_elapsed_time() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let mut stepper = PhysicsStepper::new(0.01, StepMode::Accumulated, 8);

        assert_eq!(stepper.advance(&mut world, 0.005), 0);
        assert_eq!(stepper.advance(&mut world, 0.025), 3);
    }

    #[test]
    fn test_accumulated_caps_substeps() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let mut stepper = PhysicsStepper::new(0.01, StepMode::Accumulated, 2);

        assert_eq!(stepper.advance(&mut world, 1.0), 2);
        // Backlog was dropped down to at most one step
        assert!(stepper.advance(&mut world, 0.0) <= 1);
    }
}
