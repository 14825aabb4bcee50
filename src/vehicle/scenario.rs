use nalgebra::Vector2;

use super::spacecraft::{Spacecraft, SpacecraftBuilder};
use crate::dynamics::kinematics;
use crate::dynamics::state::{SimConfig, State};
use crate::error::SimError;

// ---------------------------------------------------------------------------
// Scenario: a spacecraft, where it starts, and where the tip must go
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub spacecraft: Spacecraft,
    pub target: Vector2<f64>,     // m, inertial
    pub goal_tolerance: f64,      // m
    pub initial: State,
}

impl Scenario {
    /// Tip position minus target for a given state.
    pub fn end_effector_error(&self, state: &State) -> Vector2<f64> {
        let pose = kinematics::forward(&state.pos, state.phi, &state.q, &self.spacecraft.arm);
        pose.end_effector - self.target
    }

    pub fn goal_reached(&self, state: &State) -> bool {
        self.end_effector_error(state).norm() < self.goal_tolerance
    }

    /// Reject configurations the loop cannot run.
    pub fn validate(&self, config: &SimConfig) -> Result<(), SimError> {
        let c = &self.spacecraft;
        positive("mass", c.mass)?;
        positive("inertia", c.inertia)?;
        positive("dt", config.dt)?;
        positive("goal_tolerance", self.goal_tolerance)?;
        if config.max_steps == 0 {
            return Err(SimError::invalid_config("max_steps must be positive"));
        }

        non_negative("thruster_force", c.thruster_force)?;
        non_negative("l1", c.arm.l1)?;
        non_negative("l2", c.arm.l2)?;
        non_negative("m1", c.arm.m1)?;
        non_negative("m2", c.arm.m2)?;

        // Infinite limits are allowed and mean "unclamped".
        let l = &config.limits;
        for (name, v) in [("q_limit", l.q_limit), ("dq_limit", l.dq_limit), ("omega_limit", l.omega_limit)] {
            if v.is_nan() || v < 0.0 {
                return Err(SimError::invalid_config(format!("{name} must be non-negative, got {v}")));
            }
        }

        if !self.target.iter().all(|v| v.is_finite()) {
            return Err(SimError::invalid_config("target must be finite"));
        }
        if !self.initial.is_finite() {
            return Err(SimError::invalid_config("initial state must be finite"));
        }
        Ok(())
    }
}

fn positive(name: &str, v: f64) -> Result<(), SimError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(format!("{name} must be positive and finite, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> Result<(), SimError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(format!("{name} must be non-negative and finite, got {v}")))
    }
}

// ---------------------------------------------------------------------------
// Scenario builder
// ---------------------------------------------------------------------------

pub struct ScenarioBuilder {
    name: String,
    spacecraft: Spacecraft,
    target: Vector2<f64>,
    goal_tolerance: f64,
    initial: State,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            spacecraft: SpacecraftBuilder::new(name.clone()).build(),
            name,
            target: Vector2::zeros(),
            goal_tolerance: 0.1,
            initial: State::default(),
        }
    }

    pub fn spacecraft(mut self, craft: Spacecraft) -> Self { self.spacecraft = craft; self }
    pub fn target(mut self, x: f64, y: f64) -> Self { self.target = Vector2::new(x, y); self }
    pub fn goal_tolerance(mut self, v: f64) -> Self { self.goal_tolerance = v; self }
    pub fn initial(mut self, state: State) -> Self { self.initial = state; self }

    pub fn build(self) -> Scenario {
        Scenario {
            name: self.name,
            spacecraft: self.spacecraft,
            target: self.target,
            goal_tolerance: self.goal_tolerance,
            initial: self.initial,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset scenarios
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Reference reach: 10 kg base, unit links, target at (4, 4).
    pub fn reach_target() -> Scenario {
        ScenarioBuilder::new("Reach (4, 4)")
            .spacecraft(
                SpacecraftBuilder::new("Free-flyer")
                    .mass(10.0)
                    .inertia(10.0)
                    .thruster_force(0.2)
                    .links(1.0, 1.0)
                    .link_masses(5.0, 5.0)
                    .build(),
            )
            .target(4.0, 4.0)
            .goal_tolerance(0.1)
            .initial(State::from_array([
                0.0, 0.0, 0.0,
                30.0_f64.to_radians(), -45.0_f64.to_radians(),
                0.0, 0.0, 0.0,
                0.0, 0.0,
            ]))
            .build()
    }

    /// Target inside the arm's reach, thruster off.
    pub fn close_reach() -> Scenario {
        let mut s = reach_target();
        s.name = "Close reach".into();
        s.target = Vector2::new(1.5, 0.5);
        s.spacecraft.thruster_force = 0.0;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::Limits;

    #[test]
    fn reference_scenario_is_valid() {
        let s = presets::reach_target();
        assert!(s.validate(&SimConfig::default()).is_ok());
        assert!(!s.goal_reached(&s.initial));
    }

    #[test]
    fn error_is_tip_minus_target() {
        let s = ScenarioBuilder::new("T").target(2.0, 0.0).build();
        // Straight arm along +x reaches (2, 0).
        let e = s.end_effector_error(&State::default());
        assert!(e.norm() < 1e-12);
        assert!(s.goal_reached(&State::default()));
    }

    #[test]
    fn rejects_non_positive_mass_and_inertia() {
        let mut s = presets::reach_target();
        s.spacecraft.mass = 0.0;
        assert!(matches!(s.validate(&SimConfig::default()), Err(SimError::InvalidConfig { .. })));

        let mut s = presets::reach_target();
        s.spacecraft.inertia = -1.0;
        assert!(s.validate(&SimConfig::default()).is_err());
    }

    #[test]
    fn rejects_bad_dt_and_steps() {
        let s = presets::reach_target();
        assert!(s.validate(&SimConfig::default().with_dt(0.0)).is_err());
        assert!(s.validate(&SimConfig::default().with_dt(f64::NAN)).is_err());
        assert!(s.validate(&SimConfig::default().with_max_steps(0)).is_err());
    }

    #[test]
    fn unbounded_limits_accepted_negative_rejected() {
        let s = presets::reach_target();
        assert!(s.validate(&SimConfig::default().with_limits(Limits::unbounded())).is_ok());
        let bad = Limits { dq_limit: -0.1, ..Limits::default() };
        assert!(s.validate(&SimConfig::default().with_limits(bad)).is_err());
    }

    #[test]
    fn rejects_non_finite_initial_state() {
        let mut s = presets::reach_target();
        s.initial.vel.x = f64::INFINITY;
        assert!(s.validate(&SimConfig::default()).is_err());
    }
}
