use nalgebra::Vector2;

use crate::dynamics::state::State;
use crate::error::SimError;
use crate::vehicle::Scenario;

/// Trait for manipulator controllers.
///
/// Implement this to plug a custom joint-torque law into the simulation loop.
pub trait Controller {
    /// Compute joint torques `[tau1, tau2]` for the current state.
    fn control(&mut self, state: &State, scenario: &Scenario) -> Vector2<f64>;

    /// Check gains before the loop starts.
    fn validate(&self) -> Result<(), SimError> {
        Ok(())
    }

    /// Reset controller internal state, if any.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
