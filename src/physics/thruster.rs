use nalgebra::Vector2;

use crate::dynamics::state::DIRECTION_EPS;

/// Constant-magnitude thrust pointed from `pos` at `target` (inertial, N).
///
/// The thruster never throttles: any nonzero offset yields `force` newtons.
/// Inside `DIRECTION_EPS` of the target the magnitude scales with distance,
/// so it stays bounded and is exactly zero on the target.
pub fn thrust(pos: &Vector2<f64>, target: &Vector2<f64>, force: f64) -> Vector2<f64> {
    let error = target - pos;
    error * (force / error.norm().max(DIRECTION_EPS))
}

/// Translational acceleration of the base under thrust.
pub fn thrust_accel(thrust: &Vector2<f64>, mass: f64) -> Vector2<f64> {
    thrust / mass
}
