use nalgebra::Vector2;

/// Torque the arm exerts back on the base: the negative of the summed joint
/// torques (angular momentum is conserved across the shoulder).
pub fn reaction_torque(tau: &Vector2<f64>) -> f64 {
    -(tau.x + tau.y)
}

/// Base angular acceleration from the reaction torque.
pub fn base_angular_accel(tau_reaction: f64, inertia: f64) -> f64 {
    tau_reaction / inertia
}
