use crate::dynamics::state::{Actuation, Limits, State};

// ---------------------------------------------------------------------------
// Fixed-step explicit Euler with per-state clamping
// ---------------------------------------------------------------------------

/// Clamp `v` to `[-limit, limit]`. An infinite limit leaves `v` untouched.
pub fn clamp_symmetric(v: f64, limit: f64) -> f64 {
    v.clamp(-limit, limit)
}

/// Advance one step of `dt`.
///
/// Rates are updated and clamped before they integrate their angles; that
/// ordering is part of the trajectory and must not change. Base orientation,
/// position, and linear velocity are never clamped.
pub fn euler_step(state: &State, act: &Actuation, mass: f64, limits: &Limits, dt: f64) -> State {
    let dq = (state.dq + act.ddq * dt).map(|v| clamp_symmetric(v, limits.dq_limit));
    let q = (state.q + dq * dt).map(|v| clamp_symmetric(v, limits.q_limit));

    let omega = clamp_symmetric(state.omega + act.alpha * dt, limits.omega_limit);
    let phi = state.phi + omega * dt;

    let vel = state.vel + (act.thrust / mass) * dt;
    let pos = state.pos + vel * dt;

    State { pos, phi, q, vel, omega, dq }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn tight() -> Limits {
        Limits { q_limit: 1.0, dq_limit: 0.5, omega_limit: 0.2 }
    }

    #[test]
    fn clamp_symmetric_bounds() {
        assert_eq!(clamp_symmetric(3.0, 1.0), 1.0);
        assert_eq!(clamp_symmetric(-3.0, 1.0), -1.0);
        assert_eq!(clamp_symmetric(0.25, 1.0), 0.25);
        assert_eq!(clamp_symmetric(1e300, f64::INFINITY), 1e300);
    }

    #[test]
    fn rates_clamped_before_integrating_angles() {
        let act = Actuation { ddq: Vector2::new(100.0, -100.0), alpha: 50.0, ..Default::default() };
        let next = euler_step(&State::default(), &act, 10.0, &tight(), 0.1);
        assert_eq!(next.dq, Vector2::new(0.5, -0.5));
        // Angle advanced with the clamped rate, not the raw one.
        assert!((next.q - Vector2::new(0.05, -0.05)).norm() < 1e-15);
        assert_eq!(next.omega, 0.2);
        assert!((next.phi - 0.02).abs() < 1e-15);
    }

    #[test]
    fn angles_clamped_at_limit() {
        let mut s = State::default();
        s.q = Vector2::new(0.99, -0.99);
        s.dq = Vector2::new(0.5, -0.5);
        let next = euler_step(&s, &Actuation::default(), 10.0, &tight(), 0.1);
        assert_eq!(next.q, Vector2::new(1.0, -1.0));
    }

    #[test]
    fn translation_semi_implicit_and_unclamped() {
        let mut s = State::default();
        s.vel = Vector2::new(100.0, 0.0);
        let act = Actuation { thrust: Vector2::new(0.0, 2.0), ..Default::default() };
        let next = euler_step(&s, &act, 10.0, &tight(), 0.5);
        assert!((next.vel - Vector2::new(100.0, 0.1)).norm() < 1e-12);
        // Position uses the updated velocity.
        assert!((next.pos - Vector2::new(50.0, 0.05)).norm() < 1e-12);
    }

    #[test]
    fn phi_not_clamped() {
        let mut s = State::default();
        s.phi = 100.0;
        s.omega = 0.2;
        let next = euler_step(&s, &Actuation::default(), 10.0, &tight(), 1.0);
        assert!((next.phi - 100.2).abs() < 1e-12);
    }
}
