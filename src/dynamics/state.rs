use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Numerical constants
// ---------------------------------------------------------------------------

/// Guard for normalizing near-zero vectors (thruster pointing).
pub const DIRECTION_EPS: f64 = 1e-6;

/// Frobenius condition estimate above which the mass matrix is rejected.
pub const MAX_CONDITION: f64 = 1e12;

// ---------------------------------------------------------------------------
// Planar free-flyer state: base pose, arm configuration, and their rates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub pos: Vector2<f64>,    // m, inertial
    pub phi: f64,             // rad, base orientation
    pub q: Vector2<f64>,      // rad, [q1, q2]
    pub vel: Vector2<f64>,    // m/s, inertial
    pub omega: f64,           // rad/s, base angular rate
    pub dq: Vector2<f64>,     // rad/s, [dq1, dq2]
}

impl State {
    /// Build from `[x, y, phi, q1, q2, vx, vy, omega, dq1, dq2]`.
    pub fn from_array(v: [f64; 10]) -> Self {
        Self {
            pos: Vector2::new(v[0], v[1]),
            phi: v[2],
            q: Vector2::new(v[3], v[4]),
            vel: Vector2::new(v[5], v[6]),
            omega: v[7],
            dq: Vector2::new(v[8], v[9]),
        }
    }

    pub fn to_array(&self) -> [f64; 10] {
        [
            self.pos.x, self.pos.y, self.phi,
            self.q.x, self.q.y,
            self.vel.x, self.vel.y, self.omega,
            self.dq.x, self.dq.y,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::from_array([0.0; 10])
    }
}

// ---------------------------------------------------------------------------
// Per-step actuation (what the controller, reaction model, and thruster emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Actuation {
    pub tau: Vector2<f64>,         // N·m, commanded joint torques
    pub tau_reaction: f64,         // N·m, torque on the base
    pub thrust: Vector2<f64>,      // N, inertial
    pub ddq: Vector2<f64>,         // rad/s^2
    pub alpha: f64,                // rad/s^2, base angular acceleration
}

// ---------------------------------------------------------------------------
// State limits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub q_limit: f64,       // rad
    pub dq_limit: f64,      // rad/s
    pub omega_limit: f64,   // rad/s
}

impl Limits {
    /// No clamping at all.
    pub fn unbounded() -> Self {
        Self {
            q_limit: f64::INFINITY,
            dq_limit: f64::INFINITY,
            omega_limit: f64::INFINITY,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            q_limit: 150.0_f64.to_radians(),
            dq_limit: 50.0_f64.to_radians(),
            omega_limit: 1.0,
        }
    }
}

/// How commanded joint torque becomes joint acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CouplingMode {
    /// Solve `H·ddq = tau - C·dq` with the full arm mass and Coriolis matrices.
    #[default]
    Coupled,
    /// `ddq = tau`: unit joint inertia, no Coriolis terms.
    Decoupled,
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub dt: f64,
    pub max_steps: usize,
    pub limits: Limits,
    pub coupling: CouplingMode,
}

impl SimConfig {
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_coupling(mut self, coupling: CouplingMode) -> Self {
        self.coupling = coupling;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,          // 10 Hz
            max_steps: 1000,
            limits: Limits::default(),
            coupling: CouplingMode::Coupled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_layout_matches_fields() {
        let s = State::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(s.pos, Vector2::new(1.0, 2.0));
        assert_eq!(s.phi, 3.0);
        assert_eq!(s.q, Vector2::new(4.0, 5.0));
        assert_eq!(s.vel, Vector2::new(6.0, 7.0));
        assert_eq!(s.omega, 8.0);
        assert_eq!(s.dq, Vector2::new(9.0, 10.0));
        assert_eq!(State::from_array(s.to_array()), s);
    }

    #[test]
    fn nan_state_is_not_finite() {
        let mut s = State::default();
        assert!(s.is_finite());
        s.omega = f64::NAN;
        assert!(!s.is_finite());
    }

    #[test]
    fn default_limits_in_radians() {
        let l = Limits::default();
        assert!((l.q_limit - 2.617_993_877_991_494).abs() < 1e-12);
        assert!((l.dq_limit - 0.872_664_625_997_164_8).abs() < 1e-12);
        assert_eq!(l.omega_limit, 1.0);
    }
}
