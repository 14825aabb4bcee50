use nalgebra::{Matrix2, Vector2};

use crate::dynamics::kinematics;
use crate::dynamics::state::State;
use crate::error::SimError;
use crate::vehicle::Scenario;

// ---------------------------------------------------------------------------
// Task-space PD controller: Cartesian tip error → joint torque
// ---------------------------------------------------------------------------

/// How the Cartesian force command is mapped back to joint space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JacobianInversion {
    /// `(JᵀJ + λI)⁻¹ Jᵀ`: damped least squares, stays bounded at
    /// stretched (`q2 = 0`) and folded (`q2 = π`) poses.
    DampedLeastSquares { lambda: f64 },
    /// Plain `Jᵀ`.
    Transpose,
}

#[derive(Debug, Clone)]
pub struct TaskSpaceController {
    pub kp: f64,
    pub kd: f64,
    pub inversion: JacobianInversion,
}

impl TaskSpaceController {
    pub fn new(kp: f64, kd: f64, inversion: JacobianInversion) -> Self {
        Self { kp, kd, inversion }
    }

    /// Joint torques for the tip error `x_err` and its rate `dx_err`,
    /// given the body-frame Jacobian.
    pub fn torque(&self, j: &Matrix2<f64>, x_err: &Vector2<f64>, dx_err: &Vector2<f64>) -> Vector2<f64> {
        let f = x_err * self.kp + dx_err * self.kd;
        let jt = j.transpose();
        match self.inversion {
            JacobianInversion::DampedLeastSquares { lambda } => {
                let j_reg = jt * j + Matrix2::identity() * lambda;
                -(damped_inverse(&j_reg) * jt * f)
            }
            JacobianInversion::Transpose => -(jt * f),
        }
    }
}

/// Inverse of the regularized normal matrix. Falls back to the SVD
/// pseudo-inverse when `λ = 0` leaves it singular.
fn damped_inverse(j_reg: &Matrix2<f64>) -> Matrix2<f64> {
    match j_reg.try_inverse() {
        Some(inv) => inv,
        None => j_reg.pseudo_inverse(1e-12).unwrap_or_else(|_| Matrix2::zeros()),
    }
}

impl Default for TaskSpaceController {
    fn default() -> Self {
        Self::new(100.0, 50.0, JacobianInversion::DampedLeastSquares { lambda: 1e-6 })
    }
}

impl super::Controller for TaskSpaceController {
    fn control(&mut self, state: &State, scenario: &Scenario) -> Vector2<f64> {
        let arm = &scenario.spacecraft.arm;
        let x_err = scenario.end_effector_error(state);
        let dx_err = kinematics::end_effector_velocity(state.phi, &state.q, &state.dq, arm);
        let j = kinematics::jacobian(&state.q, arm);
        self.torque(&j, &x_err, &dx_err)
    }

    fn validate(&self) -> Result<(), SimError> {
        if !self.kp.is_finite() || !self.kd.is_finite() {
            return Err(SimError::invalid_config(format!(
                "controller gains must be finite (kp = {}, kd = {})",
                self.kp, self.kd
            )));
        }
        if let JacobianInversion::DampedLeastSquares { lambda } = self.inversion {
            if !lambda.is_finite() || lambda < 0.0 {
                return Err(SimError::invalid_config(format!(
                    "regularization factor must be non-negative, got {lambda}"
                )));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.inversion {
            JacobianInversion::DampedLeastSquares { .. } => "TaskSpace/DLS",
            JacobianInversion::Transpose => "TaskSpace/Jt",
        }
    }
}
