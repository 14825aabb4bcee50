use nalgebra::{Matrix2, Vector2};

use crate::dynamics::state::MAX_CONDITION;
use crate::error::Degeneracy;
use crate::vehicle::Spacecraft;

// ---------------------------------------------------------------------------
// 2-link arm rigid-body dynamics (base inertia lumped into the diagonal)
// ---------------------------------------------------------------------------

/// Joint-space mass matrix H(q).
pub fn mass_matrix(q: &Vector2<f64>, craft: &Spacecraft) -> Matrix2<f64> {
    let arm = &craft.arm;
    let c2 = q.y.cos();
    let h11 = arm.m1 * 0.25
        + arm.m2 * (arm.l1 * arm.l1 + arm.l2 * arm.l2)
        + 2.0 * arm.m2 * arm.l1 * arm.l2 * c2
        + craft.inertia;
    let h22 = arm.m2 * arm.l2 * arm.l2 + craft.inertia;
    let h12 = arm.m2 * arm.l1 * arm.l2 * c2;
    Matrix2::new(h11, h12, h12, h22)
}

/// Coriolis/centrifugal matrix C(q, dq).
pub fn coriolis_matrix(q: &Vector2<f64>, dq: &Vector2<f64>, craft: &Spacecraft) -> Matrix2<f64> {
    let arm = &craft.arm;
    let h = -arm.m2 * arm.l1 * arm.l2 * q.y.sin();
    Matrix2::new(
        h * dq.y, h * (dq.x + dq.y),
        -h * dq.x, 0.0,
    )
}

/// Solve `H·ddq = tau - C·dq` for the joint accelerations.
///
/// Fails when H is singular, ill-conditioned, or non-finite. The runner
/// turns that into `SimError::NumericalDegeneracy`.
pub fn joint_accel(
    q: &Vector2<f64>,
    dq: &Vector2<f64>,
    tau: &Vector2<f64>,
    craft: &Spacecraft,
) -> Result<Vector2<f64>, Degeneracy> {
    let h = mass_matrix(q, craft);
    let c = coriolis_matrix(q, dq, craft);

    if h.iter().any(|v| !v.is_finite()) {
        return Err(Degeneracy::NonFiniteMassMatrix);
    }
    let h_inv = h
        .try_inverse()
        .ok_or_else(|| Degeneracy::SingularMassMatrix { det: h.determinant() })?;
    let cond = h.norm() * h_inv.norm();
    if !cond.is_finite() || cond > MAX_CONDITION {
        return Err(Degeneracy::IllConditioned { cond });
    }

    let ddq = h_inv * (tau - c * dq);
    if ddq.iter().any(|v| !v.is_finite()) {
        return Err(Degeneracy::NonFiniteAccel);
    }
    Ok(ddq)
}
