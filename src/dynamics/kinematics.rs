use nalgebra::{Matrix2, Vector2};

use crate::vehicle::Manipulator;

// ---------------------------------------------------------------------------
// Planar 2-link forward kinematics on a rotating base
// ---------------------------------------------------------------------------

/// Elbow and end-effector positions, inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPose {
    pub elbow: Vector2<f64>,
    pub end_effector: Vector2<f64>,
}

/// Standard 2D rotation, body → inertial.
pub fn rotation(phi: f64) -> Matrix2<f64> {
    let (s, c) = phi.sin_cos();
    Matrix2::new(c, -s, s, c)
}

/// Forward kinematics with the arm mounted at the base origin.
pub fn forward(pos: &Vector2<f64>, phi: f64, q: &Vector2<f64>, arm: &Manipulator) -> ArmPose {
    let r = rotation(phi);
    let q12 = q.x + q.y;
    let elbow = pos + r * Vector2::new(arm.l1 * q.x.cos(), arm.l1 * q.x.sin());
    let end_effector = elbow + r * Vector2::new(arm.l2 * q12.cos(), arm.l2 * q12.sin());
    ArmPose { elbow, end_effector }
}

/// Body-frame Jacobian: joint rates → end-effector linear velocity.
pub fn jacobian(q: &Vector2<f64>, arm: &Manipulator) -> Matrix2<f64> {
    let (s1, c1) = q.x.sin_cos();
    let (s12, c12) = (q.x + q.y).sin_cos();
    Matrix2::new(
        -arm.l1 * s1 - arm.l2 * s12, -arm.l2 * s12,
        arm.l1 * c1 + arm.l2 * c12,  arm.l2 * c12,
    )
}

/// End-effector velocity from joint motion only, rotated into the inertial
/// frame. Base translation and rotation rates are not included.
pub fn end_effector_velocity(phi: f64, q: &Vector2<f64>, dq: &Vector2<f64>, arm: &Manipulator) -> Vector2<f64> {
    rotation(phi) * jacobian(q, arm) * dq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_arm() -> Manipulator {
        Manipulator { l1: 1.0, l2: 1.0, m1: 5.0, m2: 5.0 }
    }

    #[test]
    fn elbow_and_tip_at_reference_pose() {
        let q = Vector2::new(30.0_f64.to_radians(), -45.0_f64.to_radians());
        let pose = forward(&Vector2::zeros(), 0.0, &q, &unit_arm());

        assert!((pose.elbow.x - 0.8660).abs() < 1e-4);
        assert!((pose.elbow.y - 0.5000).abs() < 1e-4);

        // Second link sits at q1 + q2 = -15 deg.
        let expected = pose.elbow + Vector2::new((-15.0_f64).to_radians().cos(), (-15.0_f64).to_radians().sin());
        assert!((pose.end_effector - expected).norm() < 1e-12);
        assert!((pose.end_effector.x - 1.8320).abs() < 1e-4);
        assert!((pose.end_effector.y - 0.2412).abs() < 1e-4);
    }

    #[test]
    fn base_pose_translates_and_rotates_arm() {
        let arm = unit_arm();
        let q = Vector2::new(0.0, 0.0);
        let pose = forward(&Vector2::new(3.0, -1.0), std::f64::consts::FRAC_PI_2, &q, &arm);
        // Straight arm along body x, body x points along inertial +y.
        assert!((pose.elbow - Vector2::new(3.0, 0.0)).norm() < 1e-12);
        assert!((pose.end_effector - Vector2::new(3.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn rotation_is_orthonormal() {
        let r = rotation(0.7);
        assert!((r.transpose() * r - Matrix2::identity()).norm() < 1e-12);
        assert!((r.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn jacobian_matches_finite_difference() {
        let arm = Manipulator { l1: 1.2, l2: 0.7, m1: 1.0, m2: 1.0 };
        let q = Vector2::new(0.4, -1.1);
        let j = jacobian(&q, &arm);
        let h = 1e-6;
        for col in 0..2 {
            let mut qp = q;
            let mut qm = q;
            qp[col] += h;
            qm[col] -= h;
            let fp = forward(&Vector2::zeros(), 0.0, &qp, &arm).end_effector;
            let fm = forward(&Vector2::zeros(), 0.0, &qm, &arm).end_effector;
            let fd = (fp - fm) / (2.0 * h);
            assert!((fd - j.column(col)).norm() < 1e-6, "column {} mismatch", col);
        }
    }

    #[test]
    fn jacobian_singular_when_stretched() {
        let j = jacobian(&Vector2::new(0.3, 0.0), &unit_arm());
        assert!(j.determinant().abs() < 1e-12);
    }

    #[test]
    fn tip_velocity_rotates_with_base() {
        let arm = unit_arm();
        let q = Vector2::new(0.2, 0.5);
        let dq = Vector2::new(0.1, -0.3);
        let body = end_effector_velocity(0.0, &q, &dq, &arm);
        let world = end_effector_velocity(1.0, &q, &dq, &arm);
        assert!((world - rotation(1.0) * body).norm() < 1e-12);
        assert!((world.norm() - body.norm()).abs() < 1e-12);
    }
}
