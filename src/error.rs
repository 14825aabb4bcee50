use thiserror::Error;

use crate::dynamics::state::State;

/// Why a step could not produce a usable next state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Degeneracy {
    #[error("mass matrix has non-finite entries")]
    NonFiniteMassMatrix,

    #[error("mass matrix is singular (det = {det:e})")]
    SingularMassMatrix { det: f64 },

    #[error("mass matrix is ill-conditioned (cond ~ {cond:e})")]
    IllConditioned { cond: f64 },

    #[error("joint or base acceleration is not finite")]
    NonFiniteAccel,

    #[error("integrated state is not finite")]
    NonFiniteState,
}

/// Errors raised by the free-flyer simulation.
///
/// Near-singular Jacobians and near-zero thruster distances never show up
/// here: the controller and thruster absorb them locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Configuration rejected before the loop starts.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Dynamics degenerated; the run stops at the last valid state.
    #[error("numerical degeneracy at step {step}: {reason}")]
    NumericalDegeneracy {
        step: usize,
        reason: Degeneracy,
        /// Last valid state before the failing update.
        state: State,
    },
}

impl SimError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        SimError::InvalidConfig { reason: reason.into() }
    }
}
