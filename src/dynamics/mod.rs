pub mod state;
pub mod kinematics;
pub mod manipulator;

pub use state::{Actuation, CouplingMode, Limits, SimConfig, State};
pub use kinematics::{forward, jacobian, rotation, ArmPose};
pub use manipulator::{coriolis_matrix, joint_accel, mass_matrix};
