pub mod reaction;
pub mod thruster;

pub use reaction::{base_angular_accel, reaction_torque};
pub use thruster::{thrust, thrust_accel};
