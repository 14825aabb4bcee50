pub mod dynamics;
pub mod error;
pub mod gnc;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use error::{Degeneracy, SimError};

pub mod types {
    pub use crate::dynamics::state::{Actuation, CouplingMode, Limits, SimConfig, State};
    pub use crate::vehicle::{Manipulator, Scenario, Spacecraft};
}
