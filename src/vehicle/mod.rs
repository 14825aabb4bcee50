pub mod spacecraft;
pub mod scenario;

pub use spacecraft::{Manipulator, Spacecraft, SpacecraftBuilder};
pub use scenario::{presets, Scenario, ScenarioBuilder};
