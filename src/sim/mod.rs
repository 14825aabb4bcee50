pub mod integrator;
pub mod history;
pub mod runner;

pub use runner::{simulate, simulate_with, Simulation};
pub use history::{History, HistoryRecord, SimOutcome, Termination};
pub use integrator::{clamp_symmetric, euler_step};
