pub mod controller;
pub mod task_space;

pub use controller::Controller;
pub use task_space::{JacobianInversion, TaskSpaceController};
