mod step_controller;

pub use step_controller::{StepController, StepOutcome};
