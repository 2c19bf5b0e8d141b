pub mod fill_step;

pub use fill_step::{FillStep, StepReport};
