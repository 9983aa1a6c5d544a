mod artifacts;
pub mod scenario;

pub use artifacts::{FailureState, failure_dir};
