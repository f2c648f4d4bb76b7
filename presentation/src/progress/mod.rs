//! Progress reporting adapters.

pub mod reporter;

pub use reporter::{ProgressReporter, SimpleProgress};
