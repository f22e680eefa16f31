mod engine;
mod runner;

pub use engine::{Scanner, create_progress_bar};
pub use runner::run_scan;
