mod runner;
mod summary;

#[cfg(test)]
mod tests;

pub use runner::{RunReport, run_benchmark, save_failure_log};
pub use summary::{print_run_header, print_summary};
