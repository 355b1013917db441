//! Release decision and reporting.
//!
//! - [`engine`] resolves the release request and decides whether the
//!   tracker needs to be called
//! - [`report`] turns the outcome into build log lines and a build result

pub mod engine;
pub mod report;

pub use engine::{evaluate, find_by_name, resolve, Outcome, ResolvedRequest};
pub use report::{report, BuildResult};
