//! Translating an [`Outcome`] into build log lines and a build result.

use super::engine::Outcome;
use crate::ui::BuildListener;

/// Effect of the release action on the build status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildResult {
    /// Build status is left as it was.
    Unchanged,
    /// The build must be marked failed.
    Failure,
}

impl BuildResult {
    /// Process exit code for this result.
    pub fn exit_code(&self) -> u8 {
        match self {
            BuildResult::Unchanged => 0,
            BuildResult::Failure => 1,
        }
    }
}

/// Write the outcome to the build log and decide the build result.
///
/// Failures are logged with their full cause chain.
pub fn report(outcome: &Outcome, listener: &mut dyn BuildListener) -> BuildResult {
    match outcome {
        Outcome::AlreadyReleased(request) => {
            listener.skipped(&format!(
                "The version {} is already released in project {}, so nothing to do.",
                request.release_name, request.project_key
            ));
            BuildResult::Unchanged
        }
        Outcome::Released(request) => {
            listener.success(&format!(
                "Released version {} in project {}",
                request.release_name, request.project_key
            ));
            BuildResult::Unchanged
        }
        Outcome::Failed(err) => {
            tracing::error!("Release failed: {}", err);
            let header = match err.target() {
                Some((release, project)) => format!(
                    "Unable to release version '{}' of project '{}': {}",
                    release, project, err
                ),
                None => format!("Unable to release version: {}", err),
            };
            listener.fatal_error(&header);
            for cause in err.causes() {
                listener.trace(&cause);
            }
            BuildResult::Failure
        }
    }
}
