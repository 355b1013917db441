//! Release decision engine.
//!
//! [`evaluate`] resolves the configured templates, looks up the project's
//! versions and releases the matching one unless it is already released.
//! It never returns an error: every failure becomes [`Outcome::Failed`]
//! with the original cause attached. A panic inside a collaborator is
//! caught and reported as [`ReleaseError::Panicked`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::config::{Expander, ReleaseTemplates};
use crate::error::{ReleaseError, Result};
use crate::tracker::{ReleaseInvoker, Version, VersionDirectory};

/// Project key and release name after expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// Tracker project identifier.
    pub project_key: String,
    /// Name of the version to release, never empty.
    pub release_name: String,
}

/// Terminal result of one evaluation.
#[derive(Debug)]
pub enum Outcome {
    /// The version was released before this run, nothing was changed.
    AlreadyReleased(ResolvedRequest),
    /// The version was released by this run.
    Released(ResolvedRequest),
    /// The run failed, the build must be marked failed.
    Failed(ReleaseError),
}

impl Outcome {
    /// Whether the build status is left untouched.
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }

    /// The resolved request, when expansion succeeded.
    pub fn request(&self) -> Option<&ResolvedRequest> {
        match self {
            Outcome::AlreadyReleased(request) | Outcome::Released(request) => Some(request),
            Outcome::Failed(_) => None,
        }
    }
}

/// Decide and perform the release for one build.
pub fn evaluate<D, I>(
    templates: &ReleaseTemplates,
    environment: &dyn Expander,
    directory: D,
    invoker: I,
) -> Outcome
where
    D: VersionDirectory,
    I: ReleaseInvoker,
{
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
        try_evaluate(templates, environment, &directory, &invoker)
    }));

    match attempt {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => {
            tracing::debug!("Release evaluation failed: {}", err);
            Outcome::Failed(err)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!("Release evaluation panicked: {}", message);
            Outcome::Failed(ReleaseError::Panicked { message })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn try_evaluate(
    templates: &ReleaseTemplates,
    environment: &dyn Expander,
    directory: &dyn VersionDirectory,
    invoker: &dyn ReleaseInvoker,
) -> Result<Outcome> {
    let request = resolve(templates, environment)?;
    tracing::debug!(
        "Resolved release '{}' in project {}",
        request.release_name,
        request.project_key
    );

    let versions =
        directory
            .list_versions(&request.project_key)
            .map_err(|source| ReleaseError::Lookup {
                project_key: request.project_key.clone(),
                release_name: request.release_name.clone(),
                source,
            })?;
    tracing::debug!(
        "Project {} has {} versions",
        request.project_key,
        versions.len()
    );

    let matching = find_by_name(&versions, &request.release_name);
    match matching.as_slice() {
        [version] if version.released => {
            tracing::info!(
                "Version {} is already released in project {}",
                request.release_name,
                request.project_key
            );
            Ok(Outcome::AlreadyReleased(request))
        }
        [_] => {
            invoker
                .release_version(&request.project_key, &request.release_name)
                .map_err(|source| ReleaseError::ReleaseInvocation {
                    project_key: request.project_key.clone(),
                    release_name: request.release_name.clone(),
                    source,
                })?;
            tracing::info!(
                "Released version {} in project {}",
                request.release_name,
                request.project_key
            );
            Ok(Outcome::Released(request))
        }
        others => {
            if others.len() > 1 {
                tracing::warn!(
                    "Project {} has {} versions named '{}'",
                    request.project_key,
                    others.len(),
                    request.release_name
                );
            }
            Err(ReleaseError::AmbiguousOrMissingVersion {
                project_key: request.project_key,
                release_name: request.release_name,
                matches: others.len(),
            })
        }
    }
}

/// Expand both templates, rejecting an empty release name or project key.
pub fn resolve(templates: &ReleaseTemplates, environment: &dyn Expander) -> Result<ResolvedRequest> {
    let release_name = expand(environment, &templates.release_name)?;
    let project_key = expand(environment, &templates.project_key)?;

    if release_name.is_empty() {
        return Err(ReleaseError::Configuration {
            message: format!("Release is empty (template '{}')", templates.release_name),
            project_key,
            release_name,
        });
    }
    if project_key.is_empty() {
        return Err(ReleaseError::Configuration {
            message: format!("Project key is empty (template '{}')", templates.project_key),
            project_key,
            release_name,
        });
    }

    Ok(ResolvedRequest {
        project_key,
        release_name,
    })
}

fn expand(environment: &dyn Expander, template: &str) -> Result<String> {
    environment
        .expand(template)
        .map_err(|source| ReleaseError::Expansion {
            template: template.to_string(),
            source,
        })
}

/// Versions whose name equals `name` exactly.
pub fn find_by_name<'a>(versions: &'a [Version], name: &str) -> Vec<&'a Version> {
    let mut matching = Vec::new();
    for version in versions {
        if version.name == name {
            matching.push(version);
        }
    }
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildEnvironment;
    use anyhow::anyhow;
    use std::cell::RefCell;

    /// Directory returning a fixed version set, or a failure.
    struct FakeDirectory {
        versions: anyhow::Result<Vec<Version>, String>,
        lookups: RefCell<Vec<String>>,
    }

    impl FakeDirectory {
        fn with(versions: Vec<Version>) -> Self {
            Self {
                versions: Ok(versions),
                lookups: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                versions: Err(message.to_string()),
                lookups: RefCell::new(Vec::new()),
            }
        }
    }

    impl VersionDirectory for FakeDirectory {
        fn list_versions(&self, project_key: &str) -> anyhow::Result<Vec<Version>> {
            self.lookups.borrow_mut().push(project_key.to_string());
            self.versions.clone().map_err(|m| anyhow!(m))
        }
    }

    /// Invoker recording every call.
    #[derive(Default)]
    struct RecordingInvoker {
        calls: RefCell<Vec<(String, String)>>,
        fail_with: Option<String>,
    }

    impl RecordingInvoker {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.borrow().clone()
        }
    }

    impl ReleaseInvoker for RecordingInvoker {
        fn release_version(&self, project_key: &str, release_name: &str) -> anyhow::Result<()> {
            self.calls
                .borrow_mut()
                .push((project_key.to_string(), release_name.to_string()));
            match &self.fail_with {
                Some(message) => Err(anyhow!(message.clone())),
                None => Ok(()),
            }
        }
    }

    /// Directory that panics on lookup.
    struct PanickingDirectory;

    impl VersionDirectory for PanickingDirectory {
        fn list_versions(&self, _project_key: &str) -> anyhow::Result<Vec<Version>> {
            let versions: Vec<Version> = Vec::new();
            Ok(vec![versions[0].clone()])
        }
    }

    struct BrokenExpander;

    impl Expander for BrokenExpander {
        fn expand(&self, _template: &str) -> anyhow::Result<String> {
            Err(anyhow!("environment unavailable"))
        }
    }

    fn templates() -> ReleaseTemplates {
        ReleaseTemplates::new("PROJ", "1.2.0")
    }

    fn env() -> BuildEnvironment {
        BuildEnvironment::new()
    }

    #[test]
    fn releases_single_unreleased_match() {
        let directory = FakeDirectory::with(vec![
            Version::new("1.2.0", false),
            Version::new("1.3.0", false),
        ]);
        let invoker = RecordingInvoker::default();

        let outcome = evaluate(&templates(), &env(), &directory, &invoker);

        assert!(matches!(&outcome, Outcome::Released(r) if r.release_name == "1.2.0"));
        assert_eq!(
            invoker.calls(),
            vec![("PROJ".to_string(), "1.2.0".to_string())]
        );
    }

    #[test]
    fn already_released_makes_no_call() {
        let directory = FakeDirectory::with(vec![
            Version::new("1.2.0", true),
            Version::new("1.3.0", false),
        ]);
        let invoker = RecordingInvoker::default();

        let outcome = evaluate(&templates(), &env(), &directory, &invoker);

        assert!(matches!(outcome, Outcome::AlreadyReleased(_)));
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn already_released_is_idempotent() {
        let directory = FakeDirectory::with(vec![Version::new("1.2.0", true)]);
        let invoker = RecordingInvoker::default();

        for _ in 0..3 {
            let outcome = evaluate(&templates(), &env(), &directory, &invoker);
            assert!(outcome.is_success());
            assert!(matches!(outcome, Outcome::AlreadyReleased(_)));
        }
        assert!(invoker.calls().is_empty());
        assert_eq!(directory.lookups.borrow().len(), 3);
    }

    #[test]
    fn empty_release_name_is_configuration_error() {
        let directory = FakeDirectory::with(vec![Version::new("", false)]);
        let invoker = RecordingInvoker::default();
        let templates = ReleaseTemplates::new("PROJ", "${RELEASE}");
        let env = BuildEnvironment::new().with_var("RELEASE", "");

        let outcome = evaluate(&templates, &env, &directory, &invoker);

        assert!(matches!(
            outcome,
            Outcome::Failed(ReleaseError::Configuration { .. })
        ));
        assert!(invoker.calls().is_empty());
        assert!(directory.lookups.borrow().is_empty());
    }

    #[test]
    fn absent_release_template_is_configuration_error() {
        let directory = FakeDirectory::with(vec![]);
        let invoker = RecordingInvoker::default();
        let templates = ReleaseTemplates::new("PROJ", "");

        let outcome = evaluate(&templates, &env(), &directory, &invoker);

        assert!(matches!(
            outcome,
            Outcome::Failed(ReleaseError::Configuration { .. })
        ));
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn empty_project_key_is_configuration_error() {
        let directory = FakeDirectory::with(vec![]);
        let invoker = RecordingInvoker::default();
        let templates = ReleaseTemplates::new("", "1.2.0");

        let outcome = evaluate(&templates, &env(), &directory, &invoker);

        assert!(matches!(
            outcome,
            Outcome::Failed(ReleaseError::Configuration { .. })
        ));
        assert!(directory.lookups.borrow().is_empty());
    }

    #[test]
    fn duplicate_names_fail_without_call() {
        let directory = FakeDirectory::with(vec![
            Version::new("1.2.0", false),
            Version::new("1.2.0", true),
        ]);
        let invoker = RecordingInvoker::default();

        let outcome = evaluate(&templates(), &env(), &directory, &invoker);

        assert!(matches!(
            outcome,
            Outcome::Failed(ReleaseError::AmbiguousOrMissingVersion { matches: 2, .. })
        ));
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn missing_version_fails_without_call() {
        let directory = FakeDirectory::with(vec![Version::new("1.3.0", false)]);
        let invoker = RecordingInvoker::default();

        let outcome = evaluate(&templates(), &env(), &directory, &invoker);

        assert!(matches!(
            outcome,
            Outcome::Failed(ReleaseError::AmbiguousOrMissingVersion { matches: 0, .. })
        ));
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn name_match_is_exact_and_case_sensitive() {
        let directory = FakeDirectory::with(vec![
            Version::new("v1.2.0", false),
            Version::new("1.2.0 ", false),
            Version::new("1.2", false),
        ]);
        let invoker = RecordingInvoker::default();
        let templates = ReleaseTemplates::new("PROJ", "V1.2.0");

        let outcome = evaluate(&templates, &env(), &directory, &invoker);

        assert!(matches!(
            outcome,
            Outcome::Failed(ReleaseError::AmbiguousOrMissingVersion { matches: 0, .. })
        ));
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn lookup_failure_keeps_cause() {
        let directory = FakeDirectory::failing("connection reset by peer");
        let invoker = RecordingInvoker::default();

        let outcome = evaluate(&templates(), &env(), &directory, &invoker);

        match outcome {
            Outcome::Failed(err @ ReleaseError::Lookup { .. }) => {
                assert!(err.causes().iter().any(|c| c.contains("connection reset")));
            }
            other => panic!("expected lookup failure, got {:?}", other),
        }
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn invoker_failure_keeps_cause() {
        let directory = FakeDirectory::with(vec![Version::new("1.2.0", false)]);
        let invoker = RecordingInvoker::failing("HTTP 403");

        let outcome = evaluate(&templates(), &env(), &directory, &invoker);

        match outcome {
            Outcome::Failed(err @ ReleaseError::ReleaseInvocation { .. }) => {
                assert_eq!(err.causes(), vec!["HTTP 403".to_string()]);
            }
            other => panic!("expected invocation failure, got {:?}", other),
        }
        assert_eq!(invoker.calls().len(), 1);
    }

    #[test]
    fn collaborator_panic_becomes_failure() {
        let invoker = RecordingInvoker::default();

        let outcome = evaluate(&templates(), &env(), PanickingDirectory, &invoker);

        match outcome {
            Outcome::Failed(ReleaseError::Panicked { message }) => {
                assert!(message.contains("index out of bounds"), "{}", message);
            }
            other => panic!("expected panic failure, got {:?}", other),
        }
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn empty_release_error_names_template_and_project() {
        let templates = ReleaseTemplates::new("PROJ", "${RELEASE}");
        let env = BuildEnvironment::new().with_var("RELEASE", "");

        let err = resolve(&templates, &env).unwrap_err();

        assert!(err.to_string().contains("${RELEASE}"), "{}", err);
        assert_eq!(err.target(), Some(("", "PROJ")));
    }

    #[test]
    fn expansion_failure_is_reported() {
        let directory = FakeDirectory::with(vec![Version::new("1.2.0", false)]);
        let invoker = RecordingInvoker::default();

        let outcome = evaluate(&templates(), &BrokenExpander, &directory, &invoker);

        assert!(matches!(
            outcome,
            Outcome::Failed(ReleaseError::Expansion { .. })
        ));
        assert!(invoker.calls().is_empty());
    }

    #[test]
    fn templates_are_expanded_before_lookup() {
        let directory = FakeDirectory::with(vec![Version::new("2.0.7", false)]);
        let invoker = RecordingInvoker::default();
        let templates = ReleaseTemplates::new("${JIRA_PROJECT}", "2.0.$BUILD_NUMBER");
        let env = BuildEnvironment::new()
            .with_var("JIRA_PROJECT", "CORE")
            .with_var("BUILD_NUMBER", "7");

        let outcome = evaluate(&templates, &env, &directory, &invoker);

        assert!(outcome.is_success());
        assert_eq!(*directory.lookups.borrow(), vec!["CORE".to_string()]);
        assert_eq!(
            invoker.calls(),
            vec![("CORE".to_string(), "2.0.7".to_string())]
        );
    }

    #[test]
    fn outcome_request_is_exposed_on_success() {
        let directory = FakeDirectory::with(vec![Version::new("1.2.0", true)]);
        let outcome = evaluate(
            &templates(),
            &env(),
            &directory,
            RecordingInvoker::default(),
        );
        let request = outcome.request().unwrap();
        assert_eq!(request.project_key, "PROJ");
        assert_eq!(request.release_name, "1.2.0");
    }

    #[test]
    fn find_by_name_counts_every_exact_match() {
        let versions = vec![
            Version::new("a", false),
            Version::new("b", false),
            Version::new("a", true),
        ];
        assert_eq!(find_by_name(&versions, "a").len(), 2);
        assert_eq!(find_by_name(&versions, "b").len(), 1);
        assert!(find_by_name(&versions, "A").is_empty());
    }
}
