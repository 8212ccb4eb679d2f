//! Repository settings policy.
//!
//! Every package repository must use `main` as its default branch, must not
//! be a template, must track issues, and must keep wiki, pages, projects and
//! discussions turned off.

mod violation;

pub use violation::PolicyViolation;

use crate::directory::{Organization, RepositoryDescriptor};

/// The branch every package must use as its default.
pub const REQUIRED_DEFAULT_BRANCH: &str = "main";

/// Outcome of a policy check that found nothing wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyStatus {
    /// All rules hold.
    Compliant,
    /// Archived, private or internal; rules were not evaluated.
    Exempt,
}

/// Checks a repository against the organization policy.
///
/// Rules are evaluated in a fixed order and the first failing rule is
/// reported; later rules are not looked at.
///
/// # Errors
///
/// Returns the first [`PolicyViolation`] found.
pub fn validate(
    org: &Organization,
    repository: &RepositoryDescriptor,
) -> Result<PolicyStatus, PolicyViolation> {
    if !org.is_package(repository) {
        return Ok(PolicyStatus::Exempt);
    }

    if repository.default_branch != REQUIRED_DEFAULT_BRANCH {
        return Err(PolicyViolation::DefaultBranch {
            actual: repository.default_branch.clone(),
        });
    }
    if repository.is_template {
        return Err(PolicyViolation::Template);
    }
    if !repository.has_issues {
        return Err(PolicyViolation::IssuesDisabled);
    }
    if repository.has_wiki {
        return Err(PolicyViolation::WikiEnabled);
    }
    if repository.has_pages {
        return Err(PolicyViolation::PagesEnabled);
    }
    if repository.has_projects {
        return Err(PolicyViolation::ProjectsEnabled);
    }
    if repository.has_discussions {
        return Err(PolicyViolation::DiscussionsEnabled);
    }

    Ok(PolicyStatus::Compliant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::repository::fixtures::compliant;

    fn org() -> Organization {
        Organization::new("zig-devel", [".github".to_string(), "toolset".to_string()])
    }

    fn violating_everything(name: &str) -> RepositoryDescriptor {
        let mut repo = compliant(name);
        repo.default_branch = "master".to_string();
        repo.is_template = true;
        repo.has_issues = false;
        repo.has_wiki = true;
        repo.has_pages = true;
        repo.has_projects = true;
        repo.has_discussions = true;
        repo
    }

    #[test]
    fn accepts_compliant_repository() {
        assert_eq!(validate(&org(), &compliant("zlib")), Ok(PolicyStatus::Compliant));
    }

    #[test]
    fn master_branch_is_reported_first() {
        let mut repo = compliant("zlib");
        repo.default_branch = "master".to_string();

        let err = validate(&org(), &repo).unwrap_err();

        assert_eq!(
            err,
            PolicyViolation::DefaultBranch {
                actual: "master".to_string()
            }
        );
        assert!(err.to_string().contains("Default branch"));
    }

    #[test]
    fn first_failing_rule_wins() {
        let err = validate(&org(), &violating_everything("zlib")).unwrap_err();
        assert!(matches!(err, PolicyViolation::DefaultBranch { .. }));

        let mut repo = violating_everything("zlib");
        repo.default_branch = "main".to_string();
        assert_eq!(validate(&org(), &repo), Err(PolicyViolation::Template));

        repo.is_template = false;
        assert_eq!(validate(&org(), &repo), Err(PolicyViolation::IssuesDisabled));

        repo.has_issues = true;
        assert_eq!(validate(&org(), &repo), Err(PolicyViolation::WikiEnabled));

        repo.has_wiki = false;
        assert_eq!(validate(&org(), &repo), Err(PolicyViolation::PagesEnabled));

        repo.has_pages = false;
        assert_eq!(validate(&org(), &repo), Err(PolicyViolation::ProjectsEnabled));

        repo.has_projects = false;
        assert_eq!(
            validate(&org(), &repo),
            Err(PolicyViolation::DiscussionsEnabled)
        );

        repo.has_discussions = false;
        assert_eq!(validate(&org(), &repo), Ok(PolicyStatus::Compliant));
    }

    #[test]
    fn archived_private_and_internal_are_exempt() {
        let mut archived = violating_everything("old-lib");
        archived.archived = true;
        assert_eq!(validate(&org(), &archived), Ok(PolicyStatus::Exempt));

        let mut private = violating_everything("secret");
        private.private = true;
        assert_eq!(validate(&org(), &private), Ok(PolicyStatus::Exempt));

        let internal = violating_everything(".github");
        assert_eq!(validate(&org(), &internal), Ok(PolicyStatus::Exempt));
    }

    #[test]
    fn violations_have_distinct_messages() {
        let messages: std::collections::HashSet<String> = [
            PolicyViolation::DefaultBranch {
                actual: "master".to_string(),
            },
            PolicyViolation::Template,
            PolicyViolation::IssuesDisabled,
            PolicyViolation::WikiEnabled,
            PolicyViolation::PagesEnabled,
            PolicyViolation::ProjectsEnabled,
            PolicyViolation::DiscussionsEnabled,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(messages.len(), 7);
    }
}
