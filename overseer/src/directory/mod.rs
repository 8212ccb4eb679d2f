//! Repository directory client.
//!
//! Fetches the metadata of every repository in an organization, one page at
//! a time, until the API returns an empty page.

mod error;
mod organization;
pub(crate) mod repository;

pub use error::DirectoryError;
pub use organization::Organization;
pub use repository::RepositoryDescriptor;

use octocrab::Octocrab;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};

/// Results per page requested from the API.
pub const RESULTS_PER_PAGE: u8 = 100;

/// A source of paginated repository listings.
pub trait RepositoryPages {
    /// Fetches one page (1-based) of the organization's repositories.
    fn fetch_page(
        &self,
        org: &str,
        page: u32,
    ) -> impl Future<Output = Result<Vec<RepositoryDescriptor>, DirectoryError>>;
}

/// Query parameters for `GET /orgs/{org}/repos`.
#[derive(Debug, Serialize)]
struct PageQuery {
    per_page: u8,
    page: u32,
}

/// Repository directory backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubDirectory {
    octocrab: Octocrab,
}

impl GitHubDirectory {
    /// Builds a client for `base_url`.
    ///
    /// The `Authorization` header is only sent when a non-blank token is
    /// supplied; anonymous requests are subject to the provider's rate limits.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the base URL is invalid or the client
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let mut builder = Octocrab::builder()
            .base_uri(base_url)?
            .set_connect_timeout(Some(timeout))
            .set_read_timeout(Some(timeout));
        if let Some(token) = bearer_token(token) {
            builder = builder.personal_token(token.to_string());
        }
        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    /// Wraps an already configured client.
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

impl RepositoryPages for GitHubDirectory {
    async fn fetch_page(
        &self,
        org: &str,
        page: u32,
    ) -> Result<Vec<RepositoryDescriptor>, DirectoryError> {
        let route = format!("/orgs/{org}/repos");
        let query = PageQuery {
            per_page: RESULTS_PER_PAGE,
            page,
        };
        let repositories: Vec<RepositoryDescriptor> =
            self.octocrab.get(route, Some(&query)).await?;
        Ok(repositories)
    }
}

/// Treats a blank token (e.g. an exported but unset CI secret) as anonymous.
fn bearer_token(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|token| !token.is_empty())
}

/// Fetches every repository of `org`.
///
/// Pages are requested sequentially starting at page 1 and concatenated
/// until an empty page comes back. Any failed page aborts the whole fetch;
/// no partial listing is returned.
///
/// # Errors
///
/// Returns the first [`DirectoryError`] raised by `source`.
pub async fn fetch_all<S: RepositoryPages>(
    source: &S,
    org: &str,
) -> Result<Vec<RepositoryDescriptor>, DirectoryError> {
    let span = info_span!("fetch_repositories", org = %org);

    async {
        info!("Fetching repository list");

        let mut repositories = Vec::new();
        let mut page = 1;
        loop {
            let items = source.fetch_page(org, page).await?;
            debug!(page, count = items.len(), "Fetched page");
            if items.is_empty() {
                break;
            }
            repositories.extend(items);
            page += 1;
        }

        info!(count = repositories.len(), "Fetched repository list");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::repository::fixtures::compliant;
    use super::*;
    use std::sync::Mutex;

    /// Serves pre-built pages and records which pages were requested.
    struct StaticPages {
        pages: Vec<Vec<RepositoryDescriptor>>,
        fail_on: Option<u32>,
        requested: Mutex<Vec<u32>>,
    }

    impl StaticPages {
        fn new(pages: Vec<Vec<RepositoryDescriptor>>) -> Self {
            Self {
                pages,
                fail_on: None,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl RepositoryPages for StaticPages {
        async fn fetch_page(
            &self,
            org: &str,
            page: u32,
        ) -> Result<Vec<RepositoryDescriptor>, DirectoryError> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(DirectoryError::PageFailed {
                    org: org.to_string(),
                    page,
                    message: "503 Service Unavailable".to_string(),
                });
            }
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn concatenates_pages_until_empty() {
        let source = StaticPages::new(vec![
            vec![compliant("a"), compliant("b")],
            vec![compliant("c")],
        ]);

        let repos = fetch_all(&source, "zig-devel").await.unwrap();

        let names: Vec<&str> = repos.iter().map(|repo| repo.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(*source.requested.lock().unwrap(), [1, 2, 3]);
    }

    #[tokio::test]
    async fn empty_first_page_yields_empty_listing() {
        let source = StaticPages::new(Vec::new());

        let repos = fetch_all(&source, "zig-devel").await.unwrap();

        assert!(repos.is_empty());
        assert_eq!(*source.requested.lock().unwrap(), [1]);
    }

    #[tokio::test]
    async fn failed_page_aborts_fetch() {
        let mut source = StaticPages::new(vec![
            vec![compliant("a")],
            vec![compliant("b")],
            vec![compliant("c")],
        ]);
        source.fail_on = Some(2);

        let result = fetch_all(&source, "zig-devel").await;

        assert!(matches!(
            result,
            Err(DirectoryError::PageFailed { page: 2, .. })
        ));
        assert_eq!(*source.requested.lock().unwrap(), [1, 2]);
    }

    #[test]
    fn serializes_page_query() {
        let query = PageQuery {
            per_page: RESULTS_PER_PAGE,
            page: 3,
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, serde_json::json!({"per_page": 100, "page": 3}));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = GitHubDirectory::new("not a url", None, Duration::from_secs(10));
        assert!(result.is_err());
    }

    #[test]
    fn blank_token_means_anonymous() {
        assert_eq!(bearer_token(None), None);
        assert_eq!(bearer_token(Some("")), None);
        assert_eq!(bearer_token(Some("  \n")), None);
        assert_eq!(bearer_token(Some("ghp_abc123")), Some("ghp_abc123"));
    }
}
