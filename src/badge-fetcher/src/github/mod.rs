//! Thin wrappers over the GitHub REST endpoints needed to find and read badges.
//!
//! Every call goes through [`Octocrab::get`] with the models in [`models`];
//! paginated listings are drained with [`Octocrab::all_pages`]. Pagination,
//! authentication and rate limits are whatever octocrab and GitHub provide.

mod content;
mod error;
pub mod models;

pub use content::decode_content;
pub use error::ContentError;
pub use models::{
    Blob, Branch, ContentEntry, ContentKind, Contents, GitReference, Repository, Tree, TreeEntry,
    TreeEntryKind,
};

use crate::locator::{branch_name_from_ref, encode_path};
use octocrab::{Octocrab, Page};
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Results per page for listing endpoints.
const RESULTS_PER_PAGE: u8 = 100;

/// Prefix of branch refs.
const HEADS_PREFIX: &str = "refs/heads/";

#[derive(Serialize)]
struct PageQuery {
    per_page: u8,
}

#[derive(Serialize)]
struct RefQuery<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
}

#[derive(Serialize)]
struct RecursiveQuery {
    recursive: u8,
}

/// Builds an Octocrab client.
///
/// Without a token the client is anonymous, which is enough for public
/// repositories at a lower rate limit.
///
/// # Errors
///
/// Returns an error if the API base is not a valid URI or the client cannot
/// be constructed.
pub fn build_client(token: Option<&str>, api_base: Option<&Url>) -> Result<Octocrab, octocrab::Error> {
    let mut builder = Octocrab::builder();
    if let Some(api_base) = api_base {
        builder = builder.base_uri(api_base.as_str())?;
    }
    if let Some(token) = token {
        builder = builder.personal_token(token.to_string());
    }
    builder.build()
}

/// Returns true if GitHub answered the request with 404 Not Found.
#[must_use]
pub fn is_not_found(error: &octocrab::Error) -> bool {
    matches!(error, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

/// Lists every repository of an organization.
///
/// # Errors
///
/// Returns an error if any page cannot be fetched.
pub async fn list_org_repositories(
    octocrab: &Octocrab,
    org: &str,
) -> Result<Vec<Repository>, octocrab::Error> {
    debug!(org, "Listing organization repositories");
    let route = format!("/orgs/{}/repos", encode_path(&[org]));
    let page = octocrab
        .get::<Page<Repository>, _, _>(
            route,
            Some(&PageQuery {
                per_page: RESULTS_PER_PAGE,
            }),
        )
        .await?;
    octocrab.all_pages(page).await
}

/// Fetches a single repository by owner and name.
///
/// # Errors
///
/// Returns an error if the repository cannot be fetched.
pub async fn get_repository(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<Repository, octocrab::Error> {
    debug!(owner, repo, "Fetching repository");
    let route = format!("/repos/{}", encode_path(&[owner, repo]));
    octocrab.get(route, None::<&()>).await
}

/// Lists the branches of a repository with their head commits.
///
/// # Errors
///
/// Returns an error if any page of refs cannot be fetched.
pub async fn list_branches(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<Vec<Branch>, octocrab::Error> {
    debug!(owner, repo, "Listing branches");
    let route = format!(
        "/repos/{}/git/matching-refs/heads",
        encode_path(&[owner, repo])
    );
    let page = octocrab
        .get::<Page<GitReference>, _, _>(
            route,
            Some(&PageQuery {
                per_page: RESULTS_PER_PAGE,
            }),
        )
        .await?;
    let references = octocrab.all_pages(page).await?;

    Ok(references
        .into_iter()
        .filter(|reference| reference.reference.starts_with(HEADS_PREFIX))
        .filter_map(|reference| {
            let name = branch_name_from_ref(&reference.reference)?.to_string();
            Some(Branch {
                name,
                sha: reference.object.sha,
            })
        })
        .collect())
}

/// Fetches the contents of a path at a branch.
///
/// An empty `path` lists the repository root.
///
/// # Errors
///
/// Returns an error if the path does not exist at `reference` or the call
/// fails.
pub async fn get_contents(
    octocrab: &Octocrab,
    repository_id: u64,
    path: &[String],
    reference: &str,
) -> Result<Contents, octocrab::Error> {
    debug!(repository_id, path = %path.join("/"), reference, "Fetching contents");
    let route = if path.is_empty() {
        format!("/repositories/{repository_id}/contents")
    } else {
        format!("/repositories/{repository_id}/contents/{}", encode_path(path))
    };
    octocrab.get(route, Some(&RefQuery { reference })).await
}

/// Fetches a tree and all of its subtrees.
///
/// `tree_sha` may also be a commit SHA, in which case the commit's root tree
/// is listed.
///
/// # Errors
///
/// Returns an error if the tree cannot be fetched.
pub async fn get_tree_recursive(
    octocrab: &Octocrab,
    repository_id: u64,
    tree_sha: &str,
) -> Result<Tree, octocrab::Error> {
    debug!(repository_id, tree_sha, "Fetching recursive tree");
    let route = format!(
        "/repositories/{repository_id}/git/trees/{}",
        encode_path(&[tree_sha])
    );
    octocrab
        .get(route, Some(&RecursiveQuery { recursive: 1 }))
        .await
}

/// Fetches a blob by SHA.
///
/// # Errors
///
/// Returns an error if the blob cannot be fetched.
pub async fn get_blob(
    octocrab: &Octocrab,
    repository_id: u64,
    sha: &str,
) -> Result<Blob, octocrab::Error> {
    debug!(repository_id, sha, "Fetching blob");
    octocrab
        .get(blob_route(repository_id, sha), None::<&()>)
        .await
}

/// API route of a blob; also used to label blob-sourced errors.
#[must_use]
pub fn blob_route(repository_id: u64, sha: &str) -> String {
    format!(
        "/repositories/{repository_id}/git/blobs/{}",
        encode_path(&[sha])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_route_uses_repository_id() {
        assert_eq!(blob_route(42, "abc123"), "/repositories/42/git/blobs/abc123");
    }
}
