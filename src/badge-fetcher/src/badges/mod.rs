//! Badge discovery and retrieval.
//!
//! A folder URL is resolved to a repository, branch and tree; every blob
//! under that tree becomes a [`LightBadge`]. Light badges whose name ends in
//! `-badge.json` are then fetched by blob SHA, decoded and parsed.

mod badge;
mod error;
mod light_badge;
mod report;

pub use badge::{parse_badge, Badge, BadgeParseError};
pub use error::BadgeError;
pub use light_badge::LightBadge;
pub use report::{BadgeReport, FailurePolicy};

use crate::github::{
    self, blob_route, decode_content, is_not_found, Branch, ContentEntry, ContentKind, Contents,
    Repository, TreeEntryKind,
};
use crate::locator::{RepositoryUrl, ResolvedPath};
use crate::summary::FetchOutcome;
use octocrab::Octocrab;
use tracing::{debug, info, info_span, warn, Instrument};

/// Lists every file under a folder URL as a light badge.
///
/// The URL may point at a folder (`/tree/...`), a single file (`/blob/...`)
/// or the repository itself, in which case the default branch is walked
/// from its root.
///
/// # Errors
///
/// Returns [`BadgeError`] if the URL is malformed, the repository, branch or
/// path cannot be found, or an API call fails.
pub async fn get_light_badges(
    octocrab: &Octocrab,
    folder_url: &str,
) -> Result<Vec<LightBadge>, BadgeError> {
    let span = info_span!("get_light_badges", url = %folder_url);

    async {
        let url = RepositoryUrl::parse(folder_url)?;
        let repository = find_org_repository(octocrab, &url).await?;
        let branches = github::list_branches(octocrab, url.owner(), &repository.name).await?;
        let resolved = resolve_location(&url, &repository, &branches)?;

        info!(
            repository_id = repository.id,
            branch = %resolved.branch,
            path = %resolved.path(),
            "Resolved folder"
        );

        let light_badges = if resolved.is_root() {
            let head = branches
                .iter()
                .find(|branch| branch.name == resolved.branch)
                .ok_or_else(|| BadgeError::BranchNotFound {
                    url: url.as_str().to_string(),
                })?;
            walk_tree(octocrab, repository.id, &head.sha, "").await?
        } else {
            let entry = find_entry(octocrab, repository.id, &resolved).await?;
            let kind = entry.kind;
            match kind {
                ContentKind::Dir => {
                    walk_tree(octocrab, repository.id, &entry.sha, &entry.path).await?
                }
                ContentKind::File => vec![light_badge_from_file(repository.id, entry)],
                other => {
                    return Err(BadgeError::UnsupportedEntry {
                        path: entry.path,
                        kind: other.as_str().to_string(),
                    })
                }
            }
        };

        info!(count = light_badges.len(), "Found candidate files");
        Ok(light_badges)
    }
    .instrument(span)
    .await
}

/// Fetches and parses every badge file under a folder URL.
///
/// Files without the `-badge.json` suffix are ignored. The first file that
/// cannot be fetched or parsed aborts the whole call; use
/// [`collect_badges`] with [`FailurePolicy::KeepGoing`] to continue instead.
///
/// # Errors
///
/// Returns [`BadgeError`] if discovery fails or any badge file fails.
pub async fn get_badges(octocrab: &Octocrab, folder_url: &str) -> Result<Vec<Badge>, BadgeError> {
    collect_badges(octocrab, folder_url, FailurePolicy::FailFast)
        .await
        .map(|report| report.badges)
}

/// Fetches every badge file under a folder URL and reports per-file outcomes.
///
/// # Errors
///
/// Returns [`BadgeError`] if discovery fails, or under
/// [`FailurePolicy::FailFast`] if any badge file fails.
pub async fn collect_badges(
    octocrab: &Octocrab,
    folder_url: &str,
    policy: FailurePolicy,
) -> Result<BadgeReport, BadgeError> {
    let span = info_span!("collect_badges", url = %folder_url, ?policy);

    async {
        let light_badges = get_light_badges(octocrab, folder_url).await?;
        let mut report = BadgeReport::default();

        for light_badge in light_badges {
            if !light_badge.is_badge_file() {
                debug!(path = %light_badge.path, "Skipping non-badge file");
                report.record(FetchOutcome::Skipped {
                    path: light_badge.path,
                    reason: "not a badge file".to_string(),
                });
                continue;
            }

            match fetch_blob_badge(
                octocrab,
                light_badge.repository_id,
                &light_badge.sha,
                &light_badge.path,
            )
            .await
            {
                Ok(badge) => {
                    debug!(path = %light_badge.path, code = %badge.code, "Fetched badge");
                    report.record(FetchOutcome::Fetched {
                        path: light_badge.path,
                        code: badge.code.clone(),
                    });
                    report.badges.push(badge);
                }
                Err(e) if policy == FailurePolicy::KeepGoing => {
                    warn!(path = %light_badge.path, error = %e, "Failed to fetch badge");
                    report.record(FetchOutcome::Failed {
                        path: light_badge.path,
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            fetched = report.summary.fetched,
            skipped = report.summary.skipped,
            failed = report.summary.failed,
            "Badge collection complete"
        );
        Ok(report)
    }
    .instrument(span)
    .await
}

/// Fetches a badge from a file URL such as
/// `https://github.com/<owner>/<repo>/blob/<branch>/<path>-badge.json`.
///
/// # Errors
///
/// Returns [`BadgeError::NotABadgeFile`] before any API call if the URL
/// lacks the badge suffix, [`BadgeError::BranchNotFound`] if no branch
/// matches, and [`BadgeError::Parse`] (carrying the URL) if the content is
/// not a badge.
pub async fn get_badge_by_url(octocrab: &Octocrab, badge_url: &str) -> Result<Badge, BadgeError> {
    let span = info_span!("get_badge_by_url", url = %badge_url);

    async {
        let url = RepositoryUrl::parse(badge_url)?;
        if !url.has_badge_suffix() {
            return Err(BadgeError::NotABadgeFile {
                url: url.as_str().to_string(),
            });
        }

        let repository = github::get_repository(octocrab, url.owner(), url.repository())
            .await
            .map_err(|e| repository_error(e, &url))?;
        let branches = github::list_branches(octocrab, url.owner(), &repository.name).await?;
        let resolved = url
            .resolve_branch(&branch_names(&branches))
            .ok_or_else(|| BadgeError::BranchNotFound {
                url: url.as_str().to_string(),
            })?;

        debug!(branch = %resolved.branch, path = %resolved.path(), "Resolved badge file");

        let contents =
            github::get_contents(octocrab, repository.id, &resolved.segments, &resolved.branch)
                .await
                .map_err(|e| path_error(e, &resolved))?;

        let entry = match contents {
            Contents::Single(entry) if entry.kind == ContentKind::File => entry,
            _ => {
                return Err(BadgeError::NotAFile {
                    url: url.as_str().to_string(),
                })
            }
        };

        // Files over 1 MB come back without inline content.
        if entry.encoding.as_deref() == Some("none") {
            return fetch_blob_badge(octocrab, repository.id, &entry.sha, url.as_str()).await;
        }

        let content = entry.content.as_deref().ok_or_else(|| BadgeError::Content {
            location: url.as_str().to_string(),
            source: github::ContentError::MissingContent,
        })?;

        decode_and_parse(content, entry.encoding.as_deref(), url.as_str())
    }
    .instrument(span)
    .await
}

/// Fetches a badge by repository id and blob SHA.
///
/// # Errors
///
/// Returns [`BadgeError`] if the blob cannot be fetched, decoded or parsed.
pub async fn get_badge_by_blob(
    octocrab: &Octocrab,
    repository_id: u64,
    sha: &str,
) -> Result<Badge, BadgeError> {
    let location = blob_route(repository_id, sha);
    fetch_blob_badge(octocrab, repository_id, sha, &location)
        .instrument(info_span!("get_badge_by_blob", repository_id, sha))
        .await
}

/// Fetches a blob and parses it, labelling failures with `location`.
async fn fetch_blob_badge(
    octocrab: &Octocrab,
    repository_id: u64,
    sha: &str,
    location: &str,
) -> Result<Badge, BadgeError> {
    let blob = github::get_blob(octocrab, repository_id, sha).await?;
    decode_and_parse(&blob.content, Some(&blob.encoding), location)
}

fn decode_and_parse(
    content: &str,
    encoding: Option<&str>,
    location: &str,
) -> Result<Badge, BadgeError> {
    let content = decode_content(content, encoding).map_err(|source| BadgeError::Content {
        location: location.to_string(),
        source,
    })?;

    parse_badge(&content).map_err(|source| BadgeError::Parse {
        location: location.to_string(),
        source,
    })
}

/// Finds the repository named in the URL among the owner's organization
/// repositories.
///
/// Owners that are users rather than organizations have no org listing;
/// those fall back to a direct repository lookup.
async fn find_org_repository(
    octocrab: &Octocrab,
    url: &RepositoryUrl,
) -> Result<Repository, BadgeError> {
    let repositories = match github::list_org_repositories(octocrab, url.owner()).await {
        Ok(repositories) => repositories,
        Err(e) if is_not_found(&e) => {
            debug!(owner = %url.owner(), "Owner is not an organization, looking up repository");
            return github::get_repository(octocrab, url.owner(), url.repository())
                .await
                .map_err(|e| repository_error(e, url));
        }
        Err(e) => return Err(e.into()),
    };

    repositories
        .into_iter()
        .find(|repository| repository.name.eq_ignore_ascii_case(url.repository()))
        .ok_or_else(|| BadgeError::RepositoryNotFound {
            owner: url.owner().to_string(),
            repository: url.repository().to_string(),
        })
}

/// Splits the URL into branch and path; plain repository URLs use the
/// default branch.
fn resolve_location(
    url: &RepositoryUrl,
    repository: &Repository,
    branches: &[Branch],
) -> Result<ResolvedPath, BadgeError> {
    let branch_not_found = || BadgeError::BranchNotFound {
        url: url.as_str().to_string(),
    };

    if url.ref_and_path().is_empty() {
        return repository
            .default_branch
            .as_deref()
            .map(ResolvedPath::root)
            .ok_or_else(branch_not_found);
    }

    url.resolve_branch(&branch_names(branches))
        .ok_or_else(branch_not_found)
}

/// Looks up the entry a non-root path points at in its parent folder.
async fn find_entry(
    octocrab: &Octocrab,
    repository_id: u64,
    resolved: &ResolvedPath,
) -> Result<ContentEntry, BadgeError> {
    let not_found = || BadgeError::PathNotFound {
        path: resolved.path(),
        branch: resolved.branch.clone(),
    };

    let (name, parent) = resolved.segments.split_last().ok_or_else(not_found)?;
    let contents = github::get_contents(octocrab, repository_id, parent, &resolved.branch)
        .await
        .map_err(|e| path_error(e, resolved))?;

    match contents {
        Contents::Directory(entries) => entries
            .into_iter()
            .find(|entry| &entry.name == name)
            .ok_or_else(not_found),
        Contents::Single(_) => Err(not_found()),
    }
}

/// Lists every blob under a tree as light badges with repository-relative
/// paths.
async fn walk_tree(
    octocrab: &Octocrab,
    repository_id: u64,
    tree_sha: &str,
    prefix: &str,
) -> Result<Vec<LightBadge>, BadgeError> {
    let tree = github::get_tree_recursive(octocrab, repository_id, tree_sha).await?;

    if tree.truncated {
        warn!(
            tree_sha,
            entries = tree.tree.len(),
            "Tree listing was truncated by GitHub, some files are missing"
        );
    }

    Ok(tree
        .tree
        .into_iter()
        .filter(|entry| entry.kind == TreeEntryKind::Blob)
        .map(|entry| {
            let path = if prefix.is_empty() {
                entry.path
            } else {
                format!("{prefix}/{}", entry.path)
            };
            let url = entry
                .url
                .unwrap_or_else(|| blob_route(repository_id, &entry.sha));
            LightBadge {
                repository_id,
                sha: entry.sha,
                path,
                url,
            }
        })
        .collect())
}

fn light_badge_from_file(repository_id: u64, entry: ContentEntry) -> LightBadge {
    LightBadge {
        repository_id,
        url: blob_route(repository_id, &entry.sha),
        sha: entry.sha,
        path: entry.path,
    }
}

fn branch_names(branches: &[Branch]) -> Vec<&str> {
    branches.iter().map(|branch| branch.name.as_str()).collect()
}

fn repository_error(error: octocrab::Error, url: &RepositoryUrl) -> BadgeError {
    if is_not_found(&error) {
        BadgeError::RepositoryNotFound {
            owner: url.owner().to_string(),
            repository: url.repository().to_string(),
        }
    } else {
        error.into()
    }
}

fn path_error(error: octocrab::Error, resolved: &ResolvedPath) -> BadgeError {
    if is_not_found(&error) {
        BadgeError::PathNotFound {
            path: resolved.path(),
            branch: resolved.branch.clone(),
        }
    } else {
        error.into()
    }
}
