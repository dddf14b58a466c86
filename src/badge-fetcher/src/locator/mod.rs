//! Parsing of GitHub web UI URLs into repository coordinates.
//!
//! A URL such as `https://github.com/acme/site/tree/feature/x/src/badges`
//! carries the owner, the repository and a mix of branch name and path that
//! can only be told apart once the repository's branches are known (branch
//! names may contain `/`). [`RepositoryUrl::parse`] handles the first part,
//! [`RepositoryUrl::resolve_branch`] the second.

mod error;
mod resolved_path;

pub use error::LocatorError;
pub use resolved_path::ResolvedPath;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// File name suffix that marks a badge document.
pub const BADGE_FILE_SUFFIX: &str = "-badge.json";

/// Characters escaped when a decoded segment is put back into an API route.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

/// Which web UI view the URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryView {
    /// Plain repository URL (`/owner/repo`).
    Root,
    /// Folder view (`/owner/repo/tree/...`).
    Tree,
    /// File view (`/owner/repo/blob/...`).
    Blob,
}

/// A parsed GitHub web URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl {
    url: String,
    api_base: Url,
    owner: String,
    repository: String,
    view: RepositoryView,
    ref_and_path: Vec<String>,
}

impl RepositoryUrl {
    /// Parses a GitHub web URL.
    ///
    /// Accepted forms:
    /// - `https://github.com/<owner>/<repo>`
    /// - `https://github.com/<owner>/<repo>/tree/<branch>/<path>`
    /// - `https://github.com/<owner>/<repo>/blob/<branch>/<path>`
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidUrl`] when the input is not an absolute
    /// http(s) URL, [`LocatorError::MissingPathSegments`] when the owner,
    /// repository or branch part is missing, and
    /// [`LocatorError::UnsupportedView`] for views other than `tree`/`blob`.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let input = input.trim();
        let invalid = |message: String| LocatorError::InvalidUrl {
            url: input.to_string(),
            message,
        };

        let parsed = Url::parse(input).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        let segments = decoded_segments(&parsed).map_err(invalid)?;
        let missing = || LocatorError::MissingPathSegments {
            url: input.to_string(),
        };

        let mut segments = segments.into_iter();
        let owner = segments.next().ok_or_else(missing)?;
        let repository = segments.next().ok_or_else(missing)?;
        let repository = repository
            .strip_suffix(".git")
            .map(str::to_string)
            .unwrap_or(repository);

        let view = match segments.next().as_deref() {
            None => RepositoryView::Root,
            Some("tree") => RepositoryView::Tree,
            Some("blob") => RepositoryView::Blob,
            Some(other) => {
                return Err(LocatorError::UnsupportedView {
                    url: input.to_string(),
                    view: other.to_string(),
                })
            }
        };

        let ref_and_path: Vec<String> = segments.collect();
        if view != RepositoryView::Root && ref_and_path.is_empty() {
            return Err(missing());
        }

        let api_base = derive_api_base(&parsed).map_err(invalid)?;

        Ok(Self {
            url: input.to_string(),
            api_base,
            owner,
            repository,
            view,
            ref_and_path,
        })
    }

    /// The URL as given (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// API base URL derived from the URL host.
    #[must_use]
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner (organization or user).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Web UI view the URL points at.
    #[must_use]
    pub fn view(&self) -> RepositoryView {
        self.view
    }

    /// Decoded segments following the view marker (branch and path combined).
    #[must_use]
    pub fn ref_and_path(&self) -> &[String] {
        &self.ref_and_path
    }

    /// Returns true if the URL names a badge document.
    #[must_use]
    pub fn has_badge_suffix(&self) -> bool {
        self.ref_and_path
            .last()
            .is_some_and(|name| file_name_has_badge_suffix(name))
    }

    /// Splits the branch name off the path using the known branch names.
    ///
    /// The longest branch that spells out one or more whole leading
    /// segments wins. Segments are compared after percent-decoding, so a
    /// branch written as `feature%2Fx` is a single segment. Returns `None`
    /// for plain repository URLs and when no branch matches.
    #[must_use]
    pub fn resolve_branch<S: AsRef<str>>(&self, branches: &[S]) -> Option<ResolvedPath> {
        if self.ref_and_path.is_empty() {
            return None;
        }

        let (branch, depth) = branches
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|branch| !branch.is_empty())
            .filter_map(|branch| {
                leading_segments_matching(&self.ref_and_path, branch).map(|depth| (branch, depth))
            })
            .max_by_key(|(branch, _)| branch.len())?;

        Some(ResolvedPath {
            branch: branch.to_string(),
            segments: self.ref_and_path[depth..].to_vec(),
        })
    }
}

/// Number of leading segments that, joined with `/`, equal `branch`.
fn leading_segments_matching(segments: &[String], branch: &str) -> Option<usize> {
    let mut rest = branch;
    for (index, segment) in segments.iter().enumerate() {
        rest = rest.strip_prefix(segment.as_str())?;
        if rest.is_empty() {
            return Some(index + 1);
        }
        rest = rest.strip_prefix('/')?;
    }
    None
}

/// Returns true if a file name or path ends with [`BADGE_FILE_SUFFIX`].
#[must_use]
pub fn file_name_has_badge_suffix(name: &str) -> bool {
    name.ends_with(BADGE_FILE_SUFFIX)
}

/// Strips the first two components off a fully qualified ref.
///
/// `refs/heads/feature/x` becomes `feature/x`.
#[must_use]
pub fn branch_name_from_ref(reference: &str) -> Option<&str> {
    let mut parts = reference.splitn(3, '/');
    parts.next()?;
    parts.next()?;
    parts.next().filter(|name| !name.is_empty())
}

/// Percent-encodes decoded segments and joins them with `/`.
pub(crate) fn encode_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| utf8_percent_encode(segment.as_ref(), PATH_SEGMENT_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Collects the non-empty, percent-decoded path segments of a URL.
fn decoded_segments(parsed: &Url) -> Result<Vec<String>, String> {
    let Some(segments) = parsed.path_segments() else {
        return Ok(Vec::new());
    };

    segments
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|e| format!("path segment '{segment}' is not valid UTF-8: {e}"))
        })
        .collect()
}

/// Derives the REST API base URL for the host of a web URL.
///
/// `github.com` maps to `https://api.github.com`; any other host is treated
/// as GitHub Enterprise Server, which serves the API under `/api/v3`.
fn derive_api_base(parsed: &Url) -> Result<Url, String> {
    let host = parsed
        .host_str()
        .ok_or_else(|| "URL must include a host".to_string())?;

    if host.eq_ignore_ascii_case("github.com") || host.eq_ignore_ascii_case("www.github.com") {
        return Url::parse("https://api.github.com").map_err(|e| e.to_string());
    }

    let mut api_base =
        Url::parse(&format!("{}://{}", parsed.scheme(), host)).map_err(|e| e.to_string())?;
    api_base
        .set_port(parsed.port())
        .map_err(|()| "invalid port".to_string())?;
    api_base.set_path("api/v3");
    Ok(api_base)
}
