//! Response models for the GitHub REST endpoints used here.
//!
//! Only the fields this crate reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Repository as returned by `/orgs/{org}/repos` and `/repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repository {
    /// Numeric repository id.
    pub id: u64,

    /// Repository name without owner.
    pub name: String,

    /// Full name in "owner/name" format.
    #[serde(default)]
    pub full_name: Option<String>,

    /// Default branch name.
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// A git reference from `/git/matching-refs`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitReference {
    /// Fully qualified ref name, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub reference: String,

    /// Object the ref points at.
    pub object: GitObject,
}

/// Target of a git reference.
#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    /// Object SHA.
    pub sha: String,

    /// Object type, usually "commit".
    #[serde(rename = "type")]
    pub kind: String,
}

/// A branch name with the commit its head points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Branch name without the `refs/heads/` prefix.
    pub name: String,

    /// Head commit SHA.
    pub sha: String,
}

/// Kind of an entry in a contents listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

impl ContentKind {
    /// Returns the kind as GitHub spells it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Symlink => "symlink",
            Self::Submodule => "submodule",
        }
    }
}

/// An entry from the contents API.
///
/// Directory listings omit `content`; single-file responses carry it
/// base64-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    /// Entry name.
    pub name: String,

    /// Repository-relative path.
    pub path: String,

    /// Blob SHA for files, tree SHA for directories.
    pub sha: String,

    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// API URL of the entry.
    #[serde(default)]
    pub url: Option<String>,

    /// Encoded file content.
    #[serde(default)]
    pub content: Option<String>,

    /// Content encoding, normally "base64".
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Response of the contents API: a folder listing or a single entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Directory(Vec<ContentEntry>),
    Single(ContentEntry),
}

/// Recursive tree listing from `/git/trees/{sha}?recursive=1`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    /// SHA of the listed tree.
    pub sha: String,

    /// Entries, with paths relative to the listed tree.
    pub tree: Vec<TreeEntry>,

    /// Whether GitHub cut the listing short.
    #[serde(default)]
    pub truncated: bool,
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    Blob,
    Tree,
    Commit,
}

/// A single entry in a tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the listed tree.
    pub path: String,

    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: TreeEntryKind,

    /// Object SHA.
    pub sha: String,

    /// API URL of the object; absent for submodules.
    #[serde(default)]
    pub url: Option<String>,
}

/// A blob from `/git/blobs/{sha}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Blob {
    /// Blob SHA.
    pub sha: String,

    /// Encoded content.
    pub content: String,

    /// Content encoding ("base64" or "utf-8").
    pub encoding: String,

    /// API URL of the blob.
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_listing_and_single_file_both_deserialize() {
        let listing: Contents = serde_json::from_str(
            r#"[{"name":"badges","path":"src/badges","sha":"t1","type":"dir"}]"#,
        )
        .unwrap();
        let single: Contents = serde_json::from_str(
            r#"{"name":"a-badge.json","path":"a-badge.json","sha":"b1","type":"file",
                "content":"e30=\n","encoding":"base64"}"#,
        )
        .unwrap();

        assert!(matches!(listing, Contents::Directory(ref entries) if entries[0].kind == ContentKind::Dir));
        assert!(matches!(single, Contents::Single(ref entry) if entry.content.is_some()));
    }

    #[test]
    fn tree_defaults_truncated_to_false() {
        let tree: Tree = serde_json::from_str(
            r#"{"sha":"t1","tree":[{"path":"a-badge.json","mode":"100644","type":"blob","sha":"b1"}]}"#,
        )
        .unwrap();

        assert!(!tree.truncated);
        assert_eq!(tree.tree[0].kind, TreeEntryKind::Blob);
        assert!(tree.tree[0].url.is_none());
    }
}
