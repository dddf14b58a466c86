//! Branch and in-repository path split out of a web URL.

/// A branch name together with the path it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Branch name without the `refs/heads/` prefix.
    pub branch: String,

    /// Decoded path segments relative to the repository root.
    pub segments: Vec<String>,
}

impl ResolvedPath {
    /// Creates a path pointing at the repository root of `branch`.
    #[must_use]
    pub fn root(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            segments: Vec::new(),
        }
    }

    /// Returns true if this points at the repository root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the path joined with `/`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Returns the path of the parent folder; empty for top-level entries.
    #[must_use]
    pub fn parent_path(&self) -> String {
        match self.segments.split_last() {
            Some((_, parent)) => parent.join("/"),
            None => String::new(),
        }
    }

    /// Returns the final path segment, if any.
    #[must_use]
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(segments: &[&str]) -> ResolvedPath {
        ResolvedPath {
            branch: "main".to_string(),
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn nested_path_parts() {
        let path = resolved(&["src", "badges", "ci-badge.json"]);

        assert!(!path.is_root());
        assert_eq!(path.path(), "src/badges/ci-badge.json");
        assert_eq!(path.parent_path(), "src/badges");
        assert_eq!(path.last_segment(), Some("ci-badge.json"));
    }

    #[test]
    fn top_level_entry_has_empty_parent() {
        let path = resolved(&["badges"]);

        assert_eq!(path.parent_path(), "");
        assert_eq!(path.last_segment(), Some("badges"));
    }

    #[test]
    fn root_path() {
        let path = ResolvedPath::root("develop");

        assert!(path.is_root());
        assert_eq!(path.path(), "");
        assert_eq!(path.last_segment(), None);
    }
}
