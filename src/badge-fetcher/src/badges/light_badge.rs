//! Light badge references.

use crate::locator::file_name_has_badge_suffix;
use serde::Serialize;

/// A candidate badge file whose content has not been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightBadge {
    /// Numeric id of the repository holding the file.
    pub repository_id: u64,

    /// Blob SHA of the file.
    pub sha: String,

    /// Repository-relative path of the file.
    pub path: String,

    /// API URL of the blob.
    pub url: String,
}

impl LightBadge {
    /// Returns true if the file name carries the badge suffix.
    #[must_use]
    pub fn is_badge_file(&self) -> bool {
        file_name_has_badge_suffix(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_badge(path: &str) -> LightBadge {
        LightBadge {
            repository_id: 7,
            sha: "abc".to_string(),
            path: path.to_string(),
            url: "https://api.github.com/repositories/7/git/blobs/abc".to_string(),
        }
    }

    #[test]
    fn badge_file_detection_uses_path() {
        assert!(light_badge("src/badges/ci-badge.json").is_badge_file());
        assert!(!light_badge("src/badges/README.md").is_badge_file());
        assert!(!light_badge("src/badges/badge.json").is_badge_file());
    }
}
