#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod badges;
pub mod config;
pub mod fetcher;
pub mod github;
pub mod locator;
pub mod summary;

pub use badges::{
    collect_badges, get_badge_by_blob, get_badge_by_url, get_badges, get_light_badges,
    parse_badge, Badge, BadgeError, BadgeParseError, BadgeReport, FailurePolicy, LightBadge,
};
pub use config::{load_settings, validate_api_base, validate_token, ConfigError, Settings};
pub use fetcher::{BadgeFetcher, FetcherConfig, FetcherError};
pub use github::{build_client, decode_content, ContentError};
pub use locator::{
    branch_name_from_ref, file_name_has_badge_suffix, LocatorError, RepositoryUrl,
    RepositoryView, ResolvedPath, BADGE_FILE_SUFFIX,
};
pub use summary::{FetchOutcome, FetchSummary};
