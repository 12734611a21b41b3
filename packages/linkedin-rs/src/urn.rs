//! Post identifier classification.
//!
//! LinkedIn exposes two live generations of its posting API plus a read-only
//! feed format, and the only way to tell which one a post belongs to is the
//! URN prefix. Classification is centralized here so call sites dispatch on
//! a closed variant instead of scattering string checks.

use tracing::warn;

/// Which API generation a post identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrnKind {
    /// `urn:li:share:` — Posts API (`/rest/posts`). Mutable.
    Modern,
    /// `urn:li:ugcPost:` — UGC Posts API (`/v2/ugcPosts`). Mutable.
    Legacy,
    /// `urn:li:activity:` — internal feed format. Cannot be updated or
    /// deleted through any API.
    ReadOnly,
}

impl UrnKind {
    /// Classify a post identifier by its URN prefix.
    ///
    /// Pure and total: unknown prefixes fall back to `Legacy`, matching the
    /// UGC API's looser identifier format, but the fallback is logged since
    /// it usually means the caller handed us something malformed.
    pub fn classify(post_id: &str) -> Self {
        if post_id.starts_with("urn:li:share:") {
            UrnKind::Modern
        } else if post_id.starts_with("urn:li:activity:") {
            UrnKind::ReadOnly
        } else {
            if !post_id.starts_with("urn:li:ugcPost:") {
                warn!(post_id, "unrecognized URN prefix, treating as UGC post id");
            }
            UrnKind::Legacy
        }
    }

    /// Whether mutation (update/delete) is permitted for this kind.
    pub fn is_mutable(self) -> bool {
        !matches!(self, UrnKind::ReadOnly)
    }
}
