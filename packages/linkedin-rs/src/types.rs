//! LinkedIn API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Audience for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Connections,
}

/// Content for a new post.
///
/// Immutable once handed to [`LinkedInClient::create_post`]. The Posts API
/// accepts at most one attached media per post; extra entries are ignored.
///
/// [`LinkedInClient::create_post`]: crate::LinkedInClient::create_post
#[derive(Debug, Clone)]
pub struct PostRequest {
    pub text: String,
    pub visibility: Visibility,
    pub media: Vec<MediaRef>,
}

impl PostRequest {
    /// Create a text-only post request with the given visibility.
    pub fn text(text: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            text: text.into(),
            visibility,
            media: Vec::new(),
        }
    }

    /// Attach an uploaded media asset.
    pub fn with_media(mut self, media: MediaRef) -> Self {
        self.media.push(media);
        self
    }
}

/// Fields to change on an existing post. Only present fields are sent.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub text: Option<String>,
    pub visibility: Option<Visibility>,
}

/// A provider-issued reference to an uploaded media asset, plus the content
/// type it was declared with. Produced by the upload pipeline and accepted
/// unmodified as a create attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub asset: String,
    pub media_type: String,
}

impl MediaRef {
    pub fn new(asset: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            media_type: media_type.into(),
        }
    }

    /// Whether the declared type routes the post to the document path.
    /// The Posts API does not support document attachments, so these fall
    /// back to the UGC Posts API.
    pub(crate) fn is_document(&self) -> bool {
        let ty = self.media_type.to_lowercase();
        ty.contains("pdf") || ty.contains("document")
    }
}

/// Outcome of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Created,
    Updated,
    Deleted,
    Failed,
}

/// Normalized result of a create/update/delete call.
#[derive(Debug, Clone)]
pub struct OperationResult {
    /// Post URN, or `"unknown"` when the provider returned a success the
    /// identifier could not be extracted from.
    pub id: String,
    pub status: PostStatus,
    /// Original provider payload, when the response carried one.
    pub raw: Option<Value>,
}

/// Row kind in a [`list_posts`] result.
///
/// [`list_posts`]: crate::LinkedInClient::list_posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// An actual post authored by the profile.
    Post,
    /// Informational row (no posts found, missing read scope).
    Info,
    /// Something went wrong fetching the list.
    Error,
}

/// One row of a post listing. Listing degrades gracefully: scope and auth
/// problems come back as `Info`/`Error` rows rather than errors, so a
/// caller's list view always renders.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub id: String,
    pub kind: EntryKind,
    pub message: String,
    pub details: Option<String>,
    pub created_at: Option<i64>,
    pub content: Option<Value>,
}

impl FeedEntry {
    pub(crate) fn info(id: impl Into<String>, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntryKind::Info,
            message: message.into(),
            details: Some(details.into()),
            created_at: None,
            content: None,
        }
    }

    pub(crate) fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            id: "error".to_string(),
            kind: EntryKind::Error,
            message: message.into(),
            details: Some(details.into()),
            created_at: None,
            content: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == EntryKind::Error
    }
}

/// Member profile from the OpenID Connect userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// OIDC `sub` claim — the member id used to build author URNs.
    #[serde(rename = "sub")]
    pub id: String,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// OAuth token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_in: Option<u64>,
    pub scope: Option<String>,
}

// =============================================================================
// Posts API wire format
// =============================================================================

/// Create body for the Posts API (`POST /rest/posts`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostBody {
    pub author: String,
    pub commentary: String,
    pub visibility: Visibility,
    pub distribution: Distribution,
    pub lifecycle_state: &'static str,
    pub is_reshare_disabled_by_author: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PostContent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Distribution {
    pub feed_distribution: &'static str,
    pub target_entities: Vec<Value>,
    pub third_party_distribution_channels: Vec<Value>,
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            feed_distribution: "MAIN_FEED",
            target_entities: Vec::new(),
            third_party_distribution_channels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostContent {
    pub media: MediaId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MediaId {
    pub id: String,
}
