//! Pure LinkedIn REST API client.
//!
//! A minimal client for publishing to LinkedIn. Covers post
//! create/update/delete/list across both live API generations (the modern
//! Posts API and the legacy UGC Posts API), three-phase media uploads
//! (images, videos, documents), the OAuth code/refresh flows, and profile
//! lookup via OpenID Connect.
//!
//! Post identifiers are URNs whose prefix decides which generation applies:
//! `urn:li:share:` posts go through `/rest/posts`, `urn:li:ugcPost:` posts
//! through `/v2/ugcPosts`, and `urn:li:activity:` identifiers are LinkedIn's
//! read-only feed format and cannot be mutated at all. See [`UrnKind`].
//!
//! # Example
//!
//! ```rust,ignore
//! use linkedin::{Credential, LinkedInClient, PostRequest, Visibility};
//!
//! let client = LinkedInClient::new(Credential {
//!     access_token: token,
//!     profile_id: member_id,
//! });
//!
//! let image = client.upload_image(&bytes, "image/png").await?;
//! let result = client
//!     .create_post(&PostRequest::text("Hello!", Visibility::Public).with_media(image))
//!     .await?;
//! println!("created {}", result.id);
//! ```

pub mod error;
pub mod oauth;
pub mod posts;
pub mod types;
pub mod upload;
pub mod urn;

pub use error::{LinkedInError, Result};
pub use oauth::OAuthClient;
pub use types::*;
pub use urn::UrnKind;

/// API version header value for most provider calls.
pub(crate) const LINKEDIN_VERSION: &str = "202502";
/// The Videos API runs one version ahead; the skew is the provider's, not ours.
pub(crate) const VIDEO_LINKEDIN_VERSION: &str = "202503";
pub(crate) const RESTLI_VERSION: &str = "2.0.0";

const API_BASE: &str = "https://api.linkedin.com";

/// Bearer credential plus the provider-assigned member id it belongs to.
///
/// Supplied by the caller per client; never persisted here.
#[derive(Debug, Clone)]
pub struct Credential {
    pub access_token: String,
    /// Member id used to build `urn:li:person:` author/owner URNs.
    pub profile_id: String,
}

/// LinkedIn API client.
///
/// Explicitly constructed and stateless between calls: each operation is an
/// independent sequence of blocking round trips against the provider, with
/// no retries and no shared mutable state. Rate limiting against a shared
/// credential is the caller's concern.
#[derive(Clone)]
pub struct LinkedInClient {
    pub(crate) http_client: reqwest::Client,
    pub(crate) credential: Credential,
    pub(crate) api_base: String,
}

impl LinkedInClient {
    /// Create a new client for the given credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            credential,
            api_base: API_BASE.to_string(),
        }
    }

    /// Set a custom API base URL (for tests and proxies).
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    pub fn profile_id(&self) -> &str {
        &self.credential.profile_id
    }

    /// Author/owner URN for the credential's member.
    pub(crate) fn person_urn(&self) -> String {
        format!("urn:li:person:{}", self.credential.profile_id)
    }

    /// Precondition check shared by every operation that needs an owner URN.
    /// Fails before any network call.
    pub(crate) fn require_profile_id(&self, operation: &str) -> Result<()> {
        if self.credential.profile_id.is_empty() {
            return Err(LinkedInError::Precondition(format!(
                "{operation} requires a profile id"
            )));
        }
        Ok(())
    }
}
