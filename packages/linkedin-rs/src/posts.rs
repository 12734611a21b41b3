//! Post create/update/delete/list against both API generations.
//!
//! Create targets the modern Posts API unless the attachment is a document,
//! which only the legacy UGC Posts API accepts. Update and delete dispatch
//! on [`UrnKind`]: modern posts go through `/rest/posts` partial updates,
//! legacy posts through `/v2/ugcPosts`, and read-only activity URNs are
//! rejected before any request is sent.

use reqwest::header::LOCATION;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{LinkedInError, Result};
use crate::types::{
    CreatePostBody, Distribution, FeedEntry, MediaId, MediaRef, OperationResult, PostContent,
    PostRequest, PostStatus, PostUpdate,
};
use crate::urn::UrnKind;
use crate::{LinkedInClient, LINKEDIN_VERSION, RESTLI_VERSION};

/// The Posts API finder caps page size at 20 regardless of what is asked for.
const MAX_LIST_COUNT: u32 = 20;

impl LinkedInClient {
    /// Create a post.
    ///
    /// At most one media attachment is supported; the first entry with a
    /// non-empty asset wins. Document attachments (PDFs) are re-routed to
    /// the UGC Posts API, which is the only generation that accepts them.
    pub async fn create_post(&self, request: &PostRequest) -> Result<OperationResult> {
        self.require_profile_id("create_post")?;

        let media = pick_media(&request.media);
        if media.is_none() && !request.media.is_empty() {
            warn!("no valid media assets on request, creating text-only post");
        }

        if let Some(media) = media {
            if media.is_document() {
                info!(asset = %media.asset, "document attachment, falling back to UGC Posts API");
                return self.create_post_legacy(request, Some(media)).await;
            }
        }

        let body = build_create_body(self.person_urn(), request, media);
        debug!(author = %body.author, has_media = body.content.is_some(), "creating post");

        let response = self
            .http_client
            .post(format!("{}/rest/posts", self.api_base))
            .bearer_auth(&self.credential.access_token)
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .json(&body)
            .send()
            .await?;

        finish_create(response).await
    }

    /// Create via the legacy UGC Posts API. Used for document attachments.
    async fn create_post_legacy(
        &self,
        request: &PostRequest,
        media: Option<&MediaRef>,
    ) -> Result<OperationResult> {
        let body = build_legacy_create_body(self.person_urn(), request, media);

        let response = self
            .http_client
            .post(format!("{}/v2/ugcPosts", self.api_base))
            .bearer_auth(&self.credential.access_token)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .json(&body)
            .send()
            .await?;

        finish_create(response).await
    }

    /// Update a post's text (and, for legacy posts, visibility).
    ///
    /// Read-only activity URNs fail immediately with
    /// [`LinkedInError::Precondition`] and no request is sent.
    pub async fn update_post(
        &self,
        post_id: &str,
        update: &PostUpdate,
    ) -> Result<OperationResult> {
        match UrnKind::classify(post_id) {
            UrnKind::Modern => {
                // Non-fatal probe: posts created through this client should
                // pass, but a failed probe is not proof we can't edit.
                if !self.verify_post_ownership(post_id).await {
                    warn!(post_id, "ownership verification failed, attempting update anyway");
                }
                self.update_post_modern(post_id, update).await
            }
            UrnKind::ReadOnly => Err(read_only_error("update", post_id)),
            UrnKind::Legacy => self.update_post_legacy(post_id, update).await,
        }
    }

    /// Partial update through the Posts API. Only commentary is editable on
    /// this path; visibility and attached media cannot be changed.
    async fn update_post_modern(
        &self,
        post_id: &str,
        update: &PostUpdate,
    ) -> Result<OperationResult> {
        let encoded = urlencoding::encode(post_id);
        let url = format!("{}/rest/posts/{}", self.api_base, encoded);

        let mut set = serde_json::Map::new();
        if let Some(text) = &update.text {
            set.insert("commentary".to_string(), json!(text));
        }
        let body = json!({ "patch": { "$set": set } });

        debug!(post_id, %url, "updating post via PARTIAL_UPDATE");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.credential.access_token)
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .header("X-RestLi-Method", "PARTIAL_UPDATE")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::FORBIDDEN => {
                return Err(LinkedInError::Permission {
                    operation: "update_post",
                    id: post_id.to_string(),
                    message: "the post was created by a different account, belongs to an \
                              organization page you do not administer, or the access token \
                              lacks the required scope"
                        .to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(LinkedInError::NotFound {
                    operation: "update_post",
                    id: post_id.to_string(),
                });
            }
            _ => {}
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LinkedInError::Api {
                status: status.as_u16(),
                message,
            });
        }

        finish_mutation(response, post_id, PostStatus::Updated).await
    }

    /// Full-document update through the UGC Posts API. Only the fields
    /// present in the update are included in the outgoing payload.
    async fn update_post_legacy(
        &self,
        post_id: &str,
        update: &PostUpdate,
    ) -> Result<OperationResult> {
        let body = build_legacy_update_body(update);
        let url = format!("{}/v2/ugcPosts/{}", self.api_base, post_id);

        debug!(post_id, "updating post via UGC Posts API");

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&self.credential.access_token)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LinkedInError::Api {
                status: status.as_u16(),
                message,
            });
        }

        finish_mutation(response, post_id, PostStatus::Updated).await
    }

    /// Delete a post. Same dispatch as [`update_post`](Self::update_post);
    /// read-only identifiers fail without a network call.
    pub async fn delete_post(&self, post_id: &str) -> Result<OperationResult> {
        match UrnKind::classify(post_id) {
            UrnKind::Modern => self.delete_post_modern(post_id).await,
            UrnKind::ReadOnly => Err(read_only_error("delete", post_id)),
            UrnKind::Legacy => self.delete_post_legacy(post_id).await,
        }
    }

    async fn delete_post_modern(&self, post_id: &str) -> Result<OperationResult> {
        let encoded = urlencoding::encode(post_id);
        let url = format!("{}/rest/posts/{}", self.api_base, encoded);

        debug!(post_id, %url, "deleting post");

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.credential.access_token)
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNPROCESSABLE_ENTITY => {
                return Err(LinkedInError::Conflict {
                    operation: "delete_post",
                    id: post_id.to_string(),
                    message: "the post may already be deleted, belong to an organization page, \
                              have accumulated engagement, or be outside the allowed deletion \
                              window"
                        .to_string(),
                });
            }
            StatusCode::FORBIDDEN => {
                return Err(LinkedInError::Permission {
                    operation: "delete_post",
                    id: post_id.to_string(),
                    message: "the access token's member does not have permission to delete \
                              this post"
                        .to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(LinkedInError::NotFound {
                    operation: "delete_post",
                    id: post_id.to_string(),
                });
            }
            _ => {}
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LinkedInError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(post_id, "post deleted");
        Ok(OperationResult {
            id: post_id.to_string(),
            status: PostStatus::Deleted,
            raw: None,
        })
    }

    async fn delete_post_legacy(&self, post_id: &str) -> Result<OperationResult> {
        let url = format!("{}/v2/ugcPosts/{}", self.api_base, post_id);

        debug!(post_id, "deleting post via UGC Posts API");

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.credential.access_token)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LinkedInError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(post_id, "post deleted");
        Ok(OperationResult {
            id: post_id.to_string(),
            status: PostStatus::Deleted,
            raw: None,
        })
    }

    /// List the credential's posts, most recently modified first.
    ///
    /// Never returns an error: listing requires a read scope
    /// (`r_member_social`) separate from the write scope, and a missing
    /// scope should degrade a list view, not break it. Scope, auth and
    /// transport problems come back as `Info`/`Error` rows.
    pub async fn list_posts(&self, count: u32) -> Vec<FeedEntry> {
        if self.credential.profile_id.is_empty() {
            return vec![FeedEntry::error(
                "missing profile id",
                "cannot list posts without the member id for the author URN",
            )];
        }

        let author_urn = self.person_urn();
        let count = count.min(MAX_LIST_COUNT);

        debug!(%author_urn, count, "listing posts");

        let result = self
            .http_client
            .get(format!("{}/rest/posts", self.api_base))
            .bearer_auth(&self.credential.access_token)
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .header("X-RestLi-Method", "FINDER")
            .query(&[
                ("q", "author"),
                ("author", author_urn.as_str()),
                ("count", count.to_string().as_str()),
                ("sortBy", "LAST_MODIFIED"),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "post listing request failed");
                return vec![FeedEntry::error(
                    "failed to reach LinkedIn",
                    e.to_string(),
                )];
            }
        };

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body: Value = match response.json().await {
                    Ok(body) => body,
                    Err(e) => {
                        return vec![FeedEntry::error(
                            "unexpected response from LinkedIn",
                            format!("failed to parse post listing: {e}"),
                        )]
                    }
                };
                entries_from_elements(&author_urn, &body)
            }
            StatusCode::FORBIDDEN => {
                info!("post listing denied, token lacks the read scope");
                vec![
                    FeedEntry::info(
                        author_urn.clone(),
                        "LinkedIn requires the r_member_social scope to list posts",
                        "The current token has w_member_social (posting) but not \
                         r_member_social (reading). Request the read scope from your \
                         LinkedIn app administrator.",
                    ),
                    FeedEntry::info(
                        author_urn,
                        "Creating, updating and deleting posts still work",
                        "The write scope allows publishing content, just not reading \
                         existing posts back from the API.",
                    ),
                ]
            }
            StatusCode::UNAUTHORIZED => {
                warn!("post listing unauthorized, token invalid or expired");
                vec![FeedEntry::error(
                    "LinkedIn access token is invalid or expired",
                    "Reconnect the LinkedIn account to refresh the access token",
                )]
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "unexpected post listing response");
                vec![FeedEntry::error(
                    format!("LinkedIn returned unexpected status: {}", status.as_u16()),
                    truncate(&body, 200),
                )]
            }
        }
    }

    /// Best-effort check that the credential's member can see (and so
    /// probably edit) a post, trying author, member and public view
    /// contexts in turn. Failure here never blocks the mutation.
    async fn verify_post_ownership(&self, post_id: &str) -> bool {
        let encoded = urlencoding::encode(post_id);

        for context in ["AUTHOR", "MEMBER", "PUBLIC"] {
            let url = format!(
                "{}/rest/posts/{}?viewContext={}",
                self.api_base, encoded, context
            );

            match self
                .http_client
                .get(&url)
                .bearer_auth(&self.credential.access_token)
                .header("LinkedIn-Version", LINKEDIN_VERSION)
                .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    debug!(post_id, context, "post access verified");
                    return true;
                }
                Ok(response) => {
                    debug!(post_id, context, status = response.status().as_u16(), "no access");
                }
                Err(e) => {
                    debug!(post_id, context, error = %e, "ownership probe failed");
                }
            }
        }

        false
    }
}

/// First media entry with a non-empty asset, if any. The Posts API only
/// accepts a single attachment per post.
fn pick_media(media: &[MediaRef]) -> Option<&MediaRef> {
    media.iter().find(|m| !m.asset.is_empty())
}

fn build_create_body(
    author: String,
    request: &PostRequest,
    media: Option<&MediaRef>,
) -> CreatePostBody {
    CreatePostBody {
        author,
        commentary: request.text.clone(),
        visibility: request.visibility,
        distribution: Distribution::default(),
        lifecycle_state: "PUBLISHED",
        is_reshare_disabled_by_author: false,
        content: media.map(|m| PostContent {
            media: MediaId {
                id: m.asset.clone(),
            },
        }),
    }
}

fn build_legacy_create_body(
    author: String,
    request: &PostRequest,
    media: Option<&MediaRef>,
) -> Value {
    let mut share_content = json!({
        "shareCommentary": { "text": request.text },
        "shareMediaCategory": "NONE",
    });

    if let Some(media) = media {
        share_content["shareMediaCategory"] = json!(legacy_media_category(&media.media_type));
        share_content["media"] = json!([{ "status": "READY", "media": media.asset }]);
    }

    json!({
        "author": author,
        "lifecycleState": "PUBLISHED",
        "specificContent": { "com.linkedin.ugc.ShareContent": share_content },
        "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": request.visibility },
    })
}

fn legacy_media_category(media_type: &str) -> &'static str {
    let ty = media_type.to_lowercase();
    if ty.contains("pdf") || ty.contains("document") {
        "DOCUMENT"
    } else if ty.contains("image") {
        "IMAGE"
    } else if ty.contains("video") {
        "VIDEO"
    } else {
        "NONE"
    }
}

/// UGC update bodies carry only the fields actually being changed.
fn build_legacy_update_body(update: &PostUpdate) -> Value {
    let mut body = serde_json::Map::new();

    if let Some(text) = &update.text {
        body.insert(
            "specificContent".to_string(),
            json!({
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": text }
                }
            }),
        );
    }
    if let Some(visibility) = update.visibility {
        body.insert(
            "visibility".to_string(),
            json!({ "com.linkedin.ugc.MemberNetworkVisibility": visibility }),
        );
    }

    Value::Object(body)
}

fn read_only_error(operation: &str, post_id: &str) -> LinkedInError {
    LinkedInError::Precondition(format!(
        "cannot {operation} {post_id}: activity URNs are LinkedIn's read-only internal \
         feed format; mutation needs the share URN (urn:li:share:...) returned when the \
         post was created through the API"
    ))
}

/// Normalize a create response from either generation.
///
/// LinkedIn often answers a successful create with 201 and an empty body,
/// putting the new URN only in the `Location`-style header. A JSON body, when
/// present, carries the id directly; anything else successful is reported
/// best-effort as `"unknown"`.
async fn finish_create(response: reqwest::Response) -> Result<OperationResult> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(LinkedInError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = response.text().await?;

    if status == StatusCode::CREATED && text.trim().is_empty() {
        let id = location
            .as_deref()
            .and_then(|l| l.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("unknown")
            .to_string();
        info!(%id, "post created");
        return Ok(OperationResult {
            id,
            status: PostStatus::Created,
            raw: None,
        });
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(body) => {
            let id = body
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            info!(%id, "post created");
            Ok(OperationResult {
                id,
                status: PostStatus::Created,
                raw: Some(body),
            })
        }
        Err(_) => Ok(OperationResult {
            id: "unknown".to_string(),
            status: PostStatus::Created,
            raw: None,
        }),
    }
}

/// Normalize a successful update response (either generation).
async fn finish_mutation(
    response: reqwest::Response,
    post_id: &str,
    status: PostStatus,
) -> Result<OperationResult> {
    let text = response.text().await?;

    if text.trim().is_empty() {
        info!(post_id, "post updated");
        return Ok(OperationResult {
            id: post_id.to_string(),
            status,
            raw: None,
        });
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(body) => {
            let id = body
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or(post_id)
                .to_string();
            info!(%id, "post updated");
            Ok(OperationResult {
                id,
                status,
                raw: Some(body),
            })
        }
        Err(_) => Ok(OperationResult {
            id: post_id.to_string(),
            status,
            raw: None,
        }),
    }
}

fn entries_from_elements(author_urn: &str, body: &Value) -> Vec<FeedEntry> {
    let elements = body
        .get("elements")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if elements.is_empty() {
        return vec![FeedEntry::info(
            author_urn,
            "No posts found for this author",
            "The author may not have any published posts, or all posts are private",
        )];
    }

    elements
        .iter()
        .map(|element| {
            let id = element
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            // The finder has returned commentary both as a plain string and
            // as an object with a `text` field; accept either.
            let message = element
                .get("commentary")
                .and_then(|c| c.as_str().or_else(|| c.get("text").and_then(Value::as_str)))
                .unwrap_or("No text content")
                .to_string();
            let created_at = element
                .get("createdAt")
                .and_then(Value::as_i64)
                .or_else(|| element.get("created").and_then(|c| c.get("time")).and_then(Value::as_i64))
                .or_else(|| element.get("created").and_then(Value::as_i64));
            let lifecycle = element
                .get("lifecycleState")
                .and_then(Value::as_str)
                .unwrap_or("UNKNOWN");
            let details = format!(
                "Post URN: {} | Created: {} | Status: {}",
                id,
                created_at.map_or_else(|| "unknown".to_string(), |t| t.to_string()),
                lifecycle
            );

            FeedEntry {
                id,
                kind: crate::types::EntryKind::Post,
                message,
                details: Some(details),
                created_at,
                content: element.get("content").filter(|c| !c.is_null()).cloned(),
            }
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::types::{EntryKind, Visibility};
    use crate::{Credential, LinkedInClient};

    fn test_client(api_base: String) -> LinkedInClient {
        LinkedInClient::new(Credential {
            access_token: "test-token".to_string(),
            profile_id: "abc123".to_string(),
        })
        .with_api_base(api_base)
    }

    #[test]
    fn text_only_create_body_has_no_content_field() {
        let request = PostRequest::text("hello", Visibility::Public);
        let body = build_create_body("urn:li:person:abc123".to_string(), &request, None);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["commentary"], "hello");
        assert_eq!(value["visibility"], "PUBLIC");
        assert_eq!(value["lifecycleState"], "PUBLISHED");
        assert!(value.get("content").is_none());
    }

    #[test]
    fn first_valid_media_is_attached() {
        let media = vec![
            MediaRef::new("", "image/png"),
            MediaRef::new("urn:li:image:1", "image/png"),
            MediaRef::new("urn:li:image:2", "image/png"),
        ];
        let picked = pick_media(&media).unwrap();
        assert_eq!(picked.asset, "urn:li:image:1");

        let request = PostRequest {
            text: "with media".to_string(),
            visibility: Visibility::Connections,
            media,
        };
        let body = build_create_body(
            "urn:li:person:abc123".to_string(),
            &request,
            pick_media(&request.media),
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["content"]["media"]["id"], "urn:li:image:1");
    }

    #[test]
    fn legacy_update_body_includes_only_present_fields() {
        let update = PostUpdate {
            text: Some("new text".to_string()),
            visibility: None,
        };
        let body = build_legacy_update_body(&update);

        assert_eq!(
            body["specificContent"]["com.linkedin.ugc.ShareContent"]["shareCommentary"]["text"],
            "new text"
        );
        assert!(body.get("visibility").is_none());

        let visibility_only = PostUpdate {
            text: None,
            visibility: Some(Visibility::Connections),
        };
        let body = build_legacy_update_body(&visibility_only);
        assert!(body.get("specificContent").is_none());
        assert_eq!(
            body["visibility"]["com.linkedin.ugc.MemberNetworkVisibility"],
            "CONNECTIONS"
        );
    }

    #[tokio::test]
    async fn document_media_routes_to_legacy_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/ugcPosts"))
            .and(body_partial_json(json!({
                "specificContent": {
                    "com.linkedin.ugc.ShareContent": { "shareMediaCategory": "DOCUMENT" }
                }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Location", "/v2/ugcPosts/urn:li:ugcPost:77"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/posts"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let request = PostRequest::text("report attached", Visibility::Public)
            .with_media(MediaRef::new("urn:li:digitalmediaAsset:1", "application/pdf"));

        let result = client.create_post(&request).await.unwrap();
        assert_eq!(result.id, "urn:li:ugcPost:77");
        assert_eq!(result.status, PostStatus::Created);
    }

    #[tokio::test]
    async fn empty_create_response_takes_id_from_location_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/posts"))
            .and(header("LinkedIn-Version", "202502"))
            .and(body_partial_json(json!({ "commentary": "hello" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Location", "/rest/posts/urn:li:share:999"),
            )
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let request = PostRequest::text("hello", Visibility::Public);

        let result = client.create_post(&request).await.unwrap();
        assert_eq!(result.id, "urn:li:share:999");
        assert_eq!(result.status, PostStatus::Created);
        assert!(result.raw.is_none());
    }

    #[tokio::test]
    async fn json_create_response_takes_id_from_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/posts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": "urn:li:share:5" })),
            )
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client
            .create_post(&PostRequest::text("hi", Visibility::Public))
            .await
            .unwrap();

        assert_eq!(result.id, "urn:li:share:5");
        assert!(result.raw.is_some());
    }

    #[tokio::test]
    async fn create_propagates_http_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/posts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .create_post(&PostRequest::text("hi", Visibility::Public))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkedInError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn update_read_only_urn_fails_without_network_call() {
        let server = MockServer::start().await;

        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .update_post(
                "urn:li:activity:123",
                &PostUpdate {
                    text: Some("nope".to_string()),
                    visibility: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LinkedInError::Precondition(_)));
    }

    #[tokio::test]
    async fn delete_read_only_urn_fails_without_network_call() {
        let server = MockServer::start().await;

        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.delete_post("urn:li:activity:123").await.unwrap_err();

        assert!(matches!(err, LinkedInError::Precondition(_)));
    }

    #[tokio::test]
    async fn modern_update_sends_partial_update() {
        let server = MockServer::start().await;

        // The ownership probe GETs are unmatched and come back 404, which
        // the update tolerates.
        Mock::given(method("POST"))
            .and(path_regex("^/rest/posts/.+"))
            .and(header("X-RestLi-Method", "PARTIAL_UPDATE"))
            .and(body_partial_json(json!({
                "patch": { "$set": { "commentary": "edited" } }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client
            .update_post(
                "urn:li:share:123",
                &PostUpdate {
                    text: Some("edited".to_string()),
                    visibility: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.id, "urn:li:share:123");
        assert_eq!(result.status, PostStatus::Updated);
    }

    #[tokio::test]
    async fn modern_update_403_is_permission_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex("^/rest/posts/.+"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .update_post(
                "urn:li:share:123",
                &PostUpdate {
                    text: Some("edited".to_string()),
                    visibility: None,
                },
            )
            .await
            .unwrap_err();

        match err {
            LinkedInError::Permission { operation, id, message } => {
                assert_eq!(operation, "update_post");
                assert_eq!(id, "urn:li:share:123");
                assert!(message.contains("scope"));
            }
            other => panic!("expected Permission, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn modern_update_404_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex("^/rest/posts/.+"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .update_post(
                "urn:li:share:123",
                &PostUpdate {
                    text: Some("edited".to_string()),
                    visibility: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LinkedInError::NotFound { .. }));
    }

    #[tokio::test]
    async fn legacy_update_uses_put() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v2/ugcPosts/urn:li:ugcPost:9"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client
            .update_post(
                "urn:li:ugcPost:9",
                &PostUpdate {
                    text: Some("edited".to_string()),
                    visibility: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.status, PostStatus::Updated);
    }

    #[tokio::test]
    async fn modern_delete_422_is_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path_regex("^/rest/posts/.+"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.delete_post("urn:li:share:123").await.unwrap_err();

        assert!(matches!(err, LinkedInError::Conflict { .. }));
    }

    #[tokio::test]
    async fn modern_delete_success() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path_regex("^/rest/posts/.+"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client.delete_post("urn:li:share:123").await.unwrap();

        assert_eq!(result.id, "urn:li:share:123");
        assert_eq!(result.status, PostStatus::Deleted);
    }

    #[tokio::test]
    async fn legacy_delete_success() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v2/ugcPosts/urn:li:ugcPost:9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client.delete_post("urn:li:ugcPost:9").await.unwrap();

        assert_eq!(result.status, PostStatus::Deleted);
    }

    #[tokio::test]
    async fn list_maps_elements_to_post_entries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/posts"))
            .and(wiremock::matchers::query_param("q", "author"))
            .and(wiremock::matchers::query_param("sortBy", "LAST_MODIFIED"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "elements": [
                    {
                        "id": "urn:li:share:1",
                        "commentary": "plain string commentary",
                        "createdAt": 1700000000,
                        "lifecycleState": "PUBLISHED"
                    },
                    {
                        "id": "urn:li:share:2",
                        "commentary": { "text": "object commentary" },
                        "content": { "media": { "id": "urn:li:image:5" } }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let entries = client.list_posts(50).await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Post);
        assert_eq!(entries[0].message, "plain string commentary");
        assert_eq!(entries[0].created_at, Some(1700000000));
        assert_eq!(entries[1].message, "object commentary");
        assert!(entries[1].content.is_some());
    }

    #[tokio::test]
    async fn list_caps_requested_count_at_20() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/posts"))
            .and(wiremock::matchers::query_param("count", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "elements": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let entries = client.list_posts(100).await;

        // Empty result set still yields an informational row.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Info);
    }

    #[tokio::test]
    async fn list_403_returns_scope_info_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/posts"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let entries = client.list_posts(10).await;

        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| !e.is_error()));
        assert!(entries
            .iter()
            .any(|e| e.message.contains("r_member_social")));
    }

    #[tokio::test]
    async fn list_401_returns_error_entry() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/posts"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let entries = client.list_posts(10).await;

        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_error());
        assert!(entries[0].message.contains("invalid or expired"));
    }

    #[tokio::test]
    async fn list_unexpected_status_returns_error_entry() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/posts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let entries = client.list_posts(10).await;

        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_error());
        assert!(entries[0].message.contains("500"));
    }
}
