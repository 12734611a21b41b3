//! Media upload pipelines.
//!
//! All three media kinds follow the same initialize → transfer shape, with
//! different endpoints and payloads: images and documents are done after the
//! byte transfer, videos need a third finalize call carrying the upload
//! session token and the per-part ETags. A failure at any phase fails the
//! whole upload; partial uploads are neither resumed nor rolled back.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{LinkedInError, Result};
use crate::types::MediaRef;
use crate::{LinkedInClient, LINKEDIN_VERSION, RESTLI_VERSION, VIDEO_LINKEDIN_VERSION};

#[derive(Debug, Deserialize)]
struct ImageInitResponse {
    value: ImageInitValue,
}

#[derive(Debug, Deserialize)]
struct ImageInitValue {
    #[serde(rename = "uploadUrl")]
    upload_url: String,
    image: String,
}

#[derive(Debug, Deserialize)]
struct VideoInitResponse {
    value: VideoInitValue,
}

#[derive(Debug, Deserialize)]
struct VideoInitValue {
    video: String,
    #[serde(rename = "uploadInstructions")]
    upload_instructions: Vec<UploadInstruction>,
    #[serde(rename = "uploadToken", default)]
    upload_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadInstruction {
    #[serde(rename = "uploadUrl")]
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct AssetRegisterResponse {
    value: AssetRegisterValue,
}

#[derive(Debug, Deserialize)]
struct AssetRegisterValue {
    asset: Option<String>,
    #[serde(rename = "uploadUrl")]
    upload_url: Option<String>,
}

impl LinkedInClient {
    /// Upload an image through the Images API.
    ///
    /// Initialize with the owning member, then PUT the raw bytes to the
    /// returned upload URL. No finalize phase.
    pub async fn upload_image(&self, bytes: &[u8], content_type: &str) -> Result<MediaRef> {
        self.require_profile_id("upload_image")?;
        let owner = self.person_urn();

        debug!(%owner, size = bytes.len(), "initializing image upload");

        let response = self
            .http_client
            .post(format!(
                "{}/rest/images?action=initializeUpload",
                self.api_base
            ))
            .bearer_auth(&self.credential.access_token)
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .json(&json!({ "initializeUploadRequest": { "owner": owner } }))
            .send()
            .await?;

        let init: ImageInitResponse = read_json(response).await?;
        info!(image = %init.value.image, "image upload initialized");

        self.transfer_bytes(&init.value.upload_url, bytes, content_type)
            .await?;
        info!(image = %init.value.image, "image uploaded");

        Ok(MediaRef::new(init.value.image, content_type))
    }

    /// Upload a video through the Videos API: initialize with the declared
    /// byte length (captions and thumbnail upload disabled), transfer the
    /// bytes capturing the part ETag, then finalize the upload session.
    pub async fn upload_video(&self, bytes: &[u8], content_type: &str) -> Result<MediaRef> {
        self.require_profile_id("upload_video")?;
        let owner = self.person_urn();

        debug!(%owner, size = bytes.len(), "initializing video upload");

        let response = self
            .http_client
            .post(format!(
                "{}/rest/videos?action=initializeUpload",
                self.api_base
            ))
            .bearer_auth(&self.credential.access_token)
            .header("LinkedIn-Version", VIDEO_LINKEDIN_VERSION)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .json(&json!({
                "initializeUploadRequest": {
                    "owner": owner,
                    "fileSizeBytes": bytes.len(),
                    "uploadCaptions": false,
                    "uploadThumbnail": false,
                }
            }))
            .send()
            .await?;

        let init: VideoInitResponse = read_json(response).await?;
        let instruction = init.value.upload_instructions.first().ok_or_else(|| {
            LinkedInError::Parse("video initialization returned no upload instructions".to_string())
        })?;
        info!(video = %init.value.video, "video upload initialized");

        let put_response = self
            .http_client
            .put(&instruction.upload_url)
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await?;
        let status = put_response.status();
        if !status.is_success() {
            let message = put_response.text().await.unwrap_or_default();
            return Err(LinkedInError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let etag = put_response
            .headers()
            .get(reqwest::header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_matches('"').to_string())
            .unwrap_or_default();

        let uploaded_part_ids: Vec<String> = if etag.is_empty() { vec![] } else { vec![etag] };
        let upload_token = init.value.upload_token.unwrap_or_default();

        let finalize_response = self
            .http_client
            .post(format!(
                "{}/rest/videos?action=finalizeUpload",
                self.api_base
            ))
            .bearer_auth(&self.credential.access_token)
            .header("LinkedIn-Version", VIDEO_LINKEDIN_VERSION)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .json(&json!({
                "finalizeUploadRequest": {
                    "uploadToken": upload_token,
                    "uploadedPartIds": uploaded_part_ids,
                    "video": init.value.video,
                }
            }))
            .send()
            .await?;
        let status = finalize_response.status();
        if !status.is_success() {
            let message = finalize_response.text().await.unwrap_or_default();
            return Err(LinkedInError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(video = %init.value.video, "video uploaded");
        Ok(MediaRef::new(init.value.video, content_type))
    }

    /// Upload a document through the legacy Assets API (documents have no
    /// modern upload endpoint). Register, then PUT the raw bytes.
    pub async fn upload_document(&self, bytes: &[u8], content_type: &str) -> Result<MediaRef> {
        self.require_profile_id("upload_document")?;
        let owner = self.person_urn();

        debug!(%owner, size = bytes.len(), "registering document upload");

        let response = self
            .http_client
            .post(format!(
                "{}/v2/assets?action=registerUpload",
                self.api_base
            ))
            .bearer_auth(&self.credential.access_token)
            .header("X-RestLi-Protocol-Version", RESTLI_VERSION)
            .json(&json!({
                "registerUploadRequest": {
                    "recipes": ["urn:li:digitalmediaRecipe:feedshare-document"],
                    "owner": owner,
                    "serviceRelationships": [{
                        "relationshipType": "OWNER",
                        "identifier": "urn:li:userGeneratedContent",
                    }],
                }
            }))
            .send()
            .await?;

        let registered: AssetRegisterResponse = read_json(response).await?;
        let (asset, upload_url) = match (registered.value.asset, registered.value.upload_url) {
            (Some(asset), Some(upload_url)) => (asset, upload_url),
            _ => {
                return Err(LinkedInError::Parse(
                    "document upload registration returned no asset or upload URL".to_string(),
                ))
            }
        };
        info!(%asset, "document upload registered");

        self.transfer_bytes(&upload_url, bytes, content_type).await?;
        info!(%asset, "document uploaded");

        Ok(MediaRef::new(asset, content_type))
    }

    /// Raw byte transfer to a provider-issued upload URL.
    async fn transfer_bytes(&self, upload_url: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        let response = self
            .http_client
            .put(upload_url)
            .header("Content-Type", content_type)
            .body(bytes.to_vec())
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
        Ok(())
    }
}

/// Check the status, then deserialize the body.
async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(LinkedInError::Api {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json()
        .await
        .map_err(|e| LinkedInError::Parse(format!("unexpected upload response: {e}")))
}
