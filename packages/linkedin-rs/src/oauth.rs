//! OAuth token flows and profile lookup.
//!
//! Token exchange and refresh go against LinkedIn's OAuth endpoint with
//! form-encoded bodies. Profile lookup uses the OpenID Connect userinfo
//! endpoint; the `sub` claim is the member id used for author URNs.

use tracing::{debug, info};

use crate::error::{LinkedInError, Result};
use crate::types::{Profile, TokenResponse};
use crate::LinkedInClient;

const OAUTH_BASE: &str = "https://www.linkedin.com";

/// OAuth client for the authorization-code and refresh flows.
///
/// Explicitly constructed with app credentials; holds no token state.
#[derive(Clone)]
pub struct OAuthClient {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    base_url: String,
}

impl OAuthClient {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: OAUTH_BASE.to_string(),
        }
    }

    /// Set a custom base URL (for tests and proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenResponse> {
        debug!("exchanging authorization code for access token");

        let response = self
            .http_client
            .post(format!("{}/oauth/v2/accessToken", self.base_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        let token = read_token(response).await?;
        info!("authorization code exchanged");
        Ok(token)
    }

    /// Refresh an access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        debug!("refreshing access token");

        let response = self
            .http_client
            .post(format!("{}/oauth/v2/accessToken", self.base_url))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let token = read_token(response).await?;
        info!("access token refreshed");
        Ok(token)
    }
}

async fn read_token(response: reqwest::Response) -> Result<TokenResponse> {
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
        .map_err(|e| LinkedInError::Parse(format!("unexpected token response: {e}")))
}

impl LinkedInClient {
    /// Fetch the credential's member profile via OpenID Connect userinfo.
    pub async fn get_profile(&self) -> Result<Profile> {
        let response = self
            .http_client
            .get(format!("{}/v2/userinfo", self.api_base))
            .bearer_auth(&self.credential.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(LinkedInError::Permission {
                operation: "get_profile",
                id: self.credential.profile_id.clone(),
                message: "userinfo access denied; the LinkedIn app needs the 'Sign in with \
                          LinkedIn using OpenID Connect' product with the openid, profile \
                          and email scopes"
                    .to_string(),
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LinkedInError::Auth(
                "access token is invalid or expired".to_string(),
            ));
        }
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
            .map_err(|e| LinkedInError::Parse(format!("unexpected userinfo response: {e}")))
    }
}
