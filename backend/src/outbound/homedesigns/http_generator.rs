//! Reqwest-backed HomeDesigns generator adapter.
//!
//! This adapter owns transport details only: bearer authentication, timeout
//! and HTTP status mapping, and JSON decoding into domain values. One call is
//! made per generation; retries are the caller's decision.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::dto::{CreditsResponseDto, ErrorBodyDto, GenerateRequestDto, GenerateResponseDto};
use crate::domain::ports::{DesignGenerationError, DesignGenerator};
use crate::domain::{GeneratedDesign, GenerationRequest, ProviderCredits};

const GENERATE_PATH: &str = "v1/generate";
const CREDITS_PATH: &str = "v1/credits";
const USER_AGENT: &str = "craftycrib-backend/0.1";

/// HomeDesigns API client.
pub struct HomeDesignsHttpGenerator {
    client: Client,
    base_url: Url,
    token: Option<Zeroizing<String>>,
}

impl HomeDesignsHttpGenerator {
    /// Build a client for `base_url`. Without a token every call fails with
    /// [`DesignGenerationError::NotConfigured`] and no request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            token: token
                .filter(|value| !value.trim().is_empty())
                .map(Zeroizing::new),
        })
    }

    fn token(&self) -> Result<&str, DesignGenerationError> {
        self.token
            .as_deref()
            .map(String::as_str)
            .ok_or_else(DesignGenerationError::not_configured)
    }

    fn endpoint(&self, path: &str) -> Result<Url, DesignGenerationError> {
        self.base_url
            .join(path)
            .map_err(|err| DesignGenerationError::transport(format!("invalid endpoint: {err}")))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl DesignGenerator for HomeDesignsHttpGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDesign, DesignGenerationError> {
        let token = self.token()?;
        let endpoint = self.endpoint(GENERATE_PATH)?;
        debug!(
            room_type = %request.room_type,
            style = %request.style,
            quality = request.quality.as_str(),
            "requesting design generation"
        );
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateRequestDto::from(request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let body: GenerateResponseDto = read_json(response).await?;
        body.into_design().map_err(DesignGenerationError::decode)
    }

    async fn credits(&self) -> Result<ProviderCredits, DesignGenerationError> {
        let token = self.token()?;
        let endpoint = self.endpoint(CREDITS_PATH)?;
        let response = self
            .client
            .get(endpoint)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let body: CreditsResponseDto = read_json(response).await?;
        Ok(body.into())
    }
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DesignGenerationError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        let error = map_status_error(status, body.as_ref());
        warn!(status = status.as_u16(), error = %error, "design provider returned an error");
        return Err(error);
    }
    serde_json::from_slice(body.as_ref()).map_err(|err| {
        DesignGenerationError::decode(format!("invalid provider JSON payload: {err}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> DesignGenerationError {
    if error.is_timeout() {
        DesignGenerationError::timeout(error.to_string())
    } else {
        DesignGenerationError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DesignGenerationError {
    let message = error_message(status, body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => DesignGenerationError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DesignGenerationError::timeout(message)
        }
        _ if status.is_client_error() => DesignGenerationError::rejected(status.as_u16(), message),
        _ => DesignGenerationError::upstream(status.as_u16(), message),
    }
}

/// Provider `message` when the body carries one, otherwise a generic text.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(|dto| dto.message)
        .map(|message| message.trim().to_owned())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("AI provider error (status {})", status.as_u16()))
}
