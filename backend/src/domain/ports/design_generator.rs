//! Driven port for the AI design generation provider.
//!
//! One synchronous call per generation; no retries happen behind this port.

use async_trait::async_trait;

use crate::domain::{GeneratedDesign, GenerationRequest, ProviderCredits};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the generation provider.
    pub enum DesignGenerationError {
        /// No API token was configured.
        NotConfigured => "design generation provider is not configured",
        /// The call exceeded the configured timeout.
        Timeout { message: String } => "design generation timed out: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } => "design generation transport failed: {message}",
        /// The provider throttled the request (HTTP 429).
        RateLimited { message: String } => "design generation rate limited: {message}",
        /// The provider refused the request (HTTP 4xx).
        Rejected { status: u16, message: String } =>
            "design generation rejected ({status}): {message}",
        /// The provider failed (HTTP 5xx).
        Upstream { status: u16, message: String } =>
            "design generation provider error ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "design generation response decode failed: {message}",
    }
}

impl DesignGenerationError {
    /// Text stored in the project's generation history and shown to the
    /// owner. Provider messages are passed through; transport details are not.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured => "AI generation is not available right now".to_owned(),
            Self::Timeout { .. } => "The AI provider took too long to respond".to_owned(),
            Self::RateLimited { .. } => "Too many generation requests, try again later".to_owned(),
            Self::Rejected { message, .. } | Self::Upstream { message, .. } => message.clone(),
            Self::Transport { .. } | Self::Decode { .. } => {
                "The AI provider could not be reached".to_owned()
            }
        }
    }
}

/// Port for rendering designs and reading the provider account balance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DesignGenerator: Send + Sync {
    /// Render one design for `request`.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDesign, DesignGenerationError>;

    /// Remaining provider credits.
    async fn credits(&self) -> Result<ProviderCredits, DesignGenerationError>;
}

/// Deterministic generator for development and tests: echoes the source
/// image back as the render.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureDesignGenerator;

#[async_trait]
impl DesignGenerator for FixtureDesignGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDesign, DesignGenerationError> {
        Ok(GeneratedDesign {
            output_url: format!("{}?style={}", request.image_url, request.style),
            thumbnail_url: None,
            generation_id: Some(format!("fixture-{}", request.style)),
            credits_used: Some(1),
        })
    }

    async fn credits(&self) -> Result<ProviderCredits, DesignGenerationError> {
        Ok(ProviderCredits {
            credits_remaining: 100,
            plan: Some("fixture".to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GenerationMode, OutputQuality};
    use rstest::rstest;

    #[rstest]
    #[case(DesignGenerationError::rejected(422_u16, "Unsupported image"), "Unsupported image")]
    #[case(DesignGenerationError::transport("dns"), "The AI provider could not be reached")]
    #[case(DesignGenerationError::not_configured(), "AI generation is not available right now")]
    fn user_messages_hide_transport_details(
        #[case] error: DesignGenerationError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.user_message(), expected);
    }

    #[tokio::test]
    async fn fixture_generator_echoes_source_image() {
        let request = GenerationRequest {
            image_url: "https://cdn.example/room.jpg".to_owned(),
            room_type: "kitchen".to_owned(),
            style: "industrial".to_owned(),
            mode: GenerationMode::Interior,
            quality: OutputQuality::Standard,
        };
        let design = FixtureDesignGenerator
            .generate(&request)
            .await
            .expect("fixture render");
        assert_eq!(design.output_url, "https://cdn.example/room.jpg?style=industrial");
    }
}
