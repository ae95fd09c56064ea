//! Wire DTOs for the HomeDesigns API.
//!
//! Requests and responses use snake_case field names; the adapter maps them
//! onto the domain generation types in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::{GeneratedDesign, GenerationRequest, ProviderCredits};

#[derive(Debug, Serialize)]
pub(super) struct GenerateRequestDto<'a> {
    pub(super) image_url: &'a str,
    pub(super) room_type: &'a str,
    pub(super) design_style: &'a str,
    pub(super) mode: &'static str,
    pub(super) output_quality: &'static str,
}

impl<'a> From<&'a GenerationRequest> for GenerateRequestDto<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            image_url: &request.image_url,
            room_type: &request.room_type,
            design_style: &request.style,
            mode: request.mode.as_str(),
            output_quality: request.quality.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponseDto {
    pub(super) output_url: Option<String>,
    pub(super) thumbnail_url: Option<String>,
    pub(super) generation_id: Option<String>,
    pub(super) credits_used: Option<u32>,
}

impl GenerateResponseDto {
    pub(super) fn into_design(self) -> Result<GeneratedDesign, String> {
        let output_url = self
            .output_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| "response is missing output_url".to_owned())?;
        Ok(GeneratedDesign {
            output_url,
            thumbnail_url: self.thumbnail_url,
            generation_id: self.generation_id,
            credits_used: self.credits_used,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreditsResponseDto {
    pub(super) credits_remaining: i64,
    pub(super) plan: Option<String>,
}

impl From<CreditsResponseDto> for ProviderCredits {
    fn from(value: CreditsResponseDto) -> Self {
        Self {
            credits_remaining: value.credits_remaining,
            plan: value.plan,
        }
    }
}

/// Error body returned by the provider; only `message` is read.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    pub(super) message: Option<String>,
}
