//! Value types exchanged with the AI image generation provider.

use serde::{Deserialize, Serialize};

use crate::domain::wire_enum::wire_enum;

wire_enum! {
    /// Render quality requested from the provider.
    pub enum OutputQuality as "output quality" {
        /// Default quality for free accounts.
        Standard => "standard",
        /// High definition, reserved for paid plans.
        Hd => "hd",
    }
}

wire_enum! {
    /// Kind of scene being redesigned.
    pub enum GenerationMode as "generation mode" {
        /// Indoor rooms.
        Interior => "interior",
        /// House facades.
        Exterior => "exterior",
        /// Gardens and patios.
        Garden => "garden",
    }
}

/// Parameters of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Absolute URL of the source photo.
    pub image_url: String,
    /// Room type identifier.
    pub room_type: String,
    /// Style identifier.
    pub style: String,
    /// Scene kind.
    pub mode: GenerationMode,
    /// Render quality.
    pub quality: OutputQuality,
}

/// Successful provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDesign {
    /// Full-size render.
    pub output_url: String,
    /// Thumbnail render, when the provider returns one.
    pub thumbnail_url: Option<String>,
    /// Provider-side identifier.
    pub generation_id: Option<String>,
    /// Provider credits charged for the call.
    pub credits_used: Option<u32>,
}

/// Provider account balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredits {
    /// Credits left on the provider account.
    pub credits_remaining: i64,
    /// Provider plan name.
    pub plan: Option<String>,
}
