//! Driving port for editing landing page content. Admin-only.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{
    CategoryForm, Error, GalleryVideo, LandingAsset, LandingAssetUpdate, SpecialistsConfig,
};

/// New specialists image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistsImageUpdate {
    /// Image URL.
    pub url: String,
    /// Alternative text; blank keeps the current one.
    pub alt: Option<String>,
    /// Hosting identifier.
    pub public_id: Option<String>,
}

/// Landing content mutations.
#[async_trait]
pub trait SiteContentCommand: Send + Sync {
    /// Override one landing image.
    async fn update_landing_asset(
        &self,
        key: &str,
        update: LandingAssetUpdate,
    ) -> Result<LandingAsset, Error>;

    /// Replace the specialists image.
    async fn update_specialists_image(
        &self,
        update: SpecialistsImageUpdate,
    ) -> Result<SpecialistsConfig, Error>;

    /// Replace category labels and options.
    async fn update_specialists_options(
        &self,
        forms: BTreeMap<String, CategoryForm>,
    ) -> Result<SpecialistsConfig, Error>;

    /// Set the gallery video.
    async fn set_gallery_video(
        &self,
        url: &str,
        public_id: Option<String>,
    ) -> Result<GalleryVideo, Error>;

    /// Remove the gallery video.
    async fn delete_gallery_video(&self) -> Result<(), Error>;
}
