//! Port abstraction for editable landing page content.
use async_trait::async_trait;

use crate::domain::{GalleryVideo, LandingAsset, SpecialistsConfig};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by site content adapters.
    pub enum SiteContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "site content repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "site content repository query failed: {message}",
    }
}

/// Storage of landing overrides, the specialists section, and the gallery
/// video. Each of the latter two is a singleton.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteContentRepository: Send + Sync {
    /// Stored landing asset overrides.
    async fn list_landing_assets(&self) -> Result<Vec<LandingAsset>, SiteContentRepositoryError>;

    /// Stored override for `key`.
    async fn find_landing_asset(
        &self,
        key: &str,
    ) -> Result<Option<LandingAsset>, SiteContentRepositoryError>;

    /// Insert or replace an override.
    async fn save_landing_asset(&self, asset: &LandingAsset)
    -> Result<(), SiteContentRepositoryError>;

    /// Stored specialists section.
    async fn find_specialists(&self)
    -> Result<Option<SpecialistsConfig>, SiteContentRepositoryError>;

    /// Replace the specialists section.
    async fn save_specialists(
        &self,
        config: &SpecialistsConfig,
    ) -> Result<(), SiteContentRepositoryError>;

    /// Stored gallery video.
    async fn find_gallery_video(&self) -> Result<Option<GalleryVideo>, SiteContentRepositoryError>;

    /// Replace the gallery video.
    async fn save_gallery_video(&self, video: &GalleryVideo)
    -> Result<(), SiteContentRepositoryError>;

    /// Remove the gallery video; returns `false` when none was set.
    async fn delete_gallery_video(&self) -> Result<bool, SiteContentRepositoryError>;
}
