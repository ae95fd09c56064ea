//! In-memory `SiteContentRepository`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SiteContentRepository, SiteContentRepositoryError};
use crate::domain::{GalleryVideo, LandingAsset, SpecialistsConfig};

/// Landing content kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySiteContentRepository {
    assets: RwLock<BTreeMap<String, LandingAsset>>,
    specialists: RwLock<Option<SpecialistsConfig>>,
    gallery_video: RwLock<Option<GalleryVideo>>,
}

impl MemorySiteContentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SiteContentRepository for MemorySiteContentRepository {
    async fn list_landing_assets(&self) -> Result<Vec<LandingAsset>, SiteContentRepositoryError> {
        Ok(self.assets.read().await.values().cloned().collect())
    }

    async fn find_landing_asset(
        &self,
        key: &str,
    ) -> Result<Option<LandingAsset>, SiteContentRepositoryError> {
        Ok(self.assets.read().await.get(key).cloned())
    }

    async fn save_landing_asset(
        &self,
        asset: &LandingAsset,
    ) -> Result<(), SiteContentRepositoryError> {
        self.assets
            .write()
            .await
            .insert(asset.key.clone(), asset.clone());
        Ok(())
    }

    async fn find_specialists(
        &self,
    ) -> Result<Option<SpecialistsConfig>, SiteContentRepositoryError> {
        Ok(self.specialists.read().await.clone())
    }

    async fn save_specialists(
        &self,
        config: &SpecialistsConfig,
    ) -> Result<(), SiteContentRepositoryError> {
        *self.specialists.write().await = Some(config.clone());
        Ok(())
    }

    async fn find_gallery_video(&self) -> Result<Option<GalleryVideo>, SiteContentRepositoryError> {
        Ok(self.gallery_video.read().await.clone())
    }

    async fn save_gallery_video(
        &self,
        video: &GalleryVideo,
    ) -> Result<(), SiteContentRepositoryError> {
        *self.gallery_video.write().await = Some(video.clone());
        Ok(())
    }

    async fn delete_gallery_video(&self) -> Result<bool, SiteContentRepositoryError> {
        Ok(self.gallery_video.write().await.take().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service_test_support::fixture_timestamp;

    #[tokio::test]
    async fn deleting_the_video_twice_reports_absence() {
        let repo = MemorySiteContentRepository::new();
        let video = GalleryVideo::try_new("https://cdn.example/tour.mp4", None, fixture_timestamp())
            .expect("valid video");
        repo.save_gallery_video(&video).await.expect("save");

        assert!(repo.delete_gallery_video().await.expect("delete"));
        assert!(!repo.delete_gallery_video().await.expect("delete"));
    }
}
