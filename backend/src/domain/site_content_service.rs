//! Landing page content service.
//!
//! Stored overrides are merged onto built-in defaults on every read, so an
//! empty store still renders a complete landing page.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::port_errors::map_site_content_error;
use crate::domain::ports::{
    SiteContentCommand, SiteContentQuery, SiteContentRepository, SpecialistsImageUpdate,
};
use crate::domain::site_content::{landing_image_map, resolve_landing_assets};
use crate::domain::{
    CategoryForm, Error, GalleryVideo, LandingAsset, LandingAssetUpdate, LandingView,
    ResolvedLandingAsset, SpecialistsConfig,
};

/// Site content service implementing the landing content ports.
#[derive(Clone)]
pub struct SiteContentService<R> {
    content: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SiteContentService<R> {
    /// Create a new service.
    pub fn new(content: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { content, clock }
    }
}

impl<R> SiteContentService<R>
where
    R: SiteContentRepository,
{
    async fn current_specialists(&self) -> Result<SpecialistsConfig, Error> {
        let stored = self
            .content
            .find_specialists()
            .await
            .map_err(map_site_content_error)?;
        Ok(SpecialistsConfig::merged(stored, self.clock.utc()))
    }

    async fn save_specialists(&self, config: &SpecialistsConfig) -> Result<(), Error> {
        self.content
            .save_specialists(config)
            .await
            .map_err(map_site_content_error)
    }
}

#[async_trait]
impl<R> SiteContentCommand for SiteContentService<R>
where
    R: SiteContentRepository,
{
    async fn update_landing_asset(
        &self,
        key: &str,
        update: LandingAssetUpdate,
    ) -> Result<LandingAsset, Error> {
        let existing = self
            .content
            .find_landing_asset(key)
            .await
            .map_err(map_site_content_error)?;
        let asset = LandingAsset::upsert(existing, key, update, self.clock.utc())?;
        self.content
            .save_landing_asset(&asset)
            .await
            .map_err(map_site_content_error)?;
        info!(key = %asset.key, "landing asset updated");
        Ok(asset)
    }

    async fn update_specialists_image(
        &self,
        update: SpecialistsImageUpdate,
    ) -> Result<SpecialistsConfig, Error> {
        let mut config = self.current_specialists().await?;
        config.update_image(
            &update.url,
            update.alt.as_deref(),
            update.public_id,
            self.clock.utc(),
        )?;
        self.save_specialists(&config).await?;
        Ok(config)
    }

    async fn update_specialists_options(
        &self,
        forms: BTreeMap<String, CategoryForm>,
    ) -> Result<SpecialistsConfig, Error> {
        let mut config = self.current_specialists().await?;
        config.update_options(&forms, self.clock.utc());
        self.save_specialists(&config).await?;
        Ok(config)
    }

    async fn set_gallery_video(
        &self,
        url: &str,
        public_id: Option<String>,
    ) -> Result<GalleryVideo, Error> {
        let video = GalleryVideo::try_new(url, public_id, self.clock.utc())?;
        self.content
            .save_gallery_video(&video)
            .await
            .map_err(map_site_content_error)?;
        Ok(video)
    }

    async fn delete_gallery_video(&self) -> Result<(), Error> {
        let removed = self
            .content
            .delete_gallery_video()
            .await
            .map_err(map_site_content_error)?;
        info!(removed, "gallery video deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> SiteContentQuery for SiteContentService<R>
where
    R: SiteContentRepository,
{
    async fn landing(&self) -> Result<LandingView, Error> {
        let stored = self
            .content
            .list_landing_assets()
            .await
            .map_err(map_site_content_error)?;
        let gallery_video = self
            .content
            .find_gallery_video()
            .await
            .map_err(map_site_content_error)?;
        Ok(LandingView {
            images: landing_image_map(&stored),
            specialists: self.current_specialists().await?,
            gallery_video,
        })
    }

    async fn landing_assets(&self) -> Result<Vec<ResolvedLandingAsset>, Error> {
        let stored = self
            .content
            .list_landing_assets()
            .await
            .map_err(map_site_content_error)?;
        Ok(resolve_landing_assets(&stored))
    }

    async fn specialists(&self) -> Result<SpecialistsConfig, Error> {
        self.current_specialists().await
    }
}
