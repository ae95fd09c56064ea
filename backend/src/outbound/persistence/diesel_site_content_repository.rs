//! PostgreSQL-backed `SiteContentRepository` implementation.
//!
//! Landing overrides have one row per slot. The specialists section and the
//! gallery video are singleton rows in `site_settings`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::de::DeserializeOwned;

use crate::domain::ports::{SiteContentRepository, SiteContentRepositoryError};
use crate::domain::{GalleryVideo, LandingAsset, SpecialistsConfig};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    DocumentError, GALLERY_VIDEO_KEY, LandingAssetRow, SPECIALISTS_KEY, SiteSettingRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{landing_assets, site_settings};

/// Diesel-backed implementation of the site content repository port.
#[derive(Clone)]
pub struct DieselSiteContentRepository {
    pool: DbPool,
}

impl DieselSiteContentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_setting<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = site_settings::table
            .filter(site_settings::key.eq(key))
            .select(SiteSettingRow::as_select())
            .first::<SiteSettingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(SiteSettingRow::into_document)
            .transpose()
            .map_err(map_document_error)
    }

    async fn save_setting(&self, row: SiteSettingRow) -> Result<(), SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(site_settings::table)
            .values(&row)
            .on_conflict(site_settings::key)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

fn map_pool_error(error: PoolError) -> SiteContentRepositoryError {
    map_basic_pool_error(error, SiteContentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SiteContentRepositoryError {
    map_basic_diesel_error(
        error,
        SiteContentRepositoryError::query,
        SiteContentRepositoryError::connection,
    )
}

fn map_document_error(error: DocumentError) -> SiteContentRepositoryError {
    SiteContentRepositoryError::query(error.to_string())
}

#[async_trait]
impl SiteContentRepository for DieselSiteContentRepository {
    async fn list_landing_assets(&self) -> Result<Vec<LandingAsset>, SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = landing_assets::table
            .order(landing_assets::key.asc())
            .select(LandingAssetRow::as_select())
            .load::<LandingAssetRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(LandingAssetRow::into_asset)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)
    }

    async fn find_landing_asset(
        &self,
        key: &str,
    ) -> Result<Option<LandingAsset>, SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = landing_assets::table
            .filter(landing_assets::key.eq(key))
            .select(LandingAssetRow::as_select())
            .first::<LandingAssetRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(LandingAssetRow::into_asset)
            .transpose()
            .map_err(map_document_error)
    }

    async fn save_landing_asset(
        &self,
        asset: &LandingAsset,
    ) -> Result<(), SiteContentRepositoryError> {
        let row = LandingAssetRow::from_asset(asset).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(landing_assets::table)
            .values(&row)
            .on_conflict(landing_assets::key)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_specialists(
        &self,
    ) -> Result<Option<SpecialistsConfig>, SiteContentRepositoryError> {
        self.find_setting(SPECIALISTS_KEY).await
    }

    async fn save_specialists(
        &self,
        config: &SpecialistsConfig,
    ) -> Result<(), SiteContentRepositoryError> {
        let row = SiteSettingRow::from_specialists(config).map_err(map_document_error)?;
        self.save_setting(row).await
    }

    async fn find_gallery_video(&self) -> Result<Option<GalleryVideo>, SiteContentRepositoryError> {
        self.find_setting(GALLERY_VIDEO_KEY).await
    }

    async fn save_gallery_video(
        &self,
        video: &GalleryVideo,
    ) -> Result<(), SiteContentRepositoryError> {
        let row = SiteSettingRow::from_gallery_video(video).map_err(map_document_error)?;
        self.save_setting(row).await
    }

    async fn delete_gallery_video(&self) -> Result<bool, SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed =
            diesel::delete(site_settings::table.filter(site_settings::key.eq(GALLERY_VIDEO_KEY)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
