//! Driving port for reading landing page content.

use async_trait::async_trait;

use crate::domain::{Error, LandingView, ResolvedLandingAsset, SpecialistsConfig};

/// Landing content reads.
#[async_trait]
pub trait SiteContentQuery: Send + Sync {
    /// Everything the public landing page shows.
    async fn landing(&self) -> Result<LandingView, Error>;

    /// Every landing slot with its effective image, in page order.
    async fn landing_assets(&self) -> Result<Vec<ResolvedLandingAsset>, Error>;

    /// Specialists section with defaults filled in.
    async fn specialists(&self) -> Result<SpecialistsConfig, Error>;
}
