//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AccountQuery, ContactInbox, ContractorCommand, ContractorQuery, CreditsQuery,
    DashboardQuery, GalleryQuery, MessagingCommand, MessagingQuery, ProjectCommand, ProjectQuery,
    SiteContentCommand, SiteContentQuery,
};

/// Account, project, and generation ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub gallery: Arc<dyn GalleryQuery>,
    pub credits: Arc<dyn CreditsQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

/// Marketplace and site content ports.
#[derive(Clone)]
pub struct HttpStateMarketplacePorts {
    pub contractors: Arc<dyn ContractorCommand>,
    pub contractors_query: Arc<dyn ContractorQuery>,
    pub messaging: Arc<dyn MessagingCommand>,
    pub messaging_query: Arc<dyn MessagingQuery>,
    pub contact: Arc<dyn ContactInbox>,
    pub site_content: Arc<dyn SiteContentCommand>,
    pub site_content_query: Arc<dyn SiteContentQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub gallery: Arc<dyn GalleryQuery>,
    pub credits: Arc<dyn CreditsQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub contractors: Arc<dyn ContractorCommand>,
    pub contractors_query: Arc<dyn ContractorQuery>,
    pub messaging: Arc<dyn MessagingCommand>,
    pub messaging_query: Arc<dyn MessagingQuery>,
    pub contact: Arc<dyn ContactInbox>,
    pub site_content: Arc<dyn SiteContentCommand>,
    pub site_content_query: Arc<dyn SiteContentQuery>,
}

impl HttpState {
    /// Combine both port bundles into handler state.
    pub fn new(ports: HttpStatePorts, marketplace: HttpStateMarketplacePorts) -> Self {
        let HttpStatePorts {
            accounts,
            accounts_query,
            projects,
            projects_query,
            gallery,
            credits,
            dashboard,
        } = ports;
        let HttpStateMarketplacePorts {
            contractors,
            contractors_query,
            messaging,
            messaging_query,
            contact,
            site_content,
            site_content_query,
        } = marketplace;
        Self {
            accounts,
            accounts_query,
            projects,
            projects_query,
            gallery,
            credits,
            dashboard,
            contractors,
            contractors_query,
            messaging,
            messaging_query,
            contact,
            site_content,
            site_content_query,
        }
    }
}
