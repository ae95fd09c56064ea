//! Builders wiring domain services over repositories into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use craftycrib::domain::ports::{
    ContactMessageRepository, ContractorRepository, ConversationRepository, DesignGenerator,
    Mailer, PasswordHasher, ProjectRepository, SiteContentRepository, UserRepository,
};
use craftycrib::domain::{
    AccountService, AccountSettings, ContactService, ContractorService, DashboardService,
    MessagingService, ProjectService, ProjectSettings, SiteContentService,
};
use craftycrib::inbound::http::state::{HttpState, HttpStateMarketplacePorts, HttpStatePorts};
use craftycrib::outbound::argon2_hasher::Argon2PasswordHasher;
use craftycrib::outbound::homedesigns::HomeDesignsHttpGenerator;
use craftycrib::outbound::logging_mailer::LoggingMailer;
use craftycrib::outbound::memory::{
    MemoryContactMessageRepository, MemoryContractorRepository, MemoryConversationRepository,
    MemoryProjectRepository, MemorySiteContentRepository, MemoryUserRepository,
};
use craftycrib::outbound::persistence::{
    DbPool, DieselContactMessageRepository, DieselContractorRepository,
    DieselConversationRepository, DieselProjectRepository, DieselSiteContentRepository,
    DieselUserRepository,
};

use super::ServerConfig;
use super::config::SettingsError;

/// One repository per collection.
pub struct Repositories<U, P, C, V, M, S> {
    pub users: Arc<U>,
    pub projects: Arc<P>,
    pub contractors: Arc<C>,
    pub conversations: Arc<V>,
    pub contact_messages: Arc<M>,
    pub site_content: Arc<S>,
}

/// Adapters that do not depend on the storage backend.
pub struct Adapters<H, L, G> {
    pub hasher: Arc<H>,
    pub mailer: Arc<L>,
    pub generator: Arc<G>,
    pub clock: Arc<dyn Clock>,
}

type DieselRepositories = Repositories<
    DieselUserRepository,
    DieselProjectRepository,
    DieselContractorRepository,
    DieselConversationRepository,
    DieselContactMessageRepository,
    DieselSiteContentRepository,
>;

type MemoryRepositories = Repositories<
    MemoryUserRepository,
    MemoryProjectRepository,
    MemoryContractorRepository,
    MemoryConversationRepository,
    MemoryContactMessageRepository,
    MemorySiteContentRepository,
>;

fn diesel_repositories(pool: &DbPool) -> DieselRepositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        contractors: Arc::new(DieselContractorRepository::new(pool.clone())),
        conversations: Arc::new(DieselConversationRepository::new(pool.clone())),
        contact_messages: Arc::new(DieselContactMessageRepository::new(pool.clone())),
        site_content: Arc::new(DieselSiteContentRepository::new(pool.clone())),
    }
}

/// Empty in-memory repositories.
pub fn memory_repositories() -> MemoryRepositories {
    Repositories {
        users: Arc::new(MemoryUserRepository::new()),
        projects: Arc::new(MemoryProjectRepository::new()),
        contractors: Arc::new(MemoryContractorRepository::new()),
        conversations: Arc::new(MemoryConversationRepository::new()),
        contact_messages: Arc::new(MemoryContactMessageRepository::new()),
        site_content: Arc::new(MemorySiteContentRepository::new()),
    }
}

/// Build every driving port from the given repositories and adapters.
pub fn wire_services<U, P, C, V, M, S, H, L, G>(
    repos: Repositories<U, P, C, V, M, S>,
    adapters: Adapters<H, L, G>,
    accounts: AccountSettings,
    projects: ProjectSettings,
) -> HttpState
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    C: ContractorRepository + 'static,
    V: ConversationRepository + 'static,
    M: ContactMessageRepository + 'static,
    S: SiteContentRepository + 'static,
    H: PasswordHasher + 'static,
    L: Mailer + 'static,
    G: DesignGenerator + 'static,
{
    let Adapters {
        hasher,
        mailer,
        generator,
        clock,
    } = adapters;

    let account_service = Arc::new(AccountService::new(
        repos.users.clone(),
        hasher,
        mailer,
        clock.clone(),
        accounts,
    ));
    let project_service = Arc::new(ProjectService::new(
        repos.projects.clone(),
        repos.users.clone(),
        repos.contractors.clone(),
        generator,
        clock.clone(),
        projects,
    ));
    let contractor_service = Arc::new(ContractorService::new(
        repos.contractors.clone(),
        repos.projects.clone(),
        repos.users,
        repos.conversations.clone(),
        clock.clone(),
    ));
    let messaging = Arc::new(MessagingService::new(repos.conversations, clock.clone()));
    let site_content = Arc::new(SiteContentService::new(repos.site_content, clock));

    HttpState::new(
        HttpStatePorts {
            accounts: account_service.clone(),
            accounts_query: account_service,
            projects: project_service.clone(),
            projects_query: project_service.clone(),
            gallery: project_service.clone(),
            credits: project_service,
            dashboard: Arc::new(DashboardService::new(repos.projects, repos.contractors)),
        },
        HttpStateMarketplacePorts {
            contractors: contractor_service.clone(),
            contractors_query: contractor_service,
            messaging: messaging.clone(),
            messaging_query: messaging,
            contact: Arc::new(ContactService::new(repos.contact_messages)),
            site_content: site_content.clone(),
            site_content_query: site_content,
        },
    )
}

/// Errors raised while assembling application state.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build the HomeDesigns client: {0}")]
    Generator(#[from] reqwest::Error),
}

impl From<StateBuildError> for std::io::Error {
    fn from(err: StateBuildError) -> Self {
        std::io::Error::other(err.to_string())
    }
}

/// Build HTTP state for the configured storage backend.
///
/// Uses the Diesel repositories when a pool is attached and the in-memory
/// store otherwise.
pub fn build_http_state(config: &ServerConfig) -> Result<web::Data<HttpState>, StateBuildError> {
    let settings = &config.settings;
    let generator = HomeDesignsHttpGenerator::new(
        settings.homedesigns_api_url()?,
        settings.homedesigns_api_token.clone(),
        settings.homedesigns_timeout(),
    )?;
    let adapters = Adapters {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        mailer: Arc::new(LoggingMailer),
        generator: Arc::new(generator),
        clock: Arc::new(DefaultClock),
    };
    let accounts = AccountSettings {
        require_email_verification: settings.require_email_verification,
        public_base_url: settings.public_base_url(),
    };
    let projects = ProjectSettings {
        public_base_url: settings.public_base_url(),
    };

    let state = match &config.db_pool {
        Some(pool) => wire_services(diesel_repositories(pool), adapters, accounts, projects),
        None => wire_services(memory_repositories(), adapters, accounts, projects),
    };
    Ok(web::Data::new(state))
}
