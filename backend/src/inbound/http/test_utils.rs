//! Test helpers for inbound HTTP components.
//!
//! [`TestHarness`] wires every driving port to the real domain services over
//! the in-memory repositories, with fixture adapters standing in for the
//! password hasher, mailer, and AI provider.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use crate::domain::ports::{
    FixtureDesignGenerator, FixtureMailer, FixturePasswordHasher, PasswordHasher, UserRepository,
};
use crate::domain::{
    AccountService, AccountSettings, ContactService, ContractorService, DashboardService,
    EmailAddress, MessagingService, NewUser, ProjectService, ProjectSettings, Role,
    SiteContentService, User, UserId,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::{HttpState, HttpStateMarketplacePorts, HttpStatePorts};
use crate::outbound::memory::{
    MemoryContactMessageRepository, MemoryContractorRepository, MemoryConversationRepository,
    MemoryProjectRepository, MemorySiteContentRepository, MemoryUserRepository,
};

/// Password used by every account the harness creates.
pub const TEST_PASSWORD: &str = "secret1";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Memory-backed application state plus handles on the stores.
pub struct TestHarness {
    pub users: Arc<MemoryUserRepository>,
    pub projects: Arc<MemoryProjectRepository>,
    pub contractors: Arc<MemoryContractorRepository>,
    pub conversations: Arc<MemoryConversationRepository>,
    pub mailer: Arc<FixtureMailer>,
    state: web::Data<HttpState>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Harness with email verification disabled.
    pub fn new() -> Self {
        Self::with_account_settings(AccountSettings::default())
    }

    /// Harness with custom account behaviour.
    pub fn with_account_settings(settings: AccountSettings) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let users = Arc::new(MemoryUserRepository::new());
        let projects = Arc::new(MemoryProjectRepository::new());
        let contractors = Arc::new(MemoryContractorRepository::new());
        let conversations = Arc::new(MemoryConversationRepository::new());
        let mailer = Arc::new(FixtureMailer::default());

        let accounts = Arc::new(AccountService::new(
            users.clone(),
            Arc::new(FixturePasswordHasher),
            mailer.clone(),
            clock.clone(),
            settings,
        ));
        let project_service = Arc::new(ProjectService::new(
            projects.clone(),
            users.clone(),
            contractors.clone(),
            Arc::new(FixtureDesignGenerator),
            clock.clone(),
            ProjectSettings::default(),
        ));
        let contractor_service = Arc::new(ContractorService::new(
            contractors.clone(),
            projects.clone(),
            users.clone(),
            conversations.clone(),
            clock.clone(),
        ));
        let messaging = Arc::new(MessagingService::new(conversations.clone(), clock.clone()));
        let site_content = Arc::new(SiteContentService::new(
            Arc::new(MemorySiteContentRepository::new()),
            clock,
        ));

        let state = HttpState::new(
            HttpStatePorts {
                accounts: accounts.clone(),
                accounts_query: accounts,
                projects: project_service.clone(),
                projects_query: project_service.clone(),
                gallery: project_service.clone(),
                credits: project_service,
                dashboard: Arc::new(DashboardService::new(projects.clone(), contractors.clone())),
            },
            HttpStateMarketplacePorts {
                contractors: contractor_service.clone(),
                contractors_query: contractor_service,
                messaging: messaging.clone(),
                messaging_query: messaging,
                contact: Arc::new(ContactService::new(Arc::new(
                    MemoryContactMessageRepository::new(),
                ))),
                site_content: site_content.clone(),
                site_content_query: site_content,
            },
        );

        Self {
            users,
            projects,
            contractors,
            conversations,
            mailer,
            state: web::Data::new(state),
        }
    }

    /// The full route table behind a test session middleware.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(test_session_middleware())
            .configure(configure)
    }

    /// Identifier of the account registered under `email`.
    pub async fn user_id(&self, email: &str) -> UserId {
        let address = EmailAddress::parse(email).expect("valid email");
        self.users
            .find_by_email(&address)
            .await
            .expect("user lookup")
            .expect("registered user")
            .id
    }

    /// Register through the API and return the session cookie.
    ///
    /// `role` is the wire name sent in the form; `None` keeps the default.
    pub async fn register<S, B>(&self, app: &S, email: &str, role: Option<&str>) -> Cookie<'static>
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/auth/register")
                .set_json(json!({
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "email": email,
                    "password": TEST_PASSWORD,
                    "confirmPassword": TEST_PASSWORD,
                    "role": role,
                }))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success(), "register failed: {}", res.status());
        session_cookie(&res).expect("session cookie after register")
    }

    /// Insert an administrator directly and sign in as them.
    pub async fn sign_in_admin<S, B>(&self, app: &S) -> Cookie<'static>
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let email = "admin@example.com";
        let admin = User::create(
            NewUser {
                first_name: "Site".to_owned(),
                last_name: "Admin".to_owned(),
                email: EmailAddress::parse(email).expect("admin email"),
                password_hash: FixturePasswordHasher
                    .hash(TEST_PASSWORD)
                    .expect("fixture hash"),
                role: Role::Admin,
                verified: true,
            },
            chrono::Utc::now(),
        );
        self.users.insert(&admin).await.expect("insert admin");

        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success(), "admin login failed: {}", res.status());
        session_cookie(&res).expect("session cookie after login")
    }

    /// Create a project with one image for the signed-in client.
    pub async fn create_project<S>(&self, app: &S, cookie: &Cookie<'static>) -> Value
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/projects")
                .cookie(cookie.clone())
                .set_json(json!({
                    "title": "Loft kitchen",
                    "description": "Open the kitchen onto the living room",
                    "roomType": "kitchen",
                    "style": "industrial",
                    "images": [{ "url": "https://cdn.example/kitchen.jpg" }],
                }))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success(), "create failed: {}", res.status());
        actix_test::read_body_json(res).await
    }
}
