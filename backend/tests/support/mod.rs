//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`. The
//! server module is pulled in by path so the tests drive the same app
//! construction as the binary, over the in-memory store with fixture
//! adapters for hashing, mail, and AI generation.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use craftycrib::domain::ports::{
    FixtureDesignGenerator, FixtureMailer, FixturePasswordHasher, PasswordHasher, UserRepository,
};
use craftycrib::domain::{AccountSettings, EmailAddress, NewUser, ProjectSettings, Role, User};
use craftycrib::inbound::http::health::HealthState;
use craftycrib::inbound::http::state::HttpState;
use craftycrib::outbound::memory::MemoryUserRepository;
use mockable::DefaultClock;
use serde_json::{Value, json};

#[expect(
    dead_code,
    reason = "server include exposes bootstrap members the tests do not call"
)]
#[path = "../../src/server/mod.rs"]
pub mod server;

use server::state_builders::{Adapters, memory_repositories, wire_services};
use server::{AppDependencies, build_app};

/// Password used by every account the helpers create.
pub const PASSWORD: &str = "secret12";

/// The full application over fresh in-memory repositories.
pub struct Marketplace {
    pub users: Arc<MemoryUserRepository>,
    pub health: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
}

impl Marketplace {
    pub fn new() -> Self {
        let repos = memory_repositories();
        let users = repos.users.clone();
        let state = wire_services(
            repos,
            Adapters {
                hasher: Arc::new(FixturePasswordHasher),
                mailer: Arc::new(FixtureMailer::default()),
                generator: Arc::new(FixtureDesignGenerator),
                clock: Arc::new(DefaultClock),
            },
            AccountSettings::default(),
            ProjectSettings::default(),
        );
        Self {
            users,
            health: web::Data::new(HealthState::new()),
            http_state: web::Data::new(state),
            key: Key::generate(),
        }
    }

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
        build_app(AppDependencies {
            health_state: self.health.clone(),
            http_state: self.http_state.clone(),
            key: self.key.clone(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        })
    }

    /// Insert an administrator directly; there is no sign-up path for them.
    pub async fn insert_admin(&self, email: &str) {
        let admin = User::create(
            NewUser {
                first_name: "Site".to_owned(),
                last_name: "Admin".to_owned(),
                email: EmailAddress::parse(email).expect("admin email"),
                password_hash: FixturePasswordHasher.hash(PASSWORD).expect("fixture hash"),
                role: Role::Admin,
                verified: true,
            },
            chrono::Utc::now(),
        );
        self.users.insert(&admin).await.expect("insert admin");
    }
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Send `req` and decode the JSON body, tolerating empty bodies.
pub async fn send<S, B>(app: &S, req: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// Register through the API and return the session cookie.
pub async fn register<S, B>(app: &S, email: &str, role: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({
                "firstName": "Grace",
                "lastName": "Hopper",
                "email": email,
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
                "role": role,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "register {email}");
    session_cookie(&res).expect("session cookie after register")
}

/// Sign in with the shared password and return the session cookie.
pub async fn login<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": email, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login {email}");
    session_cookie(&res).expect("session cookie after login")
}
