//! Application settings and the HTTP server configuration object.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use craftycrib::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOMEDESIGNS_API_URL: &str = "https://api.homedesigns.ai";
const DEFAULT_HOMEDESIGNS_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Settings read from `CRAFTYCRIB_*` environment variables, configuration
/// files, and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CRAFTYCRIB")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Base URL of the HomeDesigns API.
    pub homedesigns_api_url: Option<String>,
    /// Bearer token for the HomeDesigns API.
    pub homedesigns_api_token: Option<String>,
    /// Request timeout for HomeDesigns calls, in seconds.
    pub homedesigns_timeout_secs: Option<u64>,
    /// Origin used for links in emails and absolute image URLs.
    pub public_base_url: Option<String>,
    /// New accounts must verify their email before logging in.
    #[ortho_config(default = false)]
    pub require_email_verification: bool,
}

/// Errors raised while interpreting [`AppSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("invalid HomeDesigns API URL '{value}': {source}")]
    ApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl AppSettings {
    /// Socket address assembled from `host` and `port`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddress`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|source| SettingsError::BindAddress {
            value: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// HomeDesigns base URL, falling back to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ApiUrl`] when the configured value does not
    /// parse.
    pub fn homedesigns_api_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .homedesigns_api_url
            .as_deref()
            .unwrap_or(DEFAULT_HOMEDESIGNS_API_URL);
        Url::parse(value).map_err(|source| SettingsError::ApiUrl {
            value: value.to_owned(),
            source,
        })
    }

    pub fn homedesigns_timeout(&self) -> Duration {
        Duration::from_secs(
            self.homedesigns_timeout_secs
                .unwrap_or(DEFAULT_HOMEDESIGNS_TIMEOUT_SECS),
        )
    }

    /// Public origin without a trailing slash.
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
            .trim_end_matches('/')
            .to_owned()
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) settings: AppSettings,
}

impl ServerConfig {
    /// Construct a server configuration from session toggles and settings.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        settings: AppSettings,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            settings,
        }
    }

    /// Attach a database connection pool.
    ///
    /// With a pool the server persists through the Diesel repositories;
    /// without one every repository lives in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
