use std::env;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{
    env::{
        APP_ENVIRONMENT_ENV_VAR, CONFIG_ENV_PREFIX, SUPABASE_ANON_KEY_ENV_VAR,
        SUPABASE_SERVICE_ROLE_KEY_ENV_VAR, SUPABASE_URL_ENV_VAR,
    },
    local::{DEFAULT_LINK_TTL_IN_SECONDS, DEFAULT_SESSION_TTL_IN_SECONDS, MAX_TTL_IN_SECONDS},
    prod,
    supabase::DEFAULT_TIMEOUT_IN_MILLIS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Supabase,
    Local,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: Secret<String>,
    pub service_role_key: Secret<String>,
    #[serde(default = "default_timeout_in_millis")]
    pub timeout_in_millis: u64,
    #[serde(default)]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalSettings {
    /// Base URL the generated action links point at.
    pub public_url: String,
    #[serde(default = "default_link_ttl")]
    pub link_ttl_in_seconds: i64,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_in_seconds: i64,
    /// HS256 key for issued sessions. A random one is used when unset.
    #[serde(default)]
    pub jwt_secret: Option<Secret<String>>,
    #[serde(default)]
    pub redirect_to: Option<String>,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            public_url: prod::PUBLIC_URL.to_string(),
            link_ttl_in_seconds: DEFAULT_LINK_TTL_IN_SECONDS,
            session_ttl_in_seconds: DEFAULT_SESSION_TTL_IN_SECONDS,
            jwt_secret: None,
            redirect_to: None,
        }
    }
}

/// An empty origin list allows any origin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub backend: BackendKind,
    #[serde(default)]
    pub supabase: Option<SupabaseSettings>,
    #[serde(default)]
    pub local: LocalSettings,
    #[serde(default)]
    pub cors: CorsSettings,
}

fn default_timeout_in_millis() -> u64 {
    DEFAULT_TIMEOUT_IN_MILLIS
}

fn default_link_ttl() -> i64 {
    DEFAULT_LINK_TTL_IN_SECONDS
}

fn default_session_ttl() -> i64 {
    DEFAULT_SESSION_TTL_IN_SECONDS
}

impl Settings {
    /// Layers, lowest precedence first: built-in defaults, `config/base.json`,
    /// `config/{APP_ENVIRONMENT}.json`, `LINKWRIGHT__*` variables, then the
    /// plain `SUPABASE_*` variables the hosted platform injects.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = env::var(APP_ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| "local".into());

        let builder = Self::defaults()?
            .add_source(File::with_name("config/base").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("supabase.url", env::var(SUPABASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "supabase.anon_key",
                env::var(SUPABASE_ANON_KEY_ENV_VAR).ok(),
            )?
            .set_override_option(
                "supabase.service_role_key",
                env::var(SUPABASE_SERVICE_ROLE_KEY_ENV_VAR).ok(),
            )?;

        Self::from_builder(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let (host, port) = prod::APP_ADDRESS
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::Message("malformed default address".into()))?;

        Config::builder()
            .set_default("application.host", host)?
            .set_default("application.port", port)?
            .set_default("backend", "supabase")
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;

        if settings.backend == BackendKind::Supabase && settings.supabase.is_none() {
            return Err(ConfigError::Message(format!(
                "the supabase backend needs {SUPABASE_URL_ENV_VAR}, \
                 {SUPABASE_ANON_KEY_ENV_VAR} and {SUPABASE_SERVICE_ROLE_KEY_ENV_VAR}"
            )));
        }
        let local = &settings.local;
        if !(0..=MAX_TTL_IN_SECONDS).contains(&local.link_ttl_in_seconds)
            || !(1..=MAX_TTL_IN_SECONDS).contains(&local.session_ttl_in_seconds)
        {
            return Err(ConfigError::Message(format!(
                "local link and session lifetimes must be positive and at most {MAX_TTL_IN_SECONDS}s"
            )));
        }

        Ok(settings)
    }
}
