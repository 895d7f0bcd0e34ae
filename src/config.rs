use std::env;

/// Origins allowed by CORS in local development (the frontend dev server).
const LOCAL_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080";

/// AppConfig
///
/// The portal's configuration, loaded once at startup and immutable afterwards.
/// It is pulled into handlers through `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and config strictness.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Public prefix the application is mounted under. `/` for the root.
    pub base_url: String,
    // Origins the browser frontend may call the API from.
    pub allowed_origins: Vec<String>,
}

/// Env
///
/// The runtime context: human-readable logs and relaxed defaults locally,
/// JSON logs and explicit settings in production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Local settings that need no environment, for tests and embedding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "0.0.0.0:3000".to_string(),
            base_url: "/".to_string(),
            allowed_origins: parse_origins(LOCAL_ORIGINS),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `ALLOWED_ORIGINS` is not set, so a deployed
    /// portal never silently falls back to the development origins.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "/".to_string());

        let allowed_origins = match env {
            Env::Production => env::var("ALLOWED_ORIGINS")
                .expect("FATAL: ALLOWED_ORIGINS must be set in production."),
            Env::Local => env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| LOCAL_ORIGINS.to_string()),
        };

        Self {
            env,
            bind_addr,
            base_url,
            allowed_origins: parse_origins(&allowed_origins),
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
