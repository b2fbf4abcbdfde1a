use std::path::PathBuf;
use std::str::FromStr;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploads and derived variants are written to.
    pub upload_dir: PathBuf,
    /// Body limit for `POST /upload`.
    pub max_upload_bytes: usize,
    /// Body limit for JSON endpoints. Bulk payloads may carry inline base64.
    pub max_json_bytes: usize,
    /// Whether image uploads get small/medium/large variants.
    pub image_variants: bool,
    /// Apply pending migrations before binding the listener.
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`     | `10485760` (10 MiB)        |
    /// | `MAX_JSON_BYTES`       | `104857600` (100 MiB)      |
    /// | `IMAGE_VARIANTS`       | `true`                     |
    /// | `RUN_MIGRATIONS`       | `false`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        Self {
            host,
            port: parse_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            upload_dir,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            max_json_bytes: parse_env("MAX_JSON_BYTES", 100 * 1024 * 1024),
            image_variants: parse_env("IMAGE_VARIANTS", true),
            run_migrations: parse_env("RUN_MIGRATIONS", false),
        }
    }
}

/// Read and parse `key`, falling back to `default` when unset.
///
/// Panics on an unparsable value so misconfiguration fails at startup.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
