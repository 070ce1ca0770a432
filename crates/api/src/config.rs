use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;

/// Secret used when `SECRET_KEY` is unset. Fine for local work only.
pub const DEV_SECRET_KEY: &str = "dev-key-for-development-only";

/// Default on-disk database, created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://helpdesk.db?mode=rwc";

/// Deployment profile selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    /// Always runs against an ephemeral in-memory database.
    Testing,
    Production,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development | Self::Testing => {
                "helpdesk_api=debug,helpdesk_db=debug,tower_http=debug"
            }
            Self::Production => "helpdesk_api=info,tower_http=info",
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "default" => Ok(Self::Development),
            "testing" => Ok(Self::Testing),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::Invalid {
                var: "APP_ENV",
                value: other.to_string(),
                reason: "expected development, testing or production".to_string(),
            }),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Clone)]
pub struct ServerConfig {
    pub profile: Profile,
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// SQLite connection string. Ignored by the testing profile.
    pub database_url: String,
    /// Application secret. Not printed by `Debug`.
    pub secret_key: String,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("profile", &self.profile)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("secret_key", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `APP_ENV`              | `development`                    |
    /// | `HOST`                 | `127.0.0.1`                      |
    /// | `PORT`                 | `5000`                           |
    /// | `DATABASE_URL`         | `sqlite://helpdesk.db?mode=rwc`  |
    /// | `SECRET_KEY`           | `dev-key-for-development-only`   |
    /// | `CORS_ORIGINS`         | `*` (any origin)                 |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile: Profile = match lookup("APP_ENV") {
            Some(value) => value.parse()?,
            None => Profile::default(),
        };

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = parse_var(&lookup, "PORT", 5000u16)?;

        let database_url = match profile {
            Profile::Testing => helpdesk_db::IN_MEMORY_URL.to_string(),
            _ => lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
        };

        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEV_SECRET_KEY.into());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "*")
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            profile,
            host,
            port,
            database_url,
            secret_key,
            cors_origins,
            request_timeout_secs,
        })
    }

    /// Whether the built-in development secret is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_describe_a_development_server() {
        let config = load(&[]).unwrap();
        assert_eq!(config.profile, Profile::Development);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.uses_dev_secret());
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn testing_profile_forces_in_memory_database() {
        let config = load(&[
            ("APP_ENV", "testing"),
            ("DATABASE_URL", "sqlite://prod.db"),
        ])
        .unwrap();
        assert_eq!(config.profile, Profile::Testing);
        assert_eq!(config.database_url, helpdesk_db::IN_MEMORY_URL);
    }

    #[test]
    fn production_reads_overrides() {
        let config = load(&[
            ("APP_ENV", "production"),
            ("DATABASE_URL", "sqlite:///var/lib/helpdesk.db"),
            ("SECRET_KEY", "s3cret"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite:///var/lib/helpdesk.db");
        assert!(!config.uses_dev_secret());
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn invalid_values_are_reported() {
        assert_matches!(
            load(&[("PORT", "not-a-port")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("APP_ENV", "staging")]),
            Err(ConfigError::Invalid { var: "APP_ENV", .. })
        );
        assert_matches!(
            load(&[("CORS_ORIGINS", "https://ok.example,bad\norigin")]),
            Err(ConfigError::Invalid { var: "CORS_ORIGINS", .. })
        );
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = load(&[("SECRET_KEY", "hunter2")]).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
    }
}
