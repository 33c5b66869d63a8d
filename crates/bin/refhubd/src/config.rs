//! refhubd settings.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file, then
//! `REFHUB_*` environment variables. The file is `refhub.toml` in the working
//! directory unless `REFHUB_CONFIG` names another one. A file named that way
//! must exist; the default one is optional.
//!
//! | Variable | Overrides |
//! |---|---|
//! | `REFHUB_LISTEN` | `listen` (`host:port`) |
//! | `REFHUB_PORT` | port of `listen` |
//! | `REFHUB_DATABASE_URL` | `database.url` |
//! | `REFHUB_DB_MAX_CONNECTIONS` | `database.max_connections` |
//! | `REFHUB_LOG`, then `RUST_LOG` | `log` |

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

const DEFAULT_FILE: &str = "refhub.toml";

/// Looks up one environment variable.
type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen: SocketAddr,
    pub database: DatabaseConfig,
    /// `EnvFilter` directive.
    pub log: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)),
            database: DatabaseConfig::default(),
            log: "refhub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    /// Pool size follows the storage adapter's own default.
    fn default() -> Self {
        let storage = refhub_adapter_storage_sqlite_sqlx::Config::new("sqlite:refhub.db?mode=rwc");
        Self {
            url: storage.database_url,
            max_connections: storage.max_connections,
        }
    }
}

impl DatabaseConfig {
    /// Storage adapter configuration for this database.
    #[must_use]
    pub fn storage(&self) -> refhub_adapter_storage_sqlite_sqlx::Config {
        refhub_adapter_storage_sqlite_sqlx::Config {
            database_url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

impl Config {
    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, if an
    /// override variable holds an unparsable value, or if the result is
    /// unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(&|name: &str| std::env::var(name).ok())
    }

    fn resolve(env: Env<'_>) -> Result<Self, ConfigError> {
        let mut config = match env("REFHUB_CONFIG") {
            Some(path) => Self::read(Path::new(&path))?,
            None if Path::new(DEFAULT_FILE).is_file() => Self::read(Path::new(DEFAULT_FILE))?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self, env: Env<'_>) -> Result<(), ConfigError> {
        if let Some(listen) = parse_var(env, "REFHUB_LISTEN")? {
            self.listen = listen;
        }
        if let Some(port) = parse_var(env, "REFHUB_PORT")? {
            self.listen.set_port(port);
        }
        if let Some(url) = env("REFHUB_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(max) = parse_var(env, "REFHUB_DB_MAX_CONNECTIONS")? {
            self.database.max_connections = max;
        }
        if let Some(filter) = env("REFHUB_LOG").or_else(|| env("RUST_LOG")) {
            self.log = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(env: Env<'_>, name: &'static str) -> Result<Option<T>, ConfigError> {
    let Some(value) = env(name) else {
        return Ok(None);
    };
    let parsed = value.trim().parse();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::Env { name, value }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{name}={value:?} is not a valid value")]
    Env { name: &'static str, value: String },
    #[error("database.url must not be empty")]
    MissingDatabaseUrl,
    #[error("database.max_connections must be at least 1")]
    EmptyPool,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("refhubd-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn should_size_default_pool_like_storage_adapter() {
        let config = Config::default();
        let storage = refhub_adapter_storage_sqlite_sqlx::Config::new("ignored");

        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.database.max_connections, storage.max_connections);
        assert_eq!(config.database.storage().database_url, "sqlite:refhub.db?mode=rwc");
    }

    #[test]
    fn should_override_pool_size_from_env() {
        let env = env_of(&[("REFHUB_DB_MAX_CONNECTIONS", "12")]);
        let mut config = Config::default();

        config.apply_env(&env).unwrap();

        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.database.storage().max_connections, 12);
    }

    #[test]
    fn should_name_variable_holding_unparsable_value() {
        let env = env_of(&[("REFHUB_DB_MAX_CONNECTIONS", "plenty")]);

        let err = Config::default().apply_env(&env).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Env { name: "REFHUB_DB_MAX_CONNECTIONS", ref value } if value == "plenty"
        ));
    }

    #[test]
    fn should_reject_pool_size_of_zero_from_env() {
        let env = env_of(&[("REFHUB_DB_MAX_CONNECTIONS", "0")]);
        let mut config = Config::default();
        config.apply_env(&env).unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::EmptyPool)));
    }

    #[test]
    fn should_apply_port_after_listen_address() {
        let env = env_of(&[("REFHUB_LISTEN", "127.0.0.1:3000"), ("REFHUB_PORT", "4000")]);
        let mut config = Config::default();

        config.apply_env(&env).unwrap();

        assert_eq!(config.listen, "127.0.0.1:4000".parse().unwrap());
    }

    #[test]
    fn should_prefer_refhub_log_over_rust_log() {
        let mut config = Config::default();
        config
            .apply_env(&env_of(&[("RUST_LOG", "warn"), ("REFHUB_LOG", "refhub=trace")]))
            .unwrap();
        assert_eq!(config.log, "refhub=trace");

        config.apply_env(&env_of(&[("RUST_LOG", "warn")])).unwrap();
        assert_eq!(config.log, "warn");
    }

    #[test]
    fn should_load_file_named_by_refhub_config_then_apply_env() {
        let path = temp_file(
            "named.toml",
            "listen = '127.0.0.1:9090'\n[database]\nurl = 'sqlite:regions.db'\nmax_connections = 2\n",
        );
        let env = env_of(&[
            ("REFHUB_CONFIG", path.to_str().unwrap()),
            ("REFHUB_DATABASE_URL", "sqlite::memory:"),
        ]);

        let config = Config::resolve(&env).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.listen, "127.0.0.1:9090".parse().unwrap());
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 2);
    }

    #[test]
    fn should_fail_when_named_config_file_is_missing() {
        let env = env_of(&[("REFHUB_CONFIG", "/nonexistent/refhub.toml")]);

        let err = Config::resolve(&env).unwrap_err();

        assert!(matches!(err, ConfigError::Read { ref path, .. } if path.ends_with("refhub.toml")));
    }

    #[test]
    fn should_reject_unknown_keys_in_file() {
        let path = temp_file("unknown.toml", "[database]\npool = 3\n");

        let err = Config::read(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
