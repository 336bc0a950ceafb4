//! Service configuration loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `STATS_*` environment variables, and an
//! optional configuration file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_MAX_SIZE;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 9090;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("invalid bind host {value:?}: {message}")]
    InvalidHost { value: String, message: String },
    /// `pool_max_size` must allow at least one connection.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
}

/// Runtime settings for the statistics service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STATS")]
pub struct StatsSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<String>,
    /// Port to bind the HTTP listener to.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it hits are kept in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl StatsSettings {
    /// Resolve the socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|err| SettingsError::InvalidHost {
                    value: raw.to_owned(),
                    message: err.to_string(),
                })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether pending migrations run before the server binds.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Return the pool size, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyPool`] for a configured size of zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            Some(0) => Err(SettingsError::EmptyPool),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_MAX_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "STATS_HOST",
        "STATS_PORT",
        "STATS_DATABASE_URL",
        "STATS_POOL_MAX_SIZE",
        "STATS_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> StatsSettings {
        StatsSettings::load_from_iter([OsString::from("stats-backend")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT)
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.pool_max_size(), Ok(DEFAULT_MAX_SIZE));
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("STATS_HOST", "127.0.0.1"),
            ("STATS_PORT", "9191"),
            ("STATS_DATABASE_URL", "postgres://stats@localhost/stats"),
            ("STATS_POOL_MAX_SIZE", "4"),
            ("STATS_RUN_MIGRATIONS", "false"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9191".parse::<SocketAddr>().expect("fixture")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://stats@localhost/stats")
        );
        assert_eq!(settings.pool_max_size(), Ok(4));
        assert!(!settings.run_migrations());
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    fn migrations_run_unless_disabled(#[case] raw: Option<&str>, #[case] expected: bool) {
        let overrides: Vec<(&str, &str)> = raw
            .map(|value| ("STATS_RUN_MIGRATIONS", value))
            .into_iter()
            .collect();
        let _guard = lock_env(env_with(&overrides));

        assert_eq!(load_from_empty_args().run_migrations(), expected);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env(env_with(&[("STATS_DATABASE_URL", "  ")]));

        assert_eq!(load_from_empty_args().database_url(), None);
    }

    #[rstest]
    fn invalid_values_are_reported() {
        let _guard = lock_env(env_with(&[
            ("STATS_HOST", "not-an-ip"),
            ("STATS_POOL_MAX_SIZE", "0"),
        ]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
        assert_eq!(settings.pool_max_size(), Err(SettingsError::EmptyPool));
    }
}
