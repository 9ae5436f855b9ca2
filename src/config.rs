use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

/// Defaults for the commission/withdrawal ledger. Every field can be
/// overridden at runtime through the app_settings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Minimum withdrawal amount in minor units (rupiah).
    #[serde(default = "default_min_withdrawal")]
    pub min_withdrawal: i64,
    /// Commission rate in basis points applied to a paid invoice total.
    #[serde(default = "default_commission_rate_bps")]
    pub commission_rate_bps: i64,
    /// Balance/notification poll cadence served to clients.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_poll_jitter_secs")]
    pub poll_jitter_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_min_withdrawal() -> i64 {
    50_000
}

fn default_commission_rate_bps() -> i64 {
    1_000
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_poll_jitter_secs() -> u64 {
    15
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            min_withdrawal: default_min_withdrawal(),
            commission_rate_bps: default_commission_rate_bps(),
            poll_interval_secs: default_poll_interval_secs(),
            poll_jitter_secs: default_poll_jitter_secs(),
        }
    }
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Try the config file first; fall back to environment-only setup.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .map_err(|e| anyhow::anyhow!("Failed to parse config: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // Without a config file the database URL must come from the env.
                let database_url = get_env("DATABASE_URL").ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL not set and no config.toml found")
                })?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                        connect_timeout_secs: get_env_parse(
                            "DB_CONNECT_TIMEOUT_SECS",
                            default_connect_timeout_secs(),
                        ),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                        refresh_token_expires_in: get_env_parse(
                            "JWT_REFRESH_EXPIRES_IN",
                            2_592_000i64,
                        ),
                    },
                    ledger: LedgerConfig {
                        min_withdrawal: get_env_parse("MIN_WITHDRAWAL", default_min_withdrawal()),
                        commission_rate_bps: get_env_parse(
                            "COMMISSION_RATE_BPS",
                            default_commission_rate_bps(),
                        ),
                        poll_interval_secs: get_env_parse(
                            "POLL_INTERVAL_SECS",
                            default_poll_interval_secs(),
                        ),
                        poll_jitter_secs: get_env_parse(
                            "POLL_JITTER_SECS",
                            default_poll_jitter_secs(),
                        ),
                    },
                }
            }
            Err(e) => {
                anyhow::bail!("Failed to read config file {config_path}: {e}");
            }
        };

        // Environment variables win even when the file exists.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DB_CONNECT_TIMEOUT_SECS")
            && let Ok(t) = v.parse()
        {
            config.database.connect_timeout_secs = t;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.refresh_token_expires_in = n;
        }
        if let Ok(v) = env::var("MIN_WITHDRAWAL")
            && let Ok(n) = v.parse()
        {
            config.ledger.min_withdrawal = n;
        }
        if let Ok(v) = env::var("COMMISSION_RATE_BPS")
            && let Ok(n) = v.parse()
        {
            config.ledger.commission_rate_bps = n;
        }
        if let Ok(v) = env::var("POLL_INTERVAL_SECS")
            && let Ok(n) = v.parse()
        {
            config.ledger.poll_interval_secs = n;
        }
        if let Ok(v) = env::var("POLL_JITTER_SECS")
            && let Ok(n) = v.parse()
        {
            config.ledger.poll_jitter_secs = n;
        }

        Ok(config)
    }
}
