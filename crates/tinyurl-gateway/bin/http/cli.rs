use clap::{ArgAction, Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use tinyurl_gateway::telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "TINYURL_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "TINYURL_PUBLIC_BASE_URL";
pub const STORE_BACKEND_ENV: &str = "TINYURL_STORE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "TINYURL_MYSQL_DSN";
pub const CACHE_BACKEND_ENV: &str = "TINYURL_CACHE_BACKEND";
pub const REDIS_URL_ENV: &str = "TINYURL_REDIS_URL";
pub const CACHE_TTL_ENV: &str = "TINYURL_CACHE_TTL_SECS";
pub const CACHE_CAPACITY_ENV: &str = "TINYURL_CACHE_CAPACITY";
pub const REAPER_INTERVAL_ENV: &str = "TINYURL_REAPER_INTERVAL_SECS";
pub const LOG_FORMAT_ENV: &str = "TINYURL_LOG_FORMAT";
pub const METRICS_ENV: &str = "TINYURL_METRICS";
pub const REQUEST_TIMEOUT_ENV: &str = "TINYURL_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StoreBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackendArg::InMemory => write!(f, "in-memory"),
            StoreBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for CacheBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendArg::InMemory => write!(f, "in-memory"),
            CacheBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Human,
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Human => write!(f, "human"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Human => LogFormat::Human,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinyurl-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base of the short urls handed out to clients.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORE_BACKEND_ENV,
        value_enum,
        default_value_t = StoreBackendArg::InMemory
    )]
    pub store: StoreBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("store", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(
        long,
        env = CACHE_BACKEND_ENV,
        value_enum,
        default_value_t = CacheBackendArg::InMemory
    )]
    pub cache: CacheBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("cache", "redis"))]
    pub redis_url: Option<String>,

    #[arg(long, env = CACHE_TTL_ENV, default_value_t = 86_400)]
    pub cache_ttl_secs: u64,

    /// Entry limit of the in-memory cache.
    #[arg(long, env = CACHE_CAPACITY_ENV, default_value_t = 10_000)]
    pub cache_capacity: u64,

    /// Seconds between expiry purges; 0 disables the reaper.
    #[arg(long, env = REAPER_INTERVAL_ENV, default_value_t = 600)]
    pub reaper_interval_secs: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Human)]
    pub log_format: LogFormatArg,

    #[arg(long, env = METRICS_ENV, default_value_t = true, action = ArgAction::Set)]
    pub metrics: bool,

    #[arg(long, env = REQUEST_TIMEOUT_ENV, default_value_t = 10)]
    pub request_timeout_secs: u64,
}
