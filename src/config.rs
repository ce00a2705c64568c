use crate::session::{SessionStore, StoreKind};
use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORES: [StoreKind; 2] = [StoreKind::KeyValue, StoreKind::Cookie];

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub data_dir: PathBuf,
    pub session_stores: Vec<StoreKind>,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let api_url = lookup("HEALTH_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let data_dir = lookup("APP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let http_timeout = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let session_stores = lookup("SESSION_STORES")
            .map(|value| parse_stores(&value))
            .filter(|stores| !stores.is_empty())
            .unwrap_or_else(|| DEFAULT_STORES.to_vec());

        Self {
            port,
            api_url,
            data_dir,
            session_stores,
            http_timeout,
        }
    }

    pub fn session_stores(&self) -> Vec<SessionStore> {
        self.session_stores
            .iter()
            .map(|kind| SessionStore::in_dir(*kind, &self.data_dir))
            .collect()
    }
}

fn parse_stores(value: &str) -> Vec<StoreKind> {
    let mut stores = Vec::new();
    for name in value.split(',').filter(|name| !name.trim().is_empty()) {
        match StoreKind::parse(name) {
            Some(kind) if !stores.contains(&kind) => stores.push(kind),
            Some(_) => {}
            None => warn!(store = name.trim(), "ignoring unknown session store"),
        }
    }
    stores
}
