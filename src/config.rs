use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::models::PersonId;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/view";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STATIC_DIR: &str = "./static";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub listen_addr: String,
    pub static_dir: String,
    pub request_timeout: Duration,
    pub org: OrgSettings,
}

/// Which part of the org structure the chart shows by default.
#[derive(Debug, Clone, PartialEq)]
pub struct OrgSettings {
    pub root_id: PersonId,
    pub start_level: u32,
    pub end_level: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let org = OrgSettings {
            root_id: PersonId(parse(&lookup, "ORG_ROOT_ID", 1)?),
            start_level: parse(&lookup, "ORG_START_LEVEL", 1)?,
            end_level: parse(&lookup, "ORG_END_LEVEL", 3)?,
        };
        if org.start_level > org.end_level {
            anyhow::bail!(
                "ORG_START_LEVEL ({}) must not exceed ORG_END_LEVEL ({})",
                org.start_level,
                org.end_level
            );
        }

        Ok(Self {
            api_base_url: text("API_BASE_URL", DEFAULT_API_BASE_URL),
            listen_addr: text("LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            static_dir: text("STATIC_DIR", DEFAULT_STATIC_DIR),
            request_timeout: Duration::from_secs(parse(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),
            org,
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid value: {:?}", key, raw)),
        None => Ok(default),
    }
}
