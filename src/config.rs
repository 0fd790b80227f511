use std::env;

use anyhow::{bail, Context, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

pub struct AppConfig {
    pub bind_addr: String,
    pub storage: StorageConfig,
}

pub enum StorageConfig {
    Memory,
    R2(R2Config),
}

pub struct R2Config {
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// `BIND_ADDR` defaults to `0.0.0.0:3001`; `STORAGE_BACKEND` is `memory`
    /// (default) or `r2`, the latter requiring the `R2_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "memory".to_string());
        let storage = match backend.to_lowercase().as_str() {
            "memory" => StorageConfig::Memory,
            "r2" => {
                let required = |name: &str| {
                    lookup(name).with_context(|| {
                        format!("{} is not set (required by STORAGE_BACKEND=r2)", name)
                    })
                };
                StorageConfig::R2(R2Config {
                    access_key: required("R2_ACCESS_KEY_ID")?,
                    secret_key: required("R2_SECRET_ACCESS_KEY")?,
                    endpoint: required("R2_ENDPOINT")?,
                    region: required("R2_REGION")?,
                    bucket: required("R2_BUCKET")?,
                })
            }
            other => bail!("unknown STORAGE_BACKEND: {}", other),
        };

        Ok(AppConfig { bind_addr, storage })
    }
}
