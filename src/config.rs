use std::env;

use anyhow::Context;

const DEFAULT_PORT: u16 = 9999;
const DEFAULT_POOL_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres { url: String, pool_size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub store: StoreKind,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let port = match lookup("API_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("invalid API_PORT {port:?}"))?,
            None => DEFAULT_PORT,
        };

        let store = if lookup("MEM_SERVER").is_some() {
            StoreKind::Memory
        } else {
            let url = lookup("DATABASE_URL")
                .context("DATABASE_URL must be set unless MEM_SERVER is")?;
            let pool_size = match lookup("DB_POOL_SIZE") {
                Some(size) => size
                    .parse()
                    .with_context(|| format!("invalid DB_POOL_SIZE {size:?}"))?,
                None => DEFAULT_POOL_SIZE,
            };
            StoreKind::Postgres { url, pool_size }
        };

        Ok(Config { port, store })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn mem_server_selects_memory_store() {
        let cfg = config(&[("MEM_SERVER", "1"), ("API_PORT", "8080")]).unwrap();
        assert_eq!(cfg, Config { port: 8080, store: StoreKind::Memory });
    }

    #[test]
    fn postgres_is_the_default() {
        let cfg = config(&[("DATABASE_URL", "postgres://root:1234@db/rinha")]).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(
            cfg.store,
            StoreKind::Postgres {
                url: "postgres://root:1234@db/rinha".to_string(),
                pool_size: DEFAULT_POOL_SIZE,
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("MEM_SERVER", "1"), ("API_PORT", "http")]).is_err());
        assert!(config(&[("DATABASE_URL", "postgres://db"), ("DB_POOL_SIZE", "-3")]).is_err());
        assert!(config(&[]).is_err());
    }
}
