use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;
use serde::Deserialize;

/// Loads `config_path` if it exists. Every setting has a default, so a
/// missing file yields the defaults; a malformed one is an error.
pub fn get_config<'de, T: Deserialize<'de>>(config_path: PathBuf) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path).required(false);
    let config = config::Config::builder()
        .add_source(f)
        .build()?;
    config.try_deserialize::<T>()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LookupConfiguration {
    pub resolver: ResolverConfiguration,
    pub log: LogConfiguration,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResolverConfiguration {
    pub root_server: Option<Ipv4Addr>,
    pub port: u16,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub max_hops: usize,
    pub max_indirection: usize,
    pub max_nesting: usize,
}

impl ResolverConfiguration {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ResolverConfiguration {
    fn default() -> Self {
        Self {
            root_server: None,
            port: 53,
            timeout_secs: 5,
            max_retries: 2,
            max_hops: 20,
            max_indirection: 10,
            max_nesting: 32,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfiguration {
    /// `EnvFilter` directives used while verbose tracing is off.
    pub level: String,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
        }
    }
}
