use {
    config::{Config as ConfigBuilder, Environment, File},
    hello_host::{DEFAULT_ENTRY, DEFAULT_MEMORY_LIMIT_PAGES},
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub guest: GuestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            guest: GuestConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GuestConfig {
    pub path: PathBuf,
    pub entry: String,
    pub memory_limit_pages: u32,
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("target/wasm32-unknown-unknown/release/hello_guest.wasm"),
            entry: DEFAULT_ENTRY.to_string(),
            memory_limit_pages: DEFAULT_MEMORY_LIMIT_PAGES,
        }
    }
}

impl Config {
    /// Build the config from, in increasing priority: the defaults, the given
    /// TOML file if any, and `HELLO_`-prefixed environment variables using `__`
    /// as the separator (e.g. `HELLO_GUEST__PATH`).
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(file, env_source())
    }

    fn load_with_env(file: Option<&Path>, env: Environment) -> Result<Self, config::ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }

        builder.add_source(env).build()?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HELLO")
        .prefix_separator("_")
        .separator("__")
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::{collections::HashMap, io::Write},
    };

    fn no_env() -> Environment {
        env_source().source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_without_sources() {
        let cfg = Config::load_with_env(None, no_env()).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "log_level = \"debug\"\n\n[guest]\nentry = \"greet\"").unwrap();

        let cfg = Config::load_with_env(Some(file.path()), no_env()).unwrap();

        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.guest.entry, "greet");
        assert_eq!(cfg.guest.memory_limit_pages, DEFAULT_MEMORY_LIMIT_PAGES);
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[guest]\npath = \"from/file.wasm\"").unwrap();

        let env = env_source().source(Some(HashMap::from([(
            "HELLO_GUEST__PATH".to_string(),
            "from/env.wasm".to_string(),
        )])));

        let cfg = Config::load_with_env(Some(file.path()), env).unwrap();

        assert_eq!(cfg.guest.path, PathBuf::from("from/env.wasm"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load_with_env(Some(Path::new("no/such/config.toml")), no_env()).is_err());
    }
}
