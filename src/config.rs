use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub guard: GuardConfig,
    pub table: TableConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // form posts only, in bytes
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub max_age_days: i64,
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GuardConfig {
    pub protected_root: String,
    pub admin_prefixes: Vec<String>,
    pub login_path: String,
    pub access_denied_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TableConfig {
    pub default_page_size: usize,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config/default")
    }

    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
pub(crate) fn test_config(api_base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_size: 65536,
        },
        api: ApiConfig {
            base_url: api_base_url.to_string(),
        },
        session: SessionConfig {
            max_age_days: 7,
            secure: false,
        },
        guard: GuardConfig {
            protected_root: "/dashboard".into(),
            admin_prefixes: vec!["/dashboard/member".into(), "/dashboard/billing".into()],
            login_path: "/".into(),
            access_denied_path: "/accessDenied".into(),
        },
        table: TableConfig {
            default_page_size: 5,
        },
    }
}
