use std::net::SocketAddr;

use crate::server::error::config::ConfigError;

/// Address the server listens on when `SERVER_ADDRESS` is not set
pub static DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";

/// User agent sent to the platform when `USER_AGENT` is not set
pub static DEFAULT_USER_AGENT: &str = concat!("mentor-billing/", env!("CARGO_PKG_VERSION"));

pub struct Config {
    pub database_url: String,
    pub server_address: SocketAddr,
    /// Base URL of the platform REST API
    pub platform_api_url: String,
    /// Base URL of the platform website, used for login, scraping and booking
    pub platform_site_url: String,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_address = optional_var("SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_address =
            server_address
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "SERVER_ADDRESS".to_string(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            server_address,
            platform_api_url: required_url("PLATFORM_API_URL")?,
            platform_site_url: required_url("PLATFORM_SITE_URL")?,
            user_agent: optional_var("USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn required_url(name: &str) -> Result<String, ConfigError> {
    let url = required_var(name)?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvValue {
            var: name.to_string(),
            reason: format!("{:?} is not an http(s) URL", url),
        });
    }

    Ok(url)
}
