use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When unset the API runs against the in-memory store.
    pub database_url: Option<String>,
    pub api_keys: String,
    pub strict_age_bounds: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            strict_age_bounds: std::env::var("STRICT_CATEGORY_AGE_BOUNDS")
                .ok()
                .map(|v| v.trim().parse::<bool>())
                .transpose()
                .context("STRICT_CATEGORY_AGE_BOUNDS must be true or false")?
                .unwrap_or(false),
        })
    }
}
