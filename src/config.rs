use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Languages
    pub default_language: String,
    pub supported_languages: Vec<String>,

    // Catalogs
    pub locales_dir: String,

    // Server
    pub port: u16,

    // Admin
    pub admin_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            // Languages
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
            supported_languages: std::env::var("SUPPORTED_LANGUAGES")
                .unwrap_or_else(|_| "en,es,ru".to_string())
                .split(',')
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .collect(),

            // Catalogs
            locales_dir: std::env::var("LOCALES_DIR").unwrap_or_else(|_| "locales".to_string()),

            // Server
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT is not a valid port number")?,

            // Admin (reload endpoint is disabled when unset)
            admin_api_key: std::env::var("ADMIN_API_KEY").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the rest of the service relies on never seeing.
    pub fn validate(&self) -> Result<()> {
        if self.supported_languages.is_empty() {
            bail!("SUPPORTED_LANGUAGES must list at least one language code");
        }
        if !self
            .supported_languages
            .iter()
            .any(|code| code == &self.default_language)
        {
            bail!(
                "default language '{}' is not in the supported set {:?}",
                self.default_language,
                self.supported_languages
            );
        }
        Ok(())
    }
}
