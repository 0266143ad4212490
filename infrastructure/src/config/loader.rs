//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;
use tracing::debug;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`CALCOUNCIL_SERVER__PORT`, ...)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./calcouncil.toml` or `./.calcouncil.toml`
    /// 4. Global: `~/.config/calcouncil/config.toml`
    /// 5. Default values
    ///
    /// The upstream credential additionally falls back to the
    /// `OPENROUTER_API_KEY` environment variable when no source set it.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "Merging global config");
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        for filename in &["calcouncil.toml", ".calcouncil.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                debug!(path = %path.display(), "Merging project config");
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CALCOUNCIL_").split("__"));

        let mut config: FileConfig = figment.extract().map_err(Box::new)?;
        if config.upstream.api_key.is_none() {
            config.upstream.api_key = std::env::var("OPENROUTER_API_KEY").ok();
        }
        Ok(config)
    }

    /// Load only default configuration (for tests and --no-config setups)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("calcouncil").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.server.port, 3000);
        assert!(config.upstream.api_key.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config: FileConfig = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(
                r#"
                [upstream]
                api_key = "sk-test"

                [server]
                port = 9000
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.upstream.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.server.port, 9000);
        // Untouched sections keep their defaults
        assert_eq!(config.council.vote_delay_ms, 2000);
    }

    #[test]
    fn test_global_config_path_shape() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("calcouncil/config.toml"));
        }
    }
}
