use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Result, Context};
use serde::{Serialize, Deserialize};
use crate::component::Component;
use crate::os::OperatingSystem;
use crate::utils::download::HttpSource;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_os: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub catalog_urls: BTreeMap<String, String>,
    pub package_manager_url: Option<String>,
    pub package_manager_repo: Option<String>,
}

pub struct WbiDirs {
    pub config_dir: PathBuf,
    pub downloads_dir: PathBuf,
}

impl Config {
    pub fn default_os(&self) -> Result<Option<OperatingSystem>> {
        self.default_os
            .as_deref()
            .map(|code| code.parse::<OperatingSystem>())
            .transpose()
            .context("Invalid default_os in config")
    }

    /// HTTP catalog source honoring `catalog_urls`.
    pub fn catalog_source(&self) -> Result<HttpSource> {
        let mut source = HttpSource::new().context("Failed to build HTTP client")?;
        for (name, url) in &self.catalog_urls {
            let component: Component = name
                .parse()
                .with_context(|| format!("Invalid catalog_urls key '{}' in config", name))?;
            source = source.with_override(component, url.clone());
        }
        Ok(source)
    }
}

pub fn get_dirs() -> Result<WbiDirs> {
    let project_dirs = ProjectDirs::from("com", "wbi", "wbi")
        .context("Failed to determine project directories")?;

    let config_dir = project_dirs.config_dir().to_path_buf();
    let downloads_dir = project_dirs.data_dir().join("downloads");

    fs::create_dir_all(&config_dir)?;

    Ok(WbiDirs {
        config_dir,
        downloads_dir,
    })
}

pub fn load_config() -> Result<Config> {
    let dirs = get_dirs()?;
    load_from(&dirs.config_dir.join("config.json"))
}

pub fn save_config(config: &Config) -> Result<()> {
    let dirs = get_dirs()?;
    save_to(config, &dirs.config_dir.join("config.json"))
}

pub fn load_from(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(config)
    } else {
        let config = Config::default();
        save_to(&config, config_path)?;
        Ok(config)
    }
}

pub fn save_to(config: &Config, config_path: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.default_os = Some("U22".to_string());
        config
            .catalog_urls
            .insert("quarto".to_string(), "http://mirror.internal/quarto.json".to_string());
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.default_os().unwrap(), Some(OperatingSystem::Ubuntu22));
        assert_eq!(
            loaded.catalog_source().unwrap().catalog_url(Component::Quarto),
            "http://mirror.internal/quarto.json"
        );
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_os": "rh8"}"#).unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.default_os().unwrap(), Some(OperatingSystem::Redhat8));
        assert!(config.catalog_urls.is_empty());
    }

    #[test]
    fn invalid_settings_are_reported() {
        let config = Config {
            default_os: Some("WIN".to_string()),
            catalog_urls: BTreeMap::from([("julia".to_string(), "http://x".to_string())]),
            ..Config::default()
        };
        assert!(config.default_os().is_err());
        assert!(config.catalog_source().is_err());
    }
}
