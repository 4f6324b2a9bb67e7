use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api_keys: Option<ApiKeysConfig>,
    pub storage: Option<StorageConfig>,
    pub collection: Option<CollectionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    pub s2_api_key: Option<String>,
    pub crossref_mailto: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub cache_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub from_year: Option<i32>,
    pub until_year: Option<i32>,
}

/// Platform config directory path: `<config_dir>/citerank/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("citerank").join("config.toml"))
}

/// Load config by cascading CWD `.citerank.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".citerank.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api_keys: Some(ApiKeysConfig {
            s2_api_key: overlay
                .api_keys
                .as_ref()
                .and_then(|a| a.s2_api_key.clone())
                .or_else(|| base.api_keys.as_ref().and_then(|a| a.s2_api_key.clone())),
            crossref_mailto: overlay
                .api_keys
                .as_ref()
                .and_then(|a| a.crossref_mailto.clone())
                .or_else(|| {
                    base.api_keys
                        .as_ref()
                        .and_then(|a| a.crossref_mailto.clone())
                }),
        }),
        storage: Some(StorageConfig {
            cache_dir: overlay
                .storage
                .as_ref()
                .and_then(|s| s.cache_dir.clone())
                .or_else(|| base.storage.as_ref().and_then(|s| s.cache_dir.clone())),
        }),
        collection: Some(CollectionConfig {
            from_year: overlay
                .collection
                .as_ref()
                .and_then(|c| c.from_year)
                .or_else(|| base.collection.as_ref().and_then(|c| c.from_year)),
            until_year: overlay
                .collection
                .as_ref()
                .and_then(|c| c.until_year)
                .or_else(|| base.collection.as_ref().and_then(|c| c.until_year)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_toml() {
        let config = ConfigFile {
            api_keys: Some(ApiKeysConfig {
                s2_api_key: Some("key".to_string()),
                crossref_mailto: Some("me@example.org".to_string()),
            }),
            storage: Some(StorageConfig {
                cache_dir: Some("/tmp/citerank-cache".to_string()),
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api_keys.as_ref().unwrap().s2_api_key.as_deref(), Some("key"));
        assert_eq!(
            parsed.storage.unwrap().cache_dir.unwrap(),
            "/tmp/citerank-cache"
        );
    }

    #[test]
    fn absent_sections_deserialize_as_none() {
        let toml_str = "[api_keys]\ns2_api_key = \"key\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert!(parsed.storage.is_none());
        assert!(parsed.collection.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            storage: Some(StorageConfig {
                cache_dir: Some("/base".to_string()),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            storage: Some(StorageConfig {
                cache_dir: Some("/overlay".to_string()),
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.storage.unwrap().cache_dir.unwrap(), "/overlay");
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            collection: Some(CollectionConfig {
                from_year: Some(2015),
                until_year: None,
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.collection.unwrap().from_year, Some(2015));
    }
}
