//! Configuration for linkstash paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable (LINKSTASH_DATA)
//! 2. Config file (.linkstash/config.yaml)
//! 3. Defaults (./data)
//!
//! Config file discovery:
//! - Searches current directory and parents for .linkstash/config.yaml,
//!   then falls back to ~/.linkstash/config.yaml
//! - Relative paths in the config file resolve against the config file's
//!   project root (the parent of the .linkstash directory)
//!
//! Loading returns an owned `ResolvedConfig` that callers pass along
//! explicitly; nothing is cached process-wide.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the data directory
const DATA_ENV: &str = "LINKSTASH_DATA";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub publish: Option<PublishFileConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Data directory holding the store and vocabulary files
    pub data: Option<String>,
    /// Store file (relative to the data directory)
    pub store: Option<String>,
    /// Level vocabulary file (relative to the data directory)
    pub levels: Option<String>,
    /// Interest vocabulary file (relative to the data directory)
    pub interests: Option<String>,
    /// Resource type vocabulary file (relative to the data directory)
    pub resource_types: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishFileConfig {
    pub remote: Option<String>,
    pub branch_suffix: Option<String>,
}

/// Settings for the publish step
#[derive(Debug, Clone)]
pub struct PublishSettings {
    /// Remote the contributor branch is pushed to
    pub remote: String,
    /// Suffix joined to the contributor name for the branch
    pub branch_suffix: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch_suffix: "contrib".to_string(),
        }
    }
}

/// Resolved configuration with absolute-or-cwd-relative paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Data directory
    pub data_dir: PathBuf,
    /// Link store file
    pub store_path: PathBuf,
    /// Level vocabulary file
    pub levels_path: PathBuf,
    /// Interest vocabulary file
    pub interests_path: PathBuf,
    /// Resource type vocabulary file
    pub resource_types_path: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Publish settings
    pub publish: PublishSettings,
}

impl ResolvedConfig {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let env_data = std::env::var(DATA_ENV).ok().map(PathBuf::from);

        let config = match find_config_file() {
            Some(path) => {
                let file = load_config_file(&path)?;
                Some((path, file))
            }
            None => None,
        };

        Ok(resolve(config, env_data))
    }
}

/// Find config file by searching current directory and parents,
/// then the home directory
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".linkstash").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(".linkstash").join("config.yaml");
    if home_config.exists() {
        return Some(home_config);
    }

    None
}

/// Load and parse a config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Combine the discovered config file and environment override into the
/// final configuration
fn resolve(config: Option<(PathBuf, ConfigFile)>, env_data: Option<PathBuf>) -> ResolvedConfig {
    let (config_path, config_file) = match config {
        Some((path, file)) => (Some(path), Some(file)),
        None => (None, None),
    };

    // Project root is the parent of the .linkstash directory
    let project_root = config_path
        .as_deref()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let paths = config_file
        .as_ref()
        .map(|f| f.paths.clone())
        .unwrap_or_default();

    let data_dir = if let Some(env_dir) = env_data {
        env_dir
    } else if let Some(ref data) = paths.data {
        resolve_path(&project_root, data)
    } else {
        project_root.join("data")
    };

    let file_path = |configured: &Option<String>, default: &str| -> PathBuf {
        match configured {
            Some(name) => resolve_path(&data_dir, name),
            None => data_dir.join(default),
        }
    };

    let publish = config_file
        .as_ref()
        .and_then(|f| f.publish.as_ref())
        .map(|p| {
            let defaults = PublishSettings::default();
            PublishSettings {
                remote: p.remote.clone().unwrap_or(defaults.remote),
                branch_suffix: p.branch_suffix.clone().unwrap_or(defaults.branch_suffix),
            }
        })
        .unwrap_or_default();

    ResolvedConfig {
        store_path: file_path(&paths.store, "links.json"),
        levels_path: file_path(&paths.levels, "valid_levels.json"),
        interests_path: file_path(&paths.interests, "valid_interests.json"),
        resource_types_path: file_path(&paths.resource_types, "valid_resource_types.json"),
        data_dir,
        config_file: config_path,
        publish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let config = resolve(None, None);

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.store_path, PathBuf::from("./data/links.json"));
        assert_eq!(
            config.resource_types_path,
            PathBuf::from("./data/valid_resource_types.json")
        );
        assert!(config.config_file.is_none());
        assert_eq!(config.publish.remote, "origin");
        assert_eq!(config.publish.branch_suffix, "contrib");
    }

    #[test]
    fn test_env_override_wins_over_config_file() {
        let file = ConfigFile {
            version: "1.0".to_string(),
            paths: PathsConfig {
                data: Some("configured".to_string()),
                ..Default::default()
            },
            publish: None,
        };
        let config = resolve(
            Some((PathBuf::from("/proj/.linkstash/config.yaml"), file)),
            Some(PathBuf::from("/env/data")),
        );

        assert_eq!(config.data_dir, PathBuf::from("/env/data"));
        assert_eq!(config.store_path, PathBuf::from("/env/data/links.json"));
    }

    #[test]
    fn test_config_file_paths_resolve_against_project_root() {
        let file = ConfigFile {
            version: "1.0".to_string(),
            paths: PathsConfig {
                data: Some("shared/links".to_string()),
                store: Some("all_links.json".to_string()),
                ..Default::default()
            },
            publish: None,
        };
        let config = resolve(
            Some((PathBuf::from("/proj/.linkstash/config.yaml"), file)),
            None,
        );

        assert_eq!(config.data_dir, PathBuf::from("/proj/shared/links"));
        assert_eq!(
            config.store_path,
            PathBuf::from("/proj/shared/links/all_links.json")
        );
        assert_eq!(
            config.levels_path,
            PathBuf::from("/proj/shared/links/valid_levels.json")
        );
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let linkstash_dir = temp.path().join(".linkstash");
        std::fs::create_dir_all(&linkstash_dir).unwrap();

        let config_path = linkstash_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  data: ./data
  store: links.json
publish:
  remote: upstream
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.data, Some("./data".to_string()));
        assert_eq!(config.paths.store, Some("links.json".to_string()));

        let publish = config.publish.unwrap();
        assert_eq!(publish.remote, Some("upstream".to_string()));
        assert_eq!(publish.branch_suffix, None);
    }

    #[test]
    fn test_partial_publish_section_keeps_defaults() {
        let file = ConfigFile {
            version: "1.0".to_string(),
            paths: PathsConfig::default(),
            publish: Some(PublishFileConfig {
                remote: Some("upstream".to_string()),
                branch_suffix: None,
            }),
        };
        let config = resolve(Some((PathBuf::from("/proj/.linkstash/config.yaml"), file)), None);

        assert_eq!(config.publish.remote, "upstream");
        assert_eq!(config.publish.branch_suffix, "contrib");
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
