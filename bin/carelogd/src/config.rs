use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration loaded from a TOML file.
///
/// ```toml
/// [storage]
/// data_dir = "/var/lib/carelog"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding all persistent data.
    pub data_dir: String,

    /// Explicit SQLite path; defaults to `{data_dir}/data.sqlite`.
    #[serde(default)]
    pub sqlite_path: Option<String>,
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    ///
    /// A bare name resolves to `/etc/carelog/<name>.toml`; anything
    /// containing `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/carelog/{}.toml", name_or_path))
        }
    }

    /// Load and parse the config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_resolves_to_etc() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/carelog/prod.toml")
        );
    }

    #[test]
    fn path_like_input_is_used_directly() {
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/tmp/c.toml"),
            PathBuf::from("/tmp/c.toml")
        );
    }

    #[test]
    fn load_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carelog.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/var/lib/carelog\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.storage.data_dir, "/var/lib/carelog");
        assert!(config.storage.sqlite_path.is_none());
    }

    #[test]
    fn load_rejects_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "listen = true\n").unwrap();
        assert!(ServerConfig::load(&path).is_err());
    }
}
