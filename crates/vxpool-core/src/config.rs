use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Rows per INSERT/DELETE statement during reconciliation.
pub const DEFAULT_BULK_SIZE: usize = 100;

/// Upper bound on `bulk_size`. A bulk insert binds two variables per row and
/// SQLite rejects statements with more than 32766 of them.
pub const MAX_BULK_SIZE: usize = 16_000;

fn default_bulk_size() -> usize {
    DEFAULT_BULK_SIZE
}

/// Global configuration loaded from `~/.config/vxpool/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VxpoolConfig {
    /// `<vni_min>:<vni_max>` entries enumerating the VNIs available for allocation.
    #[serde(default, alias = "ranges")]
    pub vni_ranges: Vec<String>,
    /// Chunk size for bulk inserts and deletes during reconciliation.
    /// Clamped to `1..=MAX_BULK_SIZE` when used.
    #[serde(default = "default_bulk_size")]
    pub bulk_size: usize,
    /// Allocation database file; defaults to `~/.local/state/vxpool/allocations.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for VxpoolConfig {
    fn default() -> Self {
        Self {
            vni_ranges: Vec::new(),
            bulk_size: DEFAULT_BULK_SIZE,
            database_path: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vxpool")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VxpoolConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VxpoolConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. A missing file is an error.
pub fn load_from_path(path: &Path) -> Result<VxpoolConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: VxpoolConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = VxpoolConfig::default();
        assert!(cfg.vni_ranges.is_empty());
        assert_eq!(cfg.bulk_size, 100);
        assert!(cfg.database_path.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = VxpoolConfig {
            vni_ranges: vec!["100:200".to_string(), "500:510".to_string()],
            ..VxpoolConfig::default()
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: VxpoolConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.vni_ranges, cfg.vni_ranges);
        assert_eq!(parsed.bulk_size, cfg.bulk_size);
        assert!(parsed.database_path.is_none());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            vni_ranges = ["1:1000", " 2000 : 2010 "]
            bulk_size = 25
            database_path = "/var/lib/vxpool/alloc.db"
        "#;
        let cfg: VxpoolConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.vni_ranges, vec!["1:1000", " 2000 : 2010 "]);
        assert_eq!(cfg.bulk_size, 25);
        assert_eq!(
            cfg.database_path.as_deref(),
            Some(Path::new("/var/lib/vxpool/alloc.db"))
        );
    }

    #[test]
    fn config_toml_ranges_alias_and_defaults() {
        let cfg: VxpoolConfig = toml::from_str(r#"ranges = ["100:102"]"#).unwrap();
        assert_eq!(cfg.vni_ranges, vec!["100:102"]);
        assert_eq!(cfg.bulk_size, DEFAULT_BULK_SIZE);

        let empty: VxpoolConfig = toml::from_str("").unwrap();
        assert!(empty.vni_ranges.is_empty());
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "vni_ranges = [\"10:20\"]\nbulk_size = 7\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.vni_ranges, vec!["10:20"]);
        assert_eq!(cfg.bulk_size, 7);

        assert!(load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
