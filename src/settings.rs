use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "zfs-list-tui.json";
const SETTINGS_VERSION: u32 = 1;

/// Window and column geometry remembered between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuiSettings {
    pub version: u32,

    #[serde(default)]
    pub width: Option<u16>,

    #[serde(default)]
    pub height: Option<u16>,

    /// Keyed by property name as shown in the header.
    #[serde(default)]
    pub column_widths: BTreeMap<String, u16>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            width: None,
            height: None,
            column_widths: BTreeMap::new(),
        }
    }
}

/// `~/.config/zfs-list-tui.json` when `~/.config` exists, else `~/.zfs-list-tui.json`.
pub fn default_settings_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or_else(|| anyhow!("HOME is not set"))?;
    Ok(settings_path_in(Path::new(&home)))
}

pub fn settings_path_in(home: &Path) -> PathBuf {
    let config_dir = home.join(".config");
    if config_dir.is_dir() {
        config_dir.join(SETTINGS_FILE)
    } else {
        home.join(format!(".{}", SETTINGS_FILE))
    }
}

impl GuiSettings {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let settings: GuiSettings = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        if settings.version != SETTINGS_VERSION {
            return Err(anyhow!(
                "unsupported settings version {} in {}",
                settings.version,
                path.display()
            ));
        }
        Ok(settings)
    }

    /// Like [`GuiSettings::read`], but any failure yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::read(path) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!("could not load settings, using defaults: {:#}", err);
                Self::default()
            }
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).context("serialize settings")?;
        write_atomic(path, &bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
