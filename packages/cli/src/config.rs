use configtree_codec::TextStyle;
use configtree_editor::{
    EditSession, EditorOptions, FileStorage, DEFAULT_HISTORY_LIMIT, SNAPSHOT_KEY,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "configtree.config.json";

/// Configtree configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding persisted snapshots
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Snapshot file name (without `.json`)
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,

    /// Layout used by `export` when no style is given
    #[serde(default)]
    pub output_style: TextStyle,

    /// Undo levels kept per session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_storage_dir() -> String {
    ".configtree".to_string()
}

fn default_snapshot_key() -> String {
    SNAPSHOT_KEY.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the storage directory
    pub fn get_storage_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.storage_dir)
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            history_limit: self.history_limit,
            text_style: self.output_style,
        }
    }

    pub fn storage(&self, cwd: &str) -> anyhow::Result<FileStorage> {
        Ok(FileStorage::new(self.get_storage_dir(cwd), &self.snapshot_key)?)
    }

    /// Open the persisted session for this project
    pub fn open_session(&self, cwd: &str) -> anyhow::Result<EditSession<FileStorage>> {
        Ok(EditSession::open(self.storage(cwd)?, self.editor_options())?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            snapshot_key: default_snapshot_key(),
            output_style: TextStyle::default(),
            history_limit: default_history_limit(),
        }
    }
}
