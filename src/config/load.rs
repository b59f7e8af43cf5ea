use crate::config::types::Config;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

pub const SETTINGS_FILE: &str = "settings.json";

impl Config {
    /// 讀取目前工作目錄下的 settings.json，不存在時使用預設值
    pub fn new() -> Result<Self> {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            debug!("找不到 {SETTINGS_FILE}，使用預設設定");
            return Ok(Self::default());
        }

        Self::from_file(path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
