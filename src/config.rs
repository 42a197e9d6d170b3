use crate::error::{BuildingCheckError, Result};
use building_check_common::floor_plan::FLOORS_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// チェックポイントCSVを置く作業ディレクトリ
    pub work_dir: PathBuf,
    /// フロアプランJSON（相対パスは作業ディレクトリ基準）
    pub floors_file: PathBuf,
    /// ログファイル（相対パスは作業ディレクトリ基準）
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            floors_file: PathBuf::from(FLOORS_FILE),
            log_file: PathBuf::from("app.log"),
            log_level: "debug".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BuildingCheckError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("building-check").join("config.json"))
    }

    /// コマンドライン引数で上書き
    pub fn with_overrides(mut self, work_dir: Option<PathBuf>, floors_file: Option<PathBuf>) -> Self {
        if let Some(dir) = work_dir {
            self.work_dir = dir;
        }
        if let Some(floors) = floors_file {
            self.floors_file = floors;
        }
        self
    }

    pub fn floors_path(&self) -> PathBuf {
        self.resolve(&self.floors_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.resolve(&self.log_file)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.work_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
