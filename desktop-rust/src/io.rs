use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use building_check::config::Config;
use building_check::logging::init_logging;
use building_check_common::Session;

pub fn load_config() -> Result<Config> {
    Config::load().context("load config")
}

pub fn start_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    init_logging(&path, &config.log_level, false).with_context(|| format!("open log {}", path.display()))
}

pub fn open_session(config: &Config) -> Session {
    Session::open(&config.work_dir, &config.floors_path())
}

/// 作業フォルダを切り替えた設定を返す
pub fn with_work_dir(config: &Config, folder: &Path) -> Config {
    Config {
        work_dir: PathBuf::from(folder),
        ..config.clone()
    }
}
