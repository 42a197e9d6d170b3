//! ログ初期化
//!
//! `app.log` を毎回切り詰めて書き出す。`RUST_LOG` が設定されていればそちらを優先。

use crate::error::{BuildingCheckError, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn init_logging(log_file: &Path, level: &str, verbose: bool) -> Result<()> {
    let filter = if verbose { "debug" } else { level };
    let file = File::create(log_file)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| BuildingCheckError::Logging(e.to_string()))
}
