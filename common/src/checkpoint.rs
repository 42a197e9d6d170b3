//! チェックポイントCSVモジュール
//!
//! 列構成は `Room,Item,Index,Status,Notes`（ヘッダ行必須）。
//! - `current_state.csv`: 最新状態のスナップショット（変更のたびに全書き換え）
//! - `check_results_<YYYY-MM-DD>.csv`: 点検セッションのログ
//!
//! ステータスが空の個体は出力しない。カンマを含むメモはクォートされる。

use crate::checklist::ChecklistState;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// ヘッダ行
pub const HEADER: [&str; 5] = ["Room", "Item", "Index", "Status", "Notes"];

/// スナップショットファイル名
pub const SNAPSHOT_FILE: &str = "current_state.csv";

lazy_static! {
    static ref SESSION_LOG_RE: Regex = Regex::new(r"^check_results_(.+)\.csv$").unwrap();
}

/// セッションログのファイル名
pub fn session_log_name(date: NaiveDate) -> String {
    format!("check_results_{}.csv", date.format("%Y-%m-%d"))
}

/// CSVの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointRow {
    pub room: String,
    pub item: String,
    pub index: usize,
    pub status: String,
    pub notes: String,
}

impl CheckpointRow {
    /// CSVレコードから変換（`line` はエラー表示用）
    fn from_record(record: &StringRecord, line: u64) -> Result<Self> {
        if record.len() < HEADER.len() {
            return Err(Error::ParseRow {
                line,
                reason: format!("expected {} fields, found {}", HEADER.len(), record.len()),
            });
        }

        let index = record[2].parse::<usize>().map_err(|e| Error::ParseRow {
            line,
            reason: format!("invalid index '{}': {}", &record[2], e),
        })?;

        // 旧形式（クォートなし）でメモにカンマが含まれていた行を復元
        let notes = if record.len() > HEADER.len() {
            log::warn!(
                "Line {}: {} fields, joining the extra ones into notes",
                line,
                record.len()
            );
            record.iter().skip(4).collect::<Vec<_>>().join(",")
        } else {
            record[4].to_string()
        };

        Ok(Self {
            room: record[0].to_string(),
            item: record[1].to_lowercase(),
            index,
            status: record[3].to_string(),
            notes,
        })
    }
}

/// 読み込み結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 反映した行数
    pub applied: usize,
    /// スキップした行数
    pub skipped: usize,
}

/// ヘッダ行のみのファイルを作成（既存ファイルは切り詰め）
pub fn write_header_only(path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;
    writer.write_record(HEADER)?;
    writer.flush()?;
    Ok(())
}

/// スナップショットを全書き換え。書き込んだデータ行数を返す
pub fn write_snapshot(path: &Path, state: &ChecklistState) -> Result<usize> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;
    writer.write_record(HEADER)?;

    let mut count = 0;
    for row in state.checked_rows() {
        let index = row.index.to_string();
        writer.write_record([
            row.room.as_str(),
            row.item.as_str(),
            index.as_str(),
            row.status.as_str(),
            row.notes.as_str(),
        ])?;
        log::debug!(
            "Saved to {}: Room {}, Item {}, Index {}, Status {}, Notes: {}",
            path.display(),
            row.room,
            row.item,
            row.index,
            row.status,
            row.notes
        );
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// CSVを読み込んで状態に上書き反映する
///
/// 不正な行・存在しない参照はログに残してスキップする。
pub fn load_into(state: &mut ChecklistState, path: &Path) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut records = reader.records();
    let mut report = LoadReport::default();

    match records.next() {
        Some(Ok(header)) if header.len() >= HEADER.len() => {
            log::debug!("File header: {:?}", header);
        }
        Some(Ok(header)) => {
            log::error!("Invalid header in {}: {:?}", path.display(), header);
            return Ok(report);
        }
        Some(Err(e)) => {
            log::error!("Invalid header in {}: {}", path.display(), e);
            return Ok(report);
        }
        None => {
            log::error!("Invalid header in {}: file is empty", path.display());
            return Ok(report);
        }
    }

    for result in records {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::error!("Skipping unreadable row in {}: {}", path.display(), e);
                report.skipped += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let row = match CheckpointRow::from_record(&record, line) {
            Ok(row) => row,
            Err(e @ Error::ParseRow { .. }) if record.len() < HEADER.len() => {
                log::warn!("Incomplete row {:?}: {}", record, e);
                report.skipped += 1;
                continue;
            }
            Err(e) => {
                log::error!("Skipping invalid row {:?}: {}", record, e);
                report.skipped += 1;
                continue;
            }
        };

        match state.apply_row(&row) {
            Ok(()) => {
                log::info!(
                    "Loaded status: Room {}, {} {} - {}, Notes: {}",
                    row.room,
                    row.item,
                    row.index + 1,
                    row.status,
                    row.notes
                );
                report.applied += 1;
            }
            Err(e) => {
                log::warn!("{} (not in the current floor plan)", e);
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// 検出されたセッションログ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLog {
    pub path: PathBuf,
    /// ファイル名の日付（解釈できない場合は None）
    pub date: Option<NaiveDate>,
    pub modified: SystemTime,
}

/// ディレクトリ直下のセッションログを新しい順に列挙
pub fn list_sessions(dir: &Path) -> Vec<SessionLog> {
    let mut sessions: Vec<SessionLog> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?;
            let captures = SESSION_LOG_RE.captures(name)?;
            let date = NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d").ok();
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some(SessionLog {
                path: entry.path().to_path_buf(),
                date,
                modified,
            })
        })
        .collect();

    // 更新日時の降順、同時刻ならファイル名の降順
    sessions.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| b.path.file_name().cmp(&a.path.file_name()))
    });
    log::debug!("Files found: {:?}", sessions.iter().map(|s| &s.path).collect::<Vec<_>>());
    sessions
}

/// 最も新しく更新されたセッションログを返す
pub fn discover_latest_session(dir: &Path) -> Result<PathBuf> {
    list_sessions(dir)
        .into_iter()
        .next()
        .map(|s| s.path)
        .ok_or_else(|| Error::NoSessionFound(dir.display().to_string()))
}
