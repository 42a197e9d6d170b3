//! 点検セッションモジュール
//!
//! 状態遷移:
//! - NoSession → start_new → Active(New)
//! - NoSession → resume → Active(Resumed)
//!
//! 状態を変更する操作は、戻る前に必ずスナップショットへ書き出す。

use crate::checklist::{ChecklistState, RoomSummary};
use crate::checkpoint::{self, LoadReport, SNAPSHOT_FILE};
use crate::error::{Error, Result};
use crate::floor_plan::FloorPlan;
use crate::progress::RoomProgress;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// セッションの開始方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    New,
    Resumed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    NoSession,
    Active {
        /// セッションログのパス
        log: PathBuf,
        origin: SessionOrigin,
    },
}

/// フロアの部屋と進捗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomStatus {
    pub room: String,
    pub progress: RoomProgress,
}

/// 点検セッション
#[derive(Debug, Clone)]
pub struct Session {
    work_dir: PathBuf,
    plan: FloorPlan,
    state: ChecklistState,
    phase: SessionPhase,
    current_floor: Option<String>,
    current_room: Option<String>,
}

impl Session {
    pub fn new(plan: FloorPlan, work_dir: impl Into<PathBuf>) -> Self {
        let state = ChecklistState::from_plan(&plan);
        Self {
            work_dir: work_dir.into(),
            plan,
            state,
            phase: SessionPhase::NoSession,
            current_floor: None,
            current_room: None,
        }
    }

    /// フロアプランを読み込んでセッションを作成（読み込み失敗時は空のプラン）
    pub fn open(work_dir: impl Into<PathBuf>, floors_file: &Path) -> Self {
        Self::new(FloorPlan::load_or_empty(floors_file), work_dir)
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Active { .. })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.work_dir.join(SNAPSHOT_FILE)
    }

    pub fn session_log(&self) -> Option<&Path> {
        match &self.phase {
            SessionPhase::Active { log, .. } => Some(log),
            SessionPhase::NoSession => None,
        }
    }

    pub fn current_floor(&self) -> Option<&str> {
        self.current_floor.as_deref()
    }

    pub fn current_room(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    pub fn floors(&self) -> impl Iterator<Item = &str> {
        self.plan.floor_names()
    }

    /// 新規点検を開始
    ///
    /// 日付入りのセッションログをヘッダのみで作成し、
    /// スナップショットを削除して状態を初期化する。
    pub fn start_new(&mut self, date: NaiveDate) -> PathBuf {
        let log_path = self.work_dir.join(checkpoint::session_log_name(date));

        match checkpoint::write_header_only(&log_path) {
            Ok(()) => log::info!("New check file created: {}", log_path.display()),
            Err(e) => log::error!("Error creating new check file {}: {}", log_path.display(), e),
        }

        let snapshot = self.snapshot_path();
        if snapshot.exists() {
            if let Err(e) = std::fs::remove_file(&snapshot) {
                log::error!("Error removing {}: {}", snapshot.display(), e);
            }
        }

        self.state.initialize(&self.plan);
        self.current_floor = None;
        self.current_room = None;
        self.phase = SessionPhase::Active {
            log: log_path.clone(),
            origin: SessionOrigin::New,
        };
        log_path
    }

    /// 最新のセッションログから再開
    ///
    /// ログを再生した後、スナップショットがあればその内容で上書きする。
    /// ログが見つからない場合は状態を変えずに `NoSessionFound` を返す。
    pub fn resume(&mut self) -> Result<PathBuf> {
        let log_path = checkpoint::discover_latest_session(&self.work_dir)?;
        log::info!("Resuming from file: {}", log_path.display());

        self.state.initialize(&self.plan);
        match checkpoint::load_into(&mut self.state, &log_path) {
            Ok(report) => log_report(&log_path, report),
            Err(e) => log::error!("Error loading previous check file {}: {}", log_path.display(), e),
        }

        let snapshot = self.snapshot_path();
        if snapshot.exists() {
            match checkpoint::load_into(&mut self.state, &snapshot) {
                Ok(report) => log_report(&snapshot, report),
                Err(e) => log::error!("Error loading current state: {}", e),
            }
        } else {
            log::warn!("Current state file not found.");
        }

        self.current_floor = None;
        self.current_room = None;
        self.phase = SessionPhase::Active {
            log: log_path.clone(),
            origin: SessionOrigin::Resumed,
        };
        Ok(log_path)
    }

    /// フロアを選択し、部屋ごとの進捗を返す
    pub fn select_floor(&mut self, floor: &str) -> Result<Vec<RoomStatus>> {
        let rooms = self
            .plan
            .rooms(floor)
            .ok_or_else(|| Error::UnknownFloor(floor.to_string()))?;

        let statuses = rooms
            .keys()
            .map(|room| RoomStatus {
                room: room.clone(),
                progress: self.state.progress(room).unwrap_or(RoomProgress::NotChecked),
            })
            .collect();

        self.current_floor = Some(floor.to_string());
        self.current_room = None;
        Ok(statuses)
    }

    /// 部屋を選択し、サマリを返す
    pub fn select_room(&mut self, room: &str) -> Result<RoomSummary> {
        let summary = self.state.summarize(room)?;
        self.current_room = Some(room.to_string());
        Ok(summary)
    }

    pub fn summarize(&self, room: &str) -> Result<RoomSummary> {
        self.state.summarize(room)
    }

    /// ステータスを記録して書き出す
    pub fn record_status(&mut self, room: &str, item: &str, index: usize, status: &str) -> Result<()> {
        self.ensure_active()?;
        if let Err(e) = self.state.set_status(room, item, index, status) {
            log::warn!("{}", e);
            return Err(e);
        }
        log::info!("Saved status for Room {}, {} {}: {}", room, item, index + 1, status);
        self.write_through();
        Ok(())
    }

    /// メモを記録して書き出す
    pub fn record_notes(&mut self, room: &str, item: &str, index: usize, notes: &str) -> Result<()> {
        self.ensure_active()?;
        if let Err(e) = self.state.set_notes(room, item, index, notes) {
            log::warn!("{}", e);
            return Err(e);
        }
        log::info!("Saved notes for Room {}, {} {}: {}", room, item, index + 1, notes);
        self.write_through();
        Ok(())
    }

    /// スナップショットとセッションログを現在の状態で書き換える
    pub fn flush(&self) -> Result<()> {
        checkpoint::write_snapshot(&self.snapshot_path(), &self.state)?;
        if let Some(log_path) = self.session_log() {
            checkpoint::write_snapshot(log_path, &self.state)?;
        }
        Ok(())
    }

    fn write_through(&self) {
        match self.flush() {
            Ok(()) => log::info!("Current state and check file saved successfully."),
            Err(e) => log::error!("Error saving current state or check file: {}", e),
        }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(Error::NoActiveSession)
        }
    }
}

fn log_report(path: &Path, report: LoadReport) {
    log::info!(
        "Loaded {}: {} rows applied, {} skipped",
        path.display(),
        report.applied,
        report.skipped
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn plan() -> FloorPlan {
        FloorPlan::from_json(r#"{"Floor1": {"RoomA": {"Light": 2}, "RoomB": {"Door": 1}}}"#)
            .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[test]
    fn test_record_requires_active_session() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut session = Session::new(plan(), dir.path());

        let result = session.record_status("RoomA", "Light", 0, "OK");
        assert!(matches!(result, Err(Error::NoActiveSession)));
        assert!(!session.snapshot_path().exists());
    }

    #[test]
    fn test_start_new_writes_header_and_removes_snapshot() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join(SNAPSHOT_FILE), "stale").unwrap();

        let mut session = Session::new(plan(), dir.path());
        let log = session.start_new(date());

        assert_eq!(log, dir.path().join("check_results_2024-01-02.csv"));
        assert_eq!(fs::read_to_string(&log).unwrap(), "Room,Item,Index,Status,Notes\n");
        assert!(!session.snapshot_path().exists());
        assert_eq!(
            session.phase(),
            &SessionPhase::Active { log, origin: SessionOrigin::New }
        );
    }

    #[test]
    fn test_record_writes_through() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut session = Session::new(plan(), dir.path());
        let log = session.start_new(date());

        session.record_status("RoomA", "Light", 0, "OK").unwrap();

        let expected = "Room,Item,Index,Status,Notes\nRoomA,light,0,OK,\n";
        assert_eq!(fs::read_to_string(session.snapshot_path()).unwrap(), expected);
        assert_eq!(fs::read_to_string(&log).unwrap(), expected);
    }

    #[test]
    fn test_record_unknown_reference_leaves_files_untouched() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut session = Session::new(plan(), dir.path());
        session.start_new(date());

        let result = session.record_notes("RoomA", "Light", 9, "x");
        assert!(matches!(result, Err(Error::ReferenceNotFound { .. })));
        assert!(!session.snapshot_path().exists());
    }

    #[test]
    fn test_select_floor_and_room() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut session = Session::new(plan(), dir.path());
        session.start_new(date());
        session.record_status("RoomB", "door", 0, "OK").unwrap();

        let rooms = session.select_floor("Floor1").unwrap();
        assert_eq!(
            rooms,
            vec![
                RoomStatus { room: "RoomA".into(), progress: RoomProgress::NotChecked },
                RoomStatus { room: "RoomB".into(), progress: RoomProgress::FullyChecked },
            ]
        );
        assert_eq!(session.current_floor(), Some("Floor1"));

        let summary = session.select_room("RoomB").unwrap();
        assert_eq!(summary.entries[0].to_string(), "Door 1: OK");
        assert_eq!(session.current_room(), Some("RoomB"));

        assert!(matches!(session.select_floor("Roof"), Err(Error::UnknownFloor(_))));
    }
}
