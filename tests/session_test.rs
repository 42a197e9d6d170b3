//! 点検セッションの統合テスト
//!
//! 新規開始 → 記録 → 再開 の流れとCSVチェックポイントを検証

use building_check_common::checkpoint::{self, SNAPSHOT_FILE};
use building_check_common::{ChecklistState, FloorPlan, Session, SessionOrigin, SessionPhase};
use chrono::NaiveDate;
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

const PLAN: &str = r#"{
    "Floor1": { "RoomA": { "Light": 2, "Socket": 1 }, "RoomB": { "Door": 1 } },
    "Floor2": { "Lab": { "Fume Hood": 1 } }
}"#;

fn plan() -> FloorPlan {
    FloorPlan::from_json(PLAN).expect("invalid test plan")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn set_mtime(path: &Path, secs: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

#[test]
fn test_single_light_scenario() {
    let dir = tempdir().expect("Failed to create temp dir");
    let plan = FloorPlan::from_json(r#"{"Floor1": {"RoomA": {"Light": 2}}}"#).unwrap();
    let mut session = Session::new(plan, dir.path());
    session.start_new(day(1));

    let records = &session.state().items("RoomA").unwrap().values().next().unwrap();
    assert_eq!(records.len(), 2);

    session.record_status("RoomA", "Light", 0, "OK").unwrap();

    let content = fs::read_to_string(dir.path().join(SNAPSHOT_FILE)).unwrap();
    let rows: Vec<&str> = content.lines().skip(1).collect();
    assert_eq!(rows, vec!["RoomA,light,0,OK,"]);
}

#[test]
fn test_snapshot_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(SNAPSHOT_FILE);

    let mut state = ChecklistState::from_plan(&plan());
    state.set_status("RoomA", "Light", 1, "ISSUE").unwrap();
    state.set_notes("RoomA", "Light", 1, "bulb \"warm\", flickers").unwrap();
    state.set_status("Lab", "FUME HOOD", 0, "OK").unwrap();
    // ステータスなしのメモは保存されない
    state.set_notes("RoomB", "Door", 0, "squeaks").unwrap();

    checkpoint::write_snapshot(&path, &state).unwrap();

    let mut reloaded = ChecklistState::from_plan(&plan());
    let report = checkpoint::load_into(&mut reloaded, &path).unwrap();
    assert_eq!(report.applied, 2);

    for (room, item, index) in [("RoomA", "light", 1), ("Lab", "fume hood", 0)] {
        assert_eq!(
            reloaded.record(room, item, index).unwrap(),
            state.record(room, item, index).unwrap()
        );
    }
    assert_eq!(reloaded.record("RoomB", "door", 0).unwrap().notes(), None);
    assert!(!reloaded.record("RoomA", "light", 0).unwrap().is_checked());
}

#[test]
fn test_snapshot_is_byte_identical_when_unchanged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(SNAPSHOT_FILE);

    let mut state = ChecklistState::from_plan(&plan());
    state.set_status("RoomB", "Door", 0, "OK").unwrap();
    state.set_status("RoomA", "Socket", 0, "ISSUE").unwrap();

    checkpoint::write_snapshot(&path, &state).unwrap();
    let first = fs::read(&path).unwrap();
    checkpoint::write_snapshot(&path, &state).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn test_resume_replays_log_then_snapshot() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("check_results_2024-01-05.csv");
    fs::write(
        &log_path,
        "Room,Item,Index,Status,Notes\nRoomA,light,0,ISSUE,from log\nRoomB,door,0,OK,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(SNAPSHOT_FILE),
        "Room,Item,Index,Status,Notes\nRoomA,light,0,OK,fixed\n",
    )
    .unwrap();

    let mut session = Session::new(plan(), dir.path());
    assert_eq!(session.resume().unwrap(), log_path);
    assert_eq!(
        session.phase(),
        &SessionPhase::Active { log: log_path.clone(), origin: SessionOrigin::Resumed }
    );

    let light = session.state().record("RoomA", "Light", 0).unwrap();
    assert_eq!(light.status(), Some("OK"));
    assert_eq!(light.notes(), Some("fixed"));
    assert_eq!(session.state().record("RoomB", "Door", 0).unwrap().status(), Some("OK"));
}

#[test]
fn test_resume_without_snapshot_uses_log() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("check_results_2024-01-05.csv"),
        "Room,Item,Index,Status,Notes\nLab,Fume Hood,0,ISSUE,sash stuck\n",
    )
    .unwrap();

    let mut session = Session::new(plan(), dir.path());
    session.resume().unwrap();
    assert_eq!(
        session.state().record("Lab", "fume hood", 0).unwrap().notes(),
        Some("sash stuck")
    );
}

#[test]
fn test_resume_picks_latest_by_mtime() {
    let dir = tempdir().expect("Failed to create temp dir");
    let jan1 = dir.path().join("check_results_2024-01-01.csv");
    let jan2 = dir.path().join("check_results_2024-01-02.csv");
    fs::write(&jan1, "Room,Item,Index,Status,Notes\nRoomA,light,0,OK,\n").unwrap();
    fs::write(&jan2, "Room,Item,Index,Status,Notes\nRoomA,light,1,OK,\n").unwrap();
    set_mtime(&jan1, 1_700_000_000);
    set_mtime(&jan2, 1_700_086_400);

    assert_eq!(checkpoint::discover_latest_session(dir.path()).unwrap(), jan2);

    // タイムスタンプを入れ替えると古い日付のファイルが選ばれる
    set_mtime(&jan1, 1_700_172_800);
    let mut session = Session::new(plan(), dir.path());
    assert_eq!(session.resume().unwrap(), jan1);
    assert!(session.state().record("RoomA", "light", 0).unwrap().is_checked());
    assert!(!session.state().record("RoomA", "light", 1).unwrap().is_checked());
}

#[test]
fn test_new_check_after_resume_starts_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = Session::new(plan(), dir.path());
    session.start_new(day(1));
    session.record_status("RoomA", "Light", 0, "OK").unwrap();
    assert!(dir.path().join(SNAPSHOT_FILE).exists());

    let mut next = Session::new(plan(), dir.path());
    next.resume().unwrap();
    assert!(next.state().record("RoomA", "Light", 0).unwrap().is_checked());

    next.start_new(day(2));
    assert!(!dir.path().join(SNAPSHOT_FILE).exists());
    assert_eq!(next.state(), &ChecklistState::from_plan(&plan()));
    assert_eq!(checkpoint::list_sessions(dir.path()).len(), 2);
}

#[test]
fn test_stale_rows_after_floor_plan_change() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = Session::new(plan(), dir.path());
    session.start_new(day(3));
    session.record_status("RoomA", "Light", 1, "OK").unwrap();
    session.record_status("Lab", "Fume Hood", 0, "ISSUE").unwrap();

    // Lab が削除され、照明が1個に減ったプラン
    let smaller = FloorPlan::from_json(r#"{"Floor1": {"RoomA": {"Light": 1}}}"#).unwrap();
    let mut resumed = Session::new(smaller, dir.path());
    resumed.resume().unwrap();

    let lights = resumed.state().items("RoomA").unwrap().values().next().unwrap();
    assert_eq!(lights.len(), 1);
    assert!(!lights[0].is_checked());
    assert!(!resumed.state().contains_room("Lab"));
}
