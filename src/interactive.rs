//! 対話式点検モジュール
//!
//! フロア → 部屋 → 個体 の順に選択し、OK / ISSUE / メモを記録する。
//! 記録のたびにセッションがCSVへ書き出す。

use crate::cli::CheckStatus;
use crate::error::Result;
use building_check_common::{RoomStatus, Session, SummaryEntry};
use dialoguer::{Input, Select};

/// 個体に対する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Record(CheckStatus),
    Notes,
    Back,
}

const ITEM_ACTIONS: &[(&str, ItemAction)] = &[
    ("OK", ItemAction::Record(CheckStatus::Ok)),
    ("Issue", ItemAction::Record(CheckStatus::Issue)),
    ("Notes", ItemAction::Notes),
    ("Back", ItemAction::Back),
];

/// フロア選択メニューの項目
pub fn floor_labels(floors: &[String]) -> Vec<String> {
    let mut labels: Vec<String> = floors.iter().map(|f| format!("Floor {}", f)).collect();
    labels.push("Home".to_string());
    labels
}

/// 部屋選択メニューの項目（進捗付き）
pub fn room_labels(rooms: &[RoomStatus]) -> Vec<String> {
    let mut labels: Vec<String> = rooms
        .iter()
        .map(|r| format!("Room {}: {}", r.room, r.progress))
        .collect();
    labels.push("Back".to_string());
    labels
}

/// 個体選択メニューの項目（メモがあれば併記）
pub fn entry_labels(entries: &[SummaryEntry]) -> Vec<String> {
    let mut labels: Vec<String> = entries
        .iter()
        .map(|e| {
            if e.notes.is_empty() {
                e.to_string()
            } else {
                format!("{} ({})", e, e.notes)
            }
        })
        .collect();
    labels.push("Back".to_string());
    labels
}

/// 対話式の点検を実行（Home で終了）
pub fn run_walkthrough(session: &mut Session) -> Result<()> {
    let floors: Vec<String> = session.floors().map(str::to_string).collect();
    if floors.is_empty() {
        println!("No floors configured. Check the floor plan file.");
        return Ok(());
    }

    let labels = floor_labels(&floors);
    loop {
        let choice = Select::new()
            .with_prompt("Select Floor")
            .items(&labels)
            .default(0)
            .interact()?;

        match floors.get(choice) {
            Some(floor) => floor_menu(session, floor)?,
            None => break,
        }
    }

    log::info!("Navigating back to the home screen.");
    Ok(())
}

fn floor_menu(session: &mut Session, floor: &str) -> Result<()> {
    loop {
        let rooms = session.select_floor(floor)?;
        let choice = Select::new()
            .with_prompt(format!("Check Floor {}", floor))
            .items(&room_labels(&rooms))
            .default(0)
            .interact()?;

        match rooms.get(choice) {
            Some(status) => room_menu(session, &status.room)?,
            None => return Ok(()),
        }
    }
}

fn room_menu(session: &mut Session, room: &str) -> Result<()> {
    let mut cursor = 0;
    loop {
        let summary = session.select_room(room)?;
        let choice = Select::new()
            .with_prompt(format!("Check Room {}", room))
            .items(&entry_labels(&summary.entries))
            .default(cursor)
            .interact()?;

        let Some(entry) = summary.entries.get(choice) else {
            return Ok(());
        };
        cursor = choice;

        let result = match prompt_item_action(&entry.label())? {
            ItemAction::Record(status) => {
                session.record_status(room, entry.item.as_str(), entry.index, status.as_str())
            }
            ItemAction::Notes => {
                let notes: String = Input::new()
                    .with_prompt("Notes")
                    .with_initial_text(entry.notes.clone())
                    .allow_empty(true)
                    .interact_text()?;
                session.record_notes(room, entry.item.as_str(), entry.index, &notes)
            }
            ItemAction::Back => Ok(()),
        };

        if let Err(e) = result {
            println!("⚠ {}", e);
        }
    }
}

fn prompt_item_action(label: &str) -> Result<ItemAction> {
    let names: Vec<&str> = ITEM_ACTIONS.iter().map(|(name, _)| *name).collect();
    let choice = Select::new()
        .with_prompt(label)
        .items(&names)
        .default(0)
        .interact()?;
    Ok(ITEM_ACTIONS[choice].1)
}
