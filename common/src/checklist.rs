//! チェックリスト状態モジュール
//!
//! 部屋 → 項目種別 → 個体ごとの記録（ステータス・メモ）を保持する。
//! 個体の番号（0始まり）は保存・再読み込みをまたいで不変。

use crate::checkpoint::CheckpointRow;
use crate::error::{Error, Result};
use crate::floor_plan::FloorPlan;
use std::collections::BTreeMap;
use std::fmt;

/// 未チェック時の表示
pub const NOT_CHECKED: &str = "Not checked";

pub const STATUS_OK: &str = "OK";
pub const STATUS_ISSUE: &str = "ISSUE";

/// 項目種別キー（小文字に正規化済み）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 表示用の名前（先頭のみ大文字）
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// 個体1つ分の記録
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceRecord {
    status: Option<String>,
    notes: Option<String>,
}

impl InstanceRecord {
    pub fn new(status: &str, notes: &str) -> Self {
        Self {
            status: non_empty(status),
            notes: non_empty(notes),
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_checked(&self) -> bool {
        self.status.is_some()
    }

    fn set_status(&mut self, status: &str) {
        self.status = non_empty(status);
    }

    fn set_notes(&mut self, notes: &str) {
        self.notes = non_empty(notes);
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

type RoomRecords = BTreeMap<ItemKey, Vec<InstanceRecord>>;

/// チェックリスト全体の状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistState {
    rooms: BTreeMap<String, RoomRecords>,
}

impl ChecklistState {
    /// フロアプランから空の状態を作成
    pub fn from_plan(plan: &FloorPlan) -> Self {
        let mut state = Self::default();
        state.initialize(plan);
        state
    }

    /// 状態をクリアし、設定された個数分の空レコードを作り直す
    pub fn initialize(&mut self, plan: &FloorPlan) {
        self.rooms.clear();
        for (room, items) in plan.all_rooms() {
            let records = items
                .iter()
                .map(|(item, &count)| {
                    (ItemKey::new(item), vec![InstanceRecord::default(); count as usize])
                })
                .collect();
            self.rooms.insert(room.to_string(), records);
        }
    }

    pub fn room_names(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    pub fn contains_room(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    /// 部屋内の項目と記録一覧
    pub fn items(&self, room: &str) -> Option<&BTreeMap<ItemKey, Vec<InstanceRecord>>> {
        self.rooms.get(room)
    }

    pub fn record(&self, room: &str, item: &str, index: usize) -> Result<&InstanceRecord> {
        self.rooms
            .get(room)
            .and_then(|items| items.get(&ItemKey::new(item)))
            .and_then(|records| records.get(index))
            .ok_or_else(|| Error::not_found(room, item, index))
    }

    fn record_mut(&mut self, room: &str, item: &str, index: usize) -> Result<&mut InstanceRecord> {
        self.rooms
            .get_mut(room)
            .and_then(|items| items.get_mut(&ItemKey::new(item)))
            .and_then(|records| records.get_mut(index))
            .ok_or_else(|| Error::not_found(room, item, index))
    }

    /// ステータスのみ上書き（メモはそのまま）
    pub fn set_status(&mut self, room: &str, item: &str, index: usize, status: &str) -> Result<()> {
        self.record_mut(room, item, index)?.set_status(status);
        Ok(())
    }

    /// メモのみ上書き（ステータスはそのまま）
    pub fn set_notes(&mut self, room: &str, item: &str, index: usize, notes: &str) -> Result<()> {
        self.record_mut(room, item, index)?.set_notes(notes);
        Ok(())
    }

    /// チェックポイント行でステータスとメモを上書き
    pub fn apply_row(&mut self, row: &CheckpointRow) -> Result<()> {
        let record = self.record_mut(&row.room, &row.item, row.index)?;
        *record = InstanceRecord::new(&row.status, &row.notes);
        Ok(())
    }

    /// ステータスが入っている記録を 部屋 → 項目 → 番号 の順で列挙
    pub fn checked_rows(&self) -> impl Iterator<Item = CheckpointRow> + '_ {
        self.rooms.iter().flat_map(|(room, items)| {
            items.iter().flat_map(move |(item, records)| {
                records.iter().enumerate().filter_map(move |(index, record)| {
                    record.status().map(|status| CheckpointRow {
                        room: room.clone(),
                        item: item.as_str().to_string(),
                        index,
                        status: status.to_string(),
                        notes: record.notes().unwrap_or_default().to_string(),
                    })
                })
            })
        })
    }

    /// 部屋内の全個体のステータス一覧（読み取り専用）
    pub fn summarize(&self, room: &str) -> Result<RoomSummary> {
        let items = self
            .rooms
            .get(room)
            .ok_or_else(|| Error::UnknownRoom(room.to_string()))?;

        let entries = items
            .iter()
            .flat_map(|(item, records)| {
                records.iter().enumerate().map(move |(index, record)| SummaryEntry {
                    item: item.clone(),
                    index,
                    status: record.status().map(str::to_string),
                    notes: record.notes().unwrap_or_default().to_string(),
                })
            })
            .collect();

        Ok(RoomSummary {
            room: room.to_string(),
            entries,
        })
    }
}

/// 部屋のサマリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: String,
    pub entries: Vec<SummaryEntry>,
}

/// サマリの1行（1個体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub item: ItemKey,
    pub index: usize,
    pub status: Option<String>,
    pub notes: String,
}

impl SummaryEntry {
    /// ステータス、未チェックなら "Not checked"
    pub fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or(NOT_CHECKED)
    }

    /// "Light 2" 形式のラベル（番号は1始まり）
    pub fn label(&self) -> String {
        format!("{} {}", self.item.display_name(), self.index + 1)
    }
}

impl fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.status_text())
    }
}
