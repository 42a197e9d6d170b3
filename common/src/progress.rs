//! 部屋ごとの進捗判定

use crate::checklist::ChecklistState;
use std::fmt;

/// 部屋の点検進捗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomProgress {
    /// 全個体チェック済み（個体のない部屋も含む）
    FullyChecked,
    PartiallyChecked,
    NotChecked,
}

impl RoomProgress {
    pub fn label(&self) -> &'static str {
        match self {
            RoomProgress::FullyChecked => "Fully Checked",
            RoomProgress::PartiallyChecked => "Partially Checked",
            RoomProgress::NotChecked => "Not Checked",
        }
    }
}

impl fmt::Display for RoomProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ChecklistState {
    /// 部屋の進捗。部屋が存在しなければ None
    pub fn progress(&self, room: &str) -> Option<RoomProgress> {
        let items = self.items(room)?;
        let mut records = items.values().flatten();

        let all = records.clone().all(|r| r.is_checked());
        let any = records.any(|r| r.is_checked());

        Some(if all {
            RoomProgress::FullyChecked
        } else if any {
            RoomProgress::PartiallyChecked
        } else {
            RoomProgress::NotChecked
        })
    }
}
