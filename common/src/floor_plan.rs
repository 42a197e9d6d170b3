//! フロアプラン読み込みモジュール
//!
//! `floors.json` は「フロア → 部屋 → 項目種別 → 個数」の3段ネストJSON。
//!
//! ```json
//! { "Floor1": { "RoomA": { "Light": 2, "Socket": 4 } } }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// デフォルトのフロアプランファイル名
pub const FLOORS_FILE: &str = "floors.json";

/// 部屋内の項目種別 → 個数
pub type RoomItems = BTreeMap<String, u32>;

/// フロア内の部屋名 → 項目
pub type FloorRooms = BTreeMap<String, RoomItems>;

/// フロアプラン（セッション中は不変）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorPlan {
    floors: BTreeMap<String, FloorRooms>,
}

impl FloorPlan {
    /// JSONファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigLoad(format!("{} not found: {}", path.display(), e)))?;
        Self::from_json(&content)
            .map_err(|e| Error::ConfigLoad(format!("Error decoding {}: {}", path.display(), e)))
    }

    /// 読み込みに失敗した場合は空のフロアプランを返す
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(plan) => {
                log::info!(
                    "Loaded floor plan {} ({} floors)",
                    path.display(),
                    plan.floors.len()
                );
                plan
            }
            Err(e) => {
                log::error!("{}", e);
                Self::default()
            }
        }
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: Self = serde_json::from_str(json)?;
        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// フロア名一覧（ソート順）
    pub fn floor_names(&self) -> impl Iterator<Item = &str> {
        self.floors.keys().map(String::as_str)
    }

    pub fn rooms(&self, floor: &str) -> Option<&FloorRooms> {
        self.floors.get(floor)
    }

    /// 全フロアの (部屋名, 項目) を走査
    pub fn all_rooms(&self) -> impl Iterator<Item = (&str, &RoomItems)> {
        self.floors
            .values()
            .flat_map(|rooms| rooms.iter().map(|(name, items)| (name.as_str(), items)))
    }
}

impl From<BTreeMap<String, FloorRooms>> for FloorPlan {
    fn from(floors: BTreeMap<String, FloorRooms>) -> Self {
        Self { floors }
    }
}
