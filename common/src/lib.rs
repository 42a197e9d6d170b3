//! Building Check Common Library
//!
//! CLIとデスクトップで共有される点検ロジック:
//! フロアプラン、チェックリスト状態、CSVチェックポイント、セッション

pub mod checklist;
pub mod checkpoint;
pub mod error;
pub mod floor_plan;
pub mod progress;
pub mod session;

pub use checklist::{ChecklistState, InstanceRecord, ItemKey, RoomSummary, SummaryEntry};
pub use checkpoint::{CheckpointRow, LoadReport, SessionLog};
pub use error::{Error, Result};
pub use floor_plan::FloorPlan;
pub use progress::RoomProgress;
pub use session::{RoomStatus, Session, SessionOrigin, SessionPhase};
