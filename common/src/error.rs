//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// floors.json が読めない・解析できない
    #[error("Config error: {0}")]
    ConfigLoad(String),

    /// チェックポイントCSVの不正行
    #[error("Invalid row at line {line}: {reason}")]
    ParseRow { line: u64, reason: String },

    /// 部屋・項目・番号がフロアプランに存在しない
    #[error("Not found: room '{room}', item '{item}', index {index}")]
    ReferenceNotFound {
        room: String,
        item: String,
        index: usize,
    },

    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("Unknown floor: {0}")]
    UnknownFloor(String),

    #[error("No previous check found in {0}")]
    NoSessionFound(String),

    #[error("No check in progress. Start a new check or resume one first")]
    NoActiveSession,
}

impl Error {
    /// 存在しない参照エラーを生成
    pub fn not_found(room: &str, item: &str, index: usize) -> Self {
        Error::ReferenceNotFound {
            room: room.to_string(),
            item: item.to_string(),
            index,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_not_found() {
        let error = Error::not_found("RoomA", "light", 5);
        assert_eq!(
            format!("{}", error),
            "Not found: room 'RoomA', item 'light', index 5"
        );
    }

    #[test]
    fn test_error_display_parse_row() {
        let error = Error::ParseRow {
            line: 3,
            reason: "invalid index 'x'".to_string(),
        };
        assert_eq!(format!("{}", error), "Invalid row at line 3: invalid index 'x'");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownFloor("Basement".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownFloor"));
        assert!(debug.contains("Basement"));
    }
}
