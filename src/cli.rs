use building_check_common::checklist::{STATUS_ISSUE, STATUS_OK};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "building-check")]
#[command(about = "Room-by-room building inspection checklist", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 作業ディレクトリ（チェックポイントCSVの保存先）
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// フロアプランJSONファイル
    #[arg(long, global = true)]
    pub floors: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 新しい点検を開始して対話モードに入る
    New,

    /// 前回の点検を再開して対話モードに入る
    Resume,

    /// ステータスを1件記録（前回の点検を再開して適用）
    Record {
        /// 部屋名
        #[arg(required = true)]
        room: String,

        /// 項目種別（大文字小文字は区別しない）
        #[arg(required = true)]
        item: String,

        /// 個体番号（0始まり）
        #[arg(required = true)]
        index: usize,

        /// ステータス (ok/issue)
        #[arg(required = true)]
        status: CheckStatus,
    },

    /// メモを1件記録
    Notes {
        #[arg(required = true)]
        room: String,

        #[arg(required = true)]
        item: String,

        /// 個体番号（0始まり）
        #[arg(required = true)]
        index: usize,

        /// メモ本文
        #[arg(required = true)]
        text: String,
    },

    /// 部屋のチェック状況を表示
    Summary {
        #[arg(required = true)]
        room: String,
    },

    /// フロアと部屋ごとの進捗を表示
    Floors,

    /// 保存されている点検ログを一覧表示
    Sessions,

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// フロアプランJSONを設定
        #[arg(long)]
        set_floors: Option<PathBuf>,

        /// 作業ディレクトリを設定
        #[arg(long)]
        set_dir: Option<PathBuf>,
    },
}

/// 記録するステータス
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Issue,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => STATUS_OK,
            CheckStatus::Issue => STATUS_ISSUE,
        }
    }
}

impl std::str::FromStr for CheckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(CheckStatus::Ok),
            "issue" => Ok(CheckStatus::Issue),
            _ => Err(format!("Unknown status: {}. Use ok or issue", s)),
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
