use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slip-reader")]
#[command(about = "送金スリップ画像を抽出サーバーへ送り、結果を表示・台帳出力するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スリップ画像1枚を抽出して表示
    Extract {
        /// スリップ画像のパス
        #[arg(required = true)]
        file: PathBuf,

        /// 抽出結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 抽出エンドポイント（設定・環境変数より優先）
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// フォルダ内のスリップを一括抽出して台帳を出力
    Batch {
        /// スリップ画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// Excel台帳の出力先（デフォルト: 入力フォルダ/slips.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 抽出結果JSONの出力先
        #[arg(long)]
        json: Option<PathBuf>,

        /// キャッシュを使用（抽出済みスリップの再送信をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 抽出エンドポイント（設定・環境変数より優先）
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// 抽出サーバーの稼働確認
    Health {
        /// 抽出エンドポイント（設定・環境変数より優先）
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 抽出エンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// タイムアウト秒数を設定（0で無効）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
