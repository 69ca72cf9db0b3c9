//! Slip Reader CLI
//!
//! 送金スリップ画像を抽出サーバーへ送り、結果を表示・台帳出力する。

pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod extractor;
pub mod export;
