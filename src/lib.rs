//! # quiz-match
//!
//! 問題ページ（HTML）から抽出した問題を題庫（スプレッドシート）と照合し、
//! 題庫の答え記号をページ上の選択肢テキストに変換する。
//!
//! 照合ロジック本体は `quiz_match_common` にあり、このクレートは
//! ページのスキャン・題庫の読み込み・出力・CLIを担当する。

pub mod bank;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod scanner;

pub use config::Config;
pub use error::{QuizMatchError, Result};
