//! Quiz Match Common Library
//!
//! ページから抽出した問題と題庫レコードを照合するコア。
//! ファイルやネットワークには触れず、プレーンなデータ構造だけを扱う。
//!
//! 処理の流れ:
//! 1. `reconcile` がページ側の問題を順に処理
//! 2. `matcher` が題庫から最適なレコードを探す（`similarity` + `options`）
//! 3. `translate` が題庫の答え記号をページ側の選択肢テキストに変換

pub mod types;
pub mod layout;
pub mod error;
pub mod bank;
pub mod similarity;
pub mod options;
pub mod matcher;
pub mod translate;
pub mod reconcile;
pub mod export;

pub use types::{BankRecord, MatchResult, OptionMapping, ScrapedQuestion, UnmatchedQuestion};
pub use layout::{BankLayout, OPTION_COUNT};
pub use error::{Error, Result};
pub use bank::{RowPolicy, SkippedRow};
pub use options::{map_options, map_options_with_threshold, OPTION_THRESHOLD};
pub use matcher::{find_match, find_match_parts, find_match_with, MatchSettings, QuestionMatch, QUESTION_THRESHOLD};
pub use translate::{letter_to_index, translate};
pub use reconcile::{reconcile, reconcile_with, unmatched_questions, ReconcileStats};
