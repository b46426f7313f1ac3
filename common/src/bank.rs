//! 題庫行の検証
//!
//! スプレッドシートから読んだセル文字列を BankRecord に変換する。
//! 不正な行の扱いは RowPolicy で明示する。

use crate::error::{Error, Result};
use crate::layout::OPTION_COUNT;
use crate::types::BankRecord;
use serde::{Deserialize, Serialize};

/// 不正な行の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// 報告して読み飛ばす
    #[default]
    Skip,
    /// 読み込み全体を中止する
    Abort,
}

impl std::str::FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(RowPolicy::Skip),
            "abort" => Ok(RowPolicy::Abort),
            _ => Err(format!("Unknown row policy: {}. Use skip or abort", s)),
        }
    }
}

impl std::fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowPolicy::Skip => write!(f, "skip"),
            RowPolicy::Abort => write!(f, "abort"),
        }
    }
}

/// 読み飛ばした行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// シート上の行番号（1始まり、ヘッダーを含む）
    pub row: usize,
    pub reason: String,
}

/// 答えセルを解釈する
///
/// 空欄はNone、英字1文字は大文字化、それ以外はエラー理由を返す。
pub fn parse_answer(cell: &str) -> std::result::Result<Option<char>, String> {
    let trimmed = cell.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(Some(c.to_ascii_uppercase())),
        _ => Err(format!("答えが英字1文字ではありません: {:?}", trimmed)),
    }
}

/// 1行分のセルから BankRecord を作る
///
/// `row` はエラー報告用の行番号。
pub fn build_record(
    row: usize,
    question: &str,
    options: &[String],
    answer: &str,
) -> Result<BankRecord> {
    let question = question.trim();
    if question.is_empty() {
        return Err(Error::MalformedRow {
            row,
            reason: "問題文が空です".to_string(),
        });
    }

    let answer = parse_answer(answer).map_err(|reason| Error::MalformedRow { row, reason })?;

    let options = (0..OPTION_COUNT)
        .map(|i| options.get(i).map(|o| o.trim().to_string()).unwrap_or_default())
        .collect();

    Ok(BankRecord::new(question, options, answer))
}

/// 行の検証結果をポリシーに従って振り分ける
///
/// Skipなら不正行を `skipped` に記録してNone、Abortならエラーを返す。
pub fn apply_policy(
    policy: RowPolicy,
    result: Result<BankRecord>,
    skipped: &mut Vec<SkippedRow>,
) -> Result<Option<BankRecord>> {
    match (result, policy) {
        (Ok(record), _) => Ok(Some(record)),
        (Err(Error::MalformedRow { row, reason }), RowPolicy::Skip) => {
            skipped.push(SkippedRow { row, reason });
            Ok(None)
        }
        (Err(e), _) => Err(e),
    }
}
