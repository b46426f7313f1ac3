//! 照合データの型定義
//!
//! CLIとライブラリで共有される型:
//! - ScrapedQuestion: HTMLページから抽出した問題
//! - BankRecord: 題庫（スプレッドシート）の1行
//! - OptionMapping: ページ側選択肢 → 題庫側選択肢の対応
//! - MatchResult: 1問ごとの照合結果

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ページから抽出した問題（選択肢は表示順）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapedQuestion {
    pub text: String,
    pub options: Vec<String>,
}

impl ScrapedQuestion {
    pub fn new(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

/// 題庫の1レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecord {
    pub text: String,

    /// 題庫側の正規順
    #[serde(default)]
    pub options: Vec<String>,

    /// 大文字の答え記号（空欄ならNone）
    #[serde(default)]
    pub answer: Option<char>,
}

impl BankRecord {
    pub fn new(text: impl Into<String>, options: Vec<String>, answer: Option<char>) -> Self {
        Self {
            text: text.into(),
            options,
            answer,
        }
    }
}

/// 選択肢の対応（ページ側インデックス → 題庫側インデックス）
///
/// 部分関数であり、全選択肢が対応するとは限らない。
/// 複数のページ側選択肢が同じ題庫側インデックスを指すこともある。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMapping(BTreeMap<usize, usize>);

impl OptionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scraped_index: usize, bank_index: usize) {
        self.0.insert(scraped_index, bank_index);
    }

    pub fn get(&self, scraped_index: usize) -> Option<usize> {
        self.0.get(&scraped_index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// ページ側インデックス順に走査
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(&s, &b)| (s, b))
    }

    /// 指定の題庫側インデックスを指す最初のページ側インデックス
    pub fn scraped_index_for(&self, bank_index: usize) -> Option<usize> {
        self.iter()
            .find(|&(_, b)| b == bank_index)
            .map(|(s, _)| s)
    }
}

impl FromIterator<(usize, usize)> for OptionMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 1問分の照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MatchResult {
    #[serde(rename_all = "camelCase")]
    Found {
        scraped_text: String,
        matched_bank_text: String,
        bank_answer: Option<char>,
        /// 変換できなかった場合はNone（空欄として表示）
        translated_answer: Option<String>,
        score: f64,
        mapping: OptionMapping,
    },
    #[serde(rename_all = "camelCase")]
    Unmatched {
        scraped_text: String,
        scraped_options: Vec<String>,
    },
}

impl MatchResult {
    pub fn scraped_text(&self) -> &str {
        match self {
            MatchResult::Found { scraped_text, .. } | MatchResult::Unmatched { scraped_text, .. } => {
                scraped_text
            }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }

    /// 一致したが答えを変換できなかった
    pub fn is_untranslated(&self) -> bool {
        matches!(
            self,
            MatchResult::Found {
                translated_answer: None,
                ..
            }
        )
    }
}

/// 追跡シートへ追記する未一致問題
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// 手動補完用に常に空
    #[serde(default)]
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_scraped_index_for_returns_lowest_scraped_index() {
        let mapping: OptionMapping = [(2, 1), (0, 3), (1, 1)].into_iter().collect();
        assert_eq!(mapping.scraped_index_for(1), Some(1));
        assert_eq!(mapping.scraped_index_for(3), Some(0));
        assert_eq!(mapping.scraped_index_for(0), None);
    }

    #[test]
    fn test_mapping_serializes_as_object() {
        let mapping: OptionMapping = [(0, 1), (1, 2)].into_iter().collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"0":1,"1":2}"#);
    }

    #[test]
    fn test_match_result_tagged_json() {
        let result = MatchResult::Unmatched {
            scraped_text: "問題".to_string(),
            scraped_options: vec!["A".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "unmatched");
        assert_eq!(json["scrapedText"], "問題");
    }

    #[test]
    fn test_untranslated_flag() {
        let found = MatchResult::Found {
            scraped_text: "q".into(),
            matched_bank_text: "q".into(),
            bank_answer: Some('E'),
            translated_answer: None,
            score: 1.0,
            mapping: OptionMapping::new(),
        };
        assert!(found.is_found());
        assert!(found.is_untranslated());
        assert_eq!(found.scraped_text(), "q");
    }
}
