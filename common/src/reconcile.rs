//! 一括照合
//!
//! ページ側の全問題について照合・答え変換を行い、結果を順に集める。
//! 入力はすべて読み取り専用で、問題ごとの処理は互いに独立している。

use crate::matcher::{find_match_with, MatchSettings};
use crate::translate::translate;
use crate::types::{BankRecord, MatchResult, ScrapedQuestion, UnmatchedQuestion};

/// デフォルト閾値で一括照合
pub fn reconcile(scraped_questions: &[ScrapedQuestion], bank: &[BankRecord]) -> Vec<MatchResult> {
    reconcile_with(scraped_questions, bank, &MatchSettings::default())
}

/// 閾値設定を指定して一括照合
///
/// 題庫が空なら照合せずに空の結果を返す。
pub fn reconcile_with(
    scraped_questions: &[ScrapedQuestion],
    bank: &[BankRecord],
    settings: &MatchSettings,
) -> Vec<MatchResult> {
    if bank.is_empty() {
        return Vec::new();
    }

    scraped_questions
        .iter()
        .map(|question| reconcile_one(question, bank, settings))
        .collect()
}

fn reconcile_one(
    question: &ScrapedQuestion,
    bank: &[BankRecord],
    settings: &MatchSettings,
) -> MatchResult {
    match find_match_with(question, bank, settings) {
        Some(m) if !m.mapping.is_empty() => {
            let translated_answer = translate(m.record.answer, &question.options, &m.mapping);
            MatchResult::Found {
                scraped_text: question.text.clone(),
                matched_bank_text: m.record.text.clone(),
                bank_answer: m.record.answer,
                translated_answer,
                score: m.score,
                mapping: m.mapping,
            }
        }
        _ => MatchResult::Unmatched {
            scraped_text: question.text.clone(),
            scraped_options: question.options.clone(),
        },
    }
}

/// 追跡シートへ追記する未一致問題を取り出す
pub fn unmatched_questions(results: &[MatchResult]) -> Vec<UnmatchedQuestion> {
    results
        .iter()
        .filter_map(|result| match result {
            MatchResult::Unmatched {
                scraped_text,
                scraped_options,
            } => Some(UnmatchedQuestion {
                question: scraped_text.clone(),
                options: scraped_options.clone(),
                answer: String::new(),
            }),
            MatchResult::Found { .. } => None,
        })
        .collect()
}

/// 照合結果の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub total: usize,
    pub found: usize,
    /// 一致したが答えを変換できなかった件数（foundに含まれる）
    pub untranslated: usize,
    pub unmatched: usize,
}

impl ReconcileStats {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            if result.is_found() {
                stats.found += 1;
                if result.is_untranslated() {
                    stats.untranslated += 1;
                }
            } else {
                stats.unmatched += 1;
            }
        }
        stats
    }
}
