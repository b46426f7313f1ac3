//! コンソール出力
//!
//! 1問ごとに答えを表示し、5問ごとに区切り線を入れる。

use quiz_match_common::{MatchResult, ReconcileStats};
use std::fmt::Write;

const GROUP_SIZE: usize = 5;

/// 照合結果を表示用テキストにする
pub fn render_results(results: &[MatchResult]) -> String {
    let mut out = String::new();

    for (i, result) in results.iter().enumerate() {
        let number = i + 1;
        match result {
            MatchResult::Found {
                translated_answer, ..
            } => {
                let _ = writeln!(out, "問題 {}:", number);
                let _ = writeln!(out, "正解：{}", translated_answer.as_deref().unwrap_or(""));
            }
            MatchResult::Unmatched { scraped_text, .. } => {
                let _ = writeln!(out, "問題 {}：一致なし", number);
                let _ = writeln!(out, "ページの問題：{}", scraped_text);
            }
        }

        if number % GROUP_SIZE == 0 {
            let _ = writeln!(out, "\n{}\n", "=".repeat(50));
        }
    }

    out
}

/// 集計を表示用テキストにする
pub fn render_stats(stats: &ReconcileStats) -> String {
    format!(
        "一致: {}/{}（答え変換不可: {}） 一致なし: {}",
        stats.found, stats.total, stats.untranslated, stats.unmatched
    )
}

pub fn print_results(results: &[MatchResult]) {
    print!("{}", render_results(results));
}
