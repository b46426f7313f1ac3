//! 選択肢の対応付け
//!
//! ページ側の各選択肢について、題庫側で最も類似度の高い選択肢を探す。
//! 選択肢ごとに独立して最大化するため、一意性は保証しない。

use crate::similarity;
use crate::types::OptionMapping;

/// 対応として採用する最低類似度（これを超える必要がある）
pub const OPTION_THRESHOLD: f64 = 0.5;

/// デフォルト閾値で選択肢を対応付け
pub fn map_options(scraped_options: &[String], bank_options: &[String]) -> OptionMapping {
    map_options_with_threshold(scraped_options, bank_options, OPTION_THRESHOLD)
}

/// 選択肢を対応付け
///
/// 同点の場合は題庫側の先頭に近いものを採用する。
/// 最大類似度が `threshold` を超えない選択肢は対応に含めない。
pub fn map_options_with_threshold(
    scraped_options: &[String],
    bank_options: &[String],
    threshold: f64,
) -> OptionMapping {
    let mut mapping = OptionMapping::new();

    for (i, scraped) in scraped_options.iter().enumerate() {
        if let Some((j, best)) = best_bank_option(scraped, bank_options) {
            if best > threshold {
                mapping.insert(i, j);
            }
        }
    }

    mapping
}

/// 最も類似度の高い題庫側選択肢（インデックス, 類似度）
fn best_bank_option(scraped: &str, bank_options: &[String]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (j, bank) in bank_options.iter().enumerate() {
        let sim = similarity::score(scraped, bank);
        match best {
            Some((_, best_sim)) if sim <= best_sim => {}
            _ => best = Some((j, sim)),
        }
    }

    best
}
