//! 題庫照合
//!
//! ページ側の1問に対し、題庫から最も類似度の高いレコードを探す。
//! 問題文が似ていても選択肢を1つも対応付けられないレコードは採用しない。

use crate::options::{map_options_with_threshold, OPTION_THRESHOLD};
use crate::similarity;
use crate::types::{BankRecord, OptionMapping, ScrapedQuestion};

/// 問題文一致として採用する最低類似度（以上）
pub const QUESTION_THRESHOLD: f64 = 0.7;

/// 照合の閾値設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSettings {
    /// 問題文の類似度閾値（この値以上で候補）
    pub question_threshold: f64,
    /// 選択肢の類似度閾値（この値を超えると対応）
    pub option_threshold: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            question_threshold: QUESTION_THRESHOLD,
            option_threshold: OPTION_THRESHOLD,
        }
    }
}

/// 照合に成功したレコード
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionMatch<'a> {
    pub record: &'a BankRecord,
    pub score: f64,
    pub mapping: OptionMapping,
}

/// 最適な題庫レコードを探す
///
/// 走査順に依存する貪欲法:
/// - 類似度が現在の最良値を厳密に上回る
/// - 類似度が `threshold` 以上
/// - 選択肢の対応が空でない
///
/// の3条件を満たしたときのみ最良候補を更新する。同点なら先に見つけた方が残る。
pub fn find_match<'a>(
    scraped: &ScrapedQuestion,
    bank: &'a [BankRecord],
    threshold: f64,
) -> Option<QuestionMatch<'a>> {
    find_match_with(
        scraped,
        bank,
        &MatchSettings {
            question_threshold: threshold,
            ..MatchSettings::default()
        },
    )
}

/// 閾値設定を指定して最適な題庫レコードを探す
pub fn find_match_with<'a>(
    scraped: &ScrapedQuestion,
    bank: &'a [BankRecord],
    settings: &MatchSettings,
) -> Option<QuestionMatch<'a>> {
    let mut best: Option<QuestionMatch<'a>> = None;
    let mut best_score = 0.0;

    for record in bank {
        let score = similarity::score(&scraped.text, &record.text);
        if score <= best_score || score < settings.question_threshold {
            continue;
        }

        let mapping =
            map_options_with_threshold(&scraped.options, &record.options, settings.option_threshold);
        if mapping.is_empty() {
            continue;
        }

        best_score = score;
        best = Some(QuestionMatch {
            record,
            score,
            mapping,
        });
    }

    best
}

/// 照合結果を (レコード, 類似度, 対応) のタプルで返す
///
/// `find_match` の値をばらして扱いたい呼び出し側向けの公開API。
/// 見つからなければ (None, 0.0, None)。
pub fn find_match_parts<'a>(
    scraped: &ScrapedQuestion,
    bank: &'a [BankRecord],
    threshold: f64,
) -> (Option<&'a BankRecord>, f64, Option<OptionMapping>) {
    match find_match(scraped, bank, threshold) {
        Some(m) => (Some(m.record), m.score, Some(m.mapping)),
        None => (None, 0.0, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn record(text: &str, options: &[&str], answer: char) -> BankRecord {
        BankRecord::new(text, strings(options), Some(answer))
    }

    #[test]
    fn test_find_match_basic() {
        let scraped = ScrapedQuestion::new("What color is the sky", strings(&["Blue", "Green", "Red"]));
        let bank = vec![
            record("How many legs does a spider have", &["6", "8", "10", "12"], 'B'),
            record("What color is the sky?", &["Red", "Blue", "Green", "Yellow"], 'B'),
        ];

        let m = find_match(&scraped, &bank, QUESTION_THRESHOLD).expect("一致するはず");
        assert_eq!(m.record.text, "What color is the sky?");
        assert!(m.score >= 0.7);
        assert_eq!(m.mapping.get(0), Some(1));
    }

    #[test]
    fn test_find_match_none_below_threshold() {
        let scraped = ScrapedQuestion::new("xyz", strings(&["Blue"]));
        let bank = vec![record("abc", &["Blue"], 'A')];

        assert!(find_match(&scraped, &bank, QUESTION_THRESHOLD).is_none());
        let (rec, score, mapping) = find_match_parts(&scraped, &bank, QUESTION_THRESHOLD);
        assert!(rec.is_none());
        assert_eq!(score, 0.0);
        assert!(mapping.is_none());
    }

    #[test]
    fn test_find_match_rejects_record_without_mappable_options() {
        let scraped = ScrapedQuestion::new("abcdefghij", strings(&["Blue", "Red"]));
        let bank = vec![
            // 問題文は完全一致だが選択肢が対応しない
            record("abcdefghij", &["xxx", "yyy"], 'A'),
            // 類似度は低いが選択肢が対応する
            record("abcdefghi", &["Red", "Blue"], 'B'),
        ];

        let m = find_match(&scraped, &bank, QUESTION_THRESHOLD).expect("2件目が採用されるはず");
        assert_eq!(m.record.text, "abcdefghi");
        assert!(m.score < 1.0);
    }

    #[test]
    fn test_find_match_first_seen_wins_ties() {
        let scraped = ScrapedQuestion::new("sky color", strings(&["Blue"]));
        let bank = vec![
            record("color sky", &["Blue"], 'A'),
            record("sky color", &["Blue"], 'A'),
        ];

        let m = find_match(&scraped, &bank, QUESTION_THRESHOLD).unwrap();
        assert_eq!(m.record.text, "color sky");
    }

    #[test]
    fn test_find_match_threshold_is_inclusive() {
        // {a,b,c,d,e,f,g} vs {a,b,c,d,e,f,g,h,i,j} → 0.7
        let scraped = ScrapedQuestion::new("abcdefg", strings(&["Blue"]));
        let bank = vec![record("abcdefghij", &["Blue"], 'A')];

        let m = find_match(&scraped, &bank, 0.7).expect("0.7ちょうどは採用");
        assert!((m.score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_find_match_later_higher_score_replaces() {
        let scraped = ScrapedQuestion::new("abcdefghij", strings(&["Blue"]));
        let bank = vec![
            record("abcdefghi", &["Blue"], 'A'),
            record("abcdefghij", &["Blue"], 'B'),
        ];

        let m = find_match(&scraped, &bank, QUESTION_THRESHOLD).unwrap();
        assert_eq!(m.record.answer, Some('B'));
        assert!((m.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_match_empty_bank() {
        let scraped = ScrapedQuestion::new("abc", strings(&["Blue"]));
        assert!(find_match(&scraped, &[], QUESTION_THRESHOLD).is_none());
    }
}
