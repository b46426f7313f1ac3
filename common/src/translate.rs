//! 答え変換
//!
//! 題庫の答え記号（A/B/C/D）を、ページ側の選択肢テキストに変換する。

use crate::types::OptionMapping;

/// 答え記号をインデックスに変換（A→0, B→1, …）
///
/// `A` より前の文字はNone。上限は設けず、範囲外は呼び出し側の対応検索で弾かれる。
pub fn letter_to_index(letter: char) -> Option<usize> {
    (letter as u32)
        .checked_sub('A' as u32)
        .map(|offset| offset as usize)
}

/// インデックスを答え記号に変換（0→A, 1→B, …）
pub fn index_to_letter(index: usize) -> Option<char> {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add('A' as u32))
        .and_then(char::from_u32)
}

/// 題庫の答えをページ側の選択肢テキストに変換
///
/// 対応の中に答えのインデックスを指すものがなければNone。
/// 答えが空欄の場合もNone。
pub fn translate(
    bank_answer: Option<char>,
    scraped_options: &[String],
    mapping: &OptionMapping,
) -> Option<String> {
    let answer_index = letter_to_index(bank_answer?)?;
    let scraped_index = mapping.scraped_index_for(answer_index)?;
    scraped_options.get(scraped_index).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_letter_to_index() {
        assert_eq!(letter_to_index('A'), Some(0));
        assert_eq!(letter_to_index('D'), Some(3));
        assert_eq!(letter_to_index('E'), Some(4));
        assert_eq!(letter_to_index('@'), None);
        assert_eq!(letter_to_index('1'), None);
    }

    #[test]
    fn test_index_to_letter() {
        assert_eq!(index_to_letter(0), Some('A'));
        assert_eq!(index_to_letter(3), Some('D'));
    }

    #[test]
    fn test_translate_reordered() {
        let options = strings(&["Blue", "Green", "Red"]);
        let mapping: OptionMapping = [(0, 1), (1, 2), (2, 0)].into_iter().collect();

        assert_eq!(translate(Some('B'), &options, &mapping), Some("Blue".to_string()));
        assert_eq!(translate(Some('A'), &options, &mapping), Some("Red".to_string()));
        assert_eq!(translate(Some('C'), &options, &mapping), Some("Green".to_string()));
    }

    #[test]
    fn test_translate_answer_index_not_mapped() {
        let options = strings(&["Blue", "Green", "Red"]);
        // 題庫インデックス3（D）を指す対応がない
        let mapping: OptionMapping = [(0, 1), (1, 2), (2, 0)].into_iter().collect();
        assert_eq!(translate(Some('D'), &options, &mapping), None);
    }

    #[test]
    fn test_translate_out_of_range_letter() {
        let options = strings(&["Blue"]);
        let mapping: OptionMapping = [(0, 0)].into_iter().collect();
        assert_eq!(translate(Some('E'), &options, &mapping), None);
    }

    #[test]
    fn test_translate_blank_answer() {
        let options = strings(&["Blue"]);
        let mapping: OptionMapping = [(0, 0)].into_iter().collect();
        assert_eq!(translate(None, &options, &mapping), None);
    }

    #[test]
    fn test_translate_duplicate_targets_uses_first_scraped() {
        let options = strings(&["红方机器人", "红方机器"]);
        let mapping: OptionMapping = [(0, 0), (1, 0)].into_iter().collect();
        assert_eq!(translate(Some('A'), &options, &mapping), Some("红方机器人".to_string()));
    }
}
