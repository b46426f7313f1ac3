//! 文字集合による類似度
//!
//! 記号を除去した文字列を「文字の集合」とみなし、Jaccard係数を返す。
//!
//! 語順も重複も無視する粗い字面の重なりであり、意味的な類似度ではない。
//! アナグラムや、文字種が多いだけで意味の異なる文同士も高く評価される。
//! 特に分かち書きしない言語（中国語・日本語）では、多くの語が共通の文字を
//! 含むため誤って高得点になりやすい。

use regex::Regex;
use std::collections::HashSet;

lazy_static::lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// 単語文字（英数字・アンダースコア）と空白以外を除去
pub fn strip_punctuation(text: &str) -> String {
    NON_WORD.replace_all(text, "").into_owned()
}

fn char_set(text: &str) -> HashSet<char> {
    strip_punctuation(text).chars().collect()
}

/// 2つの文字列の類似度（0.0〜1.0、対称）
///
/// 記号除去後の和集合が空なら0.0。
pub fn score(a: &str, b: &str) -> f64 {
    let set_a = char_set(a);
    let set_b = char_set(b);

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();

    intersection as f64 / union as f64
}
