//! 照合パイプラインの統合テスト
//!
//! HTML → 抽出 → 題庫と照合 → 答え変換 までを通しで検証

use quiz_match::config::SelectorConfig;
use quiz_match::scanner::{parse_questions, PageSelectors};
use quiz_match_common::{
    find_match_parts, reconcile, reconcile_with, unmatched_questions, BankRecord, MatchResult, MatchSettings,
    ReconcileStats,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn page(blocks: &[(&str, &[&str])]) -> String {
    let mut html = String::from("<html><body>");
    for (stem, options) in blocks {
        html.push_str(r#"<div class="field ui-field-contain" type="3">"#);
        html.push_str(&format!(r#"<div class="topichtml">{}</div>"#, stem));
        for (i, option) in options.iter().enumerate() {
            html.push_str(&format!(
                r#"<div class="ui-radio"><input type="radio" value="{}"><div class="label">{}</div></div>"#,
                i + 1,
                option
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</body></html>");
    html
}

fn bank() -> Vec<BankRecord> {
    vec![
        BankRecord::new("What color is the sky", strings(&["Red", "Blue", "Green"]), Some('B')),
        BankRecord::new("比赛中红方基地的初始血量是多少", strings(&["1000", "1500", "2000", "2500"]), Some('C')),
        BankRecord::new("机器人最大重量", strings(&["20kg", "25kg", "", ""]), Some('D')),
    ]
}

#[test]
fn test_page_to_answers() {
    let html = page(&[
        ("What color is the sky?", &["Blue", "Green", "Red"]),
        ("比赛中红方基地的初始血量是多少？", &["2500", "2000", "1500", "1000"]),
        ("Completely unrelated xyz", &["1", "2"]),
    ]);
    let selectors = PageSelectors::compile(&SelectorConfig::default()).unwrap();
    let questions = parse_questions(&html, &selectors);
    assert_eq!(questions.len(), 3);

    let results = reconcile(&questions, &bank());
    assert_eq!(results.len(), 3);

    match &results[0] {
        MatchResult::Found {
            translated_answer,
            bank_answer,
            ..
        } => {
            assert_eq!(*bank_answer, Some('B'));
            assert_eq!(translated_answer.as_deref(), Some("Blue"));
        }
        other => panic!("一致するはず: {:?}", other),
    }

    match &results[1] {
        MatchResult::Found { translated_answer, .. } => {
            assert_eq!(translated_answer.as_deref(), Some("2000"));
        }
        other => panic!("一致するはず: {:?}", other),
    }

    assert!(matches!(results[2], MatchResult::Unmatched { .. }));
}

#[test]
fn test_answer_outside_options_is_blank() {
    let questions = vec![quiz_match_common::ScrapedQuestion::new(
        "机器人最大重量",
        strings(&["20kg", "25kg"]),
    )];
    let results = reconcile(&questions, &bank());

    assert!(results[0].is_found());
    assert!(results[0].is_untranslated());

    let stats = ReconcileStats::from_results(&results);
    assert_eq!(stats.found, 1);
    assert_eq!(stats.untranslated, 1);
}

#[test]
fn test_stricter_threshold_leaves_unmatched() {
    let questions = vec![quiz_match_common::ScrapedQuestion::new(
        "What colour is sky today",
        strings(&["Blue", "Red"]),
    )];

    let loose = reconcile(&questions, &bank());
    assert!(loose[0].is_found());

    let strict = MatchSettings {
        question_threshold: 0.99,
        ..Default::default()
    };
    let results = reconcile_with(&questions, &bank(), &strict);
    assert!(!results[0].is_found());

    let pending = unmatched_questions(&results);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].question, "What colour is sky today");
    assert_eq!(pending[0].options, strings(&["Blue", "Red"]));
    assert!(pending[0].answer.is_empty());
}

#[test]
fn test_empty_bank_yields_nothing() {
    let html = page(&[("What color is the sky?", &["Blue"])]);
    let selectors = PageSelectors::compile(&SelectorConfig::default()).unwrap();
    let questions = parse_questions(&html, &selectors);

    assert!(reconcile(&questions, &[]).is_empty());
}

#[test]
fn test_results_json_shape() {
    let questions = vec![quiz_match_common::ScrapedQuestion::new(
        "What color is the sky",
        strings(&["Blue", "Green", "Red"]),
    )];
    let results = reconcile(&questions, &bank());
    let json: serde_json::Value = serde_json::to_value(&results).unwrap();

    assert_eq!(json[0]["status"], "found");
    assert_eq!(json[0]["translatedAnswer"], "Blue");
    assert_eq!(json[0]["bankAnswer"], "B");
}

#[test]
fn test_find_match_parts_tuple() {
    let scraped = quiz_match_common::ScrapedQuestion::new(
        "What color is the sky?",
        strings(&["Green", "Blue"]),
    );
    let bank = bank();

    let (record, score, mapping) = find_match_parts(&scraped, &bank, 0.7);
    assert_eq!(record.map(|r| r.text.as_str()), Some("What color is the sky"));
    assert!((score - 1.0).abs() < f64::EPSILON);
    let mapping = mapping.unwrap();
    assert_eq!(mapping.get(0), Some(2));
    assert_eq!(mapping.get(1), Some(1));

    let unrelated = quiz_match_common::ScrapedQuestion::new("zzz", strings(&["q"]));
    assert_eq!(find_match_parts(&unrelated, &bank, 0.7), (None, 0.0, None));
}
