//! 題庫シートの列レイアウト
//!
//! 題庫の読み込みと未一致問題の追記で同じ列名を使う。

use serde::{Deserialize, Serialize};

/// 1レコードあたりの選択肢数
pub const OPTION_COUNT: usize = 4;

pub const DEFAULT_QUESTION_COLUMN: &str = "题面";
pub const DEFAULT_OPTION_COLUMNS: [&str; OPTION_COUNT] = ["选项1", "选项2", "选项3", "选项4"];
pub const DEFAULT_ANSWER_COLUMN: &str = "答案";

/// 題庫の列名設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankLayout {
    /// 読み込むシート名（Noneなら先頭シート）
    pub sheet: Option<String>,
    pub question_column: String,
    pub option_columns: [String; OPTION_COUNT],
    pub answer_column: String,
}

impl Default for BankLayout {
    fn default() -> Self {
        Self {
            sheet: None,
            question_column: DEFAULT_QUESTION_COLUMN.to_string(),
            option_columns: DEFAULT_OPTION_COLUMNS.map(String::from),
            answer_column: DEFAULT_ANSWER_COLUMN.to_string(),
        }
    }
}

impl BankLayout {
    /// ヘッダー行（題面, 選択肢1〜4, 答え）
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.question_column.as_str())
            .chain(self.option_columns.iter().map(String::as_str))
            .chain(std::iter::once(self.answer_column.as_str()))
            .collect()
    }

    /// 1行分のセル値をヘッダー順に並べる（選択肢は4つに切り詰め・補完）
    pub fn row_cells(&self, question: &str, options: &[String], answer: &str) -> Vec<String> {
        let mut cells = Vec::with_capacity(OPTION_COUNT + 2);
        cells.push(question.to_string());
        for i in 0..OPTION_COUNT {
            cells.push(options.get(i).cloned().unwrap_or_default());
        }
        cells.push(answer.to_string());
        cells
    }
}
