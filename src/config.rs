use crate::error::{QuizMatchError, Result};
use quiz_match_common::{BankLayout, MatchSettings, RowPolicy, OPTION_THRESHOLD, QUESTION_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ページ解析に使うCSSセレクタ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectorConfig {
    /// 問題ブロック
    pub question: String,
    /// 問題文（問題ブロック内）
    pub stem: String,
    /// 選択肢ブロック（問題ブロック内）
    pub option: String,
    /// 選択肢ラベル（選択肢ブロック内）
    pub label: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            question: r#"div.field.ui-field-contain[type="3"]"#.into(),
            stem: "div.topichtml".into(),
            option: "div.ui-radio".into(),
            label: "div.label".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub question_threshold: f64,
    pub option_threshold: f64,
    pub layout: BankLayout,
    pub selectors: SelectorConfig,
    pub row_policy: RowPolicy,
    /// 未一致問題の追記先（Noneなら題庫の隣）
    pub unmatched_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_threshold: QUESTION_THRESHOLD,
            option_threshold: OPTION_THRESHOLD,
            layout: BankLayout::default(),
            selectors: SelectorConfig::default(),
            row_policy: RowPolicy::default(),
            unmatched_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| QuizMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("quiz-match").join("config.json"))
    }

    /// 閾値が0.0〜1.0に収まっているか確認
    pub fn validate(&self) -> Result<()> {
        check_threshold("questionThreshold", self.question_threshold)?;
        check_threshold("optionThreshold", self.option_threshold)?;
        Ok(())
    }

    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            question_threshold: self.question_threshold,
            option_threshold: self.option_threshold,
        }
    }

    pub fn set_question_threshold(&mut self, value: f64) -> Result<()> {
        check_threshold("questionThreshold", value)?;
        self.question_threshold = value;
        self.save()
    }

    pub fn set_option_threshold(&mut self, value: f64) -> Result<()> {
        check_threshold("optionThreshold", value)?;
        self.option_threshold = value;
        self.save()
    }

    pub fn set_unmatched_path(&mut self, path: PathBuf) -> Result<()> {
        self.unmatched_path = Some(path);
        self.save()
    }
}

pub fn check_threshold(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(QuizMatchError::Config(format!(
            "{} は0.0〜1.0で指定してください: {}",
            name, value
        )))
    }
}
