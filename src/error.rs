use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("HTML解析エラー: {0}")]
    HtmlParse(String),

    #[error("題庫読み込みエラー: {0}")]
    BankLoad(String),

    #[error("題庫に列がありません: {0}")]
    MissingColumn(String),

    #[error("題庫の{row}行目が不正: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("題庫が空です: {0}")]
    EmptyBank(String),

    #[error("問題が見つかりません: {0}")]
    NoQuestionsFound(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quiz_match_common::Error> for QuizMatchError {
    fn from(err: quiz_match_common::Error) -> Self {
        match err {
            quiz_match_common::Error::MalformedRow { row, reason } => {
                QuizMatchError::MalformedRow { row, reason }
            }
            quiz_match_common::Error::Excel(message) => QuizMatchError::ExcelGeneration(message),
        }
    }
}

impl From<calamine::Error> for QuizMatchError {
    fn from(err: calamine::Error) -> Self {
        QuizMatchError::BankLoad(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuizMatchError>;
