//! HTMLページスキャンモジュール
//!
//! 問題ページのマークアップから問題文と選択肢を表示順に抽出する。

use crate::config::SelectorConfig;
use crate::error::{QuizMatchError, Result};
use quiz_match_common::ScrapedQuestion;
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const HTML_EXTENSIONS: &[&str] = &["html", "htm", "HTML", "HTM"];

/// コンパイル済みセレクタ
#[derive(Debug, Clone)]
pub struct PageSelectors {
    question: Selector,
    stem: Selector,
    option: Selector,
    label: Selector,
}

impl PageSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            question: parse_selector(&config.question)?,
            stem: parse_selector(&config.stem)?,
            option: parse_selector(&config.option)?,
            label: parse_selector(&config.label)?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| QuizMatchError::Config(format!("CSSセレクタが不正です ({}): {}", css, e)))
}

/// 1ページ分の抽出結果
#[derive(Debug, Clone)]
pub struct ScannedPage {
    pub path: PathBuf,
    pub questions: Vec<ScrapedQuestion>,
}

/// 対象のHTMLファイルを列挙する
///
/// ファイルならそのまま、フォルダなら直下の .html/.htm をファイル名順で返す。
pub fn collect_pages(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.exists() {
        return Err(QuizMatchError::FileNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(QuizMatchError::FolderNotFound(path.display().to_string()));
    }

    let mut pages: Vec<PathBuf> = WalkDir::new(path)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_html_file(p))
        .collect();

    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pages)
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| HTML_EXTENSIONS.iter().any(|&e| e == ext.to_string_lossy()))
        .unwrap_or(false)
}

/// ファイルまたはフォルダ内の全ページをスキャン
pub fn scan(path: &Path, selectors: &PageSelectors) -> Result<Vec<ScannedPage>> {
    collect_pages(path)?
        .into_iter()
        .map(|page| {
            let questions = scan_page(&page, selectors)?;
            Ok(ScannedPage {
                path: page,
                questions,
            })
        })
        .collect()
}

/// HTMLファイル1つをスキャン
pub fn scan_page(path: &Path, selectors: &PageSelectors) -> Result<Vec<ScrapedQuestion>> {
    if !path.exists() {
        return Err(QuizMatchError::FileNotFound(path.display().to_string()));
    }

    let html = std::fs::read_to_string(path)
        .map_err(|e| QuizMatchError::HtmlParse(format!("{}: {}", path.display(), e)))?;

    let questions = parse_questions(&html, selectors);
    debug!("{}: {}問を抽出", path.display(), questions.len());
    Ok(questions)
}

/// HTML文字列から問題を抽出
///
/// 問題文要素のないブロック、ラベルのない選択肢は読み飛ばす。
pub fn parse_questions(html: &str, selectors: &PageSelectors) -> Vec<ScrapedQuestion> {
    let document = Html::parse_document(html);
    let mut questions = Vec::new();

    for block in document.select(&selectors.question) {
        let Some(stem) = block.select(&selectors.stem).next() else {
            continue;
        };

        let options = block
            .select(&selectors.option)
            .filter_map(|radio| radio.select(&selectors.label).next())
            .map(element_text)
            .collect();

        questions.push(ScrapedQuestion::new(element_text(stem), options));
    }

    questions
}

/// 子孫のテキストをそれぞれtrimして連結
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
