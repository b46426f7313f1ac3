//! Excel生成（共通ライブラリ）
//!
//! 未一致問題の追跡シートと照合レポートをバッファに生成する。

use crate::error::{Error, Result};
use crate::translate::index_to_letter;
use crate::types::MatchResult;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

/// セルの値（既存シートを書き戻すときに型を保つ）
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    /// 前後の空白も含めてそのまま保持
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excelのシリアル値
    DateTime(f64),
}

impl CellValue {
    /// 比較用のテキスト（前後の空白を除去、数値は末尾の .0 なし）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) | CellValue::DateTime(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

/// 1シート分のセル
///
/// `rows` は `origin`（0始まりの行・列）を左上とする相対位置。
/// 読み込んだシートの使用範囲が A1 から始まらない場合も元の位置に書き戻せる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub origin: (u32, u16),
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    /// A1 を左上とするシート
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            origin: (0, 0),
            rows,
        }
    }
}

/// レポートの列見出し
pub const REPORT_HEADER: [&str; 7] = [
    "番号",
    "ページの問題",
    "題庫の問題",
    "題庫の答え",
    "回答",
    "類似度",
    "選択肢対応",
];

const REPORT_COL_WIDTHS: [f64; 7] = [6.0, 48.0, 48.0, 10.0, 30.0, 8.0, 24.0];

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA))
}

fn xlsx_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Excel(format!("{}: {}", context, e))
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    header: Option<&Format>,
    date: &Format,
) -> Result<()> {
    let written = match value {
        CellValue::Empty => Ok(()),
        CellValue::Text(s) if s.is_empty() => Ok(()),
        CellValue::Text(s) => match header {
            Some(format) => worksheet.write_string_with_format(row, col, s, format).map(|_| ()),
            None => worksheet.write_string(row, col, s).map(|_| ()),
        },
        CellValue::Number(n) => worksheet.write_number(row, col, *n).map(|_| ()),
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b).map(|_| ()),
        CellValue::DateTime(n) => worksheet.write_number_with_format(row, col, *n, date).map(|_| ()),
    };
    written.map_err(xlsx_err("セル書き込みエラー"))
}

/// シート群を書き出す（各シートの先頭行の文字列は見出しとして太字）
pub fn generate_sheets_buffer(sheets: &[SheetData]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = header_format();
    let date = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(xlsx_err("シート名設定エラー"))?;

        let (row0, col0) = sheet.origin;
        for (r, cells) in sheet.rows.iter().enumerate() {
            let row = u32::try_from(r)
                .ok()
                .and_then(|r| r.checked_add(row0))
                .ok_or_else(|| Error::Excel("行数が多すぎます".to_string()))?;
            let format = (r == 0).then_some(&header);

            for (c, value) in cells.iter().enumerate() {
                let col = u16::try_from(c)
                    .ok()
                    .and_then(|c| c.checked_add(col0))
                    .ok_or_else(|| Error::Excel("列数が多すぎます".to_string()))?;
                write_cell(worksheet, row, col, value, format, &date)?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(xlsx_err("Excel保存エラー"))
}

/// 対応を "1→B, 2→C" の形に整形（ページ側は1始まり、題庫側は記号）
pub fn format_mapping(result: &MatchResult) -> String {
    match result {
        MatchResult::Found { mapping, .. } => mapping
            .iter()
            .map(|(s, b)| {
                let letter = index_to_letter(b).map(String::from).unwrap_or_default();
                format!("{}→{}", s + 1, letter)
            })
            .collect::<Vec<_>>()
            .join(", "),
        MatchResult::Unmatched { .. } => String::new(),
    }
}

/// 照合レポートを生成
pub fn generate_report_buffer(results: &[MatchResult]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = header_format();
    let wrap = Format::new().set_text_wrap().set_align(FormatAlign::VerticalCenter);
    let score_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("照合結果")
        .map_err(xlsx_err("シート名設定エラー"))?;

    for (c, (title, width)) in REPORT_HEADER.iter().zip(REPORT_COL_WIDTHS).enumerate() {
        let c = c as u16;
        worksheet
            .set_column_width(c, width)
            .map_err(xlsx_err("列幅設定エラー"))?;
        worksheet
            .write_string_with_format(0, c, *title, &header)
            .map_err(xlsx_err("見出し書き込みエラー"))?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = u32::try_from(i + 1).map_err(|_| Error::Excel("行数が多すぎます".to_string()))?;

        worksheet
            .write_number(row, 0, (i + 1) as f64)
            .map_err(xlsx_err("番号書き込みエラー"))?;
        worksheet
            .write_string_with_format(row, 1, result.scraped_text(), &wrap)
            .map_err(xlsx_err("問題書き込みエラー"))?;

        if let MatchResult::Found {
            matched_bank_text,
            bank_answer,
            translated_answer,
            score,
            ..
        } = result
        {
            let answer_letter = bank_answer.map(String::from).unwrap_or_default();
            worksheet
                .write_string_with_format(row, 2, matched_bank_text, &wrap)
                .map_err(xlsx_err("題庫問題書き込みエラー"))?;
            worksheet
                .write_string(row, 3, &answer_letter)
                .map_err(xlsx_err("答え書き込みエラー"))?;
            worksheet
                .write_string_with_format(row, 4, translated_answer.as_deref().unwrap_or(""), &wrap)
                .map_err(xlsx_err("回答書き込みエラー"))?;
            worksheet
                .write_number_with_format(row, 5, *score, &score_format)
                .map_err(xlsx_err("類似度書き込みエラー"))?;
            worksheet
                .write_string(row, 6, &format_mapping(result))
                .map_err(xlsx_err("対応書き込みエラー"))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(xlsx_err("Excel保存エラー"))
}
