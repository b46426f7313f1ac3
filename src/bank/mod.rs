//! 題庫読み込みモジュール
//!
//! スプレッドシート（xlsx/xls/ods）を calamine で読み込み、
//! ヘッダー行の列名で題面・選択肢・答えの列を特定する。

use crate::error::{QuizMatchError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use quiz_match_common::bank::{apply_policy, build_record};
use quiz_match_common::export::excel_core::{CellValue, SheetData};
use quiz_match_common::{BankLayout, BankRecord, RowPolicy, SkippedRow, OPTION_COUNT};
use std::path::Path;
use tracing::{debug, warn};

/// 題庫の読み込み結果
#[derive(Debug, Clone)]
pub struct BankLoad {
    pub records: Vec<BankRecord>,
    /// 読み飛ばした不正行（RowPolicy::Skip のとき）
    pub skipped: Vec<SkippedRow>,
    /// ヘッダー行の列名
    pub columns: Vec<String>,
    pub sheet: String,
}

/// 題面・選択肢・答えの列位置
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnIndex {
    question: usize,
    options: [usize; OPTION_COUNT],
    answer: usize,
}

impl ColumnIndex {
    fn resolve(header: &[String], layout: &BankLayout) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| QuizMatchError::MissingColumn(name.to_string()))
        };

        let mut options = [0; OPTION_COUNT];
        for (slot, name) in options.iter_mut().zip(layout.option_columns.iter()) {
            *slot = find(name.as_str())?;
        }

        Ok(Self {
            question: find(layout.question_column.as_str())?,
            options,
            answer: find(layout.answer_column.as_str())?,
        })
    }
}

/// セルを文字列に変換（空セルは空文字列、前後の空白を除去）
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// セルを型を保ったまま CellValue に変換（文字列は前後の空白も保持）
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// 題庫ファイルを読み込む
pub fn load_bank(path: &Path, layout: &BankLayout, policy: RowPolicy) -> Result<BankLoad> {
    if !path.exists() {
        return Err(QuizMatchError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let sheet = match &layout.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| QuizMatchError::BankLoad(format!("シートがありません: {}", path.display())))?,
    };
    let range = workbook.worksheet_range(&sheet)?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    // 使用範囲の先頭行（0始まり）がヘッダー
    let header_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    let load = parse_rows(&rows, layout, policy, &sheet, header_row)?;
    debug!(
        "題庫 {} ({}): {}件読み込み, {}件スキップ",
        path.display(),
        sheet,
        load.records.len(),
        load.skipped.len()
    );
    Ok(load)
}

/// 文字列化済みの行（先頭がヘッダー）から題庫を組み立てる
///
/// `header_row` はヘッダーのシート上の行番号（1始まり）。エラー報告に使う。
pub fn parse_rows(
    rows: &[Vec<String>],
    layout: &BankLayout,
    policy: RowPolicy,
    sheet: &str,
    header_row: usize,
) -> Result<BankLoad> {
    let Some((header, body)) = rows.split_first() else {
        return Err(QuizMatchError::BankLoad(format!("シート {} にヘッダー行がありません", sheet)));
    };
    let columns = ColumnIndex::resolve(header, layout)?;

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (i, row) in body.iter().enumerate() {
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let row_number = header_row + 1 + i;
        let get = |index: usize| row.get(index).cloned().unwrap_or_default();

        let options: Vec<String> = columns.options.iter().map(|&c| get(c)).collect();
        let result = build_record(row_number, &get(columns.question), &options, &get(columns.answer));

        if let Some(record) = apply_policy(policy, result, &mut skipped)? {
            if let Some(letter) = record.answer {
                if !('A'..='D').contains(&letter) {
                    warn!("題庫の{}行目: 答え {} はA〜Dの範囲外です", row_number, letter);
                }
            }
            records.push(record);
        }
    }

    for skip in &skipped {
        warn!("題庫の{}行目をスキップ: {}", skip.row, skip.reason);
    }

    Ok(BankLoad {
        records,
        skipped,
        columns: header.clone(),
        sheet: sheet.to_string(),
    })
}

/// ワークブックの全シートを読み込む（追記時の既存行保持用）
///
/// セルの型と使用範囲の位置を保つので、そのまま書き戻せる。
pub fn read_all_sheets(path: &Path) -> Result<Vec<SheetData>> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let origin = match range.start() {
            Some((row, col)) => {
                let col = u16::try_from(col)
                    .map_err(|_| QuizMatchError::BankLoad(format!("列位置が不正です: {}", name)))?;
                (row, col)
            }
            None => (0, 0),
        };
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_value).collect())
            .collect();
        sheets.push(SheetData { name, origin, rows });
    }
    Ok(sheets)
}
