//! Excel出力（CLI版）
//!
//! - 未一致問題を追跡シートへ追記（既存行はすべて保持）
//! - 照合レポートの生成

use crate::bank::read_all_sheets;
use crate::error::Result;
use quiz_match_common::export::excel_core::{
    generate_report_buffer, generate_sheets_buffer, CellValue, SheetData,
};
use quiz_match_common::{BankLayout, MatchResult, UnmatchedQuestion};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// 追記結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendSummary {
    pub path: PathBuf,
    /// 追記前の先頭シートの本文行数（ヘッダー除く）
    pub existing_rows: usize,
    pub appended: usize,
    /// 追記前からシートに同じ問題文があり追記しなかった件数
    pub duplicates: usize,
}

/// 未一致問題を追跡シートへ追記する
///
/// 既存のワークブックは全シートをセルの型・位置ごと読み込んで書き直すため、
/// 既存行は失われない（書式は保持しない）。
/// 重複判定は追記前からシートにある問題文だけが対象で、同じ回の中の重複はそのまま追記する。
/// 追記するものがなければファイルには触れない。
pub fn append_unmatched(
    path: &Path,
    unmatched: &[UnmatchedQuestion],
    layout: &BankLayout,
) -> Result<AppendSummary> {
    let mut sheets: Vec<SheetData> = if path.exists() {
        read_all_sheets(path)?
    } else {
        Vec::new()
    };

    if sheets.is_empty() {
        sheets.push(SheetData::new(DEFAULT_SHEET_NAME, Vec::new()));
    }

    let first = &mut sheets[0];
    if first.rows.is_empty() {
        first.rows.push(layout.header().into_iter().map(CellValue::from).collect());
    }
    let header: Vec<String> = first.rows[0].iter().map(CellValue::as_text).collect();
    let existing_rows = first.rows.len() - 1;

    let known: HashSet<String> = match header.iter().position(|h| h == &layout.question_column) {
        Some(col) => first
            .rows
            .iter()
            .skip(1)
            .filter_map(|row| row.get(col).map(CellValue::as_text))
            .filter(|q| !q.is_empty())
            .collect(),
        None => HashSet::new(),
    };

    let mut appended = 0;
    let mut duplicates = 0;
    for question in unmatched {
        if known.contains(question.question.trim()) {
            duplicates += 1;
            continue;
        }
        let cells = layout.row_cells(&question.question, &question.options, &question.answer);
        first.rows.push(
            place_cells(&header, layout, cells)
                .into_iter()
                .map(CellValue::from)
                .collect(),
        );
        appended += 1;
    }

    if appended > 0 {
        let buffer = generate_sheets_buffer(&sheets)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, buffer)?;
        debug!("{} に{}件追記", path.display(), appended);
    }

    Ok(AppendSummary {
        path: path.to_path_buf(),
        existing_rows,
        appended,
        duplicates,
    })
}

/// ヘッダーの列位置に合わせてセルを並べ替える
///
/// ヘッダーに題庫の列がそろっていなければレイアウト順のまま返す。
fn place_cells(header: &[String], layout: &BankLayout, cells: Vec<String>) -> Vec<String> {
    let positions: Option<Vec<usize>> = layout
        .header()
        .iter()
        .map(|name| header.iter().position(|h| h == name))
        .collect();

    let Some(positions) = positions else {
        return cells;
    };

    let mut row = vec![String::new(); header.len()];
    for (pos, value) in positions.into_iter().zip(cells) {
        row[pos] = value;
    }
    row
}

/// 照合レポートをExcelで出力
pub fn write_report(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let buffer = generate_report_buffer(results)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
