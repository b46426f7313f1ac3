pub mod excel;

use crate::error::Result;
use quiz_match_common::MatchResult;
use std::path::{Path, PathBuf};

/// 題庫ファイルの隣に置く追跡シートの既定パス（<題庫名>_unmatched.xlsx）
pub fn default_unmatched_path(bank_path: &Path) -> PathBuf {
    let parent = bank_path.parent().unwrap_or_else(|| Path::new("."));
    let stem = bank_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bank");
    parent.join(format!("{}_unmatched.xlsx", stem))
}

/// 照合結果をJSONで保存
pub fn write_json(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 2つのパスが同じファイルを指すか
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unmatched_path() {
        let path = default_unmatched_path(Path::new("data/完整题库.xlsx"));
        assert_eq!(path, Path::new("data/完整题库_unmatched.xlsx"));
    }

    #[test]
    fn test_default_unmatched_path_no_parent() {
        let path = default_unmatched_path(Path::new("bank.xlsx"));
        assert_eq!(path, Path::new("bank_unmatched.xlsx"));
    }

    #[test]
    fn test_same_file_missing_paths() {
        assert!(same_file(Path::new("no/such.xlsx"), Path::new("no/such.xlsx")));
        assert!(!same_file(Path::new("a.xlsx"), Path::new("b.xlsx")));
    }
}
