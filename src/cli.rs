use clap::{Parser, Subcommand};
use quiz_match_common::RowPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quiz-match")]
#[command(about = "問題ページと題庫を照合して正解を推定するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 問題ページを題庫と照合して答えを表示
    Match {
        /// 問題ページのHTMLファイル、またはHTMLを含むフォルダ
        #[arg(required = true)]
        html: PathBuf,

        /// 題庫ファイル（xlsx/xls/ods）
        #[arg(short, long)]
        bank: PathBuf,

        /// 照合結果のJSON出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 照合レポート（xlsx）の出力先
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// 未一致問題の追記先（デフォルト: <題庫名>_unmatched.xlsx）
        #[arg(short, long)]
        unmatched: Option<PathBuf>,

        /// 未一致問題を追記しない
        #[arg(long)]
        no_append: bool,

        /// 問題文の類似度閾値（0.0-1.0、デフォルト0.7）
        #[arg(short, long)]
        threshold: Option<f64>,

        /// 選択肢の類似度閾値（0.0-1.0、デフォルト0.5）
        #[arg(long)]
        option_threshold: Option<f64>,

        /// 不正な題庫行の扱い (skip/abort)
        #[arg(long)]
        on_bad_row: Option<RowPolicy>,

        /// 題庫ファイルへの追記を確認なしで行う
        #[arg(short, long)]
        yes: bool,
    },

    /// 題庫を読み込んで内容を確認
    Bank {
        /// 題庫ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 不正な題庫行の扱い (skip/abort)
        #[arg(long)]
        on_bad_row: Option<RowPolicy>,
    },

    /// 問題ページから抽出した問題を表示
    Scan {
        /// HTMLファイルまたはフォルダ
        #[arg(required = true)]
        html: PathBuf,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 問題文の類似度閾値を設定
        #[arg(long)]
        set_threshold: Option<f64>,

        /// 選択肢の類似度閾値を設定
        #[arg(long)]
        set_option_threshold: Option<f64>,

        /// 未一致問題の追記先を設定
        #[arg(long)]
        set_unmatched: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_match_command() {
        let cli = Cli::try_parse_from([
            "quiz-match",
            "match",
            "page.html",
            "--bank",
            "bank.xlsx",
            "--threshold",
            "0.8",
            "--on-bad-row",
            "abort",
        ])
        .unwrap();

        match cli.command {
            Commands::Match {
                html,
                bank,
                threshold,
                on_bad_row,
                no_append,
                ..
            } => {
                assert_eq!(html, PathBuf::from("page.html"));
                assert_eq!(bank, PathBuf::from("bank.xlsx"));
                assert_eq!(threshold, Some(0.8));
                assert_eq!(on_bad_row, Some(RowPolicy::Abort));
                assert!(!no_append);
            }
            _ => panic!("matchコマンドのはず"),
        }
    }

    #[test]
    fn test_match_requires_bank() {
        assert!(Cli::try_parse_from(["quiz-match", "match", "page.html"]).is_err());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::try_parse_from(["quiz-match", "scan", "page.html", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
