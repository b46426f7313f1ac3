use clap::Parser;
use dialoguer::Confirm;
use quiz_match::{bank, cli, config, error, export, report, scanner};
use quiz_match_common::{reconcile_with, unmatched_questions, ReconcileStats, SkippedRow};
use cli::{Cli, Commands};
use config::{check_threshold, Config};
use error::{QuizMatchError, Result};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Match {
            html,
            bank: bank_path,
            output,
            report: report_path,
            unmatched,
            no_append,
            threshold,
            option_threshold,
            on_bad_row,
            yes,
        } => {
            println!("🔎 quiz-match - 問題照合");
            println!("   {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

            let mut settings = config.match_settings();
            if let Some(t) = threshold {
                check_threshold("threshold", t)?;
                settings.question_threshold = t;
            }
            if let Some(t) = option_threshold {
                check_threshold("option-threshold", t)?;
                settings.option_threshold = t;
            }
            let policy = on_bad_row.unwrap_or(config.row_policy);

            // 1. 題庫
            println!("[1/3] 題庫を読み込み中...");
            let load = bank::load_bank(&bank_path, &config.layout, policy)?;
            println!("✔ {}件の問題を読み込み ({})", load.records.len(), load.sheet);
            print_skipped(&load.skipped);
            println!();

            // 2. ページ
            println!("[2/3] 問題ページをスキャン中...");
            let selectors = scanner::PageSelectors::compile(&config.selectors)?;
            let pages = scanner::scan(&html, &selectors)?;
            let questions: Vec<_> = pages.into_iter().flat_map(|p| p.questions).collect();
            if questions.is_empty() {
                return Err(QuizMatchError::NoQuestionsFound(html.display().to_string()));
            }
            println!("✔ {}問を抽出\n", questions.len());

            if load.records.is_empty() {
                warn!("題庫が空のため照合しません: {}", bank_path.display());
                println!("⚠ 題庫が空です。照合をスキップしました");
                return Ok(());
            }

            // 3. 照合
            println!("[3/3] 照合中...");
            let results = reconcile_with(&questions, &load.records, &settings);
            let stats = ReconcileStats::from_results(&results);
            println!("✔ 照合完了\n");

            report::print_results(&results);
            println!("\n{}", report::render_stats(&stats));

            if let Some(path) = output {
                export::write_json(&results, &path)?;
                println!("✔ JSONを保存: {}", path.display());
            }

            if let Some(path) = report_path {
                export::excel::write_report(&results, &path)?;
                println!("✔ レポートを保存: {}", path.display());
            }

            let pending = unmatched_questions(&results);
            if no_append || pending.is_empty() {
                info!("未一致問題の追記なし");
            } else {
                let target = unmatched
                    .or_else(|| config.unmatched_path.clone())
                    .unwrap_or_else(|| export::default_unmatched_path(&bank_path));

                if confirm_append(&target, &bank_path, yes)? {
                    let summary = export::excel::append_unmatched(&target, &pending, &config.layout)?;
                    println!(
                        "✔ 未一致問題を追記: {}件（重複 {}件） → {}",
                        summary.appended,
                        summary.duplicates,
                        summary.path.display()
                    );
                } else {
                    println!("未一致問題の追記を取り消しました");
                }
            }

            println!("\n✅ 完了");
        }

        Commands::Bank { input, on_bad_row } => {
            println!("📚 quiz-match - 題庫確認\n");

            let policy = on_bad_row.unwrap_or(config.row_policy);
            let load = bank::load_bank(&input, &config.layout, policy)?;
            if load.records.is_empty() && load.skipped.is_empty() {
                return Err(QuizMatchError::EmptyBank(input.display().to_string()));
            }

            println!("シート: {}", load.sheet);
            println!("列: {}", load.columns.join(" | "));
            println!("問題数: {}", load.records.len());
            println!(
                "答えなし: {}",
                load.records.iter().filter(|r| r.answer.is_none()).count()
            );
            print_skipped(&load.skipped);
        }

        Commands::Scan { html, json } => {
            let selectors = scanner::PageSelectors::compile(&config.selectors)?;
            let pages = scanner::scan(&html, &selectors)?;

            if json {
                let value: Vec<_> = pages
                    .iter()
                    .map(|page| {
                        serde_json::json!({
                            "path": page.path.display().to_string(),
                            "questions": page.questions,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            for page in &pages {
                println!("📄 {} ({}問)", page.path.display(), page.questions.len());
                for (i, question) in page.questions.iter().enumerate() {
                    println!("  {}. {}", i + 1, question.text);
                    for (j, option) in question.options.iter().enumerate() {
                        println!("     ({}) {}", j + 1, option);
                    }
                }
            }
        }

        Commands::Config {
            set_threshold,
            set_option_threshold,
            set_unmatched,
            show,
        } => {
            let mut config = config;

            if let Some(value) = set_threshold {
                config.set_question_threshold(value)?;
                println!("✔ 問題文の閾値を設定しました: {}", value);
            }

            if let Some(value) = set_option_threshold {
                config.set_option_threshold(value)?;
                println!("✔ 選択肢の閾値を設定しました: {}", value);
            }

            if let Some(path) = set_unmatched {
                config.set_unmatched_path(path.clone())?;
                println!("✔ 未一致問題の追記先を設定しました: {}", path.display());
            }

            if show {
                println!("設定:");
                println!("  問題文の閾値: {}", config.question_threshold);
                println!("  選択肢の閾値: {}", config.option_threshold);
                println!("  シート: {}", config.layout.sheet.as_deref().unwrap_or("(先頭)"));
                println!("  列: {}", config.layout.header().join(" | "));
                println!("  不正行: {}", config.row_policy);
                println!(
                    "  追記先: {}",
                    config
                        .unmatched_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<題庫名>_unmatched.xlsx".into())
                );
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn print_skipped(skipped: &[SkippedRow]) {
    if skipped.is_empty() {
        return;
    }
    println!("⚠ {}行をスキップ", skipped.len());
    for row in skipped {
        println!("  - {}行目: {}", row.row, row.reason);
    }
}

/// 追記先が題庫そのものなら確認する
fn confirm_append(target: &Path, bank_path: &Path, yes: bool) -> Result<bool> {
    if yes || !export::same_file(target, bank_path) {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(format!(
            "題庫ファイル {} に直接追記します。よろしいですか？",
            target.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| QuizMatchError::Prompt(e.to_string()))
}
