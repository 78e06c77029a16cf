use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fphoto_organizer_core::{
    apply_plan_with_progress, make_rename_plan, resolve_output_folder, scan_input_folder,
    PlanOptions, RenamePlan,
};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fphoto-organizer")]
#[command(about = "撮影日時を元に写真をリネームして新しいフォルダへコピーします")]
struct Cli {
    input_folder: PathBuf,
    #[arg(short = 'm', long, default_value_t = false)]
    create_month_folders: bool,
    #[arg(short = 's', long)]
    suffix: Option<String>,
    #[arg(long, default_value_t = false)]
    include_hidden: bool,
    #[arg(short = 'y', long, default_value_t = false)]
    yes: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output_folder = resolve_output_folder(&cli.input_folder);
    let files = scan_input_folder(&cli.input_folder, cli.include_hidden)?;
    if files.is_empty() {
        eprintln!("対象ファイルがありません: {}", cli.input_folder.display());
        return Ok(());
    }

    let options = PlanOptions {
        suffix: cli.suffix,
        create_month_folders: cli.create_month_folders,
    };
    let plan = make_rename_plan(&files, &options, &output_folder);

    match cli.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        OutputFormat::Table => {
            print_table(&plan);
        }
    }

    if !cli.yes && !confirm_continue()? {
        eprintln!("中断しました。ファイルは変更していません。");
        return Ok(());
    }

    let result = apply_plan_with_progress(&plan, |_| {
        eprint!(".");
    })?;
    eprintln!(
        "\n完了: {}件コピーしました (撮影日時を設定 {}件)",
        result.copied, result.restamped
    );

    Ok(())
}

fn print_table(plan: &RenamePlan) {
    println!("元ファイル => コピー先 (kind)");
    for entry in &plan.entries {
        println!(
            "{} => {} ({:?})",
            entry.original_path.display(),
            entry.target_path.display(),
            entry.kind
        );
    }

    println!(
        "\n集計: planned={} timestamped={} missing_exif={} malformed_timestamp={}",
        plan.stats.planned,
        plan.stats.timestamped,
        plan.stats.missing_exif,
        plan.stats.malformed_timestamp
    );
}

fn confirm_continue() -> Result<bool> {
    eprint!("\n続行しますか? [y/n] ");
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("標準入力を読めませんでした")?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
