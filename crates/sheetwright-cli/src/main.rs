//! sheetwright CLI - runs the workbook manager demonstration against a file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sheetwright::prelude::*;

#[derive(Parser)]
#[command(name = "sheetwright")]
#[command(
    author,
    version,
    about = "Write a small table into an xlsx workbook, read it back and save"
)]
struct Cli {
    /// Workbook to open (created when missing)
    #[arg(short, long)]
    file: PathBuf,

    /// Sheet the demonstration writes to
    #[arg(short, long, default_value = "データ")]
    sheet: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let sheet = cli.sheet.as_str();
    let mut excel = WorkbookManager::open(&cli.file)
        .with_context(|| format!("Failed to open '{}'", cli.file.display()))?;

    if excel.has_sheet(sheet) {
        log::info!("Sheet '{}' already exists, overwriting its cells", sheet);
    } else {
        excel
            .create_sheet(sheet, ["ID", "名前", "値"])
            .with_context(|| format!("Failed to create sheet '{}'", sheet))?;
    }

    let thousands = WriteOptions::new().number_format("#,##0");

    // Row/column, column letters, and a display format
    excel.write_cell(sheet, 2, 1, 1)?;
    excel.write_cell(sheet, 2, "B", "サンプル1")?;
    excel.write_cell_with(sheet, 2, 3, 1000, &thousands)?;

    // A1 references
    excel.write_cell_a1(sheet, "A3", 2)?;
    excel.write_cell_a1(sheet, "B3", "サンプル2")?;
    excel.write_cell_a1_with(sheet, "C3", 2000, &thousands)?;

    let first = excel.read_cell(sheet, 2, 1)?;
    let second = excel.read_cell_a1(sheet, "B2")?;
    log::debug!("A2 = {}, B2 = {}", first, second);

    let rows = excel.read_range(sheet, 2, "A", 3, "C")?;
    println!("読み込んだデータ: {}", render_rows(&rows));

    excel
        .save()
        .with_context(|| format!("Failed to save '{}'", cli.file.display()))?;
    Ok(())
}

/// `[[1, 'サンプル1', 1000], [2, 'サンプル2', 2000]]`
fn render_rows(rows: &[Vec<CellValue>]) -> String {
    let rendered: Vec<String> = rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(render_value).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}

fn render_value(value: &CellValue) -> String {
    match value {
        CellValue::Empty => "None".to_string(),
        CellValue::Text(s) => format!("'{}'", s),
        CellValue::Formula {
            cached_value: Some(v),
            ..
        } => render_value(v),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rows() {
        let rows = vec![
            vec![CellValue::Number(1.0), CellValue::text("サンプル1"), CellValue::Number(1000.0)],
            vec![CellValue::Empty, CellValue::Boolean(true), CellValue::Number(0.5)],
        ];
        assert_eq!(
            render_rows(&rows),
            "[[1, 'サンプル1', 1000], [None, TRUE, 0.5]]"
        );
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::parse_from(["sheetwright", "-f", "book.xlsx"]);
        assert_eq!(cli.file, PathBuf::from("book.xlsx"));
        assert_eq!(cli.sheet, "データ");

        let cli = Cli::parse_from(["sheetwright", "--file", "b.xlsx", "--sheet", "S"]);
        assert_eq!(cli.sheet, "S");
    }
}
