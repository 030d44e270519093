//! Example: build a small table, read it back and save it

use sheetwright::prelude::*;

fn main() -> Result<()> {
    let path = std::env::temp_dir().join("sheetwright-sample.xlsx");
    let mut excel = WorkbookManager::open(&path)?;

    if !excel.has_sheet("データ") {
        excel.create_sheet("データ", ["ID", "名前", "値"])?;
    }

    let thousands = WriteOptions::new().number_format("#,##0");

    excel.write_cell("データ", 2, 1, 1)?; // row/column
    excel.write_cell("データ", 2, "B", "サンプル1")?; // column letters
    excel.write_cell_with("データ", 2, 3, 1000, &thousands)?; // display format

    excel.write_cell_a1("データ", "A3", 2)?; // A1 reference
    excel.write_cell_a1("データ", "B3", "サンプル2")?;
    excel.write_cell_a1_with("データ", "C3", 2000, &thousands)?;

    println!("A2: {}", excel.read_cell("データ", 2, 1)?);
    println!("B2: {}", excel.read_cell_a1("データ", "B2")?);

    for row in excel.read_range("データ", 2, "A", 3, "C")? {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", cells.join("\t"));
    }

    excel.save()?;
    println!("Saved {}", path.display());
    Ok(())
}
