//! Basic CLI commands for dataset inspection.

use std::path::{Path, PathBuf};

use arrow::util::pretty::print_batches;

use crate::Table;

/// Load a table from a file path based on extension.
pub(crate) fn load_table(path: &PathBuf) -> crate::Result<Table> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "parquet" => Table::from_parquet(path),
        "csv" => Table::from_csv(path),
        "json" | "jsonl" => Table::from_json(path),
        ext => Err(crate::Error::unsupported_format(ext)),
    }
}

/// Get format name from file extension.
fn get_format(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => "Parquet",
        Some("csv") => "CSV",
        Some("json" | "jsonl") => "JSON",
        _ => "Unknown",
    }
}

/// Display dataset information.
pub(crate) fn cmd_info(path: &PathBuf) -> crate::Result<()> {
    let table = load_table(path)?;

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("File: {}", path.display());
    println!("Format: {}", get_format(path));
    println!("Rows: {}", table.len());
    println!("Batches: {}", table.num_batches());
    println!("Columns: {}", table.n_cols());
    println!("Size: {} bytes", file_size);

    Ok(())
}

/// Display first N rows of a dataset.
pub(crate) fn cmd_head(path: &PathBuf, rows: usize) -> crate::Result<()> {
    let table = load_table(path)?;

    if table.is_empty() {
        println!("Dataset is empty");
        return Ok(());
    }

    let mut collected = Vec::new();
    let mut count = 0;

    for batch in table.batches() {
        let take = (rows - count).min(batch.num_rows());
        if take > 0 {
            collected.push(batch.slice(0, take));
            count += take;
        }
        if count >= rows {
            break;
        }
    }

    if collected.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    print_batches(&collected).map_err(crate::Error::Arrow)?;

    if count < table.len() {
        println!("... showing {} of {} rows", count, table.len());
    }

    Ok(())
}

/// Display dataset schema.
pub(crate) fn cmd_schema(path: &PathBuf) -> crate::Result<()> {
    let table = load_table(path)?;
    let schema = table.schema();

    println!("Schema for {}:", path.display());
    println!();

    for (i, field) in schema.fields().iter().enumerate() {
        let nullable = if field.is_nullable() {
            "nullable"
        } else {
            "not null"
        };
        println!(
            "  {}: {} ({}) [{}]",
            i,
            field.name(),
            field.data_type(),
            nullable
        );
    }

    println!();
    println!("Total columns: {}", schema.fields().len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &tempfile::TempDir, rows: usize) -> PathBuf {
        let path = dir.path().join("test.csv");
        let mut data = String::from("id,name\n");
        for i in 0..rows {
            data.push_str(&format!("{},item_{}\n", i, i));
        }
        std::fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_load_table_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_csv(&temp_dir, 20);

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 20);
    }

    #[test]
    fn test_load_table_unsupported() {
        let result = load_table(&PathBuf::from("data.xlsx"));
        assert!(matches!(
            result,
            Err(crate::Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_cmd_info() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_csv(&temp_dir, 100);
        assert!(cmd_info(&path).is_ok());
    }

    #[test]
    fn test_cmd_head() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_csv(&temp_dir, 100);
        assert!(cmd_head(&path, 5).is_ok());
    }

    #[test]
    fn test_cmd_schema() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_csv(&temp_dir, 10);
        assert!(cmd_schema(&path).is_ok());
    }
}
