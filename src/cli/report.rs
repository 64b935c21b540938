//! Analysis CLI commands: summaries, missing values, correlations,
//! categories, quality flags, and the combined report.

use std::path::PathBuf;

use crate::{
    categories::{top_categories, FrequencyTable},
    correlation::{correlation_matrix, CorrelationMatrix},
    flatten_summary_for_print,
    missing::{missing_table, MissingTable},
    quality::{QualityFlags, QualityHeuristics},
    summarize_dataset,
    summary::SummaryRow,
    Error,
};

use super::basic::load_table;

const DEFAULT_MAX_CATEGORY_COLUMNS: usize = 10;
const DEFAULT_TOP_K: usize = 10;

fn check_format(format: &str) -> crate::Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(Error::invalid_config(format!(
            "unknown format '{}', expected 'text' or 'json'",
            other
        ))),
    }
}

fn to_json_pretty<T: serde::Serialize>(value: &T) -> crate::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Format(e.to_string()))
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".to_string())
}

/// Per-column descriptive statistics.
pub(crate) fn cmd_summary(path: &PathBuf, format: &str) -> crate::Result<()> {
    check_format(format)?;
    let table = load_table(path)?;
    let summary = summarize_dataset(&table)?;
    let rows = flatten_summary_for_print(&summary);

    if format == "json" {
        println!("{}", to_json_pretty(&rows)?);
    } else {
        println!("Dataset Summary");
        println!("===============");
        println!("File: {}", path.display());
        println!("Rows: {}", summary.n_rows);
        println!("Columns: {}", summary.n_cols);
        println!();
        print_summary_rows(&rows);
    }

    Ok(())
}

fn print_summary_rows(rows: &[SummaryRow]) {
    println!(
        "{:<20} {:<12} {:>8} {:>8} {:>8} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "NAME", "DTYPE", "COUNT", "MISSING", "MISS %", "UNIQUE", "MEAN", "STD", "MIN", "MAX"
    );
    println!("{}", "-".repeat(120));

    for row in rows {
        println!(
            "{:<20} {:<12} {:>8} {:>8} {:>8.2} {:>8} {:>12} {:>12} {:>12} {:>12}",
            row.name,
            row.dtype.to_string(),
            row.count,
            row.missing_count,
            row.missing_share * 100.0,
            row.unique,
            fmt_opt(row.mean),
            fmt_opt(row.std_dev),
            fmt_opt(row.min),
            fmt_opt(row.max),
        );
    }
}

/// Per-column missing-value report.
pub(crate) fn cmd_missing(path: &PathBuf, format: &str) -> crate::Result<()> {
    check_format(format)?;
    let table = load_table(path)?;
    let missing = missing_table(&table);

    if format == "json" {
        println!("{}", to_json_pretty(&missing)?);
    } else {
        println!("Missing Values");
        println!("==============");
        print_missing(&missing);
    }

    Ok(())
}

fn print_missing(missing: &MissingTable) {
    println!("{:<20} {:>10} {:>10}", "NAME", "MISSING", "MISS %");
    println!("{}", "-".repeat(42));

    for entry in missing.entries() {
        println!(
            "{:<20} {:>10} {:>10.2}",
            entry.name,
            entry.missing_count,
            entry.missing_share * 100.0
        );
    }
}

/// Pearson correlation matrix over numeric columns.
pub(crate) fn cmd_corr(path: &PathBuf, format: &str) -> crate::Result<()> {
    check_format(format)?;
    let table = load_table(path)?;
    let corr = correlation_matrix(&table)?;

    if format == "json" {
        println!("{}", to_json_pretty(&corr)?);
    } else {
        println!("Correlation Matrix");
        println!("==================");
        print_corr(&corr);
    }

    Ok(())
}

fn print_corr(corr: &CorrelationMatrix) {
    if corr.is_empty() {
        println!("Fewer than 2 numeric columns; nothing to correlate");
        return;
    }

    print!("{:<16}", "");
    for name in corr.columns() {
        print!(" {:>12}", truncate(name, 12));
    }
    println!();

    for (i, name) in corr.columns().iter().enumerate() {
        print!("{:<16}", truncate(name, 16));
        for j in 0..corr.len() {
            match corr.value(i, j) {
                Some(v) if v.is_nan() => print!(" {:>12}", "-"),
                Some(v) => print!(" {:>12.3}", v),
                None => print!(" {:>12}", "-"),
            }
        }
        println!();
    }
}

fn truncate(name: &str, width: usize) -> &str {
    if name.len() > width {
        &name[..width]
    } else {
        name
    }
}

/// Top-K frequency tables for categorical columns.
pub(crate) fn cmd_categories(
    path: &PathBuf,
    max_columns: usize,
    top_k: usize,
    format: &str,
) -> crate::Result<()> {
    check_format(format)?;
    let table = load_table(path)?;
    let tables = top_categories(&table, max_columns, top_k)?;

    if format == "json" {
        println!("{}", to_json_pretty(&tables)?);
    } else {
        println!("Top Categories");
        println!("==============");
        print_categories(&tables);
    }

    Ok(())
}

fn print_categories(tables: &[FrequencyTable]) {
    if tables.is_empty() {
        println!("No categorical columns to profile");
        return;
    }

    for table in tables {
        println!();
        println!("{}:", table.column);
        for entry in &table.entries {
            println!("  {:<24} {:>8}", entry.value, entry.count);
        }
        if table.is_empty() {
            println!("  (no non-missing values)");
        }
    }
}

/// Data-quality flags and overall score.
pub(crate) fn cmd_flags(
    path: &PathBuf,
    zero_threshold: f64,
    cardinality_threshold: f64,
    format: &str,
) -> crate::Result<()> {
    check_format(format)?;
    let table = load_table(path)?;
    let summary = summarize_dataset(&table)?;
    let missing = missing_table(&table);

    let flags = QualityHeuristics::new()
        .max_zero_share(zero_threshold)
        .max_category_unique_share(cardinality_threshold)
        .compute(&summary, &missing);

    if format == "json" {
        println!("{}", to_json_pretty(&flags)?);
    } else {
        println!("Quality Flags");
        println!("=============");
        println!("File: {}", path.display());
        println!();
        print_flags(&flags);
    }

    Ok(())
}

fn print_flags(flags: &QualityFlags) {
    println!("Quality Score: {:.2}", flags.quality_score);
    println!();

    if !flags.has_issues() {
        println!("\u{2713} No quality issues found");
        return;
    }

    if flags.has_constant_columns {
        println!("Constant columns:");
        for name in &flags.constant_columns {
            println!("  - {}", name);
        }
    }

    if flags.has_suspicious_id_duplicates {
        println!("Suspicious ID duplicates:");
        for info in &flags.id_duplicates_info {
            println!(
                "  - {} ({} duplicates, rate {:.2})",
                info.name, info.duplicate_count, info.duplicate_rate
            );
        }
    }

    if flags.has_high_cardinality_categoricals {
        println!("High-cardinality categorical columns:");
        for col in &flags.high_cardinality_columns {
            println!(
                "  - {} ({} unique, share {:.2})",
                col.name, col.unique, col.unique_share
            );
        }
    }

    if flags.has_many_zero_values {
        println!("Columns dominated by zeros:");
        for col in &flags.many_zero_columns {
            println!("  - {} (zero share {:.2})", col.name, col.zero_share);
        }
    }
}

/// Full report: all analyzers over one table.
pub(crate) fn cmd_report(
    path: &PathBuf,
    format: &str,
    output: Option<&PathBuf>,
) -> crate::Result<()> {
    check_format(format)?;
    let table = load_table(path)?;

    let summary = summarize_dataset(&table)?;
    let missing = missing_table(&table);
    let corr = correlation_matrix(&table)?;
    let categories = top_categories(&table, DEFAULT_MAX_CATEGORY_COLUMNS, DEFAULT_TOP_K)?;
    let flags = QualityHeuristics::new().compute(&summary, &missing);

    if format == "json" || output.is_some() {
        let json = serde_json::json!({
            "path": path.display().to_string(),
            "rows": summary.n_rows,
            "columns": summary.n_cols,
            "summary": flatten_summary_for_print(&summary),
            "missing": missing,
            "correlation": corr,
            "categories": categories,
            "flags": flags,
        });
        let json_str = to_json_pretty(&json)?;

        if let Some(output_path) = output {
            std::fs::write(output_path, &json_str)
                .map_err(|e| Error::io(e, output_path))?;
            println!("Report written to: {}", output_path.display());
        } else {
            println!("{}", json_str);
        }
        return Ok(());
    }

    println!("Dataset Report");
    println!("==============");
    println!("File: {}", path.display());
    println!("Rows: {}", summary.n_rows);
    println!("Columns: {}", summary.n_cols);
    println!();

    print_summary_rows(&flatten_summary_for_print(&summary));
    println!();
    print_missing(&missing);
    println!();
    println!("Correlation Matrix");
    println!("------------------");
    print_corr(&corr);
    println!();
    println!("Top Categories");
    println!("--------------");
    print_categories(&categories);
    println!();
    println!("Quality Flags");
    println!("-------------");
    print_flags(&flags);

    Ok(())
}
