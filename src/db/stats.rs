use crate::db::store::Store;
use crate::errors::AppResult;
use crate::models::collection::Collection;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

/// File size, record counts per collection and the span of recorded days.
pub fn print_db_info(store: &Store, db_path: &str) -> AppResult<()> {
    // in-memory or not yet flushed files report 0
    let bytes = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    println!("{CYAN}• File:{RESET} {YELLOW}{db_path}{RESET}");
    println!("{CYAN}• Size:{RESET} {:.2} MB", bytes as f64 / 1_048_576.0);
    println!("{CYAN}• Records:{RESET}");
    for c in Collection::KEYED {
        let count = store.count(c)?;
        println!("    {:<8} {GREEN}{count}{RESET}", c.table());
    }

    let (first, last): (Option<String>, Option<String>) = store.conn().query_row(
        "SELECT MIN(json_extract(data, '$.day')), MAX(json_extract(data, '$.day')) FROM entries",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let or_dash = |d: Option<String>| d.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!(
        "{CYAN}• Entry days:{RESET} {} .. {}",
        or_dash(first),
        or_dash(last)
    );
    Ok(())
}
