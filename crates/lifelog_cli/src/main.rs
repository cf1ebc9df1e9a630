//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifelog_core` linkage.
//! - Optionally summarize an existing database file.
//!
//! Usage: `lifelog_cli [DB_PATH]`

use lifelog_core::db::open_db;
use lifelog_core::{local_today, LogService, SqliteKvStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lifelog_core ping={}", lifelog_core::ping());
    println!("lifelog_core version={}", lifelog_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match summarize(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(db_path: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("failed to open `{db_path}`: {err}"))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| err.to_string())?;
    let service = LogService::open(&kv);
    let logs = service.store().logs();

    let completed = logs.iter().filter(|record| record.is_completed()).count();
    println!("logs total={} completed={completed}", logs.len());

    let dashboard = service.dashboard(local_today());
    for (index, day) in dashboard.histogram.days.iter().enumerate() {
        let percent = dashboard.histogram.bar_percent(index).unwrap_or_default();
        println!(
            "{} {} count={} bar={percent}%",
            day.date.format("%Y-%m-%d"),
            day.weekday_initial(),
            day.count
        );
    }
    Ok(())
}
