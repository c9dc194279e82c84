use colored::*;
use futures::FutureExt;
use migration::Migrator;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigrationStatus;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 72;

async fn connect(url: &str) -> DatabaseConnection {
    sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed")
}

/// Applies every pending migration, printing one status line per migration.
pub async fn run_all_migrations(url: &str) {
    let db = connect(url).await;

    let pending = Migrator::get_pending_migrations(&db)
        .await
        .expect("Failed to read migration table");

    if pending.is_empty() {
        println!("{}", "Nothing to migrate".dimmed());
        return;
    }

    println!("Running {} migration(s)...", pending.len());
    for migration in pending {
        let name = migration.name().to_string();
        print!("Applying {}{} ", name.bold(), status_dots(&name));
        io::stdout().flush().ok();

        let start = Instant::now();
        // `up(.., Some(1))` applies exactly the next pending migration and records it.
        let result = std::panic::AssertUnwindSafe(Migrator::up(&db, Some(1)))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(())) => {
                let time_str = format!("({:.2?})", start.elapsed()).dimmed();
                println!("{} {}", "done".green(), time_str);
            }
            Ok(Err(e)) => {
                println!("{}", "failed".red());
                eprintln!("{name}: {e}");
                std::process::exit(1);
            }
            Err(_) => {
                println!("{}", "panicked".red());
                std::process::exit(1);
            }
        }
    }
}

/// Dot leader that lines the status up at `STATUS_COLUMN`.
///
/// Measured on the plain name; styling adds escape bytes that take no width.
fn status_dots(name: &str) -> String {
    let width = "Applying ".len() + name.chars().count();
    ".".repeat(STATUS_COLUMN.saturating_sub(width))
}

/// Lists every known migration and whether it has been applied.
pub async fn print_status(url: &str) {
    let db = connect(url).await;

    let migrations = Migrator::get_migration_with_status(&db)
        .await
        .expect("Failed to read migration table");

    for migration in migrations {
        let status = match migration.status() {
            MigrationStatus::Applied => "applied".green(),
            MigrationStatus::Pending => "pending".yellow(),
        };
        println!("{:<width$} {}", migration.name(), status, width = STATUS_COLUMN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_dots_pad_to_the_status_column() {
        let name = "m202507010001_create_permissions";
        let dots = status_dots(name);

        assert_eq!("Applying ".len() + name.len() + dots.len(), STATUS_COLUMN);
    }

    #[test]
    fn status_dots_ignore_styling() {
        colored::control::set_override(true);
        let name = "m202507010002_create_factoids";

        assert!(name.bold().to_string().len() > name.len());
        assert_eq!(status_dots(name).len(), STATUS_COLUMN - "Applying ".len() - name.len());
    }
}
