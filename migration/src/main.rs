use std::{fs, path::Path, process};
use util::{config::AppConfig, paths::ensure_parent_dir};

mod runner;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    let db_path = config.database_path;
    let url = format!("sqlite://{}?mode=rwc", db_path);
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&db_path);
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
        Some("status") => {
            runner::print_status(&url).await;
        }
        Some(other) => {
            eprintln!("Unknown command `{other}` (expected clean, fresh or status)");
            process::exit(2);
        }
        None => {
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(path: &str) {
    ensure_parent_dir(path).expect("Failed to create DB directory");
}
