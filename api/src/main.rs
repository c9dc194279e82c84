use panel::routes::{WebConfig, build_router};
use std::net::SocketAddr;
use tracing_appender::rolling;
use util::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    let _log_guard = init_logging(&config);

    let db = db::connect(&config.database_path)
        .await
        .expect("Failed to connect to database");
    db::migrate(&db).await.expect("Failed to run migrations");

    if config.session_secret == util::config::DEFAULT_SESSION_SECRET && config.is_production() {
        tracing::warn!("SESSION_SECRET is the default value; session cookies can be forged");
    }

    let web = WebConfig::from_config(&config);
    if !web.root.is_dir() {
        tracing::warn!(root = %web.root.display(), "web root does not exist; static files will 404");
    }

    let app_state = AppState::from_config(db, &config);
    let app = build_router(app_state, &web);

    let addr: SocketAddr = config.bind_address().parse().expect("Invalid address");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    tracing::info!(
        "Starting {} on http://{} (web root {})",
        config.project_name,
        addr,
        web.root.display()
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server crashed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("panel=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
