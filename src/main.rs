use color_eyre::eyre::Result;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt};

mod app;
mod ui;

// Held for the lifetime of the process so buffered log lines get flushed
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    app::run().await
}

// Logs go to a rolling file; stdout belongs to the terminal UI
fn init_tracing() {
    let file = rolling::daily("logs", "lucky-seven.log");
    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    let _ = LOG_GUARD.set(guard);
}
