use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};
use std::env;
use std::io::Write;

pub fn init_logging() -> Result<(), SetLoggerError> {
    let env = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_level = match env.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let mut builder = Builder::from_default_env();

    // Customize format for better readability
    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);

        match record.level() {
            Level::Info => {
                writeln!(buf, "{} [INFO] [{}]: {}", timestamp, target, record.args())
            }
            level => {
                writeln!(
                    buf,
                    "{} [{}] [{}:{}] {}: {}",
                    timestamp,
                    level,
                    file,
                    line,
                    target,
                    record.args()
                )
            }
        }
    });

    // Filter out noisy modules in production
    if env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("hyper", LevelFilter::Warn);
        builder.filter_module("tokio", LevelFilter::Info);
        builder.filter_module("sqlx", LevelFilter::Warn);
    }

    builder.filter_level(log_level).target(Target::Stdout).init();
    Ok(())
}

pub fn log_error_with_context(error: &crate::error::AppError, context: &str) {
    log::error!("[{}] {}", context, error.to_safe_string());

    let mut source = std::error::Error::source(error);
    while let Some(err) = source {
        log::error!("  Caused by: {}", err);
        source = err.source();
    }
}

pub fn log_calendar_sync(provider: &str, events_count: usize, duration_ms: u64) {
    log::info!(
        "[Calendar] Fetched {} events from '{}' in {}ms",
        events_count,
        provider,
        duration_ms
    );
}

pub fn log_auth_event(event: &str, provider: &str) {
    log::info!("[Auth] {} for provider '{}'", event, provider);
}
