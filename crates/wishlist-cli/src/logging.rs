use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use wishlist_config::LoggingConfig;

/// Directive for a given verbosity. 0 falls back to the configured level.
fn filter_directive(verbose_level: u8, quiet: bool, configured: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose_level {
        0 => configured.to_string(),
        // -v: debug, but keep the HTTP connection pool quiet
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn".to_string(),
        _ => "trace".to_string(),
    }
}

/// JSON unless stdout is a terminal. `RUST_LOG_JSON` wins over config.
fn use_json(configured: Option<bool>) -> bool {
    match std::env::var("RUST_LOG_JSON") {
        Ok(v) => v == "true",
        Err(_) => configured.unwrap_or_else(|| !io::stdout().is_terminal()),
    }
}

/// Split `dir/wishlist.log` into the directory and the rotation prefix.
fn rotation_target(log_path: &Path) -> Result<(PathBuf, String)> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let prefix = log_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(log_filename);
    Ok((log_dir.to_path_buf(), prefix.to_string()))
}

pub fn init_logging(
    verbose_level: u8,
    quiet: bool,
    config: &LoggingConfig,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let directive = filter_directive(verbose_level, quiet, &config.level);
    let filter = if quiet {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };
    let json = use_json(config.json);
    let registry = Registry::default().with(filter);

    match log_file {
        Some(log_path) => {
            let (log_dir, prefix) = rotation_target(&log_path)?;
            std::fs::create_dir_all(&log_dir)?;
            // wishlist.log.2026-10-17 and so on
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, prefix);

            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(file_appender);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(file_appender);
                registry.with(fmt_layer).init();
            }
        }
        None => {
            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(fmt_layer).init();
            }
        }
    }

    Ok(())
}
