//! Tracing setup for binaries embedding the assessment engine.
//!
//! Plain stdout logging by default; setting `PM_LOG_DIR` switches to daily
//! rotated files. `RUST_LOG` filters as usual. A panic hook routes panics
//! through `tracing` so a degraded assessment (see `assessment::assess`)
//! still leaves a structured trace of what went wrong.

use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initializes the global subscriber. Repeated calls are harmless; only the
/// first installation wins.
pub fn init(app_name: &'static str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match std::env::var_os("PM_LOG_DIR") {
        Some(dir) => {
            let dir = std::path::PathBuf::from(dir);
            if let Err(err) = std::fs::create_dir_all(&dir) {
                eprintln!("failed to create PM_LOG_DIR ({err}); logging to stdout");
                let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
                return;
            }
            let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }
    }

    install_panic_hook(app_name);
}

fn install_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".into());
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload not string".into());

            tracing::error!(
                application = app_name,
                %location,
                panic_message = %message,
                "panic captured"
            );
        }));
    });
}
