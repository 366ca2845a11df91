use std::fs::File;
use std::io::{self, stderr};
use std::path::Path;
use std::sync::{LazyLock, Mutex};

use crate::game::zobrist::ZOBRIST;
use chrono::Local;
use miette::{Context, IntoDiagnostic};
use tracing::level_filters::LevelFilter;
use tracing::{Level, debug};
use tracing_appender::non_blocking;
use tracing_subscriber::reload;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, reload::Handle, util::SubscriberInitExt,
};

const LOG_DIR: &str = "/tmp/scoutbench_logs";

pub trait LogHandle: Send + Sync {
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()>;
}

impl<S> LogHandle for Handle<EnvFilter, S>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()> {
        self.modify(|current| *current = new_filter)
            .into_diagnostic()
    }
}

pub struct LogHandles {
    console_handle: Mutex<Box<dyn LogHandle>>,
    file_handle: Mutex<Box<dyn LogHandle>>,
    /// Where file logging goes, `None` when no log file could be created
    log_path: Option<String>,
}

/// Opens a fresh timestamped log file under [`LOG_DIR`]
fn open_log_file() -> io::Result<(File, String)> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let log_filename = format!("{LOG_DIR}/scoutbench_{timestamp}.log");
    let log_file = File::create(&log_filename)?;
    Ok((log_file, log_filename))
}

static LOG_HANDLES: LazyLock<LogHandles> = LazyLock::new(|| {
    #[cfg(feature = "dev-tools")]
    color_backtrace::install();

    // Console Layer with its own reloadable filter
    let console_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (console_filter, console_handle) = reload::Layer::new(console_filter);
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(stderr)
        .with_filter(console_filter);

    // File Layer with its own reloadable filter (initially off)
    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    let (file_filter, file_handle) = reload::Layer::new(file_filter);

    // An unwritable /tmp only costs us the log file
    let (non_blocking_writer, _guard, log_path) = match open_log_file() {
        Ok((file, path)) => {
            let (writer, guard) = non_blocking(file);
            (writer, guard, Some(path))
        }
        Err(e) => {
            eprintln!("Could not create a log file in {LOG_DIR}: {e}");
            let (writer, guard) = non_blocking(io::sink());
            (writer, guard, None)
        }
    };
    std::mem::forget(_guard); // Keep the guard alive.

    let file_layer = fmt::layer()
        .with_writer(non_blocking_writer)
        .with_ansi(false) // No colors in file
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    LogHandles {
        console_handle: Mutex::new(Box::new(console_handle)),
        file_handle: Mutex::new(Box::new(file_handle)),
        log_path,
    }
});

fn apply_filter(handle: &Mutex<Box<dyn LogHandle>>, new_filter: EnvFilter) -> miette::Result<()> {
    handle
        .lock()
        .map_err(|_| miette::miette!("Log handle lock poisoned"))?
        .set_filter(new_filter)
}

pub fn set_log_level(level: Level) -> miette::Result<()> {
    let new_filter = EnvFilter::new(level.to_string());

    apply_filter(&LOG_HANDLES.console_handle, new_filter)
        .with_context(|| format!("Failed to modify log filter to level: {level}"))
}

pub fn toggle_file_logging(enable: bool) -> miette::Result<()> {
    let new_filter = if enable {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    apply_filter(&LOG_HANDLES.file_handle, new_filter).context("Failed to modify log filter")?;
    if enable {
        match &LOG_HANDLES.log_path {
            Some(path) => debug!("File logging to {path}"),
            None => tracing::warn!("File logging requested but no log file is open"),
        }
    }
    Ok(())
}

/// Initialize tracing, backtraces and the zobrist keys
pub fn init() {
    LazyLock::force(&LOG_HANDLES);
    LazyLock::force(&ZOBRIST);
    debug!("Zobrist keys ready");
}
