//! Diagnostic logging for the catalog.
//!
//! Log output goes to size-rotated files under a caller-chosen directory,
//! formatted as `event=... module=... status=...` key=value lines so the
//! records stay grep-able. The process-wide logger is started at most once:
//! repeat calls with the same configuration are no-ops, and calls that try
//! to move the log directory or change the level after the fact fail
//! instead of silently reconfiguring.
//!
//! A panic hook mirrors panics into the log with a flattened, length-capped
//! snippet of the payload.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "bookshelf";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_SNIPPET_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts catalog logging, or verifies it against an earlier start.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging is already active with a different level or directory.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let dir = absolute_dir(log_dir)?;

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, dir.clone()))?;

    // get_or_try_init returns the winning state, which may belong to an
    // earlier caller with a different configuration.
    if state.log_dir != dir {
        return Err(format!(
            "logging already active at `{}`; cannot move it to `{}`",
            state.log_dir.display(),
            dir.display()
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already active at level `{}`; cannot change it to `{level}`",
            state.level
        ));
    }

    Ok(())
}

/// Returns `(level, log_dir)` once logging is active, `None` before.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// Default level per build profile: `debug` for debug builds, `info`
/// otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, dir: PathBuf) -> Result<LoggingState, String> {
    std::fs::create_dir_all(&dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("log level `{level}` rejected by backend: {err}"))?
        .log_to_file(FileSpec::default().directory(dir.as_path()).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    install_panic_hook_once();

    info!(
        "event=catalog_start module=logging status=ok platform={} version={} level={} dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level,
        dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir: dir,
        _logger: logger,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "log level `{other}` is not one of trace|debug|info|warn|error"
        )),
    }
}

fn absolute_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log directory cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!(
            "log directory must be an absolute path, got `{trimmed}`"
        ));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic module=logging status=error location={} detail={}",
            location,
            panic_snippet(panic_info)
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

// Payloads can carry arbitrary user text; flatten newlines and cap length
// before they reach the log.
fn panic_snippet(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    one_line_snippet(&payload, PANIC_SNIPPET_CHARS)
}

fn one_line_snippet(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut snippet = flattened.chars().take(max_chars).collect::<String>();
    if flattened.chars().count() > max_chars {
        snippet.push_str("...");
    }
    snippet
}
