//! Tracing subscriber setup.
//!
//! Logs always go to a file: stderr carries the TUI and stdout is reserved
//! for the final selection.  The file is `--log-file` when given, otherwise
//! `$XDG_STATE_HOME/people-picker/people-picker.log`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default log location (`~/.local/state/people-picker/people-picker.log`).
pub fn default_log_path() -> PathBuf {
    let state_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".local").join("state")
        });
    let name = env!("CARGO_PKG_NAME");
    state_dir.join(name).join(format!("{name}.log"))
}

/// Install the global subscriber.  Keep the returned guard alive until exit
/// so buffered output is flushed.
pub fn init(log_file: Option<&Path>) -> Result<WorkerGuard> {
    let path = log_file.map_or_else(default_log_path, Path::to_path_buf);
    let (directory, file_name) = prepare_log_dir(&path)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))?;
    Ok(guard)
}

/// Split a log path into its directory and file name, creating the directory.
fn prepare_log_dir(path: &Path) -> Result<(&Path, &OsStr)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    let directory = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .with_context(|| format!("creating log directory {}", directory.display()))?;
    Ok((directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_named_after_the_package() {
        let path = default_log_path();
        assert!(path.ends_with("people-picker/people-picker.log"));
    }

    #[test]
    fn missing_log_directory_is_created() {
        let dir = std::env::temp_dir().join(format!("people-picker-logs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("picker.log");

        let (directory, file_name) = prepare_log_dir(&path).unwrap();
        assert!(directory.is_dir());
        assert_eq!(file_name, "picker.log");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bare_file_name_logs_to_the_working_directory() {
        let (directory, _) = prepare_log_dir(Path::new("picker.log")).unwrap();
        assert_eq!(directory, Path::new("."));
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        assert!(prepare_log_dir(Path::new("/")).is_err());
    }
}
