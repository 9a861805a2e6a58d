use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn app_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/turix.log")
}

pub fn append_app_log_line(state_root: &Path, line: &str) -> std::io::Result<()> {
    let path = app_log_path(state_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    let stamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%z");
    writeln!(file, "{stamp} {line}")
}
